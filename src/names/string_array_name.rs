use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use tracing::trace;

use crate::contract::{ContractViolation, check_argument, check_index, check_insert_index};

use super::{
    Name,
    escaping::{
        DEFAULT_DELIMITER, ESCAPE_CHARACTER, check_masking, check_no_dangling_escape, split,
    },
};

/// A [`Name`] that keeps its masked components in a `Vec`.
#[derive(Debug, Clone)]
pub struct StringArrayName {
    delimiter: char,
    components: Vec<String>,
}

impl StringArrayName {
    /// Builds a name from masked components using [`DEFAULT_DELIMITER`].
    pub fn new<I, S>(components: I) -> Result<Self, ContractViolation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_delimiter(components, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter<I, S>(components: I, delimiter: char) -> Result<Self, ContractViolation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        check_argument(
            delimiter != ESCAPE_CHARACTER,
            "delimiter must differ from the escape character",
        )?;

        let components = components.into_iter().map(Into::into).collect::<Vec<String>>();
        for component in &components {
            check_masking(component, delimiter)?;
        }

        let name = Self {
            delimiter,
            components,
        };
        name.check_invariants()?;
        Ok(name)
    }

    /// Parses a masked string into its components.
    pub fn parse(source: &str, delimiter: char) -> Result<Self, ContractViolation> {
        check_no_dangling_escape(source)?;
        trace!("Parsing '{}' with delimiter '{}'", source, delimiter);
        Self::with_delimiter(split(source, delimiter), delimiter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }
}

impl Name for StringArrayName {
    fn delimiter_character(&self) -> char {
        self.delimiter
    }

    fn no_components(&self) -> usize {
        self.components.len()
    }

    fn component(&self, index: usize) -> Result<String, ContractViolation> {
        check_index(index, self.components.len())?;
        Ok(self.components[index].clone())
    }

    fn components(&self) -> Vec<String> {
        self.components.clone()
    }

    fn set_component(&mut self, index: usize, component: &str) -> Result<(), ContractViolation> {
        check_index(index, self.components.len())?;
        check_masking(component, self.delimiter)?;

        self.components[index] = component.to_string();
        self.check_invariants()
    }

    fn insert(&mut self, index: usize, component: &str) -> Result<(), ContractViolation> {
        check_insert_index(index, self.components.len())?;
        check_masking(component, self.delimiter)?;

        self.components.insert(index, component.to_string());
        self.check_invariants()
    }

    fn append(&mut self, component: &str) -> Result<(), ContractViolation> {
        check_masking(component, self.delimiter)?;

        self.components.push(component.to_string());
        self.check_invariants()
    }

    fn remove(&mut self, index: usize) -> Result<(), ContractViolation> {
        check_index(index, self.components.len())?;

        self.components.remove(index);
        self.check_invariants()
    }

    fn clone_name(&self) -> Box<dyn Name> {
        Box::new(self.clone())
    }
}

impl<N: Name> PartialEq<N> for StringArrayName {
    fn eq(&self, other: &N) -> bool {
        self.is_equal(other)
    }
}

impl Eq for StringArrayName {}

impl Hash for StringArrayName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_code().hash(state);
    }
}

impl fmt::Display for StringArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl FromStr for StringArrayName {
    type Err = ContractViolation;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source, DEFAULT_DELIMITER)
    }
}
