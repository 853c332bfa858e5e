use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use tracing::trace;

use crate::contract::{
    ContractViolation, check_argument, check_index, check_insert_index, check_invariant,
};

use super::{
    Name,
    escaping::{
        DEFAULT_DELIMITER, ESCAPE_CHARACTER, check_masking, check_no_dangling_escape, split,
    },
};

/// A [`Name`] stored as one masked string.
///
/// Components are recovered by parsing on every access. The component count
/// is kept alongside the string because `""` alone cannot tell the empty name
/// apart from a name holding a single empty component.
#[derive(Debug, Clone)]
pub struct StringName {
    delimiter: char,
    name: String,
    no_components: usize,
}

impl StringName {
    /// Parses `source` with [`DEFAULT_DELIMITER`].
    pub fn new(source: &str) -> Result<Self, ContractViolation> {
        Self::with_delimiter(source, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(source: &str, delimiter: char) -> Result<Self, ContractViolation> {
        check_argument(
            delimiter != ESCAPE_CHARACTER,
            "delimiter must differ from the escape character",
        )?;
        check_no_dangling_escape(source)?;
        trace!("Parsing '{}' with delimiter '{}'", source, delimiter);

        let components = split(source, delimiter);
        for component in &components {
            check_masking(component, delimiter)?;
        }

        let name = Self {
            delimiter,
            name: source.to_string(),
            no_components: components.len(),
        };
        name.check_invariants()?;
        Ok(name)
    }

    /// The name without any components.
    pub fn empty(delimiter: char) -> Result<Self, ContractViolation> {
        Self::with_delimiter("", delimiter)
    }

    /// The masked string backing this name.
    pub fn as_masked_str(&self) -> &str {
        &self.name
    }

    fn parse(&self) -> Vec<String> {
        if self.name.is_empty() {
            vec![String::new(); self.no_components]
        } else {
            split(&self.name, self.delimiter)
        }
    }

    fn rebuild(&mut self, components: Vec<String>) {
        self.name = components.join(&self.delimiter.to_string());
        self.no_components = components.len();
    }
}

impl Name for StringName {
    fn delimiter_character(&self) -> char {
        self.delimiter
    }

    fn no_components(&self) -> usize {
        self.no_components
    }

    fn component(&self, index: usize) -> Result<String, ContractViolation> {
        check_index(index, self.no_components)?;
        Ok(self.parse().swap_remove(index))
    }

    fn components(&self) -> Vec<String> {
        self.parse()
    }

    fn set_component(&mut self, index: usize, component: &str) -> Result<(), ContractViolation> {
        check_index(index, self.no_components)?;
        check_masking(component, self.delimiter)?;

        let mut components = self.parse();
        components[index] = component.to_string();
        self.rebuild(components);
        self.check_invariants()
    }

    fn insert(&mut self, index: usize, component: &str) -> Result<(), ContractViolation> {
        check_insert_index(index, self.no_components)?;
        check_masking(component, self.delimiter)?;

        let mut components = self.parse();
        components.insert(index, component.to_string());
        self.rebuild(components);
        self.check_invariants()
    }

    fn append(&mut self, component: &str) -> Result<(), ContractViolation> {
        check_masking(component, self.delimiter)?;

        let mut components = self.parse();
        components.push(component.to_string());
        self.rebuild(components);
        self.check_invariants()
    }

    fn remove(&mut self, index: usize) -> Result<(), ContractViolation> {
        check_index(index, self.no_components)?;

        let mut components = self.parse();
        components.remove(index);
        self.rebuild(components);
        self.check_invariants()
    }

    fn clone_name(&self) -> Box<dyn Name> {
        Box::new(self.clone())
    }

    fn check_invariants(&self) -> Result<(), ContractViolation> {
        check_invariant(
            !self.name.is_empty() || self.no_components <= 1,
            "an empty string holds at most one component",
        )?;
        check_invariant(
            self.name.is_empty() || split(&self.name, self.delimiter).len() == self.no_components,
            "component count is out of sync with the stored string",
        )?;
        check_invariant(
            check_no_dangling_escape(&self.name).is_ok(),
            "stored string ends in a dangling escape character",
        )?;
        check_invariant(
            self.delimiter != ESCAPE_CHARACTER,
            "delimiter must differ from the escape character",
        )
    }
}

impl<N: Name> PartialEq<N> for StringName {
    fn eq(&self, other: &N) -> bool {
        self.is_equal(other)
    }
}

impl Eq for StringName {}

impl Hash for StringName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_code().hash(state);
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl FromStr for StringName {
    type Err = ContractViolation;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::new(source)
    }
}
