use std::fmt;

use crate::contract::{
    ContractViolation, check_argument, check_invariant, check_postcondition, single_character,
};

use super::escaping::{DEFAULT_DELIMITER, ESCAPE_CHARACTER, mask, masking_defect, remask, unmask};

/// An ordered sequence of masked components joined by a single-character
/// delimiter.
///
/// Implementations only provide storage; serialization, equality, hashing and
/// concatenation are shared. Mutators change the receiver in place and leave
/// it untouched when they fail.
pub trait Name: fmt::Debug {
    fn delimiter_character(&self) -> char;

    fn no_components(&self) -> usize;

    /// Masked component at `index`.
    fn component(&self, index: usize) -> Result<String, ContractViolation>;

    /// All masked components in order.
    fn components(&self) -> Vec<String>;

    fn set_component(&mut self, index: usize, component: &str) -> Result<(), ContractViolation>;

    /// Inserts a masked component; `index` may equal the component count.
    fn insert(&mut self, index: usize, component: &str) -> Result<(), ContractViolation>;

    fn append(&mut self, component: &str) -> Result<(), ContractViolation>;

    fn remove(&mut self, index: usize) -> Result<(), ContractViolation>;

    fn clone_name(&self) -> Box<dyn Name>;

    fn is_empty(&self) -> bool {
        self.no_components() == 0
    }

    /// Human readable form using the instance delimiter.
    fn as_string(&self) -> String {
        join_escaped(&self.components(), self.delimiter_character())
    }

    /// Human readable form using `delimiter`.
    ///
    /// Components are re-masked for `delimiter`, so the result still parses
    /// back into the same components. An empty `delimiter` concatenates the
    /// raw components without any separator.
    fn as_string_with(&self, delimiter: &str) -> Result<String, ContractViolation> {
        if delimiter.is_empty() {
            return Ok(self.components().iter().map(|c| unmask(c)).collect());
        }

        let delimiter = single_character(delimiter)?;
        check_argument(
            delimiter != ESCAPE_CHARACTER,
            "delimiter must differ from the escape character",
        )?;
        Ok(join_escaped(&self.components(), delimiter))
    }

    /// Canonical form, always masked for and joined by [`DEFAULT_DELIMITER`].
    fn as_data_string(&self) -> String {
        join_escaped(&self.components(), DEFAULT_DELIMITER)
    }

    /// Same count and identical masked components.
    ///
    /// Components masked for different delimiters are compared in their
    /// [`DEFAULT_DELIMITER`] masking.
    fn is_equal(&self, other: &dyn Name) -> bool {
        if self.no_components() != other.no_components() {
            return false;
        }
        let same_delimiter = self.delimiter_character() == other.delimiter_character();
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(ours, theirs)| {
                (same_delimiter && ours == theirs)
                    || remask(ours, DEFAULT_DELIMITER) == remask(theirs, DEFAULT_DELIMITER)
            })
    }

    /// Polynomial rolling hash over the UTF-16 units of the data string.
    fn hash_code(&self) -> i32 {
        self.as_data_string()
            .encode_utf16()
            .fold(0i32, |hash, unit| {
                hash.wrapping_mul(31).wrapping_add(i32::from(unit))
            })
    }

    /// Appends every component of `other`, re-masked for this delimiter.
    fn concat(&mut self, other: &dyn Name) -> Result<(), ContractViolation> {
        let expected = self.no_components() + other.no_components();
        let delimiter = self.delimiter_character();

        for component in other.components() {
            if other.delimiter_character() == delimiter {
                self.append(&component)?;
            } else {
                self.append(&remask(&component, delimiter))?;
            }
        }

        check_postcondition(
            self.no_components() == expected,
            "concat did not add exactly the other name's components",
        )?;
        self.check_invariants()
    }

    fn check_invariants(&self) -> Result<(), ContractViolation> {
        let delimiter = self.delimiter_character();
        check_invariant(
            delimiter != ESCAPE_CHARACTER,
            "delimiter must differ from the escape character",
        )?;

        let components = self.components();
        check_invariant(
            components.len() == self.no_components(),
            "component count is out of sync with the stored components",
        )?;
        for component in &components {
            if let Some(defect) = masking_defect(component, delimiter) {
                check_invariant(false, defect)?;
            }
        }
        Ok(())
    }
}

fn join_escaped(components: &[String], delimiter: char) -> String {
    components
        .iter()
        .map(|component| mask(&unmask(component), delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

impl Clone for Box<dyn Name> {
    fn clone(&self) -> Self {
        self.clone_name()
    }
}

impl PartialEq for dyn Name {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for dyn Name {}

impl fmt::Display for dyn Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
