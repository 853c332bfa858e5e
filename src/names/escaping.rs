//! Masking rules shared by every [`Name`](super::Name) representation.
//!
//! A component is stored *masked*: every literal delimiter or escape character
//! of its raw value is preceded by [`ESCAPE_CHARACTER`], and nothing else is.
//! Each raw value therefore has exactly one masked form per delimiter.

use crate::contract::{ContractViolation, check_argument};

pub const ESCAPE_CHARACTER: char = '\\';
pub const DEFAULT_DELIMITER: char = '.';

/// Turns a raw value into a component masked for `delimiter`.
pub fn mask(raw: &str, delimiter: char) -> String {
    let mut masked = String::with_capacity(raw.len());
    for character in raw.chars() {
        if character == ESCAPE_CHARACTER || character == delimiter {
            masked.push(ESCAPE_CHARACTER);
        }
        masked.push(character);
    }
    masked
}

/// Removes one level of masking. A trailing lone escape character is kept as is.
pub fn unmask(masked: &str) -> String {
    let mut raw = String::with_capacity(masked.len());
    let mut chars = masked.chars();
    while let Some(character) = chars.next() {
        if character == ESCAPE_CHARACTER {
            match chars.next() {
                Some(escaped) => raw.push(escaped),
                None => raw.push(character),
            }
        } else {
            raw.push(character);
        }
    }
    raw
}

/// Re-expresses a masked component as one masked for `to`.
pub fn remask(masked: &str, to: char) -> String {
    mask(&unmask(masked), to)
}

/// Describes why `component` is not a well-masked component for `delimiter`.
pub(crate) fn masking_defect(component: &str, delimiter: char) -> Option<&'static str> {
    let mut chars = component.chars();
    while let Some(character) = chars.next() {
        if character == ESCAPE_CHARACTER {
            match chars.next() {
                None => return Some("component contains a dangling escape character"),
                Some(escaped) if escaped != ESCAPE_CHARACTER && escaped != delimiter => {
                    return Some("component escapes a character that needs no masking");
                }
                Some(_) => {}
            }
        } else if character == delimiter {
            return Some("component contains an unmasked delimiter");
        }
    }
    None
}

/// Rejects components that would break the masking invariant.
pub fn check_masking(component: &str, delimiter: char) -> Result<(), ContractViolation> {
    match masking_defect(component, delimiter) {
        Some(defect) => check_argument(false, defect),
        None => Ok(()),
    }
}

/// Rejects masked strings ending in an unpaired escape character.
pub fn check_no_dangling_escape(source: &str) -> Result<(), ContractViolation> {
    let mut chars = source.chars();
    while let Some(character) = chars.next() {
        if character == ESCAPE_CHARACTER && chars.next().is_none() {
            return check_argument(false, "string contains a dangling escape character");
        }
    }
    Ok(())
}

/// Splits a masked string at every unescaped `delimiter`.
///
/// Escape sequences stay in the resulting components. The empty string has
/// no components.
pub fn split(source: &str, delimiter: char) -> Vec<String> {
    if source.is_empty() {
        return Vec::new();
    }

    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = source.chars();
    while let Some(character) = chars.next() {
        if character == ESCAPE_CHARACTER {
            current.push(character);
            if let Some(escaped) = chars.next() {
                current.push(escaped);
            }
        } else if character == delimiter {
            components.push(std::mem::take(&mut current));
        } else {
            current.push(character);
        }
    }
    components.push(current);
    components
}
