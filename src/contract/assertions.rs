use snafu::ensure;

use super::violation::{
    ContractViolation, IllegalArgumentSnafu, IndexOutOfBoundsSnafu, InvalidStateSnafu,
    MethodFailedSnafu,
};

/// Precondition on a caller-supplied argument.
pub fn check_argument(condition: bool, message: &str) -> Result<(), ContractViolation> {
    ensure!(condition, IllegalArgumentSnafu { message });
    Ok(())
}

/// Element access: `index` must lie in `[0, len)`.
pub fn check_index(index: usize, len: usize) -> Result<(), ContractViolation> {
    ensure!(index < len, IndexOutOfBoundsSnafu { index, len });
    Ok(())
}

/// Insertion point: `index` must lie in `[0, len]`.
pub fn check_insert_index(index: usize, len: usize) -> Result<(), ContractViolation> {
    ensure!(index <= len, IndexOutOfBoundsSnafu { index, len });
    Ok(())
}

/// The receiver's life-cycle state must allow the operation.
pub fn check_state(condition: bool, message: &str) -> Result<(), ContractViolation> {
    ensure!(condition, InvalidStateSnafu { message });
    Ok(())
}

/// Class invariant, re-checked after every mutation.
pub fn check_invariant(condition: bool, message: &str) -> Result<(), ContractViolation> {
    ensure!(
        condition,
        InvalidStateSnafu {
            message: format!("class invariant violated: {message}"),
        }
    );
    Ok(())
}

pub fn check_postcondition(condition: bool, message: &str) -> Result<(), ContractViolation> {
    ensure!(condition, MethodFailedSnafu { message });
    Ok(())
}

/// Extracts the single character of a delimiter given as a string.
pub fn single_character(delimiter: &str) -> Result<char, ContractViolation> {
    let mut chars = delimiter.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) => Ok(character),
        _ => IllegalArgumentSnafu {
            message: format!("delimiter '{delimiter}' must be exactly one character"),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(0, 1, true)]
    #[case(2, 3, true)]
    #[case(3, 3, false)]
    #[case(0, 0, false)]
    fn check_index_accepts_half_open_range(
        #[case] index: usize,
        #[case] len: usize,
        #[case] accepted: bool,
    ) {
        assert_eq!(check_index(index, len).is_ok(), accepted);
    }

    #[rstest]
    #[case(0, 0, true)]
    #[case(3, 3, true)]
    #[case(4, 3, false)]
    fn check_insert_index_accepts_closed_range(
        #[case] index: usize,
        #[case] len: usize,
        #[case] accepted: bool,
    ) {
        assert_eq!(check_insert_index(index, len).is_ok(), accepted);
    }

    #[test]
    fn failed_checks_map_to_their_category() {
        assert!(check_argument(false, "bad").unwrap_err().is_argument_error());
        assert!(check_state(false, "closed").unwrap_err().is_state_error());
        assert!(check_invariant(false, "count").unwrap_err().is_state_error());
        assert!(matches!(
            check_postcondition(false, "size"),
            Err(ContractViolation::MethodFailed { .. })
        ));
        assert!(check_argument(true, "fine").is_ok());
    }

    #[rstest]
    #[case(".", Some('.'))]
    #[case("/", Some('/'))]
    #[case("ä", Some('ä'))]
    #[case("", None)]
    #[case("::", None)]
    fn single_character_rejects_other_lengths(
        #[case] delimiter: &str,
        #[case] expected: Option<char>,
    ) {
        assert_eq!(single_character(delimiter).ok(), expected);
    }
}
