//! Precondition, postcondition and invariant checks shared by names and nodes.
//!
//! Every check is a plain fallible call returning [`ContractViolation`], so
//! callers chain them with `?` before touching any state.

mod assertions;
mod violation;

pub use assertions::{
    check_argument, check_index, check_insert_index, check_invariant, check_postcondition,
    check_state, single_character,
};
pub use violation::ContractViolation;
pub(crate) use violation::{InvalidStateSnafu, ServiceFailureSnafu};
