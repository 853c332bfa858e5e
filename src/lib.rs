//! Escape-aware delimited names and an in-memory node tree built on them.
//!
//! [`names`] provides the [`Name`](names::Name) contract with an array-backed
//! and a string-backed implementation. [`tree`] builds directories, files and
//! links whose full names are computed as names. Both report contract
//! violations through [`contract::ContractViolation`].

pub mod contract;
pub mod names;
pub mod tree;
