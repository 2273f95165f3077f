//! Transaction Validation Module
//!
//! This module validates transaction proposals against the contract rules
//! before the host runtime commits them. Performs command, shape, content,
//! and signer checks.

mod validator;

#[cfg(test)]
mod tests;

pub use validator::{CONTRACT_ID, Validator};
