//! This crate implements the contract rules for a vehicle asset ledger.
//! It validates proposed transactions (shape, content, and signer rules for
//! the Shipment command) on behalf of a host ledger runtime, and exposes the
//! check as a JSON-RPC verification endpoint.

pub mod types; // Defines the ledger data model shared throughout the system.
pub mod api; // Handles the host-facing verification endpoint.
pub mod validation; // Contains the contract rule checks for transaction proposals.
pub mod config; // Defines and loads system configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use validation::{CONTRACT_ID, Validator};
