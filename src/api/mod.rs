//! API Module
//!
//! This module handles the JSON-RPC API for the verification hook.
//! It provides the HTTP endpoint host runtimes use to submit proposed
//! transactions for verification.

mod server;
pub use server::Server;
