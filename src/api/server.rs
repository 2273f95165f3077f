//! API Server Module
//!
//! This module implements a JSON-RPC server for the host runtime's
//! verification hook. It provides an HTTP endpoint that accepts proposed
//! transactions, runs them through the contract rules, and answers with a
//! verification report.

use crate::{
    TransactionProposal, Verdict, VerificationReport,
    config::Config,
    validation::{CONTRACT_ID, Validator},
};
use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared application state that is accessible across all request handlers
///
/// Holds the one component every request needs: the validator. It is pure
/// and stateless, so a single instance serves all concurrent verifications.
#[derive(Clone)]
pub struct AppState {
    validator: Arc<Validator>,
}

/// The main API server struct
///
/// Encapsulates the server configuration and application state.
/// The server manages the HTTP endpoint for verifying transactions.
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Creates a new API server instance
    ///
    /// # Arguments
    /// * `config` - Server configuration (rules, host, port)
    ///
    /// # Returns
    /// A new `Server` instance with an initialized validator
    pub fn new(config: Config) -> Self {
        // Initialize the validator with the configured contract rules
        let validator = Arc::new(Validator::new(config.rules.clone()));

        let state = AppState { validator };

        Self { config, state }
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// This method:
    /// 1. Creates an Axum router with a single POST endpoint at "/"
    /// 2. Binds the router to the configured host and port
    /// 3. Starts serving requests asynchronously
    ///
    /// # Returns
    /// `Ok(())` if the server starts successfully, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        // Create the router with a single POST endpoint that handles JSON-RPC requests
        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(self.state);

        // Format the listening address from config
        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!(
            "Verification endpoint for {} (expected model: {}) listening on {}",
            CONTRACT_ID, self.config.rules.shipment_model, addr
        );

        // Bind to the TCP address and start serving
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// JSON-RPC 2.0 request structure
///
/// - `jsonrpc`: Protocol version (should be "2.0")
/// - `method`: The RPC method to call (e.g., "verifyTransaction")
/// - `params`: Method parameters (arbitrary JSON value)
/// - `id`: Request identifier for matching responses
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Value,
    id: Value,
}

/// JSON-RPC 2.0 response structure
///
/// Either `result` or `error` will be populated, but not both:
/// - `result`: Successful result (contains a VerificationReport)
/// - `error`: Error information if the request itself was malformed
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

/// JSON-RPC error object
///
/// - `code`: Error code (e.g., -32601 for method not found, -32602 for invalid params)
/// - `message`: Human-readable error description
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// Main RPC request handler
///
/// Called for every POST request to the "/" endpoint. Routes the request to
/// the appropriate handler based on the method name.
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    info!("Received RPC request: {}", request.method);

    match request.method.as_str() {
        "verifyTransaction" => handle_verify_transaction(state, request).await,
        // Return "Method not found" error for unsupported methods
        _ => Json(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code: -32601, // Standard JSON-RPC error code for method not found
                message: "Method not found".to_string(),
            }),
            id: request.id,
        }),
    }
}

/// Handles the "verifyTransaction" RPC method
///
/// This function:
/// 1. Deserializes the transaction proposal from the request parameters
/// 2. Runs the proposal through the contract rules
/// 3. Answers with a verification report: accepted, or rejected with the
///    reason for the first broken rule
///
/// A rejected proposal is still a successful JSON-RPC call; the report
/// carries the verdict. The host runtime decides what to do with it,
/// typically aborting the proposal and surfacing the reason to its
/// originator. Nothing is stored or forwarded here.
async fn handle_verify_transaction(
    state: AppState,
    request: JsonRpcRequest,
) -> Json<JsonRpcResponse> {
    // Step 1: Deserialize the proposal from the request parameters.
    // An unknown command tag fails here, which rejects the request
    // outright rather than passing an unrecognized intent to the rules.
    let proposal: TransactionProposal = match serde_json::from_value(request.params.clone()) {
        Ok(proposal) => proposal,
        Err(e) => {
            error!("Failed to deserialize transaction proposal: {}", e);
            return Json(JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(JsonRpcError {
                    code: -32602, // Standard JSON-RPC error code for invalid params
                    message: format!("Invalid params: {}", e),
                }),
                id: request.id,
            });
        }
    };

    // Compute the proposal digest for logging and the report
    let tx_hash = proposal.hash();
    info!("Verifying proposal {:?}", tx_hash);

    // Step 2: Run the contract rules over the proposal
    let verdict = match state.validator.validate(&proposal) {
        Ok(()) => {
            info!("Proposal {:?} accepted", tx_hash);
            Verdict::Accepted
        }
        Err(validation_error) => {
            warn!("Proposal {:?} rejected: {}", tx_hash, validation_error);
            Verdict::Rejected {
                reason: validation_error.to_string(),
            }
        }
    };

    // Step 3: Build the report the host runtime acts on
    let report = VerificationReport {
        tx_hash,
        verdict,
        timestamp: chrono::Utc::now().timestamp() as u64,
    };

    Json(JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        result: Some(serde_json::to_value(report).unwrap()),
        error: None,
        id: request.id,
    })
}
