//! REST API server for quarrychain
//!
//! Exposes the ledger over HTTP: chain export, balance queries, signed
//! transaction submission and mining control.

use axum::{
    extract::{Path, Request, State},
    http::{self, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::block::Block;
use crate::blockchain::Blockchain;

/// Shared server state: the single ledger instance behind its lock, plus the
/// process-wide shutdown flag that doubles as the mining cancel token.
pub struct Node {
    blockchain: Arc<RwLock<Blockchain>>,
    shutdown: Arc<AtomicBool>,
}

impl Node {
    /// Create a new node instance owning the given chain.
    pub fn new(blockchain: Blockchain) -> Self {
        Self {
            blockchain: Arc::new(RwLock::new(blockchain)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle used to stop an in-flight mining cycle and refuse new ones.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

// ============================================================================
// API Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    TransactionRejected,
    ShuttingDown,
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::TransactionRejected => (
                StatusCode::BAD_REQUEST,
                "Transaction rejected: signature verification failed".to_string(),
            ),
            ApiError::ShuttingDown => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Node is shutting down".to_string(),
            ),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A signed transfer as submitted over the wire. Key and signature are hex:
/// the compressed secp256k1 public key and the compact ECDSA signature over
/// the transaction's canonical bytes.
#[derive(Deserialize)]
pub struct TransactionRequest {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
    pub public_key: String,
    pub signature: String,
}

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: f64,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub height: usize,
    pub hash: String,
}

#[derive(Serialize)]
struct SuccessResponse {
    message: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Request logging middleware. Logs method, path, status and duration.
async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "api.request"
    );

    response
}

// ============================================================================
// API Server
// ============================================================================

/// Build the API router with all endpoints (for testing)
pub fn build_router(node: Arc<Node>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(vec![http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_headers(vec![http::header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(get_chain))
        .route("/balance/:address", get(get_balance))
        .route("/transactions", post(submit_transaction))
        .route("/mine", post(mine))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(node)
        .layer(cors)
}

/// Run the API server until ctrl-c. The shutdown flag is raised before the
/// listener closes, so an in-flight mining cycle aborts instead of pinning
/// the process open.
pub async fn run_api_server(node: Arc<Node>, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = node.shutdown_flag();
    let app = build_router(node);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "api server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            shutdown.store(true, Ordering::SeqCst);
            tracing::info!("shutdown requested, stopping in-flight mining");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn get_chain(State(node): State<Arc<Node>>) -> Json<ChainResponse> {
    let blockchain = node.blockchain.read();
    Json(ChainResponse {
        chain: blockchain.blocks().to_vec(),
        length: blockchain.blocks().len(),
    })
}

async fn get_balance(
    State(node): State<Arc<Node>>,
    Path(address): Path<String>,
) -> Json<BalanceResponse> {
    let balance = node.blockchain.read().balance_of(&address);
    Json(BalanceResponse { address, balance })
}

async fn submit_transaction(
    State(node): State<Arc<Node>>,
    Json(req): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let public_key = hex::decode(&req.public_key)
        .map_err(|e| ApiError::InvalidInput(format!("Invalid public key hex: {}", e)))?;
    let signature = hex::decode(&req.signature)
        .map_err(|e| ApiError::InvalidInput(format!("Invalid signature hex: {}", e)))?;

    let accepted = node.blockchain.write().submit_transaction(
        &req.sender,
        &req.recipient,
        req.value,
        &public_key,
        &signature,
    );

    if accepted {
        Ok((
            StatusCode::CREATED,
            Json(SuccessResponse {
                message: "Transaction accepted".to_string(),
            }),
        ))
    } else {
        Err(ApiError::TransactionRejected)
    }
}

/// Run one mining cycle. The nonce search is CPU-bound, so it runs on the
/// blocking pool while holding the write lock; the shutdown flag is the
/// cancel token.
async fn mine(State(node): State<Arc<Node>>) -> Result<Json<MineResponse>, ApiError> {
    if node.is_shutting_down() {
        return Err(ApiError::ShuttingDown);
    }

    let blockchain = node.blockchain.clone();
    let cancel = node.shutdown.clone();
    let mined = tokio::task::spawn_blocking(move || blockchain.write().mine_interruptible(&cancel))
        .await
        .map_err(|e| ApiError::InternalError(format!("Mining task failed: {}", e)))?;

    if !mined {
        return Err(ApiError::ShuttingDown);
    }

    let blockchain = node.blockchain.read();
    Ok(Json(MineResponse {
        message: "Block mined".to_string(),
        height: blockchain.blocks().len() - 1,
        hash: hex::encode(blockchain.last_block().hash()),
    }))
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
