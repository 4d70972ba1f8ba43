//! Moneta Web Server
//!
//! Axum-based REST API for the Moneta personal finance backend.
//!
//! Security features:
//! - API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input validation (pagination limits, file size limits)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use moneta_core::ai::{AIBackend, AIClient};
use moneta_core::db::Database;

mod handlers;

/// Maximum file upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

impl ServerConfig {
    /// Read API keys from the `MONETA_API_KEYS` environment variable
    /// (comma-separated)
    pub fn from_env() -> Self {
        let api_keys = std::env::var("MONETA_API_KEYS")
            .map(|keys| {
                keys.split(',')
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            api_keys,
            ..Self::default()
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub ai: Option<AIClient>,
}

/// Authentication middleware - validates API keys
///
/// Keys are compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time
/// comparison to prevent timing attacks.
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    for key in valid_keys {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        if provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes)) {
            return true;
        }
    }
    false
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let ai = AIClient::from_env();
    if let Some(ref client) = ai {
        info!(
            "AI backend configured: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        info!("AI backend not configured (set OLLAMA_HOST to enable categorization)");
    }

    create_router_with_ai(db, config, ai)
}

/// Create the application router with an explicit AI client (for testing)
pub fn create_router_with_ai(db: Database, config: ServerConfig, ai: Option<AIClient>) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        ai,
    });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Users
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/users/:id/accounts", get(handlers::list_user_accounts))
        // Accounts
        .route(
            "/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/accounts/:id",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account),
        )
        .route(
            "/accounts/:id/statements",
            get(handlers::list_account_statements),
        )
        // Statements
        .route("/statements", get(handlers::list_statements))
        .route("/statements/import", post(handlers::import_statement))
        .route("/statements/:id", get(handlers::get_statement))
        .route(
            "/statements/:id/transactions",
            get(handlers::list_statement_transactions),
        )
        // Transactions
        .route("/transactions", get(handlers::list_transactions))
        .route("/transactions/:id", get(handlers::get_transaction))
        .route(
            "/transactions/:id/category",
            put(handlers::update_transaction_category),
        )
        // Reference data
        .route("/currencies", get(handlers::list_currencies));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("Authentication disabled - do not expose to network!");
    }

    check_ai_connection().await;

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection() {
    match AIClient::from_env() {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "AI backend configured but not responding: {} (model: {})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {
            info!("AI backend not configured (set OLLAMA_HOST to enable categorization)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<moneta_core::Error> for AppError {
    fn from(err: moneta_core::Error) -> Self {
        use moneta_core::Error;
        match err {
            Error::UnsupportedFormat(_) | Error::MalformedFile(_) | Error::UnsupportedBank(_) => {
                Self {
                    status: StatusCode::BAD_REQUEST,
                    message: err.to_string(),
                    internal: None,
                }
            }
            Error::Validation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
                internal: None,
            },
            Error::AccountNotFound(_) | Error::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
                internal: None,
            },
            Error::Conflict(_) => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
                internal: None,
            },
            // Infrastructure failures get a sanitized message
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}
