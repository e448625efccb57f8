//! Router assembly: route tiers, global layers and the service-level endpoints.

pub mod format;
pub mod state;

use std::any::Any;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{ProblemDetails, INTERNAL_ERROR_DETAIL};
use crate::handlers::{protected::tasks, public::auth};
use crate::middleware::jwt_auth_middleware;
use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(task_routes(state.clone()))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::user_register))
        .route("/api/auth/login", post(auth::session_login))
}

fn task_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(tasks::task_list).post(tasks::task_create))
        .route(
            "/api/tasks/:id",
            get(tasks::task_show)
                .put(tasks::task_update)
                .delete(tasks::task_delete),
        )
        .route("/api/tasks/:id/complete", patch(tasks::task_complete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(cors::Any).allow_headers(cors::Any);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(cors::Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Last line of defence: a panicking handler still yields a problem body.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("An unhandled panic occurred: {}", detail);

    ProblemDetails::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred",
        INTERNAL_ERROR_DETAIL,
    )
    .into_response()
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Task Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Multi-user task tracking with JWT authentication",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/auth/register, /api/auth/login (public - token acquisition)",
            "tasks": "/api/tasks[/:id][/complete] (protected - bearer token)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
                .into_response()
        }
    }
}
