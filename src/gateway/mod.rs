pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;


use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::user_auth::{self, require_admin, require_user};
use state::AppState;

/// Assemble the full HTTP surface.
///
/// Auth layers are attached with `route_layer` so unknown paths fall
/// through to the 404 fallback instead of answering 401.
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Public Routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/signup", post(user_auth::handlers::signup))
        .route("/auth/login", post(user_auth::handlers::login));

    // ==========================================================================
    // User Routes - caller must hold a valid token for an active account
    // ==========================================================================
    let user_routes = Router::new()
        .route("/auth/user/data", get(user_auth::handlers::user_data))
        .route("/meals", get(handlers::meals::list_meals))
        .route("/meals/add", post(handlers::meals::add_meal))
        .route(
            "/meals/{id}",
            get(handlers::meals::get_meal).post(handlers::meals::update_meal),
        )
        .route("/meals/delete/{id}", post(handlers::meals::delete_meal))
        .route("/profile", post(handlers::profile::update_profile))
        .route(
            "/profile/resetpassword",
            post(handlers::profile::reset_password),
        )
        .route_layer(from_fn_with_state(state.clone(), require_user));

    // ==========================================================================
    // Admin Routes
    // ==========================================================================
    let admin_routes = Router::new()
        .route(
            "/admin/meals",
            get(handlers::admin::list_all_meals).post(handlers::admin::create_meal),
        )
        .route(
            "/admin/meals/{id}",
            get(handlers::admin::get_meal).post(handlers::admin::update_meal),
        )
        .route(
            "/admin/meals/delete/{id}",
            post(handlers::admin::delete_meal),
        )
        .route(
            "/admin/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route(
            "/admin/users/{id}",
            get(handlers::admin::get_user).post(handlers::admin::update_user),
        )
        .route(
            "/admin/users/delete/{id}",
            post(handlers::admin::delete_user),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .fallback(handlers::not_found)
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the listener fails.
pub async fn run_server(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let app = build_router(Arc::new(state));

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "failed to bind {}: {} (port {} may already be in use)",
            addr,
            e,
            port
        )
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
