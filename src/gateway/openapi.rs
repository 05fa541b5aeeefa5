//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::PublicUser;
use crate::gateway::handlers::{self, HealthResponse};
use crate::gateway::types::{
    AdminCreateUserRequest, AdminMealRequest, AdminUpdateUserRequest, MealRequest,
    MealsOverview, ProfileRequest, ResetPasswordRequest, UserDataResponse,
};
use crate::meals::{AdminMealView, DailyConsumption, Meal};
use crate::user_auth::{AuthResponse, LoginRequest, SignupRequest};

/// Bearer JWT issued by `/auth/signup` and `/auth/login`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Authorization: Bearer {token}"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calorie Tracker API",
        version = "1.0.0",
        description = "Meal logging with per-day calorie targets, user self-service and admin management.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        handlers::health::health_check,
        crate::user_auth::handlers::signup,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::user_data,
        handlers::meals::list_meals,
        handlers::meals::add_meal,
        handlers::meals::get_meal,
        handlers::meals::update_meal,
        handlers::meals::delete_meal,
        handlers::profile::update_profile,
        handlers::profile::reset_password,
        handlers::admin::list_all_meals,
        handlers::admin::create_meal,
        handlers::admin::get_meal,
        handlers::admin::update_meal,
        handlers::admin::delete_meal,
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::get_user,
        handlers::admin::update_user,
        handlers::admin::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            SignupRequest,
            LoginRequest,
            AuthResponse,
            UserDataResponse,
            PublicUser,
            Meal,
            AdminMealView,
            DailyConsumption,
            MealsOverview,
            MealRequest,
            AdminMealRequest,
            ProfileRequest,
            ResetPasswordRequest,
            AdminCreateUserRequest,
            AdminUpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup, login and the current user"),
        (name = "Meals", description = "The caller's own meal log (auth required)"),
        (name = "Profile", description = "The caller's own account settings (auth required)"),
        (name = "Admin", description = "User and meal management (admin only)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
