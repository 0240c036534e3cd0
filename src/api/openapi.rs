//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, categories, equipment, equipment_logs, health, locations, users};

/// Registers the bearer token scheme referenced by the secured paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Equipment Tracker API",
        version = "1.0.0",
        description = "Equipment inventory and checkout tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::delete_user,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Equipment
        equipment::list_equipment,
        equipment::list_equipment_summary,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Checkout logs
        equipment_logs::list_logs,
        equipment_logs::get_log,
        equipment_logs::create_log,
        equipment_logs::update_log,
        equipment_logs::delete_log,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Locations
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentSummary,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Checkout logs
            crate::models::equipment_log::EquipmentLog,
            crate::models::equipment_log::CreateEquipmentLog,
            crate::models::equipment_log::UpdateEquipmentLog,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User accounts"),
        (name = "categories", description = "Equipment categories"),
        (name = "locations", description = "Storage locations"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "equipment-logs", description = "Checkout and check-in records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
