use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::AuthTokens;

/// Shared handler state: the database plus the bearer-token registry the
/// identity extractor resolves callers against.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: AuthTokens,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::categories::handlers::list_categories,
        features::categories::handlers::get_category,
        features::categories::handlers::create_category,
        features::categories::handlers::delete_category,
        features::muscle_groups::handlers::list_muscle_groups,
        features::muscle_groups::handlers::get_muscle_group,
        features::muscle_groups::handlers::create_muscle_group,
        features::muscle_groups::handlers::delete_muscle_group,
        features::exercises::handlers::list_exercises,
        features::exercises::handlers::get_exercise,
        features::exercises::handlers::create_exercise,
        features::exercises::handlers::update_exercise,
        features::exercises::handlers::delete_exercise,
        features::workouts::handlers::list_workouts,
        features::workouts::handlers::get_workout,
        features::workouts::handlers::create_workout,
        features::workouts::handlers::update_workout,
        features::workouts::handlers::delete_workout,
        features::sessions::handlers::start_session,
        features::sessions::handlers::list_sessions,
        features::sessions::handlers::get_session,
        features::sessions::handlers::complete_session,
        features::sessions::handlers::add_tracked_exercise,
        features::sessions::handlers::create_set,
        features::sessions::handlers::update_set,
        features::sessions::handlers::remove_set,
    ),
    components(
        schemas(
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::muscle_group::CreateMuscleGroupRequest,
            storage::dto::muscle_group::MuscleGroupResponse,
            storage::dto::exercise::CreateExerciseRequest,
            storage::dto::exercise::UpdateExerciseRequest,
            storage::dto::exercise::ExerciseResponse,
            storage::dto::workout::WorkoutItemRequest,
            storage::dto::workout::CreateWorkoutRequest,
            storage::dto::workout::UpdateWorkoutRequest,
            storage::dto::workout::WorkoutResponse,
            storage::dto::workout::WorkoutItemDetail,
            storage::dto::workout::WorkoutDetailResponse,
            storage::dto::session::StartSessionRequest,
            storage::dto::session::InitialSetRequest,
            storage::dto::session::AddTrackedExerciseRequest,
            storage::dto::session::CreateSetRequest,
            storage::dto::session::UpdateSetRequest,
            storage::dto::session::SessionResponse,
            storage::dto::session::SessionDetailResponse,
            storage::dto::session::TrackedExerciseResponse,
            storage::dto::session::TrackedExerciseDetail,
            storage::dto::session::SetResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::common::PaginatedResponse<storage::dto::exercise::ExerciseResponse>,
            storage::dto::common::PaginatedResponse<storage::dto::session::SessionResponse>,
            storage::models::SessionStatus,
        )
    ),
    tags(
        (name = "catalog", description = "Exercise, category and muscle group endpoints"),
        (name = "workouts", description = "Workout template endpoints"),
        (name = "sessions", description = "Tracked workout session endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting workout tracking API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        db,
        tokens: AuthTokens::from_comma_separated(&config.auth_tokens),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = axum::Router::new()
        .nest("/api", features::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
