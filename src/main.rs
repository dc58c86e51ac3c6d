use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};

mod auth;
mod config;
mod database;
mod error;
mod guard;
mod handlers;
mod mail;
mod middleware;
mod validate;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SMTP_HOST, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton and refuses
    // a missing signing secret outside development)
    let config = crate::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Studio API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("STUDIO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Studio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config::config().security.secure_cookies);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Session (web) surface
        .merge(session_auth_routes())
        .merge(web_routes())
        .merge(admin_routes())
        // Bearer-token (mobile) surface
        .merge(mobile_routes())
        // Global middleware
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn session_auth_routes() -> Router {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

fn web_routes() -> Router {
    use axum::routing::{delete, patch, post};
    use handlers::{courses, enrollments, group_schedules, groups, lessons, schedules, users};

    Router::new()
        // Courses
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/:id",
            get(courses::get)
                .patch(courses::update)
                .delete(courses::delete),
        )
        // Course-level schedules
        .route("/schedules", get(schedules::list).post(schedules::create))
        .route(
            "/schedules/:id",
            patch(schedules::update).delete(schedules::delete),
        )
        // Student groups and their schedules
        .route("/groups", get(groups::list).post(groups::create))
        .route(
            "/group-schedules",
            get(group_schedules::list).post(group_schedules::create),
        )
        .route(
            "/group-schedules/:id",
            patch(group_schedules::update).delete(group_schedules::delete),
        )
        .route(
            "/group-schedules/:id/duplicate",
            post(group_schedules::duplicate),
        )
        // Lessons (server-assigned position)
        .route("/lessons", get(lessons::list).post(lessons::create))
        // Enrollments
        .route(
            "/enrollments",
            get(enrollments::list).post(enrollments::create),
        )
        .route("/enrollments/:id", delete(enrollments::delete))
        // Legacy user lifecycle paths
        .route("/users/pending", get(users::pending))
        .route("/users/:id/approve", patch(users::approve))
        .route("/users/:id/reject", delete(users::reject))
}

fn admin_routes() -> Router {
    use axum::routing::patch;
    use handlers::admin::{stats, users};

    Router::new()
        .route("/admin/users", get(users::list).post(users::create))
        .route("/admin/users/:id/approve", patch(users::approve))
        .route("/admin/users/:id/status", patch(users::status))
        .route("/admin/stats", get(stats::get))
}

fn mobile_routes() -> Router {
    use axum::routing::post;
    use handlers::mobile::{auth, courses, stats};
    use middleware::auth::bearer_auth_middleware;

    // Token-protected routes; register and login stay public
    let protected = Router::new()
        .route("/mobile/auth/verify", get(auth::verify))
        .route("/mobile/courses", get(courses::list))
        .route("/mobile/stats", get(stats::get))
        .route_layer(axum::middleware::from_fn(bearer_auth_middleware));

    Router::new()
        .route("/mobile/auth/register", post(auth::register))
        .route("/mobile/auth/login", post(auth::login))
        .merge(protected)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Studio API",
        "version": version,
        "description": "Role-based learning-management API for a music school",
        "endpoints": {
            "auth": "/auth/login, /auth/logout (session)",
            "courses": "/courses[/:id]",
            "schedules": "/schedules[/:id]",
            "groups": "/groups, /group-schedules[/:id][/duplicate]",
            "lessons": "/lessons",
            "enrollments": "/enrollments[/:id]",
            "admin": "/admin/users[/:id/approve|/:id/status], /admin/stats",
            "mobile": "/mobile/auth/*, /mobile/courses, /mobile/stats (bearer token)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
