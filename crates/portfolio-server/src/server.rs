/// HTTP API for the portfolio frontend.
///
/// Exposes the query engine over JSON:
/// - `GET /api/projects`: all records in load order
/// - `GET /api/projects/search?q=term`: case-insensitive search
/// - `GET /api/projects/category/{category}`: jogos / plugins partition
/// - `GET /api/genres`: unique genre tags
/// - `GET /api/spotlight`: one random record
/// - `GET /health`: status and version
///
/// Error responses follow `{"error": {"code", "message"}}`. CORS is fully
/// permissive so the static site can call the API from any origin. Blank
/// search terms are rejected at this boundary; the engine itself treats the
/// empty string as matching everything.
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use portfolio_core::catalog::CatalogStore;
use portfolio_core::model::{Category, Project};
use portfolio_core::query::QueryEngine;
use portfolio_core::spotlight::Spotlight;

use crate::config::Config;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<QueryEngine>,
    spotlight: Arc<Spotlight>,
}

impl AppState {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            engine: Arc::new(QueryEngine::new(Arc::clone(&store))),
            spotlight: Arc::new(Spotlight::new(store)),
        }
    }
}

/// Build the router: API routes, CORS, and optional static assets at `/`.
pub fn build_router(state: AppState, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/search", get(search_projects))
        .route("/api/projects/category/{category}", get(list_category))
        .route("/api/genres", get(list_genres))
        .route("/api/spotlight", get(spotlight))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Construct the store and serve until the process is terminated.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(CatalogStore::new(&config.data_path));
    let state = AppState::new(store);
    let app = build_router(state, config.static_dir.as_deref());

    info!(addr = %config.bind_addr, "portfolio server listening");
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// --- Responses ---

#[derive(Debug, Serialize)]
struct ProjectListResponse {
    projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
struct GenreListResponse {
    genres: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SpotlightResponse {
    project: Option<Project>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

// --- Error contract ---

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

// --- Handlers ---

async fn list_projects(State(state): State<AppState>) -> Json<ProjectListResponse> {
    let projects = state.engine.all_projects().await;
    Json(ProjectListResponse { projects })
}

async fn search_projects(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let term = params.q.as_deref().unwrap_or("").trim().to_string();
    if term.is_empty() {
        return Err(bad_request("q must not be empty"));
    }

    let projects = state.engine.search(&term).await;
    Ok(Json(ProjectListResponse { projects }))
}

async fn list_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ProjectListResponse> {
    // unrecognized categories answer with an empty list, not an error
    let projects = match Category::parse(&category) {
        Some(category) => state.engine.by_category(category).await,
        None => Vec::new(),
    };
    Json(ProjectListResponse { projects })
}

async fn list_genres(State(state): State<AppState>) -> Json<GenreListResponse> {
    let genres = state.engine.all_genres().await;
    Json(GenreListResponse { genres })
}

async fn spotlight(State(state): State<AppState>) -> Json<SpotlightResponse> {
    let project = state.spotlight.pick().await;
    Json(SpotlightResponse { project })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"[
        {"title": "Nebula", "description": "A space shooter", "genre": ["Action", "Plugin"], "page": "nebula.html"},
        {"title": "Quiet Woods", "description": "A walking sim", "genre": ["Exploration"], "page": "woods.html"}
    ]"#;

    fn state_over(data: &str) -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(data.as_bytes()).expect("write");
        let store = Arc::new(CatalogStore::new(file.path()));
        (AppState::new(store), file)
    }

    fn titles(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn projects_route_serves_full_catalog() {
        let (state, _file) = state_over(SAMPLE);
        let Json(response) = list_projects(State(state)).await;
        assert_eq!(titles(&response.projects), ["Nebula", "Quiet Woods"]);
    }

    #[tokio::test]
    async fn search_route_filters_by_term() {
        let (state, _file) = state_over(SAMPLE);
        let Json(response) = search_projects(
            State(state),
            Query(SearchParams {
                q: Some("space".to_string()),
            }),
        )
        .await
        .expect("valid query");
        assert_eq!(titles(&response.projects), ["Nebula"]);
    }

    #[tokio::test]
    async fn search_route_rejects_blank_terms() {
        let (state, _file) = state_over(SAMPLE);
        for q in [None, Some(String::new()), Some("   ".to_string())] {
            let result =
                search_projects(State(state.clone()), Query(SearchParams { q })).await;
            let err = result.err().expect("blank term should be rejected");
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.code, "bad_request");
        }
    }

    #[tokio::test]
    async fn category_route_partitions_catalog() {
        let (state, _file) = state_over(SAMPLE);

        let Json(plugins) =
            list_category(State(state.clone()), Path("plugins".to_string())).await;
        assert_eq!(titles(&plugins.projects), ["Nebula"]);

        let Json(games) = list_category(State(state), Path("jogos".to_string())).await;
        assert_eq!(titles(&games.projects), ["Quiet Woods"]);
    }

    #[tokio::test]
    async fn unknown_category_is_empty_not_an_error() {
        let (state, _file) = state_over(SAMPLE);
        let Json(response) = list_category(State(state), Path("tools".to_string())).await;
        assert!(response.projects.is_empty());
    }

    #[tokio::test]
    async fn genres_route_serves_the_genre_set() {
        let (state, _file) = state_over(SAMPLE);
        let Json(response) = list_genres(State(state)).await;
        assert_eq!(response.genres, ["Action", "Plugin", "Exploration"]);
    }

    #[tokio::test]
    async fn spotlight_route_serves_a_catalog_member() {
        let (state, _file) = state_over(SAMPLE);
        let Json(response) = spotlight(State(state)).await;
        let project = response.project.expect("non-empty catalog");
        assert!(["Nebula", "Quiet Woods"].contains(&project.title.as_str()));
    }

    #[test]
    fn error_body_follows_the_contract() {
        let response = bad_request("q must not be empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = serde_json::to_value(ErrorBody {
            error: ErrorDetail {
                code: "bad_request".to_string(),
                message: "q must not be empty".to_string(),
            },
        })
        .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({"error": {"code": "bad_request", "message": "q must not be empty"}})
        );
    }

    #[tokio::test]
    async fn missing_data_file_serves_empty_responses() {
        let store = Arc::new(CatalogStore::new("/nonexistent/projects.json"));
        let state = AppState::new(store);

        let Json(projects) = list_projects(State(state.clone())).await;
        assert!(projects.projects.is_empty());

        let Json(genres) = list_genres(State(state.clone())).await;
        assert!(genres.genres.is_empty());

        let Json(picked) = spotlight(State(state)).await;
        assert!(picked.project.is_none());
    }
}
