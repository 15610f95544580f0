//! API routes module

pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(items::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, cors::CorsConfig, server::ServerConfig, storage::StorageConfig};
    use domain_items::{ItemService, JsonFileItemStore};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state_for(path: std::path::PathBuf) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                storage: StorageConfig::new(&path),
                cors: CorsConfig::default(),
                environment: Environment::Development,
            },
            service: ItemService::new(JsonFileItemStore::new(path)),
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_when_storage_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "[]").unwrap();

        let (status, body) = get(routes(&state_for(path)), "/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["storage"], "connected");
    }

    #[tokio::test]
    async fn test_not_ready_without_storage() {
        let dir = TempDir::new().unwrap();
        let state = state_for(dir.path().join("missing.json"));

        let (status, body) = get(routes(&state), "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["storage"], "disconnected");
    }

    #[tokio::test]
    async fn test_items_routes_are_mounted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "[]").unwrap();
        let app = routes(&state_for(path));

        let (status, body) = get(app.clone(), "/items").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 0);

        let (status, body) = get(app, "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }
}
