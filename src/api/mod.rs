//! HTTP routes serving the manifest and the service-worker script.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::embed::{MANIFEST_PATH, SERVICE_WORKER_PATH};
use crate::manifest::build_manifest;
use crate::policy::CachePolicy;
use crate::settings::SettingsReader;

/// Default standalone server port.
pub const DEFAULT_PORT: u16 = 8790;

#[derive(Clone)]
struct AppState {
    settings: Arc<dyn SettingsReader>,
    sw_script: Arc<String>,
}

async fn manifest_json(State(state): State<AppState>) -> Response {
    match state.settings.read().await {
        Ok(settings) => axum::Json(build_manifest(&settings)).into_response(),
        Err(e) => {
            log::error!("Error generating manifest: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({"error": "Failed to generate manifest"})),
            )
                .into_response()
        }
    }
}

async fn service_worker(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        state.sw_script.as_ref().clone(),
    )
}

/// Builds the PWA router for mounting into a host application.
///
/// The service-worker script is compiled from the policy once here, so
/// every request to it serves identical bytes. The manifest is recomputed
/// from live settings on every request.
#[must_use]
pub fn router(settings: Arc<dyn SettingsReader>, policy: &CachePolicy) -> Router {
    let state = AppState {
        settings,
        sw_script: Arc::new(policy.to_script()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(MANIFEST_PATH, get(manifest_json))
        .route(SERVICE_WORKER_PATH, get(service_worker))
        .layer(cors)
        .with_state(state)
}

/// Binds and serves the router until the process exits.
///
/// # Errors
///
/// Returns an error if the bind address is invalid or the listener cannot
/// be bound.
pub async fn run_server(host: &str, port: u16, app: Router) -> crate::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Serving PWA routes on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ProjectSettings, StaticSettings};
    use crate::{Error, Result};
    use async_trait::async_trait;

    struct FailingReader;

    #[async_trait]
    impl SettingsReader for FailingReader {
        async fn read(&self) -> Result<ProjectSettings> {
            Err(Error::Settings("store offline".to_string()))
        }
    }

    fn state_with(reader: Arc<dyn SettingsReader>) -> AppState {
        AppState {
            settings: reader,
            sw_script: Arc::new(CachePolicy::default().to_script()),
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn manifest_route_serves_json() {
        let reader = StaticSettings(ProjectSettings {
            project_name: Some("Intranet".to_string()),
            ..ProjectSettings::default()
        });
        let response = manifest_json(State(state_with(Arc::new(reader)))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["name"], "Intranet");
        assert_eq!(body["start_url"], "/admin/");
        assert_eq!(body["icons"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn manifest_route_reports_settings_failure() {
        let response = manifest_json(State(state_with(Arc::new(FailingReader)))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "Failed to generate manifest");
    }

    #[tokio::test]
    async fn service_worker_route_serves_script() {
        let state = state_with(Arc::new(StaticSettings::default()));
        let response = service_worker(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript"
        );
        let body = body_string(response).await;
        assert!(body.contains("self.addEventListener('fetch'"));
    }

    #[tokio::test]
    async fn service_worker_bytes_are_stable_across_requests() {
        let state = state_with(Arc::new(StaticSettings::default()));
        let first = body_string(service_worker(State(state.clone())).await.into_response()).await;
        let second = body_string(service_worker(State(state)).await.into_response()).await;
        assert_eq!(first, second);
    }
}
