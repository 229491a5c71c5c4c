//! REST API endpoints using Actix-Web

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::api::responses::ApiResponse;
use crate::monitor::StatusMonitor;

use super::health::configure_health_routes;

/// Shared application state
#[derive(Clone)]
pub struct ApiState {
    pub monitor: Arc<StatusMonitor>,
}

impl ApiState {
    pub fn new(monitor: Arc<StatusMonitor>) -> Self {
        Self { monitor }
    }
}

/// Configure all REST API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Health endpoints at root
    configure_health_routes(cfg);

    // API v1 routes
    cfg.service(web::scope("/api/v1").route("/status", web::get().to(get_status)));
}

/// Latest status snapshot as JSON
async fn get_status(state: web::Data<ApiState>) -> HttpResponse {
    match state.monitor.latest() {
        Some(snapshot) => HttpResponse::Ok().json(ApiResponse::success(snapshot)),
        None => HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<()>::error("No status collected yet")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::config::Settings;
    use actix_web::{test, App};

    fn test_state(output_dir: std::path::PathBuf) -> ApiState {
        let mut settings = Settings::default();
        settings.monitor.output_dir = output_dir;
        settings.storage.mount_points = vec!["/".to_string()];
        ApiState::new(Arc::new(StatusMonitor::new(settings)))
    }

    #[actix_rt::test]
    async fn test_status_unavailable_before_first_collection() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new()))
                .app_data(web::Data::new(test_state(dir.path().to_path_buf())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/status").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
    }

    #[actix_rt::test]
    async fn test_status_after_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path().to_path_buf());
        state.monitor.refresh().await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new()))
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/status").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["system_health"]["status"], "OK");
        assert!(body["data"]["categories"].is_array());
    }
}
