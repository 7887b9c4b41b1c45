use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use purchase_desk::names::{first_last, normalize};
use purchase_desk::purchasing::{purchase_router, PurchaseDeskService, PurchaseGateway};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::infra::AppState;

pub(crate) fn with_desk_routes<G>(service: Arc<PurchaseDeskService<G>>) -> axum::Router
where
    G: PurchaseGateway + 'static,
{
    purchase_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/normalize",
            axum::routing::get(normalize_page).post(normalize_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct NormalizeRequest {
    pub(crate) name: String,
    /// Return "FIRST LAST" instead of the full canonical form.
    #[serde(default)]
    pub(crate) first_last_only: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NormalizeResponse {
    pub(crate) result: String,
}

/// GET keeps the original page behavior: nothing was submitted, so nothing
/// gets normalized.
pub(crate) async fn normalize_page() -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        result: "Not normalizing anything".to_string(),
    })
}

pub(crate) async fn normalize_endpoint(
    Json(request): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    let result = if request.first_last_only {
        first_last(&request.name)
    } else {
        normalize(&request.name)
    };
    info!("returning normalized name");
    Json(NormalizeResponse { result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryPurchaseGateway;
    use axum::body::Body;
    use axum::http::Request;
    use purchase_desk::config::MatchingConfig;
    use tower::ServiceExt;

    fn desk_routes() -> axum::Router {
        let gateway = Arc::new(InMemoryPurchaseGateway::default());
        let service = Arc::new(PurchaseDeskService::new(
            gateway,
            &MatchingConfig {
                partial_ratio_threshold: 60.0,
            },
        ));
        with_desk_routes(service)
    }

    #[tokio::test]
    async fn normalize_page_reports_idle_state() {
        let Json(body) = normalize_page().await;
        assert_eq!(body.result, "Not normalizing anything");
    }

    #[tokio::test]
    async fn normalize_endpoint_returns_canonical_form() {
        let Json(body) = normalize_endpoint(Json(NormalizeRequest {
            name: "john smith".to_string(),
            first_last_only: false,
        }))
        .await;
        assert_eq!(body.result, "SMITH, JOHN");
    }

    #[tokio::test]
    async fn normalize_endpoint_supports_first_last_projection() {
        let Json(body) = normalize_endpoint(Json(NormalizeRequest {
            name: "Dr. Jane Q. Public III".to_string(),
            first_last_only: true,
        }))
        .await;
        assert_eq!(body.result, "JANE PUBLIC");
    }

    #[tokio::test]
    async fn normalize_routes_are_mounted() {
        let response = desk_routes()
            .oneshot(
                Request::post("/normalize")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"O'Brien, Mary-Jane"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["result"], "OBRIEN, MARY-JANE");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
