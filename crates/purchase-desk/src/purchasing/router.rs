use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{PurchaseRecord, ReconciliationReport, RosterEntry};
use super::gateway::PurchaseGateway;
use super::service::{PurchaseDeskService, BROWSE_ROW_CAP};
use crate::error::AppError;

/// Router builder exposing the browse, connection-status, export, and
/// reconciliation endpoints.
pub fn purchase_router<G>(service: Arc<PurchaseDeskService<G>>) -> Router
where
    G: PurchaseGateway + 'static,
{
    Router::new()
        .route("/", get(index_handler).post(browse_handler::<G>))
        .route("/connect", get(connect_handler::<G>))
        .route("/purchases/export", get(export_handler::<G>))
        .route("/purchases/reconcile", post(reconcile_handler::<G>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrowseRequest {
    pub(crate) limit: Option<usize>,
}

/// Browse-page payload: `executed` is false until the form is submitted.
#[derive(Debug, Serialize)]
pub(crate) struct BrowsePage {
    pub(crate) executed: bool,
    pub(crate) row_cap: usize,
    pub(crate) rows: Vec<PurchaseRecord>,
}

pub(crate) async fn index_handler() -> Json<BrowsePage> {
    Json(BrowsePage {
        executed: false,
        row_cap: BROWSE_ROW_CAP,
        rows: Vec::new(),
    })
}

pub(crate) async fn browse_handler<G>(
    State(service): State<Arc<PurchaseDeskService<G>>>,
    body: Option<Json<BrowseRequest>>,
) -> Result<Json<BrowsePage>, AppError>
where
    G: PurchaseGateway + 'static,
{
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let rows = service.browse(request.limit)?;

    Ok(Json(BrowsePage {
        executed: true,
        row_cap: BROWSE_ROW_CAP,
        rows,
    }))
}

pub(crate) async fn connect_handler<G>(
    State(service): State<Arc<PurchaseDeskService<G>>>,
) -> Json<serde_json::Value>
where
    G: PurchaseGateway + 'static,
{
    let status = service.connection_status();
    Json(json!({
        "status": if status.is_connected() { "connected" } else { "unreachable" },
        "message": status.display_message(),
    }))
}

pub(crate) async fn export_handler<G>(
    State(service): State<Arc<PurchaseDeskService<G>>>,
) -> Result<impl IntoResponse, AppError>
where
    G: PurchaseGateway + 'static,
{
    let csv = service.export_csv(None)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"results.csv\"",
            ),
        ],
        csv,
    ))
}

pub(crate) async fn reconcile_handler<G>(
    State(service): State<Arc<PurchaseDeskService<G>>>,
    Json(roster): Json<Vec<RosterEntry>>,
) -> Result<Json<ReconciliationReport>, AppError>
where
    G: PurchaseGateway + 'static,
{
    let report = service.reconcile(&roster)?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchingConfig;
    use crate::purchasing::domain::EmployeeAssignment;
    use crate::purchasing::gateway::{ConnectionStatus, GatewayError};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct StaticGateway {
        reachable: bool,
        rows: Vec<PurchaseRecord>,
    }

    impl PurchaseGateway for StaticGateway {
        fn probe(&self) -> ConnectionStatus {
            if self.reachable {
                ConnectionStatus::Connected
            } else {
                ConnectionStatus::Unreachable {
                    reason: "no route to host".to_string(),
                }
            }
        }

        fn top_purchases(&self, limit: usize) -> Result<Vec<PurchaseRecord>, GatewayError> {
            if !self.reachable {
                return Err(GatewayError::Unreachable("no route to host".to_string()));
            }
            Ok(self.rows.iter().take(limit).cloned().collect())
        }

        fn employee_names(&self) -> Result<Vec<String>, GatewayError> {
            Ok(self
                .rows
                .iter()
                .map(|row| row.employee_name.clone())
                .collect())
        }

        fn assign_employee_ids(
            &self,
            assignments: &[EmployeeAssignment],
        ) -> Result<usize, GatewayError> {
            Ok(assignments.len())
        }
    }

    fn sample_row(transaction_id: i64, employee_name: &str) -> PurchaseRecord {
        PurchaseRecord {
            transaction_id,
            modification_indicator: None,
            transaction_date: None,
            purchase_invoice_number: Some(format!("INV-{transaction_id:04}")),
            discount_amount: None,
            freight_amount: None,
            duty_amount: None,
            order_date: None,
            transaction_amount: 125.50,
            use_tax_flag: false,
            use_tax_amount: None,
            employee_id: None,
            employee_name: employee_name.to_string(),
            document_number: None,
            comment: None,
        }
    }

    fn router(reachable: bool) -> Router {
        let gateway = Arc::new(StaticGateway {
            reachable,
            rows: vec![sample_row(1, "John Smith"), sample_row(2, "Mary Jones")],
        });
        let service = Arc::new(PurchaseDeskService::new(
            gateway,
            &MatchingConfig {
                partial_ratio_threshold: 60.0,
            },
        ));
        purchase_router(service)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn index_renders_an_unexecuted_page() {
        let response = router(true)
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_json(response).await;
        assert_eq!(page["executed"], false);
        assert_eq!(page["row_cap"], 100);
        assert_eq!(page["rows"].as_array().expect("rows array").len(), 0);
    }

    #[tokio::test]
    async fn posting_the_form_runs_the_query() {
        let response = router(true)
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_json(response).await;
        assert_eq!(page["executed"], true);
        assert_eq!(page["rows"].as_array().expect("rows array").len(), 2);
    }

    #[tokio::test]
    async fn browse_reports_unreachable_database_as_503() {
        let response = router(false)
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn connect_reports_both_states() {
        let response = router(true)
            .oneshot(Request::get("/connect").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let page = body_json(response).await;
        assert_eq!(page["status"], "connected");
        assert_eq!(page["message"], "You are connected!");

        let response = router(false)
            .oneshot(Request::get("/connect").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let page = body_json(response).await;
        assert_eq!(page["status"], "unreachable");
        assert_eq!(
            page["message"],
            "You aren't connected to the database. Try enabling your VPN and then refreshing your browser."
        );
    }

    #[tokio::test]
    async fn export_serves_a_csv_attachment() {
        let response = router(true)
            .oneshot(
                Request::get("/purchases/export")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .expect("disposition header"),
            "attachment; filename=\"results.csv\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let text = String::from_utf8(bytes.to_vec()).expect("utf-8 csv");
        assert!(text.starts_with("transaction_id,"));
        assert!(text.contains("John Smith"));
    }

    #[tokio::test]
    async fn reconcile_round_trips_a_roster() {
        let roster = serde_json::to_string(&vec![RosterEntry {
            employee_id: Some(42),
            employee_name: "Smith, John".to_string(),
        }])
        .expect("roster serializes");

        let response = router(true)
            .oneshot(
                Request::post("/purchases/reconcile")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(roster))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(
            report["assignments"].as_array().expect("assignments").len(),
            1
        );
        assert_eq!(report["assignments"][0]["employee_id"], 42);
        assert_eq!(report["unmatched"].as_array().expect("unmatched").len(), 1);
    }
}
