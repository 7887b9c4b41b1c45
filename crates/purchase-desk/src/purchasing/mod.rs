//! Purchase ledger browsing, CSV export, and employee reconciliation.

pub mod domain;
pub mod gateway;
pub mod router;
pub mod service;

pub use domain::{EmployeeAssignment, PurchaseRecord, ReconciliationReport, RosterEntry};
pub use gateway::{ConnectionStatus, GatewayError, PurchaseGateway};
pub use router::purchase_router;
pub use service::{ExportError, PurchaseDeskService, BROWSE_ROW_CAP};
