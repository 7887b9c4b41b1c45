use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the vendor purchase ledger as shown on the browse page.
///
/// Audit and versioning columns of the backing table are not modeled; the
/// desk is a read-mostly display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub transaction_id: i64,
    pub modification_indicator: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub purchase_invoice_number: Option<String>,
    pub discount_amount: Option<f64>,
    pub freight_amount: Option<f64>,
    pub duty_amount: Option<f64>,
    pub order_date: Option<NaiveDate>,
    pub transaction_amount: f64,
    pub use_tax_flag: bool,
    pub use_tax_amount: Option<f64>,
    pub employee_id: Option<i64>,
    pub employee_name: String,
    pub document_number: Option<String>,
    pub comment: Option<String>,
}

/// One row of the grid-input form: an employee id (possibly unknown) and the
/// name it should attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub employee_id: Option<i64>,
    pub employee_name: String,
}

/// A resolved ledger-name -> employee-id pairing ready to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAssignment {
    /// Free-text name exactly as it appears in the ledger.
    pub employee_name: String,
    pub employee_id: i64,
    /// Roster name the ledger name was matched to.
    pub roster_name: String,
    /// Partial-ratio score of the match (100.0 when exact).
    pub score: f64,
    pub exact: bool,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub assignments: Vec<EmployeeAssignment>,
    /// Ledger names no roster entry claimed, plus roster names submitted
    /// without an employee id.
    pub unmatched: Vec<String>,
    /// Ledger rows updated by the gateway.
    pub updated_rows: usize,
}
