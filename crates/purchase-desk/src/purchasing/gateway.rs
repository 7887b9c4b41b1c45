use super::domain::{EmployeeAssignment, PurchaseRecord};

/// Database reachability expressed as a value, not an exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Unreachable { reason: String },
}

impl ConnectionStatus {
    /// Human-readable status line shown on the connection page.
    pub fn display_message(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "You are connected!",
            ConnectionStatus::Unreachable { .. } => {
                "You aren't connected to the database. Try enabling your VPN \
                 and then refreshing your browser."
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

/// Storage seam so the desk service can be exercised without a live database.
///
/// Implementations open a fresh connection per operation: the desk serves one
/// request at a time and carries no pool, retry, or pagination machinery.
pub trait PurchaseGateway: Send + Sync {
    /// Cheap reachability check for the connection page.
    fn probe(&self) -> ConnectionStatus;

    /// The first `limit` ledger rows in transaction order.
    fn top_purchases(&self, limit: usize) -> Result<Vec<PurchaseRecord>, GatewayError>;

    /// Distinct free-text employee names present in the ledger.
    fn employee_names(&self) -> Result<Vec<String>, GatewayError>;

    /// Apply name -> employee-id assignments, returning the number of ledger
    /// rows updated.
    fn assign_employee_ids(&self, assignments: &[EmployeeAssignment])
        -> Result<usize, GatewayError>;
}

/// Error enumeration for gateway failures.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("database unreachable: {0}")]
    Unreachable(String),
    #[error("query failed: {0}")]
    Query(String),
}
