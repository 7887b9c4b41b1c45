use std::sync::Arc;

use super::domain::{EmployeeAssignment, PurchaseRecord, ReconciliationReport, RosterEntry};
use super::gateway::{ConnectionStatus, GatewayError, PurchaseGateway};
use crate::config::MatchingConfig;
use crate::names::NameMatcher;

/// Hard cap on rows returned by the browse page and the CSV export.
pub const BROWSE_ROW_CAP: usize = 100;

/// Service composing the gateway and the name matcher. All tunables arrive
/// through [`MatchingConfig`]; there is no process-wide state.
pub struct PurchaseDeskService<G> {
    gateway: Arc<G>,
    matcher: NameMatcher,
}

impl<G> PurchaseDeskService<G>
where
    G: PurchaseGateway + 'static,
{
    pub fn new(gateway: Arc<G>, matching: &MatchingConfig) -> Self {
        Self {
            gateway,
            matcher: NameMatcher::from_config(matching),
        }
    }

    /// Reachability of the backing database for the connection page.
    pub fn connection_status(&self) -> ConnectionStatus {
        self.gateway.probe()
    }

    /// The top ledger rows, capped at [`BROWSE_ROW_CAP`] regardless of the
    /// requested limit.
    pub fn browse(&self, limit: Option<usize>) -> Result<Vec<PurchaseRecord>, GatewayError> {
        let limit = limit.unwrap_or(BROWSE_ROW_CAP).min(BROWSE_ROW_CAP);
        self.gateway.top_purchases(limit)
    }

    /// The browse rows serialized as a CSV document ("results.csv" on the
    /// download surface).
    pub fn export_csv(&self, limit: Option<usize>) -> Result<String, ExportError> {
        let records = self.browse(limit)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in &records {
            writer.serialize(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| ExportError::Finalize(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| ExportError::Finalize(err.to_string()))
    }

    /// Attach roster employee ids to ledger rows by name.
    ///
    /// Every distinct ledger name is matched against the roster: exact
    /// canonical equality first, then partial-ratio at or above the
    /// configured threshold. Roster entries submitted without an id, and
    /// ledger names nothing claims, end up in `unmatched`.
    pub fn reconcile(&self, roster: &[RosterEntry]) -> Result<ReconciliationReport, GatewayError> {
        let ledger_names = self.gateway.employee_names()?;
        let candidates: Vec<String> = roster
            .iter()
            .map(|entry| entry.employee_name.clone())
            .collect();

        let mut assignments = Vec::new();
        let mut unmatched = Vec::new();

        for ledger_name in ledger_names {
            let claimed = self
                .matcher
                .best_match(&ledger_name, &candidates)
                .and_then(|found| {
                    let entry = &roster[found.index];
                    entry.employee_id.map(|employee_id| EmployeeAssignment {
                        employee_name: ledger_name.clone(),
                        employee_id,
                        roster_name: entry.employee_name.clone(),
                        score: found.score,
                        exact: found.exact,
                    })
                });

            match claimed {
                Some(assignment) => assignments.push(assignment),
                None => unmatched.push(ledger_name),
            }
        }

        let updated_rows = if assignments.is_empty() {
            0
        } else {
            self.gateway.assign_employee_ids(&assignments)?
        };

        Ok(ReconciliationReport {
            assignments,
            unmatched,
            updated_rows,
        })
    }
}

/// Failures producing the CSV download.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer finalization failed: {0}")]
    Finalize(String),
}
