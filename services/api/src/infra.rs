use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use purchase_desk::config::DatabaseConfig;
use purchase_desk::purchasing::{
    ConnectionStatus, EmployeeAssignment, GatewayError, PurchaseGateway, PurchaseRecord,
};
use rusqlite::{params, Connection, OpenFlags, Row};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// SQLite-backed gateway over the purchasing ledger.
///
/// Every operation opens a fresh connection; there is no pool or retry
/// machinery. The database file is never created here.
pub(crate) struct SqlitePurchaseGateway {
    path: PathBuf,
}

const TOP_PURCHASES_SQL: &str = "\
    SELECT transaction_id, modification_indicator, transaction_date, \
           purchase_invoice_number, discount_amount, freight_amount, duty_amount, \
           order_date, transaction_amount, use_tax_flag, use_tax_amount, \
           employee_id, employee_name, document_number, comment \
    FROM purchases ORDER BY transaction_id LIMIT ?1";

impl SqlitePurchaseGateway {
    pub(crate) fn new(config: &DatabaseConfig) -> Self {
        Self {
            path: config.path.clone(),
        }
    }

    fn open(&self) -> Result<Connection, GatewayError> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|err| GatewayError::Unreachable(err.to_string()))
    }
}

fn query_error(err: rusqlite::Error) -> GatewayError {
    GatewayError::Query(err.to_string())
}

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

fn row_to_purchase(row: &Row<'_>) -> rusqlite::Result<PurchaseRecord> {
    Ok(PurchaseRecord {
        transaction_id: row.get(0)?,
        modification_indicator: row.get(1)?,
        transaction_date: parse_date(row.get(2)?),
        purchase_invoice_number: row.get(3)?,
        discount_amount: row.get(4)?,
        freight_amount: row.get(5)?,
        duty_amount: row.get(6)?,
        order_date: parse_date(row.get(7)?),
        transaction_amount: row.get(8)?,
        use_tax_flag: row.get::<_, i64>(9)? != 0,
        use_tax_amount: row.get(10)?,
        employee_id: row.get(11)?,
        employee_name: row.get(12)?,
        document_number: row.get(13)?,
        comment: row.get(14)?,
    })
}

impl PurchaseGateway for SqlitePurchaseGateway {
    fn probe(&self) -> ConnectionStatus {
        let ping = self.open().and_then(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))
                .map_err(query_error)
        });
        match ping {
            Ok(()) => ConnectionStatus::Connected,
            Err(err) => ConnectionStatus::Unreachable {
                reason: err.to_string(),
            },
        }
    }

    fn top_purchases(&self, limit: usize) -> Result<Vec<PurchaseRecord>, GatewayError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(TOP_PURCHASES_SQL).map_err(query_error)?;
        let rows = stmt
            .query_map(params![limit as i64], row_to_purchase)
            .map_err(query_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }

    fn employee_names(&self) -> Result<Vec<String>, GatewayError> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT employee_name FROM purchases ORDER BY employee_name")
            .map_err(query_error)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(query_error)?;
        names.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }

    fn assign_employee_ids(
        &self,
        assignments: &[EmployeeAssignment],
    ) -> Result<usize, GatewayError> {
        let mut conn = self.open()?;
        let tx = conn.transaction().map_err(query_error)?;
        let mut updated = 0usize;
        for assignment in assignments {
            updated += tx
                .execute(
                    "UPDATE purchases SET employee_id = ?1 WHERE employee_name = ?2",
                    params![assignment.employee_id, assignment.employee_name],
                )
                .map_err(query_error)?;
        }
        tx.commit().map_err(query_error)?;
        Ok(updated)
    }
}

/// Gateway double for route tests; the ledger starts empty.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct InMemoryPurchaseGateway {
    rows: std::sync::Mutex<Vec<PurchaseRecord>>,
}

#[cfg(test)]
impl PurchaseGateway for InMemoryPurchaseGateway {
    fn probe(&self) -> ConnectionStatus {
        ConnectionStatus::Connected
    }

    fn top_purchases(&self, limit: usize) -> Result<Vec<PurchaseRecord>, GatewayError> {
        let guard = self.rows.lock().expect("rows mutex poisoned");
        Ok(guard.iter().take(limit).cloned().collect())
    }

    fn employee_names(&self) -> Result<Vec<String>, GatewayError> {
        let guard = self.rows.lock().expect("rows mutex poisoned");
        Ok(guard.iter().map(|row| row.employee_name.clone()).collect())
    }

    fn assign_employee_ids(
        &self,
        assignments: &[EmployeeAssignment],
    ) -> Result<usize, GatewayError> {
        let mut guard = self.rows.lock().expect("rows mutex poisoned");
        let mut updated = 0;
        for assignment in assignments {
            for row in guard
                .iter_mut()
                .filter(|row| row.employee_name == assignment.employee_name)
            {
                row.employee_id = Some(assignment.employee_id);
                updated += 1;
            }
        }
        Ok(updated)
    }
}
