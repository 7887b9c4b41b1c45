//! Purchase desk: browse the vendor purchase ledger, canonicalize free-text
//! employee names, and reconcile ledger names against an employee roster.

pub mod config;
pub mod error;
pub mod names;
pub mod purchasing;
pub mod telemetry;
