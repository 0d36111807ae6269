//! # lm-engine
//!
//! The migration core: the federation provider guard, the per-record
//! reconciliation engine, and the run orchestration that ties them
//! together with guaranteed provider restoration.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod guard;
pub mod reconcile;
pub mod run;

pub use error::{MigrateError, MigrateResult};
pub use guard::FederationGuard;
pub use reconcile::{ReconciliationEngine, SkipReason};
pub use run::{MigrationRun, RunReport, RunState};
