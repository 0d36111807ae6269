//! # lm-model
//!
//! Wire-format data model for the legacy user migration tool.
//!
//! These types are shared between the HTTP collaborators and the migration
//! core: legacy store records, realm admin API representations, the
//! federation provider snapshot, and the per-run outcome tally.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod component;
pub mod legacy;
pub mod tally;
pub mod user;

pub use component::{ComponentRepresentation, ProviderSnapshot};
pub use legacy::LegacyUser;
pub use tally::RunTally;
pub use user::UserRepresentation;
