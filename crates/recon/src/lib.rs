//! `muster-recon` — workforce roster reconciliation and aggregation engine.
//!
//! Reconciles three tabular extracts (personnel roster, service-history
//! ledger, per-unit summary sheet) into unified person and unit records,
//! then derives demographic cells, staffing ratios, and ranked summaries.
//! Receives pre-loaded source text and returns serializable results; the
//! only filesystem surface is the service-date cache, which the engine owns.

pub mod aggregate;
pub mod cache;
pub mod columns;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod events;
pub mod identity;
pub mod join;
pub mod model;
pub mod normalize;
pub mod ranked;
pub mod staffing;
pub mod table;

pub use config::RosterConfig;
pub use engine::{run, SourceSet};
pub use error::MusterError;
pub use model::{PassResult, PersonRecord, UnitRecord};
