//! citecheck: citation cross-reference checker for documentation corpora
//!
//! Validates that linked citations (`[2009](../references.html#Spolsky2009)`)
//! resolve to entries of the reference catalog (`:::{#Spolsky2009}`), flags
//! author/year text without a link, and lists catalog entries never cited.

pub mod catalog;
pub mod check;
pub mod config;
pub mod error;
pub mod extract;
pub mod reconcile;
pub mod render;
pub mod scan;
pub mod schema;

pub use check::{check, run_check, CheckArgs};
pub use config::CheckConfig;
pub use error::{CheckError, CheckResult};
pub use reconcile::reconcile;
pub use schema::{Catalog, DocumentReport, Outcome, RunSummary};
