//! The pure reporting core: snapshot normalization, filtering, per-category
//! aggregation and day-by-day bucketing.
//!
//! Everything in this module is synchronous and side-effect free. The HTTP
//! layer reads a consistent snapshot of the database, hands it to
//! [Snapshot::new], and the rest of the pipeline operates on the normalized
//! records.

mod aggregate;
mod bucket;
mod filter;
mod snapshot;
mod summary;

pub use aggregate::{CategoryBreakdown, CategoryTotal, aggregate_by_category};
pub use bucket::{CategorySeries, DayCategoryMatrix, bucketize_by_day};
pub use filter::{ExpenseFilter, filter_expenses};
pub use snapshot::{
    ResolvedCategory, ResolvedExpense, SkipReason, SkippedExpense, Snapshot, UNKNOWN_LABEL,
    from_cents, to_cents,
};
pub use summary::{SummaryEndpointState, get_summary_endpoint};
