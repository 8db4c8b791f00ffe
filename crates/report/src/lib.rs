pub mod overspend;
pub mod per_transaction;
pub mod segment;
pub mod series;
pub mod summary;

pub use overspend::{average_per_month, flag, OverspendInputs, OVERSPEND_FACTOR};
pub use per_transaction::{aggregate_per_transaction, TransactionPoint, TransactionSeries};
pub use segment::{segment_style, segment_styles, SegmentStyle};
pub use series::{
    aggregate, month_deltas, monthly_target_line, Aggregation, SeriesPoint, SeriesSelector,
    TargetLine, TargetPoint,
};
pub use summary::{summarize, CategorySummary};
