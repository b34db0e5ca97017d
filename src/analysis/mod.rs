mod hourly;
mod reports;
mod runs;

pub use hourly::{aggregate_hourly, fully_fraudulent_hours};
pub use reports::{over_amount, pivot_by_type, zero_amount, MoneyField, PivotRow};
pub use runs::{find_runs, run_stats};
