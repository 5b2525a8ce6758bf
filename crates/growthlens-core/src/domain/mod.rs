mod query;
mod record;
mod timestamp;

pub use query::Query;
pub use record::{Field, FinancialRecord, GroundingSource};
pub use timestamp::UtcDateTime;
