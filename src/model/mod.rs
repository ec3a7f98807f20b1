// Data model - plugin records, rating histograms and filter criteria

pub mod criteria;
pub mod record;

pub use criteria::{FilterCriteria, SortKey};
pub use record::{Icons, PluginRecord, RatingHistogram};
