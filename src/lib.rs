// plugscope - filter, rank and health-score plugin directory search results

pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod health;
pub mod model;
pub mod pipeline;
pub mod scoring;

pub use config::Config;
pub use error::{CatalogError, ConfigError, HealthLookupError, PlugscopeError};
pub use model::{FilterCriteria, PluginRecord, RatingHistogram, SortKey};
pub use pipeline::{FilterSession, Page};
