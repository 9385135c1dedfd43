pub mod config;
pub mod hierarchy;
pub mod population;

pub use config::{HierarchyConfig, DEFAULT_RESOLUTION, MAX_RESOLUTION};
pub use hierarchy::{HierarchyError, IntervalHierarchy};
pub use population::{InMemoryResults, ProviderError, ResultKey, ResultScope, ResultsProvider};
