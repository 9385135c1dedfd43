pub mod indexer;
pub mod interval;

pub use indexer::{GridCoordinates, IndexError, Indexer};
pub use interval::Interval;
