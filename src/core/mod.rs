pub mod reporter;
pub mod tracker;
pub mod utils;

pub use reporter::{MemoryReporter, MessageKind, Reporter};
pub use tracker::Tracker;
