pub mod play;
pub mod snapshot;

pub use play::PlayMode;
pub use snapshot::{SnapshotMode, SnapshotReport, parse_moves};
