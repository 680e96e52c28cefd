pub mod lenient;
pub mod position;
pub mod side;
pub mod signal;
pub mod snapshot;
pub mod trade;

pub use position::Position;
pub use side::*;
pub use signal::Signal;
pub use snapshot::{Snapshot, SnapshotUpdate};
pub use trade::Trade;
