// Domain models

mod report;
mod series;
mod snapshot;

pub use report::{AggregateReport, LocalEntry, MergedPeer};
pub use series::{Direction, SampleSeries};
pub use snapshot::{PeerStats, RunMeta, Snapshot};
