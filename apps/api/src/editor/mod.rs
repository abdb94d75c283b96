// Editor draft session: the single in-memory resume the editor works on.
// Supplies the exporter's "current resume" and "current theme" through SnapshotSource.

pub mod handlers;
pub mod sample;
pub mod store;

pub use store::DraftStore;
