// Service exports
pub mod dataset;
pub mod sessions;
pub mod transport;

pub use dataset::{DatasetError, DatasetProvider, InMemoryDataset};
pub use sessions::{SessionEntry, SessionError, SessionStore, StoredSession};
pub use transport::{ReplySlot, Transport, TransportError};
