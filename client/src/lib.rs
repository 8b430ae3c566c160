//! Roster Client - remote sync for the Roster record manager.
//!
//! Connects the pure [`roster_engine`] store to a REST record collection.
//! Remote calls are issued by [`RecordSync`]; the store is only touched once
//! the service has confirmed a change. [`Session`] wires the store, the
//! filtered view and the adapter together behind the user intents a front
//! end emits.

pub mod config;
pub mod console;
pub mod error;
pub mod remote;
pub mod session;
pub mod sync;

pub use config::{Config, ConfigError};
pub use error::SyncError;
pub use remote::{HttpCollection, RemoteCollection};
pub use session::{Session, ViewModel};
pub use sync::RecordSync;
