//! # Roster Engine
//!
//! State and search for a client-side person record manager.
//!
//! This crate owns the in-memory copy of a remote record collection and the
//! filtered view derived from it. It performs no I/O: a remote adapter calls
//! into the store once the service has confirmed a change, and the view
//! follows along on its own.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never talks to the network
//! - **Confirmation-driven**: the store is only mutated with results the
//!   service has already accepted
//! - **Reactive**: the filtered view is recomputed on every relevant change,
//!   there is no refresh call
//! - **Single-threaded**: shared state lives in `Rc<RefCell<_>>`
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] has a service-assigned [`RecordId`], a name, an [`Age`] kept
//! as received (number or text), an optional image URI and any extra fields
//! the service populated.
//!
//! ### Store
//!
//! The [`CollectionStore`] holds the ordered record sequence, the edit
//! session and the form fields. Every mutation notifies subscribers with a
//! [`StoreEvent`] before returning.
//!
//! ### Filtered view
//!
//! A [`FilterView`] subscribes to the store and keeps the records matching
//! the search term: a case-insensitive substring of the name, or a substring
//! of the age's decimal text.
//!
//! ## Quick Start
//!
//! ```rust
//! use roster_engine::{CollectionStore, FilterView, Record, RecordId};
//!
//! let mut store = CollectionStore::new();
//! let view = FilterView::attach(&mut store);
//!
//! store.load(vec![Record::new(1, "Ann", 30), Record::new(2, "Bo", 25)]);
//! store.set_search_term("an");
//! assert_eq!(view.len(), 1);
//!
//! store.set_search_term("2");
//! assert_eq!(view.visible()[0].id, Some(RecordId::Int(2)));
//! ```

pub mod filter;
pub mod record;
pub mod store;

// Re-export main types at crate root
pub use filter::{filter_records, matches, FilterView};
pub use record::{Age, Record, RecordId, RecordInput};
pub use store::{
    CollectionState, CollectionStore, Field, FormState, StoreEvent, SubscriptionId,
};
