//! Record sync - applies confirmed remote changes to the store.
//!
//! Each call issues exactly one remote request and, only once it succeeds,
//! applies one store mutation. Failures are logged and returned; the store
//! is left exactly as it was. The store is never borrowed across an await,
//! so several calls may be in flight and they land in completion order.

use crate::error::Result;
use crate::remote::RemoteCollection;
use roster_engine::{CollectionStore, Record, RecordId, RecordInput};
use std::cell::RefCell;
use std::rc::Rc;

/// Boundary adapter between a [`RemoteCollection`] and a [`CollectionStore`].
#[derive(Debug)]
pub struct RecordSync<S> {
    remote: S,
    store: Rc<RefCell<CollectionStore>>,
}

impl<S: RemoteCollection> RecordSync<S> {
    pub fn new(remote: S, store: Rc<RefCell<CollectionStore>>) -> Self {
        Self { remote, store }
    }

    /// Fetch the whole collection and seed the store with it.
    pub async fn fetch_all(&self) -> Result<Vec<Record>> {
        match self.remote.list().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Fetched records");
                self.store.borrow_mut().load(records.clone());
                Ok(records)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching records");
                Err(e)
            }
        }
    }

    /// Create a record and append the service's copy.
    ///
    /// On success the form is blanked, unless an edit session began or the
    /// fields changed while the call was pending. On failure it keeps what
    /// was typed.
    pub async fn create(&self, input: &RecordInput) -> Result<Record> {
        match self.remote.create(input).await {
            Ok(record) => {
                tracing::info!(record_id = ?record.id, "Create successful");
                let mut store = self.store.borrow_mut();
                store.append(record.clone());
                if !store.is_editing() && store.form().to_input() == *input {
                    store.clear_form();
                }
                Ok(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating record");
                Err(e)
            }
        }
    }

    /// Update the record with `id` and end the edit session.
    ///
    /// On failure the edit session and form are left untouched so the user
    /// can resubmit.
    pub async fn update(&self, id: &RecordId, input: &RecordInput) -> Result<Record> {
        match self.remote.update(id, input).await {
            Ok(record) => {
                tracing::info!(record_id = %id, "Edit successful");
                let mut store = self.store.borrow_mut();
                store.replace(id, record.clone());
                store.end_edit();
                Ok(record)
            }
            Err(e) => {
                tracing::error!(record_id = %id, error = %e, "Error updating record");
                Err(e)
            }
        }
    }

    /// Delete the record with `id`.
    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        match self.remote.delete(id).await {
            Ok(ack) => {
                tracing::info!(record_id = %id, "Delete successful");
                tracing::debug!(record_id = %id, ack = %ack, "Delete acknowledgement");
                self.store.borrow_mut().remove(id);
                Ok(())
            }
            Err(e) => {
                tracing::error!(record_id = %id, error = %e, "Failed to delete record");
                Err(e)
            }
        }
    }

    /// Submit the form: update when editing, create otherwise.
    pub async fn submit(&self) -> Result<Record> {
        let (target, input) = {
            let store = self.store.borrow();
            (store.edit_target().cloned(), store.form().to_input())
        };

        match target {
            Some(id) => self.update(&id, &input).await,
            None => self.create(&input).await,
        }
    }
}
