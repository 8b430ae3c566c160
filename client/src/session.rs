//! Session - the one place the store, view and sync adapter are wired.
//!
//! A [`Session`] is what a front end talks to. It receives user intents and
//! hands back a [`ViewModel`] to render. Cloning a session clones the
//! handle, not the state.

use crate::error::Result;
use crate::remote::RemoteCollection;
use crate::sync::RecordSync;
use roster_engine::{CollectionStore, Field, FilterView, FormState, Record, RecordId};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Everything the rendering layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// Records matching the current search, in store order
    pub visible: Vec<Record>,
    pub form: FormState,
    pub editing: bool,
    pub search_term: String,
}

/// Handle to one user session.
#[derive(Debug)]
pub struct Session<S> {
    store: Rc<RefCell<CollectionStore>>,
    view: Rc<FilterView>,
    sync: Rc<RecordSync<S>>,
}

impl<S> Clone for Session<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            view: Rc::clone(&self.view),
            sync: Rc::clone(&self.sync),
        }
    }
}

impl<S: RemoteCollection> Session<S> {
    /// Create the session state and attach the filtered view.
    pub fn new(remote: S) -> Self {
        let mut store = CollectionStore::new();
        let view = FilterView::attach(&mut store);
        let store = Rc::new(RefCell::new(store));
        let sync = RecordSync::new(remote, Rc::clone(&store));

        Self {
            store,
            view: Rc::new(view),
            sync: Rc::new(sync),
        }
    }

    /// Initial fetch of the collection.
    pub async fn activate(&self) -> Result<Vec<Record>> {
        self.sync.fetch_all().await
    }

    pub fn on_search_change(&self, text: impl Into<String>) {
        self.store.borrow_mut().set_search_term(text);
    }

    pub fn on_field_change(&self, field: Field, value: impl Into<String>) {
        self.store.borrow_mut().set_field(field, value);
    }

    pub fn on_edit(&self, record: &Record) {
        self.store.borrow_mut().begin_edit(record);
    }

    pub async fn on_submit(&self) -> Result<Record> {
        self.sync.submit().await
    }

    pub async fn on_delete(&self, id: &RecordId) -> Result<()> {
        self.sync.delete(id).await
    }

    /// Current render input.
    pub fn view(&self) -> ViewModel {
        let store = self.store.borrow();
        ViewModel {
            visible: self.view.snapshot(),
            form: store.form().clone(),
            editing: store.is_editing(),
            search_term: store.search_term().to_string(),
        }
    }

    /// Find a record whose id renders as `text`.
    pub fn find_by_label(&self, text: &str) -> Option<Record> {
        self.store
            .borrow()
            .records()
            .iter()
            .find(|r| r.id.as_ref().is_some_and(|id| id.to_string() == text))
            .cloned()
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> Ref<'_, CollectionStore> {
        self.store.borrow()
    }

    pub fn sync(&self) -> &RecordSync<S> {
        &self.sync
    }
}
