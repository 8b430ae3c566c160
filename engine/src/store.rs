//! Store - the in-memory state container.
//!
//! The store holds the canonical record sequence, the edit session and the
//! form fields. Every mutation is applied in full and then announced to all
//! subscribers before the call returns, so a subscriber never sees a
//! half-applied change.

use crate::{Record, RecordId, RecordInput};
use std::fmt;

/// Form field addressed by a field-change intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
}

/// Raw text currently in the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub age: String,
}

impl FormState {
    /// Whether both fields are empty.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.age.is_empty()
    }

    /// Body to send for the current field values.
    pub fn to_input(&self) -> RecordInput {
        RecordInput::new(self.name.clone(), self.age.clone())
    }
}

/// Full session state owned by a [`CollectionStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    pub(crate) records: Vec<Record>,
    pub(crate) edit_target: Option<RecordId>,
    pub(crate) form: FormState,
    pub(crate) search_term: String,
}

impl CollectionState {
    /// The canonical record sequence.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Id of the record loaded into the form, if any.
    pub fn edit_target(&self) -> Option<&RecordId> {
        self.edit_target.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Search text exactly as typed.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }
}

/// What a store mutation changed.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Loaded,
    Appended,
    Replaced(RecordId),
    Removed(RecordId),
    EditBegan(Option<RecordId>),
    EditEnded,
    FieldChanged(Field),
    FormCleared,
    SearchChanged,
}

impl StoreEvent {
    /// Whether the filtered view depends on this change.
    pub fn affects_view(&self) -> bool {
        matches!(
            self,
            StoreEvent::Loaded
                | StoreEvent::Appended
                | StoreEvent::Replaced(_)
                | StoreEvent::Removed(_)
                | StoreEvent::SearchChanged
        )
    }
}

/// Handle returned by [`CollectionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent, &CollectionState)>;

/// Owner of the canonical record sequence.
///
/// All operations are total. Lookups by id that find nothing are silent
/// no-ops. Subscribers are invoked synchronously in subscription order and
/// receive the post-mutation state; they must not call back into the store.
#[derive(Default)]
pub struct CollectionStore {
    state: CollectionState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl CollectionStore {
    /// Create an empty store in create mode with a blank form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &CollectionState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a change callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Replace the whole record sequence.
    pub fn load(&mut self, records: Vec<Record>) {
        self.state.records = records;
        self.notify(StoreEvent::Loaded);
    }

    /// Add a record at the end. Duplicate ids are not checked.
    pub fn append(&mut self, record: Record) {
        self.state.records.push(record);
        self.notify(StoreEvent::Appended);
    }

    /// Replace the first record with `id`, keeping its position.
    pub fn replace(&mut self, id: &RecordId, updated: Record) {
        if let Some(slot) = self.state.records.iter_mut().find(|r| r.has_id(id)) {
            *slot = updated;
        }
        self.notify(StoreEvent::Replaced(id.clone()));
    }

    /// Remove the first record with `id`.
    pub fn remove(&mut self, id: &RecordId) {
        if let Some(pos) = self.state.records.iter().position(|r| r.has_id(id)) {
            self.state.records.remove(pos);
        }
        self.notify(StoreEvent::Removed(id.clone()));
    }

    /// Load `record` into the form. Replaces any edit session in progress.
    pub fn begin_edit(&mut self, record: &Record) {
        self.state.edit_target = record.id.clone();
        self.state.form = FormState {
            name: record.name.clone(),
            age: record.age.search_text().into_owned(),
        };
        self.notify(StoreEvent::EditBegan(record.id.clone()));
    }

    /// Leave edit mode and blank the form.
    pub fn end_edit(&mut self) {
        self.state.edit_target = None;
        self.state.form = FormState::default();
        self.notify(StoreEvent::EditEnded);
    }

    /// Blank the form without touching the edit session.
    pub fn clear_form(&mut self) {
        self.state.form = FormState::default();
        self.notify(StoreEvent::FormCleared);
    }

    /// Overwrite one form field verbatim.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.state.form.name = value,
            Field::Age => self.state.form.age = value,
        }
        self.notify(StoreEvent::FieldChanged(field));
    }

    /// Store the search text verbatim.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.notify(StoreEvent::SearchChanged);
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn records(&self) -> &[Record] {
        self.state.records()
    }

    pub fn edit_target(&self) -> Option<&RecordId> {
        self.state.edit_target()
    }

    pub fn form(&self) -> &FormState {
        self.state.form()
    }

    pub fn search_term(&self) -> &str {
        self.state.search_term()
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    fn notify(&mut self, event: StoreEvent) {
        let state = &self.state;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event, state);
        }
    }
}
