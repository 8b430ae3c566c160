//! Search filtering over the canonical record sequence.
//!
//! A record matches when the lower-cased search term occurs in its
//! lower-cased name, or when the raw term occurs in the decimal text of its
//! age. The empty term matches every record. Order is never changed.

use crate::{CollectionStore, Record, SubscriptionId};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Filter `records` by `term`, preserving order.
pub fn filter_records(records: &[Record], term: &str) -> Vec<Record> {
    let folded = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches_folded(record, term, &folded))
        .cloned()
        .collect()
}

/// Whether a single record matches `term`.
pub fn matches(record: &Record, term: &str) -> bool {
    matches_folded(record, term, &term.to_lowercase())
}

fn matches_folded(record: &Record, term: &str, folded: &str) -> bool {
    record.name.to_lowercase().contains(folded) || record.age.search_text().contains(term)
}

/// Filtered view kept in step with a [`CollectionStore`].
///
/// Subscribes once on [`attach`](FilterView::attach) and recomputes in full
/// whenever the records or the search term change.
#[derive(Debug)]
pub struct FilterView {
    visible: Rc<RefCell<Vec<Record>>>,
    subscription: SubscriptionId,
}

impl FilterView {
    /// Subscribe to `store` and compute the initial view.
    pub fn attach(store: &mut CollectionStore) -> Self {
        let visible = Rc::new(RefCell::new(filter_records(
            store.records(),
            store.search_term(),
        )));

        let sink = Rc::clone(&visible);
        let subscription = store.subscribe(move |event, state| {
            if event.affects_view() {
                *sink.borrow_mut() = filter_records(state.records(), state.search_term());
            }
        });

        Self {
            visible,
            subscription,
        }
    }

    /// Stop following `store`. The last computed view stays readable.
    pub fn detach(&self, store: &mut CollectionStore) -> bool {
        store.unsubscribe(self.subscription)
    }

    /// Borrow the current filtered sequence.
    pub fn visible(&self) -> Ref<'_, Vec<Record>> {
        self.visible.borrow()
    }

    /// Copy of the current filtered sequence.
    pub fn snapshot(&self) -> Vec<Record> {
        self.visible.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.visible.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
