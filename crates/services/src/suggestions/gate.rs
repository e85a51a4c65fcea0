use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use resolution_core::model::WeekendId;

/// Per-weekend "loading" flags for in-flight suggestion requests.
///
/// Clones share the same flags. This is advisory state for the front end,
/// not a lock around the roadmap.
#[derive(Clone, Debug, Default)]
pub struct SuggestionGate {
    loading: Arc<Mutex<HashSet<WeekendId>>>,
}

impl SuggestionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `weekend` as loading.
    ///
    /// Returns `None` if a request for that weekend is already in flight. The
    /// flag is cleared when the returned permit is dropped.
    #[must_use]
    pub fn try_begin(&self, weekend: WeekendId) -> Option<SuggestionPermit> {
        let inserted = self
            .loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(weekend);
        inserted.then(|| SuggestionPermit {
            gate: self.clone(),
            weekend,
        })
    }

    #[must_use]
    pub fn is_loading(&self, weekend: WeekendId) -> bool {
        self.loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&weekend)
    }
}

/// Held while a suggestion request for one weekend is running.
#[derive(Debug)]
pub struct SuggestionPermit {
    gate: SuggestionGate,
    weekend: WeekendId,
}

impl Drop for SuggestionPermit {
    fn drop(&mut self) {
        self.gate
            .loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.weekend);
    }
}
