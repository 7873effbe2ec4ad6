use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use super::types::{AliasGroup, AliasTable};

/// Holder of the current alias snapshot
///
/// Readers take an `Arc` and keep using it for the whole request, so a
/// concurrent `replace` never shows them a half-updated table.
#[derive(Debug, Default)]
pub struct AliasStore {
    current: RwLock<Arc<AliasTable>>,
}

impl AliasStore {
    #[must_use]
    pub fn new(groups: Vec<AliasGroup>) -> Self {
        Self {
            current: RwLock::new(Arc::new(AliasTable::new(groups))),
        }
    }

    /// The table in effect right now
    #[must_use]
    pub fn snapshot(&self) -> Arc<AliasTable> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap in a new table built from `groups`, discarding the old one
    pub fn replace(&self, groups: Vec<AliasGroup>) {
        let table = Arc::new(AliasTable::new(groups));
        let count = table.groups().len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = table;
        info!(groups = count, "Alias table replaced");
    }
}
