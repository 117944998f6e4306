//! Live parameter value store and its change-notification contract.
//!
//! The store is the authoritative owner of current values; the engine never
//! caches them across a refresh. Change notification is delivered
//! synchronously on the mutating thread — the same single logical thread that
//! owns the panel — so no locking discipline is required of listeners.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{PanelError, PanelResult};

/// Listener invoked synchronously after the store's contents change.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Authoritative holder of current numeric values, one per parameter name.
pub trait ParameterStore: Send + Sync {
    /// All known parameter names, in no particular order.
    fn names(&self) -> Vec<String>;

    /// Current value for `name`, if the store holds one.
    fn get(&self, name: &str) -> Option<f64>;

    /// Writes a new value. Unknown names are rejected: the device does not
    /// accept writes to parameters it never reported.
    fn set(&self, name: &str, value: f64) -> PanelResult<()>;

    /// Registers a listener fired after every mutation.
    fn subscribe(&self, listener: ChangeListener);

    /// True when the store holds no parameters at all.
    fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    /// The full name → value mapping.
    fn snapshot(&self) -> HashMap<String, f64> {
        self.names()
            .into_iter()
            .filter_map(|name| {
                let value = self.get(&name)?;
                Some((name, value))
            })
            .collect()
    }
}

/// In-process implementation of [`ParameterStore`].
///
/// Used directly by the CLI (populated through a link) and by tests. Bulk
/// loads go through [`MemoryStore::replace_all`], which notifies listeners
/// once for the whole batch.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, f64>>,
    listeners: RwLock<Vec<ChangeListener>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    pub fn with_values(values: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().collect()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the whole value set in one step, as a link does after
    /// fetching the authoritative list, then notifies listeners once.
    pub fn replace_all(&self, values: HashMap<String, f64>) -> PanelResult<()> {
        {
            let mut held = self.values.write().unwrap_or_else(|e| e.into_inner());
            *held = values;
        }
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        for listener in listeners.iter() {
            listener();
        }
    }
}

impl ParameterStore for MemoryStore {
    fn names(&self) -> Vec<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<f64> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(name).copied()
    }

    fn set(&self, name: &str, value: f64) -> PanelResult<()> {
        {
            let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
            match values.get_mut(name) {
                Some(held) => *held = value,
                None => return Err(PanelError::UnknownParameter(name.to_string())),
            }
        }
        debug!(parameter = name, value, "parameter written");
        self.notify();
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn set_updates_known_names_only() {
        let store = MemoryStore::with_values([("RATE_P".to_string(), 0.15)]);

        store.set("RATE_P", 0.2).unwrap();
        assert_eq!(store.get("RATE_P"), Some(0.2));

        let err = store.set("NO_SUCH", 1.0).unwrap_err();
        assert!(matches!(err, PanelError::UnknownParameter(name) if name == "NO_SUCH"));
    }

    #[test]
    fn listeners_fire_synchronously_on_every_mutation() {
        let store = MemoryStore::with_values([("RATE_P".to_string(), 0.15)]);
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        store.subscribe(Arc::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }));

        store.set("RATE_P", 0.3).unwrap();
        store
            .replace_all(HashMap::from([("RATE_I".to_string(), 0.01)]))
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn replace_all_swaps_the_entire_set() {
        let store = MemoryStore::with_values([("OLD".to_string(), 1.0)]);
        store
            .replace_all(HashMap::from([("NEW".to_string(), 2.0)]))
            .unwrap();

        assert_eq!(store.get("OLD"), None);
        assert_eq!(store.get("NEW"), Some(2.0));
        assert!(!store.is_empty());
    }

    #[test]
    fn snapshot_reflects_current_contents() {
        let store = MemoryStore::with_values([
            ("A".to_string(), 1.0),
            ("B".to_string(), 2.0),
        ]);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("B"), Some(&2.0));
    }
}
