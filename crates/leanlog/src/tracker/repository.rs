use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{align_dates, EntryMap, Theme};
use super::dosing::DoseLog;
use super::goals::GoalConfig;

pub const ENTRIES_KEY: &str = "emag.entries.v2";
pub const DOSES_KEY: &str = "emag.doses.v2";
pub const GOALS_KEY: &str = "emag.goals.v2";
pub const THEME_KEY: &str = "emag.theme.v1";

/// String blobs addressed by key. The only storage the tracker needs.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

/// Whole-value persistence for one tracker resource.
///
/// `load` never fails: missing or unreadable state falls back to the
/// resource's default. Writes always replace the stored value as a unit.
pub trait StateRepository<T>: Send + Sync {
    fn load(&self) -> T;
    fn save_all(&self, value: &T) -> Result<(), RepositoryError>;
    fn clear(&self) -> Result<(), RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to access '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A value the tracker keeps under a fixed key.
pub trait Persisted: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;

    /// Repair a freshly decoded value before handing it out.
    fn normalized(self) -> Self {
        self
    }
}

impl Persisted for GoalConfig {
    const KEY: &'static str = GOALS_KEY;

    fn normalized(self) -> Self {
        self.sanitized()
    }
}

impl Persisted for EntryMap {
    const KEY: &'static str = ENTRIES_KEY;

    fn normalized(self) -> Self {
        align_dates(self)
    }
}

impl Persisted for DoseLog {
    const KEY: &'static str = DOSES_KEY;
}

impl Persisted for Theme {
    const KEY: &'static str = THEME_KEY;
}

/// JSON-encoded repository over any [`KeyValueStore`].
pub struct JsonRepository<S, T> {
    store: Arc<S>,
    _value: PhantomData<fn() -> T>,
}

impl<S, T> JsonRepository<S, T> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _value: PhantomData,
        }
    }
}

impl<S, T> StateRepository<T> for JsonRepository<S, T>
where
    S: KeyValueStore,
    T: Persisted,
{
    fn load(&self) -> T {
        let raw = match self.store.get(T::KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(key = T::KEY, error = %err, "stored state unreadable, using default");
                return T::default();
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => value.normalized(),
            Err(err) => {
                warn!(key = T::KEY, error = %err, "stored state malformed, using default");
                T::default()
            }
        }
    }

    fn save_all(&self, value: &T) -> Result<(), RepositoryError> {
        let encoded = serde_json::to_string(value).map_err(|source| RepositoryError::Encode {
            key: T::KEY.to_string(),
            source,
        })?;
        debug!(key = T::KEY, bytes = encoded.len(), "saving state");
        self.store.set(T::KEY, &encoded)
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        debug!(key = T::KEY, "clearing state");
        self.store.remove(T::KEY)
    }
}

/// Process-local store, used by tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, RepositoryError> {
        self.values
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
