//! Type-safe keys for backed values.

use std::marker::PhantomData;

/// Type-safe key for a backed value.
///
/// Associates a string key name with a value type at compile time, so a group of keys can be
/// declared once as constants and accessors built from them can't disagree about the type.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
///
/// use prefs_backed::{CodableBacked, Key, NativeBacked};
/// use prefs_store::{MemoryPrefsStore, PrefsStore};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct AppConfig {
///     theme: String,
/// }
///
/// pub const CONFIG: Key<AppConfig> = Key::new("app_config");
/// pub const LAUNCH_COUNT: Key<i64> = Key::new("launch_count");
///
/// let store: Arc<dyn PrefsStore> = Arc::new(MemoryPrefsStore::new());
/// let config = CodableBacked::for_key(CONFIG, None, store.clone());
/// let launches = NativeBacked::for_key(LAUNCH_COUNT, 0, store);
/// assert_eq!(config.key(), "app_config");
/// assert_eq!(launches.get(), 0);
/// ```
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Create a new type-safe key with the given storage name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Get the string key name used for storage.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls so keys stay `Copy` regardless of `T`.
impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> std::fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `String` isn't `Copy`, the key still is.
    const THEME: Key<String> = Key::new("theme");

    #[test]
    fn keys_are_const_and_copy() {
        let copy = THEME;
        assert_eq!(copy.name(), "theme");
        assert_eq!(THEME.name(), "theme");
        assert_eq!(format!("{THEME:?}"), "Key(\"theme\")");
    }
}
