use std::collections::HashMap;
use std::env;

/// Error produced when a store refuses a binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VarError {
    /// Name is empty or contains `=` or NUL.
    #[error("invalid variable name: {0:?}")]
    InvalidName(String),
    /// Value contains NUL.
    #[error("invalid value for variable {name}")]
    InvalidValue { name: String },
}

/// Named string values used during substitution.
///
/// `get` is total: an unbound name reads as the empty string.
pub trait VarStore {
    fn get(&self, name: &str) -> String;

    /// Bind `name` to `value`.
    ///
    /// # Errors
    ///
    /// Returns `VarError` if the backing store cannot represent the
    /// binding.
    fn set(&mut self, name: &str, value: &str) -> Result<(), VarError>;
}

/// Store backed by the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVarStore;

impl VarStore for EnvVarStore {
    fn get(&self, name: &str) -> String {
        if !is_valid_env_name(name) {
            return String::new();
        }
        env::var_os(name)
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), VarError> {
        if !is_valid_env_name(name) {
            log::warn!("rejected environment variable name {name:?}");
            return Err(VarError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            log::warn!("rejected value for environment variable {name}");
            return Err(VarError::InvalidValue {
                name: name.to_string(),
            });
        }
        // SAFETY: no other thread may read or write the environment
        // while this runs. The binary only calls it from the read-eval
        // loop thread, and the one test that writes runs alone in its
        // own test binary.
        unsafe { env::set_var(name, value) };
        Ok(())
    }
}

fn is_valid_env_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

/// In-memory store, mostly useful for tests and embedding.
///
/// ```
/// use gosh::{MapVarStore, VarStore};
///
/// let store: MapVarStore = [("USER", "alice")].into_iter().collect();
/// assert_eq!(store.get("USER"), "alice");
/// assert_eq!(store.get("MISSING"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapVarStore {
    vars: HashMap<String, String>,
}

impl MapVarStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl VarStore for MapVarStore {
    fn get(&self, name: &str) -> String {
        self.vars.get(name).cloned().unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), VarError> {
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl From<HashMap<String, String>> for MapVarStore {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapVarStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
