//! Shared-passcode gate in front of the quiz.
//!
//! This only keeps casual visitors out of a shared install. The passcode sits
//! in a plain config file and the pass flag in plain local storage, so it is
//! not a security control and should not be treated as one.

use crate::error::{GateError, StoreError};
use crate::persist::{KeyValueStore, PASS_OK_KEY, USERNAME_KEY};

#[derive(Debug, Clone, Default)]
pub struct Gate {
    passcode: Option<String>,
}

impl Gate {
    pub fn new(passcode: Option<String>) -> Self {
        Self {
            passcode: passcode.filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn requires_passcode(&self) -> bool {
        self.passcode.is_some()
    }

    /// The name stored by an earlier successful entry, if any.
    pub fn remembered_user(&self, store: &dyn KeyValueStore) -> Result<Option<String>, StoreError> {
        if self.requires_passcode() && store.get(PASS_OK_KEY)?.as_deref() != Some("1") {
            return Ok(None);
        }
        Ok(store
            .get(USERNAME_KEY)?
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()))
    }

    /// Check the passcode and name, then remember both. Returns the
    /// trimmed name.
    pub fn enter(
        &self,
        store: &mut dyn KeyValueStore,
        passcode: &str,
        name: &str,
    ) -> Result<String, GateError> {
        if let Some(expected) = &self.passcode {
            if passcode.trim() != expected.trim() {
                return Err(GateError::WrongPasscode);
            }
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GateError::MissingName);
        }

        store.set(PASS_OK_KEY, "1")?;
        store.set(USERNAME_KEY, name)?;
        Ok(name.to_string())
    }

    pub fn forget(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(PASS_OK_KEY)?;
        store.remove(USERNAME_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;

    #[test]
    fn test_wrong_passcode_and_missing_name() {
        let gate = Gate::new(Some("sesame".to_string()));
        let mut store = MemoryStore::new();

        assert!(matches!(gate.enter(&mut store, "nope", "ala"), Err(GateError::WrongPasscode)));
        assert!(matches!(gate.enter(&mut store, "sesame", "   "), Err(GateError::MissingName)));
        assert_eq!(gate.remembered_user(&store).unwrap(), None);
    }

    #[test]
    fn test_successful_entry_is_remembered() {
        let gate = Gate::new(Some("sesame".to_string()));
        let mut store = MemoryStore::new();

        assert_eq!(gate.enter(&mut store, " sesame ", " ala ").unwrap(), "ala");
        assert_eq!(gate.remembered_user(&store).unwrap().as_deref(), Some("ala"));

        Gate::forget(&mut store).unwrap();
        assert_eq!(gate.remembered_user(&store).unwrap(), None);
    }

    #[test]
    fn test_without_passcode_only_name_is_needed() {
        let gate = Gate::new(Some("  ".to_string()));
        assert!(!gate.requires_passcode());

        let mut store = MemoryStore::new();
        store.set(USERNAME_KEY, "bob").unwrap();
        assert_eq!(gate.remembered_user(&store).unwrap().as_deref(), Some("bob"));
        assert_eq!(gate.enter(&mut store, "", "eve").unwrap(), "eve");
    }
}
