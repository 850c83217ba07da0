//! The untouchable registry: per-mock-type configuration of which
//! attribute names are preserved verbatim from the source type.
//!
//! The registry is owned by the [`MockType`](crate::MockType) and shared by
//! every instance produced from it; it is never attached to individual
//! instances. Declarations are individually locked but a multi-call
//! configuration sequence is not atomic: finish configuring before handing
//! instances to other threads.

use std::collections::BTreeSet;

use parking_lot::RwLock;
use tracing::trace;

use crate::classifier::is_magic_name;

/// Which attribute names a mock type preserves from its source.
///
/// Tracks two sets: the names currently untouchable, and the names the
/// caller explicitly declared touchable. The latter is what lets the
/// magic-preservation step skip a magic name the caller has opted out of.
#[derive(Debug, Default)]
pub struct UntouchableRegistry {
    state: RwLock<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    untouchable: BTreeSet<String>,
    touchable: BTreeSet<String>,
}

impl UntouchableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as untouchable. Idempotent.
    ///
    /// Clears any explicit touchable record for the name, so the last
    /// declaration always wins.
    pub fn declare_untouchable(&self, name: impl Into<String>) {
        let name = name.into();
        trace!(name = name.as_str(), "declared attribute untouchable");
        let mut state = self.state.write();
        state.touchable.remove(&name);
        state.untouchable.insert(name);
    }

    /// Mark `name` as touchable. Idempotent; no effect if absent.
    pub fn declare_touchable(&self, name: &str) {
        trace!(name, "declared attribute touchable");
        let mut state = self.state.write();
        state.untouchable.remove(name);
        state.touchable.insert(name.to_string());
    }

    /// Whether `name` is currently untouchable.
    pub fn is_untouchable(&self, name: &str) -> bool {
        self.state.read().untouchable.contains(name)
    }

    /// The currently untouchable names, in sorted order.
    pub fn untouchable_names(&self) -> Vec<String> {
        self.state.read().untouchable.iter().cloned().collect()
    }

    /// Apply the default magic-name preservation policy over `names`.
    ///
    /// Every magic-classified candidate becomes untouchable unless that
    /// exact name was explicitly declared touchable beforehand. Runs during
    /// generation over the full source name set; callers may re-apply it
    /// after further declarations.
    pub fn make_magic_attributes_untouchable_unless_explicitly_touchable<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.state.write();
        for name in names {
            let name = name.as_ref();
            if is_magic_name(name) && !state.touchable.contains(name) {
                state.untouchable.insert(name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_untouchable_is_idempotent() {
        let registry = UntouchableRegistry::new();
        registry.declare_untouchable("member");
        registry.declare_untouchable("member");

        assert!(registry.is_untouchable("member"));
        assert_eq!(registry.untouchable_names(), vec!["member"]);
    }

    #[test]
    fn test_declare_touchable_removes_and_tolerates_absent() {
        let registry = UntouchableRegistry::new();
        registry.declare_touchable("never_declared");

        registry.declare_untouchable("method");
        registry.declare_touchable("method");
        assert!(!registry.is_untouchable("method"));
    }

    #[test]
    fn test_last_declaration_wins() {
        let registry = UntouchableRegistry::new();
        registry.declare_untouchable("method");
        registry.declare_touchable("method");
        registry.declare_untouchable("method");

        assert!(registry.is_untouchable("method"));
    }

    #[test]
    fn test_magic_step_preserves_magic_names_only() {
        let registry = UntouchableRegistry::new();
        registry.make_magic_attributes_untouchable_unless_explicitly_touchable([
            "nonmagical_attribute",
            "__magic_attribute__",
        ]);

        assert!(registry.is_untouchable("__magic_attribute__"));
        assert!(!registry.is_untouchable("nonmagical_attribute"));
    }

    #[test]
    fn test_magic_step_skips_explicitly_touchable_names() {
        let registry = UntouchableRegistry::new();
        registry.declare_touchable("__magic_attribute__");
        registry.make_magic_attributes_untouchable_unless_explicitly_touchable([
            "__magic_attribute__",
            "__other__",
        ]);

        assert!(!registry.is_untouchable("__magic_attribute__"));
        assert!(registry.is_untouchable("__other__"));
    }
}
