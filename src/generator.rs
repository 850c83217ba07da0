//! Mock type generation.
//!
//! [`generate_mock_type`] takes a source [`TypeDef`] and produces a
//! [`MockType`] with attribute-name parity: every name visible on the
//! source (inherited names included) is visible on the mock. Names the
//! registry marks untouchable resolve to the original attribute; every
//! other data attribute reads as the `Null` sentinel and every other
//! method becomes a no-op returning `Null`.
//!
//! The registry is consulted live at resolution time, so declarations made
//! after generation affect existing instances too; the last declaration
//! before an access wins. Configuration is a non-reentrant step: finish
//! declaring before sharing instances across threads.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::classifier::{classify, AttrKind};
use crate::errors::AttributeError;
use crate::instance::{Attr, Instance, TypeDef};
use crate::patch::create_mock_function;
use crate::registry::UntouchableRegistry;

/// A generated mock type.
///
/// Shares one [`UntouchableRegistry`] across all instances produced from
/// it. Cloning a `MockType` clones the handle, not the registry.
#[derive(Debug, Clone)]
pub struct MockType {
    inner: Arc<MockTypeInner>,
}

#[derive(Debug)]
pub(crate) struct MockTypeInner {
    name: String,
    source: TypeDef,
    registry: UntouchableRegistry,
}

/// Generate a mock type from `source`.
///
/// Enumerates the full attribute set of the source, applies the default
/// magic-name preservation policy over it, and captures the source
/// attributes behind the new type. The source is never mutated, and
/// generation cannot fail: a [`TypeDef`] is well-formed by construction.
pub fn generate_mock_type(source: &TypeDef) -> MockType {
    let registry = UntouchableRegistry::new();
    registry.make_magic_attributes_untouchable_unless_explicitly_touchable(
        source.attribute_names(),
    );

    let (mut magic, mut callable, mut plain) = (0usize, 0usize, 0usize);
    for (name, attr) in source.attrs() {
        match classify(name, attr) {
            AttrKind::Magic => magic += 1,
            AttrKind::Callable => callable += 1,
            AttrKind::Plain => plain += 1,
        }
    }
    debug!(
        source = source.name(),
        magic, callable, plain, "generated mock type"
    );

    MockType {
        inner: Arc::new(MockTypeInner {
            name: format!("{}Mock", source.name()),
            source: source.clone(),
            registry,
        }),
    }
}

impl MockType {
    /// The mock type's name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// All attribute names visible on this mock type, in sorted order.
    ///
    /// Identical to the source type's name set.
    pub fn attribute_names(&self) -> Vec<String> {
        self.inner.source.attribute_names()
    }

    /// Preserve `name` verbatim from the source type.
    ///
    /// Affects existing and future instances alike. Declaring a name the
    /// source never defined is accepted and has no effect.
    pub fn declare_untouchable(&self, name: impl Into<String>) {
        self.inner.registry.declare_untouchable(name);
    }

    /// Stop preserving `name`, re-enabling suppression.
    ///
    /// Works on magic names too, overriding the default preservation
    /// policy for this mock type.
    pub fn declare_touchable(&self, name: &str) {
        self.inner.registry.declare_touchable(name);
    }

    /// The names currently preserved from the source, in sorted order.
    pub fn untouchable_attributes(&self) -> Vec<String> {
        self.inner.registry.untouchable_names()
    }

    /// Whether `name` is currently preserved from the source.
    pub fn is_untouchable(&self, name: &str) -> bool {
        self.inner.registry.is_untouchable(name)
    }

    /// Re-apply the default magic-name preservation policy over `names`.
    ///
    /// Generation already ran this over the full source name set; exposing
    /// it lets callers re-assert the default after a round of explicit
    /// declarations.
    pub fn make_magic_attributes_untouchable_unless_explicitly_touchable<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner
            .registry
            .make_magic_attributes_untouchable_unless_explicitly_touchable(names);
    }

    /// Create a live instance of this mock type.
    ///
    /// Instances carry no state beyond the shared type and their own
    /// monkey-patch table.
    pub fn instantiate(&self) -> Instance {
        Instance::mock(self.inner.clone())
    }
}

impl MockTypeInner {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn attribute_names(&self) -> Vec<String> {
        self.source.attribute_names()
    }

    /// Resolve `name` against the source attributes and the live registry.
    pub(crate) fn resolve(&self, name: &str) -> Result<Attr, AttributeError> {
        let attr = self
            .source
            .attr(name)
            .ok_or_else(|| AttributeError::not_found(&self.name, name))?;

        if self.registry.is_untouchable(name) {
            return Ok(attr.clone());
        }

        Ok(match attr {
            Attr::Data(_) => Attr::Data(Value::Null),
            Attr::Method(_) => Attr::Method(create_mock_function(Value::Null)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn true_class() -> TypeDef {
        TypeDef::builder("TrueClass")
            .data("member", 0)
            .method("method", |_instance, _args| Value::from("lol"))
            .build()
    }

    #[test]
    fn test_mock_attribute_name_parity() {
        let source = true_class();
        let mock = generate_mock_type(&source);
        let instance = mock.instantiate();

        for name in source.attribute_names() {
            assert!(
                instance.attribute_names().contains(&name),
                "mock is missing attribute `{name}`"
            );
        }
    }

    #[test]
    fn test_suppressed_member_reads_null() {
        let mock = generate_mock_type(&true_class());
        let instance = mock.instantiate();
        assert_eq!(instance.get("member").unwrap(), Value::Null);
    }

    #[test]
    fn test_suppressed_method_returns_null() {
        let mock = generate_mock_type(&true_class());
        let instance = mock.instantiate();
        assert_eq!(instance.call("method", &[]).unwrap(), Value::Null);
        // Arguments are ignored, not rejected.
        assert_eq!(
            instance.call("method", &[json!(1), json!("x")]).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_unknown_attribute_fails() {
        let mock = generate_mock_type(&true_class());
        let instance = mock.instantiate();
        assert!(instance.get("invalid_descriptor").unwrap_err().is_not_found());
        assert!(instance
            .call("invalid_descriptor", &[])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_untouchable_member_is_preserved() {
        let mock = generate_mock_type(&true_class());
        mock.declare_untouchable("member");
        let instance = mock.instantiate();

        assert_eq!(instance.get("member").unwrap(), json!(0));
        assert_eq!(instance.call("method", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_untouchable_method_is_preserved() {
        let mock = generate_mock_type(&true_class());
        mock.declare_untouchable("method");
        let instance = mock.instantiate();

        assert_eq!(instance.call("method", &[]).unwrap(), json!("lol"));
        assert_eq!(instance.get("member").unwrap(), Value::Null);
    }

    #[test]
    fn test_combined_untouchables_are_preserved() {
        let mock = generate_mock_type(&true_class());
        mock.declare_untouchable("method");
        mock.declare_untouchable("member");
        let instance = mock.instantiate();

        assert_eq!(instance.get("member").unwrap(), json!(0));
        assert_eq!(instance.call("method", &[]).unwrap(), json!("lol"));
    }

    #[test]
    fn test_nonexistent_untouchable_is_silently_accepted() {
        let mock = generate_mock_type(&true_class());
        mock.declare_untouchable("no_such_attribute");
        let instance = mock.instantiate();

        assert!(instance.get("no_such_attribute").unwrap_err().is_not_found());
    }

    #[test]
    fn test_magic_attributes_untouchable_by_default() {
        let source = TypeDef::builder("Tagged")
            .data("__id__", "tag-1")
            .data("plain", "visible")
            .build();
        let mock = generate_mock_type(&source);
        let instance = mock.instantiate();

        assert!(mock.is_untouchable("__id__"));
        assert!(mock.untouchable_attributes().contains(&"__id__".to_string()));
        assert_eq!(instance.get("__id__").unwrap(), json!("tag-1"));
        assert_eq!(instance.get("plain").unwrap(), Value::Null);
    }

    #[test]
    fn test_magic_override_toggles_with_last_declaration() {
        let source = TypeDef::builder("Tagged").data("__id__", "tag-1").build();
        let mock = generate_mock_type(&source);

        mock.declare_touchable("__id__");
        assert_eq!(mock.instantiate().get("__id__").unwrap(), Value::Null);

        mock.declare_untouchable("__id__");
        assert_eq!(mock.instantiate().get("__id__").unwrap(), json!("tag-1"));
    }

    #[test]
    fn test_registry_is_consulted_live_by_existing_instances() {
        let mock = generate_mock_type(&true_class());
        let instance = mock.instantiate();
        assert_eq!(instance.get("member").unwrap(), Value::Null);

        mock.declare_untouchable("member");
        assert_eq!(instance.get("member").unwrap(), json!(0));
    }

    #[test]
    fn test_inherited_attributes_are_mocked_too() {
        let base = TypeDef::builder("Base")
            .method("inherited_method", |_instance, _args| json!("base"))
            .build();
        let child = TypeDef::builder("Child")
            .extends(&base)
            .data("own", 3)
            .build();

        let mock = generate_mock_type(&child);
        let instance = mock.instantiate();

        assert_eq!(instance.call("inherited_method", &[]).unwrap(), Value::Null);
        assert_eq!(instance.get("own").unwrap(), Value::Null);
    }

    #[test]
    fn test_mock_type_name_and_source_untouched() {
        let source = true_class();
        let mock = generate_mock_type(&source);

        assert_eq!(mock.name(), "TrueClassMock");
        // Generating a mock never mutates the source.
        let original = source.instantiate();
        assert_eq!(original.get("member").unwrap(), json!(0));
        assert_eq!(original.call("method", &[]).unwrap(), json!("lol"));
    }
}
