//! The dynamic object model: type definitions, bound attributes, and live
//! instances.
//!
//! There is no runtime class object to walk, so source types are described
//! explicitly: a [`TypeDef`] is a named map from attribute name to [`Attr`],
//! assembled with [`TypeDefBuilder`]. An [`Instance`] is a live object over
//! a backing type (a concrete `TypeDef` or a generated
//! [`MockType`](crate::MockType)) with a uniform accessor pair,
//! [`Instance::get`] for data and [`Instance::call`] for methods.
//!
//! Every instance owns a private patch table that the accessor consults
//! before falling back to the backing type. Monkey-patching writes into
//! that table, so rebinding a name on one instance never affects siblings
//! and never requires regenerating the type.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::errors::AttributeError;
use crate::generator::MockTypeInner;

/// An instance-bound callable.
///
/// Receives the instance it was invoked through as its first argument and
/// an arbitrary argument slice. Callables capture no shared mutable state
/// and are safe to invoke from multiple threads.
pub type MethodFn = Arc<dyn Fn(&Instance, &[Value]) -> Value + Send + Sync>;

/// An attribute bound on a type or patched onto an instance.
#[derive(Clone)]
pub enum Attr {
    /// A plain data attribute.
    Data(Value),
    /// A method attribute.
    Method(MethodFn),
}

impl Attr {
    /// Create a data attribute.
    pub fn data(value: impl Into<Value>) -> Self {
        Self::Data(value.into())
    }

    /// Create a method attribute from an instance-bound closure.
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Method(Arc::new(f))
    }

    /// Whether this attribute is callable.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Method(_))
    }
}

impl From<Value> for Attr {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<MethodFn> for Attr {
    fn from(f: MethodFn) -> Self {
        Self::Method(f)
    }
}

impl fmt::Debug for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Method(_) => f.write_str("Method(<fn>)"),
        }
    }
}

/// A named, immutable description of a type: the source material for mock
/// generation.
///
/// Built with [`TypeDef::builder`]; never mutated afterwards. Attribute
/// enumeration includes names merged in from parents via
/// [`TypeDefBuilder::extends`].
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    attrs: BTreeMap<String, Attr>,
}

impl TypeDef {
    /// Start building a type with the given name.
    pub fn builder(name: impl Into<String>) -> TypeDefBuilder {
        TypeDefBuilder {
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// The type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attribute names defined on this type, in sorted order.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attrs.keys().cloned().collect()
    }

    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    /// Iterate over all (name, attribute) pairs.
    pub fn attrs(&self) -> impl Iterator<Item = (&String, &Attr)> {
        self.attrs.iter()
    }

    /// Create a live instance of this type.
    pub fn instantiate(&self) -> Instance {
        Instance {
            backing: Backing::Concrete(Arc::new(self.clone())),
            patches: RwLock::new(BTreeMap::new()),
        }
    }
}

/// Builder for [`TypeDef`].
#[derive(Debug)]
pub struct TypeDefBuilder {
    name: String,
    attrs: BTreeMap<String, Attr>,
}

impl TypeDefBuilder {
    /// Define a plain data attribute.
    pub fn data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), Attr::Data(value.into()));
        self
    }

    /// Define a method attribute.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.attrs.insert(name.into(), Attr::Method(Arc::new(f)));
        self
    }

    /// Inherit all attributes from `parent`.
    ///
    /// Names already defined on this builder keep their definition,
    /// regardless of whether they were added before or after the call, so
    /// a child type always overrides its parents.
    pub fn extends(mut self, parent: &TypeDef) -> Self {
        for (name, attr) in parent.attrs() {
            self.attrs.entry(name.clone()).or_insert_with(|| attr.clone());
        }
        self
    }

    /// Finish the type definition.
    pub fn build(self) -> TypeDef {
        TypeDef {
            name: self.name,
            attrs: self.attrs,
        }
    }
}

#[derive(Debug, Clone)]
enum Backing {
    Concrete(Arc<TypeDef>),
    Mock(Arc<MockTypeInner>),
}

/// A live object over a backing type.
///
/// Attribute resolution consults the instance's own patch table first and
/// falls back to the backing type. Reading a name that neither defines
/// fails with [`AttributeError::NotFound`]; instances never fabricate
/// unknown attributes.
#[derive(Debug)]
pub struct Instance {
    backing: Backing,
    patches: RwLock<BTreeMap<String, Attr>>,
}

impl Instance {
    pub(crate) fn mock(inner: Arc<MockTypeInner>) -> Self {
        Self {
            backing: Backing::Mock(inner),
            patches: RwLock::new(BTreeMap::new()),
        }
    }

    /// The name of the backing type.
    pub fn type_name(&self) -> &str {
        match &self.backing {
            Backing::Concrete(ty) => ty.name(),
            Backing::Mock(inner) => inner.name(),
        }
    }

    /// All attribute names visible on this instance, in sorted order:
    /// the backing type's names plus any patched-in names.
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = match &self.backing {
            Backing::Concrete(ty) => ty.attribute_names().into_iter().collect(),
            Backing::Mock(inner) => inner.attribute_names().into_iter().collect(),
        };
        names.extend(self.patches.read().keys().cloned());
        names.into_iter().collect()
    }

    /// Whether `name` resolves on this instance.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Read a data attribute.
    ///
    /// Fails with [`AttributeError::NotData`] if the name resolves to a
    /// method.
    pub fn get(&self, name: &str) -> Result<Value, AttributeError> {
        match self.resolve(name)? {
            Attr::Data(value) => Ok(value),
            Attr::Method(_) => Err(AttributeError::not_data(self.type_name(), name)),
        }
    }

    /// Invoke a method attribute with the given arguments.
    ///
    /// Fails with [`AttributeError::NotCallable`] if the name resolves to
    /// plain data.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, AttributeError> {
        match self.resolve(name)? {
            Attr::Method(f) => Ok(f(self, args)),
            Attr::Data(_) => Err(AttributeError::not_callable(self.type_name(), name)),
        }
    }

    /// Rebind `name` on this instance only.
    ///
    /// Used by [`monkey_patch`](crate::monkey_patch); the patch shadows
    /// whatever the backing type would resolve and may introduce a name the
    /// backing type never defined.
    pub(crate) fn set_patch(&self, name: String, attr: Attr) {
        self.patches.write().insert(name, attr);
    }

    fn resolve(&self, name: &str) -> Result<Attr, AttributeError> {
        let patched = self.patches.read().get(name).cloned();
        if let Some(attr) = patched {
            return Ok(attr);
        }

        match &self.backing {
            Backing::Concrete(ty) => ty
                .attr(name)
                .cloned()
                .ok_or_else(|| AttributeError::not_found(ty.name(), name)),
            Backing::Mock(inner) => inner.resolve(name),
        }
    }
}
