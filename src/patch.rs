//! Monkey-patch helpers: post-hoc rebinding of a single named attribute on
//! a live instance.
//!
//! Patches land in the instance's own dispatch table, which attribute
//! resolution consults before the backing type, so rebinding never
//! regenerates the type and never leaks to other instances. The helpers
//! work on mock and non-mock instances alike.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::instance::{Attr, Instance, MethodFn};

/// Rebind `target`'s attribute `name` to `replacement`.
///
/// The replacement may be a data value or a method; a method replacement
/// receives the instance as its first argument when invoked, like any
/// other bound method. The name does not have to exist on the backing
/// type; patching can inject brand-new attributes.
pub fn monkey_patch(target: &Instance, name: impl Into<String>, replacement: impl Into<Attr>) {
    let name = name.into();
    debug!(
        instance_type = target.type_name(),
        name = name.as_str(),
        "monkey patched attribute"
    );
    target.set_patch(name, replacement.into());
}

/// Build an instance-bound callable that ignores all arguments and always
/// returns `return_value`.
pub fn create_mock_function(return_value: Value) -> MethodFn {
    Arc::new(move |_instance, _args| return_value.clone())
}

/// Rebind `target`'s attribute `name` to a method that ignores all
/// arguments and returns `return_value`.
///
/// Convenience over [`monkey_patch`] + [`create_mock_function`]; works for
/// any value, including `Value::Null`.
pub fn mock_method(target: &Instance, name: impl Into<String>, return_value: impl Into<Value>) {
    monkey_patch(
        target,
        name,
        Attr::Method(create_mock_function(return_value.into())),
    );
}
