//! Reflective mock type generation for testing.
//!
//! Given a described source type, this crate generates a mock type that
//! preserves the source's attribute names while suppressing its behavior:
//! data attributes read as the `Null` sentinel and methods become no-ops
//! returning `Null`, unless a name is declared untouchable (preserved
//! verbatim) or monkey-patched with a custom replacement.
//!
//! # Architecture
//!
//! Rust has no runtime class object to walk, so source types are explicit
//! descriptors and mocks are dispatch tables consulted by a uniform
//! accessor:
//!
//! ```text
//! TypeDef ──generate_mock_type──▶ MockType ──instantiate──▶ Instance
//!    │                              │                          │
//!    │ name → Attr                  │ UntouchableRegistry      │ patch table
//!    └─ original attributes         └─ shared by instances     └─ per instance
//! ```
//!
//! Resolution order on an instance is: its own patch table, then the
//! backing type. A mock type resolves each name as the original attribute
//! when untouchable, otherwise as the inert stand-in. Names absent from
//! both fail with [`AttributeError::NotFound`]; mocks never fabricate
//! unknown attributes.
//!
//! # Usage
//!
//! ## Generating a mock
//!
//! ```rust
//! use mocksmith::{generate_mock_type, TypeDef, Value};
//!
//! let source = TypeDef::builder("Account")
//!     .data("balance", 100)
//!     .method("withdraw", |_instance, _args| Value::from(true))
//!     .build();
//!
//! let mock = generate_mock_type(&source);
//! let account = mock.instantiate();
//!
//! assert_eq!(account.get("balance").unwrap(), Value::Null);
//! assert_eq!(account.call("withdraw", &[]).unwrap(), Value::Null);
//! ```
//!
//! ## Preserving attributes
//!
//! Untouchable declarations live on the mock type and are consulted live,
//! so they apply to existing and future instances; the last declaration
//! wins. Magic names (`__like_this__`) are untouchable by default unless
//! explicitly declared touchable.
//!
//! ```rust
//! use mocksmith::{generate_mock_type, TypeDef, Value};
//!
//! let source = TypeDef::builder("Account").data("balance", 100).build();
//! let mock = generate_mock_type(&source);
//! mock.declare_untouchable("balance");
//!
//! assert_eq!(mock.instantiate().get("balance").unwrap(), Value::from(100));
//! ```
//!
//! ## Monkey-patching
//!
//! ```rust
//! use mocksmith::{generate_mock_type, mock_method, TypeDef, Value};
//!
//! let source = TypeDef::builder("Account")
//!     .method("withdraw", |_instance, _args| Value::from(true))
//!     .build();
//! let account = generate_mock_type(&source).instantiate();
//!
//! mock_method(&account, "withdraw", Value::from(false));
//! assert_eq!(account.call("withdraw", &[]).unwrap(), Value::from(false));
//! ```
//!
//! # Concurrency
//!
//! Everything is synchronous. Untouchable declarations and monkey patches
//! are individually locked, but configuration is not a transaction: finish
//! declaring before sharing instances across threads. Generated no-op
//! callables capture only their fixed return value and are safe to invoke
//! concurrently.

pub mod classifier;
pub mod errors;
pub mod generator;
pub mod instance;
pub mod patch;
pub mod registry;

pub use classifier::{classify, is_magic_name, AttrKind};
pub use errors::AttributeError;
pub use generator::{generate_mock_type, MockType};
pub use instance::{Attr, Instance, MethodFn, TypeDef, TypeDefBuilder};
pub use patch::{create_mock_function, mock_method, monkey_patch};
pub use registry::UntouchableRegistry;

/// The dynamic attribute value type; `Value::Null` is the sentinel that
/// suppressed attributes and methods produce.
pub use serde_json::Value;
