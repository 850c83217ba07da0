//! Attribute classification.
//!
//! Pure helpers that decide, for a (name, value) pair taken from a source
//! type, whether the attribute is a reserved "magic" name, a callable
//! method, or plain data. The generator uses the result to pick the inert
//! stand-in; the registry uses [`is_magic_name`] to realize the
//! magic-names-preserved-by-default policy.

use crate::instance::Attr;

/// The delimiter character that wraps magic names.
const MAGIC_DELIMITER: u8 = b'_';

/// Length of the delimiter run on each side of a magic name.
const MAGIC_RUN_LEN: usize = 2;

/// The category of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// A reserved name wrapped in the canonical delimiter runs.
    Magic,
    /// A method-valued attribute.
    Callable,
    /// A data-valued attribute.
    Plain,
}

/// Whether `name` is a reserved "magic" name.
///
/// A name is magic iff its leading and trailing underscore runs are both
/// exactly two characters long and a non-empty body sits between them.
/// Runs of any other length disqualify the name: `__class__` is magic,
/// `___x___` is not, and `____` is not (the runs merge).
pub fn is_magic_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let leading = bytes.iter().take_while(|&&b| b == MAGIC_DELIMITER).count();
    let trailing = bytes
        .iter()
        .rev()
        .take_while(|&&b| b == MAGIC_DELIMITER)
        .count();

    leading == MAGIC_RUN_LEN && trailing == MAGIC_RUN_LEN && bytes.len() > 2 * MAGIC_RUN_LEN
}

/// Classify a (name, value) pair from a source type.
///
/// Magic names win over value shape; non-magic names are classified by
/// whether the bound value is callable.
pub fn classify(name: &str, attr: &Attr) -> AttrKind {
    if is_magic_name(name) {
        AttrKind::Magic
    } else if attr.is_callable() {
        AttrKind::Callable
    } else {
        AttrKind::Plain
    }
}
