//! Owned string payload.

use std::fmt;
use std::ops::Deref;

/// Heap-allocated text exclusively owned by one `Value::Str`.
///
/// The constructor is `pub(super)`: text only enters a value through
/// `Value::string`, which duplicates the caller's buffer, so a `Value` never
/// aliases memory it does not own.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Text(Box<str>);

impl Text {
    pub(super) fn new(text: Box<str>) -> Self {
        Text(text)
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
