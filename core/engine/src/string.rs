//! The UTF-16 string type of the engine.
//!
//! ECMAScript strings are sequences of 16-bit code units that are not
//! guaranteed to be valid UTF-16, so [`JsString`] stores raw code units and
//! only converts to and from Rust strings at the host boundary.

use crate::gc::{empty_trace, Finalize, Trace};
use std::{
    borrow::Borrow,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};

/// A UTF-16 encoded, reference counted, immutable string.
///
/// Cloning a `JsString` is cheap: it only bumps a reference count.
#[derive(Clone, Finalize)]
pub struct JsString {
    inner: Rc<[u16]>,
}

// Strings never contain GC'd objects.
unsafe impl Trace for JsString {
    empty_trace!();
}

/// Utility macro to create a [`JsString`].
///
/// # Examples
///
/// Create an empty string:
///
/// ```
/// # use krait_engine::{js_string, JsString};
/// let empty = js_string!();
/// assert!(empty.is_empty());
/// ```
///
/// Create a string from a literal and concatenate strings:
///
/// ```
/// # use krait_engine::{js_string, JsString};
/// let hello = js_string!("hello");
/// let world = js_string!("world");
/// assert_eq!(&js_string!(&hello, &world), "helloworld");
/// ```
#[macro_export]
macro_rules! js_string {
    () => {
        $crate::JsString::default()
    };
    ($s:expr) => {
        $crate::JsString::from($s)
    };
    ( $( $s:expr ),+ ) => {
        $crate::JsString::concat_array(&[ $( &$s[..] ),+ ])
    };
}

impl JsString {
    /// Creates a `JsString` from a slice of code units.
    #[must_use]
    pub fn from_slice(code_units: &[u16]) -> Self {
        Self {
            inner: Rc::from(code_units),
        }
    }

    /// Obtains the underlying code units.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.inner
    }

    /// Concatenates an array of code unit slices into a new `JsString`.
    #[must_use]
    pub fn concat_array(strings: &[&[u16]]) -> Self {
        let mut result = Vec::with_capacity(strings.iter().map(|s| s.len()).sum());
        for string in strings {
            result.extend_from_slice(string);
        }
        Self {
            inner: Rc::from(result),
        }
    }

    /// Returns the code unit at the given position, if in bounds.
    #[must_use]
    pub fn code_unit_at(&self, position: usize) -> Option<u16> {
        self.inner.get(position).copied()
    }

    /// Abstract operation `CodePointAt( string, position )`.
    ///
    /// Decodes the code point starting at `position`, returning an unpaired
    /// surrogate as-is.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-codepointat
    #[must_use]
    pub fn code_point_at(&self, position: usize) -> Option<CodePoint> {
        let first = self.code_unit_at(position)?;
        if let Some(second) = self.code_unit_at(position + 1) {
            if (0xD800..=0xDBFF).contains(&first) && (0xDC00..=0xDFFF).contains(&second) {
                let cp = 0x10000 + (u32::from(first) - 0xD800) * 0x400 + (u32::from(second) - 0xDC00);
                return Some(CodePoint::Unicode(
                    char::from_u32(cp).expect("surrogate pair must decode to a valid code point"),
                ));
            }
        }
        match char::from_u32(u32::from(first)) {
            Some(c) => Some(CodePoint::Unicode(c)),
            None => Some(CodePoint::UnpairedSurrogate(first)),
        }
    }

    /// Iterates over the code points of the string, decoding surrogate pairs
    /// and yielding unpaired surrogates as-is.
    pub fn code_points(&self) -> impl Iterator<Item = CodePoint> + '_ {
        let mut position = 0;
        std::iter::from_fn(move || {
            let cp = self.code_point_at(position)?;
            position += cp.code_unit_count();
            Some(cp)
        })
    }

    /// Decodes the string into a Rust `String`, replacing unpaired surrogates
    /// with the replacement character.
    #[must_use]
    pub fn to_std_string_escaped(&self) -> String {
        String::from_utf16_lossy(&self.inner)
    }

    /// Decodes the string into a Rust `String`, failing on unpaired
    /// surrogates.
    pub fn to_std_string(&self) -> Result<String, std::string::FromUtf16Error> {
        String::from_utf16(&self.inner)
    }

    /// Finds the first occurrence of `search` at or after `from`, in code
    /// units.
    #[must_use]
    pub fn index_of(&self, search: &[u16], from: usize) -> Option<usize> {
        let len = self.inner.len();
        if search.is_empty() {
            return (from <= len).then_some(from);
        }
        if from >= len || search.len() > len - from {
            return None;
        }
        (from..=len - search.len()).find(|&i| &self.inner[i..i + search.len()] == search)
    }

    /// Finds the last occurrence of `search` that starts at or before `from`,
    /// in code units.
    #[must_use]
    pub fn last_index_of(&self, search: &[u16], from: usize) -> Option<usize> {
        let len = self.inner.len();
        if search.is_empty() {
            return Some(from.min(len));
        }
        if search.len() > len {
            return None;
        }
        let last_start = from.min(len - search.len());
        (0..=last_start).rfind(|&i| &self.inner[i..i + search.len()] == search)
    }

    /// Repeats the string `n` times.
    #[must_use]
    pub fn repeat(&self, n: usize) -> Self {
        let mut result = Vec::with_capacity(self.inner.len() * n);
        for _ in 0..n {
            result.extend_from_slice(&self.inner);
        }
        Self {
            inner: Rc::from(result),
        }
    }

    /// Returns the substring in `[start, end)`, clamped to the string bounds.
    #[must_use]
    pub fn substring(&self, start: usize, end: usize) -> Self {
        let len = self.inner.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        Self::from_slice(&self.inner[start..end])
    }

    /// Checks if a `char` is trimmable whitespace per the `TrimString`
    /// abstract operation.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-trimstring
    #[must_use]
    pub fn is_trimmable_whitespace(c: char) -> bool {
        // The rust implementation of `trim_matches` does not include the
        // LINE SEPARATOR, PARAGRAPH SEPARATOR or ZWNBSP characters.
        matches!(
            c,
            '\u{0009}' | '\u{000B}' | '\u{000C}' | '\u{0020}' | '\u{00A0}' | '\u{FEFF}' |
            '\u{000A}' | '\u{000D}' | '\u{2028}' | '\u{2029}' |
            // Unicode Space_Separator category
            '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
        )
    }

    /// Checks if a code unit is trimmable whitespace.
    pub(crate) fn is_trimmable_whitespace_code_unit(unit: u16) -> bool {
        char::from_u32(u32::from(unit)).is_some_and(Self::is_trimmable_whitespace)
    }

    /// Returns the string with trimmable whitespace removed from both ends.
    #[must_use]
    pub fn trim(&self) -> Self {
        self.trim_start().trim_end()
    }

    /// Returns the string with leading trimmable whitespace removed.
    #[must_use]
    pub fn trim_start(&self) -> Self {
        let start = self
            .inner
            .iter()
            .position(|&u| !Self::is_trimmable_whitespace_code_unit(u))
            .unwrap_or(self.inner.len());
        Self::from_slice(&self.inner[start..])
    }

    /// Returns the string with trailing trimmable whitespace removed.
    #[must_use]
    pub fn trim_end(&self) -> Self {
        let end = self
            .inner
            .iter()
            .rposition(|&u| !Self::is_trimmable_whitespace_code_unit(u))
            .map_or(0, |p| p + 1);
        Self::from_slice(&self.inner[..end])
    }
}

impl Default for JsString {
    fn default() -> Self {
        Self {
            inner: Rc::from([].as_slice()),
        }
    }
}

impl Deref for JsString {
    type Target = [u16];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Borrow<[u16]> for JsString {
    fn borrow(&self) -> &[u16] {
        &self.inner
    }
}

impl From<&str> for JsString {
    fn from(string: &str) -> Self {
        Self {
            inner: Rc::from(string.encode_utf16().collect::<Vec<u16>>()),
        }
    }
}

impl From<String> for JsString {
    fn from(string: String) -> Self {
        Self::from(string.as_str())
    }
}

impl From<&[u16]> for JsString {
    fn from(code_units: &[u16]) -> Self {
        Self::from_slice(code_units)
    }
}

impl From<Vec<u16>> for JsString {
    fn from(code_units: Vec<u16>) -> Self {
        Self {
            inner: Rc::from(code_units),
        }
    }
}

impl From<char> for JsString {
    fn from(c: char) -> Self {
        let mut buf = [0u16; 2];
        Self::from_slice(c.encode_utf16(&mut buf))
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for JsString {}

impl PartialOrd for JsString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JsString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Hash for JsString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.inner.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_std_string_escaped().fmt(f)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_std_string_escaped(), f)
    }
}

/// A Unicode scalar value or an unpaired surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePoint {
    /// A valid Unicode scalar value.
    Unicode(char),
    /// An unpaired surrogate.
    UnpairedSurrogate(u16),
}

impl CodePoint {
    /// Gets the number of UTF-16 code units needed to encode this code point.
    #[must_use]
    pub fn code_unit_count(self) -> usize {
        match self {
            Self::Unicode(c) => c.len_utf16(),
            Self::UnpairedSurrogate(_) => 1,
        }
    }

    /// Gets the numeric value of the code point.
    #[must_use]
    pub fn as_u32(self) -> u32 {
        match self {
            Self::Unicode(c) => u32::from(c),
            Self::UnpairedSurrogate(surr) => u32::from(surr),
        }
    }

    /// Retrieves the code point as a `char`, if it is a valid scalar value.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Unicode(c) => Some(c),
            Self::UnpairedSurrogate(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let s = js_string!();
        assert!(s.is_empty());
        assert_eq!(&s, "");
    }

    #[test]
    fn concat() {
        let a = js_string!("foo");
        let b = js_string!("bar");
        assert_eq!(&js_string!(&a, &b), "foobar");
    }

    #[test]
    fn index_of_finds_first_occurrence() {
        let s = js_string!("abcabc");
        let needle: Vec<u16> = "bc".encode_utf16().collect();
        assert_eq!(s.index_of(&needle, 0), Some(1));
        assert_eq!(s.index_of(&needle, 2), Some(4));
        assert_eq!(s.index_of(&needle, 5), None);
    }

    #[test]
    fn last_index_of_respects_bound() {
        let s = js_string!("abcabc");
        let needle: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(s.last_index_of(&needle, 5), Some(3));
        assert_eq!(s.last_index_of(&needle, 2), Some(0));
    }

    #[test]
    fn code_points_decode_pairs() {
        let s = js_string!("a𝄞");
        let points: Vec<_> = s.code_points().collect();
        assert_eq!(
            points,
            vec![CodePoint::Unicode('a'), CodePoint::Unicode('𝄞')]
        );
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn unpaired_surrogate_roundtrip() {
        let s = JsString::from_slice(&[0xD800, 0x0061]);
        let points: Vec<_> = s.code_points().collect();
        assert_eq!(
            points,
            vec![CodePoint::UnpairedSurrogate(0xD800), CodePoint::Unicode('a')]
        );
    }

    #[test]
    fn trim_removes_ecma_whitespace() {
        let s = js_string!("\u{FEFF}\t hi \u{2028}");
        assert_eq!(&s.trim(), "hi");
    }
}
