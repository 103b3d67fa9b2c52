//! Regular expression flag parsing.

use crate::gc::{empty_trace, Finalize, Trace};
use bitflags::bitflags;
use std::str::FromStr;

bitflags! {
    /// The flags of a regular expression.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Finalize)]
    pub struct RegExpFlags: u8 {
        /// Whether to test the regular expression against all possible
        /// matches in a string.
        const GLOBAL = 0b0000_0001;

        /// Whether to ignore case while attempting a match in a string.
        const IGNORE_CASE = 0b0000_0010;

        /// Whether to treat a multiline input as multiple lines.
        const MULTILINE = 0b0000_0100;

        /// Whether `.` matches newlines.
        const DOT_ALL = 0b0000_1000;

        /// Whether to treat the pattern as a sequence of Unicode code points.
        const UNICODE = 0b0001_0000;

        /// Whether the search is sticky.
        const STICKY = 0b0010_0000;
    }
}

unsafe impl Trace for RegExpFlags {
    empty_trace!();
}

impl FromStr for RegExpFlags {
    type Err = std::string::String;

    /// Parses a flag string, rejecting unknown and repeated flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::empty();
        for c in s.chars() {
            let new_flag = match c {
                'g' => Self::GLOBAL,
                'i' => Self::IGNORE_CASE,
                'm' => Self::MULTILINE,
                's' => Self::DOT_ALL,
                'u' => Self::UNICODE,
                'y' => Self::STICKY,
                _ => return Err(format!("invalid regular expression flag {c}")),
            };
            if flags.contains(new_flag) {
                return Err(format!("repeated regular expression flag {c}"));
            }
            flags.insert(new_flag);
        }
        Ok(flags)
    }
}

impl RegExpFlags {
    /// Renders the flags in the canonical `gimsuy` order.
    #[must_use]
    pub fn to_flag_string(self) -> std::string::String {
        let mut result = std::string::String::with_capacity(6);
        if self.contains(Self::GLOBAL) {
            result.push('g');
        }
        if self.contains(Self::IGNORE_CASE) {
            result.push('i');
        }
        if self.contains(Self::MULTILINE) {
            result.push('m');
        }
        if self.contains(Self::DOT_ALL) {
            result.push('s');
        }
        if self.contains(Self::UNICODE) {
            result.push('u');
        }
        if self.contains(Self::STICKY) {
            result.push('y');
        }
        result
    }
}
