//! Property attribute flags.

use crate::gc::{empty_trace, Finalize, Trace};
use bitflags::bitflags;

bitflags! {
    /// The attribute flags of a property, as described in the
    /// [ECMAScript specification][spec].
    ///
    /// The zero aliases (`READONLY`, `NON_ENUMERABLE`, `PERMANENT`) exist so
    /// call sites can spell out the *absence* of a flag.
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-property-attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Finalize)]
    pub struct Attribute: u8 {
        /// None of the flags are present.
        const NONE = 0b0000_0000;

        /// The property is not writable.
        const READONLY = 0b0000_0000;

        /// The value associated with the property can be changed with `[[Set]]`.
        const WRITABLE = 0b0000_0001;

        /// The property cannot be enumerated in a `for-in` loop.
        const NON_ENUMERABLE = 0b0000_0000;

        /// The property can be enumerated by a `for-in` loop.
        const ENUMERABLE = 0b0000_0010;

        /// The property descriptor cannot be changed nor deleted.
        const PERMANENT = 0b0000_0000;

        /// The property descriptor can be changed or the property deleted.
        const CONFIGURABLE = 0b0000_0100;
    }
}

// SAFETY: `Attribute` only contains an `u8`, so an empty trace is sound.
unsafe impl Trace for Attribute {
    empty_trace!();
}

impl Attribute {
    /// Gets the `writable` flag.
    #[must_use]
    pub const fn writable(self) -> bool {
        self.contains(Self::WRITABLE)
    }

    /// Gets the `enumerable` flag.
    #[must_use]
    pub const fn enumerable(self) -> bool {
        self.contains(Self::ENUMERABLE)
    }

    /// Gets the `configurable` flag.
    #[must_use]
    pub const fn configurable(self) -> bool {
        self.contains(Self::CONFIGURABLE)
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::NONE
    }
}
