//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct use in observation rows via `id.0 as f64`, but callers should
//! prefer the named accessors for clarity.
//!
//! Unlike a dense-index scheme, both ID spaces here reserve **zero** as a
//! domain sentinel: action encoding uses hospital id 0 for "no action", and
//! district code 0 marks geometry that falls outside every configured
//! district polygon.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    (
        $(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);
        $(#[$sattr:meta])* sentinel = $sentinel:ident;
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            $(#[$sattr])*
            pub const $sentinel: $name = $name(0);

            /// `true` if this is the reserved zero sentinel.
            #[inline(always)]
            pub fn is_sentinel(self) -> bool {
                self.0 == 0
            }
        }

        impl Default for $name {
            /// Returns the sentinel so uninitialized IDs are visibly inert.
            #[inline(always)]
            fn default() -> Self {
                Self(0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for f64 {
            /// Observation tables are plain `f64` matrices.
            #[inline(always)]
            fn from(id: $name) -> f64 {
                id.0 as f64
            }
        }
    };
}

typed_id! {
    /// Identifier of a hospital, as assigned by the city configuration.
    pub struct HospitalId(u32);
    /// The null-action sentinel: "dispatch from/to no hospital".
    sentinel = NULL;
}

typed_id! {
    /// Identifier of a geographic district, as assigned by the city
    /// configuration and the district polygon dataset.
    pub struct DistrictCode(u16);
    /// Marks points and route residue outside every configured district.
    sentinel = UNASSIGNED;
}
