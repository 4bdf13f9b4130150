//! Macro for implementing wire-name conversions for small domain enums
//!
//! Several domain enums travel as short lowercase strings (plan status,
//! weekend day, permission state). This macro generates `as_str`, `Display`
//! and case-insensitive `FromStr` from a single variant table.
//!
//! # Example
//!
//! ```rust
//! use weekender_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mood {
//!     Rested,
//!     Busy,
//! }
//!
//! impl_wire_name_conversions!(Mood {
//!     Rested => "rested",
//!     Busy => "busy",
//! });
//!
//! assert_eq!(Mood::Busy.as_str(), "busy");
//! assert_eq!("RESTED".parse::<Mood>(), Ok(Mood::Rested));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a fieldless enum.
///
/// Parsing trims surrounding whitespace and ignores case. Unknown values
/// produce an error message naming the enum.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Stable lowercase wire name.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
