//! Closed string enums
//!
//! Every enum in the data model serializes as an exact, case-sensitive
//! literal. The schema layer needs the literal list for error messages, so
//! the list and the serde names come from one declaration.

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lit)] $variant ),+
        }

        impl $name {
            /// Accepted literals, in declaration order
            pub const VALUES: &'static [&'static str] = &[$($lit),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $lit ),+
                }
            }

            /// Exact, case-sensitive match against the accepted literals
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $lit => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
