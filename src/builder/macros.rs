//! Macros for ergonomic state declaration.

/// Declare a fieldless enum usable as a machine state.
///
/// The enum derives everything a state needs (plus serde), and gets an
/// `ALL` constant listing its variants in declaration order and a `name`
/// method returning the variant name.
///
/// # Example
///
/// ```
/// use esm::state_enum;
///
/// state_enum! {
///     pub enum Phase {
///         Handshake,
///         Transfer,
///         Closed,
///     }
/// }
///
/// assert_eq!(Phase::ALL, &[Phase::Handshake, Phase::Transfer, Phase::Closed]);
/// assert_eq!(Phase::Transfer.name(), "Transfer");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// The variant name.
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
