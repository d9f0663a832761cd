//! Macros for ergonomic state key declaration.

/// Declare a field-less enum and implement `StateKey` for it.
///
/// The enum derives every trait `StateKey` requires (plus `Copy`), and
/// `name()` returns the variant identifier.
///
/// # Example
///
/// ```
/// use stance::core::StateKey;
/// use stance::state_key;
///
/// state_key! {
///     pub enum Gait {
///         Idle,
///         Walk,
///         Run,
///     }
/// }
///
/// assert_eq!(Gait::Walk.name(), "Walk");
/// ```
#[macro_export]
macro_rules! state_key {
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
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateKey for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
