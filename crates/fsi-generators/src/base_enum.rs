//! Weighted-random selection over enumerations.
//!
//! Most categorical columns (account types, loan statuses, card networks)
//! are drawn from an enum whose variants carry the value stored in the
//! database and a relative weight. Declare them with [`weighted_enum!`]:
//!
//! ```rust
//! use fsi_generators::weighted_enum;
//! use fsi_generators::base_enum::WeightedEnum;
//! use rand::SeedableRng;
//!
//! weighted_enum! {
//!     pub enum CardType {
//!         Debit => "Debit" @ 70,
//!         Credit => "Credit" @ 30,
//!     }
//! }
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let card = CardType::random(&mut rng);
//! assert!(matches!(card.as_str(), "Debit" | "Credit"));
//! ```

use rand::Rng;

/// An enumeration whose variants can be drawn at random by weight.
pub trait WeightedEnum: Copy + Sized + 'static {
    /// All variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// Relative weight of this variant. Zero means never drawn by `random`.
    fn weight(&self) -> u32;

    /// Value stored in the database for this variant.
    fn as_str(&self) -> &'static str;

    /// Draw a variant with probability proportional to its weight.
    ///
    /// Falls back to a uniform draw when every weight is zero.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: u32 = Self::VARIANTS.iter().map(|v| v.weight()).sum();
        if total == 0 {
            return Self::random_uniform(rng);
        }

        let mut roll = rng.random_range(0..total);
        for variant in Self::VARIANTS {
            let weight = variant.weight();
            if roll < weight {
                return *variant;
            }
            roll -= weight;
        }
        Self::VARIANTS[Self::VARIANTS.len() - 1]
    }

    /// Draw a variant ignoring weights.
    fn random_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::VARIANTS[rng.random_range(0..Self::VARIANTS.len())]
    }

    /// Parse a stored database value back into a variant.
    fn from_db_value(value: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == value)
    }
}

/// Declare a [`WeightedEnum`].
///
/// Each entry is `Variant => "stored value" @ weight`. The macro also
/// implements `Display` and `From<Enum> for GeneratedValue`.
#[macro_export]
macro_rules! weighted_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal @ $weight:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl $crate::base_enum::WeightedEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn weight(&self) -> u32 {
                match self {
                    $(Self::$variant => $weight),+
                }
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::base_enum::WeightedEnum::as_str(self))
            }
        }

        impl ::std::convert::From<$name> for $crate::GeneratedValue {
            fn from(value: $name) -> Self {
                $crate::GeneratedValue::String(
                    $crate::base_enum::WeightedEnum::as_str(&value).to_string(),
                )
            }
        }
    };
}
