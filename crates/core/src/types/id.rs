//! Integer identifiers handed out by the backend.
//!
//! Every record the API returns is keyed by an `i64`. Wrapping each kind in
//! its own type keeps a cart line id from being passed where a product id
//! belongs, which matters because the cart endpoints take both.

/// Declares one or more backend identifiers.
///
/// Each generated type wraps an `i64`, is `Copy`, hashes and compares by
/// value, and (de)serializes as the bare number. `Display`/`FromStr` let ids
/// round-trip through request paths and command-line arguments.
///
/// ```rust
/// # use black_excellence_core::backend_ids;
/// backend_ids! {
///     /// A sample.
///     SampleId,
///     /// A batch.
///     BatchId,
/// }
///
/// let sample = SampleId::new(3);
/// assert_eq!(sample.as_i64(), 3);
/// assert_eq!("3".parse::<BatchId>().map(i64::from), Ok(3));
/// ```
#[macro_export]
macro_rules! backend_ids {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {$(
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw backend id.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw backend id.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, out: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, out)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(text: &str) -> ::core::result::Result<Self, Self::Err> {
                text.trim().parse().map(Self)
            }
        }

        impl ::core::convert::From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl ::core::convert::From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    )+};
}

backend_ids! {
    /// An account.
    UserId,
    /// A marketplace listing.
    ProductId,
    /// One line in the signed-in user's cart. Not the product id.
    CartItemId,
    /// A placed order.
    OrderId,
    /// A historical figure.
    FigureId,
    /// A historical event.
    EventId,
    /// A subscription plan.
    PlanId,
    /// The account that listed a product.
    SellerId,
}
