//! Request and response records of the consent web API.
//!
//! # Design
//! Request records serialize to exactly the JSON body the service expects
//! (camelCase keys, optional fields omitted when unset). Response records
//! are lenient: unknown fields are ignored and most fields default, but the
//! shapes that matter are checked at decode time instead of trusted.
//! Integer-coded enums use `wire_enum!` so an unknown code is a decode
//! error rather than a silently wrong variant.

/// Declares a fieldless enum carried on the wire as its integer code.
///
/// Attributes pass through to the enum and its variants, so
/// `#[derive(Default)]` with a `#[default]` variant works as usual.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$variant_meta:meta])* $variant:ident = $code:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$variant_meta])* $variant = $code,)+
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(format!("unknown {} code {other}", stringify!($name))),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

mod configuration;
mod consent;
mod location;
mod qr;
mod report;
mod rights;
mod subscriptions;

pub use configuration::*;
pub use consent::*;
pub use location::*;
pub use qr::PreferenceQrRequest;
pub use report::WebReportRequest;
pub use rights::{DataSubject, InvokeRightRequest};
pub use subscriptions::*;
