//! Domain values shared by the Black Excellence History client and CLI.
//!
//! Nothing here performs I/O. The crate holds the backend's identifiers,
//! money and quantity values, the registration email check, and the status
//! enums that arrive on orders and accounts, so `black-excellence-client`
//! and `black-excellence-cli` agree on one definition of each.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
