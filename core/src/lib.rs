//! vatcheck-core: NIP normalization, registry verification and spreadsheet batch handling.
//!
//! Front ends (`cli`) and registry implementations (`plugins`) should import from
//! [`api`] instead of reaching into internal modules.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod nip;
pub mod sheet;
pub mod store;
pub mod verify;
