//! Core domain types
//!
//! Records owned by the CDS API. The client relays them between caller and
//! server and never rewrites them, so every record keeps the fields it does
//! not know about.

pub mod action;
pub mod audit;
pub mod usage;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default
///
/// The API writes empty lists as `null`, so collections accept both.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
