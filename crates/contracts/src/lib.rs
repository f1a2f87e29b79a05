//! Wire contracts shared between the objects catalog frontend and its backend.
//!
//! - `domain`: aggregates and reference catalogs (a001..a006)
//! - `shared`: response envelopes, pagination, serde helpers

pub mod domain;
pub mod shared;
