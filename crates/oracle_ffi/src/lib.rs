//! Flutter-facing bindings for the Oracle task core.

pub mod api;
