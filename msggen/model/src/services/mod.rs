//! Bundled service definitions.
//!
//! Each submodule exposes a `define_*_service()` constructor returning a
//! fully built [`Service`](crate::Service).

pub mod lightning;
