//! FFI surface of the director-of-studies console.

pub mod api;
