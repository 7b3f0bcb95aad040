//! Candidate extraction from energy fields.

pub mod minima;

pub use minima::{find_local_minima, Minimum};
