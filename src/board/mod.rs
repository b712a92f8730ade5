//! Board geometry.
//!
//! The board is shared and immutable: one circular path, a safe-cell set
//! and a private home stretch per color. It is derived from `RuleConfig`
//! once and never owned by a single match.

pub mod topology;

pub use topology::{TokenLocation, Topology};
