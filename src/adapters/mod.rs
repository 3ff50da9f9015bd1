// Adapters layer: concrete implementations for external systems.

pub mod relay;

pub use relay::{DryRunRelay, HttpMailRelay};
