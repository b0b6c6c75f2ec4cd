//! Screen components.

pub mod alerts;

pub use alerts::AlertsScreen;
