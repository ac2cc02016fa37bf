//! Ports (trait boundaries) between the engines and their drivers.
//!
//! Drivers (a UI, the CLI, the evaluation pipeline) depend on these traits
//! rather than on a concrete engine.

pub mod observer;
pub mod strategy;

pub use observer::TrainingObserver;
pub use strategy::Strategy;
