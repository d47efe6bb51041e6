//! A small feed-forward network trained on MNIST with [burn].
//!
//! The crate is intentionally thin: batching, model topology and the
//! training/inference wiring live here, while tensor operations, automatic
//! differentiation, the optimizer and dataset caching all come from the
//! framework.

pub mod data;
pub mod inference;
pub mod model;
pub mod show;
pub mod training;
