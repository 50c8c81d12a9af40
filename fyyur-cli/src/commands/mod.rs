//! Command implementations for fyyur CLI

pub mod serve;

pub use serve::run_serve;
