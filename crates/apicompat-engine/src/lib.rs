//! ApiCompat Engine - Orchestration layer
//!
//! Coordinates loading inputs through the store, configuring a run, and
//! driving the core comparison.

pub mod commands;
