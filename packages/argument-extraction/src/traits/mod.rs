//! Core trait abstractions.

pub mod engine;
