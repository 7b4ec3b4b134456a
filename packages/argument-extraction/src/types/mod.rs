//! Domain types for argument-map extraction.

pub mod argument_map;
pub mod config;
pub mod decision;
pub mod difficulty;
pub mod quality;
pub mod strategy;
