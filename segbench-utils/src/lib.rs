//! Utility library for the segbench project

pub mod stats;
