//! Command implementations for the reclaim CLI

pub mod delete;
pub mod helpers;
