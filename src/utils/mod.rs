// src/utils/mod.rs
//! Helper functions shared across the SDK.

pub mod http;
pub mod time;
