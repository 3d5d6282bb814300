//! Core shared infrastructure
//!
//! @module core

pub mod error;
