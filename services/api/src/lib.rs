//! services/api/src/lib.rs
//!
//! The ThriftLife REST backend: donation pickups, the thrift catalog, donor
//! profiles and impact statistics, served over axum.

pub mod adapters;
pub mod config;
pub mod error;
pub mod seed;
pub mod web;
