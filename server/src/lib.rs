//! Campus Portal backend: REST API over an in-memory store.

pub mod backend;
pub mod config;
