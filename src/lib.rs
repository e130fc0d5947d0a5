//! Docker build steps: configure a Docker client from connection settings and
//! registry credentials, then run a goal with it.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod goals;
pub mod ports;
