//! Shared configuration and error handling for Curio
//!
//! This crate provides functionality used across the Curio client:
//! - Application configuration following 12-factor principles
//! - The transport and operation error taxonomy

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result, TransportError};
