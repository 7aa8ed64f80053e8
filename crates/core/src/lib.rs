//! Core types and helpers for vecstore
//!
//! Domain types, configuration and the pgvector literal codec shared by the
//! storage, embeddings and CLI crates.

mod config;
mod constants;
mod env_config;
mod error;
mod item;
mod vector;

pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use item::*;
pub use vector::*;
