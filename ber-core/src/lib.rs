//! Core types and utilities for BER encoding
//!
//! This crate provides the error taxonomy and the object identifier value
//! type shared by the writer and by code that consumes its output.

pub mod error;
pub mod oid;

pub use error::{BerError, BerResult};
pub use oid::ObjectIdentifier;
