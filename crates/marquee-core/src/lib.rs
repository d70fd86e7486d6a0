//! Core domain model for marquee.
//!
//! This crate defines the venue, artist and show records, the SQLite
//! schema with its migrations, and the transactional entity store every
//! other layer reads from and writes through.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use schema::Database;
