//! Core types and traits for the trading journal.
//!
//! This crate provides the foundational building blocks including:
//! - The validated trade record and its closed label enums
//! - Input validation from raw drafts
//! - Filters and storage traits for trades and images

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, JournalError, JournalResult, StorageError, ValidationError};
pub use traits::*;
pub use types::*;
