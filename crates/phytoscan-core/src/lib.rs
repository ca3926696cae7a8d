//! Phytoscan Core
//!
//! Core types, traits, and utilities shared across Phytoscan components.
//!
//! This crate provides:
//! - The token, classification, and four-bucket result types
//! - Error types and result handling
//! - Collaborator traits for image capture and text recognition

pub mod collaborators;
pub mod error;
pub mod types;

pub use collaborators::{ImageSource, TextRecognizer};
pub use error::{Error, Result};
pub use types::{
    Bucket, Classification, ClassificationResult, PhytochemicalEntry, PlantCompounds, ScanStats,
    Token, TokenOutcome,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collaborators::{ImageSource, TextRecognizer};
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        Bucket, Classification, ClassificationResult, PhytochemicalEntry, ScanStats, Token,
    };
}
