//! Core traits and types for trigger configuration extraction
//!
//! This crate provides foundational types used across all other crates:
//! - The [`ParameterTree`] capability trait over hierarchical configuration
//! - Typed value extraction ([`FromParameter`])
//! - Tree identity tokens
//! - Input tags and fractional prescales
//! - Error types

pub mod error;
pub mod identity;
pub mod input_tag;
pub mod prescale;
pub mod traits;

pub use error::{Error, Result};
pub use identity::TreeId;
pub use input_tag::InputTag;
pub use prescale::FractionalPrescale;

pub use traits::{FromParameter, ParamKind, ParameterTree};
