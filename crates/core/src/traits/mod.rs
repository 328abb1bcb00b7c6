//! Core traits for configuration extraction
//!
//! The extraction pipeline never binds to a concrete tree format. Every
//! backend implements [`ParameterTree`] and values are read through
//! [`FromParameter`], which lets tests substitute mock trees.

mod parameter_tree;

pub use parameter_tree::{FromParameter, ParamKind, ParameterTree};
