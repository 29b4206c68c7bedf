//! vhdlfmt Core Types and Definitions
//!
//! This crate provides the foundational types and definitions for the
//! vhdlfmt formatter. It includes:
//!
//! - **Tokens**: Classified lexical tokens with source positions ([`token`] module)
//! - **Registries**: The reserved-word and built-in type-name tables ([`registry`] module)
//! - **Configuration**: The formatter option record ([`config`] module)
//! - **Diagnostics**: Labeled errors and warnings ([`diagnostic`] module)

pub mod config;
pub mod diagnostic;
pub mod registry;
pub mod span;
pub mod token;
