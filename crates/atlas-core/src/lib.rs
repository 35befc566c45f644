//! # atlas-core
//!
//! Core types shared by the Atlas Checks tooling crates.
//!
//! This crate provides:
//! - [`FlagRecord`], one line of an Atlas Checks `.log` file
//! - Log attribute names used to reach into flag properties
//! - The challenge [`Difficulty`] and [`DefaultPriority`] lookup tables
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod flag;

pub use enums::{DefaultPriority, Difficulty};
pub use errors::CoreError;
pub use flag::{FlagRecord, format_identifiers};
