//! Patchboard Core Types and Definitions
//!
//! This crate provides the foundational types for the Patchboard sketch
//! compiler. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Snapshot**: The canvas export data model ([`snapshot`] module)
//! - **Patch**: The semantic patch model consumed by the compiler
//!   ([`patch`] module)

pub mod identifier;
pub mod patch;
pub mod snapshot;
