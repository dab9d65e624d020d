//! Intermediate representation.
//!
//! The IR exists in three forms, bridged in one direction only:
//!
//! - `ir`   — the value-level program model and its textual rendering.
//! - `emit` — lowering from the AST into the value-level model (and from
//!   there to the canonical text).
//! - `text` — re-parsing of the textual IR into the value-level model.
//! - `raw`  — the arena-indexed "raw program" the backend traverses.

pub mod emit;
pub mod ir;
pub mod raw;
pub mod text;

pub use ir::*;
