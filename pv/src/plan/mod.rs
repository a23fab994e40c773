//! Plan normalization
//!
//! Turns the loosely-shaped JSON document returned by the planning
//! service into a fixed, renderable set of sections. The document is kept
//! as a generic `serde_json::Value` at the boundary; everything typed
//! lives on this side of it.

mod breakdown;
mod content;
pub mod probe;
mod sections;

pub use breakdown::{Breakdown, Dependencies, FileRecord};
pub use content::{Fact, SafeContent};
pub use sections::{Block, DirEntry, FileEntry, Section, SectionKind, resolve_sections};
