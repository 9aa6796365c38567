//! Bundled-skill library: list, load, and install curated skills, and
//! materialize project templates that reference them.
//!
//! The library carries its own category vocabulary, independent of the
//! loader's; the two are parallel external contracts and are deliberately
//! not unified.

pub mod library;
pub mod project;
pub mod types;

pub use library::{LibrarySkill, SkillsLibrary};
