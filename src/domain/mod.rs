//! Domain logic - pure release rules independent of git and external tools

pub mod tag;
pub mod version;

pub use tag::{resolve_latest_version, ResolvedTag, Tag, TagPattern};
pub use version::{BumpMode, Version};
