//! User interface module.
//!
//! Releases run unattended, so there are no prompts: this module only reports
//! progress. `formatter` holds the printing functions.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command, display_error, display_proposed_tag,
    display_release_plan, display_status, display_success,
};
