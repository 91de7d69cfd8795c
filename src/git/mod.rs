//! Git operations abstraction layer
//!
//! The release workflow only talks to source control through the
//! [Repository] trait. Two implementations exist:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! ```rust,no_run
//! # use tex_release::git::{Git2Repository, Repository};
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Git2Repository::open(".")?;
//! repo.fetch_tags("origin")?;
//! if let Some(tag) = repo.latest_tag()? {
//!     println!("latest tag: {}", tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Source-control operations needed to cut a release.
///
/// All methods return [crate::error::Result<T>]; implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::ReleaseError] variants.
pub trait Repository {
    /// Fetch all tags from `remote` (like `git fetch --tags`)
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Most recent tag reachable from HEAD (like `git describe --tags --abbrev=0`)
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The nearest tag name
    /// * `Ok(None)` - If no tag is reachable or HEAD has no commits yet
    /// * `Err` - For any other git failure
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Stage every change in the working tree (like `git add .`)
    fn stage_all(&self) -> Result<()>;

    /// Commit the index on top of HEAD
    ///
    /// Fails when the index holds no change relative to HEAD, unless
    /// `allow_empty` is set.
    fn commit(&self, message: &str, allow_empty: bool) -> Result<Oid>;

    /// Name of the branch HEAD points to
    fn current_branch(&self) -> Result<String>;

    /// Push `branch` to the same-named branch on `remote`
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;
}
