use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use git2::Oid;
use std::cell::{Cell, RefCell};

/// Mock repository for testing without actual git operations
///
/// Write operations are recorded as short descriptions ("stage", "commit
/// <message>", "push origin main") so tests can check what happened and in
/// which order.
pub struct MockRepository {
    latest_tag: Option<String>,
    branch: String,
    has_changes: bool,
    fail_fetch: bool,
    fail_tag_lookup: bool,
    fail_push: bool,
    operations: RefCell<Vec<String>>,
    commit_count: Cell<u8>,
}

impl MockRepository {
    /// Create a new mock repository on branch `main` with no tags and pending changes
    pub fn new() -> Self {
        MockRepository {
            latest_tag: None,
            branch: "main".to_string(),
            has_changes: true,
            fail_fetch: false,
            fail_tag_lookup: false,
            fail_push: false,
            operations: RefCell::new(Vec::new()),
            commit_count: Cell::new(0),
        }
    }

    /// Set the tag reported as the latest one
    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Pretend the working tree matches HEAD
    pub fn without_changes(mut self) -> Self {
        self.has_changes = false;
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn failing_tag_lookup(mut self) -> Self {
        self.fail_tag_lookup = true;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Recorded operations, in order
    pub fn operations(&self) -> Vec<String> {
        self.operations.borrow().clone()
    }

    fn record(&self, operation: String) {
        self.operations.borrow_mut().push(operation);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.record(format!("fetch {}", remote));
        if self.fail_fetch {
            return Err(ReleaseError::remote(format!(
                "Failed to fetch tags from '{}': simulated",
                remote
            )));
        }
        Ok(())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        if self.fail_tag_lookup {
            return Err(ReleaseError::tag("simulated lookup failure"));
        }
        Ok(self.latest_tag.clone())
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage".to_string());
        Ok(())
    }

    fn commit(&self, message: &str, allow_empty: bool) -> Result<Oid> {
        if !self.has_changes && !allow_empty {
            return Err(ReleaseError::commit("nothing to commit, working tree clean"));
        }
        self.record(format!("commit {}", message.trim_end()));

        let n = self.commit_count.get().wrapping_add(1);
        self.commit_count.set(n);
        Ok(Oid::from_bytes(&[n; 20])?)
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        if self.fail_push {
            return Err(ReleaseError::remote(format!(
                "Failed to push '{}' to '{}': simulated",
                branch, remote
            )));
        }
        self.record(format!("push {} {}", remote, branch));
        Ok(())
    }
}
