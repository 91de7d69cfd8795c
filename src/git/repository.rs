use crate::error::{ReleaseError, Result};
use git2::{
    Commit, Cred, CredentialType, DescribeFormatOptions, DescribeOptions, ErrorCode, FetchOptions,
    IndexAddOption, Oid, PushOptions, RemoteCallbacks, Repository as Git2Repo,
};
use std::cell::Cell;
use std::path::Path;

/// libgit2 keeps asking for credentials while they are rejected; give up after this many
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Remote callbacks with credential lookup.
    ///
    /// Tries SSH keys from ~/.ssh/, then the SSH agent, then git's credential
    /// helpers for HTTPS remotes, then default credentials.
    fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let attempts = Cell::new(0usize);
        let git_config = self.repo.config().ok();

        callbacks.credentials(move |url, username_from_url, allowed_types| {
            attempts.set(attempts.get() + 1);
            if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(config) = git_config.as_ref() {
                    if let Ok(cred) = Cred::credential_helper(config, url, username_from_url) {
                        return Ok(cred);
                    }
                }
            }

            Cred::default()
        });

        callbacks
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut remote_handle = self.repo.find_remote(remote).map_err(|e| {
            ReleaseError::remote(format!("Cannot find remote '{}': {}", remote, e))
        })?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(self.remote_callbacks());

        remote_handle
            .fetch(
                // Not forced: a local tag that differs from the remote one is kept
                &["refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| {
                ReleaseError::remote(format!("Failed to fetch tags from '{}': {}", remote, e))
            })?;

        Ok(())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::UnbornBranch => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        // abbreviated size 0 prints the bare tag name, without -N-gSHA
        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        let tag = describe
            .format(Some(&format))
            .map_err(|e| ReleaseError::tag(format!("Cannot format tag description: {}", e)))?;

        Ok(Some(tag))
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;

        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        // Picks up deletions, which add_all alone leaves unstaged
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str, allow_empty: bool) -> Result<Oid> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;

        if !allow_empty {
            let unchanged = match &parent {
                Some(parent) => parent.tree_id() == tree_id,
                None => index.is_empty(),
            };
            if unchanged {
                return Err(ReleaseError::commit("nothing to commit, working tree clean"));
            }
        }

        let signature = self
            .repo
            .signature()
            .map_err(|e| ReleaseError::commit(format!("No git identity configured: {}", e)))?;

        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| ReleaseError::commit(format!("Cannot create commit: {}", e)))?;

        Ok(oid)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            return Err(ReleaseError::remote(
                "HEAD is detached, check out a branch before releasing",
            ));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::remote("Branch name is not valid UTF-8"))
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote_handle = self.repo.find_remote(remote).map_err(|e| {
            ReleaseError::remote(format!("Cannot find remote '{}': {}", remote, e))
        })?;

        let mut callbacks = self.remote_callbacks();

        // The server may reject a single ref while the push itself "succeeds"
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);

        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::remote(format!("Network error during push: {}", e))
                } else {
                    ReleaseError::remote(format!(
                        "Failed to push '{}' to '{}': {}",
                        branch, remote, e
                    ))
                }
            })?;

        Ok(())
    }
}
