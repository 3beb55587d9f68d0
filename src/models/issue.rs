use std::fmt;

/// A reference to an issue found in a description.
///
/// `owner` and `repo` are `None` for `#123` shorthand, meaning the
/// repository the pull request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub number: u64,
}

impl IssueReference {
    /// Shorthand reference into the current repository
    pub fn local(number: u64) -> Self {
        Self {
            owner: None,
            repo: None,
            number,
        }
    }

    /// Reference to an issue in an explicit repository
    pub fn remote(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: Some(owner.into()),
            repo: Some(repo.into()),
            number,
        }
    }

    pub fn is_local(&self) -> bool {
        self.owner.is_none() && self.repo.is_none()
    }

    /// Resolve to concrete coordinates, falling back to the given repository
    pub fn resolve<'a>(&'a self, owner: &'a str, repo: &'a str) -> (&'a str, &'a str, u64) {
        (
            self.owner.as_deref().unwrap_or(owner),
            self.repo.as_deref().unwrap_or(repo),
            self.number,
        )
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => write!(f, "{}/{}#{}", owner, repo, self.number),
            _ => write!(f, "#{}", self.number),
        }
    }
}

/// What the issue lookup reports about an existing item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueLookup {
    pub number: u64,
    /// GitHub serves pull requests through the issues endpoint too
    pub is_pull_request: bool,
}
