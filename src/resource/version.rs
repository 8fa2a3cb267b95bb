//! API group/version identifiers.

use std::fmt;
use std::str::FromStr;

/// An API group and version pair, e.g. `apps/v1` or the core `v1`.
///
/// The core group is represented by an empty `group`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupVersion {
    /// API group (empty for the core group)
    pub group: String,
    /// Version within the group
    pub version: String,
}

impl GroupVersion {
    /// Create a group/version pair.
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Create a core group version such as `v1`.
    pub fn core(version: impl Into<String>) -> Self {
        Self::new("", version)
    }

    /// True when neither group nor version is set.
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty()
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

impl FromStr for GroupVersion {
    type Err = String;

    /// Parse `version` or `group/version`.
    ///
    /// The empty string and `/` parse to the empty group version; more than
    /// one slash is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "/" {
            return Ok(Self::default());
        }
        match s.matches('/').count() {
            0 => Ok(Self::core(s)),
            1 => {
                let (group, version) = s.split_once('/').unwrap_or(("", s));
                Ok(Self::new(group, version))
            }
            _ => Err(format!("unexpected GroupVersion string: {}", s)),
        }
    }
}
