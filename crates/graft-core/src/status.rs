//! Component status scales used by `latest.<status>` selectors.

use serde::{Deserialize, Serialize};

use graft_util::errors::GraftError;

/// Statuses known to every build unless configured otherwise, lowest first.
pub const DEFAULT_STATUS_SCALE: [&str; 3] = ["integration", "milestone", "release"];

/// Status assigned to components that do not declare one.
pub const DEFAULT_STATUS: &str = "integration";

/// An ordered list of maturity labels, lowest first.
///
/// Always non-empty and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StatusScale {
    statuses: Vec<String>,
}

impl StatusScale {
    pub fn new<I, S>(statuses: I) -> Result<Self, GraftError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let statuses: Vec<String> = statuses.into_iter().map(Into::into).collect();
        if statuses.is_empty() {
            return Err(GraftError::Config {
                message: "status scale must name at least one status".to_string(),
            });
        }
        for (i, status) in statuses.iter().enumerate() {
            if status.trim().is_empty() {
                return Err(GraftError::Config {
                    message: "status scale contains an empty status".to_string(),
                });
            }
            if statuses[..i].contains(status) {
                return Err(GraftError::Config {
                    message: format!("status '{status}' appears more than once in the status scale"),
                });
            }
        }
        Ok(Self { statuses })
    }

    /// Position of `status` on the scale, `0` being the lowest.
    pub fn rank(&self, status: &str) -> Option<usize> {
        self.statuses.iter().position(|s| s == status)
    }

    /// The lowest status, which every component satisfies.
    pub fn lowest(&self) -> &str {
        &self.statuses[0]
    }

    pub fn contains(&self, status: &str) -> bool {
        self.rank(status).is_some()
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }
}

impl Default for StatusScale {
    fn default() -> Self {
        Self {
            statuses: DEFAULT_STATUS_SCALE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for StatusScale {
    type Error = GraftError;

    fn try_from(statuses: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(statuses)
    }
}

impl From<StatusScale> for Vec<String> {
    fn from(scale: StatusScale) -> Self {
        scale.statuses
    }
}
