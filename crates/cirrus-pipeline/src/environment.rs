//! Deployment environments

use serde::{Deserialize, Serialize};

/// One named deployment target bound to an account/region pair
///
/// Each environment receives its own isolated stack instance; environments
/// never share tables, roles, or resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    /// Environment name (e.g. `Dev`)
    pub name: String,
    /// Target account identifier
    pub account: String,
    /// Target region
    pub region: String,
}

impl Environment {
    /// Create an environment
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        account: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account: account.into(),
            region: region.into(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.account, self.region)
    }
}
