use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Name of a logical document (table) before any prefix is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentName(Arc<str>);

impl DocumentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Applies a table prefix, e.g. `m2_` + `sales_order` -> `m2_sales_order`.
    pub fn prefixed(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DocumentName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
