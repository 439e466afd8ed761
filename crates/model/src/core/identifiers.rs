use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt, sync::Arc};

/// Name of a join source inside a single view. Unique per view.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Alias(Arc<str>);

impl Alias {
    pub fn new(alias: impl Into<String>) -> Self {
        Self(Arc::from(alias.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Alias {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Alias {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for Alias {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a join source in its view's declaration order.
/// Index 0 is always the MAIN source.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SourceIndex(usize);

impl SourceIndex {
    pub const MAIN: SourceIndex = SourceIndex(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn is_main(self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for SourceIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for SourceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
