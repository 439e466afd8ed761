use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Replace a join by a column rename when the anchor already stores the
    /// requested values. Disabling it always yields the full join route.
    pub shortcuts: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { shortcuts: true }
    }
}
