use serde::{Deserialize, Serialize};

/// Workflow state of the data being read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    InProgress,
    Released,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::InProgress => write!(f, "IN_PROGRESS"),
            Stage::Released => write!(f, "RELEASED"),
        }
    }
}

/// Release state the store reports for one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseStatus {
    Released,
    Unreleased,
    HasChanged,
}

impl ReleaseStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RELEASED" => Some(Self::Released),
            "UNRELEASED" => Some(Self::Unreleased),
            "HAS_CHANGED" => Some(Self::HasChanged),
            _ => None,
        }
    }
}

/// How far down the instance tree a release status query looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseTreeScope {
    TopInstanceOnly,
    ChildrenOnly,
}

impl std::fmt::Display for ReleaseTreeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseTreeScope::TopInstanceOnly => write!(f, "TOP_INSTANCE_ONLY"),
            ReleaseTreeScope::ChildrenOnly => write!(f, "CHILDREN_ONLY"),
        }
    }
}
