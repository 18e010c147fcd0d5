use serde::{Deserialize, Serialize};

/// One entry of the reply table: any trigger present in the
/// lower-cased input selects `reply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Short topic tag, used in logs only
    #[serde(default)]
    pub name: String,
    pub triggers: Vec<String>,
    pub reply: String,
}

impl Rule {
    pub fn new(name: impl Into<String>, triggers: &[&str], reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            reply: reply.into(),
        }
    }

    /// `normalized` must already be lower-case.
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t.as_str()))
    }
}
