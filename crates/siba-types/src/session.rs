use serde::{Deserialize, Serialize};

/// Identity of one page-load session. Used to correlate log lines;
/// nothing is persisted under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub started_at: String,
}

impl SessionInfo {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// First eight characters of the id, enough for log lines
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self::new()
    }
}
