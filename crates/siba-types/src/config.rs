use serde::{Deserialize, Serialize};
use crate::{AssistantError, Result};

/// Top-level assistant configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub title: String,
    pub subtitle: String,
    pub typing_delay: DelayRange,
    /// Input box grows with its content up to this many rows
    pub max_input_rows: usize,
    /// Opening assistant message, shown before the first submission
    #[serde(default)]
    pub greeting: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            title: "SIBA Assistant".to_string(),
            subtitle: "Admissions, fees, programs and scholarships".to_string(),
            typing_delay: DelayRange::default(),
            max_input_rows: 5,
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

impl AssistantConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AssistantConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.typing_delay.validate()?;
        if self.max_input_rows == 0 {
            return Err(AssistantError::Config(
                "max_input_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inclusive range for the simulated "assistant is typing" delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: 1000,
            max_ms: 1500,
        }
    }
}

impl DelayRange {
    pub fn new(min_ms: u32, max_ms: u32) -> Result<Self> {
        let range = Self { min_ms, max_ms };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(AssistantError::Config(format!(
                "typing delay min {}ms exceeds max {}ms",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }

    /// Map a unit sample in `[0, 1)` onto the range. Out-of-range samples
    /// are clamped, so the result always lies within `[min_ms, max_ms]`.
    pub fn sample(&self, unit: f64) -> u32 {
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        let span = f64::from(self.max_ms.saturating_sub(self.min_ms));
        let offset = (unit * (span + 1.0)).floor() as u32;
        self.min_ms.saturating_add(offset).min(self.max_ms)
    }
}

const DEFAULT_GREETING: &str = "Hi! I'm the SIBA Assistant.\n\
Ask me about admissions, fees, programs or scholarships.";
