//! Reply resolver — maps a user message to a canned reply.
//!
//! The input is lower-cased and the rule table is scanned in declaration
//! order. The first rule with any trigger contained in the input wins;
//! when nothing matches the table's fallback text is returned. Matching is
//! plain substring containment, so "fee" also matches "coffee".

use std::sync::OnceLock;

use serde::Deserialize;
use siba_types::{rule::Rule, AssistantError, Result};

use crate::rules::{default_rules, FALLBACK_REPLY};

/// Ordered, read-only reply table
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    fallback: String,
}

/// On-disk shape of an externalized table: either a bare list of rules or
/// an object that also overrides the fallback.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleTableFile {
    Rules(Vec<Rule>),
    WithFallback {
        rules: Vec<Rule>,
        #[serde(default)]
        fallback: Option<String>,
    },
}

impl RuleTable {
    /// Build a table, lower-casing every trigger.
    ///
    /// Rejects an empty table, a rule without triggers, and blank triggers
    /// (an empty substring would match every input).
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(AssistantError::Config("rule table is empty".to_string()));
        }
        let mut normalized = Vec::with_capacity(rules.len());
        for (index, mut rule) in rules.into_iter().enumerate() {
            if rule.triggers.is_empty() {
                return Err(AssistantError::Config(format!(
                    "rule #{} ({}) has no triggers",
                    index, rule.name
                )));
            }
            if rule.triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(AssistantError::Config(format!(
                    "rule #{} ({}) has a blank trigger",
                    index, rule.name
                )));
            }
            rule.triggers = rule.triggers.iter().map(|t| t.to_lowercase()).collect();
            normalized.push(rule);
        }
        Ok(Self {
            rules: normalized,
            fallback: FALLBACK_REPLY.to_string(),
        })
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Load an externalized table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<RuleTableFile>(json)? {
            RuleTableFile::Rules(rules) => Self::new(rules),
            RuleTableFile::WithFallback { rules, fallback } => {
                let table = Self::new(rules)?;
                Ok(match fallback {
                    Some(text) => table.with_fallback(text),
                    None => table,
                })
            }
        }
    }

    /// The built-in SIBA table, constructed once per process.
    pub fn builtin() -> &'static RuleTable {
        static TABLE: OnceLock<RuleTable> = OnceLock::new();
        TABLE.get_or_init(|| RuleTable {
            rules: default_rules(),
            fallback: FALLBACK_REPLY.to_string(),
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// First rule matching `input`, if any.
    pub fn find(&self, input: &str) -> Option<&Rule> {
        let normalized = input.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    pub fn resolve(&self, input: &str) -> &str {
        match self.find(input) {
            Some(rule) => &rule.reply,
            None => &self.fallback,
        }
    }
}

/// Resolve against the built-in table.
pub fn resolve(input: &str) -> &'static str {
    RuleTable::builtin().resolve(input)
}
