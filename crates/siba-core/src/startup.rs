//! Startup configuration.
//!
//! The host page may embed JSON overrides for the assistant config and the
//! reply table. Missing or blank overrides mean the built-ins; invalid ones
//! are logged and replaced by the built-ins so the widget always starts.

use siba_types::config::AssistantConfig;

use crate::resolver::RuleTable;

fn non_blank(json: Option<&str>) -> Option<&str> {
    json.filter(|text| !text.trim().is_empty())
}

pub fn load_config(json: Option<&str>) -> AssistantConfig {
    let Some(json) = non_blank(json) else {
        return AssistantConfig::default();
    };
    match AssistantConfig::from_json(json) {
        Ok(config) => {
            log::info!("Using embedded assistant config");
            config
        }
        Err(e) => {
            log::warn!("{}. Falling back to the built-in config.", e);
            AssistantConfig::default()
        }
    }
}

pub fn load_rule_table(json: Option<&str>) -> RuleTable {
    let Some(json) = non_blank(json) else {
        return RuleTable::builtin().clone();
    };
    match RuleTable::from_json(json) {
        Ok(table) => {
            log::info!("Using embedded reply table ({} rules)", table.rules().len());
            table
        }
        Err(e) => {
            log::warn!("{}. Falling back to the built-in reply table.", e);
            RuleTable::builtin().clone()
        }
    }
}
