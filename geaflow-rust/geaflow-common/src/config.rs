use crate::error::{GeaFlowError, GeaFlowResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    config: HashMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            config: HashMap::new(),
        }
    }

    pub fn from_json_str(s: &str) -> GeaFlowResult<Self> {
        serde_json::from_str(s).map_err(|e| GeaFlowError::Config(format!("parse json: {e}")))
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.put(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.config.get(key)
    }

    pub fn get_bool(&self, key: &str, default_value: bool) -> GeaFlowResult<bool> {
        match self.config.get(key) {
            None => Ok(default_value),
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                other => Err(GeaFlowError::Config(format!(
                    "{key}: expected a boolean, got {other:?}"
                ))),
            },
        }
    }

    pub fn get_usize(&self, key: &str, default_value: usize) -> GeaFlowResult<usize> {
        match self.config.get(key) {
            None => Ok(default_value),
            Some(v) => v
                .trim()
                .parse()
                .map_err(|e| GeaFlowError::Config(format!("{key}: {e}"))),
        }
    }
}
