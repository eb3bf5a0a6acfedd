//! 引擎配置结构体

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 默认属性填充策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultPolicy {
    /// 属性缺失或为假值时填充（兼容行为）
    #[default]
    FillFalsy,
    /// 仅在属性缺失时填充
    FillMissing,
}

/// 引擎配置（可从 JSON 加载）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default = "default_event_prefix")]
    pub event_prefix: String,
    #[serde(default = "default_lowercase_events")]
    pub lowercase_events: bool,
    #[serde(default)]
    pub default_policy: DefaultPolicy,
}

fn default_event_prefix() -> String { "on".to_string() }
fn default_lowercase_events() -> bool { true }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_prefix: default_event_prefix(),
            lowercase_events: default_lowercase_events(),
            default_policy: DefaultPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 属性名是否为事件绑定，是则返回平台事件名
    pub fn event_name(&self, prop_name: &str) -> Option<String> {
        let rest = prop_name.strip_prefix(self.event_prefix.as_str())?;
        if self.lowercase_events {
            Some(rest.to_lowercase())
        } else {
            Some(rest.to_string())
        }
    }
}
