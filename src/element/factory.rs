//! 元素工厂 - 把嵌套调用转换成虚拟节点树

use super::vnode::{Attributes, Child, NodeKind, PropValue, Props, VNode};
use crate::config::{DefaultPolicy, EngineConfig};
use crate::event::{Event, EventHandler};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

const KEY: &str = "key";
const REF: &str = "ref";
/// 标记转换工具写入的簿记字段，不会出现在属性中
const SELF: &str = "__self";
const SOURCE: &str = "__source";
/// 子节点只来自位置参数
const CHILDREN: &str = "children";

/// 调用方传入的配置对象
#[derive(Debug, Clone, Default)]
pub struct Config {
    fields: IndexMap<String, PropValue>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象构建；非对象视为空配置
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => map.into_iter().map(|(k, v)| (k, PropValue::Value(v))).collect(),
            _ => Self::default(),
        }
    }

    /// 同名字段重复设置时后写入的生效
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) {
        if self.fields.insert(name.to_string(), value.into()).is_some() {
            debug!(name, "duplicate attribute, last value wins");
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn handler<F>(self, name: &str, callback: F) -> Self
    where
        F: Fn(&Event) + 'static,
    {
        self.attr(name, EventHandler::new(callback))
    }

    pub fn key(self, key: impl Into<JsonValue>) -> Self {
        self.attr(KEY, PropValue::Value(key.into()))
    }

    pub fn node_ref(self, node_ref: impl Into<PropValue>) -> Self {
        self.attr(REF, node_ref)
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 拆出 key、ref，丢弃簿记字段和 children，其余作为属性返回
    pub fn split(self) -> (Option<JsonValue>, Option<PropValue>, Attributes) {
        let mut key = None;
        let mut node_ref = None;
        let mut attrs = Attributes::with_capacity(self.fields.len());

        for (name, value) in self.fields {
            match name.as_str() {
                KEY => match value {
                    PropValue::Value(v) => key = Some(v),
                    PropValue::Handler(_) => warn!("handler used as key, ignored"),
                },
                REF => node_ref = Some(value),
                SELF | SOURCE | CHILDREN => {}
                _ => {
                    attrs.insert(name, value);
                }
            }
        }

        (key, node_ref, attrs)
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Config::new();
        for (k, v) in iter {
            config.set(&k.into(), v);
        }
        config
    }
}

/// 元素工厂，持有默认属性填充策略
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementFactory {
    policy: DefaultPolicy,
}

impl ElementFactory {
    pub fn new(policy: DefaultPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.default_policy)
    }

    /// 构建虚拟节点，对任何输入都不会失败
    pub fn build<K, C>(&self, kind: K, config: Option<Config>, children: impl IntoIterator<Item = C>) -> VNode
    where
        K: Into<NodeKind>,
        C: Into<Child>,
    {
        let kind = kind.into();
        let (key, node_ref, mut attrs) = config.map(Config::split).unwrap_or_default();

        if let Some(defaults) = kind.default_props() {
            self.apply_defaults(&mut attrs, defaults);
        }

        let children: Vec<Child> = children.into_iter().map(Into::into).collect();
        VNode::new(kind, key, node_ref, Props::new(attrs, children))
    }

    fn apply_defaults(&self, attrs: &mut Attributes, defaults: &Attributes) {
        for (name, value) in defaults {
            if name == CHILDREN {
                continue;
            }
            // 兼容策略下假值默认值不参与填充
            let fill = match self.policy {
                DefaultPolicy::FillFalsy => value.is_truthy() && attrs.get(name).map_or(true, |v| !v.is_truthy()),
                DefaultPolicy::FillMissing => !attrs.contains_key(name),
            };
            if fill {
                attrs.insert(name.clone(), value.clone());
            }
        }
    }
}

/// 使用默认策略构建虚拟节点
pub fn build<K, C>(kind: K, config: Option<Config>, children: impl IntoIterator<Item = C>) -> VNode
where
    K: Into<NodeKind>,
    C: Into<Child>,
{
    ElementFactory::default().build(kind, config, children)
}
