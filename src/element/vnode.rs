//! 虚拟节点定义

use super::component::{FunctionComponent, StatefulComponent};
use crate::event::EventHandler;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;

/// 文本节点承载内容的保留属性名
pub const NODE_VALUE: &str = "nodeValue";

/// 属性表，保持插入顺序
pub type Attributes = IndexMap<String, PropValue>;

/// 属性值：保留原生类型，或者是事件处理函数
#[derive(Debug, Clone)]
pub enum PropValue {
    Value(JsonValue),
    Handler(EventHandler),
}

impl PropValue {
    /// 按 JS 语义判断真假：null、false、0、"" 为假
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Value(v) => is_truthy(v),
            PropValue::Handler(_) => true,
        }
    }

    pub fn as_value(&self) -> Option<&JsonValue> {
        match self {
            PropValue::Value(v) => Some(v),
            PropValue::Handler(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(|v| v.as_str())
    }

    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(h) => Some(h),
            PropValue::Value(_) => None,
        }
    }
}

pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Value(a), PropValue::Value(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<JsonValue> for PropValue {
    fn from(v: JsonValue) -> Self { PropValue::Value(v) }
}

impl From<EventHandler> for PropValue {
    fn from(h: EventHandler) -> Self { PropValue::Handler(h) }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self { PropValue::Value(JsonValue::from(s)) }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self { PropValue::Value(JsonValue::from(s)) }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self { PropValue::Value(JsonValue::from(b)) }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self { PropValue::Value(JsonValue::from(n)) }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self { PropValue::Value(JsonValue::from(n)) }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self { PropValue::Value(JsonValue::from(n)) }
}

/// 节点类型
#[derive(Clone)]
pub enum NodeKind {
    /// 文本节点，只由工厂内部创建
    Text,
    /// 宿主元素，如 "div"
    Host(String),
    /// 无状态函数组件
    Function(FunctionComponent),
    /// 有状态组件
    Stateful(StatefulComponent),
    /// 片段，没有自己的真实节点
    Fragment,
}

impl NodeKind {
    /// 组件声明的默认属性
    pub fn default_props(&self) -> Option<&Attributes> {
        match self {
            NodeKind::Function(f) => f.defaults(),
            NodeKind::Stateful(c) => c.defaults(),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeKind::Text => "#text",
            NodeKind::Host(tag) => tag.as_str(),
            NodeKind::Function(f) => f.name(),
            NodeKind::Stateful(c) => c.name(),
            NodeKind::Fragment => "#fragment",
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Text => write!(f, "Text"),
            NodeKind::Host(tag) => write!(f, "Host({:?})", tag),
            NodeKind::Function(c) => write!(f, "Function({})", c.name()),
            NodeKind::Stateful(c) => write!(f, "Stateful({})", c.name()),
            NodeKind::Fragment => write!(f, "Fragment"),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self { NodeKind::Host(tag.to_string()) }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self { NodeKind::Host(tag) }
}

impl From<FunctionComponent> for NodeKind {
    fn from(f: FunctionComponent) -> Self { NodeKind::Function(f) }
}

impl From<&FunctionComponent> for NodeKind {
    fn from(f: &FunctionComponent) -> Self { NodeKind::Function(f.clone()) }
}

impl From<StatefulComponent> for NodeKind {
    fn from(c: StatefulComponent) -> Self { NodeKind::Stateful(c) }
}

impl From<&StatefulComponent> for NodeKind {
    fn from(c: &StatefulComponent) -> Self { NodeKind::Stateful(c.clone()) }
}

/// None 表示片段
impl<T: Into<NodeKind>> From<Option<T>> for NodeKind {
    fn from(kind: Option<T>) -> Self {
        kind.map_or(NodeKind::Fragment, Into::into)
    }
}

/// 子节点：单个虚拟节点，或嵌套的列表（渲染时展开）
#[derive(Debug, Clone)]
pub enum Child {
    Node(VNode),
    List(Vec<Child>),
}

impl Child {
    pub fn as_node(&self) -> Option<&VNode> {
        match self {
            Child::Node(n) => Some(n),
            Child::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Child]> {
        match self {
            Child::List(l) => Some(l),
            Child::Node(_) => None,
        }
    }
}

impl From<VNode> for Child {
    fn from(node: VNode) -> Self { Child::Node(node) }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(list: Vec<T>) -> Self {
        Child::List(list.into_iter().map(Into::into).collect())
    }
}

/// 非节点值包装成文本节点；数组保持嵌套；对象不是节点，按 JSON 文本显示
impl From<JsonValue> for Child {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Array(items) => Child::List(items.into_iter().map(Child::from).collect()),
            JsonValue::Object(_) => Child::Node(VNode::text(JsonValue::String(value.to_string()))),
            scalar => Child::Node(VNode::text(scalar)),
        }
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self { Child::Node(VNode::text(s)) }
}

impl From<String> for Child {
    fn from(s: String) -> Self { Child::Node(VNode::text(s)) }
}

impl From<&String> for Child {
    fn from(s: &String) -> Self { Child::Node(VNode::text(s.as_str())) }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self { Child::Node(VNode::text(b)) }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self { Child::Node(VNode::text(n)) }
}

impl From<i64> for Child {
    fn from(n: i64) -> Self { Child::Node(VNode::text(n)) }
}

impl From<usize> for Child {
    fn from(n: usize) -> Self { Child::Node(VNode::text(n)) }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self { Child::Node(VNode::text(n)) }
}

/// 节点属性：普通属性 + 已规范化的子节点
#[derive(Debug, Clone, Default)]
pub struct Props {
    attrs: Attributes,
    children: Vec<Child>,
}

impl Props {
    pub fn new(attrs: Attributes, children: Vec<Child>) -> Self {
        Self { attrs, children }
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.attrs.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&JsonValue> {
        self.get(name).and_then(PropValue::as_value)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    pub fn handler(&self, name: &str) -> Option<&EventHandler> {
        self.get(name).and_then(PropValue::as_handler)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// 除 children 以外的属性
    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }
}

/// 虚拟节点，创建后不可变
#[derive(Debug, Clone)]
pub struct VNode {
    kind: NodeKind,
    key: Option<JsonValue>,
    node_ref: Option<PropValue>,
    props: Props,
}

impl VNode {
    pub(crate) fn new(kind: NodeKind, key: Option<JsonValue>, node_ref: Option<PropValue>, props: Props) -> Self {
        Self { kind, key, node_ref, props }
    }

    /// 文本节点，内容放在 nodeValue 属性中
    pub fn text(value: impl Into<JsonValue>) -> Self {
        let mut attrs = Attributes::new();
        attrs.insert(NODE_VALUE.to_string(), PropValue::Value(value.into()));
        Self::new(NodeKind::Text, None, None, Props::new(attrs, Vec::new()))
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn key(&self) -> Option<&JsonValue> {
        self.key.as_ref()
    }

    pub fn node_ref(&self) -> Option<&PropValue> {
        self.node_ref.as_ref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[Child] {
        self.props.children()
    }

    /// 文本节点的内容
    pub fn text_value(&self) -> Option<&JsonValue> {
        match self.kind {
            NodeKind::Text => self.props.value(NODE_VALUE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(null), false ; "null")]
    #[test_case(json!(false), false ; "false")]
    #[test_case(json!(0), false ; "zero")]
    #[test_case(json!(0.0), false ; "zero float")]
    #[test_case(json!(""), false ; "empty string")]
    #[test_case(json!(true), true ; "true")]
    #[test_case(json!(-1), true ; "negative")]
    #[test_case(json!("0"), true ; "string zero")]
    #[test_case(json!([]), true ; "empty array")]
    #[test_case(json!({}), true ; "empty object")]
    fn test_truthiness(value: JsonValue, expected: bool) {
        assert_eq!(is_truthy(&value), expected);
        assert_eq!(PropValue::Value(value).is_truthy(), expected);
    }

    #[test]
    fn test_handler_is_truthy() {
        assert!(PropValue::Handler(EventHandler::new(|_| {})).is_truthy());
    }

    #[test]
    fn test_text_node_shape() {
        let node = VNode::text("hi");
        assert!(matches!(node.kind(), NodeKind::Text));
        assert_eq!(node.text_value(), Some(&json!("hi")));
        assert!(node.children().is_empty());
        assert!(node.key().is_none());
    }

    #[test]
    fn test_json_child_conversion() {
        let child = Child::from(json!(["a", 1, [true]]));
        let list = child.as_list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].as_node().unwrap().text_value(), Some(&json!("a")));
        assert_eq!(list[1].as_node().unwrap().text_value(), Some(&json!(1)));
        assert!(list[2].as_list().is_some());

        let object = Child::from(json!({ "a": 1 }));
        assert_eq!(object.as_node().unwrap().text_value(), Some(&json!(r#"{"a":1}"#)));
    }

    #[test]
    fn test_optional_kind_is_fragment() {
        assert!(matches!(NodeKind::from(None::<&str>), NodeKind::Fragment));
        assert!(matches!(NodeKind::from(Some("li")), NodeKind::Host(ref t) if t == "li"));
    }
}
