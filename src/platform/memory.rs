//! 内存文档 - 基于节点数组的宿主实现

use super::Platform;
use crate::element::{PropValue, NODE_VALUE};
use crate::error::{Error, Result};
use crate::event::{Event, EventDispatcher, EventHandler};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::warn;

/// 文档内节点 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// 节点数据
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element { tag: String },
    Text { value: String },
    Fragment,
}

#[derive(Debug)]
struct DomNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    properties: IndexMap<String, PropValue>,
    listeners: EventDispatcher,
}

impl DomNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            properties: IndexMap::new(),
            listeners: EventDispatcher::new(),
        }
    }
}

/// 内存文档
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: Vec<DomNode>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DomNode::new(data));
        id
    }

    fn node(&self, id: NodeId) -> Result<&DomNode> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|n| &n.data)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Element { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// 文本节点的内容
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Text { value } => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn property(&self, id: NodeId, name: &str) -> Option<&PropValue> {
        self.nodes.get(id.0).and_then(|n| n.properties.get(name))
    }

    pub fn properties(&self, id: NodeId) -> impl Iterator<Item = (&str, &PropValue)> {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(|n| n.properties.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn listener_count(&self, id: NodeId, event_type: &str) -> usize {
        self.nodes.get(id.0).map_or(0, |n| n.listeners.listener_count(event_type))
    }

    /// 所有后代文本拼接
    pub fn text_content(&self, id: NodeId) -> String {
        let mut s = String::new();
        self.collect_text(id, &mut s);
        s
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Text { value }) => out.push_str(value),
            Some(_) => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            }
            None => {}
        }
    }

    /// 在节点上派发事件，返回调用的监听器数量
    pub fn dispatch_event(&self, id: NodeId, event: &Event) -> Result<usize> {
        Ok(self.node(id)?.listeners.dispatch(event))
    }

    /// 深度优先查找第一个指定标签的元素
    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        if self.tag_name(root) == Some(tag) {
            return Some(root);
        }
        self.children(root).iter().find_map(|c| self.find_by_tag(*c, tag))
    }

    /// 确定性序列化：属性按写入顺序输出，事件处理函数不输出
    pub fn to_html(&self, id: NodeId) -> String {
        let mut s = String::new();
        self.write_html(id, &mut s);
        s
    }

    /// 只序列化子节点
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut s = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut s);
        }
        s
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else { return };
        match &node.data {
            NodeData::Text { value } => out.push_str(&escape_text(value)),
            NodeData::Fragment => {
                for child in &node.children {
                    self.write_html(*child, out);
                }
            }
            NodeData::Element { tag } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in &node.properties {
                    if let PropValue::Value(v) = value {
                        out.push_str(&format!(" {}=\"{}\"", name, escape_attr(&display_value(v))));
                    }
                }
                out.push('>');
                for child in &node.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = Some(of);
        while let Some(id) = cur {
            if id == candidate {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
    }
}

/// 属性值的文本形式：null 为空串，字符串原样，其他用 JSON 形式
fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

impl Platform for MemoryDocument {
    type Node = NodeId;

    fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element { tag: name.to_string() })
    }

    fn create_text_node(&mut self, value: &str) -> NodeId {
        self.push(NodeData::Text { value: value.to_string() })
    }

    fn create_document_fragment(&mut self) -> NodeId {
        self.push(NodeData::Fragment)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        let (parent, child) = (*parent, *child);
        if !self.contains(parent) || !self.contains(child) {
            warn!(?parent, ?child, "append_child on unknown node ignored");
            return;
        }
        if matches!(self.nodes[parent.0].data, NodeData::Text { .. }) {
            warn!(?parent, "text nodes cannot have children");
            return;
        }
        if self.is_ancestor(child, parent) {
            warn!(?parent, ?child, "append_child would create a cycle");
            return;
        }

        // 片段本身不进入树，只转移它的子节点
        if self.nodes[child.0].data == NodeData::Fragment {
            let moved = std::mem::take(&mut self.nodes[child.0].children);
            for grandchild in moved {
                self.nodes[grandchild.0].parent = Some(parent);
                self.nodes[parent.0].children.push(grandchild);
            }
            return;
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn add_event_listener(&mut self, node: &NodeId, event_type: &str, handler: EventHandler) {
        match self.nodes.get_mut(node.0) {
            Some(n) => n.listeners.add_listener(event_type, handler),
            None => warn!(?node, event_type, "listener on unknown node ignored"),
        }
    }

    fn set_property(&mut self, node: &NodeId, name: &str, value: &PropValue) {
        let Some(n) = self.nodes.get_mut(node.0) else {
            warn!(?node, name, "property on unknown node ignored");
            return;
        };
        match (&mut n.data, value) {
            (NodeData::Text { value: text }, PropValue::Value(v)) if name == NODE_VALUE => {
                *text = display_value(v);
            }
            _ => {
                n.properties.insert(name.to_string(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fragment_append_moves_children() {
        let mut doc = MemoryDocument::new();
        let root = doc.create_element("ul");
        let frag = doc.create_document_fragment();
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        doc.append_child(&frag, &a);
        doc.append_child(&frag, &b);

        doc.append_child(&root, &frag);

        assert_eq!(doc.children(root), &[a, b]);
        assert!(doc.children(frag).is_empty());
        assert_eq!(doc.parent(a), Some(root));
        assert_eq!(doc.to_html(root), "<ul><li></li><li></li></ul>");
    }

    #[test]
    fn test_append_moves_from_old_parent() {
        let mut doc = MemoryDocument::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let child = doc.create_element("span");

        doc.append_child(&first, &child);
        doc.append_child(&second, &child);

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[child]);
    }

    #[test]
    fn test_invalid_appends_are_ignored() {
        let mut doc = MemoryDocument::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        let text = doc.create_text_node("x");
        doc.append_child(&outer, &inner);

        doc.append_child(&inner, &outer);
        doc.append_child(&text, &inner);
        doc.append_child(&outer, &NodeId(99));

        assert_eq!(doc.children(outer), &[inner]);
        assert!(doc.children(inner).is_empty());
        assert_eq!(doc.parent(outer), None);
    }

    #[test]
    fn test_node_value_sets_text() {
        let mut doc = MemoryDocument::new();
        let t = doc.create_text_node("");
        doc.set_property(&t, NODE_VALUE, &PropValue::from(42));
        assert_eq!(doc.text(t), Some("42"));
        doc.set_property(&t, NODE_VALUE, &PropValue::Value(JsonValue::Null));
        assert_eq!(doc.text(t), Some(""));
        doc.set_property(&t, NODE_VALUE, &PropValue::from("a<b"));
        assert_eq!(doc.to_html(t), "a&lt;b");
    }

    #[test]
    fn test_properties_keep_native_type() {
        let mut doc = MemoryDocument::new();
        let input = doc.create_element("input");
        doc.set_property(&input, "disabled", &PropValue::from(true));
        doc.set_property(&input, "title", &PropValue::from("say \"hi\""));

        assert_eq!(doc.property(input, "disabled").and_then(|v| v.as_value()), Some(&json!(true)));
        assert_eq!(doc.to_html(input), r#"<input disabled="true" title="say &quot;hi&quot;"></input>"#);
    }

    #[test]
    fn test_dispatch_event() {
        let mut doc = MemoryDocument::new();
        let button = doc.create_element("button");
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        doc.add_event_listener(&button, "click", EventHandler::new(move |_| c.set(c.get() + 1)));

        assert_eq!(doc.listener_count(button, "click"), 1);
        assert_eq!(doc.dispatch_event(button, &Event::new("click")).unwrap(), 1);
        assert_eq!(doc.dispatch_event(button, &Event::new("input")).unwrap(), 0);
        assert_eq!(clicks.get(), 1);
        assert!(matches!(
            doc.dispatch_event(NodeId(7), &Event::new("click")),
            Err(Error::UnknownNode(NodeId(7)))
        ));
    }

    #[test]
    fn test_text_content_and_find() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div");
        let h = doc.create_element("h2");
        let t1 = doc.create_text_node("a");
        let t2 = doc.create_text_node("b");
        doc.append_child(&div, &t1);
        doc.append_child(&div, &h);
        doc.append_child(&h, &t2);

        assert_eq!(doc.text_content(div), "ab");
        assert_eq!(doc.find_by_tag(div, "h2"), Some(h));
        assert_eq!(doc.find_by_tag(div, "p"), None);
        assert_eq!(doc.inner_html(div), "a<h2>b</h2>");
    }
}
