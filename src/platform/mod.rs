//! 宿主平台能力集
//!
//! 渲染器只依赖这里列出的节点操作，真实宿主和测试用的内存文档都实现同一个 trait。

mod memory;

pub use memory::{MemoryDocument, NodeData, NodeId};

use crate::element::PropValue;
use crate::event::EventHandler;

pub trait Platform {
    type Node: Clone;

    fn create_element(&mut self, name: &str) -> Self::Node;

    fn create_text_node(&mut self, value: &str) -> Self::Node;

    /// 分组节点，追加到父节点时只转移它的子节点
    fn create_document_fragment(&mut self) -> Self::Node;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    fn add_event_listener(&mut self, node: &Self::Node, event_type: &str, handler: EventHandler);

    /// 直接属性赋值，值保留原生类型
    fn set_property(&mut self, node: &Self::Node, name: &str, value: &PropValue);
}
