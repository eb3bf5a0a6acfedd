//! Mini VDOM - 声明式 UI 渲染引擎
//! 元素工厂构建虚拟节点树，渲染器一次性物化为宿主节点并绑定属性与事件

// 错误与配置
pub mod error;
pub mod config;

// 事件系统
pub mod event;

// 元素工厂 / 虚拟节点
pub mod element;

// 宿主平台能力集
pub mod platform;

// 渲染器
pub mod renderer;

pub use config::{DefaultPolicy, EngineConfig};
pub use element::{
    build, is_truthy, Attributes, Child, Component, Config, ElementFactory, FunctionComponent,
    NodeKind, PropValue, Props, StatefulComponent, VNode, NODE_VALUE,
};
pub use error::{Error, Result};
pub use event::{Event, EventDispatcher, EventHandler};
pub use platform::{MemoryDocument, NodeData, NodeId, Platform};
pub use renderer::{render, Renderer};

// 单元测试
#[cfg(test)]
mod tests;
