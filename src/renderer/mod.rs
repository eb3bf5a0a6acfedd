//! 渲染器 - 将虚拟节点树物化为真实节点

mod materializer;

pub use materializer::{render, Renderer};
