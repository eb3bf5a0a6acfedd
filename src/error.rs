//! 错误定义
//!
//! 渲染管线本身不会失败，这里只覆盖边缘操作：配置加载、文档节点查询。

use crate::platform::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}

pub type Result<T> = std::result::Result<T, Error>;
