//! 元素工厂与虚拟节点

mod component;
mod factory;
mod vnode;

pub use component::{Component, FunctionComponent, StatefulComponent};
pub use factory::{build, Config, ElementFactory};
pub use vnode::{is_truthy, Attributes, Child, NodeKind, PropValue, Props, VNode, NODE_VALUE};

/// 可变参数形式的 `build`：`h!(kind, config, child...)`
#[macro_export]
macro_rules! h {
    ($kind:expr) => {
        $crate::h!($kind, None)
    };
    ($kind:expr, $config:expr $(, $child:expr)* $(,)?) => {{
        let children: ::std::vec::Vec<$crate::Child> = ::std::vec![$($crate::Child::from($child)),*];
        $crate::build($kind, $config, children)
    }};
}
