//! 组件定义 - 函数组件与有状态组件

use super::vnode::{Attributes, PropValue, Props, VNode};
use std::fmt;
use std::rc::Rc;

/// 有状态组件：由属性构造，再调用 render 得到虚拟节点树。
///
/// 每次渲染都会重新构造实例，实例不会跨渲染保留。
pub trait Component: 'static {
    fn create(props: Props) -> Self
    where
        Self: Sized;

    fn render(&self) -> VNode;

    /// 静态默认属性
    fn default_props() -> Option<Attributes>
    where
        Self: Sized,
    {
        None
    }
}

fn collect_defaults<K, V>(defaults: impl IntoIterator<Item = (K, V)>) -> Attributes
where
    K: Into<String>,
    V: Into<PropValue>,
{
    defaults.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// 无状态函数组件
#[derive(Clone)]
pub struct FunctionComponent {
    name: String,
    render: Rc<dyn Fn(&Props) -> VNode>,
    defaults: Option<Rc<Attributes>>,
}

impl FunctionComponent {
    pub fn new<F>(name: &str, render: F) -> Self
    where
        F: Fn(&Props) -> VNode + 'static,
    {
        Self { name: name.to_string(), render: Rc::new(render), defaults: None }
    }

    pub fn with_defaults<K, V>(mut self, defaults: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<PropValue>,
    {
        self.defaults = Some(Rc::new(collect_defaults(defaults)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn defaults(&self) -> Option<&Attributes> {
        self.defaults.as_deref()
    }

    pub fn call(&self, props: &Props) -> VNode {
        (self.render)(props)
    }
}

impl fmt::Debug for FunctionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionComponent")
            .field("name", &self.name)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// 类型擦除后的有状态组件
#[derive(Clone)]
pub struct StatefulComponent {
    name: &'static str,
    instantiate: Rc<dyn Fn(Props) -> VNode>,
    defaults: Option<Rc<Attributes>>,
}

impl StatefulComponent {
    pub fn of<C: Component>() -> Self {
        let full = std::any::type_name::<C>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self {
            name,
            instantiate: Rc::new(|props| C::create(props).render()),
            defaults: C::default_props().map(Rc::new),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn defaults(&self) -> Option<&Attributes> {
        self.defaults.as_deref()
    }

    /// 构造实例并立即渲染，实例随即丢弃
    pub fn instantiate(&self, props: Props) -> VNode {
        (self.instantiate)(props)
    }
}

impl fmt::Debug for StatefulComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatefulComponent")
            .field("name", &self.name)
            .field("defaults", &self.defaults)
            .finish()
    }
}
