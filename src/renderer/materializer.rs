//! 虚拟节点渲染器 - 把虚拟节点树物化为宿主节点

use crate::config::EngineConfig;
use crate::element::{Child, FunctionComponent, NodeKind, PropValue, Props, StatefulComponent, VNode};
use crate::platform::Platform;
use tracing::{debug, trace, warn};

/// 单次渲染器，平台能力通过参数注入
pub struct Renderer<'a, P: Platform> {
    platform: &'a mut P,
    config: EngineConfig,
}

impl<'a, P: Platform> Renderer<'a, P> {
    pub fn new(platform: &'a mut P) -> Self {
        Self::with_config(platform, EngineConfig::default())
    }

    pub fn with_config(platform: &'a mut P, config: EngineConfig) -> Self {
        Self { platform, config }
    }

    /// 物化虚拟节点并追加到容器下
    pub fn render(&mut self, vnode: &VNode, container: &P::Node) {
        debug!(kind = vnode.kind().name(), "render");
        self.render_into(vnode, container);
    }

    fn render_into(&mut self, vnode: &VNode, container: &P::Node) {
        let node = self.materialize(vnode);
        self.platform.append_child(container, &node);
    }

    /// 根据节点类型创建真实节点；组件节点整体替换为其渲染结果
    pub fn materialize(&mut self, vnode: &VNode) -> P::Node {
        trace!(kind = ?vnode.kind(), key = ?vnode.key(), "materialize");

        let node = match vnode.kind() {
            NodeKind::Text => self.platform.create_text_node(""),
            NodeKind::Host(tag) => self.platform.create_element(tag),
            NodeKind::Function(component) => return self.update_function_component(component, vnode.props()),
            NodeKind::Stateful(component) => return self.update_stateful_component(component, vnode.props()),
            NodeKind::Fragment => self.platform.create_document_fragment(),
        };

        self.reconcile_children(vnode.children(), &node);
        self.update_node(&node, vnode.props());
        node
    }

    /// 逐个渲染子节点，嵌套列表原地展开
    fn reconcile_children(&mut self, children: &[Child], node: &P::Node) {
        for child in children {
            match child {
                Child::List(list) => self.reconcile_children(list, node),
                Child::Node(vnode) => self.render_into(vnode, node),
            }
        }
    }

    /// 设置属性：事件前缀的绑定为监听器，其余直接赋值（children 不在属性表中）
    fn update_node(&mut self, node: &P::Node, props: &Props) {
        for (name, value) in props.attributes() {
            match self.config.event_name(name) {
                Some(event_type) => match value {
                    PropValue::Handler(handler) => {
                        self.platform.add_event_listener(node, &event_type, handler.clone());
                    }
                    PropValue::Value(v) => {
                        warn!(name = name.as_str(), value = %v, "event attribute without a handler skipped");
                    }
                },
                None => self.platform.set_property(node, name, value),
            }
        }
    }

    fn update_stateful_component(&mut self, component: &StatefulComponent, props: &Props) -> P::Node {
        trace!(component = component.name(), "instantiate stateful component");
        let rendered = component.instantiate(props.clone());
        self.materialize(&rendered)
    }

    fn update_function_component(&mut self, component: &FunctionComponent, props: &Props) -> P::Node {
        trace!(component = component.name(), "call function component");
        let rendered = component.call(props);
        self.materialize(&rendered)
    }
}

/// 使用默认配置渲染到容器
pub fn render<P: Platform>(vnode: &VNode, platform: &mut P, container: &P::Node) {
    Renderer::new(platform).render(vnode, container);
}
