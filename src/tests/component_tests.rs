//! 组件单元测试
//! 测试有状态组件、函数组件的解析与默认属性

use crate::element::*;
use crate::event::Event;
use crate::platform::{MemoryDocument, NodeId, Platform};
use crate::renderer::render;
use crate::h;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

/// 类组件
struct ClassComp {
    props: Props,
}

impl Component for ClassComp {
    fn create(props: Props) -> Self {
        Self { props }
    }

    fn render(&self) -> VNode {
        let title = self.props.get_str("title").unwrap_or_default();
        let name = self.props.get_str("name").unwrap_or_default();
        h!("h2", None, format!("title：{}，name：{}", title, name))
    }

    fn default_props() -> Option<Attributes> {
        let mut defaults = Attributes::new();
        defaults.insert("title".into(), PropValue::from("类组件默认标题"));
        defaults.insert("name".into(), PropValue::from("class"));
        Some(defaults)
    }
}

/// 透传 children 的容器组件
struct Panel {
    props: Props,
}

impl Component for Panel {
    fn create(props: Props) -> Self {
        Self { props }
    }

    fn render(&self) -> VNode {
        build("section", None, self.props.children().to_vec())
    }
}

fn fun_component() -> FunctionComponent {
    FunctionComponent::new("FunComponent", |props: &Props| {
        let title = props.get_str("title").unwrap_or_default();
        let name = props.get_str("name").unwrap_or_default();
        h!("h2", None, format!("title：{}，name：{}", title, name))
    })
    .with_defaults([("title", "函数组件默认标题"), ("name", "function")])
}

fn mount(vnode: &VNode) -> (MemoryDocument, NodeId) {
    let mut doc = MemoryDocument::new();
    let root = doc.create_element("root");
    render(vnode, &mut doc, &root);
    (doc, root)
}

/// 测试有状态组件使用默认属性并被替换
#[test]
fn test_stateful_component_with_defaults() {
    let vnode = h!(StatefulComponent::of::<ClassComp>(), Some(Config::new().attr("name", "Jack")));
    assert_eq!(vnode.props().get_str("title"), Some("类组件默认标题"));

    let (doc, root) = mount(&vnode);
    assert_eq!(doc.inner_html(root), "<h2>title：类组件默认标题，name：Jack</h2>");
}

/// 测试函数组件使用默认属性
#[test]
fn test_function_component_with_defaults() {
    let (doc, root) = mount(&h!(fun_component(), Some(Config::new().attr("name", "Lily"))));
    assert_eq!(doc.inner_html(root), "<h2>title：函数组件默认标题，name：Lily</h2>");
}

/// 测试每次渲染都重新构造实例
#[test]
fn test_stateful_component_constructed_per_render() {
    thread_local! {
        static CREATED: Cell<usize> = const { Cell::new(0) };
    }

    struct Tracked;

    impl Component for Tracked {
        fn create(_props: Props) -> Self {
            CREATED.with(|c| c.set(c.get() + 1));
            Tracked
        }

        fn render(&self) -> VNode {
            h!("i")
        }
    }

    let vnode = h!(StatefulComponent::of::<Tracked>(), None);
    let (mut doc, root) = mount(&vnode);
    render(&vnode, &mut doc, &root);

    assert_eq!(CREATED.with(|c| c.get()), 2);
    assert_eq!(doc.children(root).len(), 2);
}

/// 测试组件收到 children
#[test]
fn test_component_receives_children() {
    let vnode = h!(StatefulComponent::of::<Panel>(), None, h!("p", None, "a"), vec!["b", "c"]);
    let (doc, root) = mount(&vnode);
    assert_eq!(doc.inner_html(root), "<section><p>a</p>bc</section>");
}

/// 测试组件返回组件，逐层替换
#[test]
fn test_component_returning_component() {
    let inner = fun_component();
    let outer = FunctionComponent::new("Outer", move |_: &Props| {
        h!(inner.clone(), Some(Config::new().attr("name", "nested")))
    });

    let (doc, root) = mount(&h!(outer, None));
    assert_eq!(doc.children(root).len(), 1);
    assert_eq!(doc.text_content(root), "title：函数组件默认标题，name：nested");
}

/// 测试组件返回片段
#[test]
fn test_component_returning_fragment() {
    let list = FunctionComponent::new("List", |props: &Props| {
        let items: Vec<VNode> = props
            .value("items")
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(i, item)| build("li", Some(Config::new().key(i)), vec![item.clone()]))
            .collect();
        build(None::<&str>, None, items)
    });

    let config = Config::from_json(json!({ "items": ["吃饭", "睡觉", "敲代码"] }));
    let (doc, root) = mount(&build(list, Some(config), Vec::<Child>::new()));
    assert_eq!(doc.inner_html(root), "<li>吃饭</li><li>睡觉</li><li>敲代码</li>");
}

/// 测试组件把收到的处理函数转交给宿主元素
#[test]
fn test_component_forwards_handler() {
    let pressed = Rc::new(Cell::new(0));
    let p = pressed.clone();

    let button = FunctionComponent::new("Button", |props: &Props| {
        let config = match props.handler("onPress") {
            Some(handler) => Config::new().attr("onClick", handler.clone()),
            None => Config::new(),
        };
        build("button", Some(config), vec!["ok"])
    });

    let vnode = h!(button, Some(Config::new().handler("onPress", move |_| p.set(p.get() + 1))));
    let (doc, root) = mount(&vnode);

    let node = doc.find_by_tag(root, "button").unwrap();
    assert_eq!(doc.listener_count(node, "click"), 1);
    assert_eq!(doc.listener_count(node, "press"), 0);
    assert_eq!(doc.dispatch_event(node, &Event::new("click")).unwrap(), 1);
    assert_eq!(pressed.get(), 1);
}

/// 测试完整示例应用树
#[test]
fn test_showcase_app() {
    let todo_list = ["吃饭", "睡觉", "敲代码"];
    let alerts = Rc::new(Cell::new(0));
    let a = alerts.clone();

    let items: Vec<VNode> = todo_list
        .iter()
        .enumerate()
        .map(|(i, val)| build("li", Some(Config::new().key(i)), vec![*val]))
        .collect();

    let app = h!(
        "div",
        Some(Config::new().attr("className", "box bg")),
        h!("h3", None, "兴趣爱好:"),
        h!(None::<&str>, None, items),
        h!(StatefulComponent::of::<ClassComp>(), Some(Config::new().attr("name", "Jack"))),
        h!(fun_component(), Some(Config::new().attr("name", "Lily"))),
        h!(
            "button",
            Some(Config::new().handler("onClick", |_| {}).handler("onClick", move |_| a.set(a.get() + 1))),
            "弹出提示"
        )
    );

    let (doc, root) = mount(&app);
    assert_eq!(
        doc.inner_html(root),
        concat!(
            r#"<div className="box bg"><h3>兴趣爱好:</h3>"#,
            "<li>吃饭</li><li>睡觉</li><li>敲代码</li>",
            "<h2>title：类组件默认标题，name：Jack</h2>",
            "<h2>title：函数组件默认标题，name：Lily</h2>",
            "<button>弹出提示</button></div>"
        )
    );

    let button = doc.find_by_tag(root, "button").unwrap();
    doc.dispatch_event(button, &Event::new("click")).unwrap();
    assert_eq!(alerts.get(), 1);
}
