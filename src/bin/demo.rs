//! 示例应用：构建虚拟节点树，渲染到内存文档并模拟点击

use mini_vdom::platform::{MemoryDocument, Platform};
use mini_vdom::{
    build, h, Attributes, Child, Component, Config, EngineConfig, ElementFactory, Event, FunctionComponent,
    PropValue, Props, Renderer, StatefulComponent, VNode,
};
use tracing_subscriber::EnvFilter;

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
        h!("h2", None, format!("title：{}，name： {}", title, name))
    }

    fn default_props() -> Option<Attributes> {
        let mut defaults = Attributes::new();
        defaults.insert("title".into(), PropValue::from("类组件默认标题"));
        defaults.insert("name".into(), PropValue::from("class"));
        Some(defaults)
    }
}

fn fun_component() -> FunctionComponent {
    FunctionComponent::new("FunComponent", |props: &Props| {
        let title = props.get_str("title").unwrap_or_default();
        let name = props.get_str("name").unwrap_or_default();
        h!("h2", None, format!("title：{}，name： {}", title, name))
    })
    .with_defaults([("title", "函数组件默认标题"), ("name", "function")])
}

fn app(factory: &ElementFactory) -> VNode {
    let todo_list = ["吃饭", "睡觉", "敲代码"];
    let items: Vec<VNode> = todo_list
        .iter()
        .enumerate()
        .map(|(i, val)| build("li", Some(Config::new().key(i)), vec![*val]))
        .collect();

    let children: Vec<Child> = vec![
        h!("h3", None, "兴趣爱好:").into(),
        h!(None::<&str>, None, items).into(),
        factory.build(StatefulComponent::of::<ClassComp>(), Some(Config::new().attr("name", "Jack")), Vec::<Child>::new()).into(),
        factory.build(fun_component(), Some(Config::new().attr("name", "Lily")), Vec::<Child>::new()).into(),
        h!(
            "button",
            Some(
                Config::new()
                    .handler("onClick", |_| println!("Hello React"))
                    .handler("onClick", |_| println!("👆 button clicked"))
            ),
            "弹出提示"
        )
        .into(),
    ];

    factory.build("div", Some(Config::new().attr("className", "box bg")), children)
}

fn main() -> Result<(), mini_vdom::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    println!("🚀 mini-vdom demo, config: {:?}", config);

    let mut doc = MemoryDocument::new();
    let root = doc.create_element("div");
    doc.set_property(&root, "id", &PropValue::from("root"));

    let factory = ElementFactory::from_config(&config);
    let tree = app(&factory);
    Renderer::with_config(&mut doc, config).render(&tree, &root);

    println!("✅ Rendered {} nodes", doc.len());
    println!("{}", doc.to_html(root));

    if let Some(button) = doc.find_by_tag(root, "button") {
        println!("\n--- Simulating click ---");
        let called = doc.dispatch_event(button, &Event::new("click"))?;
        println!("✅ {} listener(s) called", called);
    }

    Ok(())
}
