//! 事件系统 - 事件负载与监听器

use serde_json::Value as JsonValue;
use std::fmt;
use std::rc::Rc;

/// 派发给监听器的事件
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: String,
    pub detail: JsonValue,
}

impl Event {
    pub fn new(event_type: &str) -> Self {
        Self { event_type: event_type.to_string(), detail: JsonValue::Null }
    }

    pub fn with_detail(mut self, detail: JsonValue) -> Self {
        self.detail = detail;
        self
    }
}

/// 事件处理函数句柄，克隆后共享同一个闭包
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Event) + 'static,
    {
        Self(Rc::new(callback))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0))
    }
}

/// 事件分发器（按注册顺序调用）
#[derive(Debug, Default, Clone)]
pub struct EventDispatcher {
    listeners: Vec<(String, EventHandler)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    pub fn add_listener(&mut self, event_type: &str, handler: EventHandler) {
        self.listeners.push((event_type.to_string(), handler));
    }

    /// 返回被调用的监听器数量
    pub fn dispatch(&self, event: &Event) -> usize {
        let mut called = 0;
        for (t, handler) in &self.listeners {
            if *t == event.event_type {
                handler.call(event);
                called += 1;
            }
        }
        called
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.iter().filter(|(t, _)| t == event_type).count()
    }

    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(|(t, _)| t.as_str())
    }
}
