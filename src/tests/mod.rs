//! 单元测试模块
//! 覆盖元素工厂、组件解析、渲染器

pub mod component_tests;
