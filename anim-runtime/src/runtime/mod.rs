//! # Runtime 模块
//!
//! 动画状态求值核心。
//!
//! ## 模块结构
//!
//! - [`selector`]：纯函数的优先级链
//! - [`controller`]：每 tick 的求值编排
//! - [`sink`]：切换通知接口

pub mod controller;
pub mod selector;
pub mod sink;

pub use controller::AnimationController;
pub use selector::{Selection, select};
pub use sink::TransitionSink;
