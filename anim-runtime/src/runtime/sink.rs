//! # Sink 模块
//!
//! 表现层订阅状态切换的接口。音频、粒子、动画片段播放都挂在这里。

use crate::state::Transition;

/// 切换通知接收者
///
/// 在 `evaluate` 结束前同步调用，只在状态实际变化时触发。
pub trait TransitionSink {
    fn on_transition(&mut self, transition: &Transition);
}

/// 丢弃所有通知
impl TransitionSink for () {
    fn on_transition(&mut self, _transition: &Transition) {}
}

impl TransitionSink for Vec<Transition> {
    fn on_transition(&mut self, transition: &Transition) {
        self.push(*transition);
    }
}

impl<S: TransitionSink + ?Sized> TransitionSink for &mut S {
    fn on_transition(&mut self, transition: &Transition) {
        (**self).on_transition(transition);
    }
}

impl<S: TransitionSink + ?Sized> TransitionSink for Box<S> {
    fn on_transition(&mut self, transition: &Transition) {
        (**self).on_transition(transition);
    }
}

/// 同时通知两个接收者，按顺序调用
impl<A: TransitionSink, B: TransitionSink> TransitionSink for (A, B) {
    fn on_transition(&mut self, transition: &Transition) {
        self.0.on_transition(transition);
        self.1.on_transition(transition);
    }
}
