//! # History 模块
//!
//! 状态切换记录，用于调试回放和表现层排查。
//!
//! ## 设计原则
//!
//! - 只记录真正发生的切换，不记录每 tick 的求值
//! - 容量有上限，超出时丢弃最早的记录
//! - 可序列化，宿主可以直接导出为 JSON

use serde::{Deserialize, Serialize};

use crate::runtime::TransitionSink;
use crate::state::{StateId, Transition};

/// 默认最多记录的切换数
const DEFAULT_CAPACITY: usize = 1000;

/// 切换记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionLog {
    /// 切换列表（按时间顺序）
    transitions: Vec<Transition>,
    /// 最大记录数
    max_transitions: usize,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionLog {
    /// 创建新的切换记录
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            max_transitions: DEFAULT_CAPACITY,
        }
    }

    /// 设置最大记录数
    pub fn with_capacity(mut self, max: usize) -> Self {
        self.max_transitions = max;
        self.trim();
        self
    }

    /// 添加切换
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
        self.trim();
    }

    fn trim(&mut self) {
        if self.transitions.len() > self.max_transitions {
            let excess = self.transitions.len() - self.max_transitions;
            self.transitions.drain(..excess);
        }
    }

    /// 获取所有切换
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// 最近一次切换
    pub fn last(&self) -> Option<&Transition> {
        self.transitions.last()
    }

    /// 获取最近的 N 条切换（按时间顺序）
    pub fn recent(&self, count: usize) -> &[Transition] {
        let start = self.transitions.len().saturating_sub(count);
        &self.transitions[start..]
    }

    /// 进入某个状态的次数
    pub fn entries_into(&self, state: StateId) -> usize {
        self.transitions.iter().filter(|t| t.to == state).count()
    }

    /// 清空记录
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// 获取记录总数
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl TransitionSink for TransitionLog {
    fn on_transition(&mut self, transition: &Transition) {
        self.push(*transition);
    }
}
