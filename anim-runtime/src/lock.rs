//! # Lock 模块
//!
//! 状态锁定计时器：截止时间之前控制器不切换状态。

/// 锁定计时器
///
/// 只保存一个截止时间。时间单位为秒，由调用方传入。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockTimer {
    locked_until: f64,
}

impl Default for LockTimer {
    fn default() -> Self {
        Self {
            locked_until: f64::NEG_INFINITY,
        }
    }
}

impl LockTimer {
    /// 创建未锁定的计时器
    pub fn new() -> Self {
        Self::default()
    }

    /// 锁定到 `now + duration`
    ///
    /// `duration == 0` 合法，只在当前时刻内有效。
    pub fn lock(&mut self, duration: f64, now: f64) {
        self.locked_until = now + duration;
    }

    /// `now` 时刻是否处于锁定
    pub fn is_locked(&self, now: f64) -> bool {
        now < self.locked_until
    }

    /// 立即解除锁定
    pub fn unlock(&mut self) {
        self.locked_until = f64::NEG_INFINITY;
    }

    /// 锁定截止时间，未锁定过或已解除时为负无穷
    pub fn locked_until(&self) -> f64 {
        self.locked_until
    }
}
