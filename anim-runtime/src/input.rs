//! # Input 模块
//!
//! 定义 Host 推送给控制器的离散游戏事件。
//!
//! ## 设计说明
//!
//! - 连续信号（速度、输入轴）走快照拉取，离散事件走推送，两者不混用
//! - 事件在两次求值之间可以推送任意多次，由 [`EventLatch`](crate::latch::EventLatch) 合并
//! - 贴墙、落地冲击等需要判断的回调在控制器上（`on_*` 方法）完成转换，
//!   这里只保留锁存层面的语义事件

use serde::{Deserialize, Serialize};

/// 锁存事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameplayEvent {
    /// 起跳
    ///
    /// `wall_jumped` 后写覆盖先写。
    Jumped { wall_jumped: bool },

    /// 空中跳跃
    AirJumped,

    /// 攻击
    Attacked,

    /// 撞上墙
    HitWall,

    /// 落地
    ///
    /// `impact_force` 后写覆盖先写。
    Landed { impact_force: f32 },

    /// 离开墙面
    DismountedWall,
}

impl GameplayEvent {
    /// 创建起跳事件
    pub fn jumped(wall_jumped: bool) -> Self {
        Self::Jumped { wall_jumped }
    }

    /// 创建落地事件
    pub fn landed(impact_force: f32) -> Self {
        Self::Landed { impact_force }
    }
}
