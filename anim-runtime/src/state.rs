//! # State 模块
//!
//! 定义动画状态标识与状态切换通知。
//!
//! ## 设计原则
//!
//! - 状态是**封闭枚举**，不使用字符串哈希，拼写错误在编译期暴露
//! - 任一求值时刻恰好有一个状态处于激活
//! - 状态名即动画片段名，宿主据此播放对应的 clip

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 动画状态
///
/// 每个变体对应一个动画片段，片段名与变体名一致（见 [`StateId::clip_name`]）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StateId {
    /// 站立
    #[default]
    Idle,
    /// 地面行走
    Walk,
    /// 下蹲
    Crouch,
    /// 爬行（下蹲 + 水平输入）
    Crawl,

    /// 起跳
    Jump,
    /// 二段跳（空中跳跃次数已用尽后的上升）
    DoubleJump,
    /// 下落
    Fall,
    /// 落地（锁定）
    Land,

    /// 梯子上静止
    ClimbIdle,
    /// 梯子上移动
    Climb,

    /// 撞墙（锁定）
    WallHit,
    /// 贴墙静止
    WallIdle,
    /// 沿墙上爬
    WallClimb,
    /// 沿墙下滑
    WallSlide,
    /// 离墙（锁定）
    WallDismount,
    /// 蹬墙跳后空翻
    Backflip,

    /// 抓住边缘
    LedgeGrab,
    /// 攀上边缘（锁定）
    LedgeClimb,

    /// 攻击（锁定）
    Attack,
}

impl StateId {
    /// 所有状态，按声明顺序
    pub const ALL: [StateId; 19] = [
        StateId::Idle,
        StateId::Walk,
        StateId::Crouch,
        StateId::Crawl,
        StateId::Jump,
        StateId::DoubleJump,
        StateId::Fall,
        StateId::Land,
        StateId::ClimbIdle,
        StateId::Climb,
        StateId::WallHit,
        StateId::WallIdle,
        StateId::WallClimb,
        StateId::WallSlide,
        StateId::WallDismount,
        StateId::Backflip,
        StateId::LedgeGrab,
        StateId::LedgeClimb,
        StateId::Attack,
    ];

    /// 对应的动画片段名
    pub fn clip_name(self) -> &'static str {
        match self {
            StateId::Idle => "Idle",
            StateId::Walk => "Walk",
            StateId::Crouch => "Crouch",
            StateId::Crawl => "Crawl",
            StateId::Jump => "Jump",
            StateId::DoubleJump => "DoubleJump",
            StateId::Fall => "Fall",
            StateId::Land => "Land",
            StateId::ClimbIdle => "ClimbIdle",
            StateId::Climb => "Climb",
            StateId::WallHit => "WallHit",
            StateId::WallIdle => "WallIdle",
            StateId::WallClimb => "WallClimb",
            StateId::WallSlide => "WallSlide",
            StateId::WallDismount => "WallDismount",
            StateId::Backflip => "Backflip",
            StateId::LedgeGrab => "LedgeGrab",
            StateId::LedgeClimb => "LedgeClimb",
            StateId::Attack => "Attack",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.clip_name())
    }
}

/// 未知的状态名
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知的动画状态 '{0}'")]
pub struct UnknownStateId(pub String);

impl FromStr for StateId {
    type Err = UnknownStateId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateId::ALL
            .into_iter()
            .find(|state| state.clip_name() == s)
            .ok_or_else(|| UnknownStateId(s.to_string()))
    }
}

/// 状态切换通知
///
/// 仅当本次求值结果与上一 tick 不同时产生，由控制器同步推送给表现层。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// 切换前的状态
    pub from: StateId,
    /// 切换后的状态
    pub to: StateId,
    /// 切换发生的时间（秒）
    pub at: f64,
}

impl Transition {
    /// 创建切换通知
    pub fn new(from: StateId, to: StateId, at: f64) -> Self {
        Self { from, to, at }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
