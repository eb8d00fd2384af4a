//! # Latch 模块
//!
//! 在两次求值之间累积一次性事件。
//!
//! ## 锁存语义
//!
//! ```text
//! 纯布尔事件     -> 多次设置按 OR 合并（幂等）
//! 带载荷事件     -> 标志 OR 合并，载荷后写覆盖先写
//! ledge_climbing -> 电平触发，不参与清空，由外部直接置位/复位
//! wall_jumped    -> 不参与清空，保留到下一次跳跃或空中跳跃
//! ```

use crate::input::GameplayEvent;

/// 锁存的事件集合
///
/// 状态选择器只读这个结构，测试可以直接构造。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Latches {
    /// 本 tick 内起跳
    pub jumped: bool,
    /// 最近一次起跳是否为蹬墙跳
    pub wall_jumped: bool,
    /// 本 tick 内空中跳跃
    pub air_jumped: bool,
    /// 本 tick 内攻击
    pub attacked: bool,
    /// 本 tick 内撞墙
    pub hit_wall: bool,
    /// 本 tick 内落地
    pub landed: bool,
    /// 落地冲击力
    pub impact_force: f32,
    /// 本 tick 内离墙
    pub dismounted_wall: bool,
    /// 正在攀上边缘（电平触发）
    pub ledge_climbing: bool,
}

impl Latches {
    /// 是否有任何一次性事件待处理
    pub fn has_one_shots(&self) -> bool {
        self.jumped
            || self.air_jumped
            || self.attacked
            || self.hit_wall
            || self.landed
            || self.dismounted_wall
    }
}

/// 事件锁存器
#[derive(Debug, Clone, Default)]
pub struct EventLatch {
    latches: Latches,
}

impl EventLatch {
    /// 创建空的锁存器
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前锁存内容
    pub fn latches(&self) -> &Latches {
        &self.latches
    }

    /// 锁存一个事件
    pub fn set(&mut self, event: GameplayEvent) {
        let latches = &mut self.latches;
        match event {
            GameplayEvent::Jumped { wall_jumped } => {
                latches.jumped = true;
                latches.wall_jumped = wall_jumped;
            }
            GameplayEvent::AirJumped => {
                latches.air_jumped = true;
                latches.wall_jumped = false;
            }
            GameplayEvent::Attacked => latches.attacked = true,
            GameplayEvent::HitWall => latches.hit_wall = true,
            GameplayEvent::Landed { impact_force } => {
                latches.landed = true;
                latches.impact_force = impact_force;
            }
            GameplayEvent::DismountedWall => latches.dismounted_wall = true,
        }
    }

    /// 撤销尚未消费的撞墙事件
    pub fn clear_hit_wall(&mut self) {
        self.latches.hit_wall = false;
    }

    /// 撤销尚未消费的离墙事件
    pub fn clear_dismounted_wall(&mut self) {
        self.latches.dismounted_wall = false;
    }

    /// 设置攀边电平
    ///
    /// 返回值表示电平是否从 true 变为 false，调用方据此解除锁定。
    pub fn set_ledge_climbing(&mut self, climbing: bool) -> bool {
        let released = self.latches.ledge_climbing && !climbing;
        self.latches.ledge_climbing = climbing;
        released
    }

    /// 清空一次性事件
    ///
    /// 每 tick 选择之后调用一次，无论是否发生切换。
    pub fn drain_one_shots(&mut self) {
        let latches = &mut self.latches;
        latches.jumped = false;
        latches.air_jumped = false;
        latches.attacked = false;
        latches.hit_wall = false;
        latches.landed = false;
        latches.impact_force = 0.0;
        latches.dismounted_wall = false;
    }

    /// 全部复位（角色重生）
    pub fn reset(&mut self) {
        self.latches = Latches::default();
    }
}
