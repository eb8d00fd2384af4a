//! # Snapshot 模块
//!
//! 物理/输入快照，以及控制器每 tick 拉取快照的接口。
//!
//! ## 设计说明
//!
//! - 快照由外部物理系统产生，控制器只在当前 tick 内读取，不持有可变副本
//! - 控制器在构造时注入 [`PhysicsSnapshotProvider`]，不在运行时查找协作者

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// 二维速度
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Speed {
    pub x: f32,
    pub y: f32,
}

impl Speed {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 贴墙方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallDirection {
    /// 墙在左侧
    Left,
    /// 未贴墙
    #[default]
    None,
    /// 墙在右侧
    Right,
}

impl WallDirection {
    /// 转换为 -1 / 0 / 1
    pub fn sign(self) -> i8 {
        match self {
            WallDirection::Left => -1,
            WallDirection::None => 0,
            WallDirection::Right => 1,
        }
    }

    /// 从符号构造，负数为左，正数为右
    pub fn from_sign(sign: i8) -> Self {
        match sign {
            s if s < 0 => WallDirection::Left,
            0 => WallDirection::None,
            _ => WallDirection::Right,
        }
    }
}

/// 物理快照
///
/// 每 tick 读取一次的连续信号集合。缺省字段在反序列化时取默认值，
/// 宿主可以只写出关心的字段。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSnapshot {
    /// 是否着地
    pub grounded: bool,
    /// 当前速度
    pub speed: Speed,
    /// 贴墙方向
    pub wall_direction: WallDirection,
    /// 是否贴墙
    pub is_on_wall: bool,
    /// 是否抓住边缘
    pub grabbing_ledge: bool,
    /// 是否正在攀上边缘
    pub climbing_ledge: bool,
    /// 是否在梯子上
    pub climbing_ladder: bool,
    /// 是否下蹲
    pub crouching: bool,
    /// 水平输入轴
    pub input_x: f32,
    /// 剩余空中跳跃次数
    ///
    /// 负值不做校验，按数值原样参与比较。
    pub air_jumps_remaining: i32,
}

impl PhysicsSnapshot {
    /// 着地静止的快照
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    /// 空中的快照
    pub fn airborne(speed_y: f32) -> Self {
        Self {
            grounded: false,
            speed: Speed::new(0.0, speed_y),
            ..Default::default()
        }
    }

    pub fn with_speed(mut self, x: f32, y: f32) -> Self {
        self.speed = Speed::new(x, y);
        self
    }

    pub fn with_input_x(mut self, input_x: f32) -> Self {
        self.input_x = input_x;
        self
    }

    /// 贴在指定方向的墙上
    pub fn on_wall(mut self, direction: WallDirection) -> Self {
        self.is_on_wall = true;
        self.wall_direction = direction;
        self
    }

    pub fn with_air_jumps(mut self, remaining: i32) -> Self {
        self.air_jumps_remaining = remaining;
        self
    }
}

/// 物理快照拉取接口
///
/// 控制器每次 `evaluate` 调用一次 `snapshot()`。推送接口只用 `try_snapshot()`，
/// 物理系统可以在持有自身借用时推送事件。
pub trait PhysicsSnapshotProvider {
    /// 读取当前 tick 的快照
    fn snapshot(&self) -> PhysicsSnapshot;

    /// 读取快照，暂时不可读时返回 `None`
    fn try_snapshot(&self) -> Option<PhysicsSnapshot> {
        Some(self.snapshot())
    }
}

/// 快照本身即可作为提供者，宿主每 tick 通过 `provider_mut()` 覆写
impl PhysicsSnapshotProvider for PhysicsSnapshot {
    fn snapshot(&self) -> PhysicsSnapshot {
        *self
    }
}

impl<T: PhysicsSnapshotProvider + ?Sized> PhysicsSnapshotProvider for &T {
    fn snapshot(&self) -> PhysicsSnapshot {
        (**self).snapshot()
    }

    fn try_snapshot(&self) -> Option<PhysicsSnapshot> {
        (**self).try_snapshot()
    }
}

impl<T: PhysicsSnapshotProvider + ?Sized> PhysicsSnapshotProvider for Box<T> {
    fn snapshot(&self) -> PhysicsSnapshot {
        (**self).snapshot()
    }

    fn try_snapshot(&self) -> Option<PhysicsSnapshot> {
        (**self).try_snapshot()
    }
}

/// 与物理系统共享所有权时使用
///
/// `evaluate` 期间单元格不能被可变借用；推送期间可以。
impl<T: PhysicsSnapshotProvider + ?Sized> PhysicsSnapshotProvider for Rc<RefCell<T>> {
    fn snapshot(&self) -> PhysicsSnapshot {
        self.borrow().snapshot()
    }

    fn try_snapshot(&self) -> Option<PhysicsSnapshot> {
        self.try_borrow().ok()?.try_snapshot()
    }
}
