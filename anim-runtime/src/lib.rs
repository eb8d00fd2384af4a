//! # Anim Runtime
//!
//! 2D 平台跳跃角色的动画状态控制器核心库。
//!
//! ## 架构概述
//!
//! `anim-runtime` 是纯逻辑核心，不依赖任何 IO、物理或渲染引擎。
//! 它通过 **双输入模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── GameplayEvent (push) ───────►│ 锁存到 EventLatch
//!   │                                   │
//!   │◄─── PhysicsSnapshot (pull) ──────│ evaluate(now)
//!   │                                   │
//!   │◄─── Transition (仅状态变化时) ────│
//!   │                                   │
//! ```
//!
//! - 连续信号（速度、输入轴、贴墙等）每 tick 从 [`PhysicsSnapshotProvider`] 拉取
//! - 离散事件（跳跃、攻击、落地等）随时推入，下一次 `evaluate` 后统一清空
//! - 时间由宿主显式传入，Runtime 内部不读取时钟
//!
//! ## 核心类型
//!
//! - [`AnimationController`]：每 tick 编排一次求值
//! - [`StateId`]：动画状态的封闭枚举
//! - [`Transition`]：状态切换通知
//! - [`AnimConfig`]：锁定时长等配置
//!
//! ## 使用示例
//!
//! ```ignore
//! use anim_runtime::{AnimConfig, AnimationController, PhysicsSnapshot, TransitionLog};
//!
//! let mut controller = AnimationController::new(
//!     AnimConfig::default(),
//!     PhysicsSnapshot::default(),
//!     TransitionLog::new(),
//! );
//!
//! loop {
//!     *controller.provider_mut() = physics.snapshot();
//!     controller.on_attacked();
//!
//!     if let Some(transition) = controller.evaluate(now) {
//!         animator.play(transition.to.clip_name());
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`state`]：StateId 与 Transition 定义
//! - [`snapshot`]：PhysicsSnapshot 与拉取接口
//! - [`input`]：GameplayEvent 定义
//! - [`latch`]：事件锁存
//! - [`lock`]：状态锁定计时
//! - [`config`]：配置
//! - [`history`]：切换记录
//! - [`error`]：错误类型定义
//! - [`runtime`]：状态选择与控制器

pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod latch;
pub mod lock;
pub mod runtime;
pub mod snapshot;
pub mod state;

// 重导出核心类型
pub use config::AnimConfig;
pub use error::{AnimResult, ConfigError};
pub use history::TransitionLog;
pub use input::GameplayEvent;
pub use latch::{EventLatch, Latches};
pub use lock::LockTimer;
pub use runtime::{AnimationController, Selection, TransitionSink, select};
pub use snapshot::{PhysicsSnapshot, PhysicsSnapshotProvider, Speed, WallDirection};
pub use state::{StateId, Transition, UnknownStateId};
