//! # Selector 模块
//!
//! 纯函数的状态选择：快照 + 锁存事件 + 锁定状态 → 下一个状态。
//!
//! ## 优先级链
//!
//! 按顺序检查，第一个命中的规则生效，后续规则全部跳过：
//!
//! ```text
//!  1. 锁定中             -> 保持当前状态
//!  2. 攀边               -> LedgeClimb（锁定）
//!  3. 攻击               -> Attack（锁定）
//!  4. 梯子               -> ClimbIdle / Climb
//!  5. 空中 + 撞墙        -> WallHit（锁定）
//!     空中 + 贴墙        -> WallSlide / LedgeGrab / WallClimb / WallIdle
//!  6. 下蹲               -> Crouch / Crawl
//!  7. 落地               -> Land（锁定）
//!  8. 起跳               -> Backflip / Jump
//!  9. 着地               -> Idle / Walk
//! 10. 上升且有空中跳跃   -> Backflip / Jump
//! 11. 上升且无空中跳跃   -> DoubleJump
//! 12. 离墙               -> WallDismount（锁定），否则 Fall
//! ```
//!
//! 贴墙分支内 WallSlide > LedgeGrab > WallClimb 的顺序是手感调参，可以调整。
//!
//! 选择器不修改任何状态：锁定的施加和锁存的清空由调用方完成。


use crate::config::AnimConfig;
use crate::latch::Latches;
use crate::snapshot::PhysicsSnapshot;
use crate::state::StateId;

/// 选择结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// 下一个状态
    pub state: StateId,
    /// 进入该状态时需要施加的锁定时长（秒）
    pub lock: Option<f64>,
}

impl Selection {
    /// 不带锁定的选择
    pub fn state(state: StateId) -> Self {
        Self { state, lock: None }
    }

    /// 进入后锁定 `duration` 秒
    pub fn locked(state: StateId, duration: f64) -> Self {
        Self {
            state,
            lock: Some(duration),
        }
    }
}

/// 选择下一个状态
///
/// # 参数
///
/// - `current`: 当前状态，锁定时原样返回
/// - `snapshot`: 本 tick 的物理快照
/// - `latches`: 自上次求值以来锁存的事件
/// - `locked`: 本 tick 是否处于锁定
/// - `config`: 锁定时长与判零容差
pub fn select(
    current: StateId,
    snapshot: &PhysicsSnapshot,
    latches: &Latches,
    locked: bool,
    config: &AnimConfig,
) -> Selection {
    if locked {
        return Selection::state(current);
    }

    if latches.ledge_climbing {
        return Selection::locked(StateId::LedgeClimb, config.ledge_climb_duration);
    }
    if latches.attacked {
        return Selection::locked(StateId::Attack, config.attack_anim_time);
    }
    if snapshot.climbing_ladder {
        return Selection::state(if config.is_zero(snapshot.speed.y) {
            StateId::ClimbIdle
        } else {
            StateId::Climb
        });
    }

    if !snapshot.grounded {
        if latches.hit_wall {
            return Selection::locked(StateId::WallHit, config.wall_hit_anim_time);
        }
        if snapshot.is_on_wall {
            return Selection::state(on_wall(snapshot, config));
        }
    }

    if snapshot.crouching {
        return Selection::state(if snapshot.input_x == 0.0 || !snapshot.grounded {
            StateId::Crouch
        } else {
            StateId::Crawl
        });
    }
    if latches.landed {
        return Selection::locked(StateId::Land, config.land_anim_duration);
    }
    if latches.jumped || latches.air_jumped {
        return Selection::state(jump_kind(latches));
    }

    if snapshot.grounded {
        return Selection::state(if snapshot.input_x == 0.0 {
            StateId::Idle
        } else {
            StateId::Walk
        });
    }
    if config.is_positive(snapshot.speed.y) {
        return Selection::state(if snapshot.air_jumps_remaining != 0 {
            jump_kind(latches)
        } else {
            StateId::DoubleJump
        });
    }

    if latches.dismounted_wall {
        Selection::locked(StateId::WallDismount, config.wall_dismount_duration)
    } else {
        Selection::state(StateId::Fall)
    }
}

/// 空中贴墙时的子状态
fn on_wall(snapshot: &PhysicsSnapshot, config: &AnimConfig) -> StateId {
    let speed_y = snapshot.speed.y;
    if config.is_negative(speed_y) {
        StateId::WallSlide
    } else if snapshot.grabbing_ledge {
        StateId::LedgeGrab
    } else if config.is_positive(speed_y) {
        StateId::WallClimb
    } else {
        StateId::WallIdle
    }
}

fn jump_kind(latches: &Latches) -> StateId {
    if latches.wall_jumped {
        StateId::Backflip
    } else {
        StateId::Jump
    }
}
