//! # Replay 模块
//!
//! 按场景逐帧驱动控制器，收集切换记录和期望比对结果。
//!
//! ## 每帧流程
//!
//! ```text
//! 覆写快照 → 按顺序推送 events → evaluate(time) → 比对 expect
//! ```

use anim_runtime::{
    AnimationController, PhysicsSnapshot, StateId, Transition, TransitionLog, TransitionSink,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::scenario::{GameplayCall, Scenario};

/// 把切换输出到日志
///
/// 在真实宿主里这里是播放动画片段、音效、粒子的地方。
#[derive(Debug, Default)]
pub struct TracingSink;

impl TransitionSink for TracingSink {
    fn on_transition(&mut self, transition: &Transition) {
        info!(
            from = %transition.from,
            to = %transition.to,
            at = transition.at,
            clip = transition.to.clip_name(),
            "播放动画"
        );
    }
}

type ReplayController = AnimationController<PhysicsSnapshot, (TracingSink, TransitionLog)>;

/// 期望不符
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// 帧索引
    pub frame: usize,
    /// 帧时间
    pub time: f64,
    /// 期望状态
    pub expected: StateId,
    /// 实际状态
    pub actual: StateId,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "第 {} 帧 (t={:.3})：期望 {}，实际 {}",
            self.frame, self.time, self.expected, self.actual
        )
    }
}

/// 回放结果
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// 场景名
    pub scenario: String,
    /// 帧数
    pub frames: usize,
    /// 发生的切换
    pub transitions: Vec<Transition>,
    /// 检查过的期望数
    pub checked: usize,
    /// 不符的期望
    pub mismatches: Vec<Mismatch>,
    /// 最终状态
    pub final_state: StateId,
}

impl ReplayReport {
    /// 所有期望都满足
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "场景: {} ({} 帧)", self.scenario, self.frames)?;
        for transition in &self.transitions {
            writeln!(f, "  {:>8.3}  {}", transition.at, transition)?;
        }
        writeln!(f, "最终状态: {}", self.final_state)?;
        for mismatch in &self.mismatches {
            writeln!(f, "  ✗ {}", mismatch)?;
        }
        write!(
            f,
            "期望: {} 通过, {} 失败",
            self.checked - self.mismatches.len(),
            self.mismatches.len()
        )
    }
}

/// 回放场景
///
/// 场景需已通过校验（时间单调不减）。
pub fn run(scenario: &Scenario, config: &HostConfig) -> ReplayReport {
    let sink = (
        TracingSink,
        TransitionLog::new().with_capacity(config.history_capacity),
    );
    let mut controller = AnimationController::new(config.anim.clone(), PhysicsSnapshot::default(), sink);

    let mut checked = 0;
    let mut mismatches = Vec::new();

    for (index, frame) in scenario.frames.iter().enumerate() {
        if let Some(snapshot) = frame.snapshot {
            *controller.provider_mut() = snapshot;
        }
        for call in &frame.events {
            apply(&mut controller, *call);
        }

        controller.evaluate(frame.time);
        let actual = controller.current_state();
        debug!(frame = index, time = frame.time, state = %actual, "帧求值完成");

        if let Some(expected) = frame.expect {
            checked += 1;
            if expected != actual {
                let mismatch = Mismatch {
                    frame: index,
                    time: frame.time,
                    expected,
                    actual,
                };
                warn!(%mismatch, "期望不符");
                mismatches.push(mismatch);
            }
        }
    }

    let final_state = controller.current_state();
    let (_, (_, log)) = controller.into_parts();

    ReplayReport {
        scenario: scenario.name.clone(),
        frames: scenario.frames.len(),
        transitions: log.transitions().to_vec(),
        checked,
        mismatches,
        final_state,
    }
}

/// 把一次调用转发到控制器
fn apply(controller: &mut ReplayController, call: GameplayCall) {
    match call {
        GameplayCall::GroundedChanged {
            grounded,
            impact_force,
        } => controller.on_grounded_changed(grounded, impact_force),
        GameplayCall::WallGrabChanged { on_wall } => controller.on_wall_grab_changed(on_wall),
        GameplayCall::Jumped { wall_jumped } => controller.on_jumped(wall_jumped),
        GameplayCall::AirJumped => controller.on_air_jumped(),
        GameplayCall::Attacked => controller.on_attacked(),
        GameplayCall::DismountedWall => controller.on_dismounted_wall(),
        GameplayCall::LedgeClimbChanged { climbing } => controller.on_ledge_climb_changed(climbing),
        GameplayCall::ForceUnlock => controller.force_unlock(),
        GameplayCall::Respawn => controller.reset(),
    }
}
