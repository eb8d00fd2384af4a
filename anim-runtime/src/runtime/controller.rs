//! # Controller 模块
//!
//! 动画状态控制器，每 tick 编排一次求值。
//!
//! ## 执行模型
//!
//! ```text
//! evaluate(now) -> Option<Transition>
//! ```
//!
//! 1. 从 provider 拉取本 tick 的物理快照
//! 2. 查询锁定状态，调用 [`select`]
//! 3. 无条件清空一次性锁存
//! 4. 结果与当前状态不同：施加锁定、更新状态、同步通知 sink
//!
//! 结果与当前状态相同时不通知，也不重新施加锁定。

use tracing::{debug, trace};

use crate::config::AnimConfig;
use crate::input::GameplayEvent;
use crate::latch::{EventLatch, Latches};
use crate::lock::LockTimer;
use crate::runtime::selector::select;
use crate::runtime::sink::TransitionSink;
use crate::snapshot::{PhysicsSnapshot, PhysicsSnapshotProvider};
use crate::state::{StateId, Transition};

/// 动画状态控制器
///
/// 每个角色一个实例，生命周期与角色一致。快照提供者和切换接收者在构造时注入。
///
/// # 使用示例
///
/// ```ignore
/// let mut controller = AnimationController::new(config, physics, presentation);
///
/// // 游戏逻辑在两次求值之间推送事件
/// controller.on_jumped(false);
///
/// // 每帧求值一次
/// controller.evaluate(now);
/// ```
pub struct AnimationController<P, S> {
    /// 配置
    config: AnimConfig,
    /// 物理快照来源
    provider: P,
    /// 切换通知接收者
    sink: S,
    /// 当前状态
    current: StateId,
    /// 锁定计时
    lock: LockTimer,
    /// 事件锁存
    latch: EventLatch,
    /// 上一次求值的时间
    last_evaluated_at: f64,
    /// 已求值次数
    evaluations: u64,
}

impl<P: PhysicsSnapshotProvider, S: TransitionSink> AnimationController<P, S> {
    /// 创建控制器，初始状态为 `Idle`、未锁定、锁存为空
    pub fn new(config: AnimConfig, provider: P, sink: S) -> Self {
        Self {
            config,
            provider,
            sink,
            current: StateId::default(),
            lock: LockTimer::new(),
            latch: EventLatch::new(),
            last_evaluated_at: f64::NEG_INFINITY,
            evaluations: 0,
        }
    }

    /// 核心驱动函数，每 tick 调用一次
    ///
    /// # 参数
    ///
    /// - `now`: 当前时间（秒），必须单调不减
    ///
    /// # 返回
    ///
    /// 状态发生变化时返回本次切换，同一切换也已推送给 sink。
    pub fn evaluate(&mut self, now: f64) -> Option<Transition> {
        debug_assert!(
            now >= self.last_evaluated_at,
            "evaluate 时间倒退：{} < {}",
            now,
            self.last_evaluated_at
        );
        self.last_evaluated_at = now;
        self.evaluations += 1;

        let snapshot = self.provider.snapshot();
        let locked = self.lock.is_locked(now);
        let selection = select(
            self.current,
            &snapshot,
            self.latch.latches(),
            locked,
            &self.config,
        );

        self.latch.drain_one_shots();

        if selection.state == self.current {
            return None;
        }

        if let Some(duration) = selection.lock {
            self.lock.lock(duration, now);
            trace!(state = %selection.state, until = now + duration, "锁定状态");
        }

        let transition = Transition::new(self.current, selection.state, now);
        self.current = selection.state;
        debug!(from = %transition.from, to = %transition.to, at = now, "动画状态切换");

        self.sink.on_transition(&transition);
        Some(transition)
    }

    // =========================================================================
    // 推送接口（游戏逻辑在两次求值之间调用）
    // =========================================================================

    /// 锁存一个事件
    pub fn push(&mut self, event: GameplayEvent) {
        trace!(?event, "锁存事件");
        self.latch.set(event);
    }

    /// 着地状态变化
    ///
    /// 只有冲击力不低于 `min_impact_force` 时才锁存落地。
    /// 着地与否每 tick 从快照读取，这里的 `grounded` 只用于日志。
    pub fn on_grounded_changed(&mut self, grounded: bool, impact_force: f32) {
        if impact_force >= self.config.min_impact_force {
            self.push(GameplayEvent::landed(impact_force));
        } else {
            trace!(grounded, impact_force, "冲击力不足，不触发落地");
        }
    }

    /// 贴墙状态变化
    ///
    /// 贴上时锁存撞墙并撤销未消费的离墙；离开时反之。
    pub fn on_wall_grab_changed(&mut self, on_wall: bool) {
        if on_wall {
            self.latch.clear_dismounted_wall();
            self.push(GameplayEvent::HitWall);
        } else {
            self.latch.clear_hit_wall();
            self.push(GameplayEvent::DismountedWall);
        }
    }

    /// 起跳
    ///
    /// 正在攀上边缘时忽略。快照暂时不可读（物理系统持有借用）时视为未攀边。
    pub fn on_jumped(&mut self, wall_jumped: bool) {
        let climbing_ledge = self
            .provider
            .try_snapshot()
            .is_some_and(|snapshot| snapshot.climbing_ledge);
        if climbing_ledge {
            trace!("攀边中，忽略起跳");
            return;
        }
        self.push(GameplayEvent::jumped(wall_jumped));
    }

    /// 空中跳跃
    pub fn on_air_jumped(&mut self) {
        self.push(GameplayEvent::AirJumped);
    }

    /// 攻击
    pub fn on_attacked(&mut self) {
        self.push(GameplayEvent::Attacked);
    }

    /// 离开墙面
    pub fn on_dismounted_wall(&mut self) {
        self.push(GameplayEvent::DismountedWall);
    }

    /// 攀边状态变化
    ///
    /// 每次变化都解除锁定：开始时让攀边动画不被正在进行的锁定吞掉，
    /// 结束时让控制器立即退出 LedgeClimb。
    pub fn on_ledge_climb_changed(&mut self, is_ledge_climbing: bool) {
        let released = self.latch.set_ledge_climbing(is_ledge_climbing);
        trace!(is_ledge_climbing, released, "攀边电平变化");
        self.force_unlock();
    }

    // =========================================================================
    // 查询与控制
    // =========================================================================

    /// 当前状态
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// `now` 时刻是否处于锁定
    pub fn is_locked(&self, now: f64) -> bool {
        self.lock.is_locked(now)
    }

    /// 锁定截止时间
    pub fn locked_until(&self) -> f64 {
        self.lock.locked_until()
    }

    /// 外部强制解除锁定
    pub fn force_unlock(&mut self) {
        if self.lock.locked_until().is_finite() {
            debug!(state = %self.current, "解除锁定");
        }
        self.lock.unlock();
    }

    /// 待处理的锁存
    pub fn latches(&self) -> &Latches {
        self.latch.latches()
    }

    /// 已求值次数
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// 角色重生：回到 `Idle`、解除锁定、清空锁存
    ///
    /// 不产生切换通知。
    pub fn reset(&mut self) {
        debug!(from = %self.current, "控制器复位");
        self.current = StateId::default();
        self.lock.unlock();
        self.latch.reset();
    }

    pub fn config(&self) -> &AnimConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 宿主直接持有快照值时，每 tick 通过这里覆写
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// 拆出快照提供者和切换接收者
    pub fn into_parts(self) -> (P, S) {
        (self.provider, self.sink)
    }
}

impl<S: TransitionSink> AnimationController<PhysicsSnapshot, S> {
    /// 覆写快照后立即求值
    pub fn evaluate_with(&mut self, snapshot: PhysicsSnapshot, now: f64) -> Option<Transition> {
        self.provider = snapshot;
        self.evaluate(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::TransitionLog;
    use crate::snapshot::WallDirection;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Controller = AnimationController<PhysicsSnapshot, Vec<Transition>>;

    fn controller() -> Controller {
        AnimationController::new(AnimConfig::default(), PhysicsSnapshot::grounded(), Vec::new())
    }

    #[test]
    fn test_initial_state() {
        let controller = controller();
        assert_eq!(controller.current_state(), StateId::Idle);
        assert!(!controller.is_locked(0.0));
        assert!(!controller.latches().has_one_shots());
    }

    #[test]
    fn test_idle_emits_nothing() {
        let mut controller = controller();
        assert_eq!(controller.evaluate(0.0), None);
        assert_eq!(controller.evaluate(0.016), None);
        assert!(controller.sink().is_empty());
        assert_eq!(controller.evaluations(), 2);
    }

    #[test]
    fn test_walk_emits_once() {
        let mut controller = controller();
        let walking = PhysicsSnapshot::grounded().with_input_x(1.0);

        let transition = controller.evaluate_with(walking, 0.0);
        assert_eq!(transition, Some(Transition::new(StateId::Idle, StateId::Walk, 0.0)));

        assert_eq!(controller.evaluate_with(walking, 0.1), None);
        assert_eq!(controller.evaluate_with(walking, 0.2), None);
        assert_eq!(controller.sink().len(), 1);
    }

    #[test]
    fn test_attack_locks_until_clip_ends() {
        let mut controller = controller();
        controller.on_attacked();

        controller.evaluate(0.0);
        assert_eq!(controller.current_state(), StateId::Attack);
        assert!(controller.is_locked(0.24));
        assert!(!controller.is_locked(0.26));

        // 锁定期间输入变化不影响状态
        controller.provider_mut().input_x = 1.0;
        assert_eq!(controller.evaluate(0.2), None);
        assert_eq!(controller.current_state(), StateId::Attack);

        let transition = controller.evaluate(0.3);
        assert_eq!(transition.map(|t| t.to), Some(StateId::Walk));
    }

    #[test]
    fn test_latches_drained_even_when_locked() {
        let mut controller = controller();
        controller.on_attacked();
        controller.evaluate(0.0);

        // 锁定期间的落地被消费掉，不会在解锁后延迟生效
        controller.on_grounded_changed(true, 50.0);
        controller.evaluate(0.1);
        assert!(!controller.latches().has_one_shots());

        controller.evaluate(0.5);
        assert_eq!(controller.current_state(), StateId::Idle);
    }

    #[test]
    fn test_drain_idempotent_without_new_events() {
        let mut controller = controller();
        controller.on_jumped(false);
        controller.evaluate(0.0);
        assert_eq!(controller.current_state(), StateId::Jump);

        controller.evaluate(0.0);
        let state = controller.current_state();
        let latches = *controller.latches();

        controller.evaluate(0.0);
        assert_eq!(controller.current_state(), state);
        assert_eq!(*controller.latches(), latches);
        assert!(!latches.has_one_shots());
    }

    #[test]
    fn test_same_state_does_not_rearm_lock() {
        let mut controller = controller();
        controller.on_attacked();
        controller.evaluate(0.0);

        // 锁定结束后再次攻击：状态仍是 Attack，不重新锁定
        controller.on_attacked();
        assert_eq!(controller.evaluate(0.3), None);
        assert!(!controller.is_locked(0.31));
        assert_eq!(controller.sink().len(), 1);
    }

    #[test]
    fn test_landing_threshold() {
        let mut controller = controller();
        controller.on_grounded_changed(true, 19.9);
        assert!(!controller.latches().landed);

        controller.on_grounded_changed(true, 20.0);
        assert!(controller.latches().landed);
        assert_eq!(controller.latches().impact_force, 20.0);

        controller.evaluate(1.0);
        assert_eq!(controller.current_state(), StateId::Land);
        assert!(controller.is_locked(1.05));
    }

    #[test]
    fn test_wall_grab_toggles_latches() {
        let mut controller = controller();
        controller.on_wall_grab_changed(true);
        assert!(controller.latches().hit_wall);

        controller.on_wall_grab_changed(false);
        assert!(!controller.latches().hit_wall);
        assert!(controller.latches().dismounted_wall);

        controller.on_wall_grab_changed(true);
        assert!(controller.latches().hit_wall);
        assert!(!controller.latches().dismounted_wall);
    }

    #[test]
    fn test_wall_dismount_lock() {
        let mut controller = controller();
        controller.on_wall_grab_changed(false);

        controller.evaluate_with(PhysicsSnapshot::airborne(0.0), 2.0);
        assert_eq!(controller.current_state(), StateId::WallDismount);
        assert!(controller.is_locked(2.1));
        assert!(!controller.is_locked(2.2));
    }

    #[test]
    fn test_dismounted_wall_push() {
        let mut controller = controller();
        controller.on_dismounted_wall();
        assert!(controller.latches().dismounted_wall);

        let transition = controller.evaluate_with(PhysicsSnapshot::airborne(0.0), 1.0);
        assert_eq!(
            transition,
            Some(Transition::new(StateId::Idle, StateId::WallDismount, 1.0))
        );
        assert!(controller.is_locked(1.16));
        assert!(!controller.is_locked(1.17));
        assert_eq!(controller.locked_until(), 1.0 + controller.config().wall_dismount_duration);

        // 锁定期间保持，到期后落回 Fall
        controller.evaluate(1.1);
        assert_eq!(controller.current_state(), StateId::WallDismount);
        controller.evaluate(1.2);
        assert_eq!(controller.current_state(), StateId::Fall);
    }

    #[test]
    fn test_jump_ignored_while_climbing_ledge() {
        let mut controller = controller();
        controller.provider_mut().climbing_ledge = true;
        controller.on_jumped(true);
        assert!(!controller.latches().jumped);

        controller.provider_mut().climbing_ledge = false;
        controller.on_jumped(true);
        assert!(controller.latches().jumped);
        assert!(controller.latches().wall_jumped);
    }

    #[test]
    fn test_ledge_climb_preempts_and_releases() {
        let mut controller = controller();
        controller.on_attacked();
        controller.evaluate(0.0);
        assert!(controller.is_locked(0.1));

        controller.on_ledge_climb_changed(true);
        assert!(!controller.is_locked(0.1));
        controller.evaluate(0.1);
        assert_eq!(controller.current_state(), StateId::LedgeClimb);
        assert!(controller.is_locked(0.5));

        // 攀边结束时即使锁定未到期也立即退出
        controller.on_ledge_climb_changed(false);
        controller.evaluate(0.2);
        assert_eq!(controller.current_state(), StateId::Idle);
    }

    #[test]
    fn test_force_unlock() {
        let mut controller = controller();
        controller.on_grounded_changed(true, 100.0);
        controller.evaluate(0.0);
        assert_eq!(controller.current_state(), StateId::Land);

        controller.force_unlock();
        controller.provider_mut().input_x = -1.0;
        controller.evaluate(0.01);
        assert_eq!(controller.current_state(), StateId::Walk);
    }

    #[test]
    fn test_reset_on_respawn() {
        let mut controller = controller();
        controller.on_attacked();
        controller.evaluate(0.0);
        controller.on_ledge_climb_changed(true);
        controller.on_jumped(true);

        controller.reset();
        assert_eq!(controller.current_state(), StateId::Idle);
        assert!(!controller.is_locked(0.0));
        assert_eq!(*controller.latches(), Latches::default());
        assert_eq!(controller.sink().len(), 1);
    }

    #[test]
    fn test_shared_physics_provider() {
        let physics = Rc::new(RefCell::new(PhysicsSnapshot::airborne(-2.0)));
        let mut controller = AnimationController::new(
            AnimConfig::default(),
            Rc::clone(&physics),
            TransitionLog::new(),
        );

        controller.evaluate(0.0);
        assert_eq!(controller.current_state(), StateId::Fall);

        *physics.borrow_mut() = PhysicsSnapshot::airborne(-2.0).on_wall(WallDirection::Left);
        controller.evaluate(0.1);
        assert_eq!(controller.current_state(), StateId::WallSlide);
        assert_eq!(controller.sink().entries_into(StateId::WallSlide), 1);
    }

    #[test]
    fn test_push_while_physics_borrowed() {
        let physics = Rc::new(RefCell::new(PhysicsSnapshot::grounded()));
        let mut controller =
            AnimationController::new(AnimConfig::default(), Rc::clone(&physics), ());

        {
            let mut body = physics.borrow_mut();
            body.grounded = false;
            body.speed.y = 5.0;
            controller.on_jumped(false);
            controller.on_ledge_climb_changed(false);
        }
        assert!(controller.latches().jumped);

        controller.evaluate(0.0);
        assert_eq!(controller.current_state(), StateId::Jump);
    }

    #[test]
    fn test_jump_ignored_while_shared_physics_climbs_ledge() {
        let physics = Rc::new(RefCell::new(PhysicsSnapshot::grounded()));
        physics.borrow_mut().climbing_ledge = true;
        let mut controller =
            AnimationController::new(AnimConfig::default(), Rc::clone(&physics), ());

        controller.on_jumped(false);
        assert!(!controller.latches().jumped);
    }

    #[test]
    #[should_panic(expected = "时间倒退")]
    #[cfg(debug_assertions)]
    fn test_time_must_not_go_backwards() {
        let mut controller = controller();
        controller.evaluate(1.0);
        controller.evaluate(0.5);
    }

    #[test]
    fn test_jump_trace_snapshot() {
        let mut controller = controller();
        let frames: [(f64, PhysicsSnapshot, Option<fn(&mut Controller)>); 7] = [
            (0.0, PhysicsSnapshot::grounded().with_input_x(1.0), None),
            (
                0.1,
                PhysicsSnapshot::airborne(6.0).with_air_jumps(1),
                Some(|c: &mut Controller| c.on_jumped(false)),
            ),
            (
                0.2,
                PhysicsSnapshot::airborne(4.0).with_air_jumps(0),
                Some(|c: &mut Controller| c.on_air_jumped()),
            ),
            (0.3, PhysicsSnapshot::airborne(-3.0).with_air_jumps(0), None),
            (
                0.4,
                PhysicsSnapshot::grounded(),
                Some(|c: &mut Controller| c.on_grounded_changed(true, 30.0)),
            ),
            (0.45, PhysicsSnapshot::grounded(), None),
            (0.6, PhysicsSnapshot::grounded(), None),
        ];

        for (now, snapshot, push) in frames {
            *controller.provider_mut() = snapshot;
            if let Some(push) = push {
                push(&mut controller);
            }
            controller.evaluate(now);
        }

        let trace = controller
            .sink()
            .iter()
            .map(|t| format!("{:.2} {}", t.at, t))
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(trace, @r"
        0.00 Idle -> Walk
        0.10 Walk -> Jump
        0.30 Jump -> Fall
        0.40 Fall -> Land
        0.60 Land -> Idle
        ");
    }
}
