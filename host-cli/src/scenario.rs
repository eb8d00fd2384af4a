//! # Scenario 模块
//!
//! 场景文件：逐帧描述物理快照、游戏事件和期望状态。
//!
//! ## 文件格式
//!
//! ```json
//! {
//!   "name": "jump-and-land",
//!   "frames": [
//!     { "time": 0.0, "snapshot": { "grounded": true, "input_x": 1.0 }, "expect": "Walk" },
//!     { "time": 0.1, "snapshot": { "speed": { "x": 0.0, "y": 6.0 } },
//!       "events": [{ "type": "jumped", "wall_jumped": false }], "expect": "Jump" }
//!   ]
//! }
//! ```
//!
//! - 省略 `snapshot` 的帧沿用上一帧的快照
//! - `events` 在本帧求值之前按顺序推送
//! - `expect` 可选，回放时与本帧求值后的状态比对

use anim_runtime::{PhysicsSnapshot, StateId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 宿主推送给控制器的调用
///
/// 与控制器的 `on_*` 接口一一对应，另加强制解锁和重生。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameplayCall {
    /// 着地状态变化
    GroundedChanged {
        grounded: bool,
        #[serde(default)]
        impact_force: f32,
    },
    /// 贴墙状态变化
    WallGrabChanged { on_wall: bool },
    /// 起跳
    Jumped {
        #[serde(default)]
        wall_jumped: bool,
    },
    /// 空中跳跃
    AirJumped,
    /// 攻击
    Attacked,
    /// 离开墙面
    DismountedWall,
    /// 攀边状态变化
    LedgeClimbChanged { climbing: bool },
    /// 强制解除锁定
    ForceUnlock,
    /// 角色重生
    Respawn,
}

/// 单帧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// 本帧时间（秒）
    pub time: f64,
    /// 物理快照，省略时沿用上一帧
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PhysicsSnapshot>,
    /// 求值前推送的调用
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<GameplayCall>,
    /// 期望的求值结果
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<StateId>,
}

/// 场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// 场景名
    #[serde(default = "default_name")]
    pub name: String,
    /// 帧列表
    pub frames: Vec<Frame>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

impl Scenario {
    /// 从文件加载并校验
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|e| ScenarioError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// 从 JSON 文本解析并校验
    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario =
            serde_json::from_str(content).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// 校验帧序列
    ///
    /// 至少一帧；时间必须有限且单调不减。
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.frames.is_empty() {
            return Err(ScenarioError::Empty);
        }

        let mut previous = f64::NEG_INFINITY;
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.time.is_finite() {
                return Err(ScenarioError::NonFiniteTime { frame: index });
            }
            if frame.time < previous {
                return Err(ScenarioError::TimeWentBackwards {
                    frame: index,
                    time: frame.time,
                    previous,
                });
            }
            previous = frame.time;
        }
        Ok(())
    }

    /// 带期望的帧数
    pub fn expectation_count(&self) -> usize {
        self.frames.iter().filter(|f| f.expect.is_some()).count()
    }

    /// 场景时长（秒）
    pub fn duration(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }
}

/// 场景错误
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    /// IO 错误
    #[error("场景文件读取失败 {path}: {message}")]
    Io { path: String, message: String },

    /// 解析失败
    #[error("场景文件解析失败: {0}")]
    Parse(String),

    /// 没有帧
    #[error("场景不包含任何帧")]
    Empty,

    /// 时间不是有限值
    #[error("第 {frame} 帧：时间必须是有限值")]
    NonFiniteTime { frame: usize },

    /// 时间倒退
    #[error("第 {frame} 帧：时间 {time} 早于上一帧 {previous}")]
    TimeWentBackwards {
        frame: usize,
        time: f64,
        previous: f64,
    },
}
