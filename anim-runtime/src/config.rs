//! # Config 模块
//!
//! 动画控制器的可调参数：锁定时长、落地冲击阈值、零速判定容差。
//!
//! 所有字段都有默认值，反序列化时可以只写出需要覆盖的字段。

use serde::{Deserialize, Serialize};

use crate::error::{AnimResult, ConfigError};

/// 动画控制器配置
///
/// 时长单位均为秒。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimConfig {
    /// 攀上边缘动画时长
    #[serde(default = "default_ledge_climb_duration")]
    pub ledge_climb_duration: f64,

    /// 攻击动画时长
    #[serde(default = "default_attack_anim_time")]
    pub attack_anim_time: f64,

    /// 撞墙动画时长
    #[serde(default = "default_wall_hit_anim_time")]
    pub wall_hit_anim_time: f64,

    /// 落地动画时长
    #[serde(default = "default_land_anim_duration")]
    pub land_anim_duration: f64,

    /// 离墙动画时长
    #[serde(default = "default_wall_dismount_duration")]
    pub wall_dismount_duration: f64,

    /// 触发落地动画的最小冲击力
    #[serde(default = "default_min_impact_force")]
    pub min_impact_force: f32,

    /// 速度判零的容差
    ///
    /// 默认 0，即精确比较。物理系统不把速度吸附到 0 时可以调大。输入轴始终精确比较。
    #[serde(default)]
    pub zero_velocity_epsilon: f32,
}

// 默认值函数
fn default_ledge_climb_duration() -> f64 {
    0.5
}

fn default_attack_anim_time() -> f64 {
    0.25
}

fn default_wall_hit_anim_time() -> f64 {
    0.167
}

fn default_land_anim_duration() -> f64 {
    0.1
}

fn default_wall_dismount_duration() -> f64 {
    0.167
}

fn default_min_impact_force() -> f32 {
    20.0
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            ledge_climb_duration: default_ledge_climb_duration(),
            attack_anim_time: default_attack_anim_time(),
            wall_hit_anim_time: default_wall_hit_anim_time(),
            land_anim_duration: default_land_anim_duration(),
            wall_dismount_duration: default_wall_dismount_duration(),
            min_impact_force: default_min_impact_force(),
            zero_velocity_epsilon: 0.0,
        }
    }
}

impl AnimConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> AnimResult<()> {
        let durations = [
            ("ledge_climb_duration", self.ledge_climb_duration),
            ("attack_anim_time", self.attack_anim_time),
            ("wall_hit_anim_time", self.wall_hit_anim_time),
            ("land_anim_duration", self.land_anim_duration),
            ("wall_dismount_duration", self.wall_dismount_duration),
        ];
        for (field, value) in durations {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeDuration { field, value });
            }
        }

        let thresholds = [
            ("min_impact_force", self.min_impact_force),
            ("zero_velocity_epsilon", self.zero_velocity_epsilon),
        ];
        for (field, value) in thresholds {
            let value = f64::from(value);
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeThreshold { field, value });
            }
        }

        Ok(())
    }

    /// `v` 是否视为 0
    pub(crate) fn is_zero(&self, v: f32) -> bool {
        v.abs() <= self.zero_velocity_epsilon
    }

    /// `v` 是否视为正
    pub(crate) fn is_positive(&self, v: f32) -> bool {
        v > self.zero_velocity_epsilon
    }

    /// `v` 是否视为负
    pub(crate) fn is_negative(&self, v: f32) -> bool {
        v < -self.zero_velocity_epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnimConfig::default();
        assert_eq!(config.attack_anim_time, 0.25);
        assert_eq!(config.land_anim_duration, 0.1);
        assert_eq!(config.min_impact_force, 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnimConfig = serde_json::from_str(r#"{ "attack_anim_time": 0.4 }"#).unwrap();
        assert_eq!(config.attack_anim_time, 0.4);
        assert_eq!(config.wall_hit_anim_time, 0.167);
        assert_eq!(config.zero_velocity_epsilon, 0.0);
    }

    #[test]
    fn test_validate_rejects_negative_duration() {
        let config = AnimConfig {
            land_anim_duration: -0.1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeDuration {
                field: "land_anim_duration",
                value: -0.1
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = AnimConfig {
            attack_anim_time: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "attack_anim_time", .. })
        ));

        let config = AnimConfig {
            zero_velocity_epsilon: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "zero_velocity_epsilon", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let config = AnimConfig {
            min_impact_force: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeThreshold { field: "min_impact_force", .. })
        ));
    }

    #[test]
    fn test_zero_comparisons() {
        let exact = AnimConfig::default();
        assert!(exact.is_zero(0.0));
        assert!(exact.is_zero(-0.0));
        assert!(!exact.is_zero(0.001));
        assert!(exact.is_positive(0.001));
        assert!(exact.is_negative(-0.001));

        let tolerant = AnimConfig {
            zero_velocity_epsilon: 0.01,
            ..Default::default()
        };
        assert!(tolerant.is_zero(0.005));
        assert!(!tolerant.is_positive(0.005));
        assert!(!tolerant.is_negative(-0.005));
        assert!(tolerant.is_negative(-0.02));
    }
}
