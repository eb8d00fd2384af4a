//! # Config 模块
//!
//! 宿主配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use anim_runtime::{AnimConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// 日志级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 在当前级别基础上提高 `steps` 级详细程度
    pub fn raised_by(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let index = ORDER.iter().position(|l| *l == self).unwrap_or(2);
        ORDER[(index + steps as usize).min(ORDER.len() - 1)]
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// 宿主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// 动画控制器配置
    #[serde(default)]
    pub anim: AnimConfig,

    /// 日志级别
    #[serde(default)]
    pub log_level: LogLevel,

    /// 切换记录最大条数
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_history_capacity() -> usize {
    1000
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            anim: AnimConfig::default(),
            log_level: LogLevel::default(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 未指定路径时返回默认配置；文件不存在或解析失败时给出警告并使用默认配置。
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "使用默认配置");
                Self::default()
            }
        }
    }

    /// 严格加载：指定了路径则文件必须存在且可解析
    pub fn try_load(path: Option<&Path>) -> Result<Self, HostConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|e| HostConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| match e {
            HostConfigError::Parse { message, .. } => HostConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// 从 JSON 文本解析
    pub fn from_json(content: &str) -> Result<Self, HostConfigError> {
        serde_json::from_str(content).map_err(|e| HostConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HostConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| HostConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| HostConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), HostConfigError> {
        self.anim.validate()?;
        if self.history_capacity == 0 {
            return Err(HostConfigError::ZeroHistoryCapacity);
        }
        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum HostConfigError {
    /// IO 错误
    #[error("配置文件读写失败 {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// 解析失败
    #[error("配置文件解析失败 {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// 动画参数无效
    #[error("动画配置无效: {0}")]
    Anim(#[from] ConfigError),

    /// 切换记录容量为 0
    #[error("history_capacity 必须大于 0")]
    ZeroHistoryCapacity,
}
