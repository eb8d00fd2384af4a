//! # Error 模块
//!
//! 定义 anim-runtime 中使用的错误类型。
//!
//! 状态选择与控制器本身是全函数，不会产生错误；
//! 唯一可能出错的入口是配置校验。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 时长为负数
    #[error("时长 '{field}' 不能为负数：{value}")]
    NegativeDuration { field: &'static str, value: f64 },

    /// 数值不是有限值（NaN 或无穷）
    #[error("字段 '{field}' 必须是有限值：{value}")]
    NonFinite { field: &'static str, value: f64 },

    /// 阈值为负数
    #[error("阈值 '{field}' 不能为负数：{value}")]
    NegativeThreshold { field: &'static str, value: f64 },
}

/// Result 类型别名
pub type AnimResult<T> = Result<T, ConfigError>;
