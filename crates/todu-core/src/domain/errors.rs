//! Errors - エラー型
//!
//! Task Store の操作はエラーを返しません（見つからない id は no-op）。
//! ここに定義するのは入力のパースと設定ファイル読み込み、
//! そして通知サービス境界のエラーだけです。

use std::path::PathBuf;

use thiserror::Error;

/// TodoError は入力値・設定まわりのエラー
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("priority must be 0, 1 or 2 (got {0})")]
    InvalidPriority(u8),

    #[error("unknown category label '{0}'")]
    UnknownCategory(String),

    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("failed to read settings file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid log filter: {0}")]
    InvalidLogFilter(String),
}

/// NotifyError は外部通知サービスが返すエラー
///
/// 境界でログに記録されるだけで、Task Store には伝播しません。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("notification permission denied")]
    PermissionDenied,

    #[error("notification service unavailable: {0}")]
    Unavailable(String),
}
