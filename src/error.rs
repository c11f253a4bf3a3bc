use std::sync::Arc;

use caption_core::CaptionError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AppError {
    #[error("字幕解析错误 [{code}]: {0}", code = .0.code())]
    Caption(#[from] CaptionError),

    #[error("IO 错误: {0}")]
    Io(Arc<std::io::Error>),

    #[error("JSON 序列化/反序列化错误: {0}")]
    Json(Arc<serde_json::Error>),

    #[error("输出格式化失败: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("错误: {0}")]
    Custom(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
