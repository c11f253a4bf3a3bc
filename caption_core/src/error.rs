use quick_xml::{Error as QuickXmlErrorMain, events::attributes::AttrError as QuickXmlAttrError};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// 解析字幕文档时可能发生的致命错误。
///
/// 任何一种错误都会让整次解析失败，不会返回部分结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionError {
    /// 标记无法解析、缺少 `<tt>` 根元素，或声明了不支持的 `xml:space`。
    #[error("无效的 XML: {0}")]
    InvalidXml(String),
    /// 必需的时间属性存在但无法求值。
    #[error("无效的字幕 Cue: {0}")]
    InvalidTextCue(String),
}

/// 错误码，与 [`CaptionError`] 的变体一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidXml,
    InvalidTextCue,
}

/// 错误严重程度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Severity {
    Recoverable,
    Critical,
}

/// 错误所属的子系统。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Category {
    Text,
}

impl CaptionError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidXml(_) => ErrorCode::InvalidXml,
            Self::InvalidTextCue(_) => ErrorCode::InvalidTextCue,
        }
    }

    /// 解析错误总是致命的。
    #[must_use]
    pub const fn severity(&self) -> Severity {
        Severity::Critical
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        Category::Text
    }

    pub fn invalid_xml(detail: impl Into<String>) -> Self {
        Self::InvalidXml(detail.into())
    }

    pub fn invalid_text_cue(detail: impl Into<String>) -> Self {
        Self::InvalidTextCue(detail.into())
    }
}

impl From<QuickXmlErrorMain> for CaptionError {
    fn from(err: QuickXmlErrorMain) -> Self {
        Self::InvalidXml(err.to_string())
    }
}

impl From<QuickXmlAttrError> for CaptionError {
    fn from(err: QuickXmlAttrError) -> Self {
        Self::InvalidXml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for CaptionError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidXml(format!("文档不是有效的 UTF-8 文本: {err}"))
    }
}

impl From<CaptionError> for std::io::Error {
    fn from(err: CaptionError) -> Self {
        Self::other(err)
    }
}
