//! unicaption 的核心类型。
//!
//! 所有字幕格式解析器都输出这里定义的 [`Cue`]，渲染适配层也只认识这一种表示。

pub mod config;
pub mod cue;
pub mod error;

pub use config::*;
pub use cue::*;
pub use error::*;
