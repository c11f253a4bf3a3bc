//! 与格式无关的字幕 Cue 及其样式枚举。

use bitflags::bitflags;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// 文本在行内的对齐方式。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TextAlign {
    Start,
    Center,
    End,
    Left,
    Right,
}

/// Cue 框在行方向上的锚点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LineAlign {
    Start,
    Center,
    End,
}

/// Cue 框在位置方向上的锚点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PositionAlign {
    Left,
    Center,
    Right,
}

/// 书写方向。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum WritingDirection {
    #[default]
    Horizontal,
    /// 竖排，列从左向右推进。
    VerticalLeft,
    /// 竖排，列从右向左推进。
    VerticalRight,
}

/// `line` 数值的含义。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum LineInterpretation {
    /// 行号
    #[default]
    LineNumber,
    /// 视口百分比
    Percentage,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

bitflags! {
    /// 文本装饰线的集合。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TextDecoration: u8 {
        const UNDERLINE = 1;
        const LINE_THROUGH = 1 << 1;
        const OVERLINE = 1 << 2;
    }
}

/// 一层样式对装饰线集合的修改：先移除 `remove`，再加入 `add`。
///
/// `noLineThrough` 这类声明只会从继承来的集合中删掉对应项，
/// 所以样式层保存的是“修改”而不是最终集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecorationChange {
    pub add: TextDecoration,
    pub remove: TextDecoration,
}

impl DecorationChange {
    pub fn insert(&mut self, decoration: TextDecoration) {
        self.add.insert(decoration);
        self.remove.remove(decoration);
    }

    pub fn exclude(&mut self, decoration: TextDecoration) {
        self.remove.insert(decoration);
        self.add.remove(decoration);
    }

    /// 将这层修改应用到继承来的集合上。
    #[must_use]
    pub fn apply(self, inherited: TextDecoration) -> TextDecoration {
        inherited.difference(self.remove).union(self.add)
    }

    /// 把更高优先级的一层叠加到当前修改之上。
    #[must_use]
    pub fn then(self, later: Self) -> Self {
        Self {
            add: self.add.difference(later.remove).union(later.add),
            remove: self.remove.difference(later.add).union(later.remove),
        }
    }
}

/// 一条字幕：一个时间区间加上它的显示样式。
///
/// 所有时间都以秒为单位，位于解析器输出的绝对时间轴上。
/// 只有 `start_time < end_time` 的 Cue 才可以被渲染。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
pub struct Cue {
    pub start_time: f64,
    pub end_time: f64,
    /// 文本内容，`<br/>` 已被转换为 `\n`。
    pub payload: String,

    pub text_align: Option<TextAlign>,
    pub line_align: Option<LineAlign>,
    pub position_align: Option<PositionAlign>,
    pub writing_direction: WritingDirection,
    pub line_interpretation: LineInterpretation,
    pub line: Option<f64>,
    pub position: Option<f64>,
    pub size: Option<f64>,

    pub color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub line_height: Option<String>,
    pub wrap_line: Option<bool>,
    #[serde(default)]
    pub text_decoration: TextDecoration,
}

impl Cue {
    pub fn new(start_time: f64, end_time: f64, payload: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            payload: payload.into(),
            ..Default::default()
        }
    }

    /// 起止时间是否构成一个非空区间。`NaN` 永远不可渲染。
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.start_time < self.end_time
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
