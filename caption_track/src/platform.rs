//! 平台字幕轨道与字幕对象的抽象。
//!
//! 这里的关键字与 WebVTT / HTML `TextTrackCue` 的取值一一对应。

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// 字幕对象的 `align` 取值。
///
/// `Middle` 是旧版渲染引擎对 `center` 的叫法。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlignSetting {
    Start,
    #[default]
    Center,
    End,
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LineAlignSetting {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PositionAlignSetting {
    LineLeft,
    Center,
    LineRight,
    Auto,
}

/// 竖排方向。横排的字幕对象不设置该属性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerticalSetting {
    Lr,
    Rl,
}

/// 渲染引擎提供的单个字幕对象。
///
/// 起止时间与文本在构造时确定。其余属性的 setter 都有空实现：
/// 不支持某个属性的引擎直接忽略它即可。
pub trait PlatformCue {
    fn new(start_time: f64, end_time: f64, text: &str) -> Self
    where
        Self: Sized;

    fn start_time(&self) -> f64;

    fn end_time(&self) -> f64;

    fn text(&self) -> &str;

    /// 引擎实际持有的对齐值，可能与最近一次 [`PlatformCue::set_align`] 的参数不同。
    fn align(&self) -> AlignSetting;

    fn set_align(&mut self, align: AlignSetting);

    fn set_line_align(&mut self, _line_align: LineAlignSetting) {}

    fn set_position_align(&mut self, _position_align: PositionAlignSetting) {}

    fn set_vertical(&mut self, _vertical: VerticalSetting) {}

    fn set_snap_to_lines(&mut self, _snap_to_lines: bool) {}

    fn set_line(&mut self, _line: f64) {}

    fn set_position(&mut self, _position: f64) {}

    fn set_size(&mut self, _size: f64) {}
}

/// 渲染引擎提供的字幕轨道。
///
/// 只要求三种能力：添加一个字幕对象、按当前枚举顺序中的下标移除一个字幕对象、
/// 枚举当前所有字幕对象。
pub trait TextTrack {
    type Cue: PlatformCue;

    fn add_cue(&mut self, cue: Self::Cue);

    /// 移除 `cues()` 中下标为 `index` 的字幕对象，下标越界时返回 `None`。
    fn remove_cue(&mut self, index: usize) -> Option<Self::Cue>;

    fn cues(&self) -> &[Self::Cue];
}
