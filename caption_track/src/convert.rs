//! Cue 到平台字幕对象的转换。

use caption_core::{Cue, LineAlign, LineInterpretation, PositionAlign, TextAlign, WritingDirection};
use tracing::debug;

use crate::platform::{
    AlignSetting, LineAlignSetting, PlatformCue, PositionAlignSetting, VerticalSetting,
};

impl From<TextAlign> for AlignSetting {
    fn from(value: TextAlign) -> Self {
        match value {
            TextAlign::Start => Self::Start,
            TextAlign::Center => Self::Center,
            TextAlign::End => Self::End,
            TextAlign::Left => Self::Left,
            TextAlign::Right => Self::Right,
        }
    }
}

impl From<LineAlign> for LineAlignSetting {
    fn from(value: LineAlign) -> Self {
        match value {
            LineAlign::Start => Self::Start,
            LineAlign::Center => Self::Center,
            LineAlign::End => Self::End,
        }
    }
}

impl From<PositionAlign> for PositionAlignSetting {
    fn from(value: PositionAlign) -> Self {
        match value {
            PositionAlign::Left => Self::LineLeft,
            PositionAlign::Center => Self::Center,
            PositionAlign::Right => Self::LineRight,
        }
    }
}

/// 横排返回 `None`。
#[must_use]
pub const fn vertical_setting(direction: WritingDirection) -> Option<VerticalSetting> {
    match direction {
        WritingDirection::Horizontal => None,
        WritingDirection::VerticalLeft => Some(VerticalSetting::Lr),
        WritingDirection::VerticalRight => Some(VerticalSetting::Rl),
    }
}

/// 根据 Cue 构造一个平台字幕对象。
///
/// 调用方负责保证 `cue.start_time < cue.end_time`。
pub fn to_platform_cue<C: PlatformCue>(cue: &Cue) -> C {
    let mut platform_cue = C::new(cue.start_time, cue.end_time, &cue.payload);

    if let Some(vertical) = vertical_setting(cue.writing_direction) {
        platform_cue.set_vertical(vertical);
    }

    platform_cue.set_snap_to_lines(cue.line_interpretation == LineInterpretation::LineNumber);
    if let Some(line) = cue.line {
        platform_cue.set_line(line);
    }
    if let Some(position) = cue.position {
        platform_cue.set_position(position);
    }
    if let Some(size) = cue.size {
        platform_cue.set_size(size);
    }

    if let Some(line_align) = cue.line_align {
        platform_cue.set_line_align(line_align.into());
    }
    if let Some(position_align) = cue.position_align {
        platform_cue.set_position_align(position_align.into());
    }
    if let Some(text_align) = cue.text_align {
        apply_align(&mut platform_cue, text_align.into());
    }

    platform_cue
}

/// 设置对齐方式，并在引擎拒绝 `center` 时改用 `middle`。
pub fn apply_align<C: PlatformCue>(platform_cue: &mut C, align: AlignSetting) {
    platform_cue.set_align(align);

    if align == AlignSetting::Center && platform_cue.align() != AlignSetting::Center {
        debug!(
            "渲染引擎没有接受 align=center（实际为 {}），改用 middle",
            platform_cue.align()
        );
        platform_cue.set_align(AlignSetting::Middle);
    }
}
