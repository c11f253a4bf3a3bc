//! 纯内存的参考渲染引擎，行为与符合 WebVTT 规范的 `VTTCue`/`TextTrack` 一致。

use serde::Serialize;

use crate::platform::{
    AlignSetting, LineAlignSetting, PlatformCue, PositionAlignSetting, TextTrack, VerticalSetting,
};

/// 一个 WebVTT 字幕对象。未设置的属性保持 WebVTT 的默认值（`auto`）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VttCue {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub align: AlignSetting,
    pub line_align: Option<LineAlignSetting>,
    pub position_align: Option<PositionAlignSetting>,
    pub vertical: Option<VerticalSetting>,
    pub snap_to_lines: bool,
    pub line: Option<f64>,
    pub position: Option<f64>,
    pub size: Option<f64>,
}

impl PlatformCue for VttCue {
    fn new(start_time: f64, end_time: f64, text: &str) -> Self {
        Self {
            start_time,
            end_time,
            text: text.to_owned(),
            align: AlignSetting::Center,
            line_align: None,
            position_align: None,
            vertical: None,
            snap_to_lines: true,
            line: None,
            position: None,
            size: None,
        }
    }

    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn end_time(&self) -> f64 {
        self.end_time
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn align(&self) -> AlignSetting {
        self.align
    }

    fn set_align(&mut self, align: AlignSetting) {
        self.align = align;
    }

    fn set_line_align(&mut self, line_align: LineAlignSetting) {
        self.line_align = Some(line_align);
    }

    fn set_position_align(&mut self, position_align: PositionAlignSetting) {
        self.position_align = Some(position_align);
    }

    fn set_vertical(&mut self, vertical: VerticalSetting) {
        self.vertical = Some(vertical);
    }

    fn set_snap_to_lines(&mut self, snap_to_lines: bool) {
        self.snap_to_lines = snap_to_lines;
    }

    fn set_line(&mut self, line: f64) {
        self.line = Some(line);
    }

    fn set_position(&mut self, position: f64) {
        self.position = Some(position);
    }

    fn set_size(&mut self, size: f64) {
        self.size = Some(size);
    }
}

/// 按添加顺序保存字幕对象的轨道。
#[derive(Debug, Clone, Default, Serialize)]
pub struct InMemoryTrack {
    pub label: Option<String>,
    pub language: Option<String>,
    cues: Vec<VttCue>,
}

impl InMemoryTrack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(label: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            language: Some(language.into()),
            cues: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

impl TextTrack for InMemoryTrack {
    type Cue = VttCue;

    fn add_cue(&mut self, cue: VttCue) {
        self.cues.push(cue);
    }

    fn remove_cue(&mut self, index: usize) -> Option<VttCue> {
        (index < self.cues.len()).then(|| self.cues.remove(index))
    }

    fn cues(&self) -> &[VttCue] {
        &self.cues
    }
}
