use caption_core::{
    Cue, LineAlign, LineInterpretation, PositionAlign, TextAlign, TimeContext, TtmlParsingOptions,
    WritingDirection,
};
use caption_track::{
    AlignSetting, CaptionTrackAdapter, InMemoryTrack, LineAlignSetting, PlatformCue,
    PositionAlignSetting, TextTrack, VerticalSetting, to_webvtt,
};
use ttml_cue_parser::parse_ttml_str;

/// 旧版渲染引擎：默认 `align` 为 `middle`，并且不接受 `center`。
#[derive(Debug, Clone)]
struct LegacyCue {
    start_time: f64,
    end_time: f64,
    text: String,
    align: AlignSetting,
}

impl PlatformCue for LegacyCue {
    fn new(start_time: f64, end_time: f64, text: &str) -> Self {
        Self {
            start_time,
            end_time,
            text: text.to_owned(),
            align: AlignSetting::Middle,
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
        if align != AlignSetting::Center {
            self.align = align;
        }
    }
}

#[derive(Debug, Default)]
struct LegacyTrack {
    cues: Vec<LegacyCue>,
    added: usize,
}

impl TextTrack for LegacyTrack {
    type Cue = LegacyCue;

    fn add_cue(&mut self, cue: LegacyCue) {
        self.added += 1;
        self.cues.push(cue);
    }

    fn remove_cue(&mut self, index: usize) -> Option<LegacyCue> {
        (index < self.cues.len()).then(|| self.cues.remove(index))
    }

    fn cues(&self) -> &[LegacyCue] {
        &self.cues
    }
}

#[test]
fn test_converts_cues_to_vtt_cues() {
    let mut adapter = CaptionTrackAdapter::new(InMemoryTrack::new());

    let mut cue1 = Cue::new(20.0, 40.0, "Test");
    cue1.position_align = Some(PositionAlign::Left);
    cue1.line_align = Some(LineAlign::Start);
    cue1.size = Some(80.0);
    cue1.text_align = Some(TextAlign::Left);
    cue1.writing_direction = WritingDirection::VerticalLeft;
    cue1.line_interpretation = LineInterpretation::LineNumber;
    cue1.line = Some(5.0);
    cue1.position = Some(10.0);

    let mut cue2 = Cue::new(20.0, 40.0, "Test");
    cue2.position_align = Some(PositionAlign::Right);
    cue2.line_align = Some(LineAlign::End);
    cue2.text_align = Some(TextAlign::Right);
    cue2.writing_direction = WritingDirection::VerticalRight;
    cue2.line_interpretation = LineInterpretation::Percentage;
    cue2.line = Some(5.0);

    let mut cue3 = Cue::new(20.0, 40.0, "Test");
    cue3.position_align = Some(PositionAlign::Center);
    cue3.line_align = Some(LineAlign::Center);
    cue3.text_align = Some(TextAlign::Start);
    cue3.writing_direction = WritingDirection::Horizontal;

    adapter.append(&[cue1, cue2, cue3]);
    let cues = adapter.track().cues();
    assert_eq!(cues.len(), 3);

    assert_eq!(cues[0].start_time, 20.0);
    assert_eq!(cues[0].end_time, 40.0);
    assert_eq!(cues[0].text, "Test");
    assert_eq!(cues[0].line_align, Some(LineAlignSetting::Start));
    assert_eq!(cues[0].position_align, Some(PositionAlignSetting::LineLeft));
    assert_eq!(cues[0].size, Some(80.0));
    assert_eq!(cues[0].align, AlignSetting::Left);
    assert_eq!(cues[0].vertical, Some(VerticalSetting::Lr));
    assert!(cues[0].snap_to_lines);
    assert_eq!(cues[0].line, Some(5.0));
    assert_eq!(cues[0].position, Some(10.0));

    assert_eq!(cues[1].line_align, Some(LineAlignSetting::End));
    assert_eq!(cues[1].position_align, Some(PositionAlignSetting::LineRight));
    assert_eq!(cues[1].align, AlignSetting::Right);
    assert_eq!(cues[1].vertical, Some(VerticalSetting::Rl));
    assert!(!cues[1].snap_to_lines);
    assert_eq!(cues[1].line, Some(5.0));
    assert_eq!(cues[1].size, None);

    assert_eq!(cues[2].line_align, Some(LineAlignSetting::Center));
    assert_eq!(cues[2].position_align, Some(PositionAlignSetting::Center));
    assert_eq!(cues[2].align, AlignSetting::Start);
    assert_eq!(cues[2].vertical, None);
}

#[test]
fn test_center_workaround_for_legacy_engine() {
    let mut cue = Cue::new(20.0, 40.0, "Test");
    cue.text_align = Some(TextAlign::Center);

    let mut adapter = CaptionTrackAdapter::new(LegacyTrack::default());
    adapter.append(&[cue]);

    let cues = adapter.track().cues();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Test");
    assert_eq!(cues[0].align, AlignSetting::Middle);
}

#[test]
fn test_center_kept_on_conforming_engine() {
    let mut cue = Cue::new(20.0, 40.0, "Test");
    cue.text_align = Some(TextAlign::Center);

    let mut adapter = CaptionTrackAdapter::new(InMemoryTrack::new());
    adapter.append(&[cue]);
    assert_eq!(adapter.track().cues()[0].align, AlignSetting::Center);
}

#[test]
fn test_ignores_cues_with_start_not_before_end() {
    let mut adapter = CaptionTrackAdapter::new(LegacyTrack::default());
    adapter.append(&[Cue::new(60.0, 40.0, "Test"), Cue::new(40.0, 40.0, "Test")]);
    assert_eq!(adapter.track().added, 0);
}

#[test]
fn test_remove_boundary_law_on_legacy_engine() {
    let mut adapter = CaptionTrackAdapter::new(LegacyTrack::default());
    adapter.append(&[
        Cue::new(0.0, 1.0, "Test"),
        Cue::new(1.0, 2.0, "Test"),
        Cue::new(2.0, 3.0, "Test"),
    ]);

    assert_eq!(adapter.remove(0.0, 1.0), 1);
    assert_eq!(adapter.track().cues()[0].start_time, 1.0);
    assert_eq!(adapter.remove(0.5, 1.001), 1);
    assert_eq!(adapter.remove(3.0, 5.0), 0);
    assert_eq!(adapter.remove(2.9999, f64::INFINITY), 1);
    assert!(adapter.into_inner().cues.is_empty());
}

#[test]
fn test_parse_append_evict_and_serialize() {
    let ttml = r#"<tt xmlns:tts="http://www.w3.org/ns/ttml#styling">
        <head>
            <styling>
                <style xml:id="s1" tts:textAlign="left"/>
            </styling>
            <layout>
                <region xml:id="bottom" tts:origin="10% 80%" tts:extent="80% 10%"/>
            </layout>
        </head>
        <body region="bottom">
            <div>
                <p begin="00:00:01.000" end="00:00:02.000" style="s1">First<br/>line</p>
                <p begin="00:00:02.000" end="00:00:03.000">Second</p>
                <p begin="00:00:03.000" end="00:00:03.000">Empty range</p>
            </div>
        </body>
    </tt>"#;

    let cues = parse_ttml_str(
        ttml,
        &TimeContext::new(10.0, 0.0, 0.0),
        &TtmlParsingOptions::default(),
    )
    .unwrap();
    assert_eq!(cues.len(), 2);

    let mut adapter = CaptionTrackAdapter::new(InMemoryTrack::new());
    adapter.append(&cues);
    assert_eq!(adapter.track().len(), 2);

    assert_eq!(adapter.remove(12.0, 20.0), 1);

    let vtt = to_webvtt(adapter.track()).unwrap();
    assert_eq!(
        vtt,
        "WEBVTT\n\
        \n\
        00:00:11.000 --> 00:00:12.000 line:80%,start position:10%,line-left size:80% align:left\n\
        First\n\
        line\n"
    );
}
