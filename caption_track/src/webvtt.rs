//! 把轨道上当前的字幕对象序列化为 WebVTT 文档。

use std::fmt::{self, Write};

use crate::{
    memory::{InMemoryTrack, VttCue},
    platform::{AlignSetting, PositionAlignSetting, TextTrack},
};

/// 生成 WebVTT 文本，Cue 的顺序与轨道上的顺序一致。
pub fn to_webvtt(track: &InMemoryTrack) -> Result<String, fmt::Error> {
    let mut output = String::from("WEBVTT\n");

    if let Some(label) = &track.label {
        writeln!(output, "Kind: captions\nLabel: {label}")?;
    }
    if let Some(language) = &track.language {
        writeln!(output, "Language: {language}")?;
    }

    for cue in track.cues() {
        output.push('\n');
        write_cue(&mut output, cue)?;
    }

    Ok(output)
}

fn write_cue(output: &mut String, cue: &VttCue) -> fmt::Result {
    write!(
        output,
        "{} --> {}",
        format_timestamp(cue.start_time),
        format_timestamp(cue.end_time)
    )?;

    if let Some(vertical) = cue.vertical {
        write!(output, " vertical:{vertical}")?;
    }
    if let Some(line) = cue.line {
        let unit = if cue.snap_to_lines { "" } else { "%" };
        write!(output, " line:{line}{unit}")?;
        if let Some(line_align) = cue.line_align {
            write!(output, ",{line_align}")?;
        }
    }
    if let Some(position) = cue.position {
        write!(output, " position:{position}%")?;
        if let Some(position_align) = cue.position_align
            && position_align != PositionAlignSetting::Auto
        {
            write!(output, ",{position_align}")?;
        }
    }
    if let Some(size) = cue.size {
        write!(output, " size:{size}%")?;
    }
    match cue.align {
        AlignSetting::Center | AlignSetting::Middle => {}
        align => {
            write!(output, " align:{align}")?;
        }
    }
    output.push('\n');

    // WebVTT 的 Cue 以空行结束，文本中不能出现空行
    for line in cue.text.lines().filter(|line| !line.trim().is_empty()) {
        output.push_str(&escape_text(line));
        output.push('\n');
    }
    Ok(())
}

/// 格式化为 `HH:MM:SS.mmm`。
fn format_timestamp(seconds: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LineAlignSetting, PlatformCue, VerticalSetting};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(62.05), "00:01:02.050");
        assert_eq!(format_timestamp(3723.2), "01:02:03.200");
        assert_eq!(format_timestamp(-1.0), "00:00:00.000");
    }

    #[test]
    fn test_to_webvtt() {
        let mut track = InMemoryTrack::new();

        let mut first = VttCue::new(20.0, 40.0, "Tom & Jerry\n<3");
        first.set_vertical(VerticalSetting::Lr);
        first.set_line(5.0);
        first.set_line_align(LineAlignSetting::Start);
        first.set_position(10.0);
        first.set_position_align(PositionAlignSetting::LineLeft);
        first.set_size(80.0);
        first.set_align(AlignSetting::Left);
        track.add_cue(first);

        let mut second = VttCue::new(41.0, 42.5, "Centered");
        second.set_snap_to_lines(false);
        second.set_line(90.0);
        second.set_align(AlignSetting::Middle);
        track.add_cue(second);

        let expected = "WEBVTT\n\
            \n\
            00:00:20.000 --> 00:00:40.000 vertical:lr line:5,start position:10%,line-left size:80% align:left\n\
            Tom &amp; Jerry\n\
            &lt;3\n\
            \n\
            00:00:41.000 --> 00:00:42.500 line:90%\n\
            Centered\n";
        assert_eq!(to_webvtt(&track).unwrap(), expected);
    }

    #[test]
    fn test_payload_cannot_form_timing_line() {
        let mut track = InMemoryTrack::new();
        track.add_cue(VttCue::new(
            1.0,
            2.0,
            "00:00:05.000 --> 00:00:06.000\n\nnext -->",
        ));

        let vtt = to_webvtt(&track).unwrap();
        assert_eq!(
            vtt,
            "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n00:00:05.000 --&gt; 00:00:06.000\nnext --&gt;\n"
        );
        assert_eq!(vtt.matches("-->").count(), 1);
    }

    #[test]
    fn test_header_with_label() {
        let track = InMemoryTrack::with_label("English", "en");
        assert_eq!(
            to_webvtt(&track).unwrap(),
            "WEBVTT\nKind: captions\nLabel: English\nLanguage: en\n"
        );
    }
}
