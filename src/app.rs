use std::io::Read;
use std::path::Path;

use caption_core::{TimeContext, TtmlParsingOptions};
use caption_track::{CaptionTrackAdapter, InMemoryTrack, to_webvtt};
use tracing::{debug, info};
use ttml_cue_parser::parse_ttml;

use crate::{
    app_settings::{AppSettings, OutputFormat},
    cli::Cli,
    error::{AppError, AppResult},
};

/// 一次转换所需的全部参数，由命令行参数与配置文件合并而来。
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub time_context: TimeContext,
    pub options: TtmlParsingOptions,
    pub format: OutputFormat,
    pub evict: Option<(f64, f64)>,
}

impl ConversionRequest {
    /// 命令行参数优先于配置文件。
    pub fn from_cli(cli: &Cli, settings: &AppSettings) -> AppResult<Self> {
        let mut options = settings.parsing.clone();
        if let Some(clipping) = cli.clipping {
            options.segment_clipping = clipping;
        }
        if let Some(depth) = cli.style_chain_depth {
            options.style_chain_depth = depth;
        }

        let evict = match cli.evict.as_deref() {
            None => None,
            Some(&[start, end]) => Some((start, end)),
            Some(other) => {
                return Err(AppError::Custom(format!(
                    "--evict 需要两个数值，实际得到 {other:?}"
                )));
            }
        };

        Ok(Self {
            time_context: TimeContext::new(cli.period_start, cli.segment_start, cli.segment_end),
            options,
            format: cli.format.unwrap_or(settings.output_format),
            evict,
        })
    }
}

/// 读取输入文件，`-` 表示标准输入。
pub fn read_input(path: &Path) -> AppResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(std::fs::read(path)?)
}

/// 解析 TTML、推送到内存轨道、按需移除一段时间范围，然后序列化轨道。
pub fn convert(content: &[u8], request: &ConversionRequest) -> AppResult<String> {
    let cues = parse_ttml(content, &request.time_context, &request.options)?;
    info!("解析得到 {} 条 Cue", cues.len());

    let mut adapter = CaptionTrackAdapter::new(InMemoryTrack::new());
    adapter.append(&cues);

    if let Some((start, end)) = request.evict {
        let removed = adapter.remove(start, end);
        debug!("移除范围 [{start}, {end}) 内的 {removed} 条字幕");
    }

    let output = match request.format {
        OutputFormat::Vtt => to_webvtt(adapter.track())?,
        OutputFormat::Json => serde_json::to_string_pretty(adapter.track())?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caption_core::{CaptionError, SegmentClipping};
    use clap::Parser;
    use std::io::Write;

    const SAMPLE: &str = r#"<tt xmlns:tts="http://www.w3.org/ns/ttml#styling">
        <body>
            <div>
                <p begin="1s" end="2s">One</p>
                <p begin="2s" end="3s">Two</p>
                <p begin="3s" end="4s" tts:textAlign="right">Three</p>
            </div>
        </body>
    </tt>"#;

    fn request(format: OutputFormat) -> ConversionRequest {
        ConversionRequest {
            time_context: TimeContext::default(),
            options: TtmlParsingOptions::default(),
            format,
            evict: None,
        }
    }

    #[test]
    fn test_convert_to_webvtt_with_eviction() {
        let mut request = request(OutputFormat::Vtt);
        request.evict = Some((1.5, 2.0));

        let output = convert(SAMPLE.as_bytes(), &request).unwrap();
        assert_eq!(
            output,
            "WEBVTT\n\n00:00:02.000 --> 00:00:03.000\nTwo\n\n00:00:03.000 --> 00:00:04.000 align:right\nThree\n"
        );
    }

    #[test]
    fn test_convert_to_json() {
        let output = convert(SAMPLE.as_bytes(), &request(OutputFormat::Json)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let cues = json["cues"].as_array().unwrap();
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[2]["text"], "Three");
        assert_eq!(cues[2]["align"], "right");
        assert_eq!(cues[2]["position_align"], "line-right");
    }

    #[test]
    fn test_convert_reports_parse_errors() {
        let err = convert(b"<test></test>", &request(OutputFormat::Vtt)).unwrap_err();
        assert!(matches!(err, AppError::Caption(CaptionError::InvalidXml(_))));
    }

    #[test]
    fn test_request_from_cli_overrides_settings() {
        let settings = AppSettings {
            output_format: OutputFormat::Json,
            ..Default::default()
        };
        let cli = Cli::parse_from([
            "unicaption",
            "in.ttml",
            "--clipping",
            "ignore",
            "--segment-start",
            "1",
            "--segment-end",
            "2",
            "--evict",
            "0",
            "1",
        ]);
        let request = ConversionRequest::from_cli(&cli, &settings).unwrap();
        assert_eq!(request.options.segment_clipping, SegmentClipping::Ignore);
        assert_eq!(request.format, OutputFormat::Json);
        assert_eq!(request.evict, Some((0.0, 1.0)));
        assert_eq!(request.time_context.segment_window(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let content = read_input(file.path()).unwrap();
        assert_eq!(content, SAMPLE.as_bytes());

        let missing = read_input(Path::new("/definitely/not/here.ttml"));
        assert!(matches!(missing, Err(AppError::Io(_))));
    }
}
