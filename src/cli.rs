use std::path::PathBuf;

use caption_core::SegmentClipping;
use clap::Parser;

use crate::app_settings::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "unicaption",
    about = "把 TTML 字幕解析为字幕 Cue，并输出为 WebVTT 或 JSON",
    version,
    author
)]
pub struct Cli {
    /// TTML 文件路径，`-` 表示从标准输入读取
    pub input: PathBuf,

    /// 加到每个 Cue 时间上的偏移（秒）
    #[arg(long, default_value_t = 0.0)]
    pub period_start: f64,

    /// 分段窗口起点（秒）
    #[arg(long, default_value_t = 0.0)]
    pub segment_start: f64,

    /// 分段窗口终点（秒），不大于起点时表示没有窗口
    #[arg(long, default_value_t = 0.0)]
    pub segment_end: f64,

    /// 分段窗口策略：ignore|exclude|clip，默认取配置文件中的值
    #[arg(long)]
    pub clipping: Option<SegmentClipping>,

    /// 样式之间引用的最大展开层数，默认取配置文件中的值
    #[arg(long)]
    pub style_chain_depth: Option<usize>,

    /// 输出格式，默认取配置文件中的值
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// 输出前移除与 [START, END) 相交的字幕
    #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
    pub evict: Option<Vec<f64>>,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "unicaption",
            "subs.ttml",
            "--period-start",
            "10",
            "--segment-start",
            "0",
            "--segment-end",
            "30",
            "--clipping",
            "clip",
            "--format",
            "json",
            "--evict",
            "5",
            "7.5",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("subs.ttml"));
        assert_eq!(cli.period_start, 10.0);
        assert_eq!(cli.segment_end, 30.0);
        assert_eq!(cli.clipping, Some(SegmentClipping::Clip));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.evict, Some(vec![5.0, 7.5]));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["unicaption", "-"]).unwrap();
        assert_eq!(cli.period_start, 0.0);
        assert_eq!(cli.clipping, None);
        assert_eq!(cli.format, None);
        assert_eq!(cli.evict, None);
    }

    #[test]
    fn test_evict_requires_two_values() {
        assert!(Cli::try_parse_from(["unicaption", "a.ttml", "--evict", "5"]).is_err());
    }
}
