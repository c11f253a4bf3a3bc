use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// 调用方提供的时间上下文，单位均为秒。
///
/// `period_start` 会被加到每一个求值出的时间上；
/// `segment_start`/`segment_end` 给出当前分段的窗口，按 [`SegmentClipping`] 的策略使用。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeContext {
    pub period_start: f64,
    pub segment_start: f64,
    pub segment_end: f64,
}

impl TimeContext {
    #[must_use]
    pub const fn new(period_start: f64, segment_start: f64, segment_end: f64) -> Self {
        Self {
            period_start,
            segment_start,
            segment_end,
        }
    }

    /// 分段窗口。`segment_end <= segment_start` 表示没有窗口（例如整片的字幕文件）。
    #[must_use]
    pub fn segment_window(&self) -> Option<(f64, f64)> {
        (self.segment_end > self.segment_start).then_some((self.segment_start, self.segment_end))
    }
}

/// 分段窗口对输出 Cue 的过滤策略。
///
/// 窗口与加上 `period_start` 之后的 Cue 时间比较。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SegmentClipping {
    /// 忽略分段窗口，输出所有 Cue。
    Ignore,
    /// 丢弃与窗口没有交集的 Cue，其余保持原样。
    #[default]
    Exclude,
    /// 丢弃与窗口没有交集的 Cue，并把其余 Cue 裁剪到窗口内。
    Clip,
}

impl SegmentClipping {
    /// 按策略处理一个区间，返回 `None` 表示该 Cue 应被丢弃。
    #[must_use]
    pub fn apply(self, start: f64, end: f64, context: &TimeContext) -> Option<(f64, f64)> {
        let Some((window_start, window_end)) = context.segment_window() else {
            return Some((start, end));
        };
        let overlaps = start < window_end && end > window_start;
        match self {
            Self::Ignore => Some((start, end)),
            Self::Exclude => overlaps.then_some((start, end)),
            Self::Clip => overlaps.then(|| (start.max(window_start), end.min(window_end))),
        }
    }
}

/// TTML 解析选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct TtmlParsingOptions {
    /// 分段窗口的处理方式。
    pub segment_clipping: SegmentClipping,
    /// `<style>` 通过 `style` 属性引用其它样式时，最多展开的层数。
    ///
    /// `0` 表示完全不展开样式之间的引用。
    pub style_chain_depth: usize,
}

impl Default for TtmlParsingOptions {
    fn default() -> Self {
        Self {
            segment_clipping: SegmentClipping::Exclude,
            style_chain_depth: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_window() {
        assert_eq!(TimeContext::default().segment_window(), None);
        assert_eq!(
            TimeContext::new(0.0, 10.0, 20.0).segment_window(),
            Some((10.0, 20.0))
        );
    }

    #[test]
    fn test_segment_clipping() {
        let context = TimeContext::new(0.0, 10.0, 20.0);

        assert_eq!(
            SegmentClipping::Ignore.apply(0.0, 5.0, &context),
            Some((0.0, 5.0))
        );
        assert_eq!(SegmentClipping::Exclude.apply(0.0, 5.0, &context), None);
        assert_eq!(SegmentClipping::Exclude.apply(20.0, 25.0, &context), None);
        assert_eq!(
            SegmentClipping::Exclude.apply(5.0, 15.0, &context),
            Some((5.0, 15.0))
        );
        assert_eq!(
            SegmentClipping::Clip.apply(5.0, 25.0, &context),
            Some((10.0, 20.0))
        );

        let no_window = TimeContext::default();
        assert_eq!(
            SegmentClipping::Clip.apply(5.0, 6.0, &no_window),
            Some((5.0, 6.0))
        );
    }

    #[test]
    fn test_options_default_and_builder() {
        let options = TtmlParsingOptions::default();
        assert_eq!(options.segment_clipping, SegmentClipping::Exclude);
        assert_eq!(SegmentClipping::default(), SegmentClipping::Exclude);
        assert_eq!(options.style_chain_depth, 1);

        let options = TtmlParsingOptionsBuilder::default()
            .segment_clipping(SegmentClipping::Clip)
            .build()
            .unwrap();
        assert_eq!(options.segment_clipping, SegmentClipping::Clip);
        assert_eq!(options.style_chain_depth, 1);

        let parsed: TtmlParsingOptions =
            serde_json::from_str(r#"{"segment_clipping":"Ignore"}"#).unwrap();
        assert_eq!(parsed.segment_clipping, SegmentClipping::Ignore);
        assert_eq!(parsed.style_chain_depth, 1);
    }
}
