//! # TTML 解析器的工具函数
//!
//! 属性提取、文本空白处理以及百分比坐标解析。

use std::sync::LazyLock;

use caption_core::CaptionError;
use quick_xml::{Reader, events::BytesStart};
use regex::Regex;

use super::state::{TextSegment, WhitespaceMode};

static PERCENTAGE_PAIR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<first>\d+(?:\.\d+)?)%\s+(?P<second>\d+(?:\.\d+)?)%\s*$")
        .expect("编译 PERCENTAGE_PAIR_REGEX 失败")
});

/// 按本地名获取属性值，忽略命名空间前缀（`tts:color`、`xml:id` 等）。
pub(super) fn get_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    local_name: &[u8],
) -> Result<Option<String>, CaptionError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name {
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// 获取以空白分隔的 IDREFS 属性，例如 `style="s1 s2"`。
pub(super) fn get_id_list_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    local_name: &[u8],
) -> Result<Vec<String>, CaptionError> {
    Ok(get_attribute(e, reader, local_name)?
        .map(|value| value.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default())
}

/// 规范化文本中的空白字符
pub(super) fn normalize_text_whitespace_into(input: &str, output: &mut String) {
    output.clear();
    let mut first = true;
    for word in input.split_whitespace() {
        if !first {
            output.push(' ');
        }
        output.push_str(word);
        first = false;
    }
}

/// 按空白模式把段落内收集到的文本片段拼接成最终的 payload。
///
/// `default` 模式下，每个显式换行之间的文本折叠连续空白并去掉首尾空白；
/// `preserve` 模式下原样保留。
pub(super) fn render_payload(segments: &[TextSegment], mode: WhitespaceMode) -> String {
    let mut payload = String::new();
    match mode {
        WhitespaceMode::Preserve => {
            for segment in segments {
                match segment {
                    TextSegment::Text(text) => payload.push_str(text),
                    TextSegment::LineBreak => payload.push('\n'),
                }
            }
        }
        WhitespaceMode::Default => {
            let mut line = String::new();
            let mut normalized = String::new();
            let mut lines = Vec::new();
            for segment in segments {
                match segment {
                    TextSegment::Text(text) => line.push_str(text),
                    TextSegment::LineBreak => {
                        normalize_text_whitespace_into(&line, &mut normalized);
                        lines.push(std::mem::take(&mut normalized));
                        line.clear();
                    }
                }
            }
            normalize_text_whitespace_into(&line, &mut normalized);
            lines.push(normalized);
            payload = lines.join("\n");
        }
    }
    payload
}

/// 解析形如 `"50% 16%"` 的百分比坐标对。
pub(super) fn parse_percentage_pair(value: &str) -> Option<(f64, f64)> {
    let caps = PERCENTAGE_PAIR_REGEX.captures(value)?;
    let first = caps["first"].parse().ok()?;
    let second = caps["second"].parse().ok()?;
    Some((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> TextSegment {
        TextSegment::Text(s.to_string())
    }

    #[test]
    fn test_normalize_text_whitespace() {
        let mut buffer = String::new();

        normalize_text_whitespace_into("  hello   world  ", &mut buffer);
        assert_eq!(buffer, "hello world");

        normalize_text_whitespace_into("\n\t  foo \r\n bar\t", &mut buffer);
        assert_eq!(buffer, "foo bar");

        normalize_text_whitespace_into("   ", &mut buffer);
        assert_eq!(buffer, "");
    }

    #[test]
    fn test_render_payload_default() {
        let segments = [text("\n      "), text(" A    B   C  "), text("\n    ")];
        assert_eq!(render_payload(&segments, WhitespaceMode::Default), "A B C");

        let segments = [text("Line1 "), TextSegment::LineBreak, text("  Line2")];
        assert_eq!(
            render_payload(&segments, WhitespaceMode::Default),
            "Line1\nLine2"
        );

        assert_eq!(render_payload(&[text("  ")], WhitespaceMode::Default), "");
    }

    #[test]
    fn test_render_payload_preserve() {
        let segments = [text("\n      "), text(" A    B   C  "), text("\n    ")];
        assert_eq!(
            render_payload(&segments, WhitespaceMode::Preserve),
            "\n       A    B   C  \n    "
        );

        let segments = [text("a"), TextSegment::LineBreak, text("b")];
        assert_eq!(render_payload(&segments, WhitespaceMode::Preserve), "a\nb");
    }

    #[test]
    fn test_parse_percentage_pair() {
        assert_eq!(parse_percentage_pair("50% 16%"), Some((50.0, 16.0)));
        assert_eq!(parse_percentage_pair(" 12.5%  100% "), Some((12.5, 100.0)));
        assert_eq!(parse_percentage_pair("50px 16px"), None);
        assert_eq!(parse_percentage_pair("50%"), None);
    }
}
