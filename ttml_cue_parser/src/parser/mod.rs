//! # TTML (Timed Text Markup Language) 解析器
//!
//! 解析分两遍进行：
//!
//! 1. [`definitions`] 遍历整个文档，校验根元素，读取 `xml:space` 与计时参数，
//!    并把 `<style>` 和 `<region>` 按 `xml:id` 收集到查找表中；
//! 2. [`body`] 遍历 `<body>`/`<div>`/`<p>`，对每个段落求值时间、拼接文本、
//!    通过 [`style`] 解析样式层叠，最终生成 [`Cue`]。

mod body;
mod constants;
mod definitions;
mod state;
mod style;
pub mod time;
mod utils;

use std::borrow::Cow;

use caption_core::{CaptionError, Cue, TimeContext, TtmlParsingOptions};
use tracing::{debug, error};

/// 解析 TTML 文档字节，生成按文档顺序排列的字幕 Cue。
///
/// 输入可以是 UTF-8（可带 BOM）或带 BOM 的 UTF-16 文本。
///
/// # Errors
///
/// * `CaptionError::InvalidXml` - 文档不是格式良好的 XML、根元素不是 `<tt>`，
///   或 `xml:space` 的值不是 `default`/`preserve`
/// * `CaptionError::InvalidTextCue` - 段落的 `begin`/`end`/`dur` 无法求值
pub fn parse_ttml(
    content: &[u8],
    context: &TimeContext,
    options: &TtmlParsingOptions,
) -> Result<Vec<Cue>, CaptionError> {
    let text = decode_document(content).inspect_err(|e| error!("TTML 文档解码失败: {e}"))?;
    parse_ttml_str(&text, context, options)
}

/// 与 [`parse_ttml`] 相同，但输入已经是字符串。
pub fn parse_ttml_str(
    content: &str,
    context: &TimeContext,
    options: &TtmlParsingOptions,
) -> Result<Vec<Cue>, CaptionError> {
    let definitions = definitions::collect_definitions(content)
        .inspect_err(|e| error!("TTML 文档结构无效: {e}"))?;
    debug!(
        "TTML 定义收集完成：{} 个样式，{} 个区域，空白模式 {:?}",
        definitions.styles.len(),
        definitions.regions.len(),
        definitions.whitespace
    );

    let cues = body::collect_cues(content, &definitions, context, options)
        .inspect_err(|e| error!("TTML 段落解析失败: {e}"))?;
    debug!("TTML 解析完成，共生成 {} 条 Cue", cues.len());
    Ok(cues)
}

/// 把原始字节解码为文本。
fn decode_document(content: &[u8]) -> Result<Cow<'_, str>, CaptionError> {
    const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

    if let Some(rest) = content.strip_prefix(UTF8_BOM) {
        return Ok(Cow::Borrowed(std::str::from_utf8(rest)?));
    }

    let utf16_big_endian = match content {
        [0xFE, 0xFF, ..] => Some(true),
        [0xFF, 0xFE, ..] => Some(false),
        _ => None,
    };
    if let Some(big_endian) = utf16_big_endian {
        let body = &content[2..];
        if body.len() % 2 != 0 {
            return Err(CaptionError::invalid_xml("UTF-16 文档的字节数不是偶数"));
        }
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| {
                let bytes = [pair[0], pair[1]];
                if big_endian {
                    u16::from_be_bytes(bytes)
                } else {
                    u16::from_le_bytes(bytes)
                }
            })
            .collect();
        return String::from_utf16(&units)
            .map(Cow::Owned)
            .map_err(|e| CaptionError::invalid_xml(format!("UTF-16 解码失败: {e}")));
    }

    Ok(Cow::Borrowed(std::str::from_utf8(content)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_document() {
        assert_eq!(decode_document(b"<tt/>").unwrap(), "<tt/>");
        assert_eq!(decode_document(b"\xEF\xBB\xBF<tt/>").unwrap(), "<tt/>");

        let utf16le: Vec<u8> = [0xFF, 0xFE]
            .into_iter()
            .chain("<tt/>".encode_utf16().flat_map(u16::to_le_bytes))
            .collect();
        assert_eq!(decode_document(&utf16le).unwrap(), "<tt/>");

        let utf16be: Vec<u8> = [0xFE, 0xFF]
            .into_iter()
            .chain("<tt/>".encode_utf16().flat_map(u16::to_be_bytes))
            .collect();
        assert_eq!(decode_document(&utf16be).unwrap(), "<tt/>");

        assert!(matches!(
            decode_document(b"<tt>\xC3\x28</tt>"),
            Err(CaptionError::InvalidXml(_))
        ));
    }
}
