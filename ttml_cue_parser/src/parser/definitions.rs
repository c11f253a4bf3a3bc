//! # TTML 解析器 - 第一遍：文档级定义
//!
//! 校验文档结构，读取 `<tt>` 上的 `xml:space` 与 `ttp:*` 计时参数，
//! 并把 `<styling>` 下的 `<style>`、`<layout>` 下的 `<region>` 收集为按 id 索引的查找表。

use std::collections::HashMap;

use caption_core::CaptionError;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use tracing::{debug, warn};

use super::{
    constants::{
        ATTR_FRAME_RATE, ATTR_FRAME_RATE_MULTIPLIER, ATTR_ID, ATTR_SPACE, ATTR_STYLE,
        ATTR_SUB_FRAME_RATE, ATTR_TICK_RATE, SPACE_DEFAULT, SPACE_PRESERVE, TAG_LAYOUT,
        TAG_REGION, TAG_STYLE, TAG_STYLING, TAG_TT,
    },
    state::WhitespaceMode,
    style::StyleAttributes,
    time::TimingParameters,
    utils::{get_attribute, get_id_list_attribute},
};

/// `<styling>` 中的一个 `<style>`。
#[derive(Debug, Clone, Default)]
pub(super) struct StyleDefinition {
    /// 该样式通过 `style` 属性引用的其它样式。
    pub(super) style_refs: Vec<String>,
    pub(super) attributes: StyleAttributes,
}

/// `<layout>` 中的一个 `<region>`。
#[derive(Debug, Clone, Default)]
pub(super) struct RegionDefinition {
    pub(super) id: String,
    pub(super) style_refs: Vec<String>,
    pub(super) attributes: StyleAttributes,
}

/// 第一遍的产物，仅在一次解析调用内有效。
#[derive(Debug, Default)]
pub(super) struct DocumentDefinitions {
    pub(super) whitespace: WhitespaceMode,
    pub(super) timing: TimingParameters,
    pub(super) styles: HashMap<String, StyleDefinition>,
    pub(super) regions: HashMap<String, RegionDefinition>,
}

pub(super) fn collect_definitions(content: &str) -> Result<DocumentDefinitions, CaptionError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut definitions = DocumentDefinitions::default();
    let mut element_stack: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            CaptionError::invalid_xml(format!("位置 {}: {e}", reader.error_position()))
        })?;

        match event {
            Event::Start(e) => {
                let local_name = e.local_name().as_ref().to_vec();

                if seen_root {
                    if element_stack.is_empty() {
                        return Err(CaptionError::invalid_xml("文档包含多个根元素"));
                    }
                } else {
                    if local_name != TAG_TT {
                        return Err(CaptionError::invalid_xml(format!(
                            "根元素必须是 <tt>，实际为 <{}>",
                            String::from_utf8_lossy(&local_name)
                        )));
                    }
                    seen_root = true;
                    read_root_attributes(&e, &reader, &mut definitions)?;
                }

                let parent = element_stack.last().map(Vec::as_slice);
                match (parent, local_name.as_slice()) {
                    (Some(TAG_STYLING), TAG_STYLE) => {
                        if let Some((id, style)) = read_style(&e, &reader)? {
                            definitions.styles.insert(id, style);
                        }
                    }
                    (Some(TAG_LAYOUT), TAG_REGION) => {
                        if let Some(region) = read_region(&e, &reader)? {
                            definitions.regions.insert(region.id.clone(), region);
                        }
                    }
                    _ => {}
                }

                element_stack.push(local_name);
            }
            Event::End(_) => {
                element_stack.pop();
            }
            Event::Text(e) if element_stack.is_empty() => {
                if !e.as_ref().iter().all(u8::is_ascii_whitespace) {
                    let position = if seen_root { "之后" } else { "之前" };
                    return Err(CaptionError::invalid_xml(format!(
                        "根元素{position}出现了文本内容"
                    )));
                }
            }
            Event::GeneralRef(_) | Event::CData(_) if element_stack.is_empty() => {
                return Err(CaptionError::invalid_xml("根元素之外出现了文本内容"));
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if !seen_root {
        return Err(CaptionError::invalid_xml("文档缺少根元素"));
    }
    if let Some(unclosed) = element_stack.last() {
        return Err(CaptionError::invalid_xml(format!(
            "元素 <{}> 没有闭合",
            String::from_utf8_lossy(unclosed)
        )));
    }

    Ok(definitions)
}

fn read_root_attributes(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    definitions: &mut DocumentDefinitions,
) -> Result<(), CaptionError> {
    definitions.whitespace = match get_attribute(e, reader, ATTR_SPACE)?.as_deref() {
        None | Some(SPACE_DEFAULT) => WhitespaceMode::Default,
        Some(SPACE_PRESERVE) => WhitespaceMode::Preserve,
        Some(other) => {
            return Err(CaptionError::invalid_xml(format!(
                "不支持的 xml:space 取值 '{other}'"
            )));
        }
    };

    let timing = &mut definitions.timing;
    if let Some(rate) = read_positive_rate(e, reader, ATTR_FRAME_RATE)? {
        timing.frame_rate = rate;
    }
    if let Some(rate) = read_positive_rate(e, reader, ATTR_SUB_FRAME_RATE)? {
        timing.sub_frame_rate = rate;
    }
    if let Some(rate) = read_positive_rate(e, reader, ATTR_TICK_RATE)? {
        timing.tick_rate = rate;
    }
    if let Some(value) = get_attribute(e, reader, ATTR_FRAME_RATE_MULTIPLIER)? {
        match parse_multiplier(&value) {
            Some(multiplier) => timing.frame_rate_multiplier = multiplier,
            None => warn!("忽略了无效的 ttp:frameRateMultiplier '{value}'，使用 1"),
        }
    }

    debug!("计时参数: {timing:?}");
    Ok(())
}

/// 读取一个必须为正数的 `ttp:*` 速率，无效值只产生警告。
fn read_positive_rate(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    local_name: &[u8],
) -> Result<Option<f64>, CaptionError> {
    let Some(value) = get_attribute(e, reader, local_name)? else {
        return Ok(None);
    };
    match value.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(Some(rate)),
        _ => {
            warn!(
                "忽略了无效的 ttp:{} '{value}'，使用默认值",
                String::from_utf8_lossy(local_name)
            );
            Ok(None)
        }
    }
}

/// 解析 `"分子 分母"` 形式的帧率倍数，例如 `"1000 1001"`。
fn parse_multiplier(value: &str) -> Option<f64> {
    let mut parts = value.split_whitespace();
    let numerator: f64 = parts.next()?.parse().ok()?;
    let denominator: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || numerator <= 0.0 || denominator <= 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn read_style(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
) -> Result<Option<(String, StyleDefinition)>, CaptionError> {
    let Some(id) = get_attribute(e, reader, ATTR_ID)? else {
        debug!("跳过没有 xml:id 的 <style>");
        return Ok(None);
    };
    let style = StyleDefinition {
        style_refs: get_id_list_attribute(e, reader, ATTR_STYLE)?,
        attributes: StyleAttributes::from_element(e, reader)?,
    };
    Ok(Some((id, style)))
}

fn read_region(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
) -> Result<Option<RegionDefinition>, CaptionError> {
    let Some(id) = get_attribute(e, reader, ATTR_ID)? else {
        debug!("跳过没有 xml:id 的 <region>");
        return Ok(None);
    };
    Ok(Some(RegionDefinition {
        id,
        style_refs: get_id_list_attribute(e, reader, ATTR_STYLE)?,
        attributes: StyleAttributes::from_element(e, reader)?,
    }))
}
