//! # TTML 解析器 - 第二遍：`<body>` 与段落
//!
//! 每个 `<p>` 产生至多一条 Cue。`<body>`/`<div>` 只负责把 `region` 向下传递。

use std::str;

use caption_core::{CaptionError, Cue, TimeContext, TtmlParsingOptions};
use quick_xml::{
    Reader,
    events::{BytesRef, BytesStart, Event},
};
use tracing::{debug, warn};

use super::{
    constants::{ATTR_BEGIN, ATTR_DUR, ATTR_END, ATTR_REGION, ATTR_STYLE, TAG_BODY, TAG_BR, TAG_P},
    definitions::DocumentDefinitions,
    state::{BodyParseState, ContainerContext, CurrentParagraph, TextSegment},
    style::{StyleAttributes, StyleResolver, apply_layout, apply_style},
    time::parse_time_expression,
    utils::{get_attribute, get_id_list_attribute, render_payload},
};

/// 第二遍用到的只读上下文。
struct CueContext<'a> {
    definitions: &'a DocumentDefinitions,
    resolver: StyleResolver<'a>,
    time_context: &'a TimeContext,
    options: &'a TtmlParsingOptions,
}

pub(super) fn collect_cues(
    content: &str,
    definitions: &DocumentDefinitions,
    time_context: &TimeContext,
    options: &TtmlParsingOptions,
) -> Result<Vec<Cue>, CaptionError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let context = CueContext {
        definitions,
        resolver: StyleResolver::new(definitions, options.style_chain_depth),
        time_context,
        options,
    };
    let mut state = BodyParseState::default();
    let mut cues: Vec<Cue> = Vec::with_capacity(content.matches("<p").count());
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            CaptionError::invalid_xml(format!("位置 {}: {e}", reader.error_position()))
        })?;

        if event == Event::Eof {
            break;
        }

        if state.current_paragraph.is_some() {
            if let Some(paragraph) = handle_paragraph_event(&event, &reader, &mut state)?
                && let Some(cue) = finalize_paragraph(&paragraph, &context)?
            {
                cues.push(cue);
            }
        } else {
            handle_structure_event(&event, &reader, &mut state)?;
        }

        buf.clear();
    }

    Ok(cues)
}

/// 处理段落之外的事件：维护容器栈，遇到 `<p>` 时开始收集段落。
fn handle_structure_event(
    event: &Event,
    reader: &Reader<&[u8]>,
    state: &mut BodyParseState,
) -> Result<(), CaptionError> {
    match event {
        Event::Start(e) => {
            let local_name = e.local_name();
            let local_name = local_name.as_ref();

            if !state.in_body {
                if local_name == TAG_BODY {
                    state.in_body = true;
                    let region = get_attribute(e, reader, ATTR_REGION)?;
                    state.containers.push(ContainerContext { region });
                }
                return Ok(());
            }

            if local_name == TAG_P {
                state.current_paragraph = Some(start_paragraph(e, reader, state)?);
            } else {
                let region =
                    get_attribute(e, reader, ATTR_REGION)?.or_else(|| state.inherited_region());
                state.containers.push(ContainerContext { region });
            }
        }
        Event::End(e) if state.in_body => {
            state.containers.pop();
            if e.local_name().as_ref() == TAG_BODY {
                state.in_body = false;
                state.containers.clear();
            }
        }
        _ => {}
    }
    Ok(())
}

fn start_paragraph(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &BodyParseState,
) -> Result<CurrentParagraph, CaptionError> {
    Ok(CurrentParagraph {
        begin: get_attribute(e, reader, ATTR_BEGIN)?,
        end: get_attribute(e, reader, ATTR_END)?,
        dur: get_attribute(e, reader, ATTR_DUR)?,
        region: get_attribute(e, reader, ATTR_REGION)?.or_else(|| state.inherited_region()),
        style_refs: get_id_list_attribute(e, reader, ATTR_STYLE)?,
        attributes: StyleAttributes::from_element(e, reader)?,
        ..Default::default()
    })
}

/// 处理 `<p>` 内部的事件。遇到与之匹配的 `</p>` 时返回收集完成的段落。
fn handle_paragraph_event(
    event: &Event,
    reader: &Reader<&[u8]>,
    state: &mut BodyParseState,
) -> Result<Option<CurrentParagraph>, CaptionError> {
    let Some(paragraph) = state.current_paragraph.as_mut() else {
        return Ok(None);
    };

    match event {
        Event::Start(e) => {
            if e.local_name().as_ref() == TAG_BR {
                paragraph.segments.push(TextSegment::LineBreak);
            }
            paragraph.open_children += 1;
        }
        Event::End(_) => {
            if paragraph.open_children == 0 {
                return Ok(state.current_paragraph.take());
            }
            paragraph.open_children -= 1;
        }
        Event::Text(e) => {
            let text = e
                .xml_content()
                .map_err(|err| CaptionError::invalid_xml(format!("文本解码失败: {err}")))?;
            paragraph.segments.push(TextSegment::Text(text.into_owned()));
        }
        Event::CData(e) => {
            let text = e
                .decode()
                .map_err(|err| CaptionError::invalid_xml(format!("CDATA 解码失败: {err}")))?;
            paragraph.segments.push(TextSegment::Text(text.into_owned()));
        }
        Event::GeneralRef(e) => {
            if let Some(decoded) = decode_entity(e, reader)? {
                paragraph.segments.push(TextSegment::Text(decoded.to_string()));
            }
        }
        _ => {}
    }
    Ok(None)
}

/// 解码字符引用（`&#65;`、`&#x41;`）和 XML 预定义实体。
fn decode_entity(e: &BytesRef, reader: &Reader<&[u8]>) -> Result<Option<char>, CaptionError> {
    let entity_name = str::from_utf8(e.as_ref())?;

    if let Some(num_str) = entity_name.strip_prefix('#') {
        let (radix, code_point_str) = num_str
            .strip_prefix('x')
            .map_or((10, num_str), |stripped| (16, stripped));

        let decoded = u32::from_str_radix(code_point_str, radix)
            .ok()
            .and_then(char::from_u32);
        if decoded.is_none() {
            warn!(
                "忽略了无效的 XML 数字实体 '&{entity_name};'，位置 {}",
                reader.buffer_position()
            );
        }
        return Ok(decoded);
    }

    let decoded = match entity_name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            warn!("忽略了未知的 XML 实体 '&{entity_name};'");
            None
        }
    };
    Ok(decoded)
}

/// 对一个收集完成的段落求值时间、拼接文本并解析样式。
///
/// 返回 `Ok(None)` 表示段落被静默跳过。
fn finalize_paragraph(
    paragraph: &CurrentParagraph,
    context: &CueContext,
) -> Result<Option<Cue>, CaptionError> {
    if paragraph.is_blank_and_untimed() {
        debug!("跳过没有时间属性也没有文本的段落");
        return Ok(None);
    }

    let timing = &context.definitions.timing;
    let Some(begin) = paragraph.begin.as_deref() else {
        return Err(CaptionError::invalid_text_cue("段落缺少 begin 属性"));
    };
    let start = parse_time_expression(begin, timing)?;
    let end = match (paragraph.end.as_deref(), paragraph.dur.as_deref()) {
        (Some(end), _) => parse_time_expression(end, timing)?,
        (None, Some(dur)) => start + parse_time_expression(dur, timing)?,
        (None, None) => {
            return Err(CaptionError::invalid_text_cue(format!(
                "begin='{begin}' 的段落既没有 end 也没有 dur 属性"
            )));
        }
    };

    let payload = render_payload(&paragraph.segments, context.definitions.whitespace);
    if payload.trim().is_empty() {
        debug!("段落 [{begin}] 没有文本内容，跳过");
        return Ok(None);
    }

    let period_start = context.time_context.period_start;
    let Some((start, end)) = context.options.segment_clipping.apply(
        start + period_start,
        end + period_start,
        context.time_context,
    ) else {
        debug!("Cue [{start}, {end}) 落在分段窗口之外，丢弃");
        return Ok(None);
    };

    if start >= end {
        debug!("Cue [{start}, {end}) 的开始时间不早于结束时间，丢弃");
        return Ok(None);
    }

    let mut cue = Cue::new(start, end, payload);
    let region = context.resolver.region(paragraph.region.as_deref());
    let style = context
        .resolver
        .effective(region, &paragraph.style_refs, &paragraph.attributes);
    apply_style(&mut cue, &style);
    apply_layout(&mut cue, &context.resolver.region_layers(region));

    Ok(Some(cue))
}
