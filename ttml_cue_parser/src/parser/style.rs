//! # TTML 解析器 - 样式层叠
//!
//! 一个段落的有效样式由四层叠加而成，优先级从低到高：
//!
//! 1. 区域引用的样式
//! 2. 区域自身的属性
//! 3. 段落引用的样式
//! 4. 段落自身的属性
//!
//! 每一层只覆盖它显式声明的属性。

use std::collections::HashSet;

use caption_core::{
    CaptionError, Cue, DecorationChange, FontStyle, FontWeight, LineAlign, LineInterpretation,
    PositionAlign, TextAlign, TextDecoration, WritingDirection,
};
use quick_xml::{Reader, events::BytesStart};
use tracing::{debug, warn};

use super::{
    constants::{
        ATTR_BACKGROUND_COLOR, ATTR_COLOR, ATTR_EXTENT, ATTR_FONT_FAMILY, ATTR_FONT_SIZE,
        ATTR_FONT_STYLE, ATTR_FONT_WEIGHT, ATTR_LINE_HEIGHT, ATTR_ORIGIN, ATTR_TEXT_ALIGN,
        ATTR_TEXT_DECORATION, ATTR_WRAP_OPTION, ATTR_WRITING_MODE, WRAP_NO_WRAP, WRAP_WRAP,
    },
    definitions::{DocumentDefinitions, RegionDefinition},
    utils::parse_percentage_pair,
};

/// 一组可能只声明了部分属性的样式。
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct StyleAttributes {
    pub(super) text_align: Option<TextAlign>,
    pub(super) color: Option<String>,
    pub(super) background_color: Option<String>,
    pub(super) font_family: Option<String>,
    pub(super) font_size: Option<String>,
    pub(super) font_weight: Option<FontWeight>,
    pub(super) font_style: Option<FontStyle>,
    pub(super) line_height: Option<String>,
    pub(super) wrap_line: Option<bool>,
    pub(super) text_decoration: Option<DecorationChange>,
    pub(super) extent: Option<String>,
    pub(super) origin: Option<String>,
    pub(super) writing_mode: Option<String>,
}

impl StyleAttributes {
    /// 读取元素上所有可识别的样式属性，无法识别的取值会被忽略。
    pub(super) fn from_element(
        e: &BytesStart,
        reader: &Reader<&[u8]>,
    ) -> Result<Self, CaptionError> {
        let mut style = Self::default();
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.local_name();
            let key = key.as_ref();
            if !is_style_attribute(key) {
                continue;
            }
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            let value = value.trim();
            match key {
                ATTR_TEXT_ALIGN => style.text_align = parse_keyword(key, value),
                ATTR_COLOR => style.color = Some(value.to_owned()),
                ATTR_BACKGROUND_COLOR => style.background_color = Some(value.to_owned()),
                ATTR_FONT_FAMILY => style.font_family = Some(value.to_owned()),
                ATTR_FONT_SIZE => style.font_size = Some(value.to_owned()),
                ATTR_LINE_HEIGHT => style.line_height = Some(value.to_owned()),
                ATTR_FONT_WEIGHT => style.font_weight = parse_keyword(key, value),
                ATTR_FONT_STYLE => style.font_style = parse_keyword(key, value),
                ATTR_WRAP_OPTION => {
                    style.wrap_line = match value {
                        WRAP_NO_WRAP => Some(false),
                        WRAP_WRAP => Some(true),
                        _ => {
                            warn!("忽略了无法识别的 tts:wrapOption 取值 '{value}'");
                            None
                        }
                    };
                }
                ATTR_TEXT_DECORATION => style.text_decoration = Some(parse_decoration(value)),
                ATTR_EXTENT => style.extent = Some(value.to_owned()),
                ATTR_ORIGIN => style.origin = Some(value.to_owned()),
                ATTR_WRITING_MODE => style.writing_mode = Some(value.to_owned()),
                _ => {}
            }
        }
        Ok(style)
    }

    /// 用更高优先级的一层覆盖当前样式。
    pub(super) fn overlay(&mut self, higher: &Self) {
        fn take<T: Clone>(slot: &mut Option<T>, higher: &Option<T>) {
            if let Some(value) = higher {
                *slot = Some(value.clone());
            }
        }

        take(&mut self.text_align, &higher.text_align);
        take(&mut self.color, &higher.color);
        take(&mut self.background_color, &higher.background_color);
        take(&mut self.font_family, &higher.font_family);
        take(&mut self.font_size, &higher.font_size);
        take(&mut self.font_weight, &higher.font_weight);
        take(&mut self.font_style, &higher.font_style);
        take(&mut self.line_height, &higher.line_height);
        take(&mut self.wrap_line, &higher.wrap_line);
        take(&mut self.extent, &higher.extent);
        take(&mut self.origin, &higher.origin);
        take(&mut self.writing_mode, &higher.writing_mode);

        self.text_decoration = match (self.text_decoration, higher.text_decoration) {
            (Some(lower), Some(upper)) => Some(lower.then(upper)),
            (lower, upper) => upper.or(lower),
        };
    }
}

fn is_style_attribute(key: &[u8]) -> bool {
    matches!(
        key,
        ATTR_TEXT_ALIGN
            | ATTR_COLOR
            | ATTR_BACKGROUND_COLOR
            | ATTR_FONT_FAMILY
            | ATTR_FONT_SIZE
            | ATTR_LINE_HEIGHT
            | ATTR_FONT_WEIGHT
            | ATTR_FONT_STYLE
            | ATTR_WRAP_OPTION
            | ATTR_TEXT_DECORATION
            | ATTR_EXTENT
            | ATTR_ORIGIN
            | ATTR_WRITING_MODE
    )
}

fn parse_keyword<T: std::str::FromStr>(key: &[u8], value: &str) -> Option<T> {
    value.parse().ok().or_else(|| {
        warn!(
            "忽略了无法识别的样式取值 {}=\"{value}\"",
            String::from_utf8_lossy(key)
        );
        None
    })
}

/// 解析 `tts:textDecoration` 的取值，例如 `"underline overline noLineThrough"`。
fn parse_decoration(value: &str) -> DecorationChange {
    let mut change = DecorationChange::default();
    for token in value.split_whitespace() {
        match token {
            "none" => change.exclude(TextDecoration::all()),
            "underline" => change.insert(TextDecoration::UNDERLINE),
            "noUnderline" => change.exclude(TextDecoration::UNDERLINE),
            "lineThrough" => change.insert(TextDecoration::LINE_THROUGH),
            "noLineThrough" => change.exclude(TextDecoration::LINE_THROUGH),
            "overline" => change.insert(TextDecoration::OVERLINE),
            "noOverline" => change.exclude(TextDecoration::OVERLINE),
            other => warn!("忽略了无法识别的 tts:textDecoration 取值 '{other}'"),
        }
    }
    change
}

/// 基于第一遍收集到的查找表解析样式引用。
pub(super) struct StyleResolver<'a> {
    definitions: &'a DocumentDefinitions,
    chain_depth: usize,
}

impl<'a> StyleResolver<'a> {
    pub(super) const fn new(definitions: &'a DocumentDefinitions, chain_depth: usize) -> Self {
        Self {
            definitions,
            chain_depth,
        }
    }

    pub(super) fn region(&self, id: Option<&str>) -> Option<&'a RegionDefinition> {
        let id = id?;
        let region = self.definitions.regions.get(id);
        if region.is_none() {
            warn!("段落引用了未定义的区域 '{id}'，忽略");
        }
        region
    }

    /// 按顺序叠加一组样式引用。
    pub(super) fn referenced(&self, style_refs: &[String]) -> StyleAttributes {
        let mut resolved = StyleAttributes::default();
        for id in style_refs {
            let mut visited = HashSet::new();
            resolved.overlay(&self.expand_style(id, 0, &mut visited));
        }
        resolved
    }

    fn expand_style(
        &self,
        id: &str,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> StyleAttributes {
        let Some(definition) = self.definitions.styles.get(id) else {
            warn!("引用了未定义的样式 '{id}'，忽略");
            return StyleAttributes::default();
        };
        if !visited.insert(id.to_owned()) {
            warn!("样式 '{id}' 存在循环引用，停止展开");
            return StyleAttributes::default();
        }

        let mut resolved = StyleAttributes::default();
        if depth < self.chain_depth {
            for parent in &definition.style_refs {
                resolved.overlay(&self.expand_style(parent, depth + 1, visited));
            }
        } else if !definition.style_refs.is_empty() {
            debug!(
                "样式 '{id}' 的引用 {:?} 超出展开深度 {}，未展开",
                definition.style_refs, self.chain_depth
            );
        }
        resolved.overlay(&definition.attributes);
        visited.remove(id);
        resolved
    }

    /// 区域贡献的两层：区域引用的样式，以及区域自身的属性。
    pub(super) fn region_layers(&self, region: Option<&RegionDefinition>) -> StyleAttributes {
        let mut resolved = StyleAttributes::default();
        if let Some(region) = region {
            resolved.overlay(&self.referenced(&region.style_refs));
            resolved.overlay(&region.attributes);
        }
        resolved
    }

    /// 计算段落的有效样式。
    pub(super) fn effective(
        &self,
        region: Option<&RegionDefinition>,
        element_refs: &[String],
        element_attributes: &StyleAttributes,
    ) -> StyleAttributes {
        let mut resolved = self.region_layers(region);
        resolved.overlay(&self.referenced(element_refs));
        resolved.overlay(element_attributes);
        resolved
    }
}

/// 把有效样式写入 Cue。
pub(super) fn apply_style(cue: &mut Cue, style: &StyleAttributes) {
    if let Some(text_align) = style.text_align {
        cue.text_align = Some(text_align);
        cue.line_align = Some(match text_align {
            TextAlign::Left | TextAlign::Start => LineAlign::Start,
            TextAlign::Center => LineAlign::Center,
            TextAlign::Right | TextAlign::End => LineAlign::End,
        });
        cue.position_align = match text_align {
            TextAlign::Left => Some(PositionAlign::Left),
            TextAlign::Center => Some(PositionAlign::Center),
            TextAlign::Right => Some(PositionAlign::Right),
            TextAlign::Start | TextAlign::End => None,
        };
    }

    cue.color.clone_from(&style.color);
    cue.background_color.clone_from(&style.background_color);
    cue.font_family.clone_from(&style.font_family);
    cue.font_size.clone_from(&style.font_size);
    cue.line_height.clone_from(&style.line_height);
    cue.font_weight = style.font_weight;
    cue.font_style = style.font_style;
    cue.wrap_line = style.wrap_line;
    cue.text_decoration = style
        .text_decoration
        .map_or_else(TextDecoration::empty, |change| {
            change.apply(TextDecoration::empty())
        });
}

/// 把区域的版面属性（`extent`、`origin`、`writingMode`）映射到 Cue 的位置字段。
pub(super) fn apply_layout(cue: &mut Cue, layout: &StyleAttributes) {
    if let Some(extent) = &layout.extent {
        match parse_percentage_pair(extent) {
            Some((width, _height)) => cue.size = Some(width),
            None => debug!("tts:extent='{extent}' 不是百分比，忽略"),
        }
    }

    let (vertical, direction) = match layout.writing_mode.as_deref() {
        Some("tb" | "tblr") => (true, WritingDirection::VerticalLeft),
        Some("tbrl") => (true, WritingDirection::VerticalRight),
        None | Some("lrtb" | "lr" | "rltb" | "rl") => (false, WritingDirection::Horizontal),
        Some(other) => {
            warn!("忽略了无法识别的 tts:writingMode 取值 '{other}'");
            (false, WritingDirection::Horizontal)
        }
    };
    cue.writing_direction = direction;

    if let Some(origin) = &layout.origin {
        match parse_percentage_pair(origin) {
            Some((x, y)) => {
                if vertical {
                    cue.position = Some(y);
                    cue.line = Some(x);
                } else {
                    cue.position = Some(x);
                    cue.line = Some(y);
                }
                cue.line_interpretation = LineInterpretation::Percentage;
            }
            None => debug!("tts:origin='{origin}' 不是百分比，忽略"),
        }
    }
}
