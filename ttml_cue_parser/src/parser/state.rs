//! # 解析器的状态和数据结构

use super::style::StyleAttributes;

/// 文档级的 `xml:space` 策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum WhitespaceMode {
    /// 折叠连续空白并去掉首尾空白
    #[default]
    Default,
    /// 原样保留所有空白
    Preserve,
}

/// 段落内按文档顺序收集到的内容片段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TextSegment {
    Text(String),
    /// `<br/>`
    LineBreak,
}

/// 第二遍遍历时，`<body>`/`<div>` 等容器元素在栈上的上下文。
#[derive(Debug, Clone, Default)]
pub(super) struct ContainerContext {
    /// 该元素自身声明的或从祖先继承的 `region`。
    pub(super) region: Option<String>,
}

/// 正在处理的 `<p>` 元素的临时数据。
#[derive(Debug, Default)]
pub(super) struct CurrentParagraph {
    pub(super) begin: Option<String>,
    pub(super) end: Option<String>,
    pub(super) dur: Option<String>,
    pub(super) region: Option<String>,
    pub(super) style_refs: Vec<String>,
    pub(super) attributes: StyleAttributes,
    pub(super) segments: Vec<TextSegment>,
    /// `<p>` 内部尚未闭合的子元素数量，用于识别与之匹配的 `</p>`。
    pub(super) open_children: usize,
}

impl CurrentParagraph {
    /// 段落是否完全没有时间属性，也没有任何非空白文本。
    pub(super) fn is_blank_and_untimed(&self) -> bool {
        self.begin.is_none()
            && self.end.is_none()
            && self.segments.iter().all(|segment| match segment {
                TextSegment::Text(text) => text.trim().is_empty(),
                TextSegment::LineBreak => true,
            })
    }
}

/// 第二遍遍历（`<body>` 部分）的状态。
#[derive(Debug, Default)]
pub(super) struct BodyParseState {
    pub(super) in_body: bool,
    pub(super) containers: Vec<ContainerContext>,
    pub(super) current_paragraph: Option<CurrentParagraph>,
}

impl BodyParseState {
    /// 当前容器链上最近声明的区域。
    pub(super) fn inherited_region(&self) -> Option<String> {
        self.containers.last().and_then(|c| c.region.clone())
    }
}
