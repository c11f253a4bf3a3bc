//! # TTML 解析器 - 常量定义
//!
//! 元素和属性都按本地名匹配，与文档实际使用的命名空间前缀无关。

pub(super) const TAG_TT: &[u8] = b"tt";
pub(super) const TAG_STYLING: &[u8] = b"styling";
pub(super) const TAG_STYLE: &[u8] = b"style";
pub(super) const TAG_LAYOUT: &[u8] = b"layout";
pub(super) const TAG_REGION: &[u8] = b"region";
pub(super) const TAG_BODY: &[u8] = b"body";
pub(super) const TAG_DIV: &[u8] = b"div";
pub(super) const TAG_P: &[u8] = b"p";
pub(super) const TAG_BR: &[u8] = b"br";

// xml:space / xml:id
pub(super) const ATTR_SPACE: &[u8] = b"space";
pub(super) const ATTR_ID: &[u8] = b"id";

pub(super) const ATTR_BEGIN: &[u8] = b"begin";
pub(super) const ATTR_END: &[u8] = b"end";
pub(super) const ATTR_DUR: &[u8] = b"dur";
pub(super) const ATTR_STYLE: &[u8] = b"style";
pub(super) const ATTR_REGION: &[u8] = b"region";

// ttp:*
pub(super) const ATTR_FRAME_RATE: &[u8] = b"frameRate";
pub(super) const ATTR_FRAME_RATE_MULTIPLIER: &[u8] = b"frameRateMultiplier";
pub(super) const ATTR_SUB_FRAME_RATE: &[u8] = b"subFrameRate";
pub(super) const ATTR_TICK_RATE: &[u8] = b"tickRate";

// tts:*
pub(super) const ATTR_TEXT_ALIGN: &[u8] = b"textAlign";
pub(super) const ATTR_COLOR: &[u8] = b"color";
pub(super) const ATTR_BACKGROUND_COLOR: &[u8] = b"backgroundColor";
pub(super) const ATTR_FONT_FAMILY: &[u8] = b"fontFamily";
pub(super) const ATTR_FONT_SIZE: &[u8] = b"fontSize";
pub(super) const ATTR_FONT_WEIGHT: &[u8] = b"fontWeight";
pub(super) const ATTR_FONT_STYLE: &[u8] = b"fontStyle";
pub(super) const ATTR_LINE_HEIGHT: &[u8] = b"lineHeight";
pub(super) const ATTR_WRAP_OPTION: &[u8] = b"wrapOption";
pub(super) const ATTR_TEXT_DECORATION: &[u8] = b"textDecoration";
pub(super) const ATTR_EXTENT: &[u8] = b"extent";
pub(super) const ATTR_ORIGIN: &[u8] = b"origin";
pub(super) const ATTR_WRITING_MODE: &[u8] = b"writingMode";

pub(super) const SPACE_DEFAULT: &str = "default";
pub(super) const SPACE_PRESERVE: &str = "preserve";

pub(super) const WRAP_NO_WRAP: &str = "noWrap";
pub(super) const WRAP_WRAP: &str = "wrap";
