//! # TTML 时间表达式求值
//!
//! 支持两类写法：
//!
//! - 时钟时间：`[HH:]MM:SS[.fff]`，或带帧的 `HH:MM:SS:FF[.SF]`；
//! - 偏移时间：一个或多个 `<数字><单位>` 的串联，单位为 `h`/`m`/`s`/`ms`/`f`/`t`，
//!   例如 `59.45m30ms`、`75f`、`50t`。

use std::sync::LazyLock;

use caption_core::CaptionError;
use regex::Regex;

static CLOCK_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<hours>\d{2,}):)?(?P<minutes>\d{2}):(?P<seconds>\d{2}(?:\.\d+)?)$")
        .expect("编译 CLOCK_TIME_REGEX 失败")
});

static CLOCK_FRAMES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<hours>\d{2,}):(?P<minutes>\d{2}):(?P<seconds>\d{2}):(?P<frames>\d{2,})(?:\.(?P<subframes>\d+))?$",
    )
    .expect("编译 CLOCK_FRAMES_REGEX 失败")
});

static OFFSET_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)?(?:h|ms|m|s|f|t))+$").expect("编译 OFFSET_TIME_REGEX 失败")
});

static OFFSET_TERM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<value>\d+(?:\.\d+)?)(?P<unit>h|ms|m|s|f|t)")
        .expect("编译 OFFSET_TERM_REGEX 失败")
});

/// 文档级计时参数，来自 `<tt>` 上的 `ttp:*` 属性。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingParameters {
    pub frame_rate: f64,
    /// `ttp:frameRateMultiplier` 的分子除以分母。
    pub frame_rate_multiplier: f64,
    pub sub_frame_rate: f64,
    pub tick_rate: f64,
}

impl Default for TimingParameters {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            frame_rate_multiplier: 1.0,
            sub_frame_rate: 1.0,
            tick_rate: 1.0,
        }
    }
}

impl TimingParameters {
    #[must_use]
    pub fn effective_frame_rate(&self) -> f64 {
        self.frame_rate * self.frame_rate_multiplier
    }
}

/// 把一个时间表达式求值为秒。
///
/// 不符合任何已知写法的字符串返回 `CaptionError::InvalidTextCue`。
pub fn parse_time_expression(
    expression: &str,
    parameters: &TimingParameters,
) -> Result<f64, CaptionError> {
    let expression = expression.trim();

    if let Some(caps) = CLOCK_TIME_REGEX.captures(expression) {
        let hours = caps.name("hours").map_or("0", |m| m.as_str());
        let seconds = clock_seconds(
            expression,
            hours,
            &caps["minutes"],
            &caps["seconds"],
        )?;
        return Ok(seconds);
    }

    if let Some(caps) = CLOCK_FRAMES_REGEX.captures(expression) {
        let seconds = clock_seconds(
            expression,
            &caps["hours"],
            &caps["minutes"],
            &caps["seconds"],
        )?;
        let frames = parse_number(expression, &caps["frames"])?;
        let subframes = caps
            .name("subframes")
            .map_or(Ok(0.0), |m| parse_number(expression, m.as_str()))?;
        let frame_part =
            (frames + subframes / parameters.sub_frame_rate) / parameters.effective_frame_rate();
        return Ok(seconds + frame_part);
    }

    if OFFSET_TIME_REGEX.is_match(expression) {
        let mut total = 0.0;
        for caps in OFFSET_TERM_REGEX.captures_iter(expression) {
            let value = parse_number(expression, &caps["value"])?;
            total += match &caps["unit"] {
                "h" => value * 3600.0,
                "m" => value * 60.0,
                "s" => value,
                "ms" => value / 1000.0,
                "f" => value / parameters.effective_frame_rate(),
                "t" => value / parameters.tick_rate,
                other => {
                    return Err(CaptionError::invalid_text_cue(format!(
                        "时间表达式 '{expression}' 包含未知单位 '{other}'"
                    )));
                }
            };
        }
        return Ok(total);
    }

    Err(CaptionError::invalid_text_cue(format!(
        "无法识别的时间表达式 '{expression}'"
    )))
}

fn clock_seconds(
    expression: &str,
    hours: &str,
    minutes: &str,
    seconds: &str,
) -> Result<f64, CaptionError> {
    let hours = parse_number(expression, hours)?;
    let minutes = parse_number(expression, minutes)?;
    let seconds = parse_number(expression, seconds)?;

    if minutes >= 60.0 {
        return Err(CaptionError::invalid_text_cue(format!(
            "分钟值 '{minutes}' (应 < 60) 在时间戳 '{expression}' 中无效"
        )));
    }
    if seconds >= 60.0 {
        return Err(CaptionError::invalid_text_cue(format!(
            "秒值 '{seconds}' (应 < 60) 在时间戳 '{expression}' 中无效"
        )));
    }

    Ok(hours.mul_add(3600.0, minutes * 60.0) + seconds)
}

fn parse_number(expression: &str, digits: &str) -> Result<f64, CaptionError> {
    digits.parse::<f64>().map_err(|e| {
        CaptionError::invalid_text_cue(format!(
            "在时间戳 '{expression}' 中解析数值 '{digits}' 失败: {e}"
        ))
    })
}
