//! 把 Cue 序列同步到平台字幕轨道上。

use caption_core::Cue;
use tracing::{debug, trace};

use crate::{
    convert::to_platform_cue,
    platform::{PlatformCue, TextTrack},
};

/// 持有一个平台字幕轨道，负责追加 Cue 和按时间范围移除字幕对象。
///
/// 不做任何内部同步，同一个轨道只应由一个调用方驱动。
#[derive(Debug, Default)]
pub struct CaptionTrackAdapter<T: TextTrack> {
    track: T,
}

impl<T: TextTrack> CaptionTrackAdapter<T> {
    pub const fn new(track: T) -> Self {
        Self { track }
    }

    /// 把每个可渲染的 Cue 转换为平台字幕对象并加入轨道。
    ///
    /// `start_time >= end_time` 的 Cue 会被静默丢弃。
    pub fn append(&mut self, cues: &[Cue]) {
        let mut added = 0_usize;
        for cue in cues {
            if !cue.is_renderable() {
                debug!(
                    "丢弃无效的 Cue [{}, {})：开始时间不早于结束时间",
                    cue.start_time, cue.end_time
                );
                continue;
            }
            self.track.add_cue(to_platform_cue(cue));
            added += 1;
        }
        trace!("向轨道追加了 {added}/{} 条 Cue", cues.len());
    }

    /// 移除所有与 `[range_start, range_end)` 相交的字幕对象，返回移除的数量。
    ///
    /// 字幕对象 `[start, end)` 满足 `start < range_end && end > range_start` 时才算相交，
    /// 仅在边界上相接的不会被移除。
    pub fn remove(&mut self, range_start: f64, range_end: f64) -> usize {
        let overlapping: Vec<usize> = self
            .track
            .cues()
            .iter()
            .enumerate()
            .filter(|(_, cue)| cue.start_time() < range_end && cue.end_time() > range_start)
            .map(|(index, _)| index)
            .collect();

        // 从后往前移除，保证剩余下标不变
        let mut removed = 0_usize;
        for index in overlapping.into_iter().rev() {
            if self.track.remove_cue(index).is_some() {
                removed += 1;
            }
        }

        if removed > 0 {
            debug!("移除了 {removed} 个与 [{range_start}, {range_end}) 相交的字幕对象");
        }
        removed
    }

    pub const fn track(&self) -> &T {
        &self.track
    }

    pub const fn track_mut(&mut self) -> &mut T {
        &mut self.track
    }

    pub fn into_inner(self) -> T {
        self.track
    }
}
