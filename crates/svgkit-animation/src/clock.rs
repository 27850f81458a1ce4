//! Document-wide animation clock.

use serde::{Deserialize, Serialize};
use svgkit_scene::{Iterations, SvgAnimate, SvgDocument};

/// Containing timeline of every animation in a document.
///
/// The total is the latest `delay + dur × iterations`, with infinite
/// animations counted once. Finite documents are sampled by master progress
/// over that total; documents with infinite animations are sampled by
/// elapsed time and never finish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationClock {
    pub total_ms: u64,
    pub infinite: bool,
}

impl AnimationClock {
    pub fn from_animations<'a>(animations: impl IntoIterator<Item = &'a SvgAnimate>) -> Self {
        animations
            .into_iter()
            .fold(Self::default(), |clock, animation| Self {
                total_ms: clock.total_ms.max(animation.timing.active_end_ms()),
                infinite: clock.infinite
                    || (animation.timing.iterations == Iterations::Infinite
                        && animation.timing.dur.ms().is_some_and(|d| d > 0)),
            })
    }

    pub fn for_document(document: &SvgDocument) -> Self {
        let mut animations = Vec::new();
        document.walk(&mut |element| animations.extend(element.animations()));
        Self::from_animations(animations)
    }

    /// Document time at a master progress value.
    pub fn time_at_progress(&self, progress: f32) -> u64 {
        (progress.clamp(0.0, 1.0) as f64 * self.total_ms as f64).round() as u64
    }

    /// Document time after `elapsed_ms` of wall-clock playback.
    ///
    /// Finite documents stop at their end. Documents with infinite
    /// animations wrap every `total_ms`, so delays and finite animations
    /// replay on each cycle.
    pub fn time_at_elapsed(&self, elapsed_ms: u64) -> u64 {
        if self.infinite && self.total_ms > 0 {
            elapsed_ms % self.total_ms
        } else {
            elapsed_ms.min(self.total_ms)
        }
    }

    /// Master progress after `elapsed_ms`, wrapping for infinite documents.
    pub fn progress_at_elapsed(&self, elapsed_ms: u64) -> f32 {
        if self.total_ms == 0 {
            return 1.0;
        }
        let time = if self.infinite {
            elapsed_ms % self.total_ms
        } else {
            elapsed_ms.min(self.total_ms)
        };
        time as f32 / self.total_ms as f32
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        !self.infinite && elapsed_ms >= self.total_ms
    }
}
