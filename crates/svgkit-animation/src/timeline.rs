//! Per-animation state machine: delay, iterations, direction and fill.

use serde::{Deserialize, Serialize};
use svgkit_scene::{AnimateTiming, AnimationDirection, Iterations};

use crate::easing::apply_easing;

/// Where a sample falls relative to the animation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Still in the delay.
    Before,
    /// Inside an iteration.
    Active,
    /// Past the last iteration of a finite animation.
    After,
}

/// State of one animation at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub phase: Phase,
    /// Zero-based iteration index.
    pub iteration: u32,
    /// Eased, direction-adjusted progress in [0, 1].
    pub progress: f32,
    /// Whether the value applies: always while active, and outside the
    /// window only when the fill mode holds it.
    pub effective: bool,
}

impl FrameSample {
    pub fn is_effective(&self) -> bool {
        self.effective
    }
}

/// Map iteration progress through the playback direction.
pub fn apply_direction(progress: f32, direction: AnimationDirection, iteration: u32) -> f32 {
    let odd = iteration % 2 == 1;
    let flip = match direction {
        AnimationDirection::Normal => false,
        AnimationDirection::Reverse => true,
        AnimationDirection::Alternate => odd,
        AnimationDirection::AlternateReverse => !odd,
    };
    if flip {
        1.0 - progress
    } else {
        progress
    }
}

/// Progress of a window inside a containing timeline.
///
/// Delay and duration are fractions of the containing total. Before the
/// window this is 0, at and after its end 1.
///
/// For a single-iteration animation this equals the progress
/// [`sample_progress`] reports before direction and easing are applied.
/// `sample_progress` works in milliseconds instead so that iterations,
/// phases and fill modes come out of the same state machine as
/// [`sample_at`].
pub fn local_progress(global_progress: f32, delay_ratio: f32, duration_ratio: f32) -> f32 {
    if duration_ratio <= 0.0 {
        return if global_progress < delay_ratio { 0.0 } else { 1.0 };
    }
    ((global_progress - delay_ratio) / duration_ratio).clamp(0.0, 1.0)
}

/// Sample an animation at `time_ms` after the document start.
///
/// Finite animations stop in their last iteration. Infinite ones keep
/// cycling for any time. An indefinite duration never leaves progress 0.
pub fn sample_at(timing: &AnimateTiming, time_ms: u64) -> FrameSample {
    let direction = timing.direction;
    let fill = timing.fill_mode;
    let sample = |phase: Phase, iteration: u32, raw: f32, effective: bool| FrameSample {
        phase,
        iteration,
        progress: apply_easing(apply_direction(raw, direction, iteration), &timing.calc_mode),
        effective,
    };

    if time_ms < timing.delay_ms {
        return sample(Phase::Before, 0, 0.0, fill.fills_backwards());
    }
    let active = time_ms - timing.delay_ms;

    let Some(dur) = timing.dur.ms() else {
        return sample(Phase::Active, 0, 0.0, true);
    };

    match timing.iterations {
        Iterations::Count(count) => {
            let last = count.saturating_sub(1);
            let end = dur.saturating_mul(u64::from(count));
            if count == 0 {
                sample(Phase::After, 0, 0.0, fill.fills_forwards())
            } else if active >= end {
                sample(Phase::After, last, 1.0, fill.fills_forwards())
            } else {
                let iteration = u32::try_from(active / dur).unwrap_or(u32::MAX).min(last);
                let raw = (active - u64::from(iteration) * dur) as f32 / dur as f32;
                sample(Phase::Active, iteration, raw, true)
            }
        }
        Iterations::Infinite if dur == 0 => sample(Phase::Active, 0, 1.0, true),
        Iterations::Infinite => {
            let iteration = u32::try_from(active / dur).unwrap_or(u32::MAX);
            let raw = (active % dur) as f32 / dur as f32;
            sample(Phase::Active, iteration, raw, true)
        }
    }
}

/// Sample an animation by master progress over a containing total duration.
pub fn sample_progress(timing: &AnimateTiming, global_progress: f32, total_ms: u64) -> FrameSample {
    let time_ms = (global_progress.clamp(0.0, 1.0) as f64 * total_ms as f64).round() as u64;
    sample_at(timing, time_ms)
}
