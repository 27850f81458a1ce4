//! Easing curves.

use svgkit_scene::{CalcMode, KeySplines, StepPosition};

const NEWTON_ITERATIONS: usize = 8;
const X_EPSILON: f32 = 0.001;
const SLOPE_EPSILON: f32 = 0.0001;

/// Map linear progress in [0, 1] through a calc mode.
///
/// Discrete holds 0 until the very end. Paced has a single segment and so
/// behaves as linear.
pub fn apply_easing(progress: f32, mode: &CalcMode) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    match mode {
        CalcMode::Linear | CalcMode::Paced => progress,
        CalcMode::Discrete => {
            if progress >= 1.0 {
                1.0
            } else {
                0.0
            }
        }
        CalcMode::Spline(splines) => cubic_bezier(splines, progress),
        CalcMode::Steps { count, position } => step_function(*count, *position, progress),
    }
}

/// Solve `x(t) = x` by Newton-Raphson and return `y(t)`.
fn cubic_bezier(splines: &KeySplines, x: f32) -> f32 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let residual = bezier_value(splines.x1, splines.x2, t) - x;
        if residual.abs() < X_EPSILON {
            break;
        }
        let slope = bezier_derivative(splines.x1, splines.x2, t);
        if slope.abs() < SLOPE_EPSILON {
            break;
        }
        t = (t - residual / slope).clamp(0.0, 1.0);
    }
    bezier_value(splines.y1, splines.y2, t).clamp(0.0, 1.0)
}

/// One coordinate of a unit cubic bezier with endpoints 0 and 1.
fn bezier_value(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn bezier_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// CSS `steps()` easing.
fn step_function(count: u32, position: StepPosition, t: f32) -> f32 {
    if count == 0 {
        return t;
    }
    let steps = count as f32;
    let jumps = match position {
        StepPosition::Start | StepPosition::End => steps,
        StepPosition::JumpNone => steps - 1.0,
        StepPosition::JumpBoth => steps + 1.0,
    };
    if jumps <= 0.0 {
        return t;
    }
    let mut current = (t * steps).floor();
    if matches!(position, StepPosition::Start | StepPosition::JumpBoth) {
        current += 1.0;
    }
    current.clamp(0.0, jumps) / jumps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(count: u32, position: StepPosition) -> CalcMode {
        CalcMode::Steps { count, position }
    }

    #[test]
    fn test_linear_and_paced() {
        assert_eq!(apply_easing(0.3, &CalcMode::Linear), 0.3);
        assert_eq!(apply_easing(0.3, &CalcMode::Paced), 0.3);
        assert_eq!(apply_easing(1.7, &CalcMode::Linear), 1.0);
    }

    #[test]
    fn test_discrete() {
        assert_eq!(apply_easing(0.0, &CalcMode::Discrete), 0.0);
        assert_eq!(apply_easing(0.99, &CalcMode::Discrete), 0.0);
        assert_eq!(apply_easing(1.0, &CalcMode::Discrete), 1.0);
    }

    #[test]
    fn test_spline_boundaries() {
        for splines in [
            KeySplines::EASE,
            KeySplines::EASE_IN,
            KeySplines::EASE_OUT,
            KeySplines::EASE_IN_OUT,
        ] {
            let mode = CalcMode::Spline(splines);
            assert_eq!(apply_easing(0.0, &mode), 0.0, "{:?}", splines);
            assert_eq!(apply_easing(1.0, &mode), 1.0, "{:?}", splines);
        }
    }

    #[test]
    fn test_spline_shape() {
        let ease = CalcMode::Spline(KeySplines::EASE);
        assert!(apply_easing(0.5, &ease) > 0.5);
        let ease_in = CalcMode::Spline(KeySplines::EASE_IN);
        assert!(apply_easing(0.25, &ease_in) < 0.25);
        // Symmetric curve crosses the middle.
        let in_out = apply_easing(0.5, &CalcMode::Spline(KeySplines::EASE_IN_OUT));
        assert!((in_out - 0.5).abs() < 0.01, "{in_out}");
    }

    #[test]
    fn test_spline_monotonic() {
        let mode = CalcMode::Spline(KeySplines::new(0.1, 0.7, 0.1, 1.0));
        let mut last = 0.0;
        for i in 0..=20 {
            let y = apply_easing(i as f32 / 20.0, &mode);
            assert!(y + 1e-3 >= last, "{i}: {y} < {last}");
            assert!((0.0..=1.0).contains(&y));
            last = y;
        }
    }

    #[test]
    fn test_steps() {
        let end = steps(4, StepPosition::End);
        assert_eq!(apply_easing(0.0, &end), 0.0);
        assert_eq!(apply_easing(0.24, &end), 0.0);
        assert_eq!(apply_easing(0.26, &end), 0.25);
        assert_eq!(apply_easing(1.0, &end), 1.0);

        let start = steps(4, StepPosition::Start);
        assert_eq!(apply_easing(0.0, &start), 0.25);
        assert_eq!(apply_easing(1.0, &start), 1.0);

        let none = steps(3, StepPosition::JumpNone);
        assert_eq!(apply_easing(0.0, &none), 0.0);
        assert_eq!(apply_easing(0.5, &none), 0.5);
        assert_eq!(apply_easing(1.0, &none), 1.0);

        let both = steps(1, StepPosition::JumpBoth);
        assert_eq!(apply_easing(0.0, &both), 0.5);
        assert_eq!(apply_easing(1.0, &both), 1.0);
    }
}
