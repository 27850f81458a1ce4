//! Parse-and-evaluate scenarios across the scene and animation crates

use svgkit_animation::{
    apply_easing, evaluate, sample_at, AnimatedValue, FrameEvaluator, Phase,
};
use svgkit_geometry::normalize_dasharray;
use svgkit_scene::{
    AnimateTarget, AnimateTiming, AnimationFillMode, CalcMode, Dur, KeySplines, SvgAnimate,
    SvgDocument, SvgElement, SvgTransform,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn first_animation(doc: &SvgDocument) -> &SvgAnimate {
    let mut found = None;
    doc.walk(&mut |element| {
        if found.is_none() {
            found = element.animations().first();
        }
    });
    found.expect("document has an animation")
}

#[test]
fn test_circle_opacity_midpoint() {
    init_tracing();
    let doc = SvgDocument::parse(
        r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"><animate attributeName="opacity" from="0" to="1" dur="1s"/></circle></svg>"#,
    )
    .unwrap();

    let circle = &doc.root.children()[0];
    let SvgElement::Animated(inner, animations) = circle else {
        panic!("expected animated circle, got {:?}", circle);
    };
    assert!(matches!(**inner, SvgElement::Circle(_)));
    assert_eq!(animations[0].target, AnimateTarget::Opacity { from: 0.0, to: 1.0 });

    assert_eq!(evaluate(&animations[0], 0.5, 1000), AnimatedValue::Number(0.5));

    let evaluator = FrameEvaluator::new(&doc);
    let frame = evaluator.frame_at_progress(0.5);
    println!("Frame: {:#?}", frame.values);
    assert_eq!(frame.value(circle, &animations[0]), Some(&AnimatedValue::Number(0.5)));
}

#[test]
fn test_backwards_fill_during_delay() {
    let animation = SvgAnimate::new(
        AnimateTarget::StrokeWidth { from: 2.0, to: 8.0 },
        AnimateTiming {
            dur: Dur::Ms(300),
            delay_ms: 200,
            fill_mode: AnimationFillMode::Backwards,
            ..Default::default()
        },
    );
    let sample = sample_at(&animation.timing, 0);
    assert_eq!(sample.phase, Phase::Before);
    assert!(sample.is_effective());
    // Global time 0 of a 500ms timeline.
    assert_eq!(evaluate(&animation, 0.0, 500), AnimatedValue::Number(2.0));
}

#[test]
fn test_easing_boundaries() {
    for splines in [
        KeySplines::EASE,
        KeySplines::EASE_IN,
        KeySplines::EASE_OUT,
        KeySplines::EASE_IN_OUT,
    ] {
        assert_eq!(apply_easing(0.0, &CalcMode::Spline(splines)), 0.0);
        assert_eq!(apply_easing(1.0, &CalcMode::Spline(splines)), 1.0);
    }
}

#[test]
fn test_oscillating_values_range() {
    let doc = SvgDocument::parse(
        r#"<svg><rect width="2" height="2"><animate attributeName="opacity" values="1;0.5;1" dur="2s"/></rect></svg>"#,
    )
    .unwrap();
    let animation = first_animation(&doc);
    assert_eq!(animation.target, AnimateTarget::Opacity { from: 0.5, to: 1.0 });
    assert_eq!(evaluate(animation, 0.5, 2000), AnimatedValue::Number(0.75));
}

#[test]
fn test_odd_dasharray_for_stroking() {
    let doc = SvgDocument::parse(r#"<svg><line x2="10" stroke-dasharray="5,3,2"/></svg>"#).unwrap();
    let style = doc.root.children()[0].style().unwrap();
    let dashes = style.stroke_dasharray.clone().unwrap();
    assert_eq!(dashes, vec![5.0, 3.0, 2.0]);
    assert_eq!(normalize_dasharray(&dashes), vec![5.0, 3.0, 2.0, 5.0, 3.0, 2.0]);
}

#[test]
fn test_css_spinner() {
    let doc = SvgDocument::parse(
        r#"<svg viewBox="0 0 24 24">
            <style>
              @keyframes spin { from { transform: rotate(0deg) } to { transform: rotate(1turn) } }
              .spinner { animation: spin 2s linear infinite }
            </style>
            <path class="spinner" d="M12 2a10 10 0 0 1 10 10"/>
        </svg>"#,
    )
    .unwrap();
    let evaluator = FrameEvaluator::new(&doc);
    assert!(evaluator.clock().infinite);

    // Wall-clock time wraps on the 2s document cycle.
    let frame = evaluator.frame_at_elapsed(4500);
    let value = &frame.values[0];
    assert_eq!(value.sample.iteration, 0);
    assert_eq!(
        value.value,
        AnimatedValue::Transform(SvgTransform::Rotate {
            angle: 90.0,
            cx: 0.0,
            cy: 0.0
        })
    );
}

#[test]
fn test_motion_along_mpath() {
    let doc = SvgDocument::parse(
        r##"<svg>
            <path id="track" d="M0 0 H100"/>
            <circle r="3">
              <animateMotion dur="1s" rotate="auto"><mpath href="#track"/></animateMotion>
            </circle>
        </svg>"##,
    )
    .unwrap();
    let evaluator = FrameEvaluator::new(&doc);
    let frame = evaluator.frame_at(250);
    assert_eq!(
        frame.values[0].value,
        AnimatedValue::Motion {
            x: 25.0,
            y: 0.0,
            angle: 0.0
        }
    );
}

#[test]
fn test_path_morph() {
    let doc = SvgDocument::parse(
        r#"<svg>
            <path d="M0 0 L10 0">
              <animate attributeName="d" from="M0 0 L10 0" to="M0 10 L20 10" dur="1s"/>
            </path>
            <path d="M0 0 L10 0">
              <animate attributeName="d" from="M0 0 L10 0" to="M0 0 Q5 5 10 0" dur="1s"/>
            </path>
        </svg>"#,
    )
    .unwrap();
    let evaluator = FrameEvaluator::new(&doc);
    let frame = evaluator.frame_at(400);

    let AnimatedValue::Path(morphed) = &frame.values[0].value else {
        panic!("expected path, got {:?}", frame.values[0].value);
    };
    assert_eq!(svgkit_path::to_path_string(morphed), "M0 4 L14 4");

    // Mismatched command sequences switch whole paths halfway.
    let AnimatedValue::Path(switched) = &frame.values[1].value else {
        panic!("expected path");
    };
    assert_eq!(switched, &svgkit_path::parse_path("M0 0 L10 0"));
}

#[test]
fn test_frame_serializes() {
    let doc = SvgDocument::parse(
        r#"<svg><rect width="4" height="4" fill="red"><animate attributeName="fill" from="red" to="blue" dur="1s"/></rect></svg>"#,
    )
    .unwrap();
    let evaluator = FrameEvaluator::new(&doc);
    let frame = evaluator.frame_at_progress(0.5);
    assert_eq!(frame.values[0].value, AnimatedValue::Color(0xFF80_0080));

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["values"][0]["attribute"], "fill");
    assert_eq!(json["values"][0]["sample"]["phase"], "Active");
}

#[test]
fn test_wall_clock_replays_delay() {
    let doc = SvgDocument::parse(
        r#"<svg><rect width="4" height="4">
            <animate attributeName="x" from="0" to="100" dur="400ms" begin="200ms" repeatCount="indefinite"/>
        </rect></svg>"#,
    )
    .unwrap();
    let evaluator = FrameEvaluator::new(&doc);
    assert_eq!(evaluator.clock().total_ms, 600);
    assert!(evaluator.clock().infinite);

    // 900ms wraps to 300ms, which is 100ms into the active window.
    let frame = evaluator.frame_at_elapsed(900);
    println!("frame at 900ms: {:?}", frame.values[0].sample);
    assert_eq!(frame.values[0].sample.phase, Phase::Active);
    assert_eq!(frame.values[0].value, AnimatedValue::Number(25.0));

    // Inside the replayed delay.
    let frame = evaluator.frame_at_elapsed(700);
    assert_eq!(frame.values[0].sample.phase, Phase::Before);
}

#[test]
fn test_wall_clock_restarts_finite_animations() {
    let doc = SvgDocument::parse(
        r#"<svg>
            <rect width="4" height="4"><animate attributeName="x" from="0" to="100" dur="2s"/></rect>
            <circle r="1"><animate attributeName="r" from="1" to="3" dur="1s" repeatCount="indefinite"/></circle>
        </svg>"#,
    )
    .unwrap();
    let evaluator = FrameEvaluator::new(&doc);
    assert_eq!(evaluator.clock().total_ms, 2000);

    let frame = evaluator.frame_at_elapsed(2500);
    let x = &frame.values[0];
    assert_eq!(x.attribute, "x");
    assert_eq!(x.sample.phase, Phase::Active);
    assert_eq!(x.value, AnimatedValue::Number(25.0));
    assert_eq!(frame.values[1].value, AnimatedValue::Number(2.0));
}
