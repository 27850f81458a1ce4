//! Frame evaluation.

use serde::Serialize;
use svgkit_geometry::GeometryCache;
use svgkit_scene::{AnimateTarget, SvgAnimate, SvgDocument, SvgElement};
use tracing::{debug, trace};

use crate::clock::AnimationClock;
use crate::interpolate::{interpolate, AnimatedValue, EvalContext};
use crate::timeline::{sample_at, sample_progress, FrameSample};

/// Value of an animation at a master progress over `total_ms`.
///
/// Motion paths are measured on each call and stroke-draw values carry no
/// dash pattern; use [`FrameEvaluator`] for cached geometry.
pub fn evaluate(animation: &SvgAnimate, global_progress: f32, total_ms: u64) -> AnimatedValue {
    let sample = sample_progress(&animation.timing, global_progress, total_ms);
    interpolate(&animation.target, sample.progress, EvalContext::default())
}

/// Sample and value of an animation at document time `time_ms`.
pub fn evaluate_with(
    animation: &SvgAnimate,
    time_ms: u64,
    ctx: EvalContext<'_>,
) -> (FrameSample, AnimatedValue) {
    let sample = sample_at(&animation.timing, time_ms);
    (sample, interpolate(&animation.target, sample.progress, ctx))
}

/// One animated property of one element in a frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameValue<'t> {
    #[serde(skip)]
    pub element: &'t SvgElement,
    #[serde(skip)]
    pub animation: &'t SvgAnimate,
    pub attribute: &'static str,
    pub sample: FrameSample,
    pub value: AnimatedValue,
}

/// Every animated value of a document at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'t> {
    pub time_ms: u64,
    pub values: Vec<FrameValue<'t>>,
}

impl<'t> Frame<'t> {
    /// Value of a given animation of a given element.
    pub fn value(&self, element: &SvgElement, animation: &SvgAnimate) -> Option<&AnimatedValue> {
        self.values
            .iter()
            .find(|v| std::ptr::eq(v.element, element) && std::ptr::eq(v.animation, animation))
            .map(|v| &v.value)
    }

    /// Values of one element, in declaration order.
    pub fn for_element<'f>(
        &'f self,
        element: &'f SvgElement,
    ) -> impl Iterator<Item = &'f FrameValue<'t>> + 'f {
        self.values
            .iter()
            .filter(move |v| std::ptr::eq(v.element, element))
    }

    /// Values the renderer should apply.
    pub fn effective(&self) -> impl Iterator<Item = &FrameValue<'t>> {
        self.values.iter().filter(|v| v.sample.is_effective())
    }
}

/// Evaluates every animation of one document.
///
/// Built once per scene tree: it collects the animated elements, measures
/// their geometry and derives the clock. Frames are then pure lookups plus
/// interpolation.
#[derive(Debug)]
pub struct FrameEvaluator<'t> {
    cache: GeometryCache<'t>,
    clock: AnimationClock,
    entries: Vec<(&'t SvgElement, &'t SvgAnimate)>,
}

impl<'t> FrameEvaluator<'t> {
    pub fn new(document: &'t SvgDocument) -> Self {
        let mut entries = Vec::new();
        document.walk(&mut |element| {
            for animation in element.animations() {
                entries.push((element, animation));
            }
        });
        let clock = AnimationClock::from_animations(entries.iter().map(|(_, a)| *a));
        debug!(
            animations = entries.len(),
            total_ms = clock.total_ms,
            infinite = clock.infinite,
            "Built frame evaluator"
        );
        Self {
            cache: GeometryCache::from_document(document),
            clock,
            entries,
        }
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    pub fn cache(&self) -> &GeometryCache<'t> {
        &self.cache
    }

    /// Number of (element, animation) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frame at document time `time_ms`.
    pub fn frame_at(&self, time_ms: u64) -> Frame<'t> {
        let values = self
            .entries
            .iter()
            .map(|&(element, animation)| {
                let ctx = self.context(element, animation);
                let (sample, value) = evaluate_with(animation, time_ms, ctx);
                FrameValue {
                    element,
                    animation,
                    attribute: animation.target.attribute(),
                    sample,
                    value,
                }
            })
            .collect::<Vec<_>>();
        trace!(time_ms, values = values.len(), "Evaluated frame");
        Frame { time_ms, values }
    }

    /// Frame at a master progress over the document's total duration.
    pub fn frame_at_progress(&self, progress: f32) -> Frame<'t> {
        self.frame_at(self.clock.time_at_progress(progress))
    }

    /// Frame after `elapsed_ms` of wall-clock playback.
    pub fn frame_at_elapsed(&self, elapsed_ms: u64) -> Frame<'t> {
        self.frame_at(self.clock.time_at_elapsed(elapsed_ms))
    }

    fn context(&self, element: &'t SvgElement, animation: &'t SvgAnimate) -> EvalContext<'_> {
        match &animation.target {
            AnimateTarget::StrokeDraw { .. } => EvalContext {
                path_length: self.cache.geometry(element).map(|g| g.length()),
                motion: None,
            },
            AnimateTarget::Motion { path, .. } => EvalContext {
                path_length: None,
                motion: self.cache.motion_measure(path),
            },
            _ => EvalContext::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_midpoint() {
        let doc = SvgDocument::parse(
            r#"<svg><circle r="10"><animate attributeName="r" from="10" to="20" dur="1s"/></circle></svg>"#,
        )
        .unwrap();
        let animation = &doc.root.children()[0].animations()[0];
        assert_eq!(evaluate(animation, 0.5, 1000), AnimatedValue::Number(15.0));
        assert_eq!(evaluate(animation, 0.5, 4000), AnimatedValue::Number(20.0));
    }

    #[test]
    fn test_frame_uses_cached_length() {
        let doc = SvgDocument::parse(
            r#"<svg><path d="M0 0 H30"><animate attributeName="stroke-dashoffset" from="30" to="0" dur="1s"/></path></svg>"#,
        )
        .unwrap();
        let evaluator = FrameEvaluator::new(&doc);
        assert_eq!(evaluator.len(), 1);
        let frame = evaluator.frame_at(500);
        let path = &doc.root.children()[0];
        let Some(AnimatedValue::StrokeDraw { fraction, dash: Some(dash) }) =
            frame.value(path, &path.animations()[0])
        else {
            panic!("expected stroke draw, got {:?}", frame.values);
        };
        assert_eq!(*fraction, 0.5);
        assert_eq!(dash.array, vec![30.0, 30.0]);
        assert_eq!(dash.offset, 15.0);
    }

    #[test]
    fn test_frame_lookup_by_element() {
        let doc = SvgDocument::parse(
            r#"<svg>
                <rect width="1" height="1">
                  <animate attributeName="x" from="0" to="10" dur="1s"/>
                  <animate attributeName="opacity" from="1" to="0" dur="2s" begin="1s"/>
                </rect>
                <circle r="1"/>
            </svg>"#,
        )
        .unwrap();
        let evaluator = FrameEvaluator::new(&doc);
        assert_eq!(evaluator.clock().total_ms, 3000);

        let frame = evaluator.frame_at_progress(0.0);
        let rect = &doc.root.children()[0];
        let values: Vec<_> = frame.for_element(rect).collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].attribute, "x");
        // The delayed opacity animation has no fill.
        assert_eq!(frame.effective().count(), 1);
        assert_eq!(frame.for_element(&doc.root.children()[1]).count(), 0);
    }
}
