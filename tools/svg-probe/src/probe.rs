//! Probe operations behind the CLI commands.

use std::path::{Path, PathBuf};

use serde::Serialize;
use svgkit_animation::{AnimatedValue, FrameEvaluator, Phase};
use svgkit_common::LoggingError;
use svgkit_path::{parse_path_strict, to_path_string, PathParseError};
use svgkit_scene::{ParseOptions, SvgDocument, SvgElement, SvgError};
use tracing::{debug, info};

/// Error type for probe operations.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document: {0}")]
    Scene(#[from] SvgError),

    #[error("Invalid path data: {0}")]
    Path(#[from] PathParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

/// Read and parse an SVG file.
pub fn load_document(path: &Path, options: ParseOptions) -> Result<SvgDocument, ProbeError> {
    let src = std::fs::read_to_string(path).map_err(|source| ProbeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = SvgDocument::parse_with(&src, options)?;
    info!(
        path = %path.display(),
        elements = doc.element_count(),
        "Loaded document"
    );
    Ok(doc)
}

/// Strict-parse path data and write it back in normalized form.
pub fn normalize_path(d: &str) -> Result<String, ProbeError> {
    let commands = parse_path_strict(d)?;
    debug!(commands = commands.len(), "Parsed path data");
    Ok(to_path_string(&commands))
}

/// One animated value in a sampled frame.
#[derive(Debug, Clone, Serialize)]
pub struct ValueReport {
    /// Element id, or tag and document-order index.
    pub element: String,
    pub attribute: &'static str,
    pub phase: Phase,
    pub iteration: u32,
    pub progress: f32,
    pub effective: bool,
    pub value: AnimatedValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub time_ms: u64,
    pub values: Vec<ValueReport>,
}

/// Sample `frames` evenly spaced frames over the document timeline,
/// including both ends. Infinite documents are sampled over one pass.
pub fn sample_frames(doc: &SvgDocument, frames: u32) -> Vec<FrameReport> {
    let mut order = Vec::new();
    doc.walk(&mut |element| order.push(element));
    let label = |element: &SvgElement| match element.id() {
        Some(id) => format!("#{id}"),
        None => {
            let index = order.iter().position(|e| std::ptr::eq(*e, element)).unwrap_or(0);
            format!("{}[{}]", element.tag_name(), index)
        }
    };

    let evaluator = FrameEvaluator::new(doc);
    let total = evaluator.clock().total_ms;
    let steps = frames.saturating_sub(1).max(1);
    (0..frames.max(1))
        .map(|i| {
            let time_ms = total * u64::from(i) / u64::from(steps);
            let frame = evaluator.frame_at(time_ms);
            FrameReport {
                time_ms,
                values: frame
                    .values
                    .into_iter()
                    .map(|v| ValueReport {
                        element: label(v.element),
                        attribute: v.attribute,
                        phase: v.sample.phase,
                        iteration: v.sample.iteration,
                        progress: v.sample.progress,
                        effective: v.sample.is_effective(),
                        value: v.value,
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PULSE: &str = r#"<svg viewBox="0 0 10 10">
        <circle id="dot" r="2"><animate attributeName="r" from="2" to="4" dur="1s"/></circle>
        <rect width="1" height="1"><animate attributeName="x" from="0" to="5" dur="500ms" fill="freeze"/></rect>
    </svg>"#;

    #[test]
    fn test_load_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PULSE.as_bytes()).unwrap();
        let doc = load_document(file.path(), ParseOptions::default()).unwrap();
        assert_eq!(doc.root.children().len(), 2);

        let missing = load_document(Path::new("/nonexistent/file.svg"), ParseOptions::default());
        assert!(matches!(missing, Err(ProbeError::Read { .. })));
    }

    #[test]
    fn test_load_non_svg() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<html></html>").unwrap();
        let result = load_document(file.path(), ParseOptions::default());
        assert!(matches!(result, Err(ProbeError::Scene(SvgError::NoRootElement))));
    }

    #[test]
    fn test_sample_frames() {
        let doc = SvgDocument::parse(PULSE).unwrap();
        let frames = sample_frames(&doc, 3);
        assert_eq!(
            frames.iter().map(|f| f.time_ms).collect::<Vec<_>>(),
            vec![0, 500, 1000]
        );
        let middle = &frames[1];
        assert_eq!(middle.values[0].element, "#dot");
        assert_eq!(middle.values[0].value, AnimatedValue::Number(3.0));
        assert_eq!(middle.values[1].element, "rect[2]");
        assert_eq!(middle.values[1].phase, Phase::After);
        assert!(middle.values[1].effective);

        let json = serde_json::to_string(&frames).unwrap();
        assert!(json.contains("\"attribute\":\"r\""));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("M0,0 10,10z").unwrap(), "M0 0 L10 10 Z");
        assert!(matches!(
            normalize_path("L1 1"),
            Err(ProbeError::Path(PathParseError::MissingMoveTo))
        ));
    }
}
