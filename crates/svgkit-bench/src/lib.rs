//! # SvgKit Bench
//!
//! Synthetic documents for the SvgKit benchmarks.
//!
//! ## Features
//!
//! - Path data with every command kind
//! - Stylesheets with tag, class and id rules plus keyframes
//! - Shape grids with SMIL and CSS animations
//!
//! ## Usage
//!
//! ```
//! use svgkit_bench::animated_grid;
//! use svgkit_scene::SvgDocument;
//!
//! let doc = SvgDocument::parse(&animated_grid(4)).unwrap();
//! assert!(doc.element_count() > 16);
//! ```

use std::fmt::Write;
use tracing::debug;

/// A named benchmark input.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: &'static str,
    pub svg: String,
}

/// Path data of `segments` mixed commands, absolute and relative.
pub fn path_data(segments: usize) -> String {
    let mut d = String::from("M0 0");
    for i in 0..segments {
        let v = (i % 17) as f32 * 1.5;
        // Writing into a String cannot fail.
        let _ = match i % 6 {
            0 => write!(d, " L{v} {}", v + 2.0),
            1 => write!(d, " c1 2 3 4 {v} -{v}"),
            2 => write!(d, " Q{v} 1 {} {v}", v * 2.0),
            3 => write!(d, " a5 5 0 0 1 {v} 3"),
            4 => write!(d, " h{v}"),
            _ => write!(d, " s2.5.5-1 {v}"),
        };
    }
    d.push_str(" Z");
    d
}

/// A stylesheet of `rules` rules spread over tags, classes and ids.
pub fn stylesheet(rules: usize) -> String {
    let mut css = String::from("@keyframes pulse { from { opacity: 0.2 } to { opacity: 1 } }\n");
    for i in 0..rules {
        let _ = match i % 3 {
            0 => writeln!(css, "rect {{ stroke-width: {}px; }}", i % 5),
            1 => writeln!(css, ".c{} {{ fill: #{:06x}; stroke: none }}", i, i * 4099 % 0xFF_FFFF),
            _ => writeln!(css, "#e{} {{ opacity: 0.{}; }}", i, i % 10),
        };
    }
    css
}

/// An `n × n` grid of shapes, every other one animated.
pub fn animated_grid(n: usize) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {0} {0}"><style>{1}</style>"#,
        n * 10,
        stylesheet(n * 3)
    );
    for row in 0..n {
        svg.push_str("<g>");
        for col in 0..n {
            let (x, y) = (col * 10, row * 10);
            let i = row * n + col;
            let _ = match i % 4 {
                0 => write!(
                    svg,
                    r#"<circle id="e{i}" class="c{i}" cx="{}" cy="{}" r="4"><animate attributeName="r" values="2;4;3" dur="1s" repeatCount="indefinite"/></circle>"#,
                    x + 5,
                    y + 5
                ),
                1 => write!(
                    svg,
                    r#"<rect class="c{i}" x="{x}" y="{y}" width="8" height="8" rx="2" style="animation: pulse 2s ease-in-out alternate infinite"/>"#
                ),
                2 => write!(
                    svg,
                    r#"<path d="M{x} {y} l8 0 l-4 8 z"><animate attributeName="stroke-dashoffset" from="24" to="0" dur="800ms" fill="freeze"/></path>"#
                ),
                _ => write!(
                    svg,
                    r#"<polygon points="{x},{y} {},{y} {},{}"/>"#,
                    x + 8,
                    x + 4,
                    y + 8
                ),
            };
        }
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

/// Small, medium and large animated documents.
pub fn standard_fixtures() -> Vec<Fixture> {
    let fixtures = vec![
        Fixture {
            name: "small",
            svg: animated_grid(4),
        },
        Fixture {
            name: "medium",
            svg: animated_grid(16),
        },
        Fixture {
            name: "large",
            svg: animated_grid(48),
        },
    ];
    debug!(
        sizes = ?fixtures.iter().map(|f| f.svg.len()).collect::<Vec<_>>(),
        "Generated fixtures"
    );
    fixtures
}
