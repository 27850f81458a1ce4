//! Document corpus tests for the scene builder

use svgkit_scene::{
    AnimateTarget, AnimationFillMode, CalcMode, Dur, Iterations, SvgColor, SvgDocument,
    SvgElement, SvgTransform,
};

/// One line per element: tag, id and wrapper markers, indented by depth.
fn outline(doc: &SvgDocument) -> Vec<String> {
    fn visit(element: &SvgElement, depth: usize, out: &mut Vec<String>) {
        let mut line = format!("{}{}", "  ".repeat(depth), element.tag_name());
        if let Some(id) = element.id() {
            line.push_str(&format!("#{}", id));
        }
        if element.style().is_some() {
            line.push_str(" [styled]");
        }
        if !element.animations().is_empty() {
            line.push_str(&format!(" [anim:{}]", element.animations().len()));
        }
        out.push(line);
        for child in element.children() {
            visit(child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    visit(&doc.root, 0, &mut out);
    out
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const ICON: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"
     width="24" height="24" viewBox="0 0 24 24">
  <!-- spinner -->
  <style>
    .track { stroke: #ccc; fill: none }
    #arc { stroke: currentColor; stroke-linecap: round }
  </style>
  <defs>
    <clipPath id="clip"><rect width="24" height="24" rx="4"/></clipPath>
  </defs>
  <g clip-path="url(#clip)" stroke-width="2">
    <circle class="track" cx="12" cy="12" r="9"/>
    <path id="arc" class="track" d="M12 3a9 9 0 0 1 9 9">
      <animateTransform attributeName="transform" type="rotate"
          from="0 12 12" to="360 12 12" dur="1s" repeatCount="indefinite"/>
    </path>
  </g>
</svg>"##;

#[test]
fn test_icon_structure() {
    init_tracing();
    let doc = SvgDocument::parse(ICON).unwrap();
    println!("Outline: {:#?}", outline(&doc));

    assert_eq!(
        outline(&doc),
        vec![
            "g",
            "  defs",
            "    clipPath#clip",
            "      rect",
            "  g [styled]",
            "    circle [styled]",
            "    path#arc [styled] [anim:1]",
        ]
    );
    assert_eq!(doc.size(), (24.0, 24.0));
}

#[test]
fn test_icon_styles() {
    let doc = SvgDocument::parse(ICON).unwrap();
    let group = &doc.root.children()[1];
    let group_style = group.style().unwrap();
    assert_eq!(group_style.clip_path.as_deref(), Some("clip"));
    assert_eq!(group_style.stroke_width, Some(2.0));

    let circle = group.children()[0].style().unwrap();
    assert_eq!(circle.fill, Some(SvgColor::None));
    assert_eq!(circle.stroke, Some(SvgColor::Argb(0xFFCC_CCCC)));

    // The id rule outranks the class rule; none and unspecified stay apart.
    let arc = group.children()[1].style().unwrap();
    assert_eq!(arc.stroke, Some(SvgColor::Unspecified));
    assert_eq!(arc.fill, Some(SvgColor::None));
}

#[test]
fn test_icon_animation() {
    let doc = SvgDocument::parse(ICON).unwrap();
    let registry = doc.registry();
    let arc = registry.get("arc").unwrap();
    let anim = &arc.animations()[0];
    assert!(matches!(anim.target, AnimateTarget::Transform { ref to, .. } if to[0] == 360.0));
    assert_eq!(anim.timing.iterations, Iterations::Infinite);
    assert_eq!(anim.timing.dur, Dur::Ms(1000));
    assert!(registry.get("clip").is_some());
}

#[test]
fn test_end_to_end_circle() {
    let doc = SvgDocument::parse(
        r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"><animate attributeName="opacity" from="0" to="1" dur="1s"/></circle></svg>"#,
    )
    .unwrap();
    let circle = &doc.root.children()[0];
    let SvgElement::Animated(inner, animations) = circle else {
        panic!("expected animated circle, got {:?}", circle);
    };
    assert!(matches!(**inner, SvgElement::Circle(ref c) if (c.cx, c.cy, c.r) == (12.0, 12.0, 10.0)));
    assert_eq!(animations.len(), 1);
    assert_eq!(animations[0].target, AnimateTarget::Opacity { from: 0.0, to: 1.0 });
    assert_eq!(animations[0].timing.dur, Dur::Ms(1000));
    assert_eq!(animations[0].timing.delay_ms, 0);
    assert_eq!(animations[0].timing.calc_mode, CalcMode::Linear);
    assert_eq!(animations[0].timing.fill_mode, AnimationFillMode::None);
}

#[test]
fn test_unmatched_tag_truncates_siblings() {
    let doc = SvgDocument::parse(r#"<svg><circle r="1"/><g><rect width="1"/><circle r="2"/></svg>"#).unwrap();
    assert_eq!(outline(&doc), vec!["g", "  circle"]);
}

#[test]
fn test_stray_close_truncates_siblings() {
    let doc = SvgDocument::parse(r#"<svg><circle r="1"/></rect><circle r="2"/></svg>"#).unwrap();
    assert_eq!(doc.root.children().len(), 1);
}

#[test]
fn test_nested_same_name_groups() {
    let doc = SvgDocument::parse(
        r#"<svg><g id="a"><g id="b"><g id="c"/></g><circle/></g><rect/></svg>"#,
    )
    .unwrap();
    assert_eq!(
        outline(&doc),
        vec!["g", "  g#a", "    g#b", "      g#c", "    circle", "  rect"]
    );
}

#[test]
fn test_namespaced_and_cdata() {
    let doc = SvgDocument::parse(
        r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg">
            <svg:style><![CDATA[ rect > x, .r { fill: #123456 } ]]></svg:style>
            <svg:rect class="r" width="1" height="1"/>
        </svg:svg>"#,
    )
    .unwrap();
    let rect = &doc.root.children()[0];
    assert_eq!(rect.tag_name(), "rect");
    assert_eq!(rect.style().and_then(|s| s.fill.clone()), Some(SvgColor::Argb(0xFF12_3456)));
}

#[test]
fn test_transforms_and_markers() {
    let doc = SvgDocument::parse(
        r##"<svg><path d="M0 0L5 5" transform="translate(1 2) rotate(45)" marker-end="url(#m)"
            style="marker-start: url(#s)"/></svg>"##,
    )
    .unwrap();
    let style = doc.root.children()[0].style().unwrap();
    assert!(matches!(&style.transform, Some(SvgTransform::Combined(list)) if list.len() == 2));
    assert_eq!(style.marker_end.as_deref(), Some("m"));
    assert_eq!(style.marker_start.as_deref(), Some("s"));
}

#[test]
fn test_serde_round_trip() {
    let doc = SvgDocument::parse(ICON).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let back: SvgDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_garbage_never_panics() {
    for input in [
        "<svg",
        "<svg><",
        "<svg><path d='M 1 1 L'/></svg>",
        "<svg><circle r='x' cx='--1'/></svg>",
        "<svg><g><g></g></svg>",
        "<svg><style>.a { fill: red</style><rect class='a'/></svg>",
        "<svg><polygon points='1 2 3'/><animate/></svg>",
    ] {
        let _ = SvgDocument::parse(input);
    }
}
