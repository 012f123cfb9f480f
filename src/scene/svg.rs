//! Serializes a [`Scene`] to a standalone SVG document.

use std::fmt::Write as _;

use egui::{Align, Color32, Stroke};

use super::{PathSegment, Primitive, Scene};

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `fill="#rrggbb" fill-opacity=".."` style pair for a color.
fn paint(attr: &str, color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!(r##"{attr}="#{r:02x}{g:02x}{b:02x}""##)
    } else {
        format!(
            r##"{attr}="#{r:02x}{g:02x}{b:02x}" {attr}-opacity="{:.3}""##,
            a as f32 / 255.0
        )
    }
}

fn stroke_attrs(stroke: Stroke) -> String {
    format!(r#"{} stroke-width="{}""#, paint("stroke", stroke.color), stroke.width)
}

/// SVG path data for a segment list.
pub fn path_data(segments: &[PathSegment]) -> String {
    let mut d = String::new();
    for seg in segments {
        if !d.is_empty() {
            d.push(' ');
        }
        match seg {
            PathSegment::MoveTo(p) => {
                let _ = write!(d, "M{},{}", p.x, p.y);
            }
            PathSegment::LineTo(p) => {
                let _ = write!(d, "L{},{}", p.x, p.y);
            }
            PathSegment::CubicTo(c1, c2, p) => {
                let _ = write!(d, "C{},{} {},{} {},{}", c1.x, c1.y, c2.x, c2.y, p.x, p.y);
            }
        }
    }
    d
}

fn write_primitive(out: &mut String, prim: &Primitive) {
    match prim {
        Primitive::Rect { rect, fill, rounding } => {
            let _ = writeln!(
                out,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{}" {}/>"#,
                rect.min.x,
                rect.min.y,
                rect.width(),
                rect.height(),
                rounding,
                paint("fill", *fill)
            );
        }
        Primitive::Line { points, stroke, dash } => {
            let dash_attr = dash
                .map(|(on, off)| format!(r#" stroke-dasharray="{} {}""#, on, off))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" {}{}/>"#,
                points[0].x,
                points[0].y,
                points[1].x,
                points[1].y,
                stroke_attrs(*stroke),
                dash_attr
            );
        }
        Primitive::Path { segments, stroke, arrow_head } => {
            let _ = writeln!(
                out,
                r#"    <path d="{}" fill="none" {}/>"#,
                path_data(segments),
                stroke_attrs(*stroke)
            );
            if let Some([a, b, c]) = arrow_head {
                let _ = writeln!(
                    out,
                    r#"    <polygon points="{},{} {},{} {},{}" {}/>"#,
                    a.x,
                    a.y,
                    b.x,
                    b.y,
                    c.x,
                    c.y,
                    paint("fill", stroke.color)
                );
            }
        }
        Primitive::Circle { center, radius, fill, stroke } => {
            let stroke_attr = stroke.map(stroke_attrs).unwrap_or_default();
            let _ = writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" {} {}/>"#,
                center.x,
                center.y,
                radius,
                paint("fill", *fill),
                stroke_attr
            );
        }
        Primitive::Text(text) => {
            let anchor = match text.anchor.x() {
                Align::Min => "start",
                Align::Center => "middle",
                Align::Max => "end",
            };
            let baseline = match text.anchor.y() {
                Align::Min => "hanging",
                Align::Center => "central",
                Align::Max => "alphabetic",
            };
            let style = if text.italic { r#" font-style="italic""# } else { "" };
            let weight = if text.bold { r#" font-weight="bold""# } else { "" };
            let _ = writeln!(
                out,
                r#"    <text x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="{}" {}{}{}>{}</text>"#,
                text.pos.x,
                text.pos.y,
                text.size,
                anchor,
                baseline,
                paint("fill", text.color),
                style,
                weight,
                xml_escape(&text.text)
            );
        }
    }
}

/// Render the scene as an SVG document sized to the chart.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" {}/>"#,
        paint("fill", scene.background)
    );
    for node in &scene.nodes {
        let _ = writeln!(out, r#"  <g data-node="{:?}">"#, node.key);
        for prim in &node.primitives {
            write_primitive(&mut out, prim);
        }
        out.push_str("  </g>\n");
    }
    out.push_str("</svg>\n");
    out
}
