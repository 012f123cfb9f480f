//! Paints a [`Scene`] with egui, translated to the widget's screen origin.

use egui::epaint::{CubicBezierShape, PathStroke};
use egui::text::LayoutJob;
use egui::{Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};

use crate::scene::{PathSegment, Primitive, Scene, TextPrimitive};

pub fn paint_scene(painter: &Painter, origin: Pos2, scene: &Scene) {
    let offset = origin.to_vec2();
    for node in &scene.nodes {
        for prim in &node.primitives {
            paint_primitive(painter, offset, prim);
        }
    }
}

fn paint_primitive(painter: &Painter, offset: Vec2, prim: &Primitive) {
    match prim {
        Primitive::Rect { rect, fill, rounding } => {
            painter.rect_filled(rect.translate(offset), *rounding, *fill);
        }
        Primitive::Line { points, stroke, dash } => {
            let points = [points[0] + offset, points[1] + offset];
            match dash {
                Some((dash, gap)) => {
                    painter.extend(Shape::dashed_line(&points, *stroke, *dash, *gap));
                }
                None => {
                    painter.line_segment(points, *stroke);
                }
            }
        }
        Primitive::Path {
            segments,
            stroke,
            arrow_head,
        } => {
            paint_path(painter, offset, segments, *stroke);
            if let Some(head) = arrow_head {
                painter.add(Shape::convex_polygon(
                    head.iter().map(|p| *p + offset).collect(),
                    stroke.color,
                    Stroke::NONE,
                ));
            }
        }
        Primitive::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            painter.circle(*center + offset, *radius, *fill, stroke.unwrap_or(Stroke::NONE));
        }
        Primitive::Text(text) => paint_text(painter, offset, text),
    }
}

/// Straight runs become polylines; each cubic becomes its own bezier shape.
fn paint_path(painter: &Painter, offset: Vec2, segments: &[PathSegment], stroke: Stroke) {
    let mut run: Vec<Pos2> = Vec::new();
    let flush = |run: &mut Vec<Pos2>| {
        if run.len() >= 2 {
            painter.add(Shape::line(std::mem::take(run), stroke));
        } else {
            run.clear();
        }
    };

    for seg in segments {
        match *seg {
            PathSegment::MoveTo(p) => {
                flush(&mut run);
                run.push(p + offset);
            }
            PathSegment::LineTo(p) => run.push(p + offset),
            PathSegment::CubicTo(c1, c2, p) => {
                let Some(&current) = run.last() else {
                    continue;
                };
                flush(&mut run);
                painter.add(CubicBezierShape::from_points_stroke(
                    [current, c1 + offset, c2 + offset, p + offset],
                    false,
                    Color32::TRANSPARENT,
                    PathStroke::from(stroke),
                ));
                run.push(p + offset);
            }
        }
    }
    flush(&mut run);
}

fn paint_text(painter: &Painter, offset: Vec2, text: &TextPrimitive) {
    let mut job = LayoutJob::simple_singleline(text.text.clone(), FontId::proportional(text.size), text.color);
    if text.italic {
        for section in &mut job.sections {
            section.format.italics = true;
        }
    }
    let galley = painter.layout_job(job);
    let rect = text.anchor.anchor_size(text.pos + offset, galley.size());
    if text.bold {
        // No bold face in the default fonts; overdraw with a half-pixel shift.
        painter.galley(rect.min + Vec2::new(0.5, 0.0), galley.clone(), text.color);
    }
    painter.galley(rect.min, galley, text.color);
}
