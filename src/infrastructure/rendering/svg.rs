//! Serializes a `Scene` into standalone SVG markup.

use super::scene::{Scene, Shape, TextShape, TooltipView};
use std::fmt::Write;

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opacity_attr(opacity: f32) -> String {
    if opacity < 1.0 { format!(" opacity=\"{:.2}\"", opacity) } else { String::new() }
}

pub struct SvgWriter {
    /// Prefix for element ids so several charts can share a document
    id_prefix: String,
    include_tooltip: bool,
}

impl SvgWriter {
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self { id_prefix: id_prefix.into(), include_tooltip: false }
    }

    /// Draw the tooltip inside the SVG instead of leaving it to the host.
    pub fn with_tooltip(mut self) -> Self {
        self.include_tooltip = true;
        self
    }

    pub fn write(&self, scene: &Scene) -> String {
        let mut out = String::new();
        let label = scene.title.as_deref().unwrap_or("Chart");
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\" role=\"img\" aria-label=\"{label}\">",
            w = scene.width,
            h = scene.height,
            label = escape_xml(label),
        );
        if let Some(title) = &scene.title {
            let _ = write!(out, "<title>{}</title>", escape_xml(title));
        }

        if let Some(message) = &scene.placeholder {
            let _ = write!(
                out,
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" class=\"chart-placeholder\">{}</text></svg>",
                scene.width / 2.0,
                scene.height / 2.0,
                escape_xml(message),
            );
            return out;
        }

        let clip_id = format!("{}-plot-clip", self.id_prefix);
        let _ = write!(
            out,
            "<defs><clipPath id=\"{}\"><rect x=\"0\" y=\"0\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath></defs>",
            clip_id, scene.plot_size.width, scene.plot_size.height,
        );
        let _ = write!(out, "<g transform=\"translate({:.2} {:.2})\">", scene.plot_origin.x, scene.plot_origin.y);
        out.push_str("<g class=\"axes\">");
        scene.axes.iter().for_each(|s| write_shape(&mut out, s));
        out.push_str("</g>");
        let _ = write!(
            out,
            "<g clip-path=\"url(#{})\"><g class=\"plot\" transform=\"{}\">",
            clip_id,
            scene.transform.to_css_matrix(),
        );
        scene.plot.iter().for_each(|s| write_shape(&mut out, s));
        out.push_str("</g></g><g class=\"overlay\">");
        scene.overlay.iter().for_each(|s| write_shape(&mut out, s));
        out.push_str("</g></g>");

        if self.include_tooltip {
            if let Some(tooltip) = &scene.tooltip {
                write_tooltip(&mut out, tooltip);
            }
        }
        out.push_str("</svg>");
        out
    }
}

fn write_text(out: &mut String, text: &TextShape) {
    let weight = if text.bold { " font-weight=\"bold\"" } else { "" };
    let _ = write!(
        out,
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\"{}>",
        text.position.x,
        text.position.y,
        text.size,
        text.color.to_css(),
        text.anchor.as_ref(),
        weight,
    );
    if let Some(full) = &text.full {
        let _ = write!(out, "<title>{}</title>", escape_xml(full));
    }
    let _ = write!(out, "{}</text>", escape_xml(&text.content));
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Rect { rect, fill, opacity } => {
            let _ = write!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"{}/>",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                fill.to_css(),
                opacity_attr(*opacity),
            );
        }
        Shape::Path { d, fill, opacity } => {
            let _ = write!(out, "<path d=\"{}\" fill=\"{}\"{}/>", d, fill.to_css(), opacity_attr(*opacity));
        }
        Shape::Polyline { points, stroke, width, opacity } => {
            let coords: Vec<String> = points.iter().map(|p| format!("{:.2},{:.2}", p.x, p.y)).collect();
            let _ = write!(
                out,
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"{}/>",
                coords.join(" "),
                stroke.to_css(),
                width,
                opacity_attr(*opacity),
            );
        }
        Shape::Circle { center, radius, fill, opacity } => {
            let _ = write!(
                out,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"{}/>",
                center.x,
                center.y,
                radius,
                fill.to_css(),
                opacity_attr(*opacity),
            );
        }
        Shape::Line { from, to, stroke, width } => {
            let _ = write!(
                out,
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                from.x,
                from.y,
                to.x,
                to.y,
                stroke.to_css(),
                width,
            );
        }
        Shape::Text(text) => write_text(out, text),
    }
}

fn write_tooltip(out: &mut String, tooltip: &TooltipView) {
    let _ = write!(
        out,
        "<g class=\"tooltip\" transform=\"translate({:.2} {:.2})\"><text y=\"-8\" text-anchor=\"middle\" fill=\"{}\" stroke=\"{}\" stroke-width=\"4\" paint-order=\"stroke\">{}</text>",
        tooltip.position.x,
        tooltip.position.y,
        tooltip.text_color.to_css(),
        tooltip.background.to_css(),
        escape_xml(&tooltip.summary()),
    );
    out.push_str("</g>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::geometry::Rect;
    use crate::domain::chart::{Color, Dimensions, ScreenPoint};

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml("R&D <Ariane 6>"), "R&amp;D &lt;Ariane 6&gt;");
    }

    #[test]
    fn placeholder_markup() {
        let svg = SvgWriter::new("c1").write(&Scene::placeholder(400.0, 300.0, "No data available"));
        assert!(svg.contains("height=\"300\""));
        assert!(svg.contains(">No data available</text>"));
        assert!(!svg.contains("clipPath"));
    }

    #[test]
    fn plot_group_carries_transform_and_clip() {
        let mut scene = Scene::new(400.0, 300.0);
        scene.plot_size = Dimensions::new(336.0, 252.0);
        scene.plot.push(Shape::Rect {
            rect: Rect { x: 0.0, y: 10.0, width: 20.0, height: 30.0 },
            fill: Color::from_hex(0x3b82f6),
            opacity: 0.35,
        });
        scene.plot.push(Shape::Text(TextShape::new(ScreenPoint::ORIGIN, "x", 12.0, Color::WHITE)));
        let svg = SvgWriter::new("c2").write(&scene);
        assert!(svg.contains("clip-path=\"url(#c2-plot-clip)\""));
        assert!(svg.contains("matrix(1.0000 0 0 1.0000 0.00 0.00)"));
        assert!(svg.contains("fill=\"#3b82f6\" opacity=\"0.35\""));
    }
}
