//! SVG preview of a computed grid layout.
//!
//! Draws the canvas background, every cell outline, and the clipped image
//! placement inside each cell as resolved by [`resolve_placement`]. The
//! drawing is scaled to fit a fixed panel, so the same document works as a
//! thumbnail for layouts of any size.
//!
//! # Example
//!
//! ```
//! use zengrid::{Settings, compute_layout, svg::render_layout_svg};
//!
//! let settings = Settings::width_col(900.0, 3).gap(6.0);
//! let layout = compute_layout(&[(400u32, 300u32), (300, 400), (500, 500)], &settings).unwrap();
//!
//! let svg = render_layout_svg(&layout, &settings);
//! assert!(svg.starts_with("<svg"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::color::CanvasColor;
use crate::fit::{RectF, resolve_placement};
use crate::layout::Layout;
use crate::settings::Settings;

/// Maximum width of the drawn grid.
const MAX_PANEL_W: f64 = 600.0;
/// Maximum height of the drawn grid.
const MAX_PANEL_H: f64 = 400.0;
/// Margin around the grid panel.
const MARGIN: f64 = 20.0;
/// Height of the caption line above the panel.
const LABEL_H: f64 = 22.0;

/// Render a complete SVG document previewing `layout` with `settings`.
///
/// Each cell gets a dashed outline, a clip path, and the image rectangle
/// positioned by the settings' fit mode and anchor. Cells are labelled with
/// their image index. An empty layout renders a 1×1 document.
pub fn render_layout_svg(layout: &Layout, settings: &Settings) -> String {
    if layout.is_empty() || layout.total_width <= 0.0 || layout.total_height <= 0.0 {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let scale = (MAX_PANEL_W / layout.total_width).min(MAX_PANEL_H / layout.total_height);
    let panel_w = layout.total_width * scale;
    let panel_h = layout.total_height * scale;
    let total_w = panel_w + 2.0 * MARGIN;
    let total_h = panel_h + LABEL_H + 2.0 * MARGIN;
    let origin_x = MARGIN;
    let origin_y = MARGIN + LABEL_H;

    let mut svg = String::with_capacity(1024 + layout.cells.len() * 384);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .index { font-size: 11px; fill: #fff; }
  .canvas { stroke: #999; stroke-width: 1; }
  .cell { fill: none; stroke: #777; stroke-width: 1; stroke-dasharray: 4,2; }
  .image { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .canvas { stroke: #555; }
    .cell { stroke: #888; }
    .image { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let (px_w, px_h) = layout.pixel_size();
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="label">{}</text>"#,
        origin_x,
        MARGIN + 14.0,
        escape_xml(&format!(
            "{}×{}  {} cells  {} / {}",
            px_w,
            px_h,
            layout.cells.len(),
            settings.fit_mode,
            settings.anchor
        ))
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="canvas" {}/>"#,
        origin_x,
        origin_y,
        panel_w,
        panel_h,
        fill_attrs(settings.background)
    ));
    svg.push('\n');

    let to_panel = |r: &RectF| RectF {
        x: origin_x + r.x * scale,
        y: origin_y + r.y * scale,
        width: r.width * scale,
        height: r.height * scale,
    };

    svg.push_str("<defs>\n");
    for (slot, cell) in layout.cells.iter().enumerate() {
        let clip = to_panel(&RectF::new(cell.x, cell.y, cell.width, cell.height));
        svg.push_str(&format!(
            r#"  <clipPath id="cell-{}"><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"/></clipPath>"#,
            slot, clip.x, clip.y, clip.width, clip.height
        ));
        svg.push('\n');
    }
    svg.push_str("</defs>\n");

    for (slot, cell) in layout.cells.iter().enumerate() {
        let placement = resolve_placement(cell, settings.fit_mode, settings.anchor);
        let clip = to_panel(&placement.clip);
        let image = to_panel(&placement.image);

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="image" clip-path="url(#cell-{})"/>"#,
            image.x, image.y, image.width, image.height, slot
        ));
        svg.push('\n');

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="cell"/>"#,
            clip.x, clip.y, clip.width, clip.height
        ));
        svg.push('\n');

        if placement.visible().is_some() {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="index" text-anchor="middle">{}</text>"#,
                clip.x + clip.width / 2.0,
                clip.y + clip.height / 2.0 + 4.0,
                cell.index
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// `fill` and `fill-opacity` attributes for the canvas background.
fn fill_attrs(color: CanvasColor) -> String {
    let [r, g, b, a] = color.to_rgba();
    if a == 0 {
        return String::from(r#"fill="none""#);
    }
    let mut attrs = format!(r##"fill="#{r:02x}{g:02x}{b:02x}""##);
    if a < 255 {
        attrs.push_str(&format!(r#" fill-opacity="{:.3}""#, a as f64 / 255.0));
    }
    attrs
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::Anchor;
    use crate::layout::compute_layout;
    use crate::settings::FitMode;

    fn three_up() -> (Layout, Settings) {
        let settings = Settings::width_col(600.0, 3).gap(0.0);
        let layout = compute_layout(&[(400u32, 300u32), (300, 400), (200, 200)], &settings).unwrap();
        (layout, settings)
    }

    #[test]
    fn empty_layout_is_one_pixel() {
        let svg = render_layout_svg(&Layout::empty(), &Settings::default());
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#
        );
    }

    #[test]
    fn document_shape() {
        let (layout, settings) = three_up();
        let svg = render_layout_svg(&layout, &settings);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<clipPath").count(), 3);
        assert_eq!(svg.matches(r#"class="cell""#).count(), 3);
        assert_eq!(svg.matches(r#"class="image""#).count(), 3);
    }

    #[test]
    fn caption_reports_pixel_size_and_modes() {
        let (layout, settings) = three_up();
        let settings = settings.fit_mode(FitMode::Portrait).anchor(Anchor::TopLeft);
        let svg = render_layout_svg(&layout, &settings);
        let (w, h) = layout.pixel_size();
        assert!(svg.contains(&format!("{w}×{h}")));
        assert!(svg.contains("3 cells"));
        assert!(svg.contains("portrait / top-left"));
    }

    #[test]
    fn background_fill() {
        let (layout, settings) = three_up();
        let svg = render_layout_svg(&layout, &settings.background(CanvasColor::rgb(255, 0, 0)));
        assert!(svg.contains(r##"fill="#ff0000""##));

        let svg = render_layout_svg(&layout, &settings.background(CanvasColor::Transparent));
        assert!(svg.contains(r#"class="canvas" fill="none""#));
    }

    #[test]
    fn translucent_background_has_opacity() {
        assert_eq!(
            fill_attrs(CanvasColor::from([0, 0, 0, 128])),
            r##"fill="#000000" fill-opacity="0.502""##
        );
    }

    #[test]
    fn panel_fits_max_size() {
        let settings = Settings::width_col(6000.0, 1).gap(0.0);
        let layout = compute_layout(&[(6000u32, 1000u32)], &settings).unwrap();
        let svg = render_layout_svg(&layout, &settings);
        let expected_w = (MAX_PANEL_W + 2.0 * MARGIN) as u32;
        assert!(svg.contains(&format!(r#"width="{expected_w}""#)), "{svg}");
    }

    #[test]
    fn escape_xml_specials() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
