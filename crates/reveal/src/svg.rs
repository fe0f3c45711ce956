//! SVG output for coverings and sessions.
//!
//! The core doesn't render anything itself; this just writes the tiles in
//! a form any SVG-capable host (webview, resvg, a browser) can draw on top
//! of the image.

use std::fmt::Write;

use crate::covering::Covering;
use crate::geometry::{Polygon, Rect};
use crate::session::RevealSession;

/// How tiles are painted.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    /// Fill used when no per-tile fill is given.
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            fill: "#000000".into(),
            stroke: Some("#ffffff".into()),
            stroke_width: 0.5,
        }
    }
}

/// `d` attribute for a polygon: `M x,y L x,y ... Z`.
pub fn path_data(polygon: &Polygon) -> String {
    let mut d = String::with_capacity(polygon.len() * 16);
    for (i, p) in polygon.points().iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        // Writing into a String can't fail.
        let _ = write!(d, "{cmd}{:.3},{:.3}", p.x, p.y);
    }
    d.push_str(" Z");
    d
}

/// Render the given `(index, polygon)` pairs as one SVG document.
///
/// `fill_for` picks a fill per tile index; return `None` for the style's
/// default fill.
pub fn tiles_to_svg<'a, I, F>(bounds: Rect, tiles: I, style: &SvgStyle, fill_for: F) -> String
where
    I: IntoIterator<Item = (usize, &'a Polygon)>,
    F: Fn(usize) -> Option<String>,
{
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
        x = bounds.x,
        y = bounds.y,
        w = bounds.width,
        h = bounds.height,
    );

    let stroke = match &style.stroke {
        Some(color) => format!(r#" stroke="{color}" stroke-width="{}""#, style.stroke_width),
        None => String::new(),
    };
    let _ = writeln!(svg, r#"<g fill="{}"{stroke}>"#, style.fill);

    for (index, polygon) in tiles {
        let fill = fill_for(index)
            .map(|f| format!(r#" fill="{f}""#))
            .unwrap_or_default();
        let _ = writeln!(
            svg,
            r#"  <path data-tile="{index}"{fill} d="{}"/>"#,
            path_data(polygon)
        );
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Every tile of a covering.
pub fn covering_to_svg(covering: &Covering, style: &SvgStyle) -> String {
    tiles_to_svg(covering.bounds(), covering.polygons().iter().enumerate(), style, |_| None)
}

/// Only the tiles that still hide the image.
pub fn session_to_svg<F>(session: &RevealSession, style: &SvgStyle, fill_for: F) -> String
where
    F: Fn(usize) -> Option<String>,
{
    let visible = session
        .tiles()
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.visible)
        .map(|(i, tile)| (i, &tile.polygon));
    tiles_to_svg(session.bounds(), visible, style, fill_for)
}
