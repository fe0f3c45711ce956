//! `reveal render` - paint the covering over a real image.
//!
//! The tiles are written as SVG, parsed by usvg and drawn by resvg straight
//! onto the image's pixels, so the output looks like the game screen.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, RgbaImage};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiny_skia::{IntSize, Pixmap};

use reveal::svg::{SvgStyle, session_to_svg};
use reveal::{RevealSession, Settings};

use super::common::TileArgs;

pub fn cmd_render(
    settings: &Settings,
    image_path: &Path,
    tiles: &TileArgs,
    uncover: usize,
    output: &Path,
) -> Result<()> {
    let img = image::open(image_path)
        .with_context(|| format!("Failed to open image {}", image_path.display()))?;
    let (width, height) = (img.width(), img.height());
    debug!("{}: {width}x{height}", image_path.display());

    let covering = tiles
        .request(settings, width as f64, height as f64)?
        .generate()
        .context("Failed to generate covering")?;
    let seed = covering.seed();

    let mut session = RevealSession::from_covering(covering);
    for _ in 0..uncover {
        if session.uncover_next().is_nothing() {
            break;
        }
    }
    info!(
        "{} of {} tiles still covering (seed {seed})",
        session.visible_count(),
        session.len()
    );

    let colors = tile_colors(session.len(), seed);
    let svg = session_to_svg(&session, &SvgStyle::default(), |i| colors.get(i).cloned());

    let painted = paint_over(&img, &svg)?;
    painted
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    eprintln!("Wrote: {} ({width}x{height})", output.display());
    Ok(())
}

/// One muted colour per tile, reproducible from the covering seed.
fn tile_colors(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let r: u8 = rng.random_range(40..220);
            let g: u8 = rng.random_range(40..220);
            let b: u8 = rng.random_range(40..220);
            format!("#{r:02x}{g:02x}{b:02x}")
        })
        .collect()
}

/// Draw `svg` on top of `img`. The SVG's viewBox must match the image size.
fn paint_over(img: &DynamicImage, svg: &str) -> Result<RgbaImage> {
    let (width, height) = (img.width(), img.height());

    // Opaque pixels are already "premultiplied", which is what tiny-skia wants.
    let rgba = DynamicImage::ImageRgb8(img.to_rgb8()).to_rgba8();
    let size = IntSize::from_wh(width, height).ok_or_else(|| anyhow!("Image has no pixels"))?;
    let mut pixmap = Pixmap::from_vec(rgba.into_raw(), size)
        .ok_or_else(|| anyhow!("Could not create a {width}x{height} canvas"))?;

    let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).context("Generated SVG did not parse")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    RgbaImage::from_raw(width, height, pixmap.take()).ok_or_else(|| anyhow!("Canvas size changed while drawing"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal::{CoveringType, generate};

    #[test]
    fn colors_are_reproducible() {
        assert_eq!(tile_colors(5, 8), tile_colors(5, 8));
        assert_eq!(tile_colors(5, 8).len(), 5);
        assert!(tile_colors(1, 8)[0].starts_with('#'));
    }

    #[test]
    fn covered_pixels_change_uncovered_do_not() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(40, 20, image::Rgb([255, 255, 255])));
        let covering = generate(40.0, 20.0, 2, CoveringType::Rectangles, Some(1)).unwrap();
        let mut session = RevealSession::from_covering(covering);
        session.uncover_next();

        let svg = session_to_svg(
            &session,
            &SvgStyle { stroke: None, ..SvgStyle::default() },
            |_| None,
        );
        let painted = paint_over(&img, &svg).unwrap();

        let hidden = session.tiles().iter().position(|t| !t.visible).unwrap();
        let centre = session.tiles()[hidden].polygon.centroid();
        let px = painted.get_pixel(centre.x as u32, centre.y as u32);
        assert_eq!(px.0, [255, 255, 255, 255]);

        let shown = 1 - hidden;
        let centre = session.tiles()[shown].polygon.centroid();
        let px = painted.get_pixel(centre.x as u32, centre.y as u32);
        assert_eq!(px.0, [0, 0, 0, 255]);
    }
}
