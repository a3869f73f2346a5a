//! PNG rasterization.
//!
//! Hexagons are filled with a crossing-number point-in-polygon test
//! over each cell's bounding box, encoded as PNG, and returned as a
//! base64 data URI.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};

use eyemap_color::Color;
use eyemap_geometry::PixelPoint;

use crate::renderer::HexCell;
use crate::transform::Layout;
use crate::RenderError;

/// Rasterize a placed layout and return a `data:image/png;base64,…` URI.
pub(crate) fn render_png(layout: &Layout<'_>, cells: &[HexCell]) -> Result<String, RenderError> {
    let width = layout.width.ceil().max(1.0) as u32;
    let height = layout.height.ceil().max(1.0) as u32;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    for (placed, cell) in layout.placed.iter().zip(cells) {
        fill_polygon(&mut img, &placed.vertices, cell.fill);
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}

fn fill_polygon(img: &mut RgbaImage, vertices: &[PixelPoint; 6], color: Color) {
    let pixel = Rgba([color.r, color.g, color.b, 255]);

    let min_x = vertices.iter().map(|v| v.x).fold(f64::INFINITY, f64::min);
    let max_x = vertices.iter().map(|v| v.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil() as u32).min(img.width().saturating_sub(1));
    let y1 = (max_y.ceil() as u32).min(img.height().saturating_sub(1));

    for py in y0..=y1 {
        for px in x0..=x1 {
            // Sample at the pixel center.
            let p = PixelPoint {
                x: f64::from(px) + 0.5,
                y: f64::from(py) + 0.5,
            };
            if point_in_polygon(p, vertices) {
                img.put_pixel(px, py, pixel);
            }
        }
    }
}

/// Crossing-number test.
fn point_in_polygon(p: PixelPoint, vertices: &[PixelPoint; 6]) -> bool {
    let mut inside = false;
    let n = vertices.len();
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y)
            && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyemap_geometry::hexagon_vertices;

    #[test]
    fn center_is_inside_hexagon() {
        let center = PixelPoint { x: 20.0, y: 20.0 };
        let vertices = hexagon_vertices(center, 10.0);
        assert!(point_in_polygon(center, &vertices));
    }

    #[test]
    fn far_point_is_outside_hexagon() {
        let vertices = hexagon_vertices(PixelPoint { x: 20.0, y: 20.0 }, 10.0);
        assert!(!point_in_polygon(PixelPoint { x: 100.0, y: 100.0 }, &vertices));
        // Just beyond a flat edge: the inradius is ~8.66 for size 10.
        assert!(!point_in_polygon(PixelPoint { x: 20.0, y: 30.5 }, &vertices));
    }

    #[test]
    fn vertex_region_is_inside() {
        let center = PixelPoint { x: 20.0, y: 20.0 };
        let vertices = hexagon_vertices(center, 10.0);
        // Slightly inside the eastern vertex.
        assert!(point_in_polygon(PixelPoint { x: 28.0, y: 20.0 }, &vertices));
    }
}
