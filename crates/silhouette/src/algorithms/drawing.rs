use image::{GrayImage, Luma};
use imageproc::{
    drawing::{draw_antialiased_line_segment_mut, draw_line_segment_mut, draw_polygon_mut},
    pixelops::interpolate,
    point::Point,
};

pub const FOREGROUND: Luma<u8> = Luma([255u8]);

/// Draw a contour as a closed antialiased outline.
///
/// Thickness `t` stamps the polyline at every integer offset in
/// `[-(t-1)/2, t/2]` along both axes.
pub fn draw_contour_outline(mask: &mut GrayImage, contour: &[Point<i32>], thickness: u32) {
    let thickness = thickness.max(1) as i32;
    let lo = -(thickness - 1) / 2;
    let hi = thickness / 2;

    for dy in lo..=hi {
        for dx in lo..=hi {
            draw_closed_polyline(mask, contour, dx, dy);
        }
    }
}

fn draw_closed_polyline(mask: &mut GrayImage, contour: &[Point<i32>], dx: i32, dy: i32) {
    match contour {
        [] => {}
        [p] => put_foreground(mask, p.x + dx, p.y + dy),
        _ => {
            for (a, b) in contour.iter().zip(contour.iter().cycle().skip(1)) {
                draw_antialiased_line_segment_mut(
                    mask,
                    (a.x + dx, a.y + dy),
                    (b.x + dx, b.y + dy),
                    FOREGROUND,
                    interpolate,
                );
            }
        }
    }
}

/// Fill the region enclosed by a contour, boundary included.
pub fn fill_contour(mask: &mut GrayImage, contour: &[Point<i32>]) {
    let Some(first) = contour.first() else {
        return;
    };

    // draw_polygon_mut rejects polygons that repeat their first point at the end.
    let mut end = contour.len();
    while end > 1 && contour[end - 1] == *first {
        end -= 1;
    }
    let polygon = &contour[..end];

    match polygon {
        [p] => put_foreground(mask, p.x, p.y),
        [_, _] => {}
        _ => draw_polygon_mut(mask, polygon, FOREGROUND),
    }

    for (a, b) in polygon.iter().zip(polygon.iter().cycle().skip(1)) {
        draw_line_segment_mut(
            mask,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            FOREGROUND,
        );
    }
}

fn put_foreground(mask: &mut GrayImage, x: i32, y: i32) {
    if x >= 0 && y >= 0 && (x as u32) < mask.width() && (y as u32) < mask.height() {
        mask.put_pixel(x as u32, y as u32, FOREGROUND);
    }
}
