use rayon::prelude::*;

use crate::eval::evaluator::evaluate_object_with_scratch;
use crate::foundation::error::{SdfError, SdfResult};
use crate::foundation::math::Vec2;
use crate::scene::model::Scene;

/// Tightly packed row-major RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

/// Output size and sampling mode for [`rasterize_object`].
#[derive(Clone, Copy, Debug)]
pub struct RasterSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Sample once per horizontal subpixel for RGB stripe displays.
    ///
    /// This forces the scene scale to `(3, 1)` to compensate for the triple
    /// horizontal sampling rate.
    pub lcd: bool,
}

/// Rasterize one object of a scene to white-on-black coverage.
///
/// Distance maps to coverage over a one-pixel band centered on the surface
/// (`+0.5` outside to `-0.5` inside). Rows are rendered in parallel; each
/// row reuses one evaluation scratch buffer.
#[tracing::instrument(skip(scene))]
pub fn rasterize_object(
    scene: &Scene,
    object_index: usize,
    settings: RasterSettings,
) -> SdfResult<FrameRgba> {
    if settings.width == 0 || settings.height == 0 {
        return Err(SdfError::validation("raster size must be nonzero"));
    }
    let Some(object) = scene.objects.get(object_index) else {
        return Err(SdfError::validation(format!(
            "object index {object_index} out of range ({} objects)",
            scene.objects.len()
        )));
    };

    let mut scene = scene.clone();
    if settings.lcd {
        scene.scale = Vec2::new(3.0, 1.0);
    }
    let scene = &scene;

    let width = settings.width as usize;
    let row_bytes = width * 4;
    let mut data = vec![0u8; row_bytes * settings.height as usize];

    data.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let mut scratch = Vec::new();
            let py = y as f32 + 0.5;
            for (x, pixel) in row.chunks_mut(4).enumerate() {
                if settings.lcd {
                    for ch in 0..3 {
                        let px = (x * 3 + ch) as f32 + 0.5;
                        let d = evaluate_object_with_scratch(
                            scene,
                            object,
                            Vec2::new(px, py),
                            &mut scratch,
                        );
                        pixel[ch] = coverage(d);
                    }
                } else {
                    let d = evaluate_object_with_scratch(
                        scene,
                        object,
                        Vec2::new(x as f32 + 0.5, py),
                        &mut scratch,
                    );
                    let c = coverage(d);
                    pixel[0] = c;
                    pixel[1] = c;
                    pixel[2] = c;
                }
                pixel[3] = 0xff;
            }
        });

    Ok(FrameRgba {
        width: settings.width,
        height: settings.height,
        data,
    })
}

fn coverage(distance: f32) -> u8 {
    let alpha = (0.5 - distance).clamp(0.0, 1.0);
    (alpha * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
