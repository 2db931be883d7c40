use image::{imageops, DynamicImage, GrayImage, Luma};
use imageproc::contrast::{threshold, ThresholdType};
use tracing::debug;

/// A normalized silhouette cell: square, single channel, 1-pixel black
/// border, interior strictly black or white.
#[derive(Clone, Debug)]
pub struct BinaryCell {
    image: GrayImage,
}

impl BinaryCell {
    /// Binarize `source` and fit it into a bordered `grid_len x grid_len`
    /// cell.
    ///
    /// The whole binarized frame is resized, not the tight crop, so the
    /// silhouette keeps its in-frame scale; the crop bounds are logged for
    /// diagnostics only. Nearest-neighbor sampling keeps the rescaled
    /// interior strictly two-valued.
    pub fn normalize(source: &DynamicImage, grid_len: u32, cutoff: u8) -> Self {
        let gray = source.to_luma8();
        let mask = threshold(&gray, cutoff, ThresholdType::Binary);

        if let Some((x, y, w, h)) = foreground_bounds(&mask) {
            debug!("Foreground bounds: {}x{} at ({}, {})", w, h, x, y);
        } else {
            debug!("Binarized image has no foreground pixels");
        }

        let inner = grid_len.saturating_sub(2);
        let resized = imageops::resize(&mask, inner, inner, imageops::FilterType::Nearest);

        let mut cell = GrayImage::from_pixel(grid_len, grid_len, Luma([0u8]));
        imageops::replace(&mut cell, &resized, 1, 1);

        Self { image: cell }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn side(&self) -> u32 {
        self.image.width()
    }
}

/// Tight bounding rectangle `(x, y, width, height)` of the non-zero pixels
/// of `mask`, or `None` when the mask is entirely black.
pub fn foreground_bounds(mask: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel[0] != 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
