use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, GrayImage, Luma};
use tracing::debug;

use crate::cell::BinaryCell;
use crate::error::GenerateError;
use crate::layout::{CellAssignment, GridGeometry};

/// Paints normalized cells onto a white canvas and writes finished pages.
pub struct PageComposer {
    geometry: GridGeometry,
}

impl PageComposer {
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// Render one page: the answer cell in the header band, then the main
    /// grid row-major below it. The canvas is allocated fresh per page.
    pub fn compose(&self, assignment: &CellAssignment, cells: &[BinaryCell; 2]) -> GrayImage {
        let geometry = &self.geometry;
        let mut canvas = GrayImage::from_pixel(
            geometry.canvas_width,
            geometry.canvas_height,
            Luma([255u8]),
        );

        let (ax, ay) = geometry.answer_origin();
        imageops::replace(&mut canvas, cells[assignment.answer_variant()].image(), ax, ay);

        for row in 0..geometry.rows {
            for col in 0..geometry.columns {
                let slot = (row * geometry.columns + col) as usize;
                let (x, y) = geometry.cell_origin(row, col);
                imageops::replace(&mut canvas, cells[assignment.variant_at(slot)].image(), x, y);
            }
        }

        canvas
    }

    /// Encode `canvas` as a grayscale JPEG named `<page_index>.jpg` inside
    /// `out_dir`, overwriting any existing file of that name.
    pub fn write_page(
        &self,
        canvas: GrayImage,
        out_dir: &Path,
        page_index: usize,
    ) -> Result<PathBuf, GenerateError> {
        let path = out_dir.join(format!("{}.jpg", page_index));
        DynamicImage::ImageLuma8(canvas)
            .save(&path)
            .map_err(|source| GenerateError::PageWrite {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote page {:?}", path);
        Ok(path)
    }
}
