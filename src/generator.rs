use std::fs;
use std::path::Path;

use image::DynamicImage;
use rand::Rng;
use tracing::{info, warn};

use crate::cell::BinaryCell;
use crate::compose::PageComposer;
use crate::config::Config;
use crate::discovery::discover_images;
use crate::error::GenerateError;
use crate::layout::{CellAssignment, GridGeometry};
use crate::pairing::PairQueue;

/// Outcome of one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_written: usize,
    pub pairs_skipped: usize,
}

/// Single-pass batch driver: one output page per consumed image pair.
pub struct SheetGenerator {
    config: Config,
    geometry: GridGeometry,
}

impl SheetGenerator {
    pub fn new(config: Config) -> Self {
        let geometry = GridGeometry::derive(&config.sheet);
        Self { config, geometry }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Generate pages for the first half of the shuffled pair queue.
    ///
    /// A pair whose image fails to decode is consumed and skipped, and
    /// output numbering stays gapless. Write failures abort the run.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<RunSummary, GenerateError> {
        let images = discover_images(&self.config.input_dir)?;
        if images.len() < 2 {
            return Err(GenerateError::NotEnoughImages {
                path: self.config.input_dir.clone(),
                found: images.len(),
                required: 2,
            });
        }
        info!(
            "Found {} input images in {:?}",
            images.len(),
            self.config.input_dir
        );

        let queue = PairQueue::build(images.len(), rng);
        let out_cnt = queue.planned_output_count();
        info!(
            "Enumerated {} pairs, generating {} pages (cell side {}px)",
            queue.len(),
            out_cnt,
            self.geometry.grid_len
        );

        ensure_output_dir(&self.config.output_dir)?;

        let composer = PageComposer::new(self.geometry);
        let threshold = self.config.sheet.threshold;
        let mut summary = RunSummary::default();

        for pair in queue.iter().take(out_cnt) {
            let first = &images[pair.first];
            let second = &images[pair.second];

            let loaded = load_image(first).and_then(|a| load_image(second).map(|b| (a, b)));
            let (img0, img1) = match loaded {
                Ok(sources) => sources,
                Err(err) if err.is_recoverable() => {
                    warn!("Skipping pair ({:?}, {:?}): {}", first, second, err);
                    summary.pairs_skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let cells = [
                BinaryCell::normalize(&img0, self.geometry.grid_len, threshold),
                BinaryCell::normalize(&img1, self.geometry.grid_len, threshold),
            ];

            let assignment = CellAssignment::shuffled(self.geometry.slot_count(), rng);
            info!(
                "Page {}: pair ({}, {}), answer cell shows variant {}",
                summary.pages_written,
                pair.first,
                pair.second,
                assignment.answer_variant()
            );

            let canvas = composer.compose(&assignment, &cells);
            composer.write_page(canvas, &self.config.output_dir, summary.pages_written)?;
            summary.pages_written += 1;
        }

        info!(
            "Batch completed: {} pages written, {} pairs skipped",
            summary.pages_written, summary.pairs_skipped
        );
        Ok(summary)
    }
}

fn ensure_output_dir(dir: &Path) -> Result<(), GenerateError> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir(dir).map_err(|source| GenerateError::OutputDirCreate {
        path: dir.to_path_buf(),
        source,
    })
}

fn load_image(path: &Path) -> Result<DynamicImage, GenerateError> {
    image::open(path).map_err(|source| GenerateError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}
