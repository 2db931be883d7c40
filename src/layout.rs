//! Grid layout engine: page-invariant geometry plus the per-page random
//! assignment of pair variants to grid positions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SheetSettings;

/// Page-invariant geometry of one output sheet.
///
/// The canvas is partitioned into a `columns x (rows + header_rows)` block
/// of square cells of side `grid_len`, centered on the canvas. The top
/// `header_rows` rows form a reserved band holding the single answer cell;
/// the main `rows x columns` grid sits below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub header_rows: u32,
    pub grid_len: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl GridGeometry {
    /// Derive the cell size and centering offsets from the sheet constants.
    ///
    /// The cell side is the largest square fitting both the column budget
    /// and the row budget (header band included) after the boundary margin
    /// is subtracted on each side. Integer division throughout.
    pub fn derive(settings: &SheetSettings) -> Self {
        let total_rows = settings.rows + settings.header_rows;

        let grid_w = (settings.canvas_width - 2 * settings.boundary) / settings.columns;
        let grid_h = (settings.canvas_height - 2 * settings.boundary) / total_rows;
        let grid_len = grid_w.min(grid_h);

        let offset_x = (settings.canvas_width - grid_len * settings.columns) / 2;
        let offset_y = (settings.canvas_height - grid_len * total_rows) / 2;

        Self {
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            columns: settings.columns,
            rows: settings.rows,
            header_rows: settings.header_rows,
            grid_len,
            offset_x,
            offset_y,
        }
    }

    /// Number of cells in the main grid.
    pub fn slot_count(&self) -> usize {
        (self.rows * self.columns) as usize
    }

    /// Top-left pixel of a main-grid cell. Row 0 sits directly below the
    /// header band.
    pub fn cell_origin(&self, row: u32, col: u32) -> (i64, i64) {
        let x = self.offset_x + col * self.grid_len;
        let y = self.offset_y + (row + self.header_rows) * self.grid_len;
        (i64::from(x), i64::from(y))
    }

    /// Top-left pixel of the answer cell, at the head of the header band.
    pub fn answer_origin(&self) -> (i64, i64) {
        (i64::from(self.offset_x), i64::from(self.offset_y))
    }
}

/// Which of the two pair variants occupies each main-grid position,
/// row-major.
///
/// Built from the alternating sequence 0,1,0,1,... so the two variants stay
/// balanced (an odd slot count carries one extra 0), then shuffled with the
/// caller's generator. The answer cell gets no independent draw: it copies
/// whichever variant landed at the integer midpoint of the shuffled
/// sequence, so a single balanced layout determines both the grid and its
/// key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellAssignment {
    slots: Vec<usize>,
}

impl CellAssignment {
    pub fn shuffled<R: Rng>(slot_count: usize, rng: &mut R) -> Self {
        let mut slots: Vec<usize> = (0..slot_count).map(|k| k % 2).collect();
        slots.shuffle(rng);
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Variant index (0 or 1) for main-grid slot `slot`, row-major.
    pub fn variant_at(&self, slot: usize) -> usize {
        self.slots[slot]
    }

    /// Variant shown in the answer cell: the element at the integer
    /// midpoint of the shuffled sequence.
    pub fn answer_variant(&self) -> usize {
        self.slots[self.slots.len() / 2]
    }
}
