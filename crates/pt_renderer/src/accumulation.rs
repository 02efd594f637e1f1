//! Per-pixel running radiance average.

use pt_core::Color;

/// Running mean of the samples merged into one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleCell {
    pub color: Color,
    pub count: u32,
}

impl SampleCell {
    /// Fold one sample into the running mean:
    /// `mean += (sample - mean) / (n + 1)`.
    ///
    /// Non-finite samples are merged as black so a single bad path cannot
    /// poison the pixel for the rest of the session.
    #[inline]
    pub fn merge(&mut self, sample: Color) {
        let sample = if sample.is_finite() { sample } else { Color::ZERO };
        self.count += 1;
        self.color += (sample - self.color) / self.count as f32;
    }
}

/// Width x height grid of sample cells, row-major with row 0 at the top.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    width: u32,
    height: u32,
    cells: Vec<SampleCell>,
    passes: u32,
}

impl SampleBuffer {
    /// Create a new buffer with no samples.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![SampleCell::default(); (width * height) as usize],
            passes: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of full passes merged since creation or the last reset.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Discard all samples (for example after the scene changed).
    pub fn reset(&mut self) {
        self.cells.fill(SampleCell::default());
        self.passes = 0;
    }

    /// Get the cell at (x, y).
    pub fn get(&self, x: u32, y: u32) -> SampleCell {
        self.cells[(y * self.width + x) as usize]
    }

    /// Current mean radiance at (x, y).
    pub fn color(&self, x: u32, y: u32) -> Color {
        self.get(x, y).color
    }

    /// Merge a sample into the cell at (x, y).
    pub fn merge(&mut self, x: u32, y: u32, sample: Color) {
        self.cells[(y * self.width + x) as usize].merge(sample);
    }

    pub fn cells(&self) -> &[SampleCell] {
        &self.cells
    }

    /// Mutable cells for a render pass. Split by row to hand disjoint
    /// pixel ranges to worker threads.
    pub fn cells_mut(&mut self) -> &mut [SampleCell] {
        &mut self.cells
    }

    /// Record that every cell received one more sample.
    pub fn finish_pass(&mut self) {
        self.passes += 1;
    }
}
