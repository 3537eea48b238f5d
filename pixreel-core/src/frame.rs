//! Frame record layout
//!
//! A frame is one 8-byte record of the stream: byte `i` is row `i`, and
//! bit 7 of each byte is the leftmost column. Records are stored
//! back-to-back with no header or delimiter, so the record size is a
//! compile-time constant rather than something read from the data.

use pixreel_hal::MATRIX_ROWS;

/// Size of one frame record in bytes
pub const FRAME_SIZE: usize = MATRIX_ROWS;

/// Matrix width in pixels
pub const MATRIX_COLS: usize = 8;

/// One 8x8 monochrome bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    /// All pixels off
    pub const BLANK: Frame = Frame([0; FRAME_SIZE]);

    /// Pause glyph shown while paused
    ///
    /// Icons are pre-rotated 90 degrees clockwise to match the panel
    /// orientation. Keep the data as-is.
    pub const PAUSE_ICON: Frame = Frame([0x00, 0x66, 0x66, 0x00, 0x00, 0x66, 0x66, 0x00]);

    /// Replay glyph shown once the stream has finished (pre-rotated, see above)
    pub const REPLAY_ICON: Frame = Frame([0x3C, 0x42, 0x99, 0x99, 0x99, 0x81, 0x42, 0x3C]);

    /// Create a frame from its raw record
    pub const fn new(rows: [u8; FRAME_SIZE]) -> Self {
        Self(rows)
    }

    /// Raw row bytes, ready for a [`DisplaySink`](pixreel_hal::DisplaySink)
    pub const fn rows(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    /// Bitmap of a single row
    pub fn row(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Check whether the pixel at (`row`, `col`) is lit
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        if col >= MATRIX_COLS {
            return false;
        }
        match self.row(row) {
            Some(bits) => bits & (0x80 >> col) != 0,
            None => false,
        }
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.0.iter().map(|row| row.count_ones()).sum()
    }
}

impl From<[u8; FRAME_SIZE]> for Frame {
    fn from(rows: [u8; FRAME_SIZE]) -> Self {
        Self(rows)
    }
}
