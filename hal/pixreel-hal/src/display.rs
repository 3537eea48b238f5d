//! Matrix display abstraction
//!
//! The engine hands the display one byte per row. How those bytes reach the
//! hardware (SPI, bit-banging, a simulator) is up to the implementation.

/// Number of rows on the matrix (one byte per row)
pub const MATRIX_ROWS: usize = 8;

/// Monochrome 8x8 matrix sink
///
/// Rows are staged with [`set_row`](DisplaySink::set_row) and only become
/// visible after [`commit`](DisplaySink::commit). Bit 7 of a row byte is the
/// leftmost column.
pub trait DisplaySink {
    /// Error type for latching the buffer
    type Error;

    /// Stage the bitmap for one row
    ///
    /// Indices outside `0..MATRIX_ROWS` are ignored.
    fn set_row(&mut self, index: usize, bits: u8);

    /// Latch the staged rows onto the display
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Stage and latch a complete row buffer
    fn show(&mut self, rows: &[u8; MATRIX_ROWS]) -> Result<(), Self::Error> {
        for (index, &bits) in rows.iter().enumerate() {
            self.set_row(index, bits);
        }
        self.commit()
    }

    /// Turn every pixel off
    fn blank(&mut self) -> Result<(), Self::Error> {
        self.show(&[0; MATRIX_ROWS])
    }
}
