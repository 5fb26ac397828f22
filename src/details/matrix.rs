//! Row-major word matrix that keeps the bit-parallel state of every processed
//! element so an alignment can be recovered afterwards.

use num_traits::PrimInt;

/// Owned `rows x cols` buffer of machine words.
#[derive(Debug, Clone, Default)]
pub(crate) struct BitMatrix<T> {
    rows: usize,
    cols: usize,
    matrix: Vec<T>,
}

impl<T: PrimInt> BitMatrix<T> {
    /// Creates a matrix with every word set to `val`.
    pub fn new(rows: usize, cols: usize, val: T) -> Self {
        Self {
            rows,
            cols,
            matrix: vec![val; rows * cols],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols);
        self.matrix[row * self.cols + col]
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.matrix[row * self.cols + col]
    }

    /// Tests bit `col` of `row`, counting bits across the words of the row.
    #[inline]
    pub fn test_bit(&self, row: usize, col: usize) -> bool {
        let word_bits = T::zero().count_zeros() as usize;
        let word = self.get(row, col / word_bits);
        (word >> (col % word_bits)) & T::one() == T::one()
    }
}
