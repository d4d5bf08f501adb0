/// Square grid of encoder modules (`true` = dark), packed one bit per module.
///
/// The grid is produced by an external encoder and is never mutated by the
/// render pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    side: usize,
    data: Vec<u8>,
}

impl ModuleMatrix {
    /// Create an all-light matrix with the given side length
    pub fn new(side: usize) -> Self {
        let bytes_needed = (side * side).div_ceil(8);
        Self {
            side,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix from row-major boolean rows.
    ///
    /// Returns `None` if the rows do not form a square.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Self> {
        let side = rows.len();
        if rows.iter().any(|r| r.as_ref().len() != side) {
            return None;
        }
        let mut matrix = Self::new(side);
        for (y, row) in rows.iter().enumerate() {
            for (x, &dark) in row.as_ref().iter().enumerate() {
                matrix.set(x, y, dark);
            }
        }
        Some(matrix)
    }

    /// Side length in modules
    pub fn side(&self) -> usize {
        self.side
    }

    /// Get module at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.side || y >= self.side {
            return false;
        }
        let index = y * self.side + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.side || y >= self.side {
            return;
        }
        let index = y * self.side + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate over dark module coordinates in row-major order
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.side).flat_map(move |y| {
            (0..self.side).filter_map(move |x| self.get(x, y).then_some((x, y)))
        })
    }
}
