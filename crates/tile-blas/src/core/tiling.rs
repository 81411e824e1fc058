/// Tile geometry of an `m x n` matrix partitioned into `mb x nb` tiles.
///
/// Tile extents are derived from the global dimensions and the tile index;
/// only the last tile row and the last tile column may be smaller than the
/// nominal tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileLayout {
    /// Number of rows of the matrix.
    pub m: usize,
    /// Number of columns of the matrix.
    pub n: usize,
    /// Nominal tile rows.
    pub mb: usize,
    /// Nominal tile columns.
    pub nb: usize,
}

impl TileLayout {
    /// Create a layout. Tile sizes must be non-zero.
    pub const fn new(m: usize, n: usize, mb: usize, nb: usize) -> Self {
        Self { m, n, mb, nb }
    }

    /// Square tiles of size `nb`.
    pub const fn square(m: usize, n: usize, nb: usize) -> Self {
        Self::new(m, n, nb, nb)
    }

    /// Validate that the layout is usable.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.mb == 0 || self.nb == 0 {
            return Err("mb and nb must be non-zero");
        }
        Ok(())
    }

    /// Number of tile rows.
    #[inline]
    pub fn mt(&self) -> usize {
        self.m.div_ceil(self.mb)
    }

    /// Number of tile columns.
    #[inline]
    pub fn nt(&self) -> usize {
        self.n.div_ceil(self.nb)
    }

    /// Rows of tile row `i`, accounting for the boundary tile.
    ///
    /// Returns 0 for indices past the last tile.
    #[inline]
    pub fn tile_mdim(&self, i: usize) -> usize {
        extent(self.m, self.mb, i)
    }

    /// Columns of tile column `j`, accounting for the boundary tile.
    ///
    /// Returns 0 for indices past the last tile.
    #[inline]
    pub fn tile_ndim(&self, j: usize) -> usize {
        extent(self.n, self.nb, j)
    }

    /// Iterate `(row_offset, rows)` over the tile rows.
    pub fn row_blocks(&self) -> BlockIterator {
        BlockIterator::new(self.m, self.mb)
    }

    /// Iterate `(col_offset, cols)` over the tile columns.
    pub fn col_blocks(&self) -> BlockIterator {
        BlockIterator::new(self.n, self.nb)
    }
}

#[inline]
fn extent(total: usize, block: usize, index: usize) -> usize {
    let start = index.saturating_mul(block);
    if start >= total {
        0
    } else {
        (total - start).min(block)
    }
}

/// Iterator over blocks of one matrix dimension.
pub struct BlockIterator {
    total: usize,
    block_size: usize,
    current: usize,
}

impl BlockIterator {
    pub fn new(total: usize, block_size: usize) -> Self {
        Self {
            total,
            block_size,
            current: 0,
        }
    }
}

impl Iterator for BlockIterator {
    /// (start, length) of each block
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.total || self.block_size == 0 {
            return None;
        }

        let start = self.current;
        let len = (self.total - start).min(self.block_size);
        self.current += len;

        Some((start, len))
    }
}
