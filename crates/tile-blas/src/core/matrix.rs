//! Tile-major matrix storage.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::tiling::TileLayout;
use crate::error::{Result, TileError};
use crate::types::Scalar;

static NEXT_MATRIX_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a tiled matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixId(u64);

impl MatrixId {
    fn next() -> Self {
        MatrixId(NEXT_MATRIX_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one tile: the unit of dependency tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    /// Owning matrix.
    pub matrix: MatrixId,
    /// Tile row index.
    pub row: usize,
    /// Tile column index.
    pub col: usize,
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.matrix, self.row, self.col)
    }
}

struct TileStore<T> {
    layout: TileLayout,
    // Column-major grid of tiles; tile (i, j) lives at i + j * mt.
    tiles: Vec<RwLock<Vec<T>>>,
}

impl<T> TileStore<T> {
    fn slot(&self, row: usize, col: usize) -> Option<&RwLock<Vec<T>>> {
        let mt = self.layout.mt();
        if row >= mt || col >= self.layout.nt() {
            return None;
        }
        self.tiles.get(row + col * mt)
    }
}

/// A matrix stored as a grid of individually addressable tiles.
///
/// Every tile is a contiguous column-major buffer whose leading dimension is
/// the tile's own row count. Cloning shares the storage, which is how tile
/// tasks keep their operands alive until they run.
pub struct TiledMatrix<T> {
    id: MatrixId,
    store: Arc<TileStore<T>>,
}

impl<T> Clone for TiledMatrix<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            store: Arc::clone(&self.store),
        }
    }
}

impl<T> fmt::Debug for TiledMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiledMatrix")
            .field("id", &self.id)
            .field("layout", &self.store.layout)
            .finish()
    }
}

impl<T: Scalar> TiledMatrix<T> {
    /// Allocate a zero-filled tiled matrix.
    pub fn zeros(layout: TileLayout) -> Result<Self> {
        Self::from_fn(layout, |_, _| T::zero())
    }

    /// Build a tiled matrix from an element function `f(row, col)`.
    pub fn from_fn(layout: TileLayout, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        layout.validate().map_err(|e| TileError::Config(e.to_string()))?;

        let (mt, nt) = (layout.mt(), layout.nt());
        let mut tiles = Vec::with_capacity(mt * nt);
        for (col0, cols) in layout.col_blocks() {
            for (row0, rows) in layout.row_blocks() {
                let mut tile = Vec::with_capacity(rows * cols);
                for j in 0..cols {
                    for i in 0..rows {
                        tile.push(f(row0 + i, col0 + j));
                    }
                }
                tiles.push(RwLock::new(tile));
            }
        }

        Ok(Self {
            id: MatrixId::next(),
            store: Arc::new(TileStore { layout, tiles }),
        })
    }

    /// Translate column-major data with leading dimension `ld` into tiles.
    pub fn from_col_major(data: &[T], ld: usize, layout: TileLayout) -> Result<Self> {
        check_col_major(data.len(), ld, layout.m, layout.n)?;
        Self::from_fn(layout, |i, j| data[i + j * ld])
    }

    /// Translate the tiles back into a dense column-major buffer (`ld = m`).
    pub fn to_col_major(&self) -> Result<Vec<T>> {
        let layout = self.layout();
        let mut out = vec![T::zero(); layout.m * layout.n];
        self.copy_to_col_major(&mut out, layout.m.max(1))?;
        Ok(out)
    }

    /// Copy the tiles into caller-provided column-major storage.
    pub fn copy_to_col_major(&self, out: &mut [T], ld: usize) -> Result<()> {
        let layout = self.layout();
        check_col_major(out.len(), ld, layout.m, layout.n)?;

        for (tj, (col0, cols)) in layout.col_blocks().enumerate() {
            for (ti, (row0, rows)) in layout.row_blocks().enumerate() {
                let tile = self.tile(ti, tj);
                let data = tile.read()?;
                for j in 0..cols {
                    let dst = row0 + (col0 + j) * ld;
                    out[dst..dst + rows].copy_from_slice(&data[j * rows..(j + 1) * rows]);
                }
            }
        }
        Ok(())
    }

    /// Read element `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        let layout = self.layout();
        let (ti, tj) = (i / layout.mb, j / layout.nb);
        if i >= layout.m || j >= layout.n {
            return Err(TileError::TileOutOfRange {
                row: ti,
                col: tj,
                mt: layout.mt(),
                nt: layout.nt(),
            });
        }
        let tile = self.tile(ti, tj);
        let data = tile.read()?;
        let ld = layout.tile_mdim(ti);
        Ok(data[(i % layout.mb) + (j % layout.nb) * ld])
    }
}

impl<T> TiledMatrix<T> {
    /// Identity of this matrix.
    pub fn id(&self) -> MatrixId {
        self.id
    }

    /// Tile geometry.
    pub fn layout(&self) -> TileLayout {
        self.store.layout
    }

    /// Number of rows.
    pub fn m(&self) -> usize {
        self.store.layout.m
    }

    /// Number of columns.
    pub fn n(&self) -> usize {
        self.store.layout.n
    }

    /// Number of tile rows.
    pub fn mt(&self) -> usize {
        self.store.layout.mt()
    }

    /// Number of tile columns.
    pub fn nt(&self) -> usize {
        self.store.layout.nt()
    }

    /// Rows of tile row `i`.
    pub fn tile_mdim(&self, i: usize) -> usize {
        self.store.layout.tile_mdim(i)
    }

    /// Columns of tile column `j`.
    pub fn tile_ndim(&self, j: usize) -> usize {
        self.store.layout.tile_ndim(j)
    }

    /// Handle to tile `(i, j)`.
    ///
    /// The handle may name a tile outside the grid; it is only checked when
    /// dereferenced.
    pub fn tile(&self, i: usize, j: usize) -> Tile<T> {
        Tile {
            id: TileId {
                matrix: self.id,
                row: i,
                col: j,
            },
            store: Arc::clone(&self.store),
        }
    }
}

fn check_col_major(len: usize, ld: usize, m: usize, n: usize) -> Result<()> {
    if ld < m.max(1) {
        return Err(TileError::DimensionMismatch(format!(
            "leading dimension {} is smaller than max(1, {})",
            ld, m
        )));
    }
    let needed = if m == 0 || n == 0 { 0 } else { ld * (n - 1) + m };
    if len < needed {
        return Err(TileError::DimensionMismatch(format!(
            "expected at least {} elements, got {}",
            needed, len
        )));
    }
    Ok(())
}

/// Handle to one tile of a [`TiledMatrix`].
///
/// Two handles compare equal when they name the same tile.
pub struct Tile<T> {
    id: TileId,
    store: Arc<TileStore<T>>,
}

impl<T> Tile<T> {
    /// Identity of the tile.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Rows of the tile (zero outside the grid).
    pub fn rows(&self) -> usize {
        self.store.layout.tile_mdim(self.id.row)
    }

    /// Columns of the tile (zero outside the grid).
    pub fn cols(&self) -> usize {
        self.store.layout.tile_ndim(self.id.col)
    }

    fn slot(&self) -> Result<&RwLock<Vec<T>>> {
        self.store
            .slot(self.id.row, self.id.col)
            .ok_or(TileError::TileOutOfRange {
                row: self.id.row,
                col: self.id.col,
                mt: self.store.layout.mt(),
                nt: self.store.layout.nt(),
            })
    }

    /// Shared access to the tile data.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>> {
        self.slot()?
            .read()
            .map_err(|_| TileError::Kernel(format!("tile {} lock poisoned", self.id)))
    }

    /// Exclusive access to the tile data.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>> {
        self.slot()?
            .write()
            .map_err(|_| TileError::Kernel(format!("tile {} lock poisoned", self.id)))
    }
}

impl<T> Clone for Tile<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            store: Arc::clone(&self.store),
        }
    }
}

impl<T> PartialEq for Tile<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Tile<T> {}

impl<T> fmt::Debug for Tile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile{}", self.id)
    }
}
