use num_traits::Float;
use std::fmt::Debug;

/// Element type of a tiled matrix.
///
/// Tile tasks move between worker threads, so scalars must be `Send + Sync`.
pub trait Scalar: Float + Debug + Default + Send + Sync + 'static {
    /// Complex conjugate. Identity for real types.
    #[inline]
    fn conj(self) -> Self {
        self
    }
}

impl Scalar for f32 {}
impl Scalar for f64 {}
