//! Row-wise output filling, parallel with the `rayon` feature.
//!
//! Every output row depends only on read-only input, so both paths produce
//! identical results.

use edgeefy_core::Error;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Calls `f(y, row)` for each `width`-long row of `out`.
pub(crate) fn fill_rows<T, F>(out: &mut [T], width: usize, f: F) -> Result<(), Error>
where
    T: Send,
    F: Fn(usize, &mut [T]) -> Result<(), Error> + Send + Sync,
{
    if width == 0 {
        return Err(Error::EmptyImage);
    }

    #[cfg(feature = "rayon")]
    {
        out.par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(y, row)| f(y, row))
    }

    #[cfg(not(feature = "rayon"))]
    {
        out.chunks_mut(width)
            .enumerate()
            .try_for_each(|(y, row)| f(y, row))
    }
}
