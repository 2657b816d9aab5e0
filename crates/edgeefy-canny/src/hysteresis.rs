//! Single-pass hysteresis: weak pixels touching an original strong pixel
//! are promoted.
//!
//! Promotion is evaluated against the strong set as it came out of
//! thresholding, so a chain of weak pixels is only linked where each member
//! touches a strong pixel directly.

use std::collections::BTreeSet;

use edgeefy_core::{Coord, Error, Image, Pixel};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::threshold::Classified;

/// What happens to weak pixels in the output image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeakEdgePolicy {
    /// Promoted weak pixels keep their intensity; the rest are zeroed.
    #[default]
    KeepPromoted,
    /// Every weak pixel is zeroed, promoted or not. Matches the reference
    /// tool, where promotion only updates the strong set.
    EraseWeak,
}

/// Final edge map.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMap {
    pub image: Image<Pixel>,
    /// Original strong pixels plus promoted weak pixels.
    pub strong: BTreeSet<Coord>,
    /// Weak pixels that were promoted in this pass.
    pub promoted: BTreeSet<Coord>,
}

#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(weak = classified.weak.len(), policy = ?policy))
)]
pub fn link_edges(classified: Classified, policy: WeakEdgePolicy) -> Result<EdgeMap, Error> {
    let Classified {
        mut image,
        strong,
        weak,
        ..
    } = classified;
    image.as_view().ensure_non_empty()?;
    let (w, h) = image.dims();

    let promoted: BTreeSet<Coord> = weak
        .iter()
        .copied()
        .filter(|c| c.neighbors8(w, h).any(|n| strong.contains(&n)))
        .collect();

    for c in &weak {
        let keep = policy == WeakEdgePolicy::KeepPromoted && promoted.contains(c);
        if keep {
            continue;
        }
        if let Some(px) = image.get_mut(c.x, c.y) {
            px.luma = 0;
        }
    }

    let mut strong = strong;
    strong.extend(promoted.iter().copied());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        promoted = promoted.len(),
        strong = strong.len(),
        "hysteresis"
    );

    Ok(EdgeMap {
        image,
        strong,
        promoted,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use edgeefy_core::{Coord, Image, Pixel};

    use super::{WeakEdgePolicy, link_edges};
    use crate::threshold::{Classified, Thresholds};

    fn classified(
        w: usize,
        h: usize,
        strong: &[(usize, usize, u8)],
        weak: &[(usize, usize, u8)],
    ) -> Classified {
        let mut image = Image::new_fill(w, h, Pixel::opaque(0));
        for &(x, y, v) in strong.iter().chain(weak) {
            *image.get_mut(x, y).expect("in bounds") = Pixel::opaque(v);
        }
        Classified {
            image,
            thresholds: Thresholds {
                low: 40.0,
                high: 120.0,
            },
            strong: strong.iter().map(|&(x, y, _)| Coord::new(x, y)).collect(),
            weak: weak.iter().map(|&(x, y, _)| Coord::new(x, y)).collect(),
        }
    }

    #[test]
    fn adjacent_weak_pixel_is_promoted_and_kept() {
        let c = classified(5, 5, &[(2, 2, 200)], &[(3, 3, 80), (0, 0, 90)]);
        let out = link_edges(c, WeakEdgePolicy::KeepPromoted).expect("non-empty");

        assert!(out.strong.contains(&Coord::new(3, 3)));
        assert!(!out.strong.contains(&Coord::new(0, 0)));
        assert_eq!(out.promoted, BTreeSet::from([Coord::new(3, 3)]));
        assert_eq!(out.image.get(3, 3).map(|p| p.luma), Some(80));
        assert_eq!(out.image.get(0, 0).map(|p| p.luma), Some(0));
        assert_eq!(out.image.get(2, 2).map(|p| p.luma), Some(200));
    }

    #[test]
    fn erase_weak_blackens_promoted_pixels_too() {
        let c = classified(5, 5, &[(2, 2, 200)], &[(1, 2, 80), (4, 0, 90)]);
        let out = link_edges(c, WeakEdgePolicy::EraseWeak).expect("non-empty");

        assert!(out.strong.contains(&Coord::new(1, 2)));
        assert!(!out.strong.contains(&Coord::new(4, 0)));
        assert_eq!(out.image.get(1, 2).map(|p| p.luma), Some(0));
        assert_eq!(out.image.get(4, 0).map(|p| p.luma), Some(0));
        assert_eq!(out.image.get(2, 2).map(|p| p.luma), Some(200));
    }

    #[test]
    fn weak_chains_are_not_followed_transitively() {
        // strong at x=0, weak at x=1 and x=2 on one row
        let c = classified(4, 1, &[(0, 0, 200)], &[(1, 0, 60), (2, 0, 60)]);
        let out = link_edges(c, WeakEdgePolicy::KeepPromoted).expect("non-empty");

        assert_eq!(out.promoted, BTreeSet::from([Coord::new(1, 0)]));
        let lumas: Vec<u8> = out.image.data().iter().map(|p| p.luma).collect();
        assert_eq!(lumas, vec![200, 60, 0, 0]);
    }

    #[test]
    fn neighbors_do_not_wrap_around_rows() {
        // (3, 0) and (0, 1) are adjacent in memory but not in the image.
        let c = classified(4, 2, &[(3, 0, 200)], &[(0, 1, 60)]);
        let out = link_edges(c, WeakEdgePolicy::KeepPromoted).expect("non-empty");
        assert!(out.promoted.is_empty());
        assert_eq!(out.image.get(0, 1).map(|p| p.luma), Some(0));
    }
}
