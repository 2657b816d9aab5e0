/// Integer pixel coordinate, `x` is the column and `y` the row.
///
/// Ordering is row-major so ordered sets iterate in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Applies a signed offset; `None` if the result leaves a `width x height` grid.
    pub fn offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Coord { x, y })
    }

    /// 8-connected neighbors clipped to the grid, in row-major order.
    pub fn neighbors8(self, width: usize, height: usize) -> impl Iterator<Item = Coord> {
        (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| self.offset(dx, dy, width, height))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}
