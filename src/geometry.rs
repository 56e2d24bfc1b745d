use serde::{Deserialize, Serialize};

/// Largest edge length accepted from decoded records.
///
/// Keeps the volume of any box, and every coordinate the search can reach, within `i64`.
pub const MAX_DIMENSION: i64 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub w: i64,
    pub h: i64,
    pub d: i64,
}

impl Dimensions {
    pub const fn new(w: i64, h: i64, d: i64) -> Dimensions {
        Dimensions { w, h, d }
    }

    /// Calculates the sum of the three edge lengths, saturating at `i64::MAX`.
    pub const fn sum(&self) -> i64 {
        self.w.saturating_add(self.h).saturating_add(self.d)
    }

    /// Calculates the volume enclosed by these dimensions, saturating at `i64::MAX`.
    pub const fn volume(&self) -> i64 {
        self.w.saturating_mul(self.h).saturating_mul(self.d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Creates an interval from `start` to `end`.
    pub const fn new(start: i64, end: i64) -> Interval {
        Interval { start, end }
    }

    /// Calculates the length of this interval.
    pub const fn len(&self) -> i64 {
        self.end - self.start
    }

    /// Returns true if this interval overlaps with `other`.
    ///
    /// Intervals that only share an endpoint do not overlap.
    pub const fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns true if this interval fully contains `other`.
    pub const fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// The committed placement of one item inside one bin.
///
/// Slots are created once by the placement engine and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Id of the item occupying this slot.
    pub id: String,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
    pub min_z: i64,
    pub max_z: i64,
}

impl Slot {
    /// Builds the footprint of an item whose origin corner sits at `space`.
    pub fn new(id: impl Into<String>, space: Space, dims: Dimensions) -> Slot {
        Slot {
            id: id.into(),
            min_x: space.x,
            max_x: space.x + dims.w,
            min_y: space.y,
            max_y: space.y + dims.h,
            min_z: space.z,
            max_z: space.z + dims.d,
        }
    }

    /// A zero-sized slot at the origin, used where no slot exists.
    pub fn zero() -> Slot {
        Slot::new(String::new(), Space::ORIGIN, Dimensions::new(0, 0, 0))
    }

    /// Returns the x range of this slot as an [Interval].
    pub const fn x(&self) -> Interval {
        Interval::new(self.min_x, self.max_x)
    }

    /// Returns the y range of this slot as an [Interval].
    pub const fn y(&self) -> Interval {
        Interval::new(self.min_y, self.max_y)
    }

    /// Returns the z range of this slot as an [Interval].
    pub const fn z(&self) -> Interval {
        Interval::new(self.min_z, self.max_z)
    }

    pub const fn dims(&self) -> Dimensions {
        Dimensions::new(self.x().len(), self.y().len(), self.z().len())
    }

    /// Returns true if `self` overlaps with `other` on all three axes.
    pub const fn overlaps(&self, other: &Slot) -> bool {
        self.x().overlaps(&other.x())
            && self.y().overlaps(&other.y())
            && self.z().overlaps(&other.z())
    }

    /// Returns true if the unit cell whose lowest corner is `cell` lies inside this slot.
    pub const fn encloses_cell(&self, cell: Space) -> bool {
        self.x().contains(&Interval::new(cell.x, cell.x + 1))
            && self.y().contains(&Interval::new(cell.y, cell.y + 1))
            && self.z().contains(&Interval::new(cell.z, cell.z + 1))
    }

    /// Returns true if this slot lies entirely within a container of size `bounds`
    /// anchored at the origin.
    pub const fn is_within(&self, bounds: Dimensions) -> bool {
        Interval::new(0, bounds.w).contains(&self.x())
            && Interval::new(0, bounds.h).contains(&self.y())
            && Interval::new(0, bounds.d).contains(&self.z())
    }
}

/// The transient cursor used while searching for an item's origin inside a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Space {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Space {
    pub const ORIGIN: Space = Space { x: 0, y: 0, z: 0 };

    pub const fn new(x: i64, y: i64, z: i64) -> Space {
        Space { x, y, z }
    }

    /// Steps all three axes forward by one grid unit.
    pub fn advance(&mut self) {
        self.x += 1;
        self.y += 1;
        self.z += 1;
    }

    /// Returns the corner opposite to this one for a box of size `dims`.
    pub const fn far_corner(&self, dims: Dimensions) -> Space {
        Space::new(self.x + dims.w, self.y + dims.h, self.z + dims.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(id: &str, x: i64, y: i64, z: i64, size: i64) -> Slot {
        Slot::new(id, Space::new(x, y, z), Dimensions::new(size, size, size))
    }

    #[test]
    fn touching_slots_do_not_overlap() {
        let a = cube("a", 0, 0, 0, 4);
        let b = cube("b", 4, 0, 0, 4);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_needs_all_three_axes() {
        let a = cube("a", 0, 0, 0, 4);
        assert!(a.overlaps(&cube("b", 3, 3, 3, 4)));
        assert!(!a.overlaps(&cube("c", 3, 3, 4, 4)));
    }

    #[test]
    fn encloses_cell_is_half_open() {
        let a = cube("a", 0, 0, 0, 3);
        assert!(a.encloses_cell(Space::ORIGIN));
        assert!(a.encloses_cell(Space::new(2, 2, 2)));
        assert!(!a.encloses_cell(Space::new(3, 0, 0)));
    }

    #[test]
    fn slot_from_space_and_dims() {
        let slot = Slot::new("i", Space::new(1, 2, 3), Dimensions::new(4, 5, 6));
        assert_eq!((slot.min_x, slot.max_x), (1, 5));
        assert_eq!((slot.min_y, slot.max_y), (2, 7));
        assert_eq!((slot.min_z, slot.max_z), (3, 9));
        assert_eq!(slot.dims(), Dimensions::new(4, 5, 6));
        assert!(slot.is_within(Dimensions::new(5, 7, 9)));
        assert!(!slot.is_within(Dimensions::new(5, 7, 8)));
    }

    #[test]
    fn volume_saturates() {
        assert_eq!(Dimensions::new(2, 3, 4).volume(), 24);
        let huge = Dimensions::new(3_000_000, 3_000_000, 3_000_000);
        assert_eq!(huge.volume(), i64::MAX);
        let max = Dimensions::new(MAX_DIMENSION, MAX_DIMENSION, MAX_DIMENSION);
        assert_eq!(max.volume(), 1 << 60);
    }

    #[test]
    fn advance_moves_every_axis() {
        let mut space = Space::ORIGIN;
        space.advance();
        space.advance();
        assert_eq!(space, Space::new(2, 2, 2));
    }
}
