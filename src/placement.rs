//! The per-item, per-bin search for a free origin.
//!
//! A search starts at the bin origin and moves a [`Space`] cursor until the item
//! either fits, or the cursor rises above the bin. On a collision every axis steps
//! forward by one grid unit. Otherwise the cursor walks along x, wraps into the next
//! z column once x overflows, and rises to the next level once z overflows.

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::entity::{Bin, Item};
use crate::geometry::{Dimensions, Slot, Space};
use crate::Cuboid;

/// How a candidate footprint is tested against slots already in the bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapTest {
    /// Full interval overlap on all three axes. Never produces overlapping slots.
    #[default]
    Interval,
    /// Samples only the unit cells at the two opposite corners of the candidate.
    /// Reproduces older layouts; may let slots overlap.
    Corners,
}

/// How the quick pre-check bounds the space already consumed in a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentBound {
    /// Each axis is bounded by its own furthest slot face.
    #[default]
    PerAxis,
    /// All axes are bounded by the furthest x face.
    Shared,
}

/// The result of a single search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The cursor hit an existing slot and was advanced.
    Collision,
    /// The cursor was free but the item would not sit inside the bin there; it moved on.
    Moved,
    /// The cursor rose above the bin.
    BinFull,
    /// The item fits with its origin at the given position.
    Found(Space),
}

/// Why an item was not placed in a bin. The item stays unused and the caller moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The pre-check ruled the item out without searching.
    CannotFit,
    /// The search ran out of room.
    BinFull,
    /// The search exceeded its step bound.
    StepLimit,
}

#[derive(Debug, Clone)]
pub struct PlacementEngine {
    overlap: OverlapTest,
    extent: ExtentBound,
    max_steps: u64,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        PlacementEngine::new(OverlapTest::default(), ExtentBound::default(), 100_000)
    }
}

impl PlacementEngine {
    pub fn new(overlap: OverlapTest, extent: ExtentBound, max_steps: u64) -> PlacementEngine {
        PlacementEngine {
            overlap,
            extent,
            max_steps,
        }
    }

    /// Returns true if a box of size `dims` with its origin at `cursor` hits any of `slots`.
    pub fn collides(&self, slots: &[Slot], cursor: Space, dims: Dimensions) -> bool {
        match self.overlap {
            OverlapTest::Interval => {
                let candidate = Slot::new(String::new(), cursor, dims);
                slots.iter().any(|s| s.overlaps(&candidate))
            }
            OverlapTest::Corners => {
                let far = cursor.far_corner(dims);
                let far_cell = Space::new(far.x - 1, far.y - 1, far.z - 1);
                slots
                    .iter()
                    .any(|s| s.encloses_cell(cursor) || s.encloses_cell(far_cell))
            }
        }
    }

    /// Quick conservative filter: false if the item cannot fit past what is already packed.
    ///
    /// Passing this check does not guarantee the search will find a position.
    pub fn can_fit(&self, bin: &Bin, item: &Item) -> bool {
        let (mut x, mut y, mut z) = (0, 0, 0);
        for slot in bin.slots() {
            x = x.max(slot.max_x);
            y = y.max(slot.max_y);
            z = z.max(slot.max_z);
        }
        if self.extent == ExtentBound::Shared {
            (y, z) = (x, x);
        }

        let (b, i) = (bin.dims(), item.dims());
        fits(x, i.w, b.w) && fits(y, i.h, b.h) && fits(z, i.d, b.d)
    }

    /// Runs one step of the search for an item of size `dims`, moving `cursor`.
    pub fn probe(&self, bin: &Bin, dims: Dimensions, cursor: &mut Space) -> Probe {
        let slots = bin.slots();
        if self.collides(slots, *cursor, dims) {
            cursor.advance();
            return Probe::Collision;
        }

        let entry = *cursor;
        let zero = Slot::zero();
        let level = current_level(slots, cursor.y).unwrap_or(&zero);
        let b = bin.dims();

        if cursor.x + dims.w > b.w {
            cursor.z += dims.d;
            cursor.x = 0;
        } else {
            cursor.x += 1;
        }

        if cursor.z + dims.d > b.d {
            cursor.y += level.max_y;
            cursor.x = level.min_x;
            cursor.z = level.min_z;
        }

        if cursor.y + dims.h > b.h {
            Probe::BinFull
        } else if Slot::new(String::new(), entry, dims).is_within(b) {
            Probe::Found(entry)
        } else {
            Probe::Moved
        }
    }

    /// Searches `bin` for an origin where `item` fits, starting at the bin origin.
    pub fn search(&self, bin: &Bin, item: &Item) -> Result<Space, Rejection> {
        let dims = item.dims();
        let mut cursor = Space::ORIGIN;
        let mut steps = 0;

        loop {
            if steps >= self.max_steps {
                warn!(
                    bin = bin.id(),
                    item = item.id(),
                    steps,
                    "search step bound reached, treating bin as full"
                );
                return Err(Rejection::StepLimit);
            }
            steps += 1;

            match self.probe(bin, dims, &mut cursor) {
                Probe::Collision | Probe::Moved => continue,
                Probe::BinFull => {
                    trace!(bin = bin.id(), item = item.id(), steps, "bin full");
                    return Err(Rejection::BinFull);
                }
                Probe::Found(space) => {
                    trace!(bin = bin.id(), item = item.id(), steps, "position found");
                    return Ok(space);
                }
            }
        }
    }

    /// Tries to place `item` in `bin`, committing a slot on success.
    pub fn place(&self, bin: &mut Bin, item: &mut Item) -> Result<(), Rejection> {
        if !self.can_fit(bin, item) {
            debug!(bin = bin.id(), item = item.id(), "item cannot fit");
            return Err(Rejection::CannotFit);
        }

        let space = self.search(bin, item).map_err(|rejection| {
            debug!(bin = bin.id(), item = item.id(), ?rejection, "item not placed");
            rejection
        })?;

        let slot = Slot::new(item.id(), space, item.dims());
        debug!(
            bin = bin.id(),
            item = item.id(),
            x = space.x,
            y = space.y,
            z = space.z,
            "item placed"
        );
        bin.push_slot(slot);
        item.mark_used();
        Ok(())
    }
}

fn fits(extent: i64, len: i64, bound: i64) -> bool {
    extent.checked_add(len).is_some_and(|end| end <= bound)
}

/// Finds the slot whose top face is the lowest one above `y`.
fn current_level(slots: &[Slot], y: i64) -> Option<&Slot> {
    slots
        .iter()
        .filter(|s| s.max_y > y)
        .min_by_key(|s| s.max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(id: &str, size: i64) -> Item {
        Item::new(id, Dimensions::new(size, size, size))
    }

    fn bin(size: i64) -> Bin {
        Bin::new("bin", Dimensions::new(size, size, size), 0.0)
    }

    #[test]
    fn first_item_goes_to_origin() {
        let engine = PlacementEngine::default();
        let mut bin = bin(10);
        let mut item = cube("a", 3);
        engine.place(&mut bin, &mut item).unwrap();

        assert!(item.is_used());
        assert!(bin.is_used());
        let slot = &bin.slots()[0];
        assert_eq!((slot.min_x, slot.min_y, slot.min_z), (0, 0, 0));
        assert_eq!((slot.max_x, slot.max_y, slot.max_z), (3, 3, 3));
        assert_eq!(slot.id, "a");
    }

    #[test]
    fn collision_steps_diagonally() {
        let engine = PlacementEngine::default();
        let mut bin = bin(10);
        engine.place(&mut bin, &mut cube("a", 4)).unwrap();
        let mut second = cube("b", 4);
        engine.place(&mut bin, &mut second).unwrap();

        let slot = &bin.slots()[1];
        assert_eq!((slot.min_x, slot.min_y, slot.min_z), (4, 4, 4));
        assert!(!slot.overlaps(&bin.slots()[0]));
    }

    #[test]
    fn oversized_item_is_rejected_up_front() {
        let engine = PlacementEngine::default();
        let mut bin = bin(5);
        let mut item = cube("big", 6);
        assert_eq!(engine.place(&mut bin, &mut item), Err(Rejection::CannotFit));
        assert!(!item.is_used());
        assert!(!bin.is_used());
    }

    #[test]
    fn can_fit_uses_furthest_faces() {
        let engine = PlacementEngine::default();
        let mut bin = bin(10);
        engine.place(&mut bin, &mut cube("a", 6)).unwrap();
        assert!(!engine.can_fit(&bin, &cube("b", 5)));
        assert!(engine.can_fit(&bin, &cube("c", 4)));
    }

    #[test]
    fn can_fit_rejects_extents_past_i64() {
        let engine = PlacementEngine::default();
        let mut bin = Bin::new("wide", Dimensions::new(i64::MAX, 1, 1), 0.0);
        let half = i64::MAX / 2 + 1;
        engine
            .place(&mut bin, &mut Item::new("a", Dimensions::new(half, 1, 1)))
            .unwrap();

        let mut second = Item::new("b", Dimensions::new(half, 1, 1));
        assert!(!engine.can_fit(&bin, &second));
        assert_eq!(engine.place(&mut bin, &mut second), Err(Rejection::CannotFit));
        assert_eq!(bin.slots().len(), 1);
    }

    #[test]
    fn shared_extent_bounds_every_axis_by_x() {
        let per_axis = PlacementEngine::default();
        let shared = PlacementEngine::new(OverlapTest::Interval, ExtentBound::Shared, 1_000);
        let mut bin = Bin::new("bin", Dimensions::new(10, 10, 10), 0.0);
        bin.push_slot(Slot::new("flat", Space::ORIGIN, Dimensions::new(8, 1, 1)));

        let tall = Item::new("tall", Dimensions::new(2, 9, 2));
        assert!(per_axis.can_fit(&bin, &tall));
        assert!(!shared.can_fit(&bin, &tall));
    }

    #[test]
    fn corner_sampling_misses_edge_overlap() {
        let interval = PlacementEngine::default();
        let corners = PlacementEngine::new(OverlapTest::Corners, ExtentBound::PerAxis, 1_000);
        let slots = [Slot::new("a", Space::new(2, 0, 0), Dimensions::new(2, 2, 2))];
        let dims = Dimensions::new(6, 1, 1);

        assert!(interval.collides(&slots, Space::ORIGIN, dims));
        assert!(!corners.collides(&slots, Space::ORIGIN, dims));
        assert!(corners.collides(&slots, Space::new(2, 0, 0), dims));
    }

    #[test]
    fn probe_reports_bin_full() {
        let engine = PlacementEngine::default();
        let mut bin = bin(4);
        bin.push_slot(Slot::new("a", Space::ORIGIN, Dimensions::new(4, 4, 4)));
        let mut cursor = Space::ORIGIN;
        let dims = Dimensions::new(1, 1, 1);

        let mut probes = 0;
        let outcome = loop {
            probes += 1;
            match engine.probe(&bin, dims, &mut cursor) {
                Probe::Collision | Probe::Moved => {}
                other => break other,
            }
        };
        assert_eq!(outcome, Probe::BinFull);
        assert_eq!(probes, 5);
    }

    #[test]
    fn step_bound_turns_into_rejection() {
        let engine = PlacementEngine::new(OverlapTest::Interval, ExtentBound::PerAxis, 2);
        let mut bin = bin(10);
        bin.push_slot(Slot::new("a", Space::ORIGIN, Dimensions::new(5, 5, 5)));
        let item = cube("b", 2);
        assert_eq!(engine.search(&bin, &item), Err(Rejection::StepLimit));
    }

    #[test]
    fn current_level_is_lowest_top_above_cursor() {
        let slots = [
            Slot::new("a", Space::ORIGIN, Dimensions::new(1, 5, 1)),
            Slot::new("b", Space::new(1, 0, 0), Dimensions::new(1, 3, 1)),
            Slot::new("c", Space::new(2, 0, 0), Dimensions::new(1, 1, 1)),
        ];
        assert_eq!(current_level(&slots, 2).map(|s| s.id.as_str()), Some("b"));
        assert_eq!(current_level(&slots, 4).map(|s| s.id.as_str()), Some("a"));
        assert!(current_level(&slots, 5).is_none());
    }
}
