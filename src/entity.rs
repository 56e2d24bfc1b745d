use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geometry::{Dimensions, Slot};
use crate::Cuboid;

/// A cuboid payload waiting to be placed into a bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    dims: Dimensions,
    weight: f64,
    mass: f64,
    volume_rating: f64,
    quantity: u32,
    used: bool,
}

impl Item {
    /// Creates an unused item with unit quantity and no weight.
    pub fn new(id: impl Into<String>, dims: Dimensions) -> Item {
        Item {
            id: id.into(),
            dims,
            weight: 0.0,
            mass: 0.0,
            volume_rating: 0.0,
            quantity: 1,
            used: false,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Item {
        self.weight = weight;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Item {
        self.mass = mass;
        self
    }

    pub fn with_volume_rating(mut self, volume_rating: f64) -> Item {
        self.volume_rating = volume_rating;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Item {
        self.quantity = quantity;
        self
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn volume_rating(&self) -> f64 {
        self.volume_rating
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Records that a slot referencing this item was committed. Idempotent.
    pub(crate) fn mark_used(&mut self) {
        self.used = true;
    }

    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            w: self.dims.w,
            h: self.dims.h,
            d: self.dims.d,
            id: self.id.clone(),
        }
    }
}

impl Cuboid for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn dims(&self) -> Dimensions {
        self.dims
    }

    fn is_used(&self) -> bool {
        self.used
    }
}

/// A container cuboid that receives items.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    id: String,
    dims: Dimensions,
    max_wg: f64,
    used: bool,
    slots: Vec<Slot>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Bin {
    pub fn new(id: impl Into<String>, dims: Dimensions, max_wg: f64) -> Bin {
        Bin {
            id: id.into(),
            dims,
            max_wg,
            used: false,
            slots: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    /// The maximum weight this bin is declared to carry. Not enforced during placement.
    pub fn max_wg(&self) -> f64 {
        self.max_wg
    }

    /// Slots committed to this bin, in placement order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Appends a committed slot. The first slot marks the bin as used.
    pub(crate) fn push_slot(&mut self, slot: Slot) {
        self.slots.push(slot);
        self.used = true;
    }

    /// Stamps the moment a strategy starts filling this bin. Later calls keep the first stamp.
    pub(crate) fn begin(&mut self) {
        self.started_at.get_or_insert_with(Utc::now);
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// The bin as declared, before anything was packed into it.
    pub fn capacity(&self) -> BinCapacity {
        BinCapacity {
            w: self.dims.w,
            h: self.dims.h,
            d: self.dims.d,
            max_wg: self.max_wg,
        }
    }
}

impl Cuboid for Bin {
    fn id(&self) -> &str {
        &self.id
    }

    fn dims(&self) -> Dimensions {
        self.dims
    }

    fn is_used(&self) -> bool {
        self.used
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinCapacity {
    pub w: i64,
    pub h: i64,
    pub d: i64,
    pub max_wg: f64,
}

/// The serialised form of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub w: i64,
    pub h: i64,
    pub d: i64,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Space;

    #[test]
    fn new_entities_are_unused() {
        let item = Item::new("i", Dimensions::new(1, 2, 3));
        let bin = Bin::new("b", Dimensions::new(4, 5, 6), 10.0);
        assert!(!item.is_used());
        assert!(!bin.is_used());
        assert!(bin.slots().is_empty());
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn first_slot_marks_bin_used() {
        let mut bin = Bin::new("b", Dimensions::new(4, 4, 4), 0.0);
        bin.push_slot(Slot::new("i", Space::ORIGIN, Dimensions::new(1, 1, 1)));
        assert!(bin.is_used());
        assert_eq!(bin.slots().len(), 1);
    }

    #[test]
    fn begin_keeps_first_stamp() {
        let mut bin = Bin::new("b", Dimensions::new(4, 4, 4), 0.0);
        assert!(bin.started_at().is_none());
        bin.begin();
        let first = bin.started_at();
        bin.begin();
        assert_eq!(bin.started_at(), first);
        bin.finish();
        assert!(bin.finished_at() >= first);
    }

    #[test]
    fn item_summary_fields() {
        let item = Item::new("i", Dimensions::new(1, 2, 3)).with_weight(4.5);
        let summary = item.summary();
        assert_eq!((summary.w, summary.h, summary.d), (1, 2, 3));
        assert_eq!(summary.id, "i");
        assert_eq!(item.weight(), 4.5);
    }
}
