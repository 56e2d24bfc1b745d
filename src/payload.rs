//! Decoding of externally supplied bin and item records.
//!
//! Records keep every field optional so that a missing one can be reported by
//! name; [`Payload::into_collections`] turns them into typed entities and fails
//! on the first record that is incomplete.

use std::path::Path;

use indexmap::IndexMap;
use rand::Rng;
use serde::Deserialize;

use crate::collection::Collection;
use crate::entity::{Bin, Item};
use crate::error::{LoadError, PackError, Result};
use crate::geometry::{Dimensions, MAX_DIMENSION};
use crate::Cuboid;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinRecord {
    pub id: Option<String>,
    pub w: Option<i64>,
    pub h: Option<i64>,
    pub d: Option<i64>,
    pub max_wg: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRecord {
    pub id: Option<String>,
    pub w: Option<i64>,
    pub h: Option<i64>,
    pub d: Option<i64>,
    pub quantity: Option<u32>,
    pub mass: Option<f64>,
    #[serde(alias = "vr")]
    pub volume_rating: Option<f64>,
    pub weight: Option<f64>,
}

/// Records keyed by id, or a plain list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Catalog<R> {
    Keyed(IndexMap<String, R>),
    Listed(Vec<R>),
}

impl<R> Default for Catalog<R> {
    fn default() -> Self {
        Catalog::Listed(Vec::new())
    }
}

impl<R> Catalog<R> {
    fn into_entries(self) -> Vec<(Option<String>, R)> {
        match self {
            Catalog::Keyed(map) => map.into_iter().map(|(k, r)| (Some(k), r)).collect(),
            Catalog::Listed(list) => list.into_iter().map(|r| (None, r)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub bins: Catalog<BinRecord>,
    #[serde(default)]
    pub items: Catalog<ItemRecord>,
}

impl Payload {
    pub fn from_json(text: &str) -> serde_json::Result<Payload> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> std::result::Result<Payload, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Payload::from_json(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates every record and builds the bin and item collections.
    ///
    /// With `expand_quantity`, an item of quantity `n > 1` becomes `n` items with ids
    /// `<id>-1` through `<id>-n`. A generated id that matches another record's id
    /// fails the load with [`PackError::DuplicateId`].
    pub fn into_collections(
        self,
        expand_quantity: bool,
    ) -> Result<(Collection<Bin>, Collection<Item>)> {
        let mut bins = Collection::new("bin");
        for (key, record) in self.bins.into_entries() {
            bins.insert(bin_from_record(record, key)?)?;
        }

        let mut items = Collection::new("item");
        for (key, record) in self.items.into_entries() {
            let item = item_from_record(record, key)?;
            if expand_quantity && item.quantity() > 1 {
                for copy in expand(&item) {
                    items.insert(copy)?;
                }
            } else {
                items.insert(item)?;
            }
        }

        Ok((bins, items))
    }
}

fn bin_from_record(record: BinRecord, key: Option<String>) -> Result<Bin> {
    let id = resolve_id(record.id, key);
    let dims = dimensions("bin", &id, record.w, record.h, record.d)?;
    let max_wg = required("bin", &id, "max_wg", record.max_wg)?;
    Ok(Bin::new(id, dims, max_wg))
}

fn item_from_record(record: ItemRecord, key: Option<String>) -> Result<Item> {
    let id = resolve_id(record.id, key);
    let dims = dimensions("item", &id, record.w, record.h, record.d)?;
    let quantity = required("item", &id, "quantity", record.quantity)?;
    let mass = required("item", &id, "mass", record.mass)?;
    let volume_rating = required("item", &id, "volume_rating", record.volume_rating)?;
    let weight = required("item", &id, "weight", record.weight)?;
    Ok(Item::new(id, dims)
        .with_quantity(quantity)
        .with_mass(mass)
        .with_volume_rating(volume_rating)
        .with_weight(weight))
}

fn expand(item: &Item) -> impl Iterator<Item = Item> + '_ {
    (1..=item.quantity()).map(move |n| {
        Item::new(format!("{}-{n}", item.id()), item.dims())
            .with_mass(item.mass())
            .with_volume_rating(item.volume_rating())
            .with_weight(item.weight())
    })
}

fn resolve_id(id: Option<String>, key: Option<String>) -> String {
    id.or(key).unwrap_or_else(generate_id)
}

/// A random 16 hex digit id for records and runs that do not bring their own.
pub(crate) fn generate_id() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}

fn required<T>(kind: &'static str, id: &str, field: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| PackError::MissingField {
        kind,
        id: id.to_string(),
        field,
    })
}

fn dimensions(
    kind: &'static str,
    id: &str,
    w: Option<i64>,
    h: Option<i64>,
    d: Option<i64>,
) -> Result<Dimensions> {
    Ok(Dimensions::new(
        dimension(kind, id, "w", w)?,
        dimension(kind, id, "h", h)?,
        dimension(kind, id, "d", d)?,
    ))
}

fn dimension(
    kind: &'static str,
    id: &str,
    field: &'static str,
    value: Option<i64>,
) -> Result<i64> {
    let value = required(kind, id, field, value)?;
    if !(1..=MAX_DIMENSION).contains(&value) {
        return Err(PackError::InvalidDimension {
            kind,
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}
