pub mod choosing;
pub mod packing;
