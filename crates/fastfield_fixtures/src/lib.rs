//! Types whose accessor tables are generated by this crate's build script.
//!
//! Each module includes the bundle of the tables generated into it.

use fastfield_derive::FieldAccessors;

pub mod entries;
pub mod flags;
pub mod geometry;
pub mod inventory;
pub mod model;
pub mod records;
pub mod values;

#[derive(Debug, Default, Clone, FieldAccessors)]
#[field_getters]
#[accessors]
pub struct Settings {
    pub verbose: bool,
    pub level: u8,
}

fastfield_runtime::include_accessors!("accessors.rs");
