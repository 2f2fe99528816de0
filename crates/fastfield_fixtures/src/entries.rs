//! Accessor tables over a parent declared in `records`.

use fastfield_derive::FieldAccessors;

#[derive(Debug, Clone, Default, FieldAccessors)]
#[field_getters]
#[field_setters]
#[accessors]
pub struct Entry {
    #[parent]
    pub record: crate::records::Record,
    pub note: String,
}

fastfield_runtime::include_accessors!("entries/accessors.rs");
