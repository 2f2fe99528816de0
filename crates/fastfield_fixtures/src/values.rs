//! The same private field read through a getter method and through a field marker.

use fastfield_derive::FieldAccessors;

#[derive(Debug, FieldAccessors)]
#[field_getters]
pub struct WithMethod {
    int_value: i32,
}

impl WithMethod {
    pub fn new(int_value: i32) -> Self {
        Self { int_value }
    }

    pub fn get_int_value(&self) -> i32 {
        self.int_value
    }
}

#[derive(Debug, FieldAccessors)]
#[field_getters]
pub struct WithMarker {
    #[getter]
    int_value: i32,
}

impl WithMarker {
    pub fn new(int_value: i32) -> Self {
        Self { int_value }
    }
}

fastfield_runtime::include_accessors!("values/accessors.rs");
