use fastfield_derive::FieldAccessors;

#[derive(Debug, Clone, PartialEq, FieldAccessors)]
#[field_getters]
#[field_setters]
#[accessors]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, FieldAccessors)]
#[field_getters(include = ["x"])]
#[accessors]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

fastfield_runtime::include_accessors!("geometry/accessors.rs");
