//! Composition chains: `#[parent]` fields embed the parent type.

use fastfield_derive::FieldAccessors;

#[derive(Debug, Clone, Default, FieldAccessors)]
#[accessors]
pub struct Entity {
    pub id: u64,
    pub(crate) revision: u32,
}

#[derive(Debug, Clone, Default, FieldAccessors)]
#[field_getters]
#[field_setters(exclude = ["id"])]
pub struct User {
    #[parent]
    pub entity: Entity,
    #[getter]
    #[setter]
    pub name: String,
    pub email: String,
}

impl User {
    pub fn get_email(&self) -> String {
        self.email.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, FieldAccessors)]
#[field_getters]
pub struct Admin {
    #[parent]
    pub user: User,
    #[getter]
    pub name: String,
}

fastfield_runtime::include_accessors!("model/accessors.rs");
