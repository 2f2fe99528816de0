//! Convention discovery: `is_` getters for `bool`, private and disqualified accessors, namespace-scoped setters.

use fastfield_derive::FieldAccessors;

#[derive(Debug, Clone, FieldAccessors)]
#[field_getters]
#[field_setters]
pub struct Feature {
    pub enabled: bool,
    pub name: String,
    #[getter(vis = "none")]
    pub secret: String,
    pub weight: u32,
}

impl Feature {
    pub fn new(name: &str, secret: &str) -> Self {
        Self {
            enabled: false,
            name: name.to_string(),
            secret: secret.to_string(),
            weight: 1,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Never bound: `bool` fields use `is_enabled`.
    pub fn get_enabled(&self) -> bool {
        !self.enabled
    }

    #[allow(dead_code)]
    fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_secret(&self) -> String {
        self.secret.clone()
    }

    pub fn get_weight(&self) -> u32 {
        self.weight
    }

    pub(crate) fn set_weight(&mut self, weight: u32) {
        self.weight = weight.max(1);
    }

    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

fastfield_runtime::include_accessors!("flags/accessors.rs");
