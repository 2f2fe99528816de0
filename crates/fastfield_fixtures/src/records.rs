//! Parent type embedded by `entries::Entry` from another module.

use fastfield_derive::FieldAccessors;

/// Only nameable as `Code` inside this module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code(pub u32);

#[derive(Debug, Clone, Default, FieldAccessors)]
#[accessors]
pub struct Record {
    pub code: Code,
    secret: u64,
}

impl Record {
    pub fn new(code: Code, secret: u64) -> Self {
        Self { code, secret }
    }

    pub fn secret(&self) -> u64 {
        self.secret
    }

    /// Codes never go below 100.
    pub fn set_code(&mut self, code: Code) {
        self.code = Code(code.0.max(100));
    }
}
