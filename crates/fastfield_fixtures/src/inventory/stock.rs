use fastfield_derive::FieldAccessors;

#[derive(Debug, Clone, FieldAccessors)]
#[field_getters(name = "StockReaders", exclude = ["sku"])]
#[field_setters]
#[setter]
pub struct Item {
    pub sku: String,
    #[getter]
    pub quantity: u32,
    #[setter(vis = "private")]
    pub reserved: u32,
}

fastfield_runtime::include_accessors!("inventory/stock/accessors.rs");
