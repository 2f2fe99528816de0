//! Golden snapshot tests for pass plans
//!
//! Each test scans an in-memory crate, plans one pass and snapshots its trace: the decision for every candidate
//! field, shadowed fields and unknown filter names. Resolution changes show up as reviewed snapshot diffs.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use fastfield::{AccessorKind, GeneratorConfig, Processor, SourceUniverse};

const GEOMETRY: &str = r#"
pub mod geometry {
    #[field_getters]
    #[field_setters]
    pub struct Point {
        pub x: i32,
        #[getter]
        pub y: i32,
        pub visible: bool,
    }

    impl Point {
        pub fn get_x(&self) -> i32 {
            self.x
        }

        pub fn is_visible(&self) -> bool {
            self.visible
        }

        fn set_x(&mut self, x: i32) {
            self.x = x;
        }
    }
}
"#;

const MODEL: &str = r#"
pub mod model {
    #[accessors]
    pub struct Entity {
        pub id: u64,
        pub name: String,
    }

    #[field_getters(exclude = ["missing"])]
    pub struct User {
        #[parent]
        pub entity: Entity,
        pub name: String,
    }

    impl User {
        pub fn get_name(&self) -> String {
            self.name.clone()
        }
    }
}
"#;

const INVENTORY: &str = r#"
pub mod inventory {
    #[field_setters(name = "StockWriters", include = ["count", "label", "frozen"])]
    #[setter]
    pub struct Stock {
        pub count: u32,
        pub label: String,
        #[setter(vis = "none")]
        pub frozen: bool,
        pub notes: String,
    }

    impl Stock {
        pub(super) fn set_count(&mut self, count: u32) {
            self.count = count;
        }
    }
}
"#;

/// Plan one pass and return its trace.
fn trace(source: &str, type_name: &str, kind: AccessorKind) -> String {
    let universe = SourceUniverse::from_source("lib.rs", source).expect("source should scan");
    let element = universe.element(type_name).expect("type should exist");
    let config = GeneratorConfig::default();
    Processor::new(&config)
        .plan(element, kind)
        .expect("plan should succeed")
        .to_string()
}

#[test]
fn test_convention_and_marker_getters() {
    insta::assert_snapshot!("geometry_getters", trace(GEOMETRY, "geometry::Point", AccessorKind::Getter));
}

#[test]
fn test_private_and_missing_setters() {
    insta::assert_snapshot!("geometry_setters", trace(GEOMETRY, "geometry::Point", AccessorKind::Setter));
}

#[test]
fn test_inherited_fields_and_shadowing() {
    insta::assert_snapshot!("model_user_getters", trace(MODEL, "model::User", AccessorKind::Getter));
}

#[test]
fn test_custom_name_and_type_marker() {
    insta::assert_snapshot!("inventory_stock_setters", trace(INVENTORY, "Stock", AccessorKind::Setter));
}
