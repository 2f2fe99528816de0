//! Providers written the way generated artifacts are, exercised through the read/write helpers.

use std::any::Any;

use fastfield_runtime::{
    AccessError, AccessorMap, AccessorProvider, Getter, GetterProvider, Setter, SetterProvider, assign, downcast,
};

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    label: String,
}

struct PointGetters {
    accessors: AccessorMap<Getter<Point>>,
}

impl PointGetters {
    fn new() -> Self {
        let mut accessors: AccessorMap<Getter<Point>> = AccessorMap::new();
        accessors.insert("x", {
            let accessor: Getter<Point> = |instance: &Point| -> Box<dyn Any> { Box::new(instance.x) };
            accessor
        });
        accessors.insert("label", {
            let accessor: Getter<Point> = |instance: &Point| -> Box<dyn Any> { Box::new(instance.label.clone()) };
            accessor
        });
        Self { accessors }
    }
}

impl AccessorProvider<Point> for PointGetters {
    type Accessor = Getter<Point>;

    fn accessors(&self) -> &AccessorMap<Self::Accessor> {
        &self.accessors
    }
}

struct PointSetters {
    accessors: AccessorMap<Setter<Point>>,
}

impl PointSetters {
    fn new() -> Self {
        let mut accessors: AccessorMap<Setter<Point>> = AccessorMap::new();
        accessors.insert("x", {
            let accessor: Setter<Point> = |instance: &mut Point, value: Box<dyn Any>| -> Result<(), AccessError> {
                instance.x = downcast::<i32>("x", value)?;
                Ok(())
            };
            accessor
        });
        accessors.insert("label", {
            let accessor: Setter<Point> = |instance: &mut Point, value: Box<dyn Any>| -> Result<(), AccessError> {
                assign(&mut instance.label, "label", value)?;
                Ok(())
            };
            accessor
        });
        Self { accessors }
    }
}

impl AccessorProvider<Point> for PointSetters {
    type Accessor = Setter<Point>;

    fn accessors(&self) -> &AccessorMap<Self::Accessor> {
        &self.accessors
    }
}

fn point() -> Point {
    Point {
        x: 3,
        label: "origin".to_string(),
    }
}

#[test]
fn read_as_returns_the_field_value() {
    let getters = PointGetters::new();
    assert_eq!(getters.read_as::<i32>(&point(), "x"), Ok(3));
    assert_eq!(getters.read_as::<String>(&point(), "label"), Ok("origin".to_string()));
}

#[test]
fn read_of_unknown_field_fails() {
    let err = PointGetters::new().read(&point(), "z").unwrap_err();
    assert_eq!(err, AccessError::UnknownField { field: "z".into() });
    assert_eq!(err.to_string(), "no accessor for field `z`");
}

#[test]
fn read_as_wrong_type_is_a_mismatch() {
    let err = PointGetters::new().read_as::<u8>(&point(), "x").unwrap_err();
    assert_eq!(
        err,
        AccessError::TypeMismatch {
            field: "x".into(),
            expected: "u8"
        }
    );
}

#[test]
fn write_is_checked() {
    let setters = PointSetters::new();
    let mut p = point();
    setters.write(&mut p, "x", 10i32).unwrap();
    assert_eq!(p.x, 10);

    let err = setters.write(&mut p, "x", "ten").unwrap_err();
    assert!(matches!(err, AccessError::TypeMismatch { .. }));
    assert_eq!(p.x, 10);

    assert!(matches!(
        setters.write(&mut p, "width", 1u32),
        Err(AccessError::UnknownField { .. })
    ));
}

#[test]
fn assign_takes_the_slot_type() {
    let setters = PointSetters::new();
    let mut p = point();
    setters.write(&mut p, "label", "north".to_string()).unwrap();
    assert_eq!(p.label, "north");

    let err = setters.write(&mut p, "label", "south").unwrap_err();
    assert_eq!(
        err,
        AccessError::TypeMismatch {
            field: "label".into(),
            expected: "alloc::string::String"
        }
    );
    assert_eq!(p.label, "north");
}

#[test]
fn fields_are_sorted() {
    assert_eq!(PointGetters::new().fields(), ["label", "x"]);
}
