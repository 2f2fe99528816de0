//! Runtime support for fastfield-generated accessor tables.
//!
//! Generated artifacts depend on this crate for the provider contract ([`AccessorProvider`]), the accessor aliases
//! ([`Getter`], [`Setter`]) and the checked casts used by setters ([`downcast`], [`assign`]). User code reads and
//! writes through [`GetterProvider`] and [`SetterProvider`], which are implemented for every provider of the
//! matching kind.
//!
//! Lookups only consult the table resolved at build time; nothing here inspects types at runtime.

#![deny(clippy::unwrap_used)]

use std::any::{Any, type_name};
use std::collections::HashMap;

/// Reads one field of `T`, boxed.
pub type Getter<T> = fn(&T) -> Box<dyn Any>;

/// Writes one field of `T` from a boxed value of the field's declared type.
pub type Setter<T> = fn(&mut T, Box<dyn Any>) -> Result<(), AccessError>;

/// Field name to accessor.
pub type AccessorMap<A> = HashMap<&'static str, A>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("no accessor for field `{field}`")]
    UnknownField { field: String },

    #[error("field `{field}` expects a value of type `{expected}`")]
    TypeMismatch { field: String, expected: &'static str },
}

/// The provider contract: a table of accessors for `T`, built once by the generated constructor.
pub trait AccessorProvider<T> {
    type Accessor: Copy;

    fn accessors(&self) -> &AccessorMap<Self::Accessor>;

    fn accessor(&self, field: &str) -> Option<Self::Accessor> {
        self.accessors().get(field).copied()
    }

    /// Field names with an accessor, sorted.
    fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<_> = self.accessors().keys().copied().collect();
        fields.sort_unstable();
        fields
    }
}

/// Unbox `value` as `V`, reporting `field` on mismatch.
pub fn downcast<V: Any>(field: &str, value: Box<dyn Any>) -> Result<V, AccessError> {
    value
        .downcast::<V>()
        .map(|boxed| *boxed)
        .map_err(|_| AccessError::TypeMismatch {
            field: field.to_string(),
            expected: type_name::<V>(),
        })
}

/// Replace `slot` with `value` unboxed as the slot's own type, leaving it untouched on mismatch.
pub fn assign<V: Any>(slot: &mut V, field: &str, value: Box<dyn Any>) -> Result<(), AccessError> {
    *slot = downcast(field, value)?;
    Ok(())
}

fn unknown(field: &str) -> AccessError {
    AccessError::UnknownField {
        field: field.to_string(),
    }
}

/// Name-based reads through a getter table.
pub trait GetterProvider<T>: AccessorProvider<T, Accessor = Getter<T>> {
    fn read(&self, instance: &T, field: &str) -> Result<Box<dyn Any>, AccessError> {
        let getter = self.accessor(field).ok_or_else(|| unknown(field))?;
        Ok(getter(instance))
    }

    fn read_as<V: Any>(&self, instance: &T, field: &str) -> Result<V, AccessError> {
        downcast(field, self.read(instance, field)?)
    }
}

impl<T, P> GetterProvider<T> for P where P: AccessorProvider<T, Accessor = Getter<T>> + ?Sized {}

/// Name-based writes through a setter table.
pub trait SetterProvider<T>: AccessorProvider<T, Accessor = Setter<T>> {
    fn write<V: Any>(&self, instance: &mut T, field: &str, value: V) -> Result<(), AccessError> {
        self.write_boxed(instance, field, Box::new(value))
    }

    fn write_boxed(&self, instance: &mut T, field: &str, value: Box<dyn Any>) -> Result<(), AccessError> {
        let setter = self.accessor(field).ok_or_else(|| unknown(field))?;
        setter(instance, value)
    }
}

impl<T, P> SetterProvider<T> for P where P: AccessorProvider<T, Accessor = Setter<T>> + ?Sized {}

/// Include a file written by `fastfield::Builder` into the current module.
///
/// The path is relative to `$OUT_DIR`, e.g. `include_accessors!("geometry/accessors.rs")`.
#[macro_export]
macro_rules! include_accessors {
    ($path:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $path));
    };
}
