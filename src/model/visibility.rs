//! Visibility of declared members and the access levels carried by accessor markers.

use std::fmt;

/// Visibility of a type, field or method as written in source.
///
/// `Module` covers `pub(super)` and `pub(in path)`: the item is usable only from a namespace scope. `Private` covers
/// items without a visibility modifier and `pub(self)`; it is the private-equivalent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Crate,
    Module,
    Private,
}

impl Visibility {
    /// Whether the item is private-equivalent.
    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }

    /// Whether the item is scoped to its defining namespace.
    pub fn is_namespace_scoped(self) -> bool {
        matches!(self, Visibility::Module)
    }

    /// Whether code in namespace `from` may name a member with this visibility declared in `declared_in`.
    ///
    /// Scoped and private members are reachable from the declaring namespace and the namespaces nested in it.
    /// `pub(super)` / `pub(in path)` are checked the same way since the exact scope is not recorded.
    pub fn is_visible_from(self, declared_in: Option<&str>, from: Option<&str>) -> bool {
        match self {
            Visibility::Public | Visibility::Crate => true,
            Visibility::Module | Visibility::Private => match (declared_in, from) {
                (None, _) => true,
                (Some(_), None) => false,
                (Some(scope), Some(from)) => {
                    from == scope || from.strip_prefix(scope).is_some_and(|rest| rest.starts_with("::"))
                }
            },
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "pub"),
            Visibility::Crate => write!(f, "pub(crate)"),
            Visibility::Module => write!(f, "pub(module)"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Access level requested by a `#[getter]` / `#[setter]` marker.
///
/// `Private` and `None` disqualify the field regardless of any method that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessLevel {
    #[default]
    Public,
    Crate,
    Module,
    Private,
    None,
}

impl AccessLevel {
    /// Spellings accepted in `vis = "..."`.
    pub const SPELLINGS: &'static [&'static str] = &["pub", "crate", "module", "private", "none"];

    pub fn parse(spelling: &str) -> Option<Self> {
        match spelling {
            "pub" | "public" => Some(AccessLevel::Public),
            "crate" => Some(AccessLevel::Crate),
            "module" => Some(AccessLevel::Module),
            "private" => Some(AccessLevel::Private),
            "none" => Some(AccessLevel::None),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Public => "pub",
            AccessLevel::Crate => "crate",
            AccessLevel::Module => "module",
            AccessLevel::Private => "private",
            AccessLevel::None => "none",
        }
    }

    /// Whether a marker at this level lets the field through.
    pub fn permits_access(self) -> bool {
        !matches!(self, AccessLevel::Private | AccessLevel::None)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_level_round_trips_spellings() {
        for spelling in AccessLevel::SPELLINGS {
            let level = AccessLevel::parse(spelling).unwrap();
            assert_eq!(level.as_str(), *spelling);
        }
        assert_eq!(AccessLevel::parse("public"), Some(AccessLevel::Public));
        assert_eq!(AccessLevel::parse("protected"), None);
    }

    #[test]
    fn test_private_levels_disqualify() {
        assert!(AccessLevel::Public.permits_access());
        assert!(AccessLevel::Crate.permits_access());
        assert!(AccessLevel::Module.permits_access());
        assert!(!AccessLevel::Private.permits_access());
        assert!(!AccessLevel::None.permits_access());
    }

    #[test]
    fn test_visibility_classification() {
        assert!(Visibility::Private.is_private());
        assert!(!Visibility::Crate.is_private());
        assert!(Visibility::Module.is_namespace_scoped());
        assert!(!Visibility::Public.is_namespace_scoped());
    }

    #[test]
    fn test_private_members_are_visible_within_their_namespace() {
        let private = Visibility::Private;
        assert!(private.is_visible_from(Some("records"), Some("records")));
        assert!(private.is_visible_from(Some("records"), Some("records::nested")));
        assert!(private.is_visible_from(None, Some("entries")));
        assert!(!private.is_visible_from(Some("records"), Some("entries")));
        assert!(!private.is_visible_from(Some("records"), Some("recordsx")));
        assert!(!private.is_visible_from(Some("records"), None));
        assert!(!Visibility::Module.is_visible_from(Some("records"), Some("entries")));
        assert!(Visibility::Crate.is_visible_from(Some("records"), Some("entries")));
        assert!(Visibility::Public.is_visible_from(Some("records"), None));
    }
}
