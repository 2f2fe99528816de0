//! Field selection: which fields of a type (and its ancestors) are candidates for an accessor.
//!
//! 1. Collect the declared fields of the target and of every ancestor up to the root, nearest first. Levels are
//!    concatenated without deduplication.
//! 2. A non-empty include set keeps exactly the named fields.
//! 3. Otherwise a non-empty exclude set drops the named fields.
//! 4. Otherwise every field is kept.
//!
//! The rule comes from the configuration marker of the type being processed only; ancestors' own markers do not
//! apply. Visibility plays no part here, accessor resolution decides whether a candidate survives.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use crate::model::{FieldDescriptor, SelectionConfig, TypeDescriptor, Visibility};

/// Include/exclude rule of one configuration marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelectionRule {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl FieldSelectionRule {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.include.iter().cloned(), config.exclude.iter().cloned())
    }

    /// Keep everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    /// Whether a field with this name survives the rule. Include wins whenever it is non-empty.
    pub fn retains(&self, name: &str) -> bool {
        if !self.include.is_empty() {
            self.include.contains(name)
        } else if !self.exclude.is_empty() {
            !self.exclude.contains(name)
        } else {
            true
        }
    }

    /// Filter names that match no collected field.
    fn unknown_names(&self, collected: &[Candidate]) -> Vec<String> {
        let known: HashSet<&str> = collected.iter().map(Candidate::name).collect();
        let active = if !self.include.is_empty() {
            &self.include
        } else {
            &self.exclude
        };
        active.iter().filter(|name| !known.contains(name.as_str())).cloned().collect()
    }

    /// Run the selection over `target` and its ancestor chain.
    pub fn select(&self, target: &Rc<TypeDescriptor>) -> Selection {
        let collected: Vec<Candidate> = lineage(target)
            .into_iter()
            .flat_map(|(owner, hops)| {
                owner
                    .fields()
                    .iter()
                    .map(|field| Candidate {
                        field: field.clone(),
                        owner: Rc::clone(&owner),
                        hops: hops.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let unknown = self.unknown_names(&collected);
        for name in &unknown {
            tracing::warn!(
                target_type = target.qualified_name(),
                field = name.as_str(),
                "selection filter names a field that does not exist"
            );
        }

        let candidates = collected.into_iter().filter(|c| self.retains(c.name())).collect();
        Selection { candidates, unknown }
    }
}

/// One field that passed selection, with the type that declares it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub field: FieldDescriptor,
    /// Declaring type: the target itself or one of its ancestors.
    pub owner: Rc<TypeDescriptor>,
    /// Embedding fields leading from the target to `owner`; empty for the target's own fields.
    pub hops: Vec<Hop>,
}

impl Candidate {
    pub fn name(&self) -> &str {
        self.field.name()
    }

    pub fn is_inherited(&self) -> bool {
        !self.hops.is_empty()
    }

    /// Names of the embedding fields, outermost first.
    pub fn path(&self) -> Vec<String> {
        self.hops.iter().map(|hop| hop.field.clone()).collect()
    }
}

/// One `#[parent]` field crossed on the way from the target to an ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub field: String,
    pub visibility: Visibility,
    /// Namespace of the type declaring the embedding field.
    pub declared_in: Option<String>,
}

/// Result of one selection run.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Surviving fields, nearest level first, declaration order within a level.
    pub candidates: Vec<Candidate>,
    /// Include/exclude names that matched no field.
    pub unknown: Vec<String>,
}

impl Selection {
    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(Candidate::name).collect()
    }

    /// Resolve name collisions across levels: the nearest declaration wins.
    ///
    /// Returns `(kept, shadowed)`.
    pub fn shadow_by_nearest(self) -> (Vec<Candidate>, Vec<Candidate>) {
        let mut seen = HashSet::new();
        let (kept, shadowed): (Vec<_>, Vec<_>) = self
            .candidates
            .into_iter()
            .partition(|c| seen.insert(c.name().to_string()));
        for candidate in &shadowed {
            tracing::warn!(
                field = candidate.name(),
                declared_in = candidate.owner.qualified_name(),
                "field is shadowed by a nearer declaration with the same name"
            );
        }
        (kept, shadowed)
    }
}

/// The target followed by each ancestor, with the embedding hops leading to it.
///
/// The walk stops at the root, or before revisiting a type already on the chain.
pub fn lineage(target: &Rc<TypeDescriptor>) -> Vec<(Rc<TypeDescriptor>, Vec<Hop>)> {
    let mut chain = vec![(Rc::clone(target), Vec::new())];
    let mut visited: HashSet<String> = HashSet::from([target.qualified_name().to_string()]);
    let mut current = Rc::clone(target);
    let mut hops: Vec<Hop> = Vec::new();

    while let Some(ancestor) = current.ancestor().cloned() {
        if !visited.insert(ancestor.descriptor.qualified_name().to_string()) {
            tracing::warn!(
                target_type = target.qualified_name(),
                ancestor = ancestor.descriptor.qualified_name(),
                "ancestor chain is cyclic; stopping the walk"
            );
            break;
        }
        hops.push(Hop {
            field: ancestor.via.clone(),
            visibility: ancestor.visibility,
            declared_in: current.namespace().map(str::to_string),
        });
        chain.push((Rc::clone(&ancestor.descriptor), hops.clone()));
        current = ancestor.descriptor;
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldElement, StaticType};

    fn chain() -> Rc<TypeDescriptor> {
        let root = StaticType::new("Entity").field(FieldElement::new("id", "u64")).into_element();
        let middle = StaticType::new("Named")
            .field(FieldElement::new("name", "String"))
            .extends("entity", root)
            .into_element();
        TypeDescriptor::new(
            StaticType::new("User")
                .field(FieldElement::new("email", "String"))
                .field(FieldElement::new("age", "u8"))
                .extends("named", middle)
                .into_element(),
        )
    }

    #[test]
    fn test_empty_rule_keeps_union_of_all_levels() {
        let selection = FieldSelectionRule::all().select(&chain());
        assert_eq!(selection.names(), vec!["email", "age", "name", "id"]);
        assert!(selection.unknown.is_empty());
    }

    #[test]
    fn test_include_dominates_exclude() {
        let rule = FieldSelectionRule::new(["email"], ["email"]);
        let selection = rule.select(&chain());
        assert_eq!(selection.names(), vec!["email"]);
    }

    #[test]
    fn test_include_reaches_ancestor_fields() {
        let rule = FieldSelectionRule::new(["id"], Vec::<String>::new());
        let selection = rule.select(&chain());
        assert_eq!(selection.names(), vec!["id"]);
        let candidate = &selection.candidates[0];
        assert_eq!(candidate.owner.qualified_name(), "Entity");
        assert_eq!(candidate.path(), vec!["named".to_string(), "entity".to_string()]);
        assert_eq!(candidate.hops[0].visibility, Visibility::Public);
        assert!(candidate.is_inherited());
    }

    #[test]
    fn test_exclude_drops_named_fields() {
        let rule = FieldSelectionRule::new(Vec::<String>::new(), ["age", "id"]);
        let selection = rule.select(&chain());
        assert_eq!(selection.names(), vec!["email", "name"]);
    }

    #[test]
    fn test_unknown_filter_names_are_reported() {
        let rule = FieldSelectionRule::new(["email", "phone"], ["zip"]);
        let selection = rule.select(&chain());
        // Only the active (include) set is checked.
        assert_eq!(selection.unknown, vec!["phone".to_string()]);
    }

    #[test]
    fn test_same_name_across_levels_is_kept_by_selection() {
        let base = StaticType::new("Base").field(FieldElement::new("id", "u64")).into_element();
        let target = TypeDescriptor::new(
            StaticType::new("Derived")
                .field(FieldElement::new("id", "String"))
                .extends("base", base)
                .into_element(),
        );
        let selection = FieldSelectionRule::all().select(&target);
        assert_eq!(selection.names(), vec!["id", "id"]);

        let (kept, shadowed) = selection.shadow_by_nearest();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].field.ty(), "String");
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].owner.qualified_name(), "Base");
    }

    #[test]
    fn test_lineage_paths_accumulate() {
        let target = chain();
        let names: Vec<_> = lineage(&target)
            .into_iter()
            .map(|(owner, hops)| {
                let path: Vec<_> = hops.iter().map(|hop| hop.field.as_str()).collect();
                (owner.qualified_name().to_string(), path.join("."))
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("User".to_string(), String::new()),
                ("Named".to_string(), "named".to_string()),
                ("Entity".to_string(), "named.entity".to_string()),
            ]
        );
    }
}
