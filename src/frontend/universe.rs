//! The scanned crate: every struct declaration and inherent method, indexed by module path.
//!
//! Loading starts at a crate root (`lib.rs` / `main.rs`) or a single file and follows `mod` declarations with the
//! usual file rules (`foo.rs`, `foo/mod.rs`, `#[path = ".."]`). Inline modules are walked in place. Module files that
//! do not exist are skipped with a warning, so `#[cfg]`-gated modules do not fail a scan.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{Fields, ImplItem, Item, ItemImpl, ItemMod, ItemStruct};

use super::attrs::{Placement, parse_markers};
use super::errors::FrontendError;
use crate::model::markers::{Marker, Parent};
use crate::model::{Annotation, FieldElement, MethodElement, Receiver, Superclass, TypeElement, Visibility};

/// One `struct` with named fields, as declared in source.
#[derive(Debug, Clone)]
struct StructDecl {
    name: String,
    namespace: Option<String>,
    visibility: Visibility,
    generic: bool,
    annotations: Vec<Annotation>,
    fields: Vec<FieldElement>,
    /// The `#[parent]` field.
    parent: Option<ParentField>,
    methods: Vec<MethodElement>,
}

impl StructDecl {
    fn qualified_name(&self) -> String {
        qualify(self.namespace.as_deref(), &self.name)
    }
}

fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{ns}::{name}"),
        None => name.to_string(),
    }
}

#[derive(Debug, Clone)]
struct ParentField {
    name: String,
    /// Type path as written.
    ty: String,
    visibility: Visibility,
}

/// An `impl` block waiting for its self type to be resolved.
struct PendingImpl {
    namespace: Option<String>,
    self_ty: Vec<String>,
    methods: Vec<MethodElement>,
}

#[derive(Debug, Default)]
struct UniverseData {
    /// Declarations in discovery order.
    structs: Vec<Rc<StructDecl>>,
    by_name: HashMap<String, usize>,
    files: Vec<PathBuf>,
}

impl UniverseData {
    fn get(&self, qualified: &str) -> Option<&Rc<StructDecl>> {
        self.by_name.get(qualified).map(|&i| &self.structs[i])
    }

    /// Resolve a type path written in module `from` to a declared struct.
    ///
    /// `crate::`, `self::` and `super::` prefixes are honored. Otherwise the path is tried relative to `from`, then
    /// from the crate root, and a single segment finally falls back to the unique struct with that simple name.
    fn resolve(&self, from: Option<&str>, segments: &[String]) -> Option<&Rc<StructDecl>> {
        let (first, rest) = segments.split_first()?;
        let mut base: Vec<String> = from.map(|ns| ns.split("::").map(str::to_string).collect()).unwrap_or_default();

        match first.as_str() {
            "crate" => return self.get(&rest.join("::")),
            "self" => return self.get(&[base, rest.to_vec()].concat().join("::")),
            "super" => {
                let mut rest = rest;
                base.pop();
                while let Some((next, tail)) = rest.split_first() {
                    if next != "super" {
                        break;
                    }
                    base.pop();
                    rest = tail;
                }
                return self.get(&[base, rest.to_vec()].concat().join("::"));
            }
            _ => {}
        }

        let relative = [base, segments.to_vec()].concat().join("::");
        if let Some(found) = self.get(&relative).or_else(|| self.get(&segments.join("::"))) {
            return Some(found);
        }
        if rest.is_empty() {
            let mut matches = self.structs.iter().filter(|s| &s.name == first);
            if let (Some(only), None) = (matches.next(), matches.next()) {
                return Some(only);
            }
        }
        None
    }
}

/// All struct declarations of a scanned crate.
#[derive(Debug, Clone)]
pub struct SourceUniverse {
    data: Rc<UniverseData>,
}

impl SourceUniverse {
    /// Scan a crate. `root` is a directory containing `lib.rs` or `main.rs`, or a single `.rs` file.
    pub fn load(root: &Path) -> Result<Self, FrontendError> {
        let entry = if root.is_dir() {
            ["lib.rs", "main.rs"]
                .iter()
                .map(|name| root.join(name))
                .find(|candidate| candidate.is_file())
                .ok_or_else(|| FrontendError::NoCrateRoot { dir: root.to_path_buf() })?
        } else {
            root.to_path_buf()
        };

        let mut loader = Loader::default();
        let mod_dir = entry.parent().map(Path::to_path_buf);
        loader.load_file(&entry, None, mod_dir)?;
        Ok(loader.finish())
    }

    /// Scan a single in-memory source. External `mod x;` declarations are skipped.
    pub fn from_source(name: &str, source: &str) -> Result<Self, FrontendError> {
        let mut loader = Loader::default();
        loader.load_source(Path::new(name), source, None, None)?;
        Ok(loader.finish())
    }

    /// Every declared struct, in discovery order.
    pub fn elements(&self) -> Vec<Rc<dyn TypeElement>> {
        self.data.structs.iter().map(|decl| self.element_for(decl)).collect()
    }

    /// Look a struct up by qualified name, or by simple name when that is unique.
    pub fn element(&self, name: &str) -> Option<Rc<dyn TypeElement>> {
        let segments: Vec<String> = name.split("::").map(str::to_string).collect();
        self.data
            .get(name)
            .or_else(|| self.data.resolve(None, &segments))
            .map(|decl| self.element_for(decl))
    }

    pub fn qualified_names(&self) -> Vec<String> {
        self.data.structs.iter().map(|decl| decl.qualified_name()).collect()
    }

    /// Files read while scanning.
    pub fn files(&self) -> &[PathBuf] {
        &self.data.files
    }

    pub fn len(&self) -> usize {
        self.data.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.structs.is_empty()
    }

    fn element_for(&self, decl: &Rc<StructDecl>) -> Rc<dyn TypeElement> {
        Rc::new(SourceElement {
            data: Rc::clone(&self.data),
            decl: Rc::clone(decl),
        })
    }
}

/// [`TypeElement`] over a parsed struct declaration.
struct SourceElement {
    data: Rc<UniverseData>,
    decl: Rc<StructDecl>,
}

impl TypeElement for SourceElement {
    fn simple_name(&self) -> String {
        self.decl.name.clone()
    }

    fn namespace(&self) -> Option<String> {
        self.decl.namespace.clone()
    }

    fn visibility(&self) -> Visibility {
        self.decl.visibility
    }

    fn is_generic(&self) -> bool {
        self.decl.generic
    }

    fn annotations(&self) -> Vec<Annotation> {
        self.decl.annotations.clone()
    }

    fn declared_fields(&self) -> Vec<FieldElement> {
        self.decl.fields.clone()
    }

    fn declared_methods(&self) -> Vec<MethodElement> {
        self.decl.methods.clone()
    }

    fn superclass(&self) -> Option<Superclass> {
        let parent_field = self.decl.parent.as_ref()?;
        let segments = path_segments_of(&parent_field.ty);
        match self.data.resolve(self.decl.namespace.as_deref(), &segments) {
            Some(parent) => Some(Superclass {
                via: parent_field.name.clone(),
                visibility: parent_field.visibility,
                element: Rc::new(SourceElement {
                    data: Rc::clone(&self.data),
                    decl: Rc::clone(parent),
                }),
            }),
            None => {
                tracing::warn!(
                    target_type = %self.decl.qualified_name(),
                    parent = %parent_field.ty,
                    "parent type is not declared in the scanned sources; ending the ancestor chain"
                );
                None
            }
        }
    }
}

#[derive(Default)]
struct Loader {
    data: UniverseData,
    impls: Vec<PendingImpl>,
}

impl Loader {
    fn load_file(
        &mut self,
        path: &Path,
        namespace: Option<String>,
        mod_dir: Option<PathBuf>,
    ) -> Result<(), FrontendError> {
        let source = fs::read_to_string(path).map_err(|e| FrontendError::io(path, e))?;
        self.data.files.push(path.to_path_buf());
        self.load_source(path, &source, namespace, mod_dir)
    }

    fn load_source(
        &mut self,
        path: &Path,
        source: &str,
        namespace: Option<String>,
        mod_dir: Option<PathBuf>,
    ) -> Result<(), FrontendError> {
        let file = syn::parse_file(source).map_err(|e| FrontendError::parse(path, source, &e))?;
        tracing::debug!(path = %path.display(), namespace = ?namespace, "scanning source file");
        let ctx = FileContext { path, source };
        self.collect_items(&ctx, &file.items, namespace, mod_dir)
    }

    fn collect_items(
        &mut self,
        ctx: &FileContext<'_>,
        items: &[Item],
        namespace: Option<String>,
        mod_dir: Option<PathBuf>,
    ) -> Result<(), FrontendError> {
        for item in items {
            match item {
                Item::Struct(item) => self.collect_struct(ctx, item, namespace.as_deref())?,
                Item::Impl(item) => self.collect_impl(item, namespace.as_deref()),
                Item::Mod(item) => self.collect_mod(ctx, item, namespace.as_deref(), mod_dir.as_deref())?,
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_mod(
        &mut self,
        ctx: &FileContext<'_>,
        item: &ItemMod,
        namespace: Option<&str>,
        mod_dir: Option<&Path>,
    ) -> Result<(), FrontendError> {
        let name = item.ident.unraw().to_string();
        let child_ns = Some(qualify(namespace, &name));

        if let Some((_, items)) = &item.content {
            let child_dir = mod_dir.map(|dir| dir.join(&name));
            return self.collect_items(ctx, items, child_ns, child_dir);
        }

        let Some(dir) = mod_dir else {
            tracing::warn!(module = %name, "out-of-line module in an in-memory source; skipping");
            return Ok(());
        };
        let candidates = match path_attribute(item) {
            Some(explicit) => {
                let file = match ctx.path.parent() {
                    Some(parent) => parent.join(&explicit),
                    None => PathBuf::from(&explicit),
                };
                vec![file]
            }
            None => vec![dir.join(format!("{name}.rs")), dir.join(&name).join("mod.rs")],
        };
        let Some(file) = candidates.into_iter().find(|c| c.is_file()) else {
            tracing::warn!(module = %name, dir = %dir.display(), "module file not found; skipping");
            return Ok(());
        };
        // Children of `foo/mod.rs` live next to it; children of `foo.rs` live in `foo/`.
        let child_dir = if file.file_name().is_some_and(|f| f == "mod.rs") {
            file.parent().map(Path::to_path_buf)
        } else {
            file.parent().map(|p| p.join(&name))
        };
        self.load_file(&file, child_ns, child_dir)
    }

    fn collect_struct(
        &mut self,
        ctx: &FileContext<'_>,
        item: &ItemStruct,
        namespace: Option<&str>,
    ) -> Result<(), FrontendError> {
        let annotations = parse_markers(&item.attrs, Placement::Type).map_err(|e| ctx.marker_error(&e))?;
        let name = item.ident.unraw().to_string();

        let mut fields = Vec::new();
        let mut parent = None;
        match &item.fields {
            Fields::Named(named) => {
                for field in &named.named {
                    let Some(ident) = &field.ident else { continue };
                    let field_name = ident.unraw().to_string();
                    let markers = parse_markers(&field.attrs, Placement::Field).map_err(|e| ctx.marker_error(&e))?;
                    if markers.iter().any(|a| a.name() == Parent::NAME) {
                        if parent.is_some() {
                            let err = syn::Error::new_spanned(field, "only one field may be marked `#[parent]`");
                            return Err(ctx.marker_error(&err));
                        }
                        parent = Some(ParentField {
                            name: field_name,
                            ty: type_text(&field.ty),
                            visibility: visibility_of(&field.vis),
                        });
                        continue;
                    }
                    fields.push(FieldElement {
                        name: field_name,
                        ty: type_text(&field.ty),
                        visibility: visibility_of(&field.vis),
                        annotations: markers,
                    });
                }
            }
            Fields::Unit => {}
            Fields::Unnamed(_) => {
                if !annotations.is_empty() {
                    tracing::warn!(name = %name, "tuple structs have no named fields; markers ignored");
                }
                return Ok(());
            }
        }

        let decl = StructDecl {
            name,
            namespace: namespace.map(str::to_string),
            visibility: visibility_of(&item.vis),
            generic: !item.generics.params.is_empty(),
            annotations,
            fields,
            parent,
            methods: Vec::new(),
        };
        let qualified = decl.qualified_name();
        if self.data.by_name.contains_key(&qualified) {
            tracing::warn!(name = %qualified, "struct declared twice; keeping the first declaration");
            return Ok(());
        }
        self.data.by_name.insert(qualified, self.data.structs.len());
        self.data.structs.push(Rc::new(decl));
        Ok(())
    }

    fn collect_impl(&mut self, item: &ItemImpl, namespace: Option<&str>) {
        if item.trait_.is_some() {
            return;
        }
        let syn::Type::Path(self_ty) = item.self_ty.as_ref() else {
            return;
        };
        let methods = item
            .items
            .iter()
            .filter_map(|member| match member {
                ImplItem::Fn(f) => method_element(f),
                _ => None,
            })
            .collect();
        self.impls.push(PendingImpl {
            namespace: namespace.map(str::to_string),
            self_ty: self_ty.path.segments.iter().map(|s| s.ident.unraw().to_string()).collect(),
            methods,
        });
    }

    /// Attach every inherent impl to the struct it implements.
    fn finish(mut self) -> SourceUniverse {
        let mut attached: HashMap<String, Vec<MethodElement>> = HashMap::new();
        for pending in std::mem::take(&mut self.impls) {
            match self.data.resolve(pending.namespace.as_deref(), &pending.self_ty) {
                Some(decl) => attached
                    .entry(decl.qualified_name())
                    .or_default()
                    .extend(pending.methods),
                None => tracing::debug!(self_ty = %pending.self_ty.join("::"), "impl for an unscanned type"),
            }
        }
        for decl in &mut self.data.structs {
            if let Some(methods) = attached.remove(&decl.qualified_name()) {
                Rc::make_mut(decl).methods.extend(methods);
            }
        }
        SourceUniverse {
            data: Rc::new(self.data),
        }
    }
}

struct FileContext<'a> {
    path: &'a Path,
    source: &'a str,
}

impl FileContext<'_> {
    fn marker_error(&self, err: &syn::Error) -> FrontendError {
        FrontendError::marker(self.path, self.source, err)
    }
}

/// `#[path = "file.rs"]`
fn path_attribute(item: &ItemMod) -> Option<String> {
    item.attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("path") {
            return None;
        }
        match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        }
    })
}

fn method_element(f: &syn::ImplItemFn) -> Option<MethodElement> {
    let sig = &f.sig;
    if sig.asyncness.is_some() || sig.unsafety.is_some() {
        return None;
    }
    let receiver = match sig.receiver() {
        None => Receiver::None,
        Some(r) => match (&r.reference, r.mutability.is_some(), r.ty.as_ref()) {
            (Some(_), true, _) => Receiver::RefMut,
            (Some(_), false, _) => Receiver::Ref,
            (None, _, syn::Type::Reference(reference)) if r.colon_token.is_some() => {
                if reference.mutability.is_some() {
                    Receiver::RefMut
                } else {
                    Receiver::Ref
                }
            }
            (None, _, _) => Receiver::Value,
        },
    };
    let params = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            syn::FnArg::Typed(pat) => Some(type_text(&pat.ty)),
            syn::FnArg::Receiver(_) => None,
        })
        .collect();
    let return_type = match &sig.output {
        syn::ReturnType::Default => None,
        syn::ReturnType::Type(_, ty) => Some(type_text(ty)).filter(|t| t != "()"),
    };
    Some(MethodElement {
        name: sig.ident.unraw().to_string(),
        receiver,
        params,
        return_type,
        visibility: visibility_of(&f.vis),
        annotations: Vec::new(),
    })
}

fn visibility_of(vis: &syn::Visibility) -> Visibility {
    match vis {
        syn::Visibility::Public(_) => Visibility::Public,
        syn::Visibility::Inherited => Visibility::Private,
        syn::Visibility::Restricted(restricted) => {
            if restricted.path.is_ident("crate") {
                Visibility::Crate
            } else if restricted.path.is_ident("self") {
                Visibility::Private
            } else {
                Visibility::Module
            }
        }
    }
}

/// Whitespace-normalized type text: token spacing is dropped except between two word characters.
pub fn type_text(ty: &syn::Type) -> String {
    normalize_tokens(&ty.to_token_stream().to_string())
}

pub fn normalize_tokens(text: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '\'';
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && out.chars().last().is_some_and(is_word) && is_word(c) {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Path segments of a type written as text, without generic arguments.
fn path_segments_of(ty: &str) -> Vec<String> {
    match syn::parse_str::<syn::TypePath>(ty) {
        Ok(path) => path.path.segments.iter().map(|s| s.ident.unraw().to_string()).collect(),
        Err(_) => Vec::new(),
    }
}
