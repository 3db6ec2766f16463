//! Semantic model: type symbols, member lists and fully-qualified type text.
//!
//! Every type declared anywhere in the compilation is indexed by a key built
//! from its namespace and its nesting chain, with generic arity appended to
//! each level (`Geometry.Outer`1.Inner`0`). Partial declarations of the same
//! type share a key, and their members are enumerated part by part in load
//! order so that member order is stable across runs.

use du_types::{MemberDecl, MethodDecl, NameSegment, TupleElement, TypeKeyword, TypeSyntax};
use std::collections::{HashMap, HashSet};

use crate::compilation::{Compilation, SyntaxNode, SyntaxPath};

fn child_key(parent: &str, name: &str, arity: usize) -> String {
    if parent.is_empty() {
        format!("{}`{}", name, arity)
    } else {
        format!("{}.{}`{}", parent, name, arity)
    }
}

fn join_namespace(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UsingDirective {
    Namespace(String),
    Alias { alias: String, target: String },
}

fn parse_using(text: &str) -> Option<UsingDirective> {
    let text = text.trim().trim_end_matches(';').trim();
    let text = text.strip_prefix("global ").unwrap_or(text).trim_start();
    let body = text.strip_prefix("using ")?.trim();
    if body.starts_with("static ") {
        return None;
    }
    match body.split_once('=') {
        Some((alias, target)) => Some(UsingDirective::Alias {
            alias: alias.trim().to_string(),
            target: target.trim().trim_start_matches("global::").to_string(),
        }),
        None => Some(UsingDirective::Namespace(
            body.trim_start_matches("global::").to_string(),
        )),
    }
}

/// One named level of a type's nesting chain.
#[derive(Debug, Clone)]
struct TypeLevel<'a> {
    name: &'a str,
    type_parameters: &'a [String],
}

#[derive(Debug)]
struct TypeEntry<'a> {
    namespace: String,
    levels: Vec<TypeLevel<'a>>,
    /// Every partial declaration, each with the path it was declared at.
    parts: Vec<SyntaxPath<'a>>,
}

/// Lookup context for names used inside a type body.
#[derive(Debug, Clone, Default)]
struct Scope<'a> {
    /// (namespace name, using directives declared there), outermost first.
    namespaces: Vec<(String, &'a [String])>,
    /// Keys of enclosing types, outermost first.
    types: Vec<String>,
    type_parameters: Vec<String>,
}

impl<'a> Scope<'a> {
    fn of_path(path: &SyntaxPath<'a>) -> Self {
        let mut scope = Scope::default();
        let mut namespace = String::new();
        let mut type_key: Option<String> = None;

        for node in path.nodes() {
            match *node {
                SyntaxNode::CompilationUnit(unit) => {
                    scope.namespaces.push((String::new(), &unit.usings));
                }
                SyntaxNode::Namespace(ns) => {
                    /* `namespace A.B` opens A, then A.B; usings belong to A.B */
                    let parts: Vec<&str> = ns.name.split('.').map(str::trim).collect();
                    for (i, part) in parts.iter().enumerate() {
                        namespace = join_namespace(&namespace, part);
                        let usings: &'a [String] = if i + 1 == parts.len() { &ns.usings } else { &[] };
                        scope.namespaces.push((namespace.clone(), usings));
                    }
                }
                SyntaxNode::Type(decl) => {
                    let parent = type_key.clone().unwrap_or_else(|| namespace.clone());
                    let key = child_key(&parent, &decl.name, decl.type_parameters.len());
                    scope.types.push(key.clone());
                    scope.type_parameters.extend(decl.type_parameters.iter().cloned());
                    type_key = Some(key);
                }
            }
        }

        scope
    }
}

/// Parameter of a method symbol, with its type already fully qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub is_static: bool,
    pub is_override: bool,
    pub is_implicitly_declared: bool,
    pub is_partial_definition: bool,
    pub type_parameters: Vec<String>,
    /// Accessibility modifiers as declared (`public`, `protected internal`, ...).
    pub accessibility: Vec<String>,
    pub return_type: String,
    pub parameters: Vec<ParameterSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSymbol {
    Method(MethodSymbol),
    Property { name: String },
    Field { name: String },
    NestedType { name: String },
}

impl MemberSymbol {
    pub fn name(&self) -> &str {
        match self {
            MemberSymbol::Method(m) => &m.name,
            MemberSymbol::Property { name }
            | MemberSymbol::Field { name }
            | MemberSymbol::NestedType { name } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub name: String,
    /// Qualified display form, e.g. `Geometry.Outer<A>.Inner<B>`.
    pub display_name: String,
    pub keyword: TypeKeyword,
    pub type_parameters: Vec<String>,
    /// Members of every partial part, in declaration order.
    pub members: Vec<MemberSymbol>,
}

const ACCESSIBILITY: &[&str] = &["public", "private", "protected", "internal", "file"];

pub struct SemanticModel<'a> {
    types: HashMap<String, TypeEntry<'a>>,
    namespaces: HashSet<String>,
}

impl<'a> SemanticModel<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        let mut types: HashMap<String, TypeEntry<'a>> = HashMap::new();
        let mut namespaces = HashSet::new();
        namespaces.insert(String::new());

        for (_, path) in compilation.type_declarations() {
            let scope = Scope::of_path(&path);
            for (ns, _) in &scope.namespaces {
                namespaces.insert(ns.clone());
            }
            let Some(key) = scope.types.last().cloned() else {
                continue;
            };
            let namespace = scope
                .namespaces
                .last()
                .map(|(ns, _)| ns.clone())
                .unwrap_or_default();
            let levels = path
                .nodes()
                .iter()
                .filter_map(|node| match *node {
                    SyntaxNode::Type(decl) => Some(TypeLevel {
                        name: &decl.name,
                        type_parameters: &decl.type_parameters,
                    }),
                    _ => None,
                })
                .collect();

            types
                .entry(key)
                .or_insert_with(|| TypeEntry {
                    namespace,
                    levels,
                    parts: Vec::new(),
                })
                .parts
                .push(path);
        }

        Self { types, namespaces }
    }

    /// Symbol for the type declaration at the end of `path`.
    pub fn declared_symbol(&self, path: &SyntaxPath<'a>) -> Option<TypeSymbol> {
        let decl = path.type_decl()?;
        let scope = Scope::of_path(path);
        let key = scope.types.last()?;
        let entry = self.types.get(key)?;

        let mut members = Vec::new();
        for part in &entry.parts {
            let Some(part_decl) = part.type_decl() else {
                continue;
            };
            let part_scope = Scope::of_path(part);
            for member in &part_decl.members {
                members.push(self.member_symbol(member, &part_scope));
            }
        }

        Some(TypeSymbol {
            name: decl.name.clone(),
            display_name: TypeSyntax::Named {
                global: false,
                segments: self.display_segments(entry, &[]),
            }
            .to_string(),
            keyword: decl.keyword,
            type_parameters: decl.type_parameters.clone(),
            members,
        })
    }

    /// Fully-qualified form of `text` as seen from inside the type declared at
    /// `path`.
    pub fn qualify_type(&self, text: &str, path: &SyntaxPath<'a>) -> String {
        self.qualify_text(text, &Scope::of_path(path))
    }

    fn member_symbol(&self, member: &MemberDecl, scope: &Scope<'a>) -> MemberSymbol {
        match member {
            MemberDecl::Method(method) => MemberSymbol::Method(self.method_symbol(method, scope)),
            MemberDecl::Property(p) => MemberSymbol::Property {
                name: p.name.clone(),
            },
            MemberDecl::Field(f) => MemberSymbol::Field {
                name: f.name.clone(),
            },
            MemberDecl::Type(t) => MemberSymbol::NestedType {
                name: t.name.clone(),
            },
        }
    }

    fn method_symbol(&self, method: &MethodDecl, scope: &Scope<'a>) -> MethodSymbol {
        let mut method_scope = scope.clone();
        method_scope
            .type_parameters
            .extend(method.type_parameters.iter().cloned());

        MethodSymbol {
            name: method.name.clone(),
            is_static: method.has_modifier("static"),
            is_override: method.has_modifier("override"),
            is_implicitly_declared: method.implicit,
            is_partial_definition: method.is_partial_definition(),
            type_parameters: method.type_parameters.clone(),
            accessibility: method
                .modifiers
                .iter()
                .filter(|m| ACCESSIBILITY.contains(&m.as_str()))
                .cloned()
                .collect(),
            return_type: self.qualify_text(&method.return_type, &method_scope),
            parameters: method
                .parameters
                .iter()
                .map(|p| ParameterSymbol {
                    ty: self.qualify_text(&p.ty, &method_scope),
                    name: p.name.clone(),
                })
                .collect(),
        }
    }

    fn qualify_text(&self, text: &str, scope: &Scope<'a>) -> String {
        match TypeSyntax::parse(text) {
            Ok(ty) => self.qualify(&ty, scope).to_string(),
            Err(err) => {
                tracing::debug!("keeping type text verbatim: {}", err);
                text.to_string()
            }
        }
    }

    fn qualify(&self, ty: &TypeSyntax, scope: &Scope<'a>) -> TypeSyntax {
        match ty {
            TypeSyntax::Predefined(_) => ty.clone(),
            TypeSyntax::Nullable(inner) => TypeSyntax::Nullable(Box::new(self.qualify(inner, scope))),
            TypeSyntax::Array { element, rank } => TypeSyntax::Array {
                element: Box::new(self.qualify(element, scope)),
                rank: *rank,
            },
            TypeSyntax::Tuple(elements) => TypeSyntax::Tuple(
                elements
                    .iter()
                    .map(|e| TupleElement {
                        ty: self.qualify(&e.ty, scope),
                        name: e.name.clone(),
                    })
                    .collect(),
            ),
            TypeSyntax::Named { global, segments } => {
                let segments: Vec<NameSegment> = segments
                    .iter()
                    .map(|s| NameSegment {
                        name: s.name.clone(),
                        arguments: s.arguments.iter().map(|a| self.qualify(a, scope)).collect(),
                    })
                    .collect();

                if let Some(name) = ty.as_simple_name() {
                    if scope.type_parameters.iter().any(|p| p == name) {
                        return ty.clone();
                    }
                }

                let resolved = if *global {
                    self.resolve_global(&segments)
                } else {
                    self.resolve_segments(&segments, scope)
                };

                match resolved {
                    Some(display) => display,
                    None => {
                        tracing::debug!("unresolved type name `{}`", ty);
                        TypeSyntax::Named {
                            global: *global,
                            segments,
                        }
                    }
                }
            }
        }
    }

    /* Resolve `A.B.C` written without `global::` */
    fn resolve_segments(
        &self,
        segments: &[NameSegment],
        scope: &Scope<'a>,
    ) -> Option<TypeSyntax> {
        let first = &segments[0];
        if let Some(key) = self.lookup_simple(&first.name, first.arguments.len(), scope) {
            return self.resolve_nested(&key, &segments[1..], Some(first));
        }

        /* Leading segments name a namespace relative to an enclosing one */
        for split in (1..segments.len()).rev() {
            if segments[..split].iter().any(|s| !s.arguments.is_empty()) {
                continue;
            }
            let relative = segments[..split]
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(".");
            for (ns, _) in scope.namespaces.iter().rev() {
                let candidate = join_namespace(ns, &relative);
                if !self.namespaces.contains(&candidate) {
                    continue;
                }
                if let Some(found) = self.resolve_in_namespace(&candidate, &segments[split..]) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn resolve_global(&self, segments: &[NameSegment]) -> Option<TypeSyntax> {
        for split in (0..segments.len()).rev() {
            if segments[..split].iter().any(|s| !s.arguments.is_empty()) {
                continue;
            }
            let ns = segments[..split]
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(".");
            if !self.namespaces.contains(&ns) {
                continue;
            }
            if let Some(found) = self.resolve_in_namespace(&ns, &segments[split..]) {
                return Some(found);
            }
        }
        None
    }

    fn resolve_in_namespace(
        &self,
        namespace: &str,
        segments: &[NameSegment],
    ) -> Option<TypeSyntax> {
        let first = segments.first()?;
        let key = child_key(namespace, &first.name, first.arguments.len());
        if !self.types.contains_key(&key) {
            return None;
        }
        self.resolve_nested(&key, &segments[1..], Some(first))
    }

    /* Walk the remaining segments through nested types of `key` */
    fn resolve_nested(
        &self,
        key: &str,
        rest: &[NameSegment],
        written: Option<&NameSegment>,
    ) -> Option<TypeSyntax> {
        let mut key = key.to_string();
        for segment in rest {
            let nested = child_key(&key, &segment.name, segment.arguments.len());
            if !self.types.contains_key(&nested) {
                return None;
            }
            key = nested;
        }
        let entry = self.types.get(&key)?;

        /* Arguments written by the user for the trailing levels */
        let mut written_levels: Vec<&NameSegment> = Vec::new();
        written_levels.extend(written);
        written_levels.extend(rest.iter());
        Some(TypeSyntax::Named {
            global: true,
            segments: self.display_segments(entry, &written_levels),
        })
    }

    fn display_segments(
        &self,
        entry: &TypeEntry<'a>,
        written: &[&NameSegment],
    ) -> Vec<NameSegment> {
        let mut segments: Vec<NameSegment> = entry
            .namespace
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| NameSegment {
                name: s.to_string(),
                arguments: Vec::new(),
            })
            .collect();

        /* Levels the user did not write are in scope with their own parameters */
        let implicit = entry.levels.len().saturating_sub(written.len());
        for (i, level) in entry.levels.iter().enumerate() {
            let arguments = if i < implicit {
                level
                    .type_parameters
                    .iter()
                    .map(|p| TypeSyntax::Named {
                        global: false,
                        segments: vec![NameSegment {
                            name: p.clone(),
                            arguments: Vec::new(),
                        }],
                    })
                    .collect()
            } else {
                written[i - implicit].arguments.clone()
            };
            segments.push(NameSegment {
                name: level.name.to_string(),
                arguments,
            });
        }
        segments
    }

    /* C# simple-name lookup: enclosing types first, then namespaces outward */
    fn lookup_simple(&self, name: &str, arity: usize, scope: &Scope<'a>) -> Option<String> {
        for type_key in scope.types.iter().rev() {
            let key = child_key(type_key, name, arity);
            if self.types.contains_key(&key) {
                return Some(key);
            }
        }

        for (ns, usings) in scope.namespaces.iter().rev() {
            let key = child_key(ns, name, arity);
            if self.types.contains_key(&key) {
                return Some(key);
            }
            for directive in usings.iter().filter_map(|u| parse_using(u)) {
                match directive {
                    UsingDirective::Namespace(imported) => {
                        let key = child_key(&imported, name, arity);
                        if self.types.contains_key(&key) {
                            return Some(key);
                        }
                    }
                    UsingDirective::Alias { alias, target } if alias == name && arity == 0 => {
                        let (parent, last) = target.rsplit_once('.').unwrap_or(("", target.as_str()));
                        let key = child_key(parent, last, 0);
                        if self.types.contains_key(&key) {
                            return Some(key);
                        }
                    }
                    UsingDirective::Alias { .. } => {}
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SourceFile;
    use std::path::PathBuf;

    const UNIT: &str = r#"
usings: ["using System;"]
namespaces:
  - name: Lib.Models
    types:
      - name: Point
        keyword: struct
        modifiers: [public]
  - name: App
    usings: ["using Lib.Models;", "using Pt = Lib.Models.Point;"]
    types:
      - name: Outer
        keyword: class
        modifiers: [public, partial]
        type-parameters: [A]
        members:
          - type:
              name: Shape
              keyword: record
              modifiers: [public, abstract, partial]
              type-parameters: [B]
              attributes: [DiscriminatedUnion]
              members:
                - method:
                    name: At
                    modifiers: [public, static, partial]
                    return-type: Shape<B>
                    parameters:
                      - { type: Point, name: point }
                      - { type: "List<A>", name: items }
                      - { type: "Pt[]", name: more }
                      - { type: "B?", name: extra }
                      - { type: int, name: count }
                - property:
                    name: Size
                    type: int
"#;

    fn compilation() -> Compilation {
        let file = SourceFile::parse(&PathBuf::from("unit.du.yaml"), UNIT).unwrap();
        Compilation::new(vec![file])
    }

    #[test]
    fn qualifies_parameter_types() {
        let compilation = compilation();
        let model = SemanticModel::new(&compilation);
        let candidates = compilation.candidates();
        let candidate = &candidates[0];
        let symbol = model.declared_symbol(&candidate.path).unwrap();

        assert_eq!(symbol.display_name, "App.Outer<A>.Shape<B>");
        let MemberSymbol::Method(method) = &symbol.members[0] else {
            panic!("expected method");
        };
        assert_eq!(method.return_type, "global::App.Outer<A>.Shape<B>");
        let types: Vec<&str> = method.parameters.iter().map(|p| p.ty.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "global::Lib.Models.Point",
                "List<A>",
                "global::Lib.Models.Point[]",
                "B?",
                "int",
            ]
        );
        assert_eq!(method.accessibility, vec!["public"]);
        assert!(method.is_partial_definition);
        assert_eq!(symbol.members[1].name(), "Size");
    }

    #[test]
    fn qualifies_namespace_relative_names() {
        let compilation = compilation();
        let model = SemanticModel::new(&compilation);
        let candidates = compilation.candidates();
        let candidate = &candidates[0];
        assert_eq!(
            model.qualify_type("Lib.Models.Point", &candidate.path),
            "global::Lib.Models.Point"
        );
        assert_eq!(
            model.qualify_type("global::Lib.Models.Point", &candidate.path),
            "global::Lib.Models.Point"
        );
        assert_eq!(
            model.qualify_type("Outer<int>.Shape<string>", &candidate.path),
            "global::App.Outer<int>.Shape<string>"
        );
        assert_eq!(model.qualify_type("not a type", &candidate.path), "not a type");
    }

    #[test]
    fn parses_using_directives() {
        assert_eq!(
            parse_using("using System.Text;"),
            Some(UsingDirective::Namespace("System.Text".to_string()))
        );
        assert_eq!(
            parse_using("global using X = global::A.B;"),
            Some(UsingDirective::Alias {
                alias: "X".to_string(),
                target: "A.B".to_string()
            })
        );
        assert_eq!(parse_using("using static System.Math;"), None);
    }
}
