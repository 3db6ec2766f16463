//! Syntax view over the loaded manifests.
//!
//! A [`SyntaxPath`] is the chain of nodes from a compilation unit down to one
//! type declaration. It stands in for the parent pointers of a real syntax
//! tree: walking it backwards visits a declaration and then its ancestors.

use du_types::{NamespaceDecl, SourceUnit, TypeDecl};
use std::path::Path;

use crate::file::SourceFile;

const MARKER_NAMES: &[&str] = &["DiscriminatedUnion", "DiscriminatedUnionAttribute"];

#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'a> {
    CompilationUnit(&'a SourceUnit),
    Namespace(&'a NamespaceDecl),
    Type(&'a TypeDecl),
}

impl<'a> SyntaxNode<'a> {
    /// Using directives that are direct children of this node.
    pub fn child_usings(&self) -> &'a [String] {
        match self {
            SyntaxNode::CompilationUnit(unit) => &unit.usings,
            SyntaxNode::Namespace(ns) => &ns.usings,
            SyntaxNode::Type(_) => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxPath<'a> {
    nodes: Vec<SyntaxNode<'a>>,
}

impl<'a> SyntaxPath<'a> {
    fn root(unit: &'a SourceUnit) -> Self {
        Self {
            nodes: vec![SyntaxNode::CompilationUnit(unit)],
        }
    }

    fn child(&self, node: SyntaxNode<'a>) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(node);
        Self { nodes }
    }

    /// Root-first nodes.
    pub fn nodes(&self) -> &[SyntaxNode<'a>] {
        &self.nodes
    }

    /// The node this path points at, followed by its ancestors up to the root.
    pub fn ancestors_and_self(&self) -> impl Iterator<Item = &SyntaxNode<'a>> {
        self.nodes.iter().rev()
    }

    pub fn node(&self) -> SyntaxNode<'a> {
        self.nodes[self.nodes.len() - 1]
    }

    /// The type declaration this path points at, if it points at one.
    pub fn type_decl(&self) -> Option<&'a TypeDecl> {
        match self.node() {
            SyntaxNode::Type(decl) => Some(decl),
            _ => None,
        }
    }
}

/// A marked type declaration handed to the generator.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// Manifest the declaration came from.
    pub file: &'a Path,
    /// Marker attribute as written.
    pub attribute: &'a str,
    pub path: SyntaxPath<'a>,
}

/// True for `DiscriminatedUnion`, `DiscriminatedUnionAttribute` and their
/// qualified spellings.
pub fn is_marker_attribute(name: &str) -> bool {
    let name = name.trim();
    let name = name.strip_suffix("()").unwrap_or(name);
    let last = name
        .rsplit(|c: char| c == '.' || c == ':')
        .next()
        .unwrap_or(name);
    MARKER_NAMES.contains(&last)
}

/// Every loaded manifest, in load order.
#[derive(Debug, Default)]
pub struct Compilation {
    files: Vec<SourceFile>,
}

impl Compilation {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    /// Syntax paths of every type declaration, nested ones included. Each
    /// scope yields its own types before descending into child namespaces.
    pub fn type_declarations(&self) -> Vec<(&Path, SyntaxPath<'_>)> {
        let mut out = Vec::new();
        for file in &self.files {
            let root = SyntaxPath::root(&file.unit);
            let mut paths = Vec::new();
            collect_scope(&root, &file.unit.types, &file.unit.namespaces, &mut paths);
            out.extend(paths.into_iter().map(|p| (file.path.as_path(), p)));
        }
        out
    }

    /// Marked type declarations, one candidate per marker occurrence.
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        let mut candidates = Vec::new();
        for (file, path) in self.type_declarations() {
            let Some(decl) = path.type_decl() else {
                continue;
            };
            for attribute in decl.attributes.iter().filter(|a| is_marker_attribute(a)) {
                candidates.push(Candidate {
                    file,
                    attribute,
                    path: path.clone(),
                });
            }
        }
        candidates
    }
}

fn collect_scope<'a>(
    scope: &SyntaxPath<'a>,
    types: &'a [TypeDecl],
    namespaces: &'a [NamespaceDecl],
    out: &mut Vec<SyntaxPath<'a>>,
) {
    for decl in types {
        collect_type(scope, decl, out);
    }
    for ns in namespaces {
        let path = scope.child(SyntaxNode::Namespace(ns));
        collect_scope(&path, &ns.types, &ns.namespaces, out);
    }
}

fn collect_type<'a>(scope: &SyntaxPath<'a>, decl: &'a TypeDecl, out: &mut Vec<SyntaxPath<'a>>) {
    let path = scope.child(SyntaxNode::Type(decl));
    out.push(path.clone());
    for nested in decl.nested_types() {
        collect_type(&path, nested, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn compilation(yaml: &str) -> Compilation {
        let file = SourceFile::parse(&PathBuf::from("test.du.yaml"), yaml).unwrap();
        Compilation::new(vec![file])
    }

    #[test]
    fn marker_names() {
        assert!(is_marker_attribute("DiscriminatedUnion"));
        assert!(is_marker_attribute("DiscriminatedUnionAttribute"));
        assert!(is_marker_attribute("CSharp.DiscriminatedUnions.DiscriminatedUnion"));
        assert!(is_marker_attribute("global::CSharp.DiscriminatedUnions.DiscriminatedUnion()"));
        assert!(!is_marker_attribute("Serializable"));
        assert!(!is_marker_attribute("MyDiscriminatedUnion"));
    }

    #[test]
    fn finds_nested_marked_types() {
        let compilation = compilation(
            r#"
types:
  - name: Plain
    keyword: class
namespaces:
  - name: Outer
    types:
      - name: Host
        keyword: class
        modifiers: [partial]
        members:
          - type:
              name: Inner
              keyword: record
              attributes: [DiscriminatedUnion]
"#,
        );

        let all: Vec<String> = compilation
            .type_declarations()
            .iter()
            .filter_map(|(_, p)| p.type_decl().map(|d| d.name.clone()))
            .collect();
        assert_eq!(all, vec!["Plain", "Host", "Inner"]);

        let candidates = compilation.candidates();
        assert_eq!(candidates.len(), 1);
        let path = &candidates[0].path;
        assert_eq!(path.nodes().len(), 4);
        let kinds: Vec<&str> = path
            .ancestors_and_self()
            .map(|n| match n {
                SyntaxNode::CompilationUnit(_) => "unit",
                SyntaxNode::Namespace(_) => "namespace",
                SyntaxNode::Type(_) => "type",
            })
            .collect();
        assert_eq!(kinds, vec!["type", "type", "namespace", "unit"]);
    }
}
