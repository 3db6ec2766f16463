/* Declaration extractor: nesting context of a marked type */

use du_loader::{SyntaxNode, SyntaxPath};

use crate::model::{DeclarationInfo, NamespaceDeclarationInfo, TypeHeader};

/* Walk from the marked declaration out to the compilation unit, then flip
   both accumulated lists so they read outer to inner. Returns None when the
   path does not end in a type declaration. */
pub fn extract(path: &SyntaxPath<'_>) -> Option<DeclarationInfo> {
    let marked = path.type_decl()?;

    let mut namespaces = Vec::new();
    let mut type_headers: Vec<TypeHeader> = Vec::new();

    for node in path.ancestors_and_self() {
        match *node {
            SyntaxNode::CompilationUnit(_) => namespaces.push(NamespaceDeclarationInfo {
                name: None,
                usings: node.child_usings().to_vec(),
            }),
            SyntaxNode::Namespace(ns) => namespaces.push(NamespaceDeclarationInfo {
                name: Some(ns.name.clone()),
                usings: node.child_usings().to_vec(),
            }),
            SyntaxNode::Type(decl) => type_headers.push(TypeHeader {
                modifiers: decl.modifiers.clone(),
                keyword: decl.keyword,
                name: decl.name.clone(),
                type_parameters: decl.type_parameters.clone(),
            }),
        }
    }

    namespaces.reverse();
    type_headers.reverse();

    let generic_type_arguments = type_headers
        .iter()
        .flat_map(|h| h.type_parameters.iter().cloned())
        .collect();

    Some(DeclarationInfo {
        namespaces,
        type_headers,
        generic_type_arguments,
        is_value_type: marked.keyword.is_value_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use du_loader::{Compilation, SourceFile};
    use du_types::TypeKeyword;
    use std::path::PathBuf;

    #[test]
    fn collects_scopes_outer_to_inner() {
        let yaml = r#"
usings: ["using System;"]
namespaces:
  - name: Company.Product
    usings: ["using System.Text;"]
    namespaces:
      - name: Shapes
        usings: ["using System.Linq;"]
        types:
          - name: Outer
            keyword: class
            modifiers: [public, static, partial]
            type-parameters: [A]
            members:
              - type:
                  name: Middle
                  keyword: struct
                  modifiers: [internal, partial]
                  type-parameters: [B, C]
                  members:
                    - type:
                        name: Shape
                        keyword: record
                        modifiers: [public, abstract, partial]
                        type-parameters: [D]
                        attributes: [DiscriminatedUnion]
"#;
        let file = SourceFile::parse(&PathBuf::from("t.du.yaml"), yaml).unwrap();
        let compilation = Compilation::new(vec![file]);
        let candidates = compilation.candidates();
        let info = extract(&candidates[0].path).unwrap();

        let names: Vec<Option<&str>> = info.namespaces.iter().map(|n| n.name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("Company.Product"), Some("Shapes")]);
        assert_eq!(info.namespaces[0].usings, vec!["using System;"]);
        assert_eq!(info.namespaces[2].usings, vec!["using System.Linq;"]);

        let headers: Vec<String> = info.type_headers.iter().map(|h| h.to_string()).collect();
        assert_eq!(
            headers,
            vec![
                "public static partial class Outer<A>",
                "internal partial struct Middle<B, C>",
                "public abstract partial record Shape<D>",
            ]
        );
        assert_eq!(info.generic_type_arguments, vec!["A", "B", "C", "D"]);
        assert_eq!(info.union_header().keyword, TypeKeyword::Record);
        assert!(!info.is_value_type);
    }
}
