/* Immutable description of one discriminated union, ready to render.

   Everything in here is plain data: the renderer never looks back at the
   manifest or the semantic model, only at these values. */

use du_types::TypeKeyword;
use serde_derive::Serialize;
use std::fmt;

/* One enclosing namespace scope with the using directives declared directly in it */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct NamespaceDeclarationInfo {
    /* None for the compilation unit itself */
    pub name: Option<String>,
    pub usings: Vec<String>,
}

/* Header of an enclosing type declaration (or of the union itself) */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TypeHeader {
    pub modifiers: Vec<String>,
    pub keyword: TypeKeyword,
    pub name: String,
    pub type_parameters: Vec<String>,
}

impl TypeHeader {
    pub fn name_with_parameters(&self) -> String {
        if self.type_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}<{}>", self.name, self.type_parameters.join(", "))
        }
    }

    /* Accessibility modifiers as declared, in declaration order */
    pub fn accessibility(&self) -> Vec<String> {
        self.modifiers
            .iter()
            .filter(|m| crate::names::is_accessibility_modifier(m))
            .cloned()
            .collect()
    }
}

impl fmt::Display for TypeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{} ", modifier)?;
        }
        write!(f, "{} {}", self.keyword.as_str(), self.name_with_parameters())
    }
}

/* Nesting context of the marked type */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DeclarationInfo {
    /* Outer to inner; the unnamed compilation-unit scope comes first */
    pub namespaces: Vec<NamespaceDeclarationInfo>,
    /* Outer to inner; the last header is the union itself */
    pub type_headers: Vec<TypeHeader>,
    /* Type parameters of every header, outer to inner */
    pub generic_type_arguments: Vec<String>,
    pub is_value_type: bool,
}

impl DeclarationInfo {
    pub fn union_header(&self) -> &TypeHeader {
        &self.type_headers[self.type_headers.len() - 1]
    }

    pub fn enclosing_headers(&self) -> &[TypeHeader] {
        &self.type_headers[..self.type_headers.len() - 1]
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct UnionCaseParameterInfo {
    /* Fully-qualified type text */
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct UnionCaseInfo {
    pub name: String,
    /* Handler parameter name in Match */
    pub name_as_argument: String,
    /* Case name plus the union's generic argument list, if any */
    pub case_type_name: String,
    pub return_type: String,
    pub accessibility: Vec<String>,
    pub parameters: Vec<UnionCaseParameterInfo>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DiscriminatedUnionTypeInfo {
    pub name: String,
    pub name_with_parameters: String,
    /* `global::Ns.Outer<A>.Union<B>` */
    pub qualified_name: String,
    /* Display name with generic brackets swapped for square ones */
    pub unique_name: String,
    pub declaration: DeclarationInfo,
    pub cases: Vec<UnionCaseInfo>,
    pub generate_to_string: bool,
    /* Identifiers the union already declares; generated names avoid them */
    pub reserved_names: Vec<String>,
}

impl DiscriminatedUnionTypeInfo {
    pub fn file_name(&self) -> String {
        format!("{}.g.cs", self.unique_name)
    }

    pub fn is_record(&self) -> bool {
        self.declaration.union_header().keyword.is_record()
    }

    pub fn is_generic(&self) -> bool {
        !self.declaration.union_header().type_parameters.is_empty()
    }
}

/* `Geometry.Outer<A>` -> `Geometry.Outer[A]` */
pub fn unique_name(display_name: &str) -> String {
    display_name.replace('<', "[").replace('>', "]")
}
