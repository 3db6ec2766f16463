use serde_derive::{Deserialize, Serialize};

/// Keyword introducing a type declaration.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKeyword {
    Class,
    Struct,
    /// `record` or `record class`
    Record,
    RecordStruct,
    Interface,
}

impl TypeKeyword {
    /// Keyword text as it appears in a declaration header.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKeyword::Class => "class",
            TypeKeyword::Struct => "struct",
            TypeKeyword::Record => "record",
            TypeKeyword::RecordStruct => "record struct",
            TypeKeyword::Interface => "interface",
        }
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self, TypeKeyword::Struct | TypeKeyword::RecordStruct)
    }

    pub fn is_record(&self) -> bool {
        matches!(self, TypeKeyword::Record | TypeKeyword::RecordStruct)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterDecl {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// False for signature-only declarations (`static partial Shape Dot();`).
    #[serde(default)]
    pub has_body: bool,
    /// Compiler-synthesized member (e.g. a record's `ToString`).
    #[serde(default)]
    pub implicit: bool,
}

impl MethodDecl {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// A `partial` method declared without a body.
    pub fn is_partial_definition(&self) -> bool {
        self.has_modifier("partial") && !self.has_body
    }
}

/// Property or field declaration. Only the name matters to the generator.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ValueMemberDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum MemberDecl {
    Method(MethodDecl),
    Property(ValueMemberDecl),
    Field(ValueMemberDecl),
    Type(TypeDecl),
}

/* Members are written as singleton maps (`- method: {...}`). The mapping is
   applied per element so that nested type members reuse this same module
   instead of stacking recursive serde adapters. */
mod members {
    use super::MemberDecl;
    use serde::{Deserializer, Serializer};

    #[derive(serde_derive::Serialize)]
    struct EntryRef<'a>(#[serde(with = "serde_yml::with::singleton_map")] &'a MemberDecl);

    #[derive(serde_derive::Deserialize)]
    struct Entry(#[serde(with = "serde_yml::with::singleton_map")] MemberDecl);

    pub fn serialize<S: Serializer>(members: &[MemberDecl], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(members.iter().map(EntryRef))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<MemberDecl>, D::Error> {
        let entries: Vec<Entry> = serde::Deserialize::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|Entry(member)| member).collect())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDecl {
    pub name: String,
    pub keyword: TypeKeyword,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Attribute names as written, e.g. `DiscriminatedUnion` or
    /// `CSharp.DiscriminatedUnions.DiscriminatedUnionAttribute`.
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default, with = "members")]
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|m| match m {
            MemberDecl::Type(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct NamespaceDecl {
    /// Dotted name, e.g. `Geometry.Shapes`.
    pub name: String,
    #[serde(default)]
    pub file_scoped: bool,
    /// Using directives declared directly inside this namespace, verbatim.
    #[serde(default)]
    pub usings: Vec<String>,
    #[serde(default)]
    pub namespaces: Vec<NamespaceDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SourceMetadata {
    /// Logical C# file this manifest describes.
    #[serde(default)]
    pub path: Option<String>,
    /// Other manifests whose declarations belong to the same compilation.
    #[serde(default)]
    pub imports: Vec<String>,
}

/// One compilation unit: the root of every syntax path.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SourceUnit {
    #[serde(default)]
    pub source: SourceMetadata,
    #[serde(default)]
    pub usings: Vec<String>,
    #[serde(default)]
    pub namespaces: Vec<NamespaceDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl SourceUnit {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_members() {
        let unit = SourceUnit::from_yaml(
            r#"
namespaces:
  - name: Geometry
    file-scoped: true
    usings: ["using System;"]
    types:
      - name: Shape
        keyword: record
        modifiers: [public, abstract, partial]
        attributes: [DiscriminatedUnion]
        members:
          - method:
              name: Circle
              modifiers: [public, static, partial]
              return-type: Shape
              parameters:
                - { type: double, name: radius }
          - type:
              name: Helper
              keyword: class
              modifiers: [private]
"#,
        )
        .unwrap();

        let shape = &unit.namespaces[0].types[0];
        assert_eq!(shape.keyword, TypeKeyword::Record);
        assert_eq!(shape.members.len(), 2);
        match &shape.members[0] {
            MemberDecl::Method(m) => {
                assert!(m.is_partial_definition());
                assert_eq!(m.parameters[0].ty, "double");
            }
            other => panic!("unexpected member {:?}", other),
        }
        assert_eq!(shape.nested_types().count(), 1);
    }

    #[test]
    fn parses_members_of_deeply_nested_types() {
        let unit = SourceUnit::from_yaml(
            r#"
types:
  - name: Outer
    keyword: class
    members:
      - type:
          name: Middle
          keyword: struct
          members:
            - type:
                name: Inner
                keyword: record
                members:
                  - method:
                      name: Dot
                      modifiers: [public, static, partial]
                      return-type: Inner
                  - field:
                      name: count
                      type: int
"#,
        )
        .unwrap();

        let middle = unit.types[0].nested_types().next().unwrap();
        let inner = middle.nested_types().next().unwrap();
        assert_eq!(inner.name, "Inner");
        assert_eq!(inner.members.len(), 2);
        assert!(matches!(&inner.members[0], MemberDecl::Method(m) if m.name == "Dot"));
        assert!(matches!(&inner.members[1], MemberDecl::Field(f) if f.ty == "int"));

        let text = serde_yml::to_string(&unit).unwrap();
        assert!(text.contains("- method:"));
        assert_eq!(SourceUnit::from_yaml(&text).unwrap(), unit);
    }

    #[test]
    fn record_struct_is_value_type() {
        assert!(TypeKeyword::RecordStruct.is_value_type());
        assert!(!TypeKeyword::Record.is_value_type());
        assert_eq!(TypeKeyword::RecordStruct.as_str(), "record struct");
    }
}
