/* Renderer: DiscriminatedUnionTypeInfo -> C# source text.

   Rendering is a total function over the model. The layout modules build
   members for the union body (and, for the flat reference style, file-local
   case types); this module wraps them in the re-emitted namespace and type
   scopes, adds the generic companion class, and prints the tree. */

pub mod reference;
pub mod syntax;
pub mod value;
pub mod writer;

use crate::model::{DiscriminatedUnionTypeInfo, TypeHeader, UnionCaseInfo};
use crate::names::{to_pascal_case, NameAllocator};
use crate::options::GeneratorOptions;
use syntax::*;

pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated />";

/* Members produced by one layout */
#[derive(Debug, Default)]
pub struct LayoutOutput {
    pub union_members: Vec<Member>,
    /* Top-level types placed after the outermost enclosing type */
    pub file_types: Vec<Member>,
}

/* Names every layout needs, allocated in a fixed order */
#[derive(Debug, Clone)]
pub struct SharedNames {
    pub result_type: String,
    pub binding: String,
    pub unknown_case: String,
}

impl SharedNames {
    pub fn allocate(names: &mut NameAllocator) -> Self {
        Self {
            result_type: names.allocate("TResult"),
            binding: names.allocate("c"),
            unknown_case: names.allocate("UnknownCase"),
        }
    }
}

pub fn render(info: &DiscriminatedUnionTypeInfo, options: &GeneratorOptions) -> String {
    writer::print(&compilation_unit(info, options))
}

pub fn compilation_unit(info: &DiscriminatedUnionTypeInfo, options: &GeneratorOptions) -> CompilationUnit {
    let mut names = NameAllocator::new(info.reserved_names.iter().cloned());
    let layout = if info.declaration.is_value_type {
        value::render(info, &mut names)
    } else {
        reference::render(info, options.reference_style, &mut names)
    };

    let mut union_decl = header_declaration(info.declaration.union_header());
    union_decl.members = layout.union_members;

    let mut members = vec![Member::Type(union_decl)];
    if info.is_generic() {
        members.push(Member::Type(companion_class(info)));
    }
    for header in info.declaration.enclosing_headers().iter().rev() {
        let mut decl = header_declaration(header);
        decl.members = members;
        members = vec![Member::Type(decl)];
    }
    members.extend(layout.file_types);

    CompilationUnit {
        header_comment: Some(AUTO_GENERATED_HEADER.to_string()),
        scopes: info
            .declaration
            .namespaces
            .iter()
            .map(|ns| NamespaceScope {
                name: ns.name.clone(),
                usings: ns.usings.clone(),
            })
            .collect(),
        file_scoped: true,
        members,
    }
}

fn header_declaration(header: &TypeHeader) -> TypeDeclaration {
    TypeDeclaration {
        modifiers: header.modifiers.clone(),
        keyword: header.keyword.as_str().to_string(),
        name: header.name.clone(),
        type_parameters: header.type_parameters.clone(),
        primary_parameters: None,
        base_types: Vec::new(),
        members: Vec::new(),
    }
}

pub fn func_type(parameter_types: &[String], result_type: &str) -> String {
    let mut arguments = parameter_types.to_vec();
    arguments.push(result_type.to_string());
    format!("global::System.Func<{}>", arguments.join(", "))
}

pub fn case_parameters(case: &UnionCaseInfo) -> Vec<Parameter> {
    case.parameters
        .iter()
        .map(|p| Parameter::new(p.ty.clone(), p.name.clone()))
        .collect()
}

pub fn case_arguments(case: &UnionCaseInfo) -> Vec<Expr> {
    case.parameters.iter().map(|p| Expr::name(p.name.clone())).collect()
}

/* Members a case type gets from `object`, from record synthesis, and from
   the generated union body */
const INHERITED_MEMBERS: &[&str] = &[
    "Equals",
    "GetHashCode",
    "GetType",
    "MemberwiseClone",
    "ReferenceEquals",
    "Finalize",
    "EqualityContract",
    "PrintMembers",
    "Deconstruct",
    "Match",
    "ToString",
];

/* Names a case type's properties must avoid: everything the union declares
   or generates, since case types derive from it */
pub fn inherited_names(info: &DiscriminatedUnionTypeInfo, generated: &[&str]) -> Vec<String> {
    info.reserved_names
        .iter()
        .cloned()
        .chain(INHERITED_MEMBERS.iter().map(|m| m.to_string()))
        .chain(generated.iter().map(|m| m.to_string()))
        .collect()
}

/* Property names for a case's stored values. Names that would equal the
   case type's own name or an inherited member get a suffix. */
pub fn property_names(case: &UnionCaseInfo, inherited: &[String]) -> Vec<String> {
    let mut names = NameAllocator::new(
        inherited
            .iter()
            .cloned()
            .chain(std::iter::once(case.name.clone())),
    );
    case.parameters
        .iter()
        .map(|p| names.allocate(&to_pascal_case(&p.name)))
        .collect()
}

/* `public static partial Shape Square(int length) => <body>;` */
pub fn factory_method(case: &UnionCaseInfo, body: Expr) -> Member {
    let mut modifiers = case.accessibility.clone();
    modifiers.push("static".to_string());
    modifiers.push("partial".to_string());
    Member::Method(Method {
        modifiers,
        return_type: case.return_type.clone(),
        name: case.name.clone(),
        type_parameters: Vec::new(),
        parameters: case_parameters(case),
        body: Body::Expression(body),
    })
}

pub fn match_method(shared: &SharedNames, handlers: Vec<Parameter>, scrutinee: Expr, mut arms: Vec<SwitchArm>) -> Member {
    arms.push(unknown_case_arm(shared));
    Member::Method(Method {
        modifiers: vec!["public".to_string()],
        return_type: shared.result_type.clone(),
        name: "Match".to_string(),
        type_parameters: vec![shared.result_type.clone()],
        parameters: handlers,
        body: Body::Switch(scrutinee, arms),
    })
}

pub fn to_string_method(sealed: bool, shared: &SharedNames, scrutinee: Expr, mut arms: Vec<SwitchArm>) -> Member {
    arms.push(unknown_case_arm(shared));
    let modifiers: &[&str] = if sealed {
        &["public", "sealed", "override"]
    } else {
        &["public", "override"]
    };
    Member::Method(Method {
        modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        return_type: "string".to_string(),
        name: "ToString".to_string(),
        type_parameters: Vec::new(),
        parameters: Vec::new(),
        body: Body::Switch(scrutinee, arms),
    })
}

/* `"Dot()"` or `$"Rectangle(Length={..}, Width={..})"` */
pub fn case_text(case_name: &str, values: Vec<(String, Expr)>) -> Expr {
    if values.is_empty() {
        return Expr::Str(format!("{}()", case_name));
    }
    let mut pieces = Vec::new();
    let mut text = format!("{}(", case_name);
    for (i, (label, value)) in values.into_iter().enumerate() {
        if i > 0 {
            text.push_str(", ");
        }
        text.push_str(&label);
        text.push('=');
        pieces.push(Interpolation::Text(std::mem::take(&mut text)));
        pieces.push(Interpolation::Hole(value));
    }
    pieces.push(Interpolation::Text(")".to_string()));
    Expr::Interpolated(pieces)
}

fn unknown_case_arm(shared: &SharedNames) -> SwitchArm {
    SwitchArm {
        pattern: Pattern::Discard,
        value: Expr::throw(Expr::call(Expr::name(shared.unknown_case.clone()), Vec::new())),
    }
}

/* Aborts the process; the returned exception only satisfies `throw` */
pub fn unknown_case_helper(info: &DiscriminatedUnionTypeInfo, shared: &SharedNames) -> Member {
    let display = info
        .qualified_name
        .strip_prefix("global::")
        .unwrap_or(&info.qualified_name);
    Member::Method(Method {
        modifiers: vec!["private".to_string(), "static".to_string()],
        return_type: "global::System.Exception".to_string(),
        name: shared.unknown_case.clone(),
        type_parameters: Vec::new(),
        parameters: Vec::new(),
        body: Body::Block(vec![
            Statement::Expr(Expr::call(
                Expr::name("global::System.Environment.FailFast"),
                vec![Expr::Str(format!("Unknown case of discriminated union {}", display))],
            )),
            Statement::Return(Expr::New(
                "global::System.InvalidOperationException".to_string(),
                Vec::new(),
            )),
        ]),
    })
}

fn visible_outside_union(case: &UnionCaseInfo) -> bool {
    case.accessibility.iter().any(|m| m == "public" || m == "internal")
}

/* Non-generic sibling class whose methods declare the union's type
   parameters explicitly, so call sites can infer them */
fn companion_class(info: &DiscriminatedUnionTypeInfo) -> TypeDeclaration {
    let header = info.declaration.union_header();
    let mut modifiers = header.accessibility();
    modifiers.push("static".to_string());

    let mut decl = TypeDeclaration::new(&[], "class", info.name.clone());
    decl.modifiers = modifiers;

    for case in info.cases.iter().filter(|c| visible_outside_union(c)) {
        let mut method_modifiers = case.accessibility.clone();
        method_modifiers.push("static".to_string());
        decl.members.push(Member::Method(Method {
            modifiers: method_modifiers,
            return_type: case.return_type.clone(),
            name: case.name.clone(),
            type_parameters: header.type_parameters.clone(),
            parameters: case_parameters(case),
            body: Body::Expression(Expr::call(
                Expr::member(Expr::name(info.qualified_name.clone()), case.name.clone()),
                case_arguments(case),
            )),
        }));
    }
    decl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::writer::expr_text;

    #[test]
    fn case_text_forms() {
        assert_eq!(expr_text(&case_text("Dot", Vec::new())), r#""Dot()""#);
        let text = case_text(
            "Rectangle",
            vec![
                ("Length".into(), Expr::member(Expr::name("c"), "Length")),
                ("Width".into(), Expr::member(Expr::name("c"), "Width")),
            ],
        );
        assert_eq!(
            expr_text(&text),
            r#"$"Rectangle(Length={c.Length}, Width={c.Width})""#
        );
    }

    #[test]
    fn func_types() {
        assert_eq!(func_type(&[], "TResult"), "global::System.Func<TResult>");
        assert_eq!(
            func_type(&["int".into(), "string".into()], "R"),
            "global::System.Func<int, string, R>"
        );
    }
}
