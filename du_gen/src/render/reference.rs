/* Reference-type layout: one sealed implementation type per case.

   Capability style nests the implementations in a private holder class and
   hands match handlers a `Cases.X` interface exposing the case's values.
   Flat style declares the implementations as file-local top-level types and
   hands handlers the stored values directly. */

use super::syntax::*;
use super::{
    case_arguments, case_text, factory_method, func_type, inherited_names, match_method,
    property_names, to_string_method, unknown_case_helper, LayoutOutput, SharedNames,
};
use crate::model::{DiscriminatedUnionTypeInfo, UnionCaseInfo};
use crate::names::{to_pascal_case, NameAllocator};
use crate::options::ReferenceStyle;

pub fn render(
    info: &DiscriminatedUnionTypeInfo,
    style: ReferenceStyle,
    names: &mut NameAllocator,
) -> LayoutOutput {
    let shared = SharedNames::allocate(names);
    match style {
        ReferenceStyle::Capability => render_capability(info, &shared, names),
        ReferenceStyle::Flat => render_flat(info, &shared),
    }
}

fn render_capability(
    info: &DiscriminatedUnionTypeInfo,
    shared: &SharedNames,
    names: &mut NameAllocator,
) -> LayoutOutput {
    let cases_name = names.allocate("Cases");
    let implementations_name = names.allocate("Implementations");
    let implementation = |case: &UnionCaseInfo| format!("{}.{}", implementations_name, case.name);
    let capability = |case: &UnionCaseInfo| format!("{}.{}", cases_name, case.name);
    let properties = case_properties(
        info,
        &[
            shared.unknown_case.as_str(),
            cases_name.as_str(),
            implementations_name.as_str(),
        ],
    );

    let mut members = Vec::new();
    for case in &info.cases {
        members.push(factory_method(
            case,
            Expr::New(implementation(case), case_arguments(case)),
        ));
    }

    let handlers = info
        .cases
        .iter()
        .map(|case| {
            Parameter::new(
                func_type(&[capability(case)], &shared.result_type),
                case.name_as_argument.clone(),
            )
        })
        .collect();
    let arms = info
        .cases
        .iter()
        .map(|case| SwitchArm {
            pattern: Pattern::Declaration(implementation(case), Some(shared.binding.clone())),
            value: Expr::call(
                Expr::name(case.name_as_argument.clone()),
                vec![Expr::name(shared.binding.clone())],
            ),
        })
        .collect();
    members.push(match_method(shared, handlers, Expr::name("this"), arms));

    if info.generate_to_string {
        members.push(to_string(info, shared, &properties, implementation));
    }
    members.push(unknown_case_helper(info, shared));

    let mut cases_class = TypeDeclaration::new(&["public", "static"], "class", cases_name.clone());
    for (case, case_properties) in info.cases.iter().zip(&properties) {
        let mut interface = TypeDeclaration::new(&["public"], "interface", case.name.clone());
        for (parameter, property) in case.parameters.iter().zip(case_properties) {
            interface.members.push(Member::Property {
                modifiers: Vec::new(),
                ty: parameter.ty.clone(),
                name: property.clone(),
            });
        }
        cases_class.members.push(Member::Type(interface));
    }
    members.push(Member::Type(cases_class));

    let mut holder = TypeDeclaration::new(&["private", "static"], "class", implementations_name.clone());
    for (case, case_properties) in info.cases.iter().zip(&properties) {
        let mut decl = implementation_type(
            info,
            case,
            case_properties,
            &["public", "sealed"],
            case.name.clone(),
        );
        decl.base_types = vec![info.qualified_name.clone(), capability(case)];
        holder.members.push(Member::Type(decl));
    }
    members.push(Member::Type(holder));

    LayoutOutput {
        union_members: members,
        file_types: Vec::new(),
    }
}

fn render_flat(info: &DiscriminatedUnionTypeInfo, shared: &SharedNames) -> LayoutOutput {
    let implementation = |case: &UnionCaseInfo| case.case_type_name.clone();
    let properties = case_properties(info, &[shared.unknown_case.as_str()]);

    let mut members = Vec::new();
    for case in &info.cases {
        members.push(factory_method(
            case,
            Expr::New(implementation(case), case_arguments(case)),
        ));
    }

    let handlers = info
        .cases
        .iter()
        .map(|case| {
            let types: Vec<String> = case.parameters.iter().map(|p| p.ty.clone()).collect();
            Parameter::new(func_type(&types, &shared.result_type), case.name_as_argument.clone())
        })
        .collect();
    let arms = info
        .cases
        .iter()
        .zip(&properties)
        .map(|(case, case_properties)| {
            let values = case_properties
                .iter()
                .map(|property| Expr::member(Expr::name(shared.binding.clone()), property.clone()))
                .collect();
            SwitchArm {
                pattern: binding_pattern(implementation(case), case, shared),
                value: Expr::call(Expr::name(case.name_as_argument.clone()), values),
            }
        })
        .collect();
    members.push(match_method(shared, handlers, Expr::name("this"), arms));

    if info.generate_to_string {
        members.push(to_string(info, shared, &properties, implementation));
    }
    members.push(unknown_case_helper(info, shared));

    let file_types = info
        .cases
        .iter()
        .zip(&properties)
        .map(|(case, case_properties)| {
            let mut decl =
                implementation_type(info, case, case_properties, &["file", "sealed"], case.name.clone());
            decl.type_parameters = info.declaration.generic_type_arguments.clone();
            decl.base_types = vec![info.qualified_name.clone()];
            Member::Type(decl)
        })
        .collect();

    LayoutOutput {
        union_members: members,
        file_types,
    }
}

/* Property names per case, in case order. Every use of a case's stored
   values goes through this one allocation. */
fn case_properties(info: &DiscriminatedUnionTypeInfo, generated: &[&str]) -> Vec<Vec<String>> {
    let inherited = inherited_names(info, generated);
    info.cases
        .iter()
        .map(|case| property_names(case, &inherited))
        .collect()
}

/* Nullary cases need no binding */
fn binding_pattern(ty: String, case: &UnionCaseInfo, shared: &SharedNames) -> Pattern {
    if case.parameters.is_empty() {
        Pattern::Declaration(ty, None)
    } else {
        Pattern::Declaration(ty, Some(shared.binding.clone()))
    }
}

fn to_string(
    info: &DiscriminatedUnionTypeInfo,
    shared: &SharedNames,
    properties: &[Vec<String>],
    implementation: impl Fn(&UnionCaseInfo) -> String,
) -> Member {
    let arms = info
        .cases
        .iter()
        .zip(properties)
        .map(|(case, case_properties)| {
            let values = case
                .parameters
                .iter()
                .zip(case_properties)
                .map(|(parameter, property)| {
                    (
                        to_pascal_case(&parameter.name),
                        Expr::member(Expr::name(shared.binding.clone()), property.clone()),
                    )
                })
                .collect();
            SwitchArm {
                pattern: binding_pattern(implementation(case), case, shared),
                value: case_text(&case.name, values),
            }
        })
        .collect();
    to_string_method(info.is_record(), shared, Expr::name("this"), arms)
}

/* Sealed record for record unions, sealed class with constructor and get-only
   properties otherwise */
fn implementation_type(
    info: &DiscriminatedUnionTypeInfo,
    case: &UnionCaseInfo,
    properties: &[String],
    modifiers: &[&str],
    name: String,
) -> TypeDeclaration {
    if info.is_record() {
        let mut decl = TypeDeclaration::new(modifiers, "record", name);
        decl.primary_parameters = Some(
            case.parameters
                .iter()
                .zip(properties)
                .map(|(p, property)| Parameter::new(p.ty.clone(), property.clone()))
                .collect(),
        );
        return decl;
    }

    let mut decl = TypeDeclaration::new(modifiers, "class", name.clone());
    if !case.parameters.is_empty() {
        decl.members.push(Member::Constructor(Constructor {
            modifiers: vec!["public".to_string()],
            name,
            parameters: super::case_parameters(case),
            body: case
                .parameters
                .iter()
                .zip(properties)
                .map(|(p, property)| {
                    Statement::Assign(
                        Expr::member(Expr::name("this"), property.clone()),
                        Expr::name(p.name.clone()),
                    )
                })
                .collect(),
        }));
    }
    for (parameter, property) in case.parameters.iter().zip(properties) {
        decl.members.push(Member::Property {
            modifiers: vec!["public".to_string()],
            ty: parameter.ty.clone(),
            name: property.clone(),
        });
    }
    decl
}
