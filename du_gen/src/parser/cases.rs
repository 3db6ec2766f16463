/* Case extractor: qualifying partial factory declarations become cases */

use du_loader::{MemberSymbol, MethodSymbol, TypeSymbol};

use crate::model::{UnionCaseInfo, UnionCaseParameterInfo};
use crate::names::case_argument_name;

/* Static, signature-only partial method with no type parameters of its own */
pub fn is_case_method(method: &MethodSymbol) -> bool {
    method.is_static && method.is_partial_definition && method.type_parameters.is_empty()
}

/* Cases in member enumeration order */
pub fn extract(symbol: &TypeSymbol, generic_arguments: &[String]) -> Vec<UnionCaseInfo> {
    symbol
        .members
        .iter()
        .filter_map(|member| match member {
            MemberSymbol::Method(method) if is_case_method(method) => {
                Some(case_info(method, generic_arguments))
            }
            _ => None,
        })
        .collect()
}

fn case_info(method: &MethodSymbol, generic_arguments: &[String]) -> UnionCaseInfo {
    let case_type_name = if generic_arguments.is_empty() {
        method.name.clone()
    } else {
        format!("{}<{}>", method.name, generic_arguments.join(", "))
    };

    UnionCaseInfo {
        name: method.name.clone(),
        name_as_argument: case_argument_name(&method.name),
        case_type_name,
        return_type: method.return_type.clone(),
        accessibility: method.accessibility.clone(),
        parameters: method
            .parameters
            .iter()
            .map(|p| UnionCaseParameterInfo {
                ty: p.ty.clone(),
                name: p.name.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use du_loader::ParameterSymbol;
    use du_types::TypeKeyword;

    fn method(name: &str, is_static: bool, partial_definition: bool, type_params: &[&str]) -> MemberSymbol {
        MemberSymbol::Method(MethodSymbol {
            name: name.to_string(),
            is_static,
            is_override: false,
            is_implicitly_declared: false,
            is_partial_definition: partial_definition,
            type_parameters: type_params.iter().map(|s| s.to_string()).collect(),
            accessibility: vec!["public".to_string()],
            return_type: "global::Result<T>".to_string(),
            parameters: vec![ParameterSymbol {
                ty: "T".to_string(),
                name: "value".to_string(),
            }],
        })
    }

    #[test]
    fn keeps_only_qualifying_methods_in_order() {
        let symbol = TypeSymbol {
            name: "Result".to_string(),
            display_name: "Result<T>".to_string(),
            keyword: TypeKeyword::Record,
            type_parameters: vec!["T".to_string()],
            members: vec![
                method("Success", true, true, &[]),
                method("Helper", false, true, &[]),
                method("Implemented", true, false, &[]),
                MemberSymbol::Property {
                    name: "Value".to_string(),
                },
                method("Generic", true, true, &["U"]),
                method("failure", true, true, &[]),
            ],
        };

        let cases = extract(&symbol, &["T".to_string()]);
        let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Success", "failure"]);
        assert_eq!(cases[0].name_as_argument, "success");
        assert_eq!(cases[1].name_as_argument, "_failure");
        assert_eq!(cases[0].case_type_name, "Success<T>");
        assert_eq!(cases[0].parameters[0].ty, "T");
    }

    #[test]
    fn non_generic_case_type_name_is_the_case_name() {
        let symbol = TypeSymbol {
            name: "Shape".to_string(),
            display_name: "Shape".to_string(),
            keyword: TypeKeyword::Class,
            type_parameters: Vec::new(),
            members: vec![method("Dot", true, true, &[])],
        };
        assert_eq!(extract(&symbol, &[])[0].case_type_name, "Dot");
    }
}
