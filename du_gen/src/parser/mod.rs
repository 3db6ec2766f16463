/* Model assembly: candidate -> DiscriminatedUnionTypeInfo

   Extraction failures are not errors. A candidate whose symbol cannot be
   resolved, or that declares no cases, simply yields no model. */

pub mod cases;
pub mod declaration;

use du_loader::{Candidate, MemberSymbol, SemanticModel, TypeSymbol};
use indexmap::IndexSet;

use crate::model::{unique_name, DiscriminatedUnionTypeInfo};

pub fn parse(candidate: &Candidate<'_>, semantic: &SemanticModel<'_>) -> Option<DiscriminatedUnionTypeInfo> {
    let Some(symbol) = semantic.declared_symbol(&candidate.path) else {
        tracing::debug!(
            "skipping [{}] in {}: declaration does not resolve to a type",
            candidate.attribute,
            candidate.file.display()
        );
        return None;
    };

    let declaration = declaration::extract(&candidate.path)?;

    let cases = cases::extract(&symbol, &declaration.generic_type_arguments);
    if cases.is_empty() {
        tracing::debug!("skipping {}: no case declarations", symbol.display_name);
        return None;
    }

    let mut reserved: IndexSet<String> = IndexSet::new();
    reserved.extend(symbol.members.iter().map(|m| m.name().to_string()));
    reserved.extend(declaration.generic_type_arguments.iter().cloned());
    reserved.extend(cases.iter().map(|c| c.name_as_argument.clone()));
    reserved.insert(symbol.name.clone());

    let name_with_parameters = declaration.union_header().name_with_parameters();

    Some(DiscriminatedUnionTypeInfo {
        name: symbol.name.clone(),
        name_with_parameters,
        qualified_name: format!("global::{}", symbol.display_name),
        unique_name: unique_name(&symbol.display_name),
        generate_to_string: !overrides_to_string(&symbol),
        reserved_names: reserved.into_iter().collect(),
        declaration,
        cases,
    })
}

/* Only the exact `override string ToString()` written by the user counts */
pub fn overrides_to_string(symbol: &TypeSymbol) -> bool {
    symbol.members.iter().any(|member| match member {
        MemberSymbol::Method(method) => {
            method.is_override
                && !method.is_implicitly_declared
                && method.name == "ToString"
                && method.parameters.is_empty()
        }
        _ => false,
    })
}
