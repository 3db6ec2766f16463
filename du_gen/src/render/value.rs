/* Value-type layout: one flat struct with a tag and shared backing fields.

   Case parameters are pooled by declared type. The Nth parameter of a given
   type within a case (counting in parameter order) lives in the Nth backing
   field of that type, so cases alias each other's storage. Slots are
   numbered in first-use order: case order, then parameter order. */

use indexmap::IndexMap;
use std::collections::HashMap;

use super::syntax::*;
use super::{
    case_text, factory_method, func_type, match_method, to_string_method, unknown_case_helper,
    LayoutOutput, SharedNames,
};
use crate::model::DiscriminatedUnionTypeInfo;
use crate::names::{to_pascal_case, type_stem, NameAllocator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub tag: String,
    pub slots: Vec<FieldSlot>,
    /* Per case, per parameter: index into `slots` */
    pub case_slots: Vec<Vec<usize>>,
}

pub fn layout(info: &DiscriminatedUnionTypeInfo, names: &mut NameAllocator) -> FieldLayout {
    let tag = names.allocate("_tag");
    let mut table: IndexMap<(String, usize), String> = IndexMap::new();
    let mut case_slots = Vec::with_capacity(info.cases.len());

    for case in &info.cases {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        let mut slots = Vec::with_capacity(case.parameters.len());
        for parameter in &case.parameters {
            let occurrence = occurrences.entry(parameter.ty.as_str()).or_insert(0);
            let key = (parameter.ty.clone(), *occurrence);
            *occurrence += 1;

            let index = match table.get_index_of(&key) {
                Some(index) => index,
                None => {
                    let name = names.allocate(&format!("_{}{}", type_stem(&key.0), key.1));
                    table.insert_full(key, name).0
                }
            };
            slots.push(index);
        }
        case_slots.push(slots);
    }

    FieldLayout {
        tag,
        slots: table
            .into_iter()
            .map(|((ty, _), name)| FieldSlot { ty, name })
            .collect(),
        case_slots,
    }
}

pub fn render(info: &DiscriminatedUnionTypeInfo, names: &mut NameAllocator) -> LayoutOutput {
    let shared = SharedNames::allocate(names);
    let fields = layout(info, names);
    let slot_name = |index: usize| fields.slots[index].name.clone();

    let mut members = vec![Member::Field {
        modifiers: vec!["private".to_string(), "readonly".to_string()],
        ty: "int".to_string(),
        name: fields.tag.clone(),
    }];
    for slot in &fields.slots {
        members.push(Member::Field {
            modifiers: vec!["private".to_string(), "readonly".to_string()],
            ty: slot.ty.clone(),
            name: slot.name.clone(),
        });
    }

    let mut ctor_parameters = vec![Parameter::new("int", fields.tag.clone())];
    ctor_parameters.extend(
        fields
            .slots
            .iter()
            .map(|slot| Parameter::new(slot.ty.clone(), slot.name.clone())),
    );
    members.push(Member::Constructor(Constructor {
        modifiers: vec!["private".to_string()],
        name: info.name.clone(),
        body: ctor_parameters
            .iter()
            .map(|p| {
                Statement::Assign(
                    Expr::member(Expr::name("this"), p.name.clone()),
                    Expr::name(p.name.clone()),
                )
            })
            .collect(),
        parameters: ctor_parameters,
    }));

    for (tag, (case, slots)) in info.cases.iter().zip(&fields.case_slots).enumerate() {
        let mut arguments = vec![Expr::Int(tag)];
        for index in 0..fields.slots.len() {
            let argument = match slots.iter().position(|s| *s == index) {
                Some(parameter) => Expr::name(case.parameters[parameter].name.clone()),
                None => Expr::Default,
            };
            arguments.push(argument);
        }
        members.push(factory_method(
            case,
            Expr::New(info.qualified_name.clone(), arguments),
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
        .zip(&fields.case_slots)
        .enumerate()
        .map(|(tag, (case, slots))| SwitchArm {
            pattern: Pattern::Constant(Expr::Int(tag)),
            value: Expr::call(
                Expr::name(case.name_as_argument.clone()),
                slots.iter().map(|s| Expr::name(slot_name(*s))).collect(),
            ),
        })
        .collect();
    members.push(match_method(&shared, handlers, Expr::name(fields.tag.clone()), arms));

    if info.generate_to_string {
        let arms = info
            .cases
            .iter()
            .zip(&fields.case_slots)
            .enumerate()
            .map(|(tag, (case, slots))| SwitchArm {
                pattern: Pattern::Constant(Expr::Int(tag)),
                value: case_text(
                    &case.name,
                    case.parameters
                        .iter()
                        .zip(slots)
                        .map(|(p, s)| (to_pascal_case(&p.name), Expr::name(slot_name(*s))))
                        .collect(),
                ),
            })
            .collect();
        members.push(to_string_method(false, &shared, Expr::name(fields.tag.clone()), arms));
    }
    members.push(unknown_case_helper(info, &shared));

    LayoutOutput {
        union_members: members,
        file_types: Vec::new(),
    }
}
