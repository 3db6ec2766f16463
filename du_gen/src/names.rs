/* Identifier helpers shared by the extractors and the renderer */

use std::collections::HashSet;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const ACCESSIBILITY_MODIFIERS: &[&str] = &["public", "private", "protected", "internal", "file"];

pub fn is_accessibility_modifier(modifier: &str) -> bool {
    ACCESSIBILITY_MODIFIERS.contains(&modifier)
}

/* Prefix reserved words with `@` */
pub fn escape_keyword(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/* `length` -> `Length`; `@event` -> `Event` */
pub fn to_pascal_case(name: &str) -> String {
    let name = name.strip_prefix('@').unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/* Handler parameter name for a case: `Circle` -> `circle`, `circle` -> `_circle` */
pub fn case_argument_name(case_name: &str) -> String {
    let mut chars = case_name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            escape_keyword(&first.to_lowercase().chain(chars).collect::<String>())
        }
        _ => format!("_{}", case_name),
    }
}

/* Identifier stem for a backing field of the given type text:
   `int` -> `int`, `global::System.Collections.Generic.List<int>` -> `List_int`,
   `int[]` -> `intArray`, `T?` -> `TNullable` */
pub fn type_stem(ty: &str) -> String {
    let ty = ty.strip_prefix("global::").unwrap_or(ty);
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, words: &mut Vec<String>| {
        if !current.is_empty() {
            words.push(std::mem::take(current));
        }
    };

    for c in ty.chars() {
        match c {
            '[' => current.push_str("Array"),
            '?' => current.push_str("Nullable"),
            c if c.is_alphanumeric() || c == '_' => current.push(c),
            '.' | ':' => current.clear(),
            _ => flush(&mut current, &mut words),
        }
    }
    flush(&mut current, &mut words);

    if words.is_empty() {
        "value".to_string()
    } else {
        words.join("_")
    }
}

/* Hands out identifiers that collide neither with user declarations nor with
   each other. Allocation is deterministic for a fixed request order. */
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allocate(&mut self, preferred: &str) -> String {
        let mut candidate = preferred.to_string();
        let mut suffix = 1;
        while self.taken.contains(&candidate) || KEYWORDS.contains(&candidate.as_str()) {
            candidate = format!("{}_{}", preferred, suffix);
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_names() {
        assert_eq!(case_argument_name("Circle"), "circle");
        assert_eq!(case_argument_name("circle"), "_circle");
        assert_eq!(case_argument_name("Default"), "@default");
        assert_eq!(case_argument_name("_Hidden"), "__Hidden");
    }

    #[test]
    fn type_stems() {
        assert_eq!(type_stem("int"), "int");
        assert_eq!(type_stem("global::System.String"), "String");
        assert_eq!(
            type_stem("global::System.Collections.Generic.List<int>"),
            "List_int"
        );
        assert_eq!(type_stem("int[]"), "intArray");
        assert_eq!(type_stem("T?"), "TNullable");
        assert_eq!(type_stem("(int, string)"), "int_string");
    }

    #[test]
    fn allocator_skips_taken_names() {
        let mut names = NameAllocator::new(["TResult", "c"]);
        assert_eq!(names.allocate("TResult"), "TResult_1");
        assert_eq!(names.allocate("TResult"), "TResult_2");
        assert_eq!(names.allocate("c"), "c_1");
        assert_eq!(names.allocate("Cases"), "Cases");
        assert_eq!(names.allocate("Cases"), "Cases_1");
        assert_eq!(names.allocate("class"), "class_1");
    }

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("length"), "Length");
        assert_eq!(to_pascal_case("@event"), "Event");
        assert_eq!(to_pascal_case("X"), "X");
    }
}
