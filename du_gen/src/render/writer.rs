/* Printer for the C# syntax tree.

   Layout is fixed: four-space indentation, braces on their own lines, one
   blank line between members (consecutive fields or properties stay
   together). Printing the same tree always yields the same bytes. */

use super::syntax::*;

const INDENT: &str = "    ";
const MAX_INLINE_SIGNATURE: usize = 100;

#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    level: usize,
    pending_blank: bool,
    last_line_opened: bool,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) {
        if self.pending_blank && !self.output.is_empty() && !self.last_line_opened {
            self.output.push('\n');
        }
        self.pending_blank = false;
        for _ in 0..self.level {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
        self.last_line_opened = text == "{";
    }

    /* Request a blank line before the next line, unless a block was just opened */
    pub fn blank(&mut self) {
        self.pending_blank = true;
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn open(&mut self) {
        self.line("{");
        self.indent();
    }

    pub fn close(&mut self, closing: &str) {
        self.pending_blank = false;
        self.dedent();
        self.line(closing);
    }

    pub fn finish(self) -> String {
        self.output
    }
}

pub fn print(unit: &CompilationUnit) -> String {
    let mut w = CodeWriter::new();

    if let Some(comment) = &unit.header_comment {
        w.line(comment);
    }

    let named = unit.scopes.iter().filter(|s| s.name.is_some()).count();
    let file_scoped = unit.file_scoped && named == 1;
    let mut opened = 0;

    for scope in &unit.scopes {
        if let Some(name) = &scope.name {
            w.blank();
            if file_scoped {
                w.line(&format!("namespace {};", name));
                w.blank();
            } else {
                w.line(&format!("namespace {}", name));
                w.open();
                opened += 1;
            }
        }
        for using in &scope.usings {
            w.line(using);
        }
        if !scope.usings.is_empty() {
            w.blank();
        }
    }

    print_members(&mut w, &unit.members);

    for _ in 0..opened {
        w.close("}");
    }

    w.finish()
}

fn print_members(w: &mut CodeWriter, members: &[Member]) {
    let mut previous: Option<&Member> = None;
    for member in members {
        let grouped = matches!(
            (previous, member),
            (Some(Member::Field { .. }), Member::Field { .. })
                | (Some(Member::Property { .. }), Member::Property { .. })
        );
        if !grouped {
            w.blank();
        }
        print_member(w, member);
        previous = Some(member);
    }
}

fn modifier_prefix(modifiers: &[String]) -> String {
    modifiers.iter().map(|m| format!("{} ", m)).collect()
}

fn type_parameter_list(type_parameters: &[String]) -> String {
    if type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", type_parameters.join(", "))
    }
}

fn parameter_text(parameter: &Parameter) -> String {
    format!("{} {}", parameter.ty, parameter.name)
}

/* Signature lines; parameters go one per line when the inline form is too long */
fn signature_lines(head: &str, parameters: &[Parameter]) -> Vec<String> {
    let inline = format!(
        "{}({})",
        head,
        parameters.iter().map(parameter_text).collect::<Vec<_>>().join(", ")
    );
    if parameters.len() < 2 || inline.len() <= MAX_INLINE_SIGNATURE {
        return vec![inline];
    }

    let mut lines = vec![format!("{}(", head)];
    for (i, parameter) in parameters.iter().enumerate() {
        let separator = if i + 1 == parameters.len() { ")" } else { "," };
        lines.push(format!("{}{}{}", INDENT, parameter_text(parameter), separator));
    }
    lines
}

fn print_signature(w: &mut CodeWriter, lines: &[String], suffix: &str) {
    for (i, line) in lines.iter().enumerate() {
        if i + 1 == lines.len() {
            w.line(&format!("{}{}", line, suffix));
        } else {
            w.line(line);
        }
    }
}

fn print_member(w: &mut CodeWriter, member: &Member) {
    match member {
        Member::Field {
            modifiers,
            ty,
            name,
        } => w.line(&format!("{}{} {};", modifier_prefix(modifiers), ty, name)),
        Member::Property {
            modifiers,
            ty,
            name,
        } => w.line(&format!(
            "{}{} {} {{ get; }}",
            modifier_prefix(modifiers),
            ty,
            name
        )),
        Member::Constructor(ctor) => {
            let head = format!("{}{}", modifier_prefix(&ctor.modifiers), ctor.name);
            print_signature(w, &signature_lines(&head, &ctor.parameters), "");
            print_block(w, &ctor.body);
        }
        Member::Method(method) => print_method(w, method),
        Member::Type(decl) => print_type(w, decl),
    }
}

fn print_method(w: &mut CodeWriter, method: &Method) {
    let head = format!(
        "{}{} {}{}",
        modifier_prefix(&method.modifiers),
        method.return_type,
        method.name,
        type_parameter_list(&method.type_parameters)
    );
    let lines = signature_lines(&head, &method.parameters);

    match &method.body {
        Body::None => print_signature(w, &lines, ";"),
        Body::Expression(expr) => {
            print_signature(w, &lines, " =>");
            w.indent();
            w.line(&format!("{};", expr_text(expr)));
            w.dedent();
        }
        Body::Switch(scrutinee, arms) => {
            print_signature(w, &lines, &format!(" => {} switch", expr_text(scrutinee)));
            w.open();
            for arm in arms {
                w.line(&format!(
                    "{} => {},",
                    pattern_text(&arm.pattern),
                    expr_text(&arm.value)
                ));
            }
            w.close("};");
        }
        Body::Block(statements) => {
            print_signature(w, &lines, "");
            print_block(w, statements);
        }
    }
}

fn print_block(w: &mut CodeWriter, statements: &[Statement]) {
    w.open();
    for statement in statements {
        w.line(&statement_text(statement));
    }
    w.close("}");
}

fn print_type(w: &mut CodeWriter, decl: &TypeDeclaration) {
    let mut header = format!(
        "{}{} {}{}",
        modifier_prefix(&decl.modifiers),
        decl.keyword,
        decl.name,
        type_parameter_list(&decl.type_parameters)
    );
    if let Some(parameters) = &decl.primary_parameters {
        header.push('(');
        header.push_str(
            &parameters
                .iter()
                .map(parameter_text)
                .collect::<Vec<_>>()
                .join(", "),
        );
        header.push(')');
    }
    if !decl.base_types.is_empty() {
        header.push_str(" : ");
        header.push_str(&decl.base_types.join(", "));
    }

    if decl.members.is_empty() && decl.primary_parameters.is_some() {
        header.push(';');
        w.line(&header);
        return;
    }

    w.line(&header);
    w.open();
    print_members(w, &decl.members);
    w.close("}");
}

fn statement_text(statement: &Statement) -> String {
    match statement {
        Statement::Assign(target, value) => format!("{} = {};", expr_text(target), expr_text(value)),
        Statement::Expr(expr) => format!("{};", expr_text(expr)),
        Statement::Return(expr) => format!("return {};", expr_text(expr)),
    }
}

fn pattern_text(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Declaration(ty, Some(name)) => format!("{} {}", ty, name),
        Pattern::Declaration(ty, None) => format!("{} _", ty),
        Pattern::Constant(expr) => expr_text(expr),
        Pattern::Discard => "_".to_string(),
    }
}

fn argument_list(args: &[Expr]) -> String {
    args.iter().map(expr_text).collect::<Vec<_>>().join(", ")
}

pub fn expr_text(expr: &Expr) -> String {
    match expr {
        Expr::Name(name) => name.clone(),
        Expr::Member(target, name) => format!("{}.{}", expr_text(target), name),
        Expr::Call(target, args) => format!("{}({})", expr_text(target), argument_list(args)),
        Expr::New(ty, args) => format!("new {}({})", ty, argument_list(args)),
        Expr::Default => "default".to_string(),
        Expr::Int(value) => value.to_string(),
        Expr::Str(text) => format!("\"{}\"", escape_string(text)),
        Expr::Interpolated(pieces) => {
            let mut out = String::from("$\"");
            for piece in pieces {
                match piece {
                    Interpolation::Text(text) => {
                        out.push_str(&escape_string(text).replace('{', "{{").replace('}', "}}"))
                    }
                    Interpolation::Hole(expr) => {
                        out.push('{');
                        out.push_str(&expr_text(expr));
                        out.push('}');
                    }
                }
            }
            out.push('"');
            out
        }
        Expr::Throw(value) => format!("throw {}", expr_text(value)),
    }
}

fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_literals() {
        assert_eq!(expr_text(&Expr::Str("a \"b\" \\".into())), r#""a \"b\" \\""#);
        let interpolated = Expr::Interpolated(vec![
            Interpolation::Text("Set({".into()),
            Interpolation::Hole(Expr::member(Expr::name("c"), "Items")),
            Interpolation::Text("})".into()),
        ]);
        assert_eq!(expr_text(&interpolated), r#"$"Set({{{c.Items}}})""#);
    }

    #[test]
    fn prints_file_scoped_namespace_and_members() {
        let mut record = TypeDeclaration::new(&["public", "sealed"], "record", "Dot");
        record.primary_parameters = Some(Vec::new());
        record.base_types = vec!["global::Demo.Shape".into()];

        let unit = CompilationUnit {
            header_comment: Some("// <auto-generated />".into()),
            scopes: vec![
                NamespaceScope {
                    name: None,
                    usings: vec!["using System;".into()],
                },
                NamespaceScope {
                    name: Some("Demo".into()),
                    usings: Vec::new(),
                },
            ],
            file_scoped: true,
            members: vec![
                Member::Field {
                    modifiers: vec!["private".into()],
                    ty: "int".into(),
                    name: "_a".into(),
                },
                Member::Field {
                    modifiers: vec!["private".into()],
                    ty: "int".into(),
                    name: "_b".into(),
                },
                Member::Type(record),
            ],
        };

        let expected = "\
// <auto-generated />
using System;

namespace Demo;

private int _a;
private int _b;

public sealed record Dot() : global::Demo.Shape;
";
        assert_eq!(print(&unit), expected);
    }

    #[test]
    fn prints_block_namespaces_and_switch_bodies() {
        let mut holder = TypeDeclaration::new(&["partial"], "class", "Holder");
        holder.members.push(Member::Method(Method {
            modifiers: vec!["public".into()],
            return_type: "string".into(),
            name: "Name".into(),
            type_parameters: Vec::new(),
            parameters: vec![Parameter::new("int", "tag")],
            body: Body::Switch(
                Expr::name("tag"),
                vec![
                    SwitchArm {
                        pattern: Pattern::Constant(Expr::Int(0)),
                        value: Expr::Str("zero".into()),
                    },
                    SwitchArm {
                        pattern: Pattern::Discard,
                        value: Expr::throw(Expr::call(Expr::name("Fail"), Vec::new())),
                    },
                ],
            ),
        }));

        let unit = CompilationUnit {
            header_comment: None,
            scopes: vec![
                NamespaceScope {
                    name: None,
                    usings: Vec::new(),
                },
                NamespaceScope {
                    name: Some("A".into()),
                    usings: vec!["using System.Text;".into()],
                },
                NamespaceScope {
                    name: Some("B".into()),
                    usings: Vec::new(),
                },
            ],
            file_scoped: true,
            members: vec![Member::Type(holder)],
        };

        let expected = "\
namespace A
{
    using System.Text;

    namespace B
    {
        partial class Holder
        {
            public string Name(int tag) => tag switch
            {
                0 => \"zero\",
                _ => throw Fail(),
            };
        }
    }
}
";
        assert_eq!(print(&unit), expected);
    }

    #[test]
    fn long_signatures_break_parameters() {
        let lines = signature_lines(
            "public TResult Match<TResult>",
            &[
                Parameter::new("global::System.Func<global::Some.Long.Namespace.Type, TResult>", "first"),
                Parameter::new("global::System.Func<global::Some.Long.Namespace.Other, TResult>", "second"),
            ],
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "public TResult Match<TResult>(");
        assert!(lines[2].ends_with("second)"));
    }
}
