/* Minimal C# syntax tree for generated sources.

   Only the shapes the generator emits are modelled. Type text is carried as
   already-canonical strings; identifiers and string literals are escaped by
   the printer. */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/* Piece of an interpolated string literal */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpolation {
    Text(String),
    Hole(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /* Identifier, keyword or already-qualified name */
    Name(String),
    Member(Box<Expr>, String),
    Call(Box<Expr>, Vec<Expr>),
    New(String, Vec<Expr>),
    Default,
    Int(usize),
    Str(String),
    Interpolated(Vec<Interpolation>),
    Throw(Box<Expr>),
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Self {
        Expr::Member(Box::new(target), name.into())
    }

    pub fn call(target: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(Box::new(target), args)
    }

    pub fn throw(value: Expr) -> Self {
        Expr::Throw(Box::new(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /* `Type name` or `Type _` */
    Declaration(String, Option<String>),
    Constant(Expr),
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchArm {
    pub pattern: Pattern,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Assign(Expr, Expr),
    Expr(Expr),
    Return(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /* Signature only: `;` */
    None,
    Expression(Expr),
    Switch(Expr, Vec<SwitchArm>),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub modifiers: Vec<String>,
    pub return_type: String,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub modifiers: Vec<String>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub modifiers: Vec<String>,
    /* `class`, `record struct`, `interface`, ... */
    pub keyword: String,
    pub name: String,
    pub type_parameters: Vec<String>,
    /* Positional record parameters */
    pub primary_parameters: Option<Vec<Parameter>>,
    pub base_types: Vec<String>,
    pub members: Vec<Member>,
}

impl TypeDeclaration {
    pub fn new(modifiers: &[&str], keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            keyword: keyword.into(),
            name: name.into(),
            type_parameters: Vec::new(),
            primary_parameters: None,
            base_types: Vec::new(),
            members: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field {
        modifiers: Vec<String>,
        ty: String,
        name: String,
    },
    /* Get-only auto property */
    Property {
        modifiers: Vec<String>,
        ty: String,
        name: String,
    },
    Constructor(Constructor),
    Method(Method),
    Type(TypeDeclaration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    /* None for the compilation unit */
    pub name: Option<String>,
    pub usings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub header_comment: Option<String>,
    /* Outer to inner */
    pub scopes: Vec<NamespaceScope>,
    /* Emit a single named scope as `namespace X;` */
    pub file_scoped: bool,
    /* Members of the innermost scope */
    pub members: Vec<Member>,
}
