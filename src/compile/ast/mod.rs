use std::fmt;

pub type SourcePos = core::ops::Range<usize>;

/// Base type of a declared entity: one of the built-in scalar kinds or a
/// reference to a user-defined structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Double,
    Bool,
    Str,
    Struct(String),
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Double => write!(f, "double"),
            Self::Bool => write!(f, "bool"),
            Self::Str => write!(f, "string"),
            Self::Struct(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Int(i64, SourcePos),
    Double(f64, SourcePos),
    Bool(bool, SourcePos),
    Str(String, SourcePos),
    Ident(String, SourcePos),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(CallExpr),
    List(Vec<Expr>, SourcePos),
}

impl Expr {
    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    pub fn span(&self) -> SourcePos {
        match self {
            Self::Int(_, span)
            | Self::Double(_, span)
            | Self::Bool(_, span)
            | Self::Str(_, span)
            | Self::Ident(_, span)
            | Self::List(_, span) => span.clone(),
            Self::Binary(_, lhs, rhs) => {
                let SourcePos { start, .. } = lhs.span();
                let SourcePos { end, .. } = rhs.span();

                start..end
            }
            Self::Call(call) => call.span.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    //
    Eq,
    NotEq,
    //
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
        };

        write!(f, "{}", op)
    }
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: String,
    pub args: Vec<Expr>,
    pub span: SourcePos,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Block),
    Decl(VarDecl),
    Assign(String, Expr, SourcePos),
    Return(Expr, SourcePos),
    Call(CallExpr),
}

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// A declared variable. `size` of 1 means a scalar; anything larger means a
/// fixed-size list of `ty`.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: BaseType,
    pub size: usize,
    pub init: Option<Expr>,
    pub span: SourcePos,
}

/// A declared function. A return base of `None` means the function returns
/// nothing; `returns_list` lifts the return base to a list.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub ret: Option<BaseType>,
    pub returns_list: bool,
    pub params: Vec<VarDecl>,
    pub body: Block,
    pub span: SourcePos,
}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<VarDecl>,
    pub span: SourcePos,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Function(FunctionDecl),
    Struct(StructDecl),
}

/// One compilation unit as handed over by the parsing stage.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub decls: Vec<Decl>,
}
