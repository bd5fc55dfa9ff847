use thiserror::Error;

use crate::compile::ast::{BaseType, BinaryOp, Program, SourcePos};

pub mod context;
pub mod recursion;
pub mod typecheck;
pub mod types;

pub use context::SemanticContext;
pub use typecheck::Analyzer;
pub use types::Ty;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("Variable {0} is used without being declared.")]
    UndefinedVariable(String, SourcePos),

    #[error("Call to undefined function {0}.")]
    UndefinedFunction(String, SourcePos),

    #[error("Variable with name {0} is already declared in this scope.")]
    DuplicateVariable(String, SourcePos),

    #[error("Function with name {0} is already declared.")]
    DuplicateFunction(String, SourcePos),

    #[error("Structure with name {0} is already declared.")]
    DuplicateStruct(String, SourcePos),

    #[error("Operands of `{op}` have mismatched types. Left is `{lhs}`, but right is `{rhs}`.")]
    BinaryTypeMismatch {
        op: BinaryOp,
        lhs: Ty,
        rhs: Ty,
        span: SourcePos,
    },

    #[error("Cannot assign `{got}` to {name}, which was declared as `{expected}`.")]
    AssignTypeMismatch {
        name: String,
        expected: Ty,
        got: Ty,
        span: SourcePos,
    },

    #[error("Initializer of {name} has type `{got}`, but the declaration says `{expected}`.")]
    InitializerTypeMismatch {
        name: String,
        expected: Ty,
        got: Ty,
        span: SourcePos,
    },

    #[error("Returning `{got}` when a `{expected}` was expected.")]
    ReturnTypeMismatch {
        expected: Ty,
        got: Ty,
        span: SourcePos,
    },

    #[error("Call to {callee} with an invalid number of arguments. {expected} expected, {got} provided.")]
    ArityMismatch {
        callee: String,
        expected: usize,
        got: usize,
        span: SourcePos,
    },

    #[error("Argument {index} of the call to {callee} should have base type `{expected}`, but has `{got}`.")]
    ArgumentTypeMismatch {
        callee: String,
        index: usize,
        expected: BaseType,
        got: Ty,
        span: SourcePos,
    },

    #[error("Recursive call in function {0}.")]
    RecursiveFunction(String, SourcePos),
}

impl SemanticError {
    /// Source range the diagnostic points at.
    pub fn span(&self) -> SourcePos {
        match self {
            Self::UndefinedVariable(_, span)
            | Self::UndefinedFunction(_, span)
            | Self::DuplicateVariable(_, span)
            | Self::DuplicateFunction(_, span)
            | Self::DuplicateStruct(_, span)
            | Self::RecursiveFunction(_, span)
            | Self::BinaryTypeMismatch { span, .. }
            | Self::AssignTypeMismatch { span, .. }
            | Self::InitializerTypeMismatch { span, .. }
            | Self::ReturnTypeMismatch { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::ArgumentTypeMismatch { span, .. } => span.clone(),
        }
    }
}

/// Runs the semantic pass over one compilation unit.
///
/// The first failure aborts the pass and becomes the single diagnostic of
/// the run. On success the populated context is handed back so later
/// stages can consult the registered declarations.
pub fn analyze(program: &Program) -> Result<SemanticContext<'_>, SemanticError> {
    Analyzer::new().run(program)
}
