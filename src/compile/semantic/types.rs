use std::fmt;

use crate::compile::ast::{BaseType, FunctionDecl, VarDecl};

/// Checked type of an expression or declaration.
///
/// `Void` and `Unresolved` are distinct values: a call to a function
/// declared without a return type checks as `Void`, while an unknown
/// identifier or an inconsistent list literal checks as `Unresolved`.
/// Scalars and lists never compare equal, not even over the same base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Scalar(BaseType),
    List(BaseType),
    Void,
    Unresolved,
}

impl Ty {
    pub fn of(base: BaseType, is_list: bool) -> Ty {
        if is_list {
            Ty::List(base)
        } else {
            Ty::Scalar(base)
        }
    }

    /// Effective type of a declared variable; the declared size decides
    /// list-ness.
    pub fn of_var(decl: &VarDecl) -> Ty {
        Ty::of(decl.ty.clone(), decl.size != 1)
    }

    /// Effective return type of a declared function.
    pub fn of_return(func: &FunctionDecl) -> Ty {
        match &func.ret {
            Some(base) => Ty::of(base.clone(), func.returns_list),
            None => Ty::Void,
        }
    }

    /// Base code behind a scalar or list type, if there is one.
    pub fn base(&self) -> Option<&BaseType> {
        match self {
            Ty::Scalar(base) | Ty::List(base) => Some(base),
            Ty::Void | Ty::Unresolved => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Scalar(base) => write!(f, "{}", base),
            Ty::List(base) => write!(f, "[{}]", base),
            Ty::Void => write!(f, "void"),
            Ty::Unresolved => write!(f, "<unresolved>"),
        }
    }
}
