use crate::compile::ast::{
    BaseType, Block, CallExpr, Decl, Expr, FunctionDecl, Program, Stmt, VarDecl,
};
use crate::compile::semantic::context::SemanticContext;
use crate::compile::semantic::types::Ty;
use crate::compile::semantic::{SemanticError, recursion};

/// Walks the AST applying the semantic checks. Scope bookkeeping lives in
/// the context; the analyzer decides what each node requires of it. The
/// first failing check aborts the pass, later siblings are never looked
/// at.
pub struct Analyzer<'ast> {
    ctx: SemanticContext<'ast>,
}

impl<'ast> Analyzer<'ast> {
    pub fn new() -> Self {
        Analyzer {
            ctx: SemanticContext::new(),
        }
    }

    /// Registers every top-level declaration, then analyzes each function
    /// body in declaration order. Functions see each other regardless of
    /// that order, so mutual recursion is caught from either side.
    pub fn run(mut self, program: &'ast Program) -> Result<SemanticContext<'ast>, SemanticError> {
        for decl in &program.decls {
            match decl {
                Decl::Function(func) => {
                    if !self.ctx.register_func(func) {
                        return Err(SemanticError::DuplicateFunction(
                            func.name.clone(),
                            func.span.clone(),
                        ));
                    }
                }
                Decl::Struct(decl) => {
                    if !self.ctx.register_struct(decl) {
                        return Err(SemanticError::DuplicateStruct(
                            decl.name.clone(),
                            decl.span.clone(),
                        ));
                    }
                }
            }
        }

        for decl in &program.decls {
            if let Decl::Function(func) = decl {
                self.analyze_function(func)?;
            }
        }

        Ok(self.ctx)
    }

    fn analyze_function(&mut self, func: &'ast FunctionDecl) -> Result<(), SemanticError> {
        self.ctx.enter_scope(Ty::of_return(func));

        for param in &func.params {
            // A repeated parameter name is not an error; the first one
            // stays bound.
            let _ = self.ctx.register_var(param);
        }

        let verdict = self.analyze_block(&func.body);
        let recursive = recursion::reaches(&self.ctx, func);

        self.ctx.leave_scope();

        verdict?;
        if recursive {
            return Err(SemanticError::RecursiveFunction(
                func.name.clone(),
                func.span.clone(),
            ));
        }

        Ok(())
    }

    /// A block opens a scope of its own, inheriting the return type
    /// expected by the surrounding one. The scope is closed on every exit
    /// path, failing statements included.
    fn analyze_block(&mut self, block: &'ast Block) -> Result<(), SemanticError> {
        let expected = self.ctx.expected_return().clone();
        self.ctx.enter_scope(expected);

        let verdict = block
            .stmts
            .iter()
            .try_for_each(|stmt| self.analyze_stmt(stmt));

        self.ctx.leave_scope();
        verdict
    }

    fn analyze_stmt(&mut self, stmt: &'ast Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::Block(block) => self.analyze_block(block),
            Stmt::Decl(decl) => self.analyze_var_decl(decl),
            Stmt::Assign(name, value, span) => {
                let Some(var) = self.ctx.search_var(name) else {
                    return Err(SemanticError::UndefinedVariable(name.clone(), span.clone()));
                };

                let expected = Ty::of_var(var);
                let got = self.type_of(value);
                if got != expected {
                    return Err(SemanticError::AssignTypeMismatch {
                        name: name.clone(),
                        expected,
                        got,
                        span: span.clone(),
                    });
                }

                Ok(())
            }
            Stmt::Return(value, span) => {
                let expected = self.ctx.expected_return().clone();
                let got = self.type_of(value);
                if got != expected {
                    return Err(SemanticError::ReturnTypeMismatch {
                        expected,
                        got,
                        span: span.clone(),
                    });
                }

                Ok(())
            }
            Stmt::Call(call) => self.analyze_call(call),
        }
    }

    fn analyze_var_decl(&mut self, decl: &'ast VarDecl) -> Result<(), SemanticError> {
        if !self.ctx.register_var(decl) {
            return Err(SemanticError::DuplicateVariable(
                decl.name.clone(),
                decl.span.clone(),
            ));
        }

        // Registration happens before the initializer is looked at, so an
        // initializer can already mention the variable it initializes. The
        // declared type is compared first, then the initializer gets its
        // own analysis.
        if let Some(init) = &decl.init {
            let expected = Ty::of_var(decl);
            let got = self.type_of(init);
            if got != expected {
                return Err(SemanticError::InitializerTypeMismatch {
                    name: decl.name.clone(),
                    expected,
                    got,
                    span: decl.span.clone(),
                });
            }

            self.analyze_expr(init)?;
        }

        Ok(())
    }

    /// Expressions carry checks of their own only where the language
    /// defines them: operand equality on binary operations and the full
    /// signature check on calls.
    fn analyze_expr(&mut self, expr: &'ast Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::Binary(op, lhs, rhs) => {
                let left = self.type_of(lhs);
                let right = self.type_of(rhs);
                if left != right {
                    return Err(SemanticError::BinaryTypeMismatch {
                        op: op.clone(),
                        lhs: left,
                        rhs: right,
                        span: expr.span(),
                    });
                }

                Ok(())
            }
            Expr::Call(call) => self.analyze_call(call),
            _ => Ok(()),
        }
    }

    fn analyze_call(&self, call: &'ast CallExpr) -> Result<(), SemanticError> {
        let Some(func) = self.ctx.search_func(&call.callee) else {
            return Err(SemanticError::UndefinedFunction(
                call.callee.clone(),
                call.span.clone(),
            ));
        };

        if call.args.len() != func.params.len() {
            return Err(SemanticError::ArityMismatch {
                callee: call.callee.clone(),
                expected: func.params.len(),
                got: call.args.len(),
                span: call.span.clone(),
            });
        }

        for (index, (arg, param)) in call.args.iter().zip(&func.params).enumerate() {
            // Arguments are matched on base type alone; list-ness of an
            // argument is not held against the parameter.
            let got = self.type_of(arg);
            if got.base() != Some(&param.ty) {
                return Err(SemanticError::ArgumentTypeMismatch {
                    callee: call.callee.clone(),
                    index,
                    expected: param.ty.clone(),
                    got,
                    span: arg.span(),
                });
            }
        }

        Ok(())
    }

    /// Synthesizes the type of an expression. Constructs that do not
    /// resolve get `Ty::Unresolved` rather than an error here; whichever
    /// check required a concrete type reports the mismatch.
    pub fn type_of(&self, expr: &Expr) -> Ty {
        match expr {
            Expr::Int(_, _) => Ty::Scalar(BaseType::Int),
            Expr::Double(_, _) => Ty::Scalar(BaseType::Double),
            Expr::Bool(_, _) => Ty::Scalar(BaseType::Bool),
            Expr::Str(_, _) => Ty::Scalar(BaseType::Str),
            Expr::Ident(name, _) => match self.ctx.search_var(name) {
                Some(var) => Ty::of_var(var),
                None => Ty::Unresolved,
            },
            Expr::Binary(_, lhs, _) => self.type_of(lhs),
            Expr::Call(call) => match self.ctx.search_func(&call.callee) {
                Some(func) => Ty::of_return(func),
                None => Ty::Unresolved,
            },
            Expr::List(elements, _) => self.type_of_list(elements),
        }
    }

    fn type_of_list(&self, elements: &[Expr]) -> Ty {
        let Some(first) = elements.first() else {
            return Ty::Unresolved;
        };

        let element = self.type_of(first);
        if elements[1..].iter().any(|e| self.type_of(e) != element) {
            return Ty::Unresolved;
        }

        match element.base() {
            Some(base) => Ty::List(base.clone()),
            // Elements without a base code (void calls, unresolved names)
            // leave nothing to build a list type from.
            None => Ty::Unresolved,
        }
    }
}

impl<'ast> Default for Analyzer<'ast> {
    fn default() -> Self {
        Analyzer::new()
    }
}
