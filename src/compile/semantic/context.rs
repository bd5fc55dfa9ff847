use crate::compile::ast::{FunctionDecl, StructDecl, VarDecl};
use crate::compile::semantic::types::Ty;
use crate::datstructures::scope_stack::ScopeStack;

/// Analysis state for one compilation unit: the stack of variable scopes,
/// each tagged with the return type expected at that nesting level, plus
/// the flat registries for functions and structures. Holds references into
/// the AST, never copies of it.
#[derive(Debug)]
pub struct SemanticContext<'ast> {
    vars: ScopeStack<&'ast str, &'ast VarDecl, Ty>,
    funcs: Vec<&'ast FunctionDecl>,
    structs: Vec<&'ast StructDecl>,
}

impl<'ast> SemanticContext<'ast> {
    /// Creates the context with its root scope, which expects no return
    /// value.
    pub fn new() -> Self {
        let mut vars = ScopeStack::new();
        vars.push(Ty::Void);

        SemanticContext {
            vars,
            funcs: Vec::new(),
            structs: Vec::new(),
        }
    }

    pub fn enter_scope(&mut self, expected_return: Ty) {
        self.vars.push(expected_return);
    }

    pub fn leave_scope(&mut self) {
        self.vars.pop();
    }

    /// Return type expected at the current nesting level.
    pub fn expected_return(&self) -> &Ty {
        self.vars
            .current_tag()
            .expect("the root scope is never popped")
    }

    /// Registers into the innermost scope. `false` if the name is already
    /// taken there; shadowing an outer scope is allowed.
    pub fn register_var(&mut self, decl: &'ast VarDecl) -> bool {
        self.vars
            .insert_in_current(decl.name.as_str(), decl)
            .expect("the root scope is never popped")
    }

    pub fn register_func(&mut self, decl: &'ast FunctionDecl) -> bool {
        if self.funcs.iter().any(|func| func.name == decl.name) {
            return false;
        }

        self.funcs.push(decl);
        true
    }

    pub fn register_struct(&mut self, decl: &'ast StructDecl) -> bool {
        if self.structs.iter().any(|s| s.name == decl.name) {
            return false;
        }

        self.structs.push(decl);
        true
    }

    /// Innermost-first search through the live scopes.
    pub fn search_var(&self, name: &str) -> Option<&'ast VarDecl> {
        self.vars.lookup(name).copied()
    }

    pub fn search_func(&self, name: &str) -> Option<&'ast FunctionDecl> {
        self.funcs.iter().find(|func| func.name == name).copied()
    }

    pub fn search_struct(&self, name: &str) -> Option<&'ast StructDecl> {
        self.structs.iter().find(|s| s.name == name).copied()
    }
}

impl<'ast> Default for SemanticContext<'ast> {
    fn default() -> Self {
        SemanticContext::new()
    }
}
