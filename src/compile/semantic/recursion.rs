use std::collections::HashSet;

use crate::compile::ast::{Block, FunctionDecl, Stmt};
use crate::compile::semantic::context::SemanticContext;

/// Whether `func`'s body can reach a call back to `func` itself, directly
/// or through other registered functions.
///
/// The walk follows call statements only and carries a visited set: a call
/// cycle that never comes back to the target ends the descent instead of
/// being followed forever. An unresolvable callee ends it too.
pub fn reaches<'ast>(ctx: &SemanticContext<'ast>, func: &'ast FunctionDecl) -> bool {
    let mut visited = HashSet::new();
    block_reaches(ctx, &func.body, &func.name, &mut visited)
}

fn block_reaches<'ast>(
    ctx: &SemanticContext<'ast>,
    block: &'ast Block,
    target: &str,
    visited: &mut HashSet<&'ast str>,
) -> bool {
    block
        .stmts
        .iter()
        .any(|stmt| stmt_reaches(ctx, stmt, target, visited))
}

fn stmt_reaches<'ast>(
    ctx: &SemanticContext<'ast>,
    stmt: &'ast Stmt,
    target: &str,
    visited: &mut HashSet<&'ast str>,
) -> bool {
    match stmt {
        Stmt::Block(block) => block_reaches(ctx, block, target, visited),
        Stmt::Call(call) => {
            if call.callee == target {
                return true;
            }

            // Already explored on this walk; whatever it reaches does not
            // include the target.
            if !visited.insert(call.callee.as_str()) {
                return false;
            }

            match ctx.search_func(&call.callee) {
                Some(callee) => block_reaches(ctx, &callee.body, target, visited),
                None => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::ast::CallExpr;

    fn call(callee: &str) -> Stmt {
        Stmt::Call(CallExpr {
            callee: callee.to_string(),
            args: vec![],
            span: 0..0,
        })
    }

    fn func(name: &str, stmts: Vec<Stmt>) -> FunctionDecl {
        FunctionDecl {
            name: name.to_string(),
            ret: None,
            returns_list: false,
            params: vec![],
            body: Block { stmts },
            span: 0..0,
        }
    }

    #[test]
    fn a_direct_self_call_is_found() {
        let f = func("f", vec![call("f")]);

        let mut ctx = SemanticContext::new();
        ctx.register_func(&f);

        assert!(reaches(&ctx, &f));
    }

    #[test]
    fn an_indirect_cycle_through_another_function_is_found() {
        let f = func("f", vec![call("g")]);
        let g = func("g", vec![call("f")]);

        let mut ctx = SemanticContext::new();
        ctx.register_func(&f);
        ctx.register_func(&g);

        assert!(reaches(&ctx, &f));
        assert!(reaches(&ctx, &g));
    }

    #[test]
    fn calls_inside_nested_blocks_are_walked() {
        let f = func(
            "f",
            vec![Stmt::Block(Block {
                stmts: vec![call("f")],
            })],
        );

        let mut ctx = SemanticContext::new();
        ctx.register_func(&f);

        assert!(reaches(&ctx, &f));
    }

    #[test]
    fn a_cycle_away_from_the_target_terminates_as_not_recursive() {
        // f reaches the b <-> c cycle but is never re-entered itself.
        let f = func("f", vec![call("b")]);
        let b = func("b", vec![call("c")]);
        let c = func("c", vec![call("b")]);

        let mut ctx = SemanticContext::new();
        ctx.register_func(&f);
        ctx.register_func(&b);
        ctx.register_func(&c);

        assert!(!reaches(&ctx, &f));
    }

    #[test]
    fn an_unknown_callee_is_not_recursive() {
        let f = func("f", vec![call("missing")]);

        let mut ctx = SemanticContext::new();
        ctx.register_func(&f);

        assert!(!reaches(&ctx, &f));
    }
}
