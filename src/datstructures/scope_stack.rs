use std::borrow::Borrow;
use std::{collections::HashMap, hash::Hash};

use thiserror::Error;

#[derive(Error, Clone, Debug)]
pub enum ScopeError {
    #[error("The stack is empty")]
    EmptyStack,
}

/// Stack of lexical scopes, innermost last. Each scope record carries its
/// bindings together with one tag value, so bindings and tags can never go
/// out of step across push/pop.
#[derive(Clone, Debug)]
pub struct ScopeStack<K, V, T> {
    scopes: Vec<Scope<K, V, T>>,
}

#[derive(Clone, Debug)]
struct Scope<K, V, T> {
    bindings: HashMap<K, V>,
    tag: T,
}

impl<K: Eq + Hash, V, T> ScopeStack<K, V, T> {
    pub fn new() -> Self {
        ScopeStack { scopes: Vec::new() }
    }

    pub fn push(&mut self, tag: T) {
        self.scopes.push(Scope {
            bindings: HashMap::new(),
            tag,
        });
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Looks the key up innermost-first, so an inner binding shadows any
    /// outer one of the same name.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.bindings.get(key) {
                return Some(value);
            }
        }

        None
    }

    /// Binds into the innermost scope only. Returns `Ok(false)` and leaves
    /// the stack untouched if the key is already bound there; outer scopes
    /// are not consulted, shadowing them is allowed.
    pub fn insert_in_current(&mut self, k: K, v: V) -> Result<bool, ScopeError> {
        let Some(scope) = self.scopes.last_mut() else {
            return Err(ScopeError::EmptyStack);
        };

        if scope.bindings.contains_key(&k) {
            return Ok(false);
        }

        scope.bindings.insert(k, v);
        Ok(true)
    }

    /// Tag of the innermost scope.
    pub fn current_tag(&self) -> Option<&T> {
        self.scopes.last().map(|scope| &scope.tag)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl<K: Eq + Hash, V, T> Default for ScopeStack<K, V, T> {
    fn default() -> Self {
        ScopeStack::new()
    }
}
