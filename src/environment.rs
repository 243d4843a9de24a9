use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// A node in the lexical-scope chain. Shared ownership lets a closure and
/// the scope it was declared in outlive the block that created them.
#[derive(Debug)]
pub struct Environment {
    enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment { enclosing, values: HashMap::new() }
    }

    /// Insert-or-replace in this environment only — never in a parent.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .expect("resolver-recorded depth should match the live chain");

        for _ in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .expect("resolver-recorded depth should match the live chain");
            environment = parent;
        }

        environment
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError::new(name, format!("Undefined variable '{}'", name.lexeme)))
    }

    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        if distance == 0 {
            return self.get_local(name);
        }

        self.ancestor(distance).borrow().get_local(name)
    }

    fn get_local(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.values.get(&name.lexeme)
            .cloned()
            .ok_or_else(|| RuntimeError::new(name, format!("Undefined variable '{}'", name.lexeme)))
    }

    /// Locate the innermost environment that already defines `name` and
    /// replace it there; fails if no environment in the chain does.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError::new(name, format!("Undefined variable '{}'", name.lexeme)))
    }

    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if distance == 0 {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        self.ancestor(distance).borrow_mut().values.insert(name.lexeme.clone(), value);
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn ident(name: &str) -> Token {
        Token::new(TokenKind::Identifier, name, None, 1)
    }

    #[test]
    fn define_and_get_in_same_scope() {
        let mut env = Environment::default();
        env.define("a", Value::Integer(1));
        assert_eq!(env.get(&ident("a")).unwrap(), Value::Integer(1));
    }

    #[test]
    fn get_falls_through_to_parent() {
        let parent = Rc::new(RefCell::new(Environment::default()));
        parent.borrow_mut().define("a", Value::Integer(1));
        let child = Environment::new(Some(Rc::clone(&parent)));
        assert_eq!(child.get(&ident("a")).unwrap(), Value::Integer(1));
    }

    #[test]
    fn assign_mutates_defining_environment_not_the_child() {
        let parent = Rc::new(RefCell::new(Environment::default()));
        parent.borrow_mut().define("a", Value::Integer(1));
        let mut child = Environment::new(Some(Rc::clone(&parent)));

        child.assign(&ident("a"), Value::Integer(2)).unwrap();

        assert_eq!(parent.borrow().get(&ident("a")).unwrap(), Value::Integer(2));
        assert!(!child.values.contains_key("a"));
    }

    #[test]
    fn assign_to_undefined_name_fails() {
        let mut env = Environment::default();
        let err = env.assign(&ident("missing"), Value::Nil).unwrap_err();
        assert_eq!(err.message, "Undefined variable 'missing'");
    }

    #[test]
    fn get_at_reads_from_the_exact_ancestor() {
        let global = Rc::new(RefCell::new(Environment::default()));
        global.borrow_mut().define("a", Value::Integer(1));
        let middle = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&global)))));
        let inner = Environment::new(Some(Rc::clone(&middle)));

        assert_eq!(inner.get_at(2, &ident("a")).unwrap(), Value::Integer(1));
    }
}
