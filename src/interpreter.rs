use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::environment::Environment;
use crate::error::{ErrorReporter, RuntimeError};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, TokenKind};
use crate::value::{Callable, Value};

const EPS: f64 = 1e-6;

/// Non-local control flow threaded through statement execution: either a
/// genuine runtime error, or a `return` unwinding to its call frame. The
/// `?` operator on `ExecResult` carries both uniformly; `Function::call`
/// is the only place that tells them apart.
pub enum Signal {
    Error(RuntimeError),
    Return(Value),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}

type EvalResult = Result<Value, Signal>;
type ExecResult = Result<(), Signal>;

/// AST-walking evaluator. Holds the global environment, the environment
/// currently in scope, the resolver's (node id → depth) map, and whether
/// it is running inside the REPL (which additionally prints the value of
/// a bare expression statement).
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<u32, usize>,
    repl_mode: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::globals() {
            let name = native.name().to_owned();
            globals.borrow_mut().define(&name, Value::Callable(Rc::new(native)));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            repl_mode: false,
        }
    }

    pub fn set_repl_mode(&mut self, repl_mode: bool) {
        self.repl_mode = repl_mode;
    }

    /// Recorded by the resolver for every `Variable`/`Assign` node it
    /// could bind to an enclosing scope.
    pub fn resolve(&mut self, id: u32, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes a fully resolved statement list. Aborts on the first
    /// runtime error (reported to `reporter`) without tearing down
    /// interpreter state, so a REPL session can keep going afterwards.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut ErrorReporter) {
        debug!(count = statements.len(), "interpreting statements");

        for statement in statements {
            if let Err(signal) = self.execute(statement) {
                match signal {
                    Signal::Error(error) => {
                        reporter.report_runtime(&error);
                        return;
                    }
                    Signal::Return(_) => {
                        unreachable!("a top-level return is rejected by the resolver");
                    }
                }
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = Rc::clone(&self.environment);
        self.environment = environment;

        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));

        self.environment = previous;
        result
    }

    fn lookup_variable(&self, id: u32, name: &Token) -> Result<Value, RuntimeError> {
        match self.locals.get(&id) {
            Some(&depth) => self.environment.borrow().get_at(depth, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn is_truthy(value: &Value) -> bool {
        value.is_truthy()
    }

    fn is_equal(left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Nil, Value::Nil) => true,
            (Value::Nil, _) | (_, Value::Nil) => false,
            (a, b) if a.is_number() && b.is_number() => (a.as_f64() - b.as_f64()).abs() < EPS,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }

    fn check_number_operand(operator: &Token, value: &Value) -> Result<(), RuntimeError> {
        if value.is_number() {
            Ok(())
        } else {
            Err(RuntimeError::new(operator, "Operand must be a number."))
        }
    }

    fn check_number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(), RuntimeError> {
        if left.is_number() && right.is_number() {
            Ok(())
        } else {
            Err(RuntimeError::new(operator, "Operands must be numbers."))
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprVisitor<EvalResult> for Interpreter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Literal(value) = expr else { unreachable!() };
        Ok(value.clone())
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Unary(data) = expr else { unreachable!() };
        let right = self.evaluate(&data.expr)?;

        match data.operator.kind {
            TokenKind::Bang => Ok(Value::Bool(!Self::is_truthy(&right))),
            TokenKind::Minus => {
                Self::check_number_operand(&data.operator, &right)?;
                Ok(match right {
                    Value::Float(n) => Value::Float(-n),
                    Value::Integer(n) => Value::Integer(-n),
                    _ => unreachable!("check_number_operand guarantees a numeric value"),
                })
            }
            _ => unreachable!("unary operator set is closed to '!' and '-'"),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Binary(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let op = &data.operator;

        match op.kind {
            TokenKind::Minus => {
                Self::check_number_operands(op, &left, &right)?;
                Ok(numeric_op(&left, &right, |a, b| a - b, |a, b| a - b))
            }
            TokenKind::Star => {
                Self::check_number_operands(op, &left, &right)?;
                Ok(numeric_op(&left, &right, |a, b| a * b, |a, b| a * b))
            }
            TokenKind::Slash => {
                Self::check_number_operands(op, &left, &right)?;
                if left.is_float() || right.is_float() {
                    let divisor = right.as_f64();
                    if divisor.abs() < EPS {
                        return Err(Signal::Error(RuntimeError::new(op, "Division by 0")));
                    }
                    Ok(Value::Float(left.as_f64() / divisor))
                } else {
                    let (Value::Integer(a), Value::Integer(b)) = (&left, &right) else {
                        unreachable!("neither operand is a float")
                    };
                    if *b == 0 {
                        return Err(Signal::Error(RuntimeError::new(op, "Division by 0")));
                    }
                    Ok(Value::Integer(a / b))
                }
            }
            TokenKind::Plus => match (&left, &right) {
                _ if left.is_number() && right.is_number() => {
                    Ok(numeric_op(&left, &right, |a, b| a + b, |a, b| a + b))
                }
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
                _ => Err(Signal::Error(RuntimeError::new(op, "Operands must be both strings or numbers."))),
            },
            TokenKind::Greater => {
                Self::check_number_operands(op, &left, &right)?;
                Ok(Value::Bool(compare(&left, &right, |a, b| a > b, |a, b| a > b)))
            }
            TokenKind::GreaterEqual => {
                Self::check_number_operands(op, &left, &right)?;
                Ok(Value::Bool(compare(&left, &right, |a, b| a >= b, |a, b| a >= b)))
            }
            TokenKind::Less => {
                Self::check_number_operands(op, &left, &right)?;
                Ok(Value::Bool(compare(&left, &right, |a, b| a < b, |a, b| a < b)))
            }
            TokenKind::LessEqual => {
                Self::check_number_operands(op, &left, &right)?;
                Ok(Value::Bool(compare(&left, &right, |a, b| a <= b, |a, b| a <= b)))
            }
            TokenKind::BangEqual => Ok(Value::Bool(!Self::is_equal(&left, &right))),
            TokenKind::EqualEqual => Ok(Value::Bool(Self::is_equal(&left, &right))),
            _ => unreachable!("binary operator set is closed"),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Logical(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;

        let short_circuits = match data.operator.kind {
            TokenKind::Or => Self::is_truthy(&left),
            TokenKind::And => !Self::is_truthy(&left),
            _ => unreachable!("logical operator set is closed to 'and' and 'or'"),
        };

        if short_circuits {
            Ok(left)
        } else {
            self.evaluate(&data.right)
        }
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Variable(data) = expr else { unreachable!() };
        Ok(self.lookup_variable(data.id, &data.name)?)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Assign(data) = expr else { unreachable!() };
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(&depth) => self.environment.borrow_mut().assign_at(depth, &data.name, value.clone())?,
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Call(data) = expr else { unreachable!() };

        let callee = self.evaluate(&data.callee)?;
        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(Signal::Error(RuntimeError::new(&data.paren, "Can only call functions and classes.")));
        };

        if arguments.len() != callable.arity() {
            return Err(Signal::Error(RuntimeError::new(
                &data.paren,
                format!("Expected {} argument(s) but got {}.", callable.arity(), arguments.len()),
            )));
        }

        trace!(arity = callable.arity(), "invoking callable");
        Ok(callable.call(self, arguments)?)
    }
}

impl StmtVisitor<ExecResult> for Interpreter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;

        if self.repl_mode {
            println!("{value}");
        }

        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        println!("{value}");
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Value::Nil,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let scope = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(scope)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::If(data) = stmt else { unreachable!() };

        if Self::is_truthy(&self.evaluate(&data.condition)?) {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::While(data) = stmt else { unreachable!() };

        while Self::is_truthy(&self.evaluate(&data.condition)?) {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(data.clone(), Rc::clone(&self.environment));
        self.environment.borrow_mut().define(&data.name.lexeme, Value::Callable(Rc::new(function)));
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Value::Nil,
        };

        Err(Signal::Return(value))
    }
}

/// Evaluates a numeric binary op, promoting to float only when at least
/// one operand already is one.
fn numeric_op(left: &Value, right: &Value, on_float: impl Fn(f64, f64) -> f64, on_int: impl Fn(i64, i64) -> i64) -> Value {
    if left.is_float() || right.is_float() {
        Value::Float(on_float(left.as_f64(), right.as_f64()))
    } else {
        let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
            unreachable!("neither operand is a float")
        };
        Value::Integer(on_int(*a, *b))
    }
}

fn compare(left: &Value, right: &Value, on_float: impl Fn(f64, f64) -> bool, on_int: impl Fn(i64, i64) -> bool) -> bool {
    if left.is_float() || right.is_float() {
        on_float(left.as_f64(), right.as_f64())
    } else {
        let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
            unreachable!("neither operand is a float")
        };
        on_int(*a, *b)
    }
}
