use crate::error::ParseError;
use crate::expr::*;
use crate::stmt::*;
use crate::token::{Token, TokenKind};
use crate::value::Value;

type ParseResult<T> = Result<T, ParseError>;

/// Returns whether the next token is any of the given kinds, consuming it
/// if so.
macro_rules! matches_kind {
    ( $self:ident, $( $kind:expr ),+ ) => {
        {
            if $( $self.check($kind) )||* {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Recursive-descent parser with precedence climbing and panic-mode
/// recovery.
///
/// - program     -> declaration* EOF ;
/// - declaration -> funDecl | varDecl | statement ;
/// - funDecl     -> "fun" function ;
/// - varDecl     -> "var" IDENTIFIER ( "=" expression )? ";" ;
/// - function    -> IDENTIFIER "(" parameters? ")" block ;
/// - parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - statement   -> exprStmt | forStmt | ifStmt | printStmt | returnStmt | whileStmt | block ;
/// - exprStmt    -> expression ";" ;
/// - forStmt     -> "for" "(" ( varDecl | exprStmt | ";" ) expression? ";" expression? ")" statement ;
/// - ifStmt      -> "if" "(" expression ")" statement ( "else" statement )? ;
/// - printStmt   -> "print" expression ";" ;
/// - returnStmt  -> "return" expression? ";" ;
/// - whileStmt   -> "while" "(" expression ")" statement ;
/// - block       -> "{" declaration* "}" ;
/// - expression  -> assignment ;
/// - assignment  -> IDENTIFIER "=" assignment | logicOr ;
/// - logicOr     -> logicAnd ( "or" logicAnd )* ;
/// - logicAnd    -> equality ( "and" equality )* ;
/// - equality    -> comparison ( ( "!=" | "==" ) comparison )* ;
/// - comparison  -> term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
/// - term        -> factor ( ( "+" | "-" ) factor )* ;
/// - factor      -> unary ( ( "*" | "/" ) unary )* ;
/// - unary       -> ( "!" | "-" ) unary | call ;
/// - call        -> primary ( "(" arguments? ")" )* ;
/// - arguments   -> expression ( "," expression )* ;
/// - primary     -> NUMBER | STRING | "false" | "true" | "nil" | "(" expression ")" | IDENTIFIER ;
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_node_id: u32,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0, next_node_id: 0, errors: Vec::new() }
    }

    /// Parses the whole token stream, returning every statement it could
    /// recover plus any parse errors encountered along the way. The
    /// caller should treat a non-empty error list as pipeline failure even
    /// though `statements` may be partially populated.
    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        (statements, self.errors)
    }

    /// Parses one declaration, recovering at the statement boundary on
    /// error. This is the only place a `ParseError` is consumed — both the
    /// top-level program loop and `block` share it, per the synchronize
    /// contract.
    fn declaration(&mut self) -> Option<Stmt> {
        match self.declaration_inner() {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                None
            }
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        id
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(ParseError::new(self.peek(), message))
    }

    fn declaration_inner(&mut self) -> ParseResult<Stmt> {
        if matches_kind!(self, TokenKind::Fun) {
            return self.function("function");
        }
        if matches_kind!(self, TokenKind::Var) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name")?.clone();

        let initializer = if matches_kind!(self, TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches_kind!(self, TokenKind::For) {
            return self.for_statement();
        }
        if matches_kind!(self, TokenKind::If) {
            return self.if_statement();
        }
        if matches_kind!(self, TokenKind::Print) {
            return self.print_statement();
        }
        if matches_kind!(self, TokenKind::Return) {
            return self.return_statement();
        }
        if matches_kind!(self, TokenKind::While) {
            return self.while_statement();
        }
        if matches_kind!(self, TokenKind::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    /// Desugars into a `Block[init, While(cond, Block[body, incr])]`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'")?;

        let initializer = if matches_kind!(self, TokenKind::Semicolon) {
            None
        } else if matches_kind!(self, TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition")?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![body, Stmt::Expression(ExpressionData { expr: increment })],
            });
        }

        body = Stmt::While(WhileData {
            condition: condition.unwrap_or(Expr::Literal(Value::Bool(true))),
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if matches_kind!(self, TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value")?;
        Ok(Stmt::Print(PrintData { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after return value")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While(WhileData { condition, body }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression")?;
        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    fn function(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {kind} name"))?.clone();
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {kind} name"))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= 255 {
                    return Err(ParseError::new(self.peek(), "Cannot have more than 255 parameters"));
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name")?.clone());

                if !matches_kind!(self, TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters")?;
        self.consume(TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body"))?;

        let body = self.block()?;
        Ok(Stmt::Function(FunctionData { name, params, body }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block")?;
        Ok(statements)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if matches_kind!(self, TokenKind::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match &expr {
                Expr::Variable(data) => {
                    let name = data.name.clone();
                    Ok(Expr::Assign(AssignData { id: self.next_id(), name, value: Box::new(value) }))
                }
                _ => {
                    self.errors.push(ParseError::new(&equals, "Invalid assignment target."));
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while matches_kind!(self, TokenKind::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while matches_kind!(self, TokenKind::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while matches_kind!(self, TokenKind::BangEqual, TokenKind::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while matches_kind!(self, TokenKind::Greater, TokenKind::GreaterEqual, TokenKind::Less, TokenKind::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while matches_kind!(self, TokenKind::Minus, TokenKind::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while matches_kind!(self, TokenKind::Slash, TokenKind::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if matches_kind!(self, TokenKind::Bang, TokenKind::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { operator, expr: Box::new(right) }));
        }

        self.call()
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    return Err(ParseError::new(self.peek(), "Cannot have more than 255 arguments"));
                }
                arguments.push(self.expression()?);
                if !matches_kind!(self, TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments")?.clone();
        Ok(Expr::Call(CallData { callee: Box::new(callee), paren, arguments }))
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        while matches_kind!(self, TokenKind::LeftParen) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if matches_kind!(self, TokenKind::False) {
            return Ok(Expr::Literal(Value::Bool(false)));
        }
        if matches_kind!(self, TokenKind::True) {
            return Ok(Expr::Literal(Value::Bool(true)));
        }
        if matches_kind!(self, TokenKind::Nil) {
            return Ok(Expr::Literal(Value::Nil));
        }
        if matches_kind!(self, TokenKind::Number, TokenKind::String) {
            let literal = self.previous().literal.clone()
                .expect("number and string tokens always carry a literal value");
            return Ok(Expr::Literal(literal));
        }
        if matches_kind!(self, TokenKind::Identifier) {
            return Ok(Expr::Variable(VariableData { id: self.next_id(), name: self.previous().clone() }));
        }
        if matches_kind!(self, TokenKind::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression")?;
            return Ok(Expr::Grouping(GroupingData { expr: Box::new(expr) }));
        }

        Err(ParseError::new(self.peek(), "Expect expression"))
    }

    /// Advance until the previous token was `;` or the next one opens a
    /// new statement, so one error doesn't cascade into a dozen more.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
