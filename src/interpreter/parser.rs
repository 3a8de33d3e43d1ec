use std::collections::HashMap;
use lazy_static::lazy_static;
#[allow(unused)]
use crate::debug;
use crate::interpreter::ast::{Block, Expression, Program, Statement};
use crate::interpreter::lexer::{Lexer, Token, TokenType};


/// Binding strength of infix rules, weakest first. `Dot` sits above call and
/// index because it joins two integer tokens into one float literal before
/// any other rule can see them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
    Dot,
}

lazy_static! {
    static ref PRECEDENCES: HashMap<TokenType, Precedence> = HashMap::from([
        (TokenType::Equal, Precedence::Equals),
        (TokenType::NotEqual, Precedence::Equals),
        (TokenType::Less, Precedence::LessGreater),
        (TokenType::Greater, Precedence::LessGreater),
        (TokenType::Plus, Precedence::Sum),
        (TokenType::Minus, Precedence::Sum),
        (TokenType::Multiply, Precedence::Product),
        (TokenType::Divide, Precedence::Product),
        (TokenType::Modulo, Precedence::Product),
        (TokenType::ParenthesisLeft, Precedence::Call),
        (TokenType::SquareBracketLeft, Precedence::Index),
        (TokenType::Dot, Precedence::Dot),
    ]);
}

type PrefixRule<'source> = fn(&mut Parser<'source>) -> Expression;
type InfixRule<'source> = fn(&mut Parser<'source>, Expression) -> Expression;

fn prefix_rule<'source>(token_type: TokenType) -> Option<PrefixRule<'source>> {
    match token_type {
        TokenType::Identifier => Some(Parser::parse_identifier),
        TokenType::Int => Some(Parser::parse_integer_literal),
        TokenType::String => Some(Parser::parse_string_literal),
        TokenType::True | TokenType::False => Some(Parser::parse_boolean_literal),
        TokenType::Not | TokenType::Minus => Some(Parser::parse_prefix_expression),
        TokenType::ParenthesisLeft => Some(Parser::parse_grouped_expression),
        TokenType::If => Some(Parser::parse_if_expression),
        TokenType::Function => Some(Parser::parse_function_literal),
        TokenType::SquareBracketLeft => Some(Parser::parse_array_literal),
        TokenType::BracketLeft => Some(Parser::parse_dictionary_literal),
        _ => None,
    }
}

fn infix_rule<'source>(token_type: TokenType) -> Option<InfixRule<'source>> {
    match token_type {
        TokenType::Plus | TokenType::Minus
        | TokenType::Multiply | TokenType::Divide | TokenType::Modulo
        | TokenType::Equal | TokenType::NotEqual
        | TokenType::Less | TokenType::Greater => Some(Parser::parse_infix_expression),
        TokenType::ParenthesisLeft => Some(Parser::parse_call_expression),
        TokenType::SquareBracketLeft => Some(Parser::parse_index_expression),
        TokenType::Dot => Some(Parser::parse_float_literal),
        _ => None,
    }
}

pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token, peek: Token,

    errors: Vec<String>,
}

impl<'source> Parser<'source> {
    pub fn new(lexer: Lexer<'_>) -> Parser<'_> {
        let mut parser = Parser {
            lexer,
            current: Token::empty(), peek: Token::empty(),
            errors: Vec::new(),
        };

        // Fill both lookahead slots
        parser.advance();
        parser.advance();

        parser
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    // Statement parsing

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.is_eof() {
            statements.push(self.parse_statement());
            self.advance();
        }

        Program { statements }
    }

    fn parse_statement(&mut self) -> Statement {
        match self.current.token_type() {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Const => self.parse_const_statement(),
            TokenType::Return => self.parse_return_statement(),
            TokenType::While => self.parse_while_statement(),
            // `=` is not an infix operator, so a reassignment has to be
            // recognized here, before expression parsing sees the name
            TokenType::Identifier if self.peek_is(TokenType::Assign) =>
                self.parse_reassign_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Statement {
        if !self.expect_peek(TokenType::Identifier, "Expected identifier after 'let'") {
            return Statement::Error;
        }

        let name = self.current.clone();

        if !self.expect_peek(TokenType::Assign, "Expected '=' after 'let' identifier") {
            return Statement::Error;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        Statement::Let { name, value }
    }

    fn parse_const_statement(&mut self) -> Statement {
        if !self.expect_peek(TokenType::Identifier, "Expected identifier after 'const'") {
            return Statement::Error;
        }

        let name = self.current.clone();

        if !self.expect_peek(TokenType::Assign, "Expected '=' after 'const' identifier") {
            return Statement::Error;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        Statement::Const { name, value }
    }

    fn parse_reassign_statement(&mut self) -> Statement {
        let name = self.current.clone();

        self.advance(); // the '='
        self.advance();

        let value = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        Statement::Reassign { name, value }
    }

    fn parse_return_statement(&mut self) -> Statement {
        if self.peek_is(TokenType::Semicolon) {
            self.advance();
            return Statement::Return { value: None };
        } else if self.peek_is(TokenType::BracketRight) || self.peek_is(TokenType::Eof) {
            return Statement::Return { value: None };
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        Statement::Return { value: Some(value) }
    }

    fn parse_while_statement(&mut self) -> Statement {
        if !self.expect_peek(TokenType::ParenthesisLeft, "Expected '(' after 'while'") {
            return Statement::Error;
        }

        self.advance();
        let condition = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenType::ParenthesisRight, "Expected ')' after 'while' condition") {
            return Statement::Error;
        }

        if !self.expect_peek(TokenType::BracketLeft, "Expected '{' after 'while' condition") {
            return Statement::Error;
        }

        let body = self.parse_block();
        self.skip_semicolon();

        Statement::While { condition, body }
    }

    fn parse_expression_statement(&mut self) -> Statement {
        let expression = self.parse_expression(Precedence::Lowest);
        self.skip_semicolon();

        Statement::Expression { expression }
    }

    fn parse_block(&mut self) -> Block {
        let mut statements = Vec::new();

        self.advance();

        while !self.check(TokenType::BracketRight) && !self.is_eof() {
            statements.push(self.parse_statement());
            self.advance();
        }

        Block { statements }
    }

    // Expression parsing

    fn parse_expression(&mut self, precedence: Precedence) -> Expression {
        let prefix = match prefix_rule(self.current.token_type()) {
            Some(rule) => rule,
            None => {
                self.error_at_current("Cannot parse this token as a prefix expression");
                return Expression::Error;
            },
        };

        let mut left = prefix(self);

        while !self.peek_is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match infix_rule(self.peek.token_type()) {
                Some(rule) => rule,
                None => return left,
            };

            self.advance();
            left = infix(self, left);
        }

        left
    }

    fn parse_identifier(&mut self) -> Expression {
        Expression::Identifier(self.current.clone())
    }

    fn parse_integer_literal(&mut self) -> Expression {
        let parsed: Result<i64, _> = self.current.source().parse();

        match parsed {
            Ok(value) => Expression::IntegerLiteral(value),
            Err(err) => {
                self.error_at_current(&format!("Failed to parse int literal: {}", err));
                Expression::Error
            },
        }
    }

    /// Joins `INT . INT` back into one float literal; the lexer only ever
    /// produces plain integer tokens around a `Dot`.
    fn parse_float_literal(&mut self, left: Expression) -> Expression {
        let whole = match left {
            Expression::IntegerLiteral(value) => value,
            _ => {
                self.error_at_current("Expected integer literal before '.'");
                return Expression::Error;
            },
        };

        if !self.expect_peek(TokenType::Int, "Expected digits after '.'") {
            return Expression::Error;
        }

        // The raw fraction text keeps leading zeros that the integer value
        // would lose (3.012)
        let literal = format!("{}.{}", whole, self.current.source());
        let parsed: Result<f64, _> = literal.parse();

        match parsed {
            Ok(value) => Expression::FloatLiteral(value),
            Err(err) => {
                self.error_at_current(&format!("Failed to parse float literal: {}", err));
                Expression::Error
            },
        }
    }

    fn parse_string_literal(&mut self) -> Expression {
        Expression::StringLiteral(self.current.source().to_owned())
    }

    fn parse_boolean_literal(&mut self) -> Expression {
        Expression::BooleanLiteral(self.current.token_type() == TokenType::True)
    }

    fn parse_prefix_expression(&mut self) -> Expression {
        let operator = self.current.clone();

        self.advance();
        let right = self.parse_expression(Precedence::Prefix);

        Expression::Prefix { operator, right: Box::new(right) }
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Expression {
        let operator = self.current.clone();
        let precedence = self.current_precedence();

        self.advance();
        let right = self.parse_expression(precedence);

        Expression::Infix { left: Box::new(left), operator, right: Box::new(right) }
    }

    fn parse_grouped_expression(&mut self) -> Expression {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenType::ParenthesisRight, "Expected ')' after grouped expression") {
            return Expression::Error;
        }

        expression
    }

    fn parse_if_expression(&mut self) -> Expression {
        if !self.expect_peek(TokenType::ParenthesisLeft, "Expected '(' after 'if'") {
            return Expression::Error;
        }

        self.advance();
        let condition = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenType::ParenthesisRight, "Expected ')' after 'if' condition") {
            return Expression::Error;
        }

        if !self.expect_peek(TokenType::BracketLeft, "Expected '{' after 'if' condition") {
            return Expression::Error;
        }

        let consequence = self.parse_block();

        let alternative = if self.peek_is(TokenType::Else) {
            self.advance();

            if !self.expect_peek(TokenType::BracketLeft, "Expected '{' after 'else'") {
                return Expression::Error;
            }

            Some(self.parse_block())
        } else {
            None
        };

        Expression::If { condition: Box::new(condition), consequence, alternative }
    }

    fn parse_function_literal(&mut self) -> Expression {
        if !self.expect_peek(TokenType::ParenthesisLeft, "Expected '(' after 'fn'") {
            return Expression::Error;
        }

        let parameters = self.parse_function_parameters();

        if !self.expect_peek(TokenType::BracketLeft, "Expected '{' after function parameters") {
            return Expression::Error;
        }

        let body = self.parse_block();

        Expression::Function { parameters, body }
    }

    fn parse_function_parameters(&mut self) -> Vec<Token> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenType::ParenthesisRight) {
            self.advance();
            return parameters;
        }

        if !self.expect_peek(TokenType::Identifier, "Expected parameter name after '('") {
            return parameters;
        }

        parameters.push(self.current.clone());

        while self.peek_is(TokenType::Comma) {
            self.advance();

            if !self.expect_peek(TokenType::Identifier, "Expected parameter name after ','") {
                return parameters;
            }

            parameters.push(self.current.clone());
        }

        self.expect_peek(TokenType::ParenthesisRight, "Expected ')' after function parameters");
        parameters
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Expression {
        let arguments = self.parse_expression_list(TokenType::ParenthesisRight,
            "Expected ')' after function call arguments");

        Expression::Call { callee: Box::new(callee), arguments }
    }

    fn parse_array_literal(&mut self) -> Expression {
        let elements = self.parse_expression_list(TokenType::SquareBracketRight,
            "Expected ']' after array elements");

        Expression::Array(elements)
    }

    fn parse_index_expression(&mut self, left: Expression) -> Expression {
        self.advance();
        let index = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenType::SquareBracketRight, "Expected ']' after index expression") {
            return Expression::Error;
        }

        Expression::Index { left: Box::new(left), index: Box::new(index) }
    }

    fn parse_dictionary_literal(&mut self) -> Expression {
        let mut pairs = Vec::new();

        while !self.peek_is(TokenType::BracketRight) {
            if self.peek_is(TokenType::Eof) {
                self.error_at_peek("Expected '}' after dictionary pairs");
                return Expression::Error;
            }

            self.advance();
            let key = self.parse_expression(Precedence::Lowest);

            if !self.expect_peek(TokenType::Colon, "Expected ':' after dictionary key") {
                return Expression::Error;
            }

            self.advance();
            let value = self.parse_expression(Precedence::Lowest);

            pairs.push((key, value));

            if !self.peek_is(TokenType::BracketRight)
                && !self.expect_peek(TokenType::Comma, "Expected ',' or '}' after dictionary value") {
                return Expression::Error;
            }
        }

        self.advance();
        Expression::Dictionary(pairs)
    }

    /// Comma-separated expressions up to `end`; shared by call arguments and
    /// array literals.
    fn parse_expression_list(&mut self, end: TokenType, message: &str) -> Vec<Expression> {
        let mut expressions = Vec::new();

        if self.peek_is(end) {
            self.advance();
            return expressions;
        }

        self.advance();
        expressions.push(self.parse_expression(Precedence::Lowest));

        while self.peek_is(TokenType::Comma) {
            self.advance();
            self.advance();

            expressions.push(self.parse_expression(Precedence::Lowest));
        }

        self.expect_peek(end, message);
        expressions
    }

    // Token stream helpers

    fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.peek); // self.current = self.peek; self.peek gets replaced below
        self.peek = self.lexer.next_token();
    }

    fn expect_peek(&mut self, token_type: TokenType, message: &str) -> bool {
        if self.peek.token_type() == token_type {
            self.advance();
            return true;
        }

        self.error_at_peek(message);
        false
    }

    #[inline]
    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type() == token_type
    }

    #[inline]
    fn peek_is(&self, token_type: TokenType) -> bool {
        self.peek.token_type() == token_type
    }

    fn is_eof(&self) -> bool {
        self.current.token_type() == TokenType::Eof
    }

    fn current_precedence(&self) -> Precedence {
        PRECEDENCES.get(&self.current.token_type()).copied().unwrap_or(Precedence::Lowest)
    }

    fn peek_precedence(&self) -> Precedence {
        PRECEDENCES.get(&self.peek.token_type()).copied().unwrap_or(Precedence::Lowest)
    }

    // Error handling

    fn error_at_current(&mut self, message: &str) {
        Self::error_at_impl(&mut self.errors, &self.current, message);
    }

    fn error_at_peek(&mut self, message: &str) {
        Self::error_at_impl(&mut self.errors, &self.peek, message);
    }

    fn error_at_impl(errors: &mut Vec<String>, token: &Token, message: &str) {
        let mut error = format!("{} Error", token.start());

        if token.token_type() == TokenType::Eof {
            error.push_str(" at end: ");
        } else {
            error.push_str(&format!(" at '{}': ", token.source()));
        }

        error.push_str(message);
        errors.push(error);
    }
}
