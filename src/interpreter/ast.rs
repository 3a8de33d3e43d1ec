use std::fmt::{Debug, Formatter};

use crate::interpreter::lexer::Token;

/// Root of a parsed source text.
#[derive(Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Debug for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statements.iter().map(|stmt| format!("{:?}", stmt))
            .collect::<Vec<String>>().join(""))
    }
}

/// An ordered statement sequence delimited by `{` and `}`. Blocks only occur
/// as children of `if`, `while` and function literals; they are not produced
/// by top-level statement dispatch.
#[derive(Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Debug for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statements.iter().map(|stmt| format!("{:?}", stmt))
            .collect::<Vec<String>>().join(""))
    }
}

#[derive(Clone, PartialEq)]
pub enum Statement {
    Let {
        name: Token,
        value: Expression,
    },
    Const {
        name: Token,
        value: Expression,
    },
    Reassign {
        name: Token,
        value: Expression,
    },
    Return {
        value: Option<Expression>,
    },
    While {
        condition: Expression,
        body: Block,
    },
    Expression {
        expression: Expression,
    },

    Error,
}

impl Debug for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {:?};", name.source(), value),
            Statement::Const { name, value } => write!(f, "const {} = {:?};", name.source(), value),
            Statement::Reassign { name, value } => write!(f, "{} = {:?};", name.source(), value),
            Statement::Return { value } => match value {
                Some(value) => write!(f, "return {:?};", value),
                None => write!(f, "return;"),
            },
            Statement::While { condition, body } => write!(f, "while{:?} {:?}", condition, body),
            Statement::Expression { expression } => write!(f, "{:?}", expression),

            Statement::Error => write!(f, "Error;"),
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum Expression {
    Identifier(Token),
    IntegerLiteral(i64),
    FloatLiteral(f64),
    BooleanLiteral(bool),
    StringLiteral(String),

    Prefix {
        operator: Token,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function {
        parameters: Vec<Token>,
        body: Block,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Array(Vec<Expression>),
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    Dictionary(Vec<(Expression, Expression)>),

    Error,
}

impl Debug for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name.source()),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            // Debug float formatting keeps the decimal point on whole values
            Expression::FloatLiteral(value) => write!(f, "{:?}", value),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => write!(f, "{}", value),

            Expression::Prefix { operator, right } => write!(f, "({}{:?})", operator.source(), right),
            Expression::Infix { left, operator, right } =>
                write!(f, "({:?} {} {:?})", left, operator.source(), right),
            Expression::If { condition, consequence, alternative } => {
                write!(f, "if{:?} {:?}", condition, consequence)?;

                if let Some(alternative) = alternative {
                    write!(f, "else {:?}", alternative)?;
                }

                Ok(())
            },
            Expression::Function { parameters, body } =>
                write!(f, "fn({}) {:?}", parameters.iter()
                    .map(|parameter| parameter.source().to_owned())
                    .collect::<Vec<String>>().join(", "), body),
            Expression::Call { callee, arguments } =>
                write!(f, "{:?}({})", callee, arguments.iter()
                    .map(|argument| format!("{:?}", argument))
                    .collect::<Vec<String>>().join(", ")),
            Expression::Array(elements) => write!(f, "[{}]", elements.iter()
                .map(|element| format!("{:?}", element))
                .collect::<Vec<String>>().join(", ")),
            Expression::Index { left, index } => write!(f, "({:?}[{:?}])", left, index),
            Expression::Dictionary(pairs) => write!(f, "{{{}}}", pairs.iter()
                .map(|(key, value)| format!("{:?}:{:?}", key, value))
                .collect::<Vec<String>>().join(", ")),

            Expression::Error => write!(f, "Error"),
        }
    }
}
