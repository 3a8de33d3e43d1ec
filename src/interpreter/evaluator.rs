use std::cell::RefCell;
use std::rc::Rc;
use crate::interpreter::ast::{Block, Expression, Program, Statement};
use crate::interpreter::builtins;
use crate::interpreter::environment::{Environment, Mutability, ReassignError};
use crate::interpreter::lexer::{Token, TokenType};
use crate::interpreter::object::{Dictionary, Function, Object, ObjectType};


/// Evaluates a parsed program against an environment. The result is the
/// value of the last statement; a `return` at the top level unwraps here and
/// the first `Error` aborts the rest of the program.
pub fn evaluate(program: &Program, env: &Rc<RefCell<Environment>>) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Object::ReturnValue(value) => return *value,
            error @ Object::Error(_) => return error,
            _ => {},
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Object {
    match statement {
        Statement::Let { name, value } => eval_binding(name, value, Mutability::Mutable, env),
        Statement::Const { name, value } => eval_binding(name, value, Mutability::Constant, env),
        Statement::Reassign { name, value } => eval_reassign(name, value, env),
        Statement::Return { value } => eval_return(value.as_ref(), env),
        Statement::While { condition, body } => eval_while(condition, body, env),
        Statement::Expression { expression } => eval_expression(expression, env),
        Statement::Error =>
            Object::Error(String::from("cannot evaluate a statement that failed to parse")),
    }
}

fn eval_block(block: &Block, env: &Rc<RefCell<Environment>>) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        // Blocks pass both signals through unchanged; only evaluate() and
        // apply_function() unwrap a ReturnValue
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_binding(name: &Token, value: &Expression, mutability: Mutability,
        env: &Rc<RefCell<Environment>>) -> Object {
    let value = eval_expression(value, env);

    if is_error(&value) {
        return value;
    }

    env.borrow_mut().define(name.source().to_owned(), value, mutability);
    Object::Null
}

fn eval_reassign(name: &Token, value: &Expression, env: &Rc<RefCell<Environment>>) -> Object {
    let value = eval_expression(value, env);

    if is_error(&value) {
        return value;
    }

    match env.borrow_mut().reassign(name.source(), value) {
        Ok(()) => Object::Null,
        Err(ReassignError::Constant) =>
            Object::Error(format!("cannot modify const identifier: {}", name.source())),
        Err(ReassignError::NotFound) =>
            Object::Error(format!("identifier not found: {}", name.source())),
    }
}

fn eval_return(value: Option<&Expression>, env: &Rc<RefCell<Environment>>) -> Object {
    let value = match value {
        Some(expression) => eval_expression(expression, env),
        None => Object::Null,
    };

    if is_error(&value) {
        return value;
    }

    Object::ReturnValue(Box::new(value))
}

fn eval_while(condition: &Expression, body: &Block, env: &Rc<RefCell<Environment>>) -> Object {
    loop {
        let decision = eval_expression(condition, env);

        if is_error(&decision) {
            return decision;
        }

        if !is_truthy(&decision) {
            // A loop is a statement; it never yields its body's value
            return Object::Null;
        }

        let result = eval_block(body, env);

        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
}

fn eval_expression(expression: &Expression, env: &Rc<RefCell<Environment>>) -> Object {
    match expression {
        Expression::Identifier(token) => eval_identifier(token, env),
        Expression::IntegerLiteral(value) => Object::Integer(*value),
        Expression::FloatLiteral(value) => Object::Float(*value),
        Expression::BooleanLiteral(value) => Object::Boolean(*value),
        Expression::StringLiteral(value) => Object::String(value.clone()),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);

            if is_error(&right) {
                return right;
            }

            eval_prefix_expression(operator, right)
        },
        Expression::Infix { left, operator, right } => {
            let left = eval_expression(left, env);

            if is_error(&left) {
                return left;
            }

            let right = eval_expression(right, env);

            if is_error(&right) {
                return right;
            }

            eval_infix_expression(operator, left, right)
        },
        Expression::If { condition, consequence, alternative } =>
            eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::Function { parameters, body } => Object::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        })),
        Expression::Call { callee, arguments } => {
            let callee = eval_expression(callee, env);

            if is_error(&callee) {
                return callee;
            }

            let arguments = match eval_expressions(arguments, env) {
                Ok(arguments) => arguments,
                Err(error) => return error,
            };

            apply_function(callee, arguments)
        },
        Expression::Array(elements) => match eval_expressions(elements, env) {
            Ok(elements) => Object::Array(elements),
            Err(error) => error,
        },
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);

            if is_error(&left) {
                return left;
            }

            let index = eval_expression(index, env);

            if is_error(&index) {
                return index;
            }

            eval_index_expression(left, index)
        },
        Expression::Dictionary(pairs) => eval_dictionary_literal(pairs, env),
        Expression::Error =>
            Object::Error(String::from("cannot evaluate an expression that failed to parse")),
    }
}

fn eval_identifier(token: &Token, env: &Rc<RefCell<Environment>>) -> Object {
    if let Some(value) = env.borrow().get(token.source()) {
        return value;
    }

    if let Some(builtin) = builtins::lookup(token.source()) {
        return Object::Builtin(builtin);
    }

    Object::Error(format!("identifier not found: {}", token.source()))
}

fn eval_prefix_expression(operator: &Token, right: Object) -> Object {
    match operator.token_type() {
        TokenType::Not => Object::Boolean(!is_truthy(&right)),
        TokenType::Minus => eval_minus_operator(right),
        _ => Object::Error(format!("unknown operator: {}{}",
            operator.source(), right.object_type())),
    }
}

fn eval_minus_operator(right: Object) -> Object {
    match right {
        Object::Integer(value) => checked_integer(value.checked_neg()),
        Object::Float(value) => Object::Float(-value),
        right => Object::Error(format!("unknown operator: -{}", right.object_type())),
    }
}

fn eval_infix_expression(operator: &Token, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(left), Object::Integer(right)) =>
            eval_integer_infix(operator, *left, *right),
        (Object::Integer(left), Object::Float(right)) =>
            eval_float_infix(operator, *left as f64, *right),
        (Object::Float(left), Object::Integer(right)) =>
            eval_float_infix(operator, *left, *right as f64),
        (Object::Float(left), Object::Float(right)) =>
            eval_float_infix(operator, *left, *right),
        (Object::String(left), Object::String(right)) =>
            eval_string_infix(operator, left, right),
        _ => match operator.token_type() {
            TokenType::Equal => Object::Boolean(left == right),
            TokenType::NotEqual => Object::Boolean(left != right),
            _ if left.object_type() != right.object_type() =>
                Object::Error(format!("type mismatch: {} {} {}",
                    left.object_type(), operator.source(), right.object_type())),
            _ => Object::Error(format!("unknown operator: {} {} {}",
                left.object_type(), operator.source(), right.object_type())),
        },
    }
}

fn eval_integer_infix(operator: &Token, left: i64, right: i64) -> Object {
    match operator.token_type() {
        TokenType::Plus => checked_integer(left.checked_add(right)),
        TokenType::Minus => checked_integer(left.checked_sub(right)),
        TokenType::Multiply => checked_integer(left.checked_mul(right)),
        // True division: `/` produces a float even on two integers
        TokenType::Divide => {
            if right == 0 {
                return Object::Error(String::from("division by zero"));
            }

            Object::Float(left as f64 / right as f64)
        },
        TokenType::Modulo => {
            if right == 0 {
                return Object::Error(String::from("division by zero"));
            }

            Object::Integer(floored_mod_integer(left, right))
        },
        TokenType::Less => Object::Boolean(left < right),
        TokenType::Greater => Object::Boolean(left > right),
        TokenType::Equal => Object::Boolean(left == right),
        TokenType::NotEqual => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: {} {} {}",
            ObjectType::Integer, operator.source(), ObjectType::Integer)),
    }
}

fn eval_float_infix(operator: &Token, left: f64, right: f64) -> Object {
    match operator.token_type() {
        TokenType::Plus => Object::Float(left + right),
        TokenType::Minus => Object::Float(left - right),
        TokenType::Multiply => Object::Float(left * right),
        TokenType::Divide => {
            if right == 0.0 {
                return Object::Error(String::from("division by zero"));
            }

            Object::Float(left / right)
        },
        TokenType::Modulo => {
            if right == 0.0 {
                return Object::Error(String::from("division by zero"));
            }

            Object::Float(floored_mod_float(left, right))
        },
        TokenType::Less => Object::Boolean(left < right),
        TokenType::Greater => Object::Boolean(left > right),
        TokenType::Equal => Object::Boolean(left == right),
        TokenType::NotEqual => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: {} {} {}",
            ObjectType::Float, operator.source(), ObjectType::Float)),
    }
}

/// Maps a checked arithmetic result onto an object; overflow becomes an
/// `Error` value, never a host panic.
fn checked_integer(value: Option<i64>) -> Object {
    match value {
        Some(value) => Object::Integer(value),
        None => Object::Error(String::from("integer overflow")),
    }
}

// Sign of the result follows the divisor, like the `%` most scripting
// languages implement
fn floored_mod_integer(left: i64, right: i64) -> i64 {
    // Remainder by -1 is always zero; `%` itself would overflow on i64::MIN
    if right == -1 {
        return 0;
    }

    let remainder = left % right;

    if remainder != 0 && (remainder < 0) != (right < 0) {
        remainder + right
    } else {
        remainder
    }
}

fn floored_mod_float(left: f64, right: f64) -> f64 {
    let remainder = left % right;

    if remainder != 0.0 && (remainder < 0.0) != (right < 0.0) {
        remainder + right
    } else {
        remainder
    }
}

fn eval_string_infix(operator: &Token, left: &str, right: &str) -> Object {
    match operator.token_type() {
        TokenType::Plus => Object::String(format!("{}{}", left, right)),
        TokenType::Equal => Object::Boolean(left == right),
        TokenType::NotEqual => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: {} {} {}",
            ObjectType::String, operator.source(), ObjectType::String)),
    }
}

fn eval_if_expression(condition: &Expression, consequence: &Block, alternative: Option<&Block>,
        env: &Rc<RefCell<Environment>>) -> Object {
    let decision = eval_expression(condition, env);

    if is_error(&decision) {
        return decision;
    }

    if is_truthy(&decision) {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Object::Null
    }
}

/// Evaluates expressions left to right, stopping at the first error.
fn eval_expressions(expressions: &[Expression],
        env: &Rc<RefCell<Environment>>) -> Result<Vec<Object>, Object> {
    let mut results = Vec::with_capacity(expressions.len());

    for expression in expressions {
        let result = eval_expression(expression, env);

        if is_error(&result) {
            return Err(result);
        }

        results.push(result);
    }

    Ok(results)
}

fn apply_function(callee: Object, arguments: Vec<Object>) -> Object {
    match callee {
        Object::Function(function) => {
            let call_env = match extend_function_env(&function, arguments) {
                Ok(call_env) => call_env,
                Err(error) => return error,
            };

            let result = eval_block(&function.body, &call_env);
            unwrap_return_value(result)
        },
        Object::Builtin(builtin) => (builtin.function)(arguments),
        callee => Object::Error(format!("not a function: {}", callee.object_type())),
    }
}

/// Builds the call frame: a fresh environment enclosed by the function's
/// defining environment, with parameters bound to the arguments. Missing
/// arguments are an error; extra arguments are ignored.
fn extend_function_env(function: &Function,
        arguments: Vec<Object>) -> Result<Rc<RefCell<Environment>>, Object> {
    let env = Environment::new_with_outer(Rc::clone(&function.env));
    let mut arguments = arguments.into_iter();

    for parameter in &function.parameters {
        match arguments.next() {
            Some(argument) => env.borrow_mut().define(
                parameter.source().to_owned(), argument, Mutability::Mutable),
            None => return Err(Object::Error(
                format!("{} argument missing from function call.", parameter.source()))),
        }
    }

    Ok(env)
}

fn unwrap_return_value(result: Object) -> Object {
    match result {
        Object::ReturnValue(value) => *value,
        result => result,
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(index)) =>
            eval_array_index(elements, *index),
        (Object::Dictionary(dictionary), _) => eval_dictionary_index(dictionary, &index),
        _ => Object::Error(format!("index operator not supported: {}", left.object_type())),
    }
}

fn eval_array_index(elements: &[Object], index: i64) -> Object {
    let max = elements.len() as i64 - 1;

    if index < 0 || index > max {
        return Object::Null;
    }

    elements[index as usize].clone()
}

fn eval_dictionary_index(dictionary: &Dictionary, key: &Object) -> Object {
    let hash_key = match key.hash_key() {
        Some(hash_key) => hash_key,
        None => return Object::Error(
            format!("unusable as dictionary key: {}", key.object_type())),
    };

    match dictionary.get(&hash_key) {
        Some(value) => value.clone(),
        None => Object::Null,
    }
}

fn eval_dictionary_literal(pairs: &[(Expression, Expression)],
        env: &Rc<RefCell<Environment>>) -> Object {
    let mut dictionary = Dictionary::new();

    for (key_expression, value_expression) in pairs {
        let key = eval_expression(key_expression, env);

        if is_error(&key) {
            return key;
        }

        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => return Object::Error(
                format!("unusable as hash key: {}", key.object_type())),
        };

        let value = eval_expression(value_expression, env);

        if is_error(&value) {
            return value;
        }

        dictionary.insert(hash_key, key, value);
    }

    Object::Dictionary(dictionary)
}

fn is_truthy(object: &Object) -> bool {
    // Only null and false are falsy; 0, 0.0 and "" are truthy
    !matches!(object, Object::Null | Object::Boolean(false))
}

fn is_error(object: &Object) -> bool {
    matches!(object, Object::Error(_))
}
