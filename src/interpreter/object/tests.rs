use super::*;
use crate::interpreter::ast::{Expression, Statement};
use crate::interpreter::builtins;
use crate::interpreter::lexer::{TokenPos, TokenType};

fn identifier(name: &str) -> Token {
    let pos = TokenPos::new(1, 1);
    Token::new(TokenType::Identifier, String::from(name), pos, pos)
}

mod hash_keys {
    use super::*;

    #[test]
    pub fn test_string_hash_keys_by_content() {
        let hello1 = Object::String(String::from("Hello World"));
        let hello2 = Object::String(String::from("Hello World"));
        let diff1 = Object::String(String::from("My name is johnny"));
        let diff2 = Object::String(String::from("My name is johnny"));

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_eq!(diff1.hash_key(), diff2.hash_key());
        assert_ne!(hello1.hash_key(), diff1.hash_key());
    }

    #[test]
    pub fn test_hash_keys_are_type_tagged() {
        assert_ne!(Object::Integer(1).hash_key(), Object::Boolean(true).hash_key());
        assert_ne!(Object::Integer(1).hash_key(), Object::Float(1.0).hash_key());
        assert_ne!(Object::String(String::from("1")).hash_key(), Object::Integer(1).hash_key());
    }

    #[test]
    pub fn test_float_hash_keys_by_content() {
        assert_eq!(Object::Float(1.5).hash_key(), Object::Float(1.5).hash_key());
        assert_ne!(Object::Float(1.5).hash_key(), Object::Float(2.5).hash_key());
    }

    #[test]
    pub fn test_only_scalars_hash() {
        assert_eq!(None, Object::Null.hash_key());
        assert_eq!(None, Object::Array(Vec::new()).hash_key());
        assert_eq!(None, Object::Dictionary(Dictionary::new()).hash_key());
    }
}

mod inspect {
    use super::*;

    #[test]
    pub fn test_scalar_inspect() {
        assert_eq!("5", Object::Integer(5).inspect());
        assert_eq!("3.14", Object::Float(3.14).inspect());
        assert_eq!("5.0", Object::Float(5.0).inspect());
        assert_eq!("true", Object::Boolean(true).inspect());
        assert_eq!("false", Object::Boolean(false).inspect());
        assert_eq!("hello", Object::String(String::from("hello")).inspect());
        assert_eq!("null", Object::Null.inspect());
    }

    #[test]
    pub fn test_error_inspect() {
        let error = Object::Error(String::from("type mismatch: INTEGER + BOOLEAN"));
        assert_eq!("Error: type mismatch: INTEGER + BOOLEAN", error.inspect());
    }

    #[test]
    pub fn test_return_value_inspect_unwraps() {
        let value = Object::ReturnValue(Box::new(Object::Integer(5)));
        assert_eq!("5", value.inspect());
    }

    #[test]
    pub fn test_array_inspect() {
        let array = Object::Array(vec![
            Object::Integer(1),
            Object::String(String::from("two")),
            Object::Float(3.5),
        ]);

        assert_eq!("[1, two, 3.5]", array.inspect());
        assert_eq!("[]", Object::Array(Vec::new()).inspect());
    }

    #[test]
    pub fn test_builtin_inspect() {
        let builtin = builtins::lookup("len").unwrap();
        assert_eq!("builtin function", Object::Builtin(builtin).inspect());
    }

    #[test]
    pub fn test_function_inspect() {
        let env = Environment::new_global();
        let body = Block {
            statements: vec![Statement::Expression {
                expression: Expression::Infix {
                    left: Box::new(Expression::Identifier(identifier("x"))),
                    operator: Token::new(TokenType::Plus, String::from("+"),
                        TokenPos::new(1, 1), TokenPos::new(1, 1)),
                    right: Box::new(Expression::IntegerLiteral(2)),
                },
            }],
        };

        let function = Object::Function(Rc::new(Function {
            parameters: vec![identifier("x")],
            body,
            env,
        }));

        assert_eq!("fn(x) {\n(x + 2)\n}", function.inspect());
    }
}

mod dictionary {
    use super::*;

    fn string_key(value: &str) -> (HashKey, Object) {
        (HashKey::String(String::from(value)), Object::String(String::from(value)))
    }

    #[test]
    pub fn test_preserves_insertion_order() {
        let mut dictionary = Dictionary::new();

        let (hash, key) = string_key("one");
        dictionary.insert(hash, key, Object::Integer(1));
        let (hash, key) = string_key("two");
        dictionary.insert(hash, key, Object::Integer(2));
        let (hash, key) = string_key("three");
        dictionary.insert(hash, key, Object::Integer(3));

        assert_eq!("{one: 1, two: 2, three: 3}", dictionary.inspect());
    }

    #[test]
    pub fn test_overwrite_keeps_first_slot() {
        let mut dictionary = Dictionary::new();

        let (hash, key) = string_key("one");
        dictionary.insert(hash, key, Object::Integer(1));
        let (hash, key) = string_key("two");
        dictionary.insert(hash, key, Object::Integer(2));
        let (hash, key) = string_key("one");
        dictionary.insert(hash, key, Object::Integer(99));

        assert_eq!("{one: 99, two: 2}", dictionary.inspect());
        assert_eq!(Some(&Object::Integer(99)),
            dictionary.get(&HashKey::String(String::from("one"))));
    }

    #[test]
    pub fn test_missing_key() {
        let dictionary = Dictionary::new();
        assert_eq!(None, dictionary.get(&HashKey::Integer(0)));
    }

    #[test]
    pub fn test_empty_inspect() {
        assert_eq!("{}", Dictionary::new().inspect());
    }
}

mod types {
    use super::*;

    #[test]
    pub fn test_type_tags() {
        let tags = [
            (Object::Integer(1), "INTEGER"),
            (Object::Float(1.0), "FLOAT"),
            (Object::Boolean(true), "BOOLEAN"),
            (Object::String(String::new()), "STRING"),
            (Object::Null, "NULL"),
            (Object::ReturnValue(Box::new(Object::Null)), "RETURN_VALUE"),
            (Object::Error(String::new()), "ERROR"),
            (Object::Array(Vec::new()), "ARRAY"),
            (Object::Dictionary(Dictionary::new()), "DICTIONARY"),
        ];

        for (object, expected) in tags {
            assert_eq!(expected, object.object_type().to_string());
        }

        let builtin = builtins::lookup("len").unwrap();
        assert_eq!("BUILTIN", Object::Builtin(builtin).object_type().to_string());
    }
}
