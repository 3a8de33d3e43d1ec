use std::fmt::{self, Debug, Formatter};
use std::io::{self, BufRead, Write};
use std::process;
use lazy_static::lazy_static;
use crate::interpreter::object::{Object, ObjectType};

/// Native function. Takes its already-evaluated arguments and returns the
/// result; contract violations come back as `Object::Error` values, never
/// as host failures.
pub struct Builtin {
    pub name: &'static str,
    pub doc: &'static str,
    pub function: fn(Vec<Object>) -> Object,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "builtin {}", self.name)
    }
}

lazy_static! {
    /// Registration order is user-visible: `help()` lists names in this
    /// order.
    pub static ref BUILTINS: Vec<Builtin> = vec![
        Builtin {
            name: "len",
            doc: "Gives the length of a string, array or number of keys of a dictionary.",
            function: builtin_len,
        },
        Builtin {
            name: "exit",
            doc: "Exits from the interpreter.",
            function: builtin_exit,
        },
        Builtin {
            name: "type",
            doc: "Returns the type of an object.",
            function: builtin_type,
        },
        Builtin {
            name: "help",
            doc: "Returns the help string of a builtin function.\nIf no arguments are provided the list of inbuilt functions is provided.",
            function: builtin_help,
        },
        Builtin {
            name: "puts",
            doc: "Prints the given arguments to stdout.",
            function: builtin_puts,
        },
        Builtin {
            name: "gets",
            doc: "Accepts inputs from the user in the form of a string.\nYou can provide an optional string that will serve as a\nprompt for the user.",
            function: builtin_gets,
        },
        Builtin {
            name: "int",
            doc: "Converts a string or a float to an integer.",
            function: builtin_int,
        },
        Builtin {
            name: "float",
            doc: "Convert an int or a string to a float.",
            function: builtin_float,
        },
        Builtin {
            name: "str",
            doc: "Converts any monkey object to its string representation.",
            function: builtin_str,
        },
        Builtin {
            name: "abs",
            doc: "Gives the absolute value of an integer or float.",
            function: builtin_abs,
        },
        Builtin {
            name: "first",
            doc: "Returns the first element of an array.",
            function: builtin_first,
        },
        Builtin {
            name: "last",
            doc: "Returns the last element of an array.",
            function: builtin_last,
        },
        Builtin {
            name: "rest",
            doc: "Returns a new array with all the elements of the argument array,\nexcept the first.",
            function: builtin_rest,
        },
        Builtin {
            name: "push",
            doc: "Creates a new array with the element provided by the user appended to it.\nThe first argument should be the array, and the second should be the element.",
            function: builtin_push,
        },
        Builtin {
            name: "zip",
            doc: "Creates an array from the elements of the arrays provided as arguments.\n\nThe length of the resulting array will be equal to the length of the smallest\narray. This is similar to the zip function found in Python.",
            function: builtin_zip,
        },
        Builtin {
            name: "sumarr",
            doc: "Returns the sum of the integer and float elements in an array.\nIf there is any other element except that of the type INTEGER\nor FLOAT an error will be returned instead.",
            function: builtin_sumarr,
        },
    ];
}

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

fn wrong_arguments(got: usize, want: &str) -> Object {
    Object::Error(format!("wrong number of arguments. got={}, want={}", got, want))
}

fn unsupported_argument(name: &str, object_type: ObjectType) -> Object {
    Object::Error(format!("argument to `{}` not supported, got {}", name, object_type))
}

fn builtin_len(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        Object::String(value) => Object::Integer(value.chars().count() as i64),
        argument => unsupported_argument("len", argument.object_type()),
    }
}

fn builtin_exit(arguments: Vec<Object>) -> Object {
    if !arguments.is_empty() {
        return wrong_arguments(arguments.len(), "0");
    }

    process::exit(0);
}

fn builtin_type(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    Object::String(arguments[0].object_type().to_string())
}

fn builtin_help(arguments: Vec<Object>) -> Object {
    if arguments.len() > 1 {
        return wrong_arguments(arguments.len(), " <=1");
    }

    match arguments.first() {
        None => {
            let names: Vec<&str> = BUILTINS.iter().map(|builtin| builtin.name).collect();
            Object::String(names.join(", "))
        },
        Some(Object::Builtin(builtin)) => Object::String(String::from(builtin.doc)),
        Some(argument) => unsupported_argument("help", argument.object_type()),
    }
}

fn builtin_puts(arguments: Vec<Object>) -> Object {
    for argument in &arguments {
        println!("{}", argument.inspect());
    }

    Object::Null
}

fn builtin_gets(arguments: Vec<Object>) -> Object {
    if arguments.len() > 1 {
        return wrong_arguments(arguments.len(), " <=1");
    }

    if let Some(argument) = arguments.first() {
        match argument {
            Object::String(prompt) => {
                print!("{}", prompt);
                let _ = io::stdout().flush();
            },
            argument => return unsupported_argument("gets", argument.object_type()),
        }
    }

    let mut line = String::new();

    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();

                if line.ends_with('\r') {
                    line.pop();
                }
            }

            Object::String(line)
        },
        Err(err) => Object::Error(format!("could not read input: {}", err)),
    }
}

fn builtin_int(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::String(value) => match value.trim().parse::<i64>() {
            Ok(value) => Object::Integer(value),
            Err(_) => Object::Error(String::from("argument cannot be converted to an integer.")),
        },
        // Truncates toward zero
        Object::Float(value) => Object::Integer(*value as i64),
        argument => unsupported_argument("int", argument.object_type()),
    }
}

fn builtin_float(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::String(value) => match value.trim().parse::<f64>() {
            Ok(value) => Object::Float(value),
            Err(_) => Object::Error(String::from("argument cannot be converted to a float.")),
        },
        Object::Integer(value) => Object::Float(*value as f64),
        argument => unsupported_argument("float", argument.object_type()),
    }
}

fn builtin_str(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    Object::String(arguments[0].inspect())
}

fn builtin_abs(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::Integer(value) => match value.checked_abs() {
            Some(value) => Object::Integer(value),
            None => Object::Error(String::from("integer overflow")),
        },
        Object::Float(value) => Object::Float(value.abs()),
        argument => unsupported_argument("abs", argument.object_type()),
    }
}

fn builtin_first(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::Array(elements) => match elements.first() {
            Some(element) => element.clone(),
            None => Object::Null,
        },
        argument => unsupported_argument("first", argument.object_type()),
    }
}

fn builtin_last(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::Array(elements) => match elements.last() {
            Some(element) => element.clone(),
            None => Object::Null,
        },
        argument => unsupported_argument("last", argument.object_type()),
    }
}

fn builtin_rest(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    match &arguments[0] {
        Object::Array(elements) if elements.is_empty() => Object::Null,
        Object::Array(elements) => Object::Array(elements[1..].to_vec()),
        argument => unsupported_argument("rest", argument.object_type()),
    }
}

fn builtin_push(arguments: Vec<Object>) -> Object {
    let [array, element] = match <[Object; 2]>::try_from(arguments) {
        Ok(arguments) => arguments,
        Err(arguments) => return wrong_arguments(arguments.len(), "2"),
    };

    match array {
        Object::Array(mut elements) => {
            elements.push(element);
            Object::Array(elements)
        },
        argument => unsupported_argument("push", argument.object_type()),
    }
}

fn builtin_zip(arguments: Vec<Object>) -> Object {
    if arguments.len() < 2 {
        return wrong_arguments(arguments.len(), " >=2");
    }

    let mut arrays: Vec<&[Object]> = Vec::with_capacity(arguments.len());

    for argument in &arguments {
        match argument {
            Object::Array(elements) if elements.is_empty() =>
                return Object::Error(String::from("An argument to `zip` is empty.")),
            Object::Array(elements) => arrays.push(elements),
            argument => return unsupported_argument("zip", argument.object_type()),
        }
    }

    let shortest = arrays.iter().map(|elements| elements.len()).min().unwrap_or(0);

    let rows: Vec<Object> = (0..shortest)
        .map(|row| Object::Array(
            arrays.iter().map(|elements| elements[row].clone()).collect()))
        .collect();

    Object::Array(rows)
}

fn builtin_sumarr(arguments: Vec<Object>) -> Object {
    if arguments.len() != 1 {
        return wrong_arguments(arguments.len(), "1");
    }

    let elements = match &arguments[0] {
        Object::Array(elements) => elements,
        argument => return unsupported_argument("sumarr", argument.object_type()),
    };

    // An all-integer array sums to an Integer; the first float switches the
    // whole sum to floating point.
    let mut integer_sum: i64 = 0;
    let mut float_sum: f64 = 0.0;
    let mut saw_float = false;

    for element in elements {
        match element {
            Object::Integer(value) => {
                if saw_float {
                    float_sum += *value as f64;
                } else {
                    integer_sum = match integer_sum.checked_add(*value) {
                        Some(sum) => sum,
                        None => return Object::Error(String::from("integer overflow")),
                    };
                }
            },
            Object::Float(value) => {
                if !saw_float {
                    saw_float = true;
                    float_sum = integer_sum as f64;
                }

                float_sum += *value;
            },
            _ => return Object::Error(
                String::from("array contains a non-INTEGER or non-FLOAT element")),
        }
    }

    if saw_float {
        Object::Float(float_sum)
    } else {
        Object::Integer(integer_sum)
    }
}
