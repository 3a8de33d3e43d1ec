use std::io::{BufRead, Write};
use crate::interpreter::ast::Statement;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::object::Object;
use crate::interpreter::parser::Parser;

/// Runs the interactive prompt until `input` reaches end of file.
///
/// Each submitted line is parsed and evaluated as its own program, but all
/// lines share one environment, so bindings persist across submissions.
pub fn start(input: &mut impl BufRead, output: &mut impl Write) -> Result<(), std::io::Error> {
    writeln!(output)?;
    writeln!(output, "Monkey {} [Running on {}]",
        env!("CARGO_PKG_VERSION"), std::env::consts::OS)?;
    writeln!(output, "Type exit() to exit from the REPL.")?;
    writeln!(output)?;

    let env = Environment::new_global();

    loop {
        write!(output, ">>> ")?;
        output.flush()?;

        let mut line = String::new();

        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        if line.ends_with('\n') {
            line.pop();

            if line.ends_with('\r') {
                line.pop();
            }
        }

        if line.is_empty() {
            continue;
        }

        let lexer = Lexer::new(&line);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();

        if parser.had_error() {
            writeln!(output, "There was an error while parsing the program.")?;
            writeln!(output, "Errors:")?;

            for error in parser.errors() {
                writeln!(output, "\t{}\n", error)?;
            }

            continue;
        }

        // Bindings, loops and bare returns evaluate to null and stay quiet;
        // an expression result echoes even when it is null
        let echoes_null = matches!(program.statements.last(),
            Some(Statement::Expression { .. }));

        let result = evaluate(&program, &env);

        if result != Object::Null || echoes_null {
            writeln!(output, "{}", result.inspect())?;
        }
    }
}

#[cfg(test)]
mod tests;
