pub mod util;
pub mod interpreter;
pub mod repl;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use clap::Parser as ClapParser;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::object::Object;
use crate::interpreter::parser::Parser;

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Script file to run; starts the REPL when omitted")]
    pub file: Option<PathBuf>,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

pub fn run() -> Result<(), std::io::Error> {
    let config: Config = Config::parse();

    match &config.file {
        Some(path) => run_file(path, config.verbose),
        None => repl::start(&mut std::io::stdin().lock(), &mut std::io::stdout()),
    }
}

fn run_file(path: &Path, verbose: bool) -> Result<(), std::io::Error> {
    let supported = matches!(path.extension().and_then(OsStr::to_str), Some("m" | "mon"));

    if !supported {
        eprintln!("Unrecognized file type. Only use .m or .mon files.");
        return Err(std::io::Error::from(std::io::ErrorKind::InvalidData));
    }

    let source = std::fs::read_to_string(path)?;

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if parser.had_error() {
        for error in parser.errors() {
            eprintln!("{}", error);
        }

        return Err(std::io::Error::from(std::io::ErrorKind::InvalidData));
    }

    if verbose {
        println!("{}", program.statements.iter()
            .map(|statement| format!("{:?}", statement))
            .collect::<Vec<String>>().join("\n"));
    }

    let env = Environment::new_global();
    let result = evaluate(&program, &env);

    if let Object::Error(_) = result {
        eprintln!("{}", result.inspect());
        return Err(std::io::Error::from(std::io::ErrorKind::InvalidData));
    }

    Ok(())
}
