use super::*;

fn banner() -> String {
    format!("\nMonkey {} [Running on {}]\nType exit() to exit from the REPL.\n\n",
        env!("CARGO_PKG_VERSION"), std::env::consts::OS)
}

fn run_repl(input: &str) -> String {
    let mut input = input.as_bytes();
    let mut output = Vec::new();

    start(&mut input, &mut output).unwrap();

    String::from_utf8(output).unwrap()
}

#[test]
pub fn test_prints_expression_results() {
    assert_eq!(format!("{}>>> 3\n>>> ", banner()), run_repl("1 + 2\n"));
}

#[test]
pub fn test_environment_persists_across_lines() {
    assert_eq!(format!("{}>>> >>> 10\n>>> ", banner()), run_repl("let a = 5;\na * 2\n"));
}

#[test]
pub fn test_binding_results_stay_quiet() {
    assert_eq!(format!("{}>>> >>> ", banner()), run_repl("let a = 5;\n"));
}

#[test]
pub fn test_loop_and_reassignment_results_stay_quiet() {
    assert_eq!(format!("{}>>> >>> >>> >>> 4\n>>> ", banner()),
        run_repl("let i = 0;\nwhile (i < 3) { i = i + 1; }\ni = i + 1\ni\n"));
}

#[test]
pub fn test_null_expression_results_echo() {
    let input = "[1][5]\nif (false) { 1 }\n{}[\"missing\"]\n";
    assert_eq!(format!("{}>>> null\n>>> null\n>>> null\n>>> ", banner()), run_repl(input));
}

#[test]
pub fn test_empty_lines_are_skipped() {
    assert_eq!(format!("{}>>> >>> >>> 1\n>>> ", banner()), run_repl("\n\n1\n"));
}

#[test]
pub fn test_parse_errors_are_reported_before_the_next_prompt() {
    let expected = format!(
        "{}>>> There was an error while parsing the program.\nErrors:\n\t[line 1 column 1] Error at '@': Cannot parse this token as a prefix expression\n\n>>> 5\n>>> ",
        banner());

    assert_eq!(expected, run_repl("@\n5\n"));
}

#[test]
pub fn test_evaluation_errors_are_printed() {
    assert_eq!(format!("{}>>> Error: identifier not found: foobar\n>>> ", banner()),
        run_repl("foobar\n"));
}

#[test]
pub fn test_last_line_without_newline_still_runs() {
    assert_eq!(format!("{}>>> 7\n>>> ", banner()), run_repl("3 + 4"));
}
