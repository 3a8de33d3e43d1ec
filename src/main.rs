use std::process::ExitCode;

fn main() -> ExitCode {
    match monkey_lang::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Parse and runtime failures have already been reported
            if err.kind() != std::io::ErrorKind::InvalidData {
                eprintln!("{}", err);
            }

            ExitCode::FAILURE
        },
    }
}
