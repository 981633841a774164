#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match nmask::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("nmask: {e}");
            ExitCode::from(2)
        }
    }
}
