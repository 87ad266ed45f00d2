use std::process::ExitCode;

fn main() -> ExitCode {
    btm_advisor_cli::run()
}
