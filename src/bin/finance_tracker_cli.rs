use std::process::ExitCode;

fn main() -> ExitCode {
    finance_tracker::init();
    match finance_tracker::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "session ended with an error");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
