use std::process::ExitCode;

fn main() -> eyre::Result<ExitCode> {
    treemint_cli::args::run()
}
