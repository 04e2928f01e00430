use crate::{
    cmd,
    handler,
    opts::{Treemint, TreemintSubcommand},
    utils,
};
use clap::Parser;
use eyre::Result;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

/// Run the `treemint` command-line interface.
pub fn run() -> Result<ExitCode> {
    setup()?;

    let args = Treemint::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run_command(args))
}

/// Setup the global logger and other utilities.
pub fn setup() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();
    utils::enable_paint();

    Ok(())
}

/// Run the subcommand.
///
/// Setup errors are returned. A failed mint flow operation only sets the exit status: the
/// controller has already logged it and notified the user if its policy says so.
pub async fn run_command(args: Treemint) -> Result<ExitCode> {
    let config = args.load_config()?;
    if !matches!(args.cmd, TreemintSubcommand::Connect) {
        config.validate()?;
    }
    trace!(?config, "loaded config");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("received ctrl-c, cancelling");
                shutdown.cancel();
            }
        }
    });

    let controller = cmd::controller(&args.wallet, &config, shutdown).await?;
    match cmd::run(&args.cmd, &controller).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            debug!(%err, "command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
