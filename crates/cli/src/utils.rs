use tracing_subscriber::prelude::*;

/// Directives silencing the networking stack unless `RUST_LOG` asks for it.
const DEFAULT_DIRECTIVES: &[&str] = &["hyper=off", "hyper_util=off", "reqwest=off", "h2=off"];

/// Initializes a tracing Subscriber for logging
pub fn subscriber() {
    tracing_subscriber::Registry::default()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init()
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for &directive in DEFAULT_DIRECTIVES {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Loads a dotenv file from the current working directory.
///
/// A missing file is not an error.
pub fn load_dotenv() {
    if let Ok(cwd) = std::env::current_dir() {
        dotenvy::from_path(cwd.join(".env")).ok();
    }
}

/// Disables terminal colours when the output is not a terminal or `NO_COLOR` is set.
pub fn enable_paint() {
    let enable = yansi::Condition::os_support() && yansi::Condition::tty_and_color_live();
    yansi::whenever(yansi::Condition::cached(enable));
}
