use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Reports setup errors, such as an invalid config, with one line per distinct cause.
///
/// Mint flow failures never get here, they only set the exit status.
#[derive(Clone, Copy, Debug, Default)]
pub struct Handler;

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format(": ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }
        let causes = dedup_chain(error);
        let Some((error, sources)) = causes.split_first() else { return Ok(()) };
        write!(f, "treemint: {error}")?;
        for source in sources {
            write!(f, "\n  caused by: {source}")?;
        }
        Ok(())
    }
}

/// Displays the error chain, dropping sources already contained in the error above them.
pub fn dedup_chain(error: &dyn Error) -> Vec<String> {
    let mut causes = vec![error.to_string()];
    let mut next = error.source();
    while let Some(err) = next {
        causes.push(err.to_string());
        next = err.source();
    }
    causes.dedup_by(|source, parent| parent.contains(source.as_str()));
    causes
}

/// Installs [`Handler`] as the [`eyre`] hook and the `color-eyre` panic hook.
pub fn install() {
    let panic_section =
        "This is a bug. Consider reporting it at https://github.com/ayushgupta0010/treemint";
    let (panic_hook, _) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    if let Err(err) = eyre::set_hook(Box::new(|_| Box::new(Handler))) {
        debug!(%err, "failed to install eyre error hook");
    }
}
