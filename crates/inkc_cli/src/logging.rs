//! Log setup for the command line

use clap::{ArgAction, Args};
use std::io;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Args)]
pub struct LoggingArgs {
    /// Log more, twice for everything
    #[clap(short = 'v', action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, twice for nothing at all
    #[clap(short = 'q', action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose.min(2) as i8 - self.quiet.min(2) as i8 {
            ..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Installs the global subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout.
pub fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let writer = io::stderr
        .with_max_level(Level::WARN)
        .or_else(io::stdout);
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true).with_target(false))
                .with_writer(writer)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        logging: LoggingArgs,
    }

    fn level(args: &str) -> LevelFilter {
        Cli::try_parse_from(args.split_whitespace())
            .expect("could not parse test string")
            .logging
            .log_level_filter()
    }

    #[test]
    fn counts_map_to_levels() {
        assert_eq!(level("inkc"), LevelFilter::INFO);
        assert_eq!(level("inkc -v"), LevelFilter::DEBUG);
        assert_eq!(level("inkc -vvv"), LevelFilter::TRACE);
        assert_eq!(level("inkc -q"), LevelFilter::ERROR);
        assert_eq!(level("inkc -qq"), LevelFilter::OFF);
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["inkc", "-v", "-q"]).is_err());
    }
}
