use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    prelude::*,
    registry::LookupSpan,
};

/// Used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Local-time timestamp, coloured level, then `file:line` and the fields.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "\x1b[2m")?
        }
        write!(writer, "{} ", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))?;
        if ansi {
            write!(writer, "\x1b[0m")?
        }

        let (pre, post) = if ansi {
            match *meta.level() {
                Level::ERROR => ("\x1b[1;31m", "\x1b[0m"),
                Level::WARN => ("\x1b[1;33m", "\x1b[0m"),
                Level::INFO => ("\x1b[1;32m", "\x1b[0m"),
                Level::DEBUG => ("\x1b[1;34m", "\x1b[0m"),
                Level::TRACE => ("\x1b[1;35m", "\x1b[0m"),
            }
        } else {
            ("", "")
        };
        write!(writer, "{pre}{:>5}{post} ", meta.level())?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Picks the filter: `RUST_LOG` if set, else `configured`, else
/// [`DEFAULT_LOG_LEVEL`].
pub fn make_filter(configured: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = configured.unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

/// Installs the global subscriber. Logs go to stderr so reports on stdout
/// stay clean; colour is used only when stderr is a terminal.
pub fn init_logging(configured: Option<&str>) -> Result<()> {
    let filter = make_filter(configured)?;

    let stderr_layer = fmt::layer()
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialised: {e}"))
}
