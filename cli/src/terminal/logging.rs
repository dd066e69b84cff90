use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(CliFormatter)
        .init();
}

/// Scan-log line format: a colored level glyph, then the event fields.
/// Debug and trace lines additionally carry their dimmed module path,
/// since at those levels the emitting stage matters.
pub struct CliFormatter;

fn glyph(level: Level) -> &'static str {
    match level {
        Level::TRACE => " ··",
        Level::DEBUG => " ?·",
        Level::INFO => " ➤ ",
        Level::WARN => " ! ",
        Level::ERROR => " ✗ ",
    }
}

fn paint(level: Level, text: &str) -> ColoredString {
    match level {
        Level::TRACE => text.dimmed(),
        Level::DEBUG => text.cyan(),
        Level::INFO => text.bright_green(),
        Level::WARN => text.yellow().bold(),
        Level::ERROR => text.bright_red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for CliFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();

        write!(writer, "{} ", paint(level, glyph(level)))?;
        if matches!(level, Level::DEBUG | Level::TRACE) {
            write!(writer, "{} ", format!("({})", meta.target()).bright_black())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
