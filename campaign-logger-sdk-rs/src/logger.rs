use chrono::Utc;
use colored::*;
use std::fmt::Write as _;
use tracing_subscriber::EnvFilter;

/// Initializes the global logging system with colorized single-line output.
///
/// `RUST_LOG` controls the level filter (default: info).
/// Example: `RUST_LOG=campaign_logger_sdk_rs=debug,info cargo run`
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Container log collectors are rarely a TTY, keep the colors anyway.
    colored::control::set_override(true);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_writer(std::io::stdout)
        .event_format(LineFormatter)
        .init();
}

/// `<timestamp> <LEVEL> <message> key=value ...`
struct LineFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for LineFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
        write!(writer, "{} {} ", now.dimmed(), level_label(*event.metadata().level()))?;

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        write!(writer, "{}", visitor.message)?;
        if !visitor.fields.is_empty() {
            write!(writer, "{}", visitor.fields.dimmed())?;
        }
        writeln!(writer)
    }
}

fn level_label(level: tracing::Level) -> String {
    match level {
        tracing::Level::ERROR => "ERROR".red().bold().to_string(),
        tracing::Level::WARN => "WARN".yellow().bold().to_string(),
        tracing::Level::INFO => "INFO".green().bold().to_string(),
        tracing::Level::DEBUG => "DEBUG".blue().bold().to_string(),
        tracing::Level::TRACE => "TRACE".magenta().bold().to_string(),
    }
}

/// Collects the message and renders the remaining fields as ` key=value`.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl tracing::field::Visit for LineVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
