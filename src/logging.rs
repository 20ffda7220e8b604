use miette::{IntoDiagnostic, Result, WrapErr};
use owo_colors::OwoColorize;
use time::{
    format_description::{self, FormatItem},
    OffsetDateTime, UtcOffset,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format, FmtContext, FormatEvent, FormatFields, FormattedFields},
    registry::LookupSpan,
    FmtSubscriber,
};

/// Initialize the logging system
pub fn init_logging(level: Level) -> Result<()> {
    // Can fail on some platforms when other threads are running, keep going in UTC
    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let my_pretty_logger = MyPrettyLogger::new(local_offset)?;

    let subscriber = FmtSubscriber::builder()
        .event_format(my_pretty_logger)
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .into_diagnostic()
        .wrap_err("Setting default subscriber failed")
}

/// Map the number of `-v` flags to the maximum level to log
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Custom logger: time, level, fields of the current spans, then the message
struct MyPrettyLogger {
    offset: UtcOffset,
    time_format: Vec<FormatItem<'static>>,
}

impl MyPrettyLogger {
    fn new(offset: UtcOffset) -> Result<Self> {
        Ok(Self {
            offset,
            time_format: format_description::parse("[hour]:[minute]:[second]")
                .into_diagnostic()
                .wrap_err("Invalid log time format")?,
        })
    }
}

impl<S, N> FormatEvent<S, N> for MyPrettyLogger
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        let now = OffsetDateTime::now_utc()
            .to_offset(self.offset)
            .time()
            .format(&self.time_format)
            .map_err(|_| std::fmt::Error)?;

        let ansi = writer.has_ansi_escapes();
        if ansi {
            let level = match *metadata.level() {
                Level::ERROR => metadata.level().red().to_string(),
                Level::WARN => metadata.level().yellow().to_string(),
                Level::DEBUG => metadata.level().blue().to_string(),
                Level::TRACE => metadata.level().purple().to_string(),
                _ => metadata.level().green().to_string(),
            };
            write!(&mut writer, "{} {:>5} ", now.dimmed(), level)?;
        } else {
            write!(&mut writer, "{} {:>5} ", now, metadata.level())?;
        }

        // e.g. "[video id=dQw4w9WgXcQ]"
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                let ext = span.extensions();
                let fields = ext
                    .get::<FormattedFields<N>>()
                    .map(|f| f.as_str())
                    .unwrap_or_default();

                let label = if fields.is_empty() {
                    format!("[{}]", span.name())
                } else {
                    format!("[{} {}]", span.name(), fields)
                };

                if ansi {
                    write!(&mut writer, "{} ", label.yellow())?;
                } else {
                    write!(&mut writer, "{label} ")?;
                }
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
