use owo_colors::{OwoColorize, Stream};

/// Builds the colourised, fixed-width tag for a log level
fn level_tag(level: log::Level, stream: Stream) -> String {
    let tag = format!("{:<5}", level);
    match level {
        log::Level::Error => tag.if_supports_color(stream, |text| text.red()).to_string(),
        log::Level::Warn => tag.if_supports_color(stream, |text| text.yellow()).to_string(),
        log::Level::Info => tag.if_supports_color(stream, |text| text.green()).to_string(),
        log::Level::Debug => tag
            .if_supports_color(stream, |text| text.bright_blue())
            .to_string(),
        log::Level::Trace => tag
            .if_supports_color(stream, |text| text.bright_black())
            .to_string(),
    }
}

/// Line formatter for one output stream. Verbose mode also names the crate that logged.
fn formatter(
    stream: Stream,
    verbose: bool,
) -> impl Fn(fern::FormatCallback<'_>, &std::fmt::Arguments<'_>, &log::Record<'_>) + Send + Sync + 'static
{
    move |out, message, record| {
        let target = match verbose {
            true => format!(
                " [{}]",
                record.target().split("::").next().unwrap_or_default()
            ),
            false => String::new(),
        };
        out.finish(format_args!(
            "{}{}: {}",
            level_tag(record.level(), stream),
            target.if_supports_color(stream, |text| text.bright_black()),
            message
        ));
    }
}

/// Enable the logger.
///
/// Progress goes to STDOUT. Warnings and failures go to STDERR so they stay visible when
/// STDOUT is redirected.
pub fn enable_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .level(match std::env::var("L2INJECT_TRACE") {
            Ok(_) => log::LevelFilter::Trace,
            Err(_) => match verbose {
                true => log::LevelFilter::Debug,
                false => log::LevelFilter::Info,
            },
        })
        .chain(
            fern::Dispatch::new()
                .filter(|metadata| metadata.level() > log::Level::Warn)
                .format(formatter(Stream::Stdout, verbose))
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Warn)
                .format(formatter(Stream::Stderr, verbose))
                .chain(std::io::stderr()),
        )
        .apply()?;

    if verbose {
        log::debug!("Verbose logging enabled");
    }
    Ok(())
}
