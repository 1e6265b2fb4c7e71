use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Events on this target are printed as-is, see [`crate::terminal::print`].
pub const PRINT_TARGET: &str = "holehe::print";

/// Targets that log at the chosen verbosity. Dependencies stay at `warn`.
const CRATES: &[&str] = &["holehe", "holehe_cli", "holehe_common", "holehe_core", "holehe_modules"];

/// Everything goes to stderr so stdout only ever carries the JSON result.
pub fn init_logging(verbosity: u8) {
    colored::control::set_override(console::colors_enabled_stderr());

    let default_level: &str = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directives: String = CRATES
        .iter()
        .fold(String::from("warn"), |acc, krate| format!("{acc},{krate}={default_level}"));
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let indicatif_layer: Option<IndicatifLayer<_>> =
        console::user_attended_stderr().then(IndicatifLayer::new);

    let writer: BoxMakeWriter = match &indicatif_layer {
        Some(layer) => BoxMakeWriter::new(layer.get_stderr_writer()),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(HoleheFormatter)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.map(|layer| layer.with_filter(IndicatifFilter::new(false))))
        .try_init();
}

pub struct HoleheFormatter;

impl<S, N> FormatEvent<S, N> for HoleheFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            if let Some(msg) = raw.0 {
                return writeln!(writer, "{msg}");
            }
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}
