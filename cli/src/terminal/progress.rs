use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TEMPLATE: &str = "{spinner:.blue} {msg} [{bar:30.green/bright_black}] {pos}/{len}";

/// Turns `span` into a bar with `total` steps.
pub fn prepare(span: &Span, total: usize) {
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        span.pb_set_style(&style.progress_chars("━╸ "));
    }
    span.pb_set_length(total as u64);
    span.pb_set_message("Checking services");
}

/// Progress callback for the dispatcher: moves the bar to `done`.
pub fn tracker(span: Span) -> impl Fn(usize) + Send + Sync + 'static {
    move |done| span.pb_set_position(done as u64)
}
