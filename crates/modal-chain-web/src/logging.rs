//! Browser console logging.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

/// Default directive when the page does not provide one.
const DEFAULT_FILTER: &str = "info";

/// Installs the panic hook and a console `tracing` subscriber.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_logging(directive: Option<&str>) {
    console_error_panic_hook::set_once();

    let filter = EnvFilter::try_new(directive.unwrap_or(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    // Another subscriber may already be set by the embedding page
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
