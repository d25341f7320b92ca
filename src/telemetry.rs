use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of quiz questions handed out, by any/category scope",
        &["category"]
    )
    .unwrap();
    pub static ref QUIZ_POOL_EXHAUSTED: CounterVec = register_counter_vec!(
        "quiz_pool_exhausted_total",
        "Number of quiz requests with no question left to ask",
        &["category"]
    )
    .unwrap();
}

// sqlx logs every statement at info
const DEFAULT_FILTER: &str = "info,sqlx=warn";

fn span_events(setting: Option<&str>) -> FmtSpan {
    match setting {
        Some(value) if value.eq_ignore_ascii_case("true") => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. `LOG_LEVEL` takes `EnvFilter` directives,
/// `INCLUDE_SPAN_EVENTS=true` logs request spans opening and closing. A second
/// call is a no-op.
pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let spans = std::env::var("INCLUDE_SPAN_EVENTS").ok();

    let installed = tracing_subscriber::registry()
        .with(filter(level.as_deref()))
        .with(fmt::layer().with_span_events(span_events(spans.as_deref())))
        .try_init();
    if installed.is_ok() {
        tracing::debug!(level = level.as_deref().unwrap_or(DEFAULT_FILTER), "Tracing ready");
    }
}
