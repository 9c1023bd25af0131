//! Colorful console output for search progress.
//!
//! Provides a custom `tracing` layer that formats search events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search and batch start/end)
//! - **DEBUG**: Per-stage counts (filtering, generation)
//! - **TRACE**: Individual candidate rejections

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the search console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing. `RUST_LOG` overrides the default
/// `classgrid_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let default_directive: Directive = "classgrid_solver=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let mut filter = EnvFilter::builder()
            .with_default_directive(default_directive)
            .from_env_lossy();
        if let Ok(directive) = "classgrid=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since search start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
      _                          _     _
  ___| | __ _ ___ ___  __ _ _ __(_) __| |
 / __| |/ _` / __/ __|/ _` | '__| |/ _` |
| (__| | (_| \__ \__ \ (_| | |  | | (_| |
 \___|_|\__,_|___/___/\__, |_|  |_|\__,_|
                      |___/
"#;

    let version_line = format!("           v{} - Timetable Combination Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Accept events from the search engine and the facade
        if !target.starts_with("classgrid_solver") && !target.starts_with("classgrid::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    subjects: Option<String>,
    sort_mode: Option<String>,
    first: Option<String>,
    second: Option<String>,
    start_hour: Option<u64>,
    end_hour: Option<u64>,
    max_days: Option<u64>,
    sessions: Option<u64>,
    removed_sessions: Option<u64>,
    combinations: Option<u64>,
    conflicts: Option<u64>,
    day_limit_rejected: Option<u64>,
    dead_hour_rejected: Option<u64>,
    survivors: Option<u64>,
    schedules: Option<u64>,
    requests: Option<u64>,
    failed: Option<u64>,
    ordinal: Option<u64>,
    days: Option<u64>,
    dead_hours: Option<u64>,
    duration_ms: Option<u64>,
    subject_count: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "subjects" => self.subjects = Some(s),
            "sort_mode" => self.sort_mode = Some(s),
            "first" => self.first = Some(s),
            "second" => self.second = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "start_hour" => self.start_hour = Some(value),
            "end_hour" => self.end_hour = Some(value),
            "max_days" => self.max_days = Some(value),
            "sessions" => self.sessions = Some(value),
            "removed_sessions" => self.removed_sessions = Some(value),
            "combinations" => self.combinations = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "day_limit_rejected" => self.day_limit_rejected = Some(value),
            "dead_hour_rejected" => self.dead_hour_rejected = Some(value),
            "survivors" => self.survivors = Some(value),
            "schedules" => self.schedules = Some(value),
            "requests" => self.requests = Some(value),
            "failed" => self.failed = Some(value),
            "ordinal" => self.ordinal = Some(value),
            "days" => self.days = Some(value),
            "dead_hours" => self.dead_hours = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            // filter_end reports the subject count under `subjects`
            "subjects" => self.subject_count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "subjects" => self.subjects = Some(value.to_string()),
            "sort_mode" => self.sort_mode = Some(value.to_string()),
            "first" => self.first = Some(value.to_string()),
            "second" => self.second = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "search_start" => format_search_start(v),
        "filter_end" => format_filter_end(v),
        "generation_start" => format_generation_start(v),
        "search_end" => format_search_end(v),
        "search_cancelled" => format_search_cancelled(v),
        "batch_start" => format_batch_start(v),
        "batch_end" => format_batch_end(v),
        "conflict" | "enforcement" => format_rejection(v, event, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let subjects = v.subjects.as_deref().unwrap_or("");
    let sort_mode = v.sort_mode.as_deref().unwrap_or("group_count");

    format!(
        "{} {} Searching │ {} │ {:02}:00-{:02}:00 │ ≤{} days │ by {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        subjects.bright_yellow(),
        v.start_hour.unwrap_or(0),
        v.end_hour.unwrap_or(0),
        v.max_days.unwrap_or(0).bright_yellow(),
        sort_mode.bright_magenta()
    )
}

fn format_filter_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Filtered │ {} subjects │ {} sessions kept │ {} removed",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.subject_count).white(),
        count(v.sessions).bright_yellow(),
        count(v.removed_sessions).bright_black()
    )
}

fn format_generation_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Generating │ {} combinations",
        format_elapsed(),
        "▶".bright_blue(),
        count(v.combinations).bright_magenta().bold()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let schedules = v.schedules.unwrap_or(0);
    let status = if schedules > 0 {
        "FOUND".bright_green().bold().to_string()
    } else {
        "EMPTY".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Search complete │ {} │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        status,
        format!("{} schedules", count(v.schedules)).white().bold()
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(&border('╔', '╗'));
    for (label, value) in [
        ("Combinations:", v.combinations),
        ("Conflicting:", v.conflicts),
        ("Over day limit:", v.day_limit_rejected),
        ("Over dead hours:", v.dead_hour_rejected),
        ("Survivors:", v.survivors),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}\n",
            "║".bright_cyan(),
            label,
            count(value),
            "║".bright_cyan()
        ));
    }
    output.push_str(&border('╚', '╝'));

    output
}

fn border(left: char, right: char) -> String {
    format!("{}{}{}\n", left, "═".repeat(58), right)
        .bright_cyan()
        .to_string()
}

fn format_search_cancelled(v: &EventVisitor) -> String {
    format!(
        "{} {} Search cancelled after {} combinations",
        format_elapsed(),
        "✗".bright_red().bold(),
        count(v.combinations).white()
    )
}

fn format_batch_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Batch │ {} requests",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.requests).bright_yellow()
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    let failed = v.failed.unwrap_or(0);
    let failed_text = format!("{} failed", count(v.failed));
    let failed_text = if failed > 0 {
        failed_text.bright_red().to_string()
    } else {
        failed_text.bright_black().to_string()
    };

    format!(
        "{} {} Batch complete │ {} requests │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.requests).white(),
        failed_text,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_rejection(v: &EventVisitor, event: &str, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let ordinal = count(v.ordinal);
    let detail = if event == "conflict" {
        format!(
            "{} ✕ {}",
            v.first.as_deref().unwrap_or("?"),
            v.second.as_deref().unwrap_or("?")
        )
    } else {
        format!(
            "{} days │ {} dead hours",
            count(v.days),
            count(v.dead_hours)
        )
    };

    format!(
        "{} {} Candidate {:>10} │ {}",
        format_elapsed(),
        "✗".bright_red(),
        ordinal.bright_black(),
        detail.bright_black()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
