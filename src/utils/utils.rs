use std::io;
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .parse_default_env()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("logger setup failed: {}", e)))
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn inc(&self) {
        self.pb.inc(1);
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let done = self.pb.position();
        let speed = if elapsed > 0.0 { done as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!("Đang mã hóa, {:.0} tệp/giây", speed));
    }

    pub fn finish(&self, processed: usize, failed: usize, total_size: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "Xong: {} tệp, {} lỗi, tổng {}",
            processed,
            failed,
            format_file_size(total_size)
        ));
    }
}

pub fn format_file_size(size: usize) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// Build include/exclude sets from `*`-wildcard file-name patterns.
pub fn create_regex_sets(include: &[String], exclude: &[String]) -> (RegexSet, RegexSet) {
    let to_regex = |p: &String| format!("^{}$", regex::escape(p).replace(r"\*", ".*"));
    let include_patterns: Vec<_> = include.iter().map(to_regex).collect();
    let exclude_patterns: Vec<_> = exclude.iter().map(to_regex).collect();

    let include_set = RegexSet::new(&include_patterns)
        .unwrap_or_else(|e| {
            log::warn!("Invalid include pattern: {}, falling back to an empty set", e);
            RegexSet::empty()
        });

    let exclude_set = RegexSet::new(&exclude_patterns)
        .unwrap_or_else(|e| {
            log::warn!("Invalid exclude pattern: {}, falling back to an empty set", e);
            RegexSet::empty()
        });

    (include_set, exclude_set)
}

/// Escape text for use inside HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
