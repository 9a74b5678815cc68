use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use time::{OffsetDateTime, macros::format_description};

pub struct Logger {
    pub write_to_stderr: bool,
    pub severity: Level,
    pub file: Option<Mutex<File>>,
    pub enable_colors: bool,
}

impl Logger {
    /// Create a new logger. File output is enabled when `file_path` is given
    /// and the file can be opened for appending.
    pub fn new(
        file_path: Option<PathBuf>,
        severity: Option<Level>,
        write_to_stderr: bool,
        enable_colors: bool,
    ) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new().create(true).append(true).open(path).ok().map(Mutex::new)
        });

        Logger {
            write_to_stderr,
            severity: severity.unwrap_or(Level::Info),
            file,
            enable_colors,
        }
    }

    fn get_timestamp() -> String {
        let now = OffsetDateTime::now_utc();
        now.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .unwrap_or_default()
    }

    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m", // Red
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Info => "\x1b[36m",  // Cyan
            Level::Debug => "\x1b[35m", // Magenta
            Level::Trace => "\x1b[37m", // White
        }
    }

    fn get_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Initialize logger from `WIKI_LOG` / `RUST_LOG`, `WIKI_LOG_FILE` and `NO_COLOR`
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("WIKI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);

        let file_path = std::env::var("WIKI_LOG_FILE").ok().map(PathBuf::from);
        let enable_colors = std::env::var("NO_COLOR").is_err();

        let logger = Logger::new(file_path, Some(severity), true, enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::get_timestamp();
        let level_str = record.level().as_str();
        let args = record.args();

        let formatted_message = if self.enable_colors {
            let color = Self::get_color(record.level());
            let reset = Self::get_reset();
            format!("{color}[{timestamp}] {level_str}{reset} {args}\n")
        } else {
            format!("[{timestamp}] {level_str} {args}\n")
        };

        if self.write_to_stderr {
            let _ = std::io::stderr().write_all(formatted_message.as_bytes());
        }

        // File output never carries colors
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = writeln!(file_guard, "[{timestamp}] {level_str} {args}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = file_guard.flush();
            }
        }
    }
}
