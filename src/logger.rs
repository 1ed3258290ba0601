// Session log: one timestamped file per run, oldest files rotated out
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(tag)
    }
}

pub struct SessionLogger {
    log_buffer: Mutex<Vec<String>>,
    log_path: PathBuf,
    log_dir: PathBuf,
    retention_count: usize,
    app_name: String,
    stream_to_stderr: bool,
    min_level: LogLevel,
}

impl SessionLogger {
    pub fn new(log_dir: PathBuf, app_name: &str, retention_count: usize, stream_to_stderr: bool) -> Result<Self> {
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("{}_{}.log", app_name, timestamp));

        let logger = Self {
            log_buffer: Mutex::new(Vec::new()),
            log_path,
            log_dir,
            retention_count: retention_count.max(1),
            app_name: app_name.to_string(),
            stream_to_stderr,
            min_level: LogLevel::Info,
        };

        logger.clean_old_logs()?;
        logger.info(format!("=== {} Session Started ===", app_name));

        Ok(logger)
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if level < self.min_level {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = if level == LogLevel::Info {
            format!("[{}] {}", timestamp, message.as_ref())
        } else {
            format!("[{}] {}: {}", timestamp, level, message.as_ref())
        };

        if self.stream_to_stderr {
            eprintln!("{}", line);
            let _ = self.append_lines(std::slice::from_ref(&line));
        } else {
            self.log_buffer.lock().push(line);
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    fn append_lines(&self, lines: &[String]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .context("Failed to open log file")?;
        for line in lines {
            writeln!(file, "{}", line)?;
        }
        file.flush()?;
        Ok(())
    }

    /// Keep the newest `retention_count - 1` previous logs; this session's
    /// file takes the last slot.
    fn clean_old_logs(&self) -> Result<()> {
        let prefix = format!("{}_", self.app_name);
        let mut log_files: Vec<(PathBuf, std::time::SystemTime)> = fs::read_dir(&self.log_dir)?
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                let name = path.file_name()?.to_str()?;
                if !name.starts_with(&prefix) || path.extension()? != "log" {
                    return None;
                }
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some((path, modified))
            })
            .collect();

        log_files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

        for (path, _) in log_files.iter().skip(self.retention_count - 1) {
            let _ = fs::remove_file(path);
        }

        Ok(())
    }

    pub fn flush_to_disk(&self) -> Result<()> {
        let mut buffer = self.log_buffer.lock();
        if buffer.is_empty() {
            return Ok(());
        }
        self.append_lines(&buffer)?;
        buffer.clear();
        Ok(())
    }

    pub fn finalize(&self) -> Result<()> {
        self.info(format!("=== {} Session Ended ===", self.app_name));
        self.flush_to_disk()
    }
}

static LOGGER: once_cell::sync::OnceCell<SessionLogger> = once_cell::sync::OnceCell::new();

pub fn init_logger(
    log_dir: PathBuf,
    app_name: &str,
    retention_count: usize,
    stream_to_stderr: bool,
    min_level: LogLevel,
) -> Result<()> {
    let logger = SessionLogger::new(log_dir, app_name, retention_count, stream_to_stderr)?
        .with_min_level(min_level);
    LOGGER.set(logger).map_err(|_| anyhow::anyhow!("Logger already initialized"))?;
    Ok(())
}

pub fn log(level: LogLevel, message: impl AsRef<str>) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, message);
    }
}

pub fn finalize_logs() -> Result<()> {
    if let Some(logger) = LOGGER.get() {
        logger.finalize()?;
    }
    Ok(())
}

pub fn get_log_path() -> Option<PathBuf> {
    LOGGER.get().map(|logger| logger.log_path.clone())
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Warn, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Error, format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_log(logger: &SessionLogger) -> String {
        fs::read_to_string(logger.log_path()).unwrap_or_default()
    }

    #[test]
    fn test_buffered_until_finalize() {
        let dir = TempDir::new().unwrap();
        let logger = SessionLogger::new(dir.path().to_path_buf(), "colormine", 5, false).unwrap();
        logger.info("picked #ff0000");
        logger.warn("odd input");
        assert_eq!(read_log(&logger), "");

        logger.finalize().unwrap();
        let content = read_log(&logger);
        assert!(content.contains("=== colormine Session Started ==="));
        assert!(content.contains("] picked #ff0000"));
        assert!(content.contains("] WARN: odd input"));
        assert!(content.contains("=== colormine Session Ended ==="));
    }

    #[test]
    fn test_streaming_writes_immediately() {
        let dir = TempDir::new().unwrap();
        let logger = SessionLogger::new(dir.path().to_path_buf(), "colormine", 5, true).unwrap();
        logger.error("boom");
        assert!(read_log(&logger).contains("ERROR: boom"));
    }

    #[test]
    fn test_min_level_filters() {
        let dir = TempDir::new().unwrap();
        let logger = SessionLogger::new(dir.path().to_path_buf(), "colormine", 5, false).unwrap();
        logger.debug("hidden");
        let logger = logger.with_min_level(LogLevel::Debug);
        logger.debug("shown");
        logger.flush_to_disk().unwrap();

        let content = read_log(&logger);
        assert!(!content.contains("hidden"));
        assert!(content.contains("DEBUG: shown"));
    }

    #[test]
    fn test_old_logs_rotated() {
        let dir = TempDir::new().unwrap();
        for i in 0..4 {
            fs::write(dir.path().join(format!("colormine_2020010{}_000000.log", i)), "old").unwrap();
        }
        fs::write(dir.path().join("other_20200101_000000.log"), "keep").unwrap();

        let _logger = SessionLogger::new(dir.path().to_path_buf(), "colormine", 3, false).unwrap();

        let remaining = fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with("colormine_"))
            .count();
        assert_eq!(remaining, 2);
        assert!(dir.path().join("other_20200101_000000.log").exists());
    }
}
