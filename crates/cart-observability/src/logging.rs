//! Structured logging with cart context.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Log level for structured logs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Component that produced the entry.
    pub component: String,
    /// Storage key of the cart being operated on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}: {}", self.level, self.component, self.message);

        if let Some(key) = &self.storage_key {
            s.push_str(&format!(" (key={})", key));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Look up a structured field.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// In-memory capture of emitted log entries.
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct LogRecorder {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl LogRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Entries at exactly the given level.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Whether any entry carries the given message.
    pub fn contains(&self, message: &str) -> bool {
        self.entries.borrow().iter().any(|e| e.message == message)
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn push(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

/// Structured logger with cart context.
///
/// Every entry carries the emitting component and the storage key of the
/// cart, so entries from several widgets on one page can be told apart.
#[derive(Debug, Clone)]
pub struct CartLogger {
    component: String,
    storage_key: Option<String>,
    min_level: LogLevel,
    format: LogFormat,
    recorder: Option<LogRecorder>,
}

impl CartLogger {
    /// Create a new logger for a component.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            storage_key: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            recorder: None,
        }
    }

    /// Set the storage key context.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Also capture emitted entries into a recorder.
    pub fn with_recorder(mut self, recorder: LogRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Get the component name.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Get the minimum level.
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            component: self.component.clone(),
            storage_key: self.storage_key.clone(),
            fields,
        };

        let output = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };

        emit(level, &output);

        if let Some(recorder) = &self.recorder {
            recorder.push(entry);
        }
    }
}

fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(target: "cart", "{}", line),
        LogLevel::Debug => tracing::debug!(target: "cart", "{}", line),
        LogLevel::Info => tracing::info!(target: "cart", "{}", line),
        LogLevel::Warn => tracing::warn!(target: "cart", "{}", line),
        LogLevel::Error => tracing::error!(target: "cart", "{}", line),
    }

    // No subscriber is installed in the browser; mirror to the console.
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            LogLevel::Error => web_sys::console::error_1(&value),
            LogLevel::Warn => web_sys::console::warn_1(&value),
            LogLevel::Info => web_sys::console::info_1(&value),
            LogLevel::Debug | LogLevel::Trace => web_sys::console::debug_1(&value),
        }
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a CartLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a CartLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a float field. Non-finite values are recorded as strings.
    pub fn field_f64(mut self, key: &str, value: f64) -> Self {
        let value = if value.is_finite() {
            serde_json::json!(value)
        } else {
            serde_json::json!(value.to_string())
        };
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl CartLogger {
    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(min_level: LogLevel) -> (CartLogger, LogRecorder) {
        let recorder = LogRecorder::new();
        let logger = CartLogger::new("cart-store")
            .with_storage_key("test-cart")
            .with_min_level(min_level)
            .with_recorder(recorder.clone());
        (logger, recorder)
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_min_level_filters_entries() {
        let (logger, recorder) = recorded(LogLevel::Warn);
        logger.debug("skipped");
        logger.info("skipped too");
        logger.warn("kept");
        logger.error("kept as well");

        assert_eq!(recorder.len(), 2);
        assert!(recorder.contains("kept"));
        assert!(!recorder.contains("skipped"));
    }

    #[test]
    fn test_builder_fields() {
        let (logger, recorder) = recorded(LogLevel::Debug);
        logger
            .warn_builder("price is not a number")
            .field("product_id", "tee-01")
            .field_f64("price", f64::NAN)
            .field_u64("quantity", 2)
            .field_bool("inserted", true)
            .emit();

        let entries = recorder.at_level(LogLevel::Warn);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.field("product_id"), Some(&serde_json::json!("tee-01")));
        assert_eq!(entry.field("price"), Some(&serde_json::json!("NaN")));
        assert_eq!(entry.field("quantity"), Some(&serde_json::json!(2)));
        assert_eq!(entry.field("inserted"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_json_format() {
        let (logger, recorder) = recorded(LogLevel::Info);
        logger.info_builder("cart loaded").field_u64("items", 3).emit();

        let json = recorder.entries()[0].to_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["component"], "cart-store");
        assert_eq!(parsed["storage_key"], "test-cart");
        assert_eq!(parsed["items"], 3);
    }

    #[test]
    fn test_human_format() {
        let entry = LogEntry {
            level: LogLevel::Error,
            message: "write failed".to_string(),
            component: "cart-store".to_string(),
            storage_key: Some("jm-streetwear-cart".to_string()),
            fields: BTreeMap::from([
                ("error".to_string(), serde_json::json!("quota")),
                ("bytes".to_string(), serde_json::json!(12)),
            ]),
        };

        assert_eq!(
            entry.to_human(),
            "[ERROR] cart-store: write failed (key=jm-streetwear-cart) | bytes=12 error=\"quota\""
        );
    }

    #[test]
    fn test_recorder_shared_between_clones() {
        let (logger, recorder) = recorded(LogLevel::Info);
        let cloned = logger.clone();
        logger.info("one");
        cloned.info("two");
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_level_deserializes_lowercase() {
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
        let format: LogFormat = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(format, LogFormat::Human);
    }
}
