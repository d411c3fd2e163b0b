//! Server log lines: `YYYY-MM-DD HH:MM:SS [LEVEL] message`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) \[([A-Za-z]+)\] ?(.*)$")
        .expect("valid regex")
});

/// Display emphasis for a log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Info,
    Warning,
    Error,
    Alert,
}

impl Tier {
    pub fn for_level(level: &str) -> Self {
        match level.to_ascii_uppercase().as_str() {
            "WARNING" => Tier::Warning,
            "ALERT" | "CRITICAL" => Tier::Alert,
            "ERROR" => Tier::Error,
            _ => Tier::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Info => "info",
            Tier::Warning => "warning",
            Tier::Error => "error",
            Tier::Alert => "alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl LogRecord {
    pub fn tier(&self) -> Tier {
        Tier::for_level(&self.level)
    }
}

impl FromStr for LogRecord {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let caps = LOG_LINE
            .captures(raw.trim_end())
            .ok_or_else(|| ParseError(raw.to_string()))?;
        Ok(LogRecord {
            timestamp: caps[1].to_string(),
            level: caps[2].to_ascii_uppercase(),
            message: caps[3].to_string(),
        })
    }
}

/// A parsed line, or the original text when it didn't match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Structured(LogRecord),
    Raw(String),
}

impl LogLine {
    pub fn tier(&self) -> Tier {
        match self {
            LogLine::Structured(r) => r.tier(),
            LogLine::Raw(_) => Tier::Info,
        }
    }
}

pub fn parse(raw: &str) -> LogLine {
    match raw.parse::<LogRecord>() {
        Ok(rec) => LogLine::Structured(rec),
        Err(ParseError(s)) => {
            tracing::trace!(line = %s, "log line kept unstructured");
            LogLine::Raw(s)
        }
    }
}

pub fn parse_batch<S: AsRef<str>>(lines: &[S]) -> Vec<LogLine> {
    lines.iter().map(|l| parse(l.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let line = parse("2024-01-01 10:00:00 [ERROR] disk full");
        let LogLine::Structured(rec) = line else {
            panic!("expected structured record");
        };
        assert_eq!(rec.timestamp, "2024-01-01 10:00:00");
        assert_eq!(rec.level, "ERROR");
        assert_eq!(rec.message, "disk full");
        assert_eq!(rec.tier(), Tier::Error);
    }

    #[test]
    fn garbage_falls_back_to_raw() {
        assert_eq!(parse("garbage line"), LogLine::Raw("garbage line".into()));
        assert_eq!(parse(""), LogLine::Raw(String::new()));
        // journalctl short-iso output is passed through as-is
        let iso = "2024-01-01T10:00:00+0000 host kernel: oops";
        assert_eq!(parse(iso), LogLine::Raw(iso.into()));
    }

    #[test]
    fn level_tiers() {
        assert_eq!(Tier::for_level("WARNING"), Tier::Warning);
        assert_eq!(Tier::for_level("ALERT"), Tier::Alert);
        assert_eq!(Tier::for_level("CRITICAL"), Tier::Alert);
        assert_eq!(Tier::for_level("ERROR"), Tier::Error);
        assert_eq!(Tier::for_level("INFO"), Tier::Info);
        assert_eq!(Tier::for_level("DEBUG"), Tier::Info);
    }

    #[test]
    fn bad_line_does_not_break_batch() {
        let batch = parse_batch(&[
            "2024-01-01 10:00:00 [WARNING] swap high",
            "???",
            "2024-01-01 10:00:05 [CRITICAL] oom killer",
        ]);
        let tiers: Vec<Tier> = batch.iter().map(LogLine::tier).collect();
        assert_eq!(tiers, vec![Tier::Warning, Tier::Info, Tier::Alert]);
        assert!(matches!(batch[1], LogLine::Raw(ref s) if s == "???"));
    }
}
