//! Log sanitization for cycle-tracking data.
//!
//! Tracking inputs and predictions are health data. Call sites log them as
//! structured fields (`score = ..`, `phase = ..`) and this writer masks the
//! values before anything reaches the sink, so a debug session does not leave
//! someone's cycle details in a log file.
//!
//! Redacted keys:
//! - `score`, `bucket`, `phase`
//! - `days_since`, `period_length`, `cycle_length`
//! - `symptoms` and the individual symptom columns

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<SensitivePatterns> = OnceLock::new();

/// Maximum number of bytes sanitized per line.
///
/// Can be overridden via `CYCLESENSE_SANITIZE_MAX_BYTES`.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct SensitivePattern {
    regex: Regex,
    replacement: &'static str,
}

struct SensitivePatterns {
    set: RegexSet,
    patterns: Vec<SensitivePattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CYCLESENSE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static SensitivePatterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(&'static str, &'static str)> = vec![
            // Prediction output
            (
                r"\b(score|bucket|phase)=(?:[A-Za-z]+|-?[0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?)",
                "$1=[REDACTED]",
            ),
            // Cycle numbers
            (
                r"\b(days_since|period_length|cycle_length)=[0-9]+",
                "$1=[REDACTED]",
            ),
            // Symptom lists, e.g. symptoms=[Fatigue, Cravings] or symptoms="..."
            (r#"\bsymptoms=(?:\[[^\]]*\]|"[^"]*"|\S+)"#, "symptoms=[REDACTED]"),
            // Individual symptom columns with explicit values
            (
                r"(?i)\b(headaches|bloating|mood_swings|increased_sex_drive|cravings|irritability|fatigue)\s*[=:]\s*(?:[01](?:\.0)?|true|false)\b",
                "$1=[REDACTED]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let patterns = rules
            .into_iter()
            .map(|(pattern, replacement)| SensitivePattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        SensitivePatterns { set, patterns }
    })
}

/// Mask tracking values in a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let pattern = &patterns.patterns[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
        // Keep record boundaries intact for line-oriented sinks.
        if input.ends_with('\n') {
            result.push('\n');
        }
    }
    result
}

/// Check if a string carries unmasked tracking values.
#[must_use]
pub fn contains_sensitive(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    get_patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// line by line before it is written to the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }

    fn flush_remainder(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter writing a huge line with no newline is flushed in one go.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            self.flush_remainder()?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        self.flush_remainder()?;
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_prediction_fields() {
        let input = "INFO Assessment complete score=7.3 bucket=High phase=Menstrual";
        let sanitized = sanitize(input);
        assert_eq!(
            sanitized,
            "INFO Assessment complete score=[REDACTED] bucket=[REDACTED] phase=[REDACTED]"
        );
    }

    #[test]
    fn test_sanitize_cycle_numbers() {
        let sanitized = sanitize("days_since=3 period_length=5 cycle_length=28");
        assert!(!sanitized.contains('3'));
        assert!(!sanitized.contains("28"));
        assert!(sanitized.contains("cycle_length=[REDACTED]"));
    }

    #[test]
    fn test_sanitize_symptoms() {
        let sanitized = sanitize("symptoms=[Fatigue, Cravings] done");
        assert_eq!(sanitized, "symptoms=[REDACTED] done");

        let sanitized = sanitize("Fatigue: 1, Headaches=false");
        assert!(!sanitized.contains(": 1"));
        assert!(!sanitized.contains("false"));
    }

    #[test]
    fn test_leaves_ordinary_text_alone() {
        let input = "Loaded model from \"models/mood_model.json\" (n_features=23, n_trees=4)";
        assert_eq!(sanitize(input), input);
        assert!(!contains_sensitive(input));
        assert!(contains_sensitive("score=4.0"));
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("phase=Luteal and a long tail", 12);
        assert!(sanitized.contains("[TRUNCATED]"));
        assert!(!sanitized.contains("Luteal"));
    }

    #[test]
    fn test_truncated_line_keeps_newline() {
        let sanitized = sanitize_with_limit("score=7.3 and a very long tail\n", 9);
        assert_eq!(sanitized, "score=[REDACTED] [TRUNCATED]\n");

        let sanitized = sanitize_with_limit("score=7.3 and a very long tail", 9);
        assert_eq!(sanitized, "score=[REDACTED] [TRUNCATED]");
    }

    #[test]
    fn test_sanitize_scores_in_exponent_form() {
        assert_eq!(sanitize("score=1.5e-3 done"), "score=[REDACTED] done");
        assert_eq!(sanitize("score=2E+1"), "score=[REDACTED]");
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut out);
            writer.write_all(b"score=5.5 ").expect("write");
            writer.write_all(b"phase=Luteal\nnext line").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "score=[REDACTED] phase=[REDACTED]\nnext line");
    }
}
