use crate::engine::{self, Outcome};
use crate::error::EvalError;
use crate::format;
use crate::normalizer::normalize_traced;
use crate::Rewrite;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Options that affect formatting.
#[derive(Debug, Clone)]
pub struct Options {
    /// Decimal places kept for non-integral results.
    pub precision: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

/// The response handed back to the caller: one text for the screen, one for
/// speech synthesis. Speech defaults to the display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsePayload {
    pub display_text: String,
    pub speech_text: String,
}

impl ResponsePayload {
    pub fn new(display: impl Into<String>) -> Self {
        let display_text = display.into();
        Self { speech_text: display_text.clone(), display_text }
    }

    pub fn with_speech(display: impl Into<String>, speech: impl Into<String>) -> Self {
        Self { display_text: display.into(), speech_text: speech.into() }
    }
}

/// Per-stage details returned by [`process_verbose_with`].
#[derive(Debug, Clone)]
pub struct ProcessDetails {
    /// Canonical expression produced by the normalizer.
    pub canonical: String,
    /// Rewrites that fired during normalization.
    pub rewrites: Vec<Rewrite>,
    /// Short label for the outcome, e.g. `"value"` or `"zero division"`.
    pub outcome: String,
    /// Diagnostic text of the failure, if any.
    pub error: Option<String>,
    pub normalize: Duration,
    pub evaluate: Duration,
    pub format: Duration,
    pub total: Duration,
}

/// Result from [`process_verbose_with`].
#[derive(Debug, Clone)]
pub struct ProcessVerbose {
    pub command: String,
    pub payload: ResponsePayload,
    pub details: ProcessDetails,
}

/// Interpret `command` with default [`Options`].
///
/// # Example
/// ```
/// use saycalc::process;
///
/// let out = process("what is five plus three times two");
/// assert_eq!(out.display_text, "The result of 5 + 3 x 2 is 11.");
/// assert_eq!(out.speech_text, "The result of 5 plus 3 times 2 is 11.");
/// ```
pub fn process(command: &str) -> ResponsePayload {
    process_with(command, &Options::default())
}

/// Interpret `command`. Never fails: every failure becomes a payload.
pub fn process_with(command: &str, options: &Options) -> ResponsePayload {
    process_verbose_with(command, options).payload
}

/// Interpret `command` and also return the canonical string, the rewrite
/// trace and per-stage timings.
pub fn process_verbose_with(command: &str, options: &Options) -> ProcessVerbose {
    let started = Instant::now();
    log::info!("Command received: '{}'", command);

    let normalized = normalize_traced(command);
    let normalize = started.elapsed();

    let eval_started = Instant::now();
    let result = engine::evaluate(&normalized.canonical);
    let evaluate = eval_started.elapsed();

    match &result {
        Ok(Outcome::Value { value, .. }) => {
            log::info!("Expression processed: '{}' -> Result: {}", normalized.canonical, value)
        }
        Ok(Outcome::BareNumber { literal, .. }) => log::info!("Bare number: '{}'", literal),
        Err(err) => {
            log::error!("Error evaluating expression '{}' from '{}': {}", normalized.canonical, command, err)
        }
    }

    let format_started = Instant::now();
    let payload = format::respond(&result, options);
    let format = format_started.elapsed();

    let details = ProcessDetails {
        canonical: normalized.canonical,
        rewrites: normalized.rewrites,
        outcome: outcome_label(&result).to_string(),
        error: result.as_ref().err().map(|e| e.to_string()),
        normalize,
        evaluate,
        format,
        total: started.elapsed(),
    };

    ProcessVerbose { command: command.to_string(), payload, details }
}

fn outcome_label(result: &Result<Outcome, EvalError>) -> &'static str {
    match result {
        Ok(Outcome::Value { .. }) => "value",
        Ok(Outcome::BareNumber { .. }) => "bare number",
        Err(EvalError::Empty) => "empty",
        Err(EvalError::Incomplete) => "incomplete",
        Err(EvalError::NoOperator) => "no operator",
        Err(EvalError::Syntax(_)) => "syntax",
        Err(EvalError::ZeroDivision { .. }) => "zero division",
        Err(EvalError::Domain { .. }) => "domain",
        Err(EvalError::Overflow) => "overflow",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    #[test]
    fn square_root_example() {
        let out = process("square root of 4");
        assert_eq!(out.display_text, "The result of √(4) is 2.");
        assert_eq!(out.speech_text, "The result of 4 is 2.");
    }

    #[test]
    fn precedence_and_right_associative_power() {
        assert_eq!(process("5 plus 3 times 2").display_text, "The result of 5 + 3 x 2 is 11.");
        assert_eq!(
            process("2 to the power of 3 to the power of 2").speech_text,
            "The result of 2 to the power of 3 to the power of 2 is 512."
        );
    }

    #[test]
    fn division_by_zero_is_generic_for_the_user_but_distinct_in_details() {
        let out = process_verbose_with("10 divided by 0", &Options::default());
        assert_eq!(out.payload.display_text, "I couldn't calculate that expression. Check that it's correct.");
        assert_eq!(out.details.outcome, "zero division");
        assert!(out.details.error.as_deref().unwrap_or_default().contains("zero"));

        let syntax = process_verbose_with("open parenthesis 10 divided by", &Options::default());
        assert_eq!(syntax.details.outcome, "incomplete");

        let syntax = process_verbose_with("open parenthesis 10 divided by 2", &Options::default());
        assert_eq!(syntax.payload.display_text, out.payload.display_text);
        assert_eq!(syntax.details.outcome, "syntax");
    }

    #[test]
    fn empty_input() {
        let out = process("");
        assert_eq!(out.display_text, "I couldn't identify a math operation in your command.");
        assert_eq!(out.speech_text, out.display_text);
    }

    #[test]
    fn bare_number() {
        assert_eq!(process("forty two").display_text, "You said the number 42.");
        assert_eq!(process("7").display_text, "You said the number 7.");
    }

    #[test]
    fn precision_option() {
        let opts = Options { precision: 2 };
        assert_eq!(process_with("1 divided by 3", &opts).display_text, "The result of 1 / 3 is 0.33.");
        assert_eq!(process("1 divided by 3").display_text, "The result of 1 / 3 is 0.3333.");
    }

    #[test]
    fn verbose_details() {
        let res = process_verbose_with("what is the square root of nine", &Options::default());
        assert_eq!(res.command, "what is the square root of nine");
        assert_eq!(res.details.canonical, "sqrt(9)");
        assert_eq!(res.details.outcome, "value");
        assert!(res.details.error.is_none());
        assert!(!res.details.rewrites.is_empty());
        assert!(res.details.normalize + res.details.evaluate + res.details.format <= res.details.total);
    }

    #[test]
    fn payload_serializes_with_both_fields() {
        let json = serde_json::to_value(process("2 plus 2")).unwrap();
        assert_eq!(json["display_text"], "The result of 2 + 2 is 4.");
        assert_eq!(json["speech_text"], "The result of 2 plus 2 is 4.");
    }

    #[test]
    fn concurrent_calls_are_independent() {
        let handles: Vec<_> = (1..=8)
            .map(|n| std::thread::spawn(move || process(&format!("{} times {}", n, n)).display_text))
            .collect();
        for (n, handle) in (1..=8).zip(handles) {
            let text = handle.join().unwrap();
            assert_eq!(text, format!("The result of {} x {} is {}.", n, n, n * n));
        }
    }

    #[test]
    fn long_chains_fail_gracefully() {
        let generic = "I couldn't calculate that expression. Check that it's correct.";

        let out = process_verbose_with(&vec!["1"; 100_000].join("+"), &Options::default());
        assert_eq!(out.payload.display_text, generic);
        assert_eq!(out.details.outcome, "syntax");

        let spoken = vec!["one"; 20_000].join(" plus ");
        assert_eq!(process(&spoken).display_text, generic);
    }

    struct CaptureLogger {
        lines: Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger { lines: Mutex::new(Vec::new()) };

    /// Lines captured so far that mention `needle`. Other tests log
    /// concurrently, so callers filter on text unique to them.
    fn captured(needle: &str) -> Vec<(log::Level, String)> {
        CAPTURE.lines.lock().unwrap().iter().filter(|(_, line)| line.contains(needle)).cloned().collect()
    }

    fn install_capture() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(log::LevelFilter::Info);
        });
    }

    #[test]
    fn audit_lines_for_success_and_failure() {
        install_capture();

        process("1234 plus 4321");
        assert_eq!(
            captured("1234"),
            vec![
                (log::Level::Info, "Command received: '1234 plus 4321'".to_string()),
                (log::Level::Info, "Expression processed: '1234+4321' -> Result: 5555".to_string()),
            ]
        );

        process("9876 divided by 0");
        assert_eq!(
            captured("9876"),
            vec![
                (log::Level::Info, "Command received: '9876 divided by 0'".to_string()),
                (
                    log::Level::Error,
                    "Error evaluating expression '9876/0' from '9876 divided by 0': zero divisor in '/'".to_string()
                ),
            ]
        );
    }
}
