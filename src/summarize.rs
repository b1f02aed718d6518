//! # Summarization
//!
//! One-sentence file summaries come from an external text-generation CLI
//! (`claude -p <prompt>` by default). This module keeps that collaborator
//! behind the [`Summarizer`] trait so the orchestrator never deals with
//! processes directly, and tests can substitute an in-process fake.
//!
//! ## Bounded waits
//!
//! Each attempt runs the program with piped output drained by reader threads
//! that report over a channel. Draining both pipes and waiting for the exit
//! share one deadline; a child still running when it passes is killed and
//! the attempt reports [`SummarizeError::Timeout`].
//!
//! ## Retries
//!
//! [`summarize_with_retry`] makes up to `max_attempts` back-to-back attempts
//! and returns a [`SummaryOutcome`] that says whether a summary was produced
//! and how many attempts were spent. Callers decide what to do on exhaustion;
//! the hook substitutes a fixed fallback summary.

use std::borrow::Cow;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::HookConfig;
use crate::defaults;
use crate::error::{Error, Result, SummarizeError};

/// Marker appended to content cut at the budget.
pub const TRUNCATION_MARKER: &str = "\n... (file truncated, only the beginning is shown)";

/// Produces a one-line summary of a file.
pub trait Summarizer {
    /// Summarize `content`, the text of the file at repository path `path`.
    fn summarize(&self, path: &str, content: &str) -> std::result::Result<String, SummarizeError>;
}

/// Result of [`summarize_with_retry`].
#[derive(Debug)]
pub enum SummaryOutcome {
    Generated { summary: String, attempts: u32 },
    /// Every attempt failed; `last_error` is the final failure.
    Exhausted { attempts: u32, last_error: SummarizeError },
}

impl SummaryOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, SummaryOutcome::Generated { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            SummaryOutcome::Generated { attempts, .. } | SummaryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    /// The generated summary, or `fallback` if every attempt failed.
    pub fn into_summary(self, fallback: &str) -> String {
        match self {
            SummaryOutcome::Generated { summary, .. } => summary,
            SummaryOutcome::Exhausted { .. } => fallback.to_string(),
        }
    }
}

/// Ask `summarizer` up to `max_attempts` times, without delay between attempts.
pub fn summarize_with_retry(
    summarizer: &dyn Summarizer,
    path: &str,
    content: &str,
    max_attempts: u32,
) -> SummaryOutcome {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match summarizer.summarize(path, content) {
            Ok(summary) => {
                return SummaryOutcome::Generated {
                    summary,
                    attempts: attempt,
                }
            }
            Err(e) => {
                warn!(
                    "summarizing '{}' failed (attempt {}/{}): {}",
                    path, attempt, max_attempts, e
                );
                if attempt >= max_attempts {
                    return SummaryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    };
                }
            }
        }
        attempt += 1;
    }
}

/// Cut `content` to `budget` characters, appending [`TRUNCATION_MARKER`] if cut.
pub fn truncate_content(content: &str, budget: usize) -> Cow<'_, str> {
    match content.char_indices().nth(budget) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}{}", &content[..byte_idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(content),
    }
}

/// Build the summarization prompt.
pub fn build_prompt(path: &str, content: &str, language: &str, budget: usize) -> String {
    format!(
        "Summarize the core role of the following file in exactly one sentence, in {language}.\n\
         Focus on the overall purpose and functionality of the file.\n\
         Output only the one-sentence summary, with no preamble or extra explanation.\n\
         \n\
         File path: {path}\n\
         --- File content ---\n\
         {content}",
        language = language,
        path = path,
        content = truncate_content(content, budget),
    )
}

/// First non-empty line of `output`, trimmed.
pub fn first_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// [`Summarizer`] that shells out to a text-generation CLI.
#[derive(Debug, Clone)]
pub struct CliSummarizer {
    program: String,
    timeout: Duration,
    language: String,
    budget: usize,
}

impl CliSummarizer {
    pub fn new(program: impl Into<String>, timeout: Duration, language: impl Into<String>, budget: usize) -> Self {
        Self {
            program: program.into(),
            timeout,
            language: language.into(),
            budget,
        }
    }

    pub fn from_config(config: &HookConfig) -> Self {
        Self::new(
            config.summarizer_program.clone(),
            config.timeout(),
            config.language.clone(),
            config.content_budget,
        )
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check that the program runs, returning its `--version` output.
    pub fn probe(&self) -> Result<String> {
        let mut command = Command::new(&self.program);
        command.arg("--version");
        let unavailable = |message: String| Error::ToolValidation {
            tool: self.program.clone(),
            message,
        };

        let output = run_with_timeout(command, Duration::from_secs(defaults::PROBE_TIMEOUT_SECS))
            .map_err(|e| unavailable(e.to_string()))?;
        if !output.status.success() {
            return Err(unavailable(format!(
                "`{} --version` exited with {}",
                self.program, output.status
            )));
        }
        Ok(first_line(&output.stdout).unwrap_or_else(|| self.program.clone()))
    }
}

impl Summarizer for CliSummarizer {
    fn summarize(&self, path: &str, content: &str) -> std::result::Result<String, SummarizeError> {
        let prompt = build_prompt(path, content, &self.language, self.budget);
        debug!("summarizing '{}' with {} ({} prompt bytes)", path, self.program, prompt.len());

        let mut command = Command::new(&self.program);
        command.arg("-p").arg(prompt);
        let output = run_with_timeout(command, self.timeout)?;

        if !output.status.success() {
            return Err(SummarizeError::Failed {
                code: output.status.code(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        first_line(&output.stdout).ok_or(SummarizeError::EmptyResponse)
    }
}

struct CapturedOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

/// Interval between exit checks once both pipes are drained.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

fn read_pipe(pipe: Option<impl Read>, which: Pipe) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf) {
            debug!("reading summarizer {:?} failed after {} bytes: {}", which, buf.len(), e);
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn spawn_reader(pipe: Option<impl Read + Send + 'static>, which: Pipe, tx: Sender<(Pipe, String)>) {
    thread::spawn(move || {
        let text = read_pipe(pipe, which);
        if tx.send((which, text)).is_err() {
            debug!("summarizer {:?} closed after the wait was abandoned", which);
        }
    });
}

/// Kill `child` and report the timeout.
fn abandon(child: &mut Child, timeout: Duration) -> SummarizeError {
    if let Err(e) = child.kill() {
        debug!("killing summarizer failed: {}", e);
    }
    if let Err(e) = child.wait() {
        debug!("reaping summarizer failed: {}", e);
    }
    SummarizeError::Timeout(timeout)
}

/// Run `command` to completion, killing it unless both of its output pipes
/// are closed and it has exited within `timeout`.
fn run_with_timeout(mut command: Command, timeout: Duration) -> std::result::Result<CapturedOutput, SummarizeError> {
    let mut child: Child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| SummarizeError::Unavailable(e.to_string()))?;
    let deadline = Instant::now() + timeout;

    let (tx, rx) = mpsc::channel();
    spawn_reader(child.stdout.take(), Pipe::Stdout, tx.clone());
    spawn_reader(child.stderr.take(), Pipe::Stderr, tx);

    let mut stdout = String::new();
    let mut stderr = String::new();
    for _ in 0..2 {
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok((Pipe::Stdout, text)) => stdout = text,
            Ok((Pipe::Stderr, text)) => stderr = text,
            Err(RecvTimeoutError::Timeout) => return Err(abandon(&mut child, timeout)),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() < deadline => thread::sleep(EXIT_POLL_INTERVAL),
            Ok(None) => return Err(abandon(&mut child, timeout)),
            Err(e) => return Err(SummarizeError::Unavailable(e.to_string())),
        }
    };

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}
