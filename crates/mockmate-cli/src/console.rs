//! Terminal output: notifications, transcript entries and results.

use colored::{Color, Colorize};
use mockmate_core::interview::{
    Decision, Evaluation, InterviewResult, MessageKind, ScoreBand, Sender, TranscriptMessage,
};
use mockmate_core::job::JobPosting;
use mockmate_core::notification::{NotificationLevel, Notifier};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

/// Prints notifications as they happen. A printed line counts as
/// dismissed, so nothing is retained.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, message: String) {
        tracing::debug!("[Notification] {}: {}", level, message);
        eprintln!("{}", render_notification(level, &message));
    }
}

pub fn render_notification(level: NotificationLevel, message: &str) -> String {
    let line = match level {
        NotificationLevel::Info => message.bright_black(),
        NotificationLevel::Success => message.green(),
        NotificationLevel::Warning => message.yellow(),
        NotificationLevel::Error => message.red(),
    };
    line.to_string()
}

pub fn decision_color(decision: Decision) -> Color {
    if decision.is_positive() {
        Color::Green
    } else {
        Color::Red
    }
}

pub fn score_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Strong => Color::Green,
        ScoreBand::Fair => Color::Yellow,
        ScoreBand::Weak => Color::Red,
    }
}

pub fn render_result(result: &InterviewResult) -> String {
    let decision = result.decision.to_string();
    let mut out = format!(
        "{} {}\n{} {}",
        "Decision:".bold(),
        decision.color(decision_color(result.decision)).bold(),
        "Confidence:".bold(),
        format!("{}%", result.confidence_percent()).cyan()
    );
    if !result.summary.is_empty() {
        out.push('\n');
        out.push_str(&result.summary);
    }
    out
}

pub fn render_evaluation(evaluation: &Evaluation) -> String {
    let score = format!("{}%", evaluation.score_percent()).color(score_color(evaluation.band()));
    if evaluation.feedback.is_empty() {
        format!("{} {}", "Score:".bold(), score)
    } else {
        format!("{} {}\n{}", "Score:".bold(), score, evaluation.feedback)
    }
}

pub fn render_message(message: &TranscriptMessage) -> String {
    let body = match message.kind.label() {
        Some(label) => format!("{} {}", label.bold(), message.content),
        None => message.content.clone(),
    };
    match (message.sender, message.kind) {
        (Sender::User, _) => format!("> {}", body).green().to_string(),
        (_, MessageKind::Error) => body.red().to_string(),
        (_, MessageKind::FinalDecision) => body.bright_magenta().to_string(),
        _ => body.bright_blue().to_string(),
    }
}

pub fn render_job(job: &JobPosting) -> String {
    let (skills, hidden) = job.skill_preview(3);
    let mut skills = skills.join(", ");
    if hidden > 0 {
        skills.push_str(&format!(" +{} more", hidden));
    }

    let mut meta = Vec::new();
    for value in [&job.company, &job.location, &job.job_type] {
        if !value.is_empty() {
            meta.push(value.as_str());
        }
    }

    let mut out = format!("{} {}", format!("[{}]", job.id).bright_black(), job.title.bold());
    if !meta.is_empty() {
        out.push_str(&format!(" - {}", meta.join(" | ")));
    }
    if !skills.is_empty() {
        out.push_str(&format!("\n    {}", skills.cyan()));
    }
    out
}

/// Completion and hints for the `/` commands of the interactive modes.
#[derive(Clone)]
pub struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    pub fn new(commands: &[&str]) -> Self {
        Self {
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ReplHelper {}
