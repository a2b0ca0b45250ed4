//! Question-by-question practice interview over the REST endpoints.

use crate::app::App;
use crate::console::{ReplHelper, render_evaluation, render_result};
use anyhow::Result;
use colored::Colorize;
use mockmate_application::PracticeInterview;
use mockmate_core::MockMateError;
use mockmate_core::interview::Question;
use rustyline::Editor;
use rustyline::error::ReadlineError;

fn print_question(number: usize, limit: usize, question: &Question) {
    let mut header = format!("Question {}/{}", number, limit);
    if !question.category.is_empty() {
        header.push_str(&format!(" [{}]", question.category));
    }
    println!();
    println!("{}", header.bright_black());
    println!("{}", question.text.bright_blue());
}

/// Service failures are already shown as notifications; only input
/// problems need to be echoed here.
fn report(err: &MockMateError) {
    match err {
        MockMateError::Validation(message) => println!("{}", message.yellow()),
        other => tracing::debug!("[practice] {}", other),
    }
}

pub async fn run(app: &App, job_id: &str) -> Result<()> {
    let session = app.require_login()?;

    let mut interview = PracticeInterview::start(
        app.api.clone(),
        app.api.as_ref(),
        app.notifier.clone(),
        job_id,
        session.user.id.clone(),
        app.config.interview.question_limit,
    )
    .await?;

    println!("{}", format!("=== Practice: {} ===", interview.job().title).bright_magenta().bold());
    println!(
        "{}",
        "Answer each question and press Enter. '/finish' ends early, '/quit' leaves without a result."
            .bright_black()
    );

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new(&["/finish", "/quit"])));

    while !interview.is_complete() {
        if interview.current_question().is_none() && interview.answered() < interview.question_limit() {
            match interview.next_question().await {
                Ok(question) => {
                    print_question(interview.answered() + 1, interview.question_limit(), &question)
                }
                Err(e) => {
                    report(&e);
                    println!(
                        "{}",
                        "Press Enter to try again or type '/finish' for the result.".bright_black()
                    );
                }
            }
        }

        let line = match rl.readline("answer> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to leave.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        match trimmed {
            "/quit" => return Ok(()),
            "/finish" => match interview.finish().await {
                Ok(result) => {
                    println!("\n{}", render_result(&result));
                    return Ok(());
                }
                Err(e) => report(&e),
            },
            answer => match interview.submit_answer(answer).await {
                Ok(outcome) => {
                    println!("{}", render_evaluation(&outcome.evaluation));
                    if let Some(result) = outcome.result {
                        println!("\n{}", render_result(&result));
                        return Ok(());
                    }
                    if let Some(question) = outcome.next_question {
                        print_question(
                            interview.answered() + 1,
                            interview.question_limit(),
                            &question,
                        );
                    } else if interview.answered() >= interview.question_limit() {
                        println!(
                            "{}",
                            "All questions answered. Type '/finish' to request the result."
                                .bright_black()
                        );
                    }
                }
                Err(e) => report(&e),
            },
        }
    }

    if let Some(result) = interview.result() {
        println!("\n{}", render_result(result));
    }
    Ok(())
}
