//! Live interview over the interview channel.

use crate::app::App;
use crate::commands::jobs;
use crate::console::{ReplHelper, render_message};
use anyhow::Result;
use colored::Colorize;
use mockmate_application::{SessionClient, TokenProvider};
use mockmate_core::MockMateError;
use mockmate_core::api::{AccountApi, InterviewApi};
use mockmate_core::reconnect::ReconnectPolicy;
use mockmate_core::session::{ChannelState, SessionTarget};
use mockmate_interaction::WsConnector;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use std::time::Duration;

const CONNECT_WAIT: Duration = Duration::from_secs(15);

/// Asks the backend for a new session on `job_id`.
async fn start_session(app: &App, job_id: &str) -> Result<Option<String>> {
    let started = app.api.start_interview(job_id).await?;
    let id = started.identifier().map(str::to_string);
    if id.is_none() {
        tracing::warn!("[interview] Backend did not return a session id for job {}", job_id);
    }
    Ok(id)
}

/// Nothing was exchanged and the channel gave up; send the user back to the job list.
async fn back_to_jobs(app: &App, client: &SessionClient) -> Result<()> {
    client.close().await;
    println!(
        "{}",
        "Could not reach the interview server. Pick a job to try again:".yellow()
    );
    jobs::list(app, None).await
}

fn token_provider(app: &App) -> TokenProvider {
    let auth = app.auth.clone();
    let api = app.api.clone();
    Arc::new(move || auth.access_token().or_else(|| api.access_token()))
}

pub async fn run(app: &App, job_id: Option<String>, session_id: Option<String>) -> Result<()> {
    app.require_login()?;

    let session_id = match (&job_id, session_id) {
        (Some(job_id), None) => start_session(app, job_id).await?,
        (_, session_id) => session_id,
    };

    let client = SessionClient::new(
        Arc::new(WsConnector::new()),
        app.notifier.clone(),
        app.config.api.ws_base_url(),
        ReconnectPolicy::from(&app.config.reconnect),
    )
    .with_token_provider(token_provider(app));
    client.on_message(|message| println!("{}", render_message(message)));

    let target = SessionTarget {
        session_id,
        job_id,
    };
    match client.connect(target).await {
        Ok(()) => {}
        Err(MockMateError::MissingSessionId) => {
            println!(
                "{}",
                "No interview session to join. Pick a job to start one:".yellow()
            );
            return jobs::list(app, None).await;
        }
        Err(e) => return Err(e.into()),
    }

    println!("{}", "=== MockMate Interview ===".bright_magenta().bold());
    println!("{}", "Connecting to the interview server...".bright_black());
    match tokio::time::timeout(CONNECT_WAIT, client.wait_until_settled()).await {
        Ok(settled) => {
            if settled? == ChannelState::Closed && client.messages().await.is_empty() {
                return back_to_jobs(app, &client).await;
            }
        }
        Err(_) => println!(
            "{}",
            "Still connecting. Answers can be sent once the channel is open.".yellow()
        ),
    }
    println!(
        "{}",
        "Type your answers and press Enter. '/end' finishes the interview, '/quit' leaves."
            .bright_black()
    );

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new(&["/end", "/quit"])));

    loop {
        if client.state() == ChannelState::Closed {
            if client.messages().await.is_empty() {
                return back_to_jobs(app, &client).await;
            }
            println!("{}", "The interview channel is closed.".bright_black());
            break;
        }

        match rl.readline("answer> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match trimmed {
                    "/end" | "/quit" => break,
                    answer => {
                        if client.send(answer).await {
                            println!("{}", format!("> {}", answer).green());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to leave.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    client.close().await;
    let answered = client.answered_count().await;
    println!(
        "{}",
        format!("Interview ended after {} answer(s).", answered).bright_green()
    );
    Ok(())
}
