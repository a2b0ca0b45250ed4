use crate::app::App;
use anyhow::{Context, Result};
use colored::Colorize;
use mockmate_core::auth::{ProfileUpdate, Registration, User};
use rustyline::DefaultEditor;

fn prompt_password(prompt: &str) -> Result<String> {
    let mut editor = DefaultEditor::new()?;
    let password = editor.readline(prompt).context("Password input aborted")?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

fn print_user(user: &User) {
    println!("{}", user.display_name().bold());
    let rows = [
        ("Email", &user.email),
        ("Username", &user.username),
        ("Phone", &user.phone_number),
        ("Bio", &user.bio),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("  {:<9} {}", format!("{}:", label).bright_black(), value);
        }
    }
    let mut roles = Vec::new();
    if user.is_candidate {
        roles.push("candidate");
    }
    if user.is_recruiter {
        roles.push("recruiter");
    }
    if !roles.is_empty() {
        println!("  {:<9} {}", "Role:".bright_black(), roles.join(", "));
    }
}

pub async fn login(app: &App, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    app.account().login(email, &password).await?;
    Ok(())
}

pub async fn register(
    app: &App,
    email: String,
    username: String,
    fullname: Option<String>,
    is_candidate: bool,
) -> Result<()> {
    let password = prompt_password("Choose a password: ")?;
    let registration = Registration {
        email,
        username,
        password,
        fullname,
        is_candidate,
    };
    app.account().register(&registration).await?;
    println!("{}", "Run `mockmate login --email <email>` to sign in.".bright_black());
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    if !app.auth.is_authenticated() {
        println!("{}", "Not signed in.".bright_black());
        return Ok(());
    }
    app.account().logout().await?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub async fn show_profile(app: &App) -> Result<()> {
    app.require_login()?;
    let user = app.account().profile().await?;
    print_user(&user);
    Ok(())
}

pub async fn update_profile(
    app: &App,
    fullname: Option<String>,
    username: Option<String>,
    phone_number: Option<String>,
    bio: Option<String>,
) -> Result<()> {
    app.require_login()?;
    let update = ProfileUpdate {
        fullname,
        username,
        phone_number,
        bio,
    };
    let user = app.account().update_profile(&update).await?;
    print_user(&user);
    Ok(())
}

pub async fn list_skills(app: &App) -> Result<()> {
    app.require_login()?;
    let skills = app.account().skills().await?;
    if skills.is_empty() {
        println!("{}", "No skills yet. Add one with `mockmate skills add <name>`.".bright_black());
        return Ok(());
    }
    for skill in skills {
        let filled = usize::from(skill.level.min(100) / 10);
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(10 - filled));
        println!(
            "{} {:<20} {} {}%",
            format!("[{}]", skill.id.as_deref().unwrap_or("-")).bright_black(),
            skill.name,
            bar.cyan(),
            skill.level
        );
    }
    Ok(())
}

pub async fn add_skill(app: &App, name: &str, level: u8) -> Result<()> {
    app.require_login()?;
    let skill = app.account().add_skill(name, level).await?;
    println!("{} {} ({}%)", "Added".green(), skill.name, skill.level);
    Ok(())
}

pub async fn remove_skill(app: &App, id: &str) -> Result<()> {
    app.require_login()?;
    app.account().remove_skill(id).await?;
    println!("{} skill {}", "Removed".green(), id);
    Ok(())
}
