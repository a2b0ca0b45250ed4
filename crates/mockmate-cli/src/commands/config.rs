use crate::app::App;
use anyhow::Result;
use colored::Colorize;

pub fn show(app: &App) -> Result<()> {
    println!("{}", format!("# {}", app.config_service.path().display()).bright_black());
    print!("{}", toml::to_string_pretty(&app.config)?);
    println!(
        "{}",
        format!("# channel: {}", app.config.api.ws_base_url()).bright_black()
    );
    Ok(())
}

pub fn path(app: &App) {
    println!("{}", app.config_service.path().display());
}

pub fn set_url(app: &App, url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("Base URL must start with http:// or https://");
    }
    app.config_service
        .update(|config| config.api.base_url = url.to_string())?;
    println!("{} {}", "Backend set to".green(), url);
    Ok(())
}

pub fn set_question_limit(app: &App, limit: usize) -> Result<()> {
    if limit == 0 {
        anyhow::bail!("The question limit must be at least 1");
    }
    app.config_service
        .update(|config| config.interview.question_limit = limit)?;
    println!("{} {}", "Question limit set to".green(), limit);
    Ok(())
}
