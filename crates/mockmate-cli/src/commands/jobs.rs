use crate::app::App;
use crate::console::render_job;
use anyhow::Result;
use colored::Colorize;
use mockmate_application::JobCatalog;

pub async fn list(app: &App, search: Option<&str>) -> Result<()> {
    let mut catalog = JobCatalog::new(app.api.clone(), app.notifier.clone());
    catalog.refresh().await?;

    let term = search.unwrap_or_default();
    let jobs = catalog.search(term);
    if jobs.is_empty() {
        println!("{}", "No jobs match your search.".bright_black());
        return Ok(());
    }
    for job in jobs {
        println!("{}", render_job(job));
    }
    println!(
        "{}",
        "Start with `mockmate interview <id>` or `mockmate practice <id>`.".bright_black()
    );
    Ok(())
}
