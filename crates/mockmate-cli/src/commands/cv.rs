use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use mockmate_application::CvUploadForm;
use mockmate_infrastructure::read_cv_file;
use std::path::Path;

pub async fn upload(app: &App, path: &Path) -> Result<()> {
    app.require_login()?;
    let mut form = CvUploadForm::new(app.api.clone(), app.notifier.clone());

    form.select(read_cv_file(path)?)?;
    if let Some((name, size)) = form.summary() {
        println!("{} {} ({})", "Selected".bright_black(), name, size);
    }

    let receipt = form.upload().await?;
    if let Some(message) = receipt.message {
        println!("{}", message.bright_black());
    }
    Ok(())
}
