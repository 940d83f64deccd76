//! Language listing
//!
//! Prints the languages the tutor offers, marking the configured default.

use std::error::Error;

use crate::api::{HttpTutorApi, Language, TutorApi};

pub async fn list_languages(
    api_base: &str,
    default_language: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let api = HttpTutorApi::new(api_base);
    let languages = api.list_languages().await?;

    println!("🌍 Available languages ({api_base})");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    if languages.is_empty() {
        println!("No languages offered by this tutor.");
        return Ok(());
    }

    for line in format_language_table(&languages, default_language) {
        println!("{line}");
    }

    println!();
    println!("💡 Start practicing with: parlance -L <code>");
    println!("💡 Make one the default: parlance set default-language <code>");

    Ok(())
}

fn format_language_table(languages: &[Language], default_language: Option<&str>) -> Vec<String> {
    let code_width = languages
        .iter()
        .map(|language| language.code.chars().count())
        .max()
        .unwrap_or(0)
        .max("CODE".len());

    let mut lines = Vec::with_capacity(languages.len() + 1);
    lines.push(format!("  {:<code_width$}  NAME", "CODE"));
    for language in languages {
        let is_default = default_language
            .is_some_and(|code| code.eq_ignore_ascii_case(&language.code));
        let marker = if is_default { " (default)" } else { "" };
        lines.push(format!(
            "  {:<code_width$}  {}{marker}",
            language.code, language.name
        ));
    }
    lines
}
