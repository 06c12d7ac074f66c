//! Colored terminal rendering.

use colored::Colorize;
use model::{DetailRecord, QueryLabel};
use std::fmt::Display;
use std::io::{self, Write};
use tracing::warn;

use crate::presenter::Presenter;

/// Origin counted in the landing page summary line.
pub const DEFAULT_SPOTLIGHT: &str = "Indian";

/// Writes each render to `out` as plain lines.
///
/// Write failures are logged and otherwise ignored; a broken pipe should
/// not take down a browsing session.
pub struct TerminalPresenter<W: Write> {
    out: W,
    spotlight: String,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            spotlight: DEFAULT_SPOTLIGHT.to_string(),
        }
    }

    pub fn with_spotlight(mut self, origin: impl Into<String>) -> Self {
        self.spotlight = origin.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush terminal: {}", e);
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_list(&mut self, records: &[DetailRecord], label: &QueryLabel) {
        if label.shows_summary() {
            let spotlight = records.iter().filter(|r| r.is_from(&self.spotlight)).count();
            let summary = format!(
                "Showing {} recipes from around the world ({} {} dishes)",
                records.len(),
                spotlight,
                self.spotlight
            );
            self.line(summary.bold().blue());
        }

        for (index, record) in records.iter().enumerate() {
            let origin = record.origin.as_deref().unwrap_or("International");
            let category = record.category.as_deref().unwrap_or("Recipe");
            let name = if record.is_from(&self.spotlight) {
                record.name.yellow().bold()
            } else {
                record.name.bold()
            };
            self.line(format!(
                "{}. {} [{}] - {} cuisine (id {})",
                (index + 1).to_string().green(),
                name,
                category,
                origin,
                record.id.dimmed()
            ));
        }
        self.flush();
    }

    fn render_detail(&mut self, record: &DetailRecord) {
        self.line(record.name.bold().blue());
        self.line(format!(
            "{} Cuisine",
            record.origin.as_deref().unwrap_or("International")
        ));

        self.line("");
        self.line("Ingredients:".bold());
        for ingredient in &record.ingredients {
            self.line(format!("{}{}", "• ".green(), ingredient));
        }

        self.line("");
        self.line("Instructions:".bold());
        for paragraph in record.instruction_paragraphs() {
            self.line(paragraph);
        }

        if let Some(url) = &record.video_url {
            self.line("");
            self.line(format!("Watch video: {}", url.cyan()));
        }

        let tags = record.tag_list();
        let tags = if tags.is_empty() {
            "Not available".to_string()
        } else {
            tags.join(", ")
        };
        self.line("");
        self.line(format!(
            "Category: {} | Tags: {}",
            record.category.as_deref().unwrap_or("Not available"),
            tags
        ));
        self.flush();
    }

    fn render_loading(&mut self) {
        self.line("Finding delicious recipes from around the world...".dimmed());
        self.flush();
    }

    fn render_empty(&mut self, message: &str) {
        self.line("No recipes found".bold().yellow());
        self.line(message);
        self.line(format!("Type {} to show all recipes", "all".green()));
        self.flush();
    }

    fn render_error(&mut self, message: &str) {
        self.line(format!("{} {}", "✗".red(), message.red()));
        self.line("Run the same command again to retry");
        self.flush();
    }

    fn render_notice(&mut self, message: &str) {
        self.line(format!("{} {}", "ℹ".cyan(), message));
        self.flush();
    }
}
