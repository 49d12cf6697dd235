use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::OutputFormat;
use crate::browser::Surface;
use crate::view::{DetailView, ResultsView};

/// Draws the browser on stdout, with the spinner and alerts on stderr.
pub struct TerminalSurface {
    format: OutputFormat,
    spinner: Option<ProgressBar>,
}

impl TerminalSurface {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            spinner: None,
        }
    }

    fn start_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template(":: {spinner} {msg} [{elapsed_precise}]") {
            pb.set_style(style);
        }
        pb.set_message("Loading...");
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}

impl Surface for TerminalSurface {
    fn set_loading(&mut self, visible: bool) {
        if visible {
            if self.spinner.is_none() {
                self.spinner = Some(Self::start_spinner());
            }
        } else if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn set_year_options(&mut self, years: &[String]) {
        if self.format == OutputFormat::Text {
            println!(":: {:<10}: {}", "Years", years.join(", "));
        }
    }

    fn clear_results(&mut self) {}

    fn show_results(&mut self, view: &ResultsView) {
        match self.format {
            OutputFormat::Json => println!("{}", super::render_json(view)),
            OutputFormat::Text => {
                println!();
                print!("{}", super::render_results_text(view));
            }
        }
    }

    fn show_detail(&mut self, view: &DetailView) {
        match self.format {
            OutputFormat::Json => println!("{}", super::render_json(view)),
            OutputFormat::Text => {
                println!();
                println!("{}", "── Details ──".bold());
                print!("{}", super::render_detail_text(view));
                println!("{}", "(close | back)".dimmed());
            }
        }
    }

    fn hide_detail(&mut self) {
        if self.format == OutputFormat::Text {
            println!("{}", "Details closed.".dimmed());
        }
    }

    fn alert(&mut self, message: &str) {
        if let Some(pb) = self.spinner.as_ref() {
            pb.suspend(|| eprintln!("{} {}", "!".red().bold(), message.red()));
        } else {
            eprintln!("{} {}", "!".red().bold(), message.red());
        }
    }
}
