pub mod terminal;

use crate::view::{DetailView, ResultsView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub fn render_results_text(view: &ResultsView) -> String {
    let mut out = String::new();
    out.push_str(&format!(":: {:<10}: {}\n", "Results", view.total_items));
    out.push_str(&format!(
        ":: {:<10}: {} of {} [prev: {}] [next: {}]\n",
        "Paging",
        view.page_label,
        view.max_pages,
        on_off(view.previous_enabled),
        on_off(view.next_enabled)
    ));
    if view.no_results {
        out.push_str("\nNo foods match the current search.\n");
        return out;
    }
    for card in &view.cards {
        out.push('\n');
        out.push_str(&format!("{:>3}. {} (#{})\n", card.position, card.name, card.id));
        out.push_str(&format!("     Maker: {}  Year: {}\n", card.maker, card.year));
        out.push_str(&format!(
            "     Calories: {}  Carbohydrate: {}  Protein: {}\n",
            card.calorie, card.carbohydrate, card.protein
        ));
    }
    out
}

pub fn render_detail_text(view: &DetailView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} (#{})\n", view.title, view.id));
    for (label, value) in [
        ("Code", &view.code),
        ("Year", &view.year),
        ("Maker", &view.maker),
        ("Group", &view.group),
        ("Source", &view.source),
    ] {
        out.push_str(&format!("  {:<14}{}\n", label, value));
    }
    out.push_str(&format!("  {:<14}{} g\n", "Serving", view.serving));
    out.push('\n');
    for row in &view.nutrients {
        out.push_str(&format!("  {:<14}{:>12}\n", row.label, row.value));
    }
    out
}

pub fn render_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
