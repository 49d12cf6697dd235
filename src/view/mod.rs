//! Pure projections from browser state and API records to what gets drawn.

use serde::Serialize;

use crate::api::{FoodDetail, FoodSummary};
use crate::browser::state::SearchState;

pub const EMPTY_TEXT: &str = "-";
pub const DEFAULT_SERVING_SIZE: f64 = 100.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    /// 1-based position on the current page.
    pub position: usize,
    pub id: i64,
    pub name: String,
    pub maker: String,
    pub year: String,
    pub calorie: String,
    pub carbohydrate: String,
    pub protein: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultsView {
    pub total_items: u64,
    pub current_page: u32,
    pub max_pages: u64,
    pub page_label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub no_results: bool,
    pub cards: Vec<CardView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NutrientRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailView {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub year: String,
    pub maker: String,
    pub group: String,
    pub source: String,
    pub serving: String,
    pub nutrients: Vec<NutrientRow>,
}

/// Formats a nutrient amount. Missing, zero and non-finite values all read
/// as `0`; whole numbers drop the fractional part.
pub fn format_amount(value: Option<f64>) -> String {
    let v = value.filter(|v| v.is_finite() && *v != 0.0).unwrap_or(0.0);
    format!("{v}")
}

pub fn text_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_TEXT.to_string(),
    }
}

pub fn project_card(position: usize, food: &FoodSummary) -> CardView {
    CardView {
        position,
        id: food.id,
        name: food.food_name.clone(),
        maker: text_or_dash(food.maker_name.as_deref()),
        year: text_or_dash(food.research_year.as_deref()),
        calorie: format!("{} kcal", format_amount(food.calorie)),
        carbohydrate: format!("{} g", format_amount(food.carbohydrate)),
        protein: format!("{} g", format_amount(food.protein)),
    }
}

pub fn project_results(state: &SearchState, items: &[FoodSummary]) -> ResultsView {
    ResultsView {
        total_items: state.total_items(),
        current_page: state.current_page(),
        max_pages: state.max_pages(),
        page_label: format!("Page: {}", state.current_page()),
        previous_enabled: state.has_previous(),
        next_enabled: state.has_next(),
        no_results: items.is_empty(),
        cards: items
            .iter()
            .enumerate()
            .map(|(i, food)| project_card(i + 1, food))
            .collect(),
    }
}

fn row(label: &'static str, value: Option<f64>, unit: &str) -> NutrientRow {
    NutrientRow {
        label,
        value: format!("{} {unit}", format_amount(value)),
    }
}

pub fn project_detail(food: &FoodDetail) -> DetailView {
    let serving = food
        .serving_size
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(DEFAULT_SERVING_SIZE);
    DetailView {
        id: food.id,
        title: food.food_name.clone(),
        code: text_or_dash(food.food_cd.as_deref()),
        year: text_or_dash(food.research_year.as_deref()),
        maker: text_or_dash(food.maker_name.as_deref()),
        group: text_or_dash(food.group_name.as_deref()),
        source: text_or_dash(food.ref_name.as_deref()),
        serving: format!("{serving}"),
        nutrients: vec![
            row("Calories", food.calorie, "kcal"),
            row("Carbohydrate", food.carbohydrate, "g"),
            row("Protein", food.protein, "g"),
            row("Fat", food.fat_grams(), "g"),
            row("Sugars", food.sugars, "g"),
            row("Sodium", food.salt, "mg"),
            row("Cholesterol", food.cholesterol, "mg"),
            row("Saturated fat", food.saturated_fatty_acids, "g"),
            row("Trans fat", food.trans_fat, "g"),
        ],
    }
}
