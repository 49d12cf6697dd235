use serde::Deserialize;

/// One row of the listing endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FoodSummary {
    pub id: i64,
    #[serde(default)]
    pub food_name: String,
    #[serde(default)]
    pub maker_name: Option<String>,
    #[serde(default)]
    pub research_year: Option<String>,
    #[serde(default)]
    pub calorie: Option<f64>,
    #[serde(default)]
    pub carbohydrate: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
}

/// Full record returned by `GET /foods/{id}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FoodDetail {
    pub id: i64,
    #[serde(default)]
    pub food_cd: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub food_name: String,
    #[serde(default)]
    pub research_year: Option<String>,
    #[serde(default)]
    pub maker_name: Option<String>,
    #[serde(default)]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub serving_size: Option<f64>,
    #[serde(default)]
    pub calorie: Option<f64>,
    #[serde(default)]
    pub carbohydrate: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    /// Fat in grams, under the backend's column name.
    #[serde(default)]
    pub province: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub sugars: Option<f64>,
    /// Sodium in mg.
    #[serde(default)]
    pub salt: Option<f64>,
    #[serde(default)]
    pub cholesterol: Option<f64>,
    #[serde(default)]
    pub saturated_fatty_acids: Option<f64>,
    #[serde(default)]
    pub trans_fat: Option<f64>,
}

impl FoodDetail {
    /// Fat in grams. `province` wins when a body carries both keys.
    pub fn fat_grams(&self) -> Option<f64> {
        self.province.or(self.fat)
    }
}

/// Body of the listing endpoint: one page of items plus the unpaged total.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FoodPage {
    pub total: u64,
    #[serde(default)]
    pub items: Vec<FoodSummary>,
}
