//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Display badge tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Badge {
    Popular,
    #[serde(rename = "Top Rated")]
    TopRated,
    Average,
    Luxury,
    Affordable,
    Standard,
}

impl Default for Badge {
    fn default() -> Self {
        Self::Popular
    }
}

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    /// Stock count. Never negative: decrements go through a conditional update.
    pub quantity: i32,
    /// Owning seller ("seller:xyz")
    pub seller_id: String,
    #[serde(default)]
    pub badge: Badge,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub quantity: i32,
    pub seller_id: String,
    pub badge: Option<Badge>,
}

/// Partial update — absent fields are left untouched by the MERGE
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}
