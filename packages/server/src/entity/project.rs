use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::category::Category;

/// A portfolio project. The slug is the public identifier; the gallery column
/// holds the ordered list of public image URLs as a JSON array.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: Category,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub area_sqm: Option<i32>,
    pub client_name: Option<String>,
    pub summary: Option<String>,
    pub story: Option<String>,
    pub scope: Option<String>,
    pub materials: Option<String>,
    pub cover_image_url: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub gallery: serde_json::Value,
    pub is_featured: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

pub fn gallery_to_json(urls: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        urls.iter()
            .map(|url| serde_json::Value::String(url.clone()))
            .collect(),
    )
}

/// Reads gallery URLs back out of the JSON column. Non-string entries are
/// skipped rather than treated as corruption.
pub fn gallery_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
