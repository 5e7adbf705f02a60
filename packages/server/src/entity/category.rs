use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Business line a project belongs to. Stored as a plain string column so the
/// set can grow without a database migration.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    sea_orm::DeriveActiveEnum,
    sea_orm::EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[sea_orm(string_value = "real_estate")]
    RealEstate,
    #[sea_orm(string_value = "architecture")]
    Architecture,
    #[sea_orm(string_value = "interior_contracting")]
    InteriorContracting,
    #[sea_orm(string_value = "renovation")]
    Renovation,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::RealEstate,
        Category::Architecture,
        Category::InteriorContracting,
        Category::Renovation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RealEstate => "real_estate",
            Category::Architecture => "architecture",
            Category::InteriorContracting => "interior_contracting",
            Category::Renovation => "renovation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::RealEstate
    }
}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real_estate" => Ok(Category::RealEstate),
            "architecture" => Ok(Category::Architecture),
            "interior_contracting" => Ok(Category::InteriorContracting),
            "renovation" => Ok(Category::Renovation),
            _ => Err(ParseCategoryError {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    pub value: String,
}

impl std::fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown project category: {}", self.value)
    }
}

impl std::error::Error for ParseCategoryError {}
