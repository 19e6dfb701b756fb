//! Course catalog entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tute::TuteShipment;

/// A course offered in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Price in rupees
    #[serde(default)]
    pub price: f64,

    /// Main category id or name, as stored by the backend
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,

    /// Subcategory id or name
    #[serde(default, alias = "subCategory", alias = "subcategory")]
    pub subcategory_id: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Whether printed material is shipped with the course
    #[serde(default)]
    pub has_tute: bool,
}

/// Subcategory inside a main category (e.g. a subject)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

/// Main category (e.g. an exam year)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default, alias = "subCategories")]
    pub subcategories: Vec<Subcategory>,
}

/// A course the student is enrolled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course: Course,

    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,

    /// Shipment of the printed material, when the course has one
    #[serde(default)]
    pub tute: Option<TuteShipment>,
}
