use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: Option<String>,
    pub cover_photo_url: Option<String>,
    /// Stored in minor currency units (cents).
    pub cost_per_night: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub post_code: Option<String>,
    pub country: Option<String>,
    pub parking_spaces: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub number_of_bedrooms: Option<i32>,
}

/// A search hit: the property row plus its aggregate review rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyWithRating {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// Input for inserting a property. `cost_per_night` is in major currency
/// units (dollars) and is converted to cents before it is bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: Option<String>,
    pub cover_photo_url: Option<String>,
    pub cost_per_night: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub post_code: Option<String>,
    pub country: Option<String>,
    pub parking_spaces: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub number_of_bedrooms: Option<i32>,
}

/// Optional search filters. Absent fields contribute no predicate; price
/// bounds are in major currency units and converted to cents before binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub owner_id: Option<i64>,
    pub minimum_price_per_night: Option<i64>,
    pub maximum_price_per_night: Option<i64>,
    pub minimum_rating: Option<i32>,
}
