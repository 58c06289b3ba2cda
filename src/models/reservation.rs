use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Property;

/// A reservation row joined with the property it books.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestReservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_id: i64,
    pub property: Property,
}
