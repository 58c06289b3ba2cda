use sqlx::Row;

use super::properties::{property_from_row, PROPERTY_COLUMNS};
use super::{effective_limit, Database};
use crate::errors::DbError;
use crate::models::GuestReservation;

impl Database {
    /// Reservations booked by a guest, each joined with the property it
    /// books. Returns at most `limit` rows (default 10), in store order.
    pub async fn get_reservations_for_guest(
        &self,
        guest_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<GuestReservation>, DbError> {
        let limit = effective_limit(limit)?;

        let sql = format!(
            "SELECT reservations.id AS reservation_id, reservations.start_date, \
             reservations.end_date, reservations.guest_id, {PROPERTY_COLUMNS} \
             FROM reservations \
             JOIN properties ON reservations.property_id = properties.id \
             WHERE reservations.guest_id = $1 \
             LIMIT $2"
        );

        let rows = sqlx::query(&sql)
            .bind(guest_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| GuestReservation {
                id: row.get("reservation_id"),
                start_date: row.get("start_date"),
                end_date: row.get("end_date"),
                guest_id: row.get("guest_id"),
                property: property_from_row(row),
            })
            .collect())
    }
}
