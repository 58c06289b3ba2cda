use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};

use super::{effective_limit, Database};
use crate::errors::DbError;
use crate::models::{CreateProperty, Property, PropertySearch, PropertyWithRating};

pub(crate) const PROPERTY_COLUMNS: &str = "properties.id, properties.owner_id, properties.title, \
     properties.description, properties.thumbnail_photo_url, properties.cover_photo_url, \
     properties.cost_per_night, properties.street, properties.city, properties.province, \
     properties.post_code, properties.country, properties.parking_spaces, \
     properties.number_of_bathrooms, properties.number_of_bedrooms";

const CENTS_PER_UNIT: i64 = 100;

pub(crate) fn property_from_row(row: &PgRow) -> Property {
    Property {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        description: row.get("description"),
        thumbnail_photo_url: row.get("thumbnail_photo_url"),
        cover_photo_url: row.get("cover_photo_url"),
        cost_per_night: row.get("cost_per_night"),
        street: row.get("street"),
        city: row.get("city"),
        province: row.get("province"),
        post_code: row.get("post_code"),
        country: row.get("country"),
        parking_spaces: row.get("parking_spaces"),
        number_of_bathrooms: row.get("number_of_bathrooms"),
        number_of_bedrooms: row.get("number_of_bedrooms"),
    }
}

/// Assemble the search statement. Every present filter appends its own
/// ` AND <predicate>` against the `WHERE 1=1` anchor, so any combination
/// of filters (including none) yields well-formed SQL.
fn search_query(filters: &PropertySearch, limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("SELECT ");
    query.push(PROPERTY_COLUMNS);
    query.push(", AVG(property_reviews.rating)::DOUBLE PRECISION AS average_rating");
    query.push(
        " FROM properties JOIN property_reviews ON properties.id = property_reviews.property_id",
    );
    query.push(" WHERE 1=1");

    if let Some(city) = &filters.city {
        query.push(" AND properties.city LIKE ");
        query.push_bind(format!("%{}%", city));
    }

    if let Some(owner_id) = filters.owner_id {
        query.push(" AND properties.owner_id = ");
        query.push_bind(owner_id);
    }

    if let Some(minimum) = filters.minimum_price_per_night {
        query.push(" AND properties.cost_per_night >= ");
        query.push_bind(minimum * CENTS_PER_UNIT);
    }

    if let Some(maximum) = filters.maximum_price_per_night {
        query.push(" AND properties.cost_per_night <= ");
        query.push_bind(maximum * CENTS_PER_UNIT);
    }

    // Filters review rows before aggregation, so the reported average is
    // computed over the ratings that passed the threshold.
    if let Some(rating) = filters.minimum_rating {
        query.push(" AND property_reviews.rating >= ");
        query.push_bind(rating);
    }

    query.push(" GROUP BY properties.id ORDER BY properties.cost_per_night LIMIT ");
    query.push_bind(limit);
    query
}

impl Database {
    pub async fn search_properties(
        &self,
        filters: &PropertySearch,
        limit: Option<i64>,
    ) -> Result<Vec<PropertyWithRating>, DbError> {
        let limit = effective_limit(limit)?;

        tracing::debug!(?filters, limit, "searching properties");

        let mut query = search_query(filters, limit);
        let rows = query.build().fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| PropertyWithRating {
                property: property_from_row(row),
                average_rating: row.get("average_rating"),
            })
            .collect())
    }

    pub async fn create_property(&self, input: CreateProperty) -> Result<Property, DbError> {
        if input.title.trim().is_empty() {
            return Err(DbError::validation("title", "must not be empty"));
        }
        if input.cost_per_night <= 0 {
            return Err(DbError::validation("cost_per_night", "must be positive"));
        }

        // One statement names all fourteen columns and binds one value per
        // column; absent optional fields land as NULL instead of shifting
        // later values into the wrong columns.
        let row = sqlx::query(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, street, city, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                      cost_per_night, street, city, province, post_code, country,
                      parking_spaces, number_of_bathrooms, number_of_bedrooms
            "#,
        )
        .bind(input.owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.thumbnail_photo_url)
        .bind(&input.cover_photo_url)
        .bind(input.cost_per_night * CENTS_PER_UNIT)
        .bind(&input.street)
        .bind(&input.city)
        .bind(&input.province)
        .bind(&input.post_code)
        .bind(&input.country)
        .bind(input.parking_spaces)
        .bind(input.number_of_bathrooms)
        .bind(input.number_of_bedrooms)
        .fetch_one(&self.pool)
        .await?;

        Ok(property_from_row(&row))
    }
}
