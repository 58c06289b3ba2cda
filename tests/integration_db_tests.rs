#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lightbnb::errors::DbError;
    use lightbnb::models::{CreateProperty, CreateUser};
    use lightbnb::test_utils::TestContext;

    fn unique_suffix() -> String {
        let test_id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
            .to_string();
        test_id[test_id.len().saturating_sub(10)..].to_string()
    }

    fn create_test_user_data() -> CreateUser {
        let suffix = unique_suffix();
        CreateUser {
            name: format!("Test User {}", suffix),
            email: format!("test_{}@example.com", suffix),
            password: "password123".to_string(),
        }
    }

    fn minimal_property(owner_id: i64, title: &str) -> CreateProperty {
        CreateProperty {
            owner_id,
            title: title.to_string(),
            description: None,
            thumbnail_photo_url: None,
            cover_photo_url: None,
            cost_per_night: 80,
            street: None,
            city: Some("Vancouver".to_string()),
            province: None,
            post_code: None,
            country: None,
            parking_spaces: None,
            number_of_bathrooms: None,
            number_of_bedrooms: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_round_trips_through_email_lookup() {
        let ctx = TestContext::new().await;
        let user_data = create_test_user_data();

        let created = ctx.db.create_user(user_data).await.unwrap();
        assert!(created.id > 0);

        let fetched = ctx
            .db
            .get_user_by_email(&created.email)
            .await
            .unwrap()
            .expect("user should exist after insert");

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_user_by_id_matches_email_lookup() {
        let ctx = TestContext::new().await;
        let created = ctx.db.create_user(create_test_user_data()).await.unwrap();

        let by_id = ctx
            .db
            .get_user_by_id(created.id)
            .await
            .unwrap()
            .expect("user should be found by id");

        assert_eq!(by_id.email, created.email);
        assert_eq!(by_id.name, created.name);
    }

    #[tokio::test]
    async fn test_missing_email_returns_none() {
        let ctx = TestContext::new().await;

        let result = ctx
            .db
            .get_user_by_email("nobody@example.com")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_distinct_error() {
        let ctx = TestContext::new().await;
        let user_data = create_test_user_data();
        let email = user_data.email.clone();

        ctx.db.create_user(user_data).await.unwrap();

        let second = CreateUser {
            name: "Someone Else".to_string(),
            email: email.clone(),
            password: "other-password".to_string(),
        };
        let err = ctx.db.create_user(second).await.unwrap_err();

        match err {
            DbError::DuplicateEmail { email: reported } => assert_eq!(reported, email),
            other => panic!("expected DuplicateEmail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_empty_email() {
        let ctx = TestContext::new().await;

        let err = ctx
            .db
            .create_user(CreateUser {
                name: "No Email".to_string(),
                email: "  ".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation { field: "email", .. }));
    }

    #[tokio::test]
    async fn test_reservations_never_exceed_limit() {
        let ctx = TestContext::new().await;
        let owner = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let guest = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let property = ctx
            .db
            .create_property(minimal_property(owner.id, "Limit Test Loft"))
            .await
            .unwrap();

        for day in 1..=5 {
            ctx.seed_reservation(
                guest.id,
                property.id,
                NaiveDate::from_ymd_opt(2026, 9, day).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, day + 1).unwrap(),
            )
            .await;
        }

        let capped = ctx
            .db
            .get_reservations_for_guest(guest.id, Some(3))
            .await
            .unwrap();
        assert_eq!(capped.len(), 3);

        let defaulted = ctx
            .db
            .get_reservations_for_guest(guest.id, None)
            .await
            .unwrap();
        assert_eq!(defaulted.len(), 5);
    }

    #[tokio::test]
    async fn test_reservations_carry_joined_property_columns() {
        let ctx = TestContext::new().await;
        let owner = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let guest = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let property = ctx
            .db
            .create_property(minimal_property(owner.id, "Joined Columns Cabin"))
            .await
            .unwrap();

        let reservation_id = ctx
            .seed_reservation(
                guest.id,
                property.id,
                NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 10, 8).unwrap(),
            )
            .await;

        let reservations = ctx
            .db
            .get_reservations_for_guest(guest.id, None)
            .await
            .unwrap();

        assert_eq!(reservations.len(), 1);
        let reservation = &reservations[0];
        assert_eq!(reservation.id, reservation_id);
        assert_eq!(reservation.guest_id, guest.id);
        assert_eq!(reservation.property.id, property.id);
        assert_eq!(reservation.property.title, "Joined Columns Cabin");
        assert_eq!(reservation.property.cost_per_night, property.cost_per_night);
    }

    #[tokio::test]
    async fn test_pool_health_reflects_pool_state() {
        let ctx = TestContext::new().await;

        assert!(ctx.db.check_pool_health().await);
        let health = ctx.db.get_pool_health();
        assert!(!health.is_closed);
        assert!(health.size >= 1);

        // A second handle built through Config shares nothing with the first.
        let config = lightbnb::Config {
            database_url: ctx.database_url.clone(),
            max_connections: 2,
            min_connections: 1,
        };
        let db = lightbnb::Database::from_config(&config).await.unwrap();
        assert!(db.check_pool_health().await);
        db.close().await;
        assert!(db.get_pool_health().is_closed);

        // The context's own pool is unaffected.
        assert!(ctx.db.check_pool_health().await);
    }

    #[tokio::test]
    async fn test_reservations_for_other_guests_are_excluded() {
        let ctx = TestContext::new().await;
        let owner = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let guest = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let other_guest = ctx.db.create_user(create_test_user_data()).await.unwrap();
        let property = ctx
            .db
            .create_property(minimal_property(owner.id, "Exclusive Suite"))
            .await
            .unwrap();

        ctx.seed_reservation(
            other_guest.id,
            property.id,
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
        )
        .await;

        let reservations = ctx
            .db
            .get_reservations_for_guest(guest.id, None)
            .await
            .unwrap();

        assert!(reservations.is_empty());
    }
}
