#[cfg(test)]
mod tests {
    use crate::repositories::listing::{ListingImage, ListingRepository, Review, User};
    use crate::{DbClient, ListingRepositoryFactory, RepositoryFactory, SqlListingRepository};
    use chrono::{TimeZone, Utc};
    use roost_common::models::{ListingPatch, NewListing};
    use roost_config::{DatabaseConfig, ListingsConfig};

    async fn repository() -> SqlListingRepository {
        // One connection, otherwise every pooled connection gets its own empty database
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        };
        let client = DbClient::from_config(&config).await.unwrap();
        let repo = ListingRepositoryFactory::new(&ListingsConfig::default()).create_repository(client);
        repo.init_schema().await.unwrap();
        repo
    }

    fn new_listing(title: &str, location: &str, country: &str) -> NewListing {
        NewListing {
            title: title.to_string(),
            description: format!("{} description", title),
            image: None,
            price: 100.0,
            location: location.to_string(),
            country: country.to_string(),
            owner_id: "owner-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let repo = repository().await;
        repo.init_schema().await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_applies_default_image_and_keeps_order() {
        let repo = repository().await;
        let first = repo.create(new_listing("Loft", "Paris, France", "France")).await.unwrap();
        let second = repo.create(new_listing("Cabin", "Banff", "Canada")).await.unwrap();

        let defaults = ListingsConfig::default();
        assert_eq!(first.image.url, defaults.default_image_url);
        assert_eq!(first.image.filename, defaults.default_image_filename);

        let all = repo.find_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
        assert_eq!(all[0], first);
    }

    #[tokio::test]
    async fn test_search_matches_location_or_country_ignoring_case() {
        let repo = repository().await;
        let paris = repo.create(new_listing("Loft", "Paris, France", "FR")).await.unwrap();
        let lyon = repo.create(new_listing("Flat", "Lyon", "france")).await.unwrap();
        repo.create(new_listing("Capsule", "Tokyo", "Japan")).await.unwrap();

        let hits = repo.search_by_place("FRANCE").await.unwrap();
        let ids: Vec<_> = hits.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec![paris.id, lyon.id]);

        assert!(repo.search_by_place("Berlin").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let repo = repository().await;
        let idf = repo
            .create(new_listing("Atelier", "Île-de-France", "France"))
            .await
            .unwrap();
        let vienna = repo.create(new_listing("Flat", "Wien", "ÖSTERREICH")).await.unwrap();

        let hits = repo.search_by_place("île").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, idf.id);

        let hits = repo.search_by_place("österreich").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, vienna.id);
    }

    #[tokio::test]
    async fn test_search_follows_updated_location() {
        let repo = repository().await;
        let created = repo.create(new_listing("Loft", "Paris", "France")).await.unwrap();
        repo.update(
            &created.id,
            ListingPatch {
                location: Some("Évian".to_string()),
                ..ListingPatch::default()
            },
        )
        .await
        .unwrap();

        assert!(repo.search_by_place("paris").await.unwrap().is_empty());
        assert_eq!(repo.search_by_place("ÉVIAN").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_user_records_once() {
        let repo = repository().await;
        let bare = repo.ensure_user("user-42").await.unwrap();
        assert_eq!(bare.username, "user-42");
        assert_eq!(bare.email, "");

        repo.insert_user(&User {
            id: "user-42".to_string(),
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
        })
        .await
        .unwrap();
        let kept = repo.ensure_user("user-42").await.unwrap();
        assert_eq!(kept.username, "ann");
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = repository().await;
        repo.create(new_listing("Loft", "Paris", "France")).await.unwrap();
        let odd = repo.create(new_listing("Odd", "100%_Town", "Nowhere")).await.unwrap();

        let hits = repo.search_by_place("%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, odd.id);
        assert_eq!(repo.search_by_place("_").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_preserves_image() {
        let repo = repository().await;
        let mut input = new_listing("Loft", "Paris", "France");
        input.image = Some(ListingImage {
            url: "http://x/a.jpg".to_string(),
            filename: "a.jpg".to_string(),
        });
        let created = repo.create(input).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                ListingPatch {
                    title: Some("Renovated loft".to_string()),
                    price: Some(150.0),
                    ..ListingPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renovated loft");
        assert_eq!(updated.price, 150.0);
        assert_eq!(updated.image, created.image);
        assert_eq!(updated.owner_id, created.owner_id);
        assert_eq!(repo.find_by_id(&created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = repository().await;
        assert!(repo.update("missing", ListingPatch::default()).await.unwrap().is_none());
        assert!(repo.delete("missing").await.unwrap().is_none());
        assert!(repo.find_detail("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_store() {
        let repo = repository().await;
        let mut input = new_listing("Loft", "Paris", "France");
        input.price = -1.0;
        assert!(repo.create(input).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_listing() {
        let repo = repository().await;
        let created = repo.create(new_listing("Loft", "Paris", "France")).await.unwrap();

        let removed = repo.delete(&created.id).await.unwrap().unwrap();
        assert_eq!(removed.title, "Loft");
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
        assert!(repo.delete(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detail_resolves_owner_and_review_authors() {
        let repo = repository().await;
        let created = repo.create(new_listing("Loft", "Paris", "France")).await.unwrap();
        repo.insert_user(&User {
            id: "owner-1".to_string(),
            username: "olga".to_string(),
            email: "olga@example.com".to_string(),
        })
        .await
        .unwrap();
        repo.insert_user(&User {
            id: "guest-1".to_string(),
            username: "gus".to_string(),
            email: "gus@example.com".to_string(),
        })
        .await
        .unwrap();

        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        repo.insert_review(
            &created.id,
            &Review {
                id: "r1".to_string(),
                rating: 5,
                comment: "Lovely".to_string(),
                author_id: Some("guest-1".to_string()),
                created_at,
            },
        )
        .await
        .unwrap();
        repo.insert_review(
            &created.id,
            &Review {
                id: "r2".to_string(),
                rating: 3,
                comment: "Fine".to_string(),
                author_id: None,
                created_at,
            },
        )
        .await
        .unwrap();

        let detail = repo.find_detail(&created.id).await.unwrap().unwrap();
        assert_eq!(detail.listing, created);
        assert_eq!(detail.owner.unwrap().username, "olga");
        assert_eq!(detail.reviews.len(), 2);
        assert_eq!(detail.reviews[0].author.as_ref().unwrap().username, "gus");
        assert_eq!(detail.reviews[0].created_at, created_at);
        assert!(detail.reviews[1].author.is_none());
    }

    #[tokio::test]
    async fn test_detail_with_unknown_owner_and_author() {
        let repo = repository().await;
        let created = repo.create(new_listing("Loft", "Paris", "France")).await.unwrap();
        repo.insert_review(
            &created.id,
            &Review {
                id: "r1".to_string(),
                rating: 4,
                comment: "Nice".to_string(),
                author_id: Some("deleted-user".to_string()),
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();

        let detail = repo.find_detail(&created.id).await.unwrap().unwrap();
        assert!(detail.owner.is_none());
        assert_eq!(detail.reviews.len(), 1);
        assert!(detail.reviews[0].author.is_none());
    }
}
