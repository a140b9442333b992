#[cfg(test)]
mod tests {
    use crate::client::{sqlite_file_path, DbClient};
    use crate::error::DbError;
    use roost_config::{AppConfig, DatabaseConfig};
    use std::sync::Arc;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite://data/roost.db"), Some("data/roost.db"));
        assert_eq!(sqlite_file_path("sqlite:roost.db?mode=rwc"), Some("roost.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/roost"), None);
    }

    #[tokio::test]
    async fn test_missing_database_section() {
        let config = Arc::new(AppConfig::default());
        let result = DbClient::new(&config).await;
        assert!(matches!(result, Err(DbError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        assert!(matches!(
            DbClient::from_url("").await,
            Err(DbError::UrlError(_))
        ));
        let config = DatabaseConfig {
            url: String::new(),
            max_connections: None,
        };
        assert!(matches!(
            DbClient::from_config(&config).await,
            Err(DbError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_client_is_healthy() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        };
        let client = DbClient::from_config(&config).await.unwrap();
        assert!(client.is_healthy().await);
        assert!(client.execute("CREATE TABLE t (x INTEGER)").await.is_ok());
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = std::env::temp_dir().join(format!("roost-db-{}", std::process::id()));
        let path = dir.join("nested").join("roost.db");
        let url = format!("sqlite://{}", path.display());

        let client = DbClient::from_url(&url).await.unwrap();
        assert!(client.is_healthy().await);
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
