#[cfg(test)]
mod tests {
    use crate::logic::{normalize_search, thumbnail_url};
    use roost_config::ListingsConfig;

    #[test]
    fn test_thumbnail_inserts_transformation() {
        let config = ListingsConfig::default();
        assert_eq!(
            thumbnail_url("https://res.cdn.net/demo/image/upload/v1/a.jpg", &config),
            "https://res.cdn.net/demo/image/upload/h_300,w_250/v1/a.jpg"
        );
    }

    #[test]
    fn test_thumbnail_only_rewrites_first_segment() {
        let config = ListingsConfig::default();
        assert_eq!(
            thumbnail_url("/upload/x/upload/a.jpg", &config),
            "/upload/h_300,w_250/x/upload/a.jpg"
        );
    }

    #[test]
    fn test_thumbnail_without_segment_is_unchanged() {
        let config = ListingsConfig::default();
        let url = "https://images.unsplash.com/photo-1?w=800";
        assert_eq!(thumbnail_url(url, &config), url);
        // "/uploads/" is a different segment
        assert_eq!(thumbnail_url("/uploads/a.jpg", &config), "/uploads/a.jpg");
    }

    #[test]
    fn test_thumbnail_uses_configured_transformation() {
        let config = ListingsConfig {
            thumbnail_transform: "c_fill,h_100".to_string(),
            ..ListingsConfig::default()
        };
        assert_eq!(
            thumbnail_url("/upload/a.jpg", &config),
            "/upload/c_fill,h_100/a.jpg"
        );
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("")), None);
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(Some("  Paris ")), Some("Paris".to_string()));
    }
}
