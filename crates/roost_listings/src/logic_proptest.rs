#[cfg(test)]
mod tests {
    use crate::logic::thumbnail_url;
    use proptest::prelude::*;
    use roost_config::ListingsConfig;

    proptest! {
        #[test]
        fn thumbnail_splices_transformation(prefix in "[a-z:/.]{0,20}", rest in "[a-z0-9/._-]{0,20}") {
            let config = ListingsConfig::default();
            let url = format!("{}/upload/{}", prefix, rest);
            prop_assume!(url.find("/upload/") == Some(prefix.len()));
            let thumb = thumbnail_url(&url, &config);
            prop_assert_eq!(thumb, format!("{}/upload/h_300,w_250/{}", prefix, rest));
        }

        #[test]
        fn thumbnail_leaves_other_urls_alone(url in "[a-z0-9:._-]{0,40}") {
            let config = ListingsConfig::default();
            prop_assert_eq!(thumbnail_url(&url, &config), url);
        }
    }
}
