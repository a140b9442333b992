#[cfg(test)]
mod tests {
    use crate::error::ListingError;
    use crate::forms::{filename_from_url, ImageSource, ListingForm};
    use roost_common::models::ListingImage;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_form() -> ListingForm {
        ListingForm::from_fields(pairs(&[
            ("listing[title]", " Loft "),
            ("listing[description]", "Bright and airy"),
            ("listing[price]", "120.5"),
            ("listing[location]", "Paris"),
            ("listing[country]", "France"),
        ]))
        .unwrap()
    }

    fn uploaded() -> ListingImage {
        ListingImage {
            url: "http://x/a.jpg".to_string(),
            filename: "a.jpg".to_string(),
        }
    }

    #[test]
    fn test_fields_are_unwrapped_and_trimmed() {
        let form = full_form();
        assert_eq!(form.title.as_deref(), Some("Loft"));
        assert_eq!(form.price, Some(120.5));
        assert_eq!(form.image, None);

        let bare = ListingForm::from_fields(pairs(&[("title", "Cabin"), ("_method", "PUT")])).unwrap();
        assert_eq!(bare.title.as_deref(), Some("Cabin"));
    }

    #[test]
    fn test_blank_image_is_absent() {
        let form = ListingForm::from_fields(pairs(&[("listing[image]", "   ")])).unwrap();
        assert_eq!(form.image, None);
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let result = ListingForm::from_fields(pairs(&[("listing[price]", "cheap")]));
        assert!(matches!(result, Err(ListingError::InvalidPrice(_))));

        let result = ListingForm::from_fields(pairs(&[("listing[price]", "inf")]));
        assert!(matches!(result, Err(ListingError::InvalidPrice(_))));
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let mut form = full_form();
        form.price = Some(-1.0);
        assert!(matches!(
            form.validate_for_create(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_create_requires_core_fields() {
        let form = ListingForm::from_fields(pairs(&[
            ("listing[title]", "Loft"),
            ("listing[location]", "Paris"),
            ("listing[country]", "France"),
        ]))
        .unwrap();
        assert!(matches!(
            form.validate_for_create(),
            Err(ListingError::MissingField("price"))
        ));

        let mut form = full_form();
        form.title = Some(String::new());
        assert!(matches!(
            form.validate_for_create(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_new_listing_without_any_image_leaves_it_unset() {
        let listing = full_form().into_new_listing("u1".to_string(), None).unwrap();
        assert_eq!(listing.image, None);
        assert_eq!(listing.owner_id, "u1");
        assert_eq!(listing.description, "Bright and airy");
    }

    #[test]
    fn test_upload_beats_linked_url() {
        let mut form = full_form();
        form.image = Some("http://elsewhere/b.png".to_string());
        let listing = form.into_new_listing("u1".to_string(), Some(uploaded())).unwrap();
        assert_eq!(listing.image, Some(uploaded()));
    }

    #[test]
    fn test_linked_url_becomes_image() {
        let source = ImageSource::resolve(None, Some("https://cdn.test/p/room.png?w=10".to_string()));
        let image = source.into_image().unwrap();
        assert_eq!(image.url, "https://cdn.test/p/room.png?w=10");
        assert_eq!(image.filename, "room.png");

        assert_eq!(ImageSource::resolve(None, None), ImageSource::Unset);
    }

    #[test]
    fn test_patch_keeps_only_submitted_fields() {
        let form = ListingForm::from_fields(pairs(&[("listing[price]", "99")])).unwrap();
        let patch = form.into_patch(None);
        assert_eq!(patch.price, Some(99.0));
        assert_eq!(patch.title, None);
        assert_eq!(patch.image, None);

        let patch = ListingForm::default().into_patch(Some(uploaded()));
        assert_eq!(patch.image, Some(uploaded()));
    }

    #[test]
    fn test_update_rejects_blank_required_field() {
        let form = ListingForm::from_fields(pairs(&[("listing[location]", "  ")])).unwrap();
        assert!(form.validate_for_update().is_err());
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(filename_from_url("http://x/a.jpg"), "a.jpg");
        assert_eq!(filename_from_url("http://x/dir/"), "dir");
        assert_eq!(filename_from_url("plain"), "plain");
    }
}
