#[cfg(test)]
mod tests {
    use crate::flash::{FlashJar, FlashKind, FlashMessage, FLASH_COOKIE};
    use axum::{
        http::{header::COOKIE, header::SET_COOKIE, HeaderMap, HeaderValue},
        response::{IntoResponse, Redirect},
    };
    use cookie::Cookie;

    fn set_cookie_of(jar: FlashJar) -> Option<String> {
        let response = (jar, Redirect::to("/listings")).into_response();
        response
            .headers()
            .get(SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    fn request_headers(set_cookie: &str) -> HeaderMap {
        // Echo the name=value pair back the way a browser would
        let cookie = Cookie::parse_encoded(set_cookie.to_string()).unwrap();
        let mut headers = HeaderMap::new();
        let pair = format!("theme=dark; {}", Cookie::new(FLASH_COOKIE, cookie.value().to_string()).encoded());
        headers.insert(COOKIE, HeaderValue::from_str(&pair).unwrap());
        headers
    }

    #[test]
    fn test_untouched_jar_sets_no_cookie() {
        assert!(set_cookie_of(FlashJar::default()).is_none());

        let mut empty = FlashJar::default();
        assert!(empty.take().is_empty());
        assert!(set_cookie_of(empty).is_none());
    }

    #[test]
    fn test_queued_message_survives_redirect() {
        let header = set_cookie_of(FlashJar::default().error("Cannot find that Listing!")).unwrap();
        assert!(header.starts_with(FLASH_COOKIE));
        assert!(header.contains("HttpOnly"));

        let mut next = FlashJar::from_headers(&request_headers(&header));
        let messages = next.take();
        assert_eq!(messages, vec![FlashMessage::error("Cannot find that Listing!")]);

        // Reading a second time yields nothing
        assert!(next.take().is_empty());
    }

    #[test]
    fn test_consumed_messages_clear_the_cookie() {
        let header = set_cookie_of(FlashJar::default().success("Saved")).unwrap();
        let mut next = FlashJar::from_headers(&request_headers(&header));
        assert_eq!(next.take()[0].kind, FlashKind::Success);

        let cleared = set_cookie_of(next).unwrap();
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn test_unread_messages_are_carried_forward() {
        let header = set_cookie_of(FlashJar::default().success("first")).unwrap();
        let next = FlashJar::from_headers(&request_headers(&header)).error("second");
        assert_eq!(next.queued().len(), 1);

        let carried = set_cookie_of(next).unwrap();
        let mut after = FlashJar::from_headers(&request_headers(&carried));
        let messages = after.take();
        assert_eq!(
            messages,
            vec![FlashMessage::success("first"), FlashMessage::error("second")]
        );
    }

    #[test]
    fn test_malformed_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("roost_flash=not-json"),
        );
        let mut jar = FlashJar::from_headers(&headers);
        assert!(jar.take().is_empty());
    }
}
