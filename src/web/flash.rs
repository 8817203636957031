//! One-shot status messages carried across a redirect in cookies.
//!
//! The text is hex encoded so it survives the cookie value grammar
//! (spaces, commas and non-ASCII brewer names).

use axum::http::{HeaderMap, HeaderName, header::SET_COOKIE};

use crate::web::cookies;

const MESSAGE_COOKIE: &str = "flash_message";
const ERROR_COOKIE: &str = "flash_error";

/// Messages read from the request, shown once on the index screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            message: decode(cookies::read(headers, MESSAGE_COOKIE)),
            error: decode(cookies::read(headers, ERROR_COOKIE)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.error.is_none()
    }

    /// `Set-Cookie` headers removing whatever was read.
    pub fn clear_headers(&self) -> Vec<(HeaderName, String)> {
        let mut headers = Vec::new();
        if self.message.is_some() {
            headers.push((SET_COOKIE, cookies::clear(MESSAGE_COOKIE)));
        }
        if self.error.is_some() {
            headers.push((SET_COOKIE, cookies::clear(ERROR_COOKIE)));
        }
        headers
    }
}

fn decode(raw: Option<String>) -> Option<String> {
    let bytes = hex::decode(raw?).ok()?;
    String::from_utf8(bytes).ok().filter(|s| !s.is_empty())
}

/// Success message for the next page.
pub fn message(text: &str) -> (HeaderName, String) {
    (SET_COOKIE, cookies::set(MESSAGE_COOKIE, &hex::encode(text), false))
}

/// Error message for the next page.
pub fn error(text: &str) -> (HeaderName, String) {
    (SET_COOKIE, cookies::set(ERROR_COOKIE, &hex::encode(text), false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};

    fn request_with(set_cookie: &str) -> HeaderMap {
        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
        headers
    }

    #[test]
    fn test_message_survives_cookie_round_trip() {
        let (_, cookie) = message("You successfully updated brewer Brouwerij Het Anker, Mechelen.");
        let flash = Flash::from_headers(&request_with(&cookie));

        assert_eq!(
            flash.message.as_deref(),
            Some("You successfully updated brewer Brouwerij Het Anker, Mechelen.")
        );
        assert!(flash.error.is_none());
        assert_eq!(flash.clear_headers().len(), 1);
    }

    #[test]
    fn test_garbage_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("flash_error=not-hex"));

        let flash = Flash::from_headers(&headers);

        assert!(flash.is_empty());
        assert!(flash.clear_headers().is_empty());
    }
}
