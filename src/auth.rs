//! HTTP Basic authentication
//!
//! Credentials are fixed for the process lifetime and compared verbatim.

use base64::{engine::general_purpose, Engine as _};
use hyper::header::HeaderValue;

use crate::config::AuthConfig;

/// Fixed username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(auth.username.clone(), auth.password.clone())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Check an `Authorization` header against these credentials.
    ///
    /// Any malformed header counts as a failed login.
    pub fn verify(&self, header: Option<&HeaderValue>) -> bool {
        header
            .and_then(|v| v.to_str().ok())
            .and_then(decode_basic)
            .is_some_and(|(user, pass)| user == self.username && pass == self.password)
    }
}

/// Decode `Basic <base64(user:pass)>` into its two parts
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Encode a credential pair as an `Authorization` header value
#[cfg(test)]
pub fn basic_header(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{username}:{password}"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("wedding", "photo123")
    }

    fn header(s: &str) -> HeaderValue {
        HeaderValue::from_str(s).unwrap()
    }

    #[test]
    fn test_valid_credentials() {
        let h = header(&basic_header("wedding", "photo123"));
        assert!(creds().verify(Some(&h)));
    }

    #[test]
    fn test_missing_header() {
        assert!(!creds().verify(None));
    }

    #[test]
    fn test_wrong_password_and_case() {
        assert!(!creds().verify(Some(&header(&basic_header("wedding", "wrong")))));
        assert!(!creds().verify(Some(&header(&basic_header("Wedding", "photo123")))));
    }

    #[test]
    fn test_malformed_headers() {
        // Wrong scheme
        assert!(!creds().verify(Some(&header("Bearer d2VkZGluZzpwaG90bzEyMw=="))));
        // Not base64
        assert!(!creds().verify(Some(&header("Basic !!!not-base64!!!"))));
        // No colon separator
        let no_colon = format!("Basic {}", general_purpose::STANDARD.encode("weddingphoto123"));
        assert!(!creds().verify(Some(&header(&no_colon))));
        // Invalid UTF-8 after decoding
        let bad_utf8 = format!("Basic {}", general_purpose::STANDARD.encode([0xff, 0xfe, b':']));
        assert!(!creds().verify(Some(&header(&bad_utf8))));
    }

    #[test]
    fn test_password_may_contain_colon() {
        let c = Credentials::new("user", "pa:ss");
        assert!(c.verify(Some(&header(&basic_header("user", "pa:ss")))));
    }
}
