// Query string helpers
// `application/x-www-form-urlencoded` lookup of a single parameter

use url::form_urlencoded;

/// Return the decoded value of the first `name` parameter in `query`.
///
/// `+` decodes to a space and malformed escapes are kept literally. Bytes that
/// are not UTF-8 become U+FFFD, which no valid word contains.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
