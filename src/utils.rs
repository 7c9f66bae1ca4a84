// src/utils.rs
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is by form encoding (`-`, `_`, `.`, `~` and alphanumerics)
pub const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Form encoding that keeps the `List(...)` query syntax readable for the search endpoint
pub const QUERY_ENCODE_SET: &AsciiSet = &FORM_ENCODE_SET
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b':');

/// Last colon-delimited segment of a URN (`urn:li:fsd_jobPosting:42` -> `42`)
pub fn urn_id(urn: &str) -> &str {
    urn.rsplit(':').next().unwrap_or(urn)
}

/// Build the job posting URN the apply endpoints expect
pub fn job_posting_urn(job_id: &str) -> String {
    format!("urn:li:fsd_jobPosting:{}", job_id)
}

/// Form-encode a single value, spaces become `+`
pub fn form_encode(value: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(value, set)
        .to_string()
        .replace("%20", "+")
}

/// Encode ordered key/value pairs as a query string
pub fn encode_query(params: &[(&str, String)], set: &'static AsciiSet) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key, set), form_encode(value, set)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Serialize cookies the way a browser sends them
pub fn cookie_header(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// CSRF token derived from the `JSESSIONID` cookie, quotes stripped
pub fn csrf_token(cookies: &[(String, String)]) -> Option<String> {
    cookies
        .iter()
        .find(|(name, _)| name == "JSESSIONID")
        .map(|(_, value)| value.replace('"', ""))
}

/// Insert or replace a header, matching names case-insensitively
pub fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: impl Into<String>) {
    let value = value.into();
    match headers
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
    {
        Some(entry) => entry.1 = value,
        None => headers.push((name.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_urn_id() {
        assert_eq!(urn_id("urn:li:fsd_jobPosting:987654"), "987654");
        assert_eq!(urn_id("urn:li:jobPosting:1:2"), "2");
        assert_eq!(urn_id("plain"), "plain");
        assert_eq!(urn_id("trailing:"), "");
    }

    #[test]
    fn test_encode_query_keeps_list_syntax() {
        let params = [
            ("query", "(keywords:Rust Developer,x:List(a,b))".to_string()),
            ("start", "10".to_string()),
        ];
        assert_eq!(
            encode_query(&params, QUERY_ENCODE_SET),
            "query=(keywords:Rust+Developer,x:List(a,b))&start=10"
        );
    }

    #[test]
    fn test_form_encode_escapes_colons() {
        assert_eq!(
            form_encode("urn:li:fsd_jobPosting:1", FORM_ENCODE_SET),
            "urn%3Ali%3Afsd_jobPosting%3A1"
        );
        assert_eq!(form_encode("a&b=c/d", FORM_ENCODE_SET), "a%26b%3Dc%2Fd");
    }

    #[test]
    fn test_cookie_header_and_csrf() {
        let cookies = pairs(&[("li_at", "abc"), ("JSESSIONID", "\"ajax:123\"")]);
        assert_eq!(cookie_header(&cookies), "li_at=abc; JSESSIONID=\"ajax:123\"");
        assert_eq!(csrf_token(&cookies), Some("ajax:123".to_string()));
        assert_eq!(csrf_token(&pairs(&[("li_at", "abc")])), None);
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut headers = pairs(&[("accept", "*/*"), ("x-li-lang", "en_US")]);
        set_header(&mut headers, "Accept", "application/json");
        set_header(&mut headers, "Connection", "keep-alive");

        assert_eq!(
            headers,
            pairs(&[
                ("accept", "application/json"),
                ("x-li-lang", "en_US"),
                ("Connection", "keep-alive"),
            ])
        );
    }
}
