//! Hand-off of a solve result from the submission view to the results view
//! through the `data` query parameter.

use log::{debug, warn};
use lpform_model::SolveResult;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::SolveError;
use crate::response::{decode_response, encode_response};

pub const RESULTS_PATH: &str = "/results";
pub const DATA_PARAM: &str = "data";

/// Everything but the characters a URI component may carry unescaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// JSON-serialize `result` and percent-encode it for use as a query value
pub fn encode(result: &SolveResult) -> Result<String, SolveError> {
    let json = encode_response(result)?;
    Ok(utf8_percent_encode(&json, COMPONENT).to_string())
}

/// `/results?data=...` for `result`
pub fn results_url(result: &SolveResult) -> Result<String, SolveError> {
    Ok(format!("{}?{}={}", RESULTS_PATH, DATA_PARAM, encode(result)?))
}

/// Reverse of [`encode`]. Anything that does not decode to a result is logged
/// and reported as `None`.
pub fn decode(param: &str) -> Option<SolveResult> {
    if param.is_empty() {
        debug!("no result data to decode");
        return None;
    }
    if let Some(at) = malformed_escape(param) {
        warn!("result data has a malformed percent escape at byte {}", at);
        return None;
    }
    let text = match percent_decode_str(param).decode_utf8() {
        Ok(text) => text,
        Err(e) => {
            warn!("result data is not valid UTF-8: {}", e);
            return None;
        }
    };
    match decode_response(&text) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("could not parse result data: {}", e);
            None
        }
    }
}

/// Position of the first `%` not followed by two hex digits
fn malformed_escape(param: &str) -> Option<usize> {
    let bytes = param.as_bytes();
    bytes.iter().enumerate().position(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Find the `data` parameter in a URL or bare query string and decode it
pub fn decode_url(url: &str) -> Option<SolveResult> {
    let query = match url.split_once('?') {
        Some((_, query)) => query,
        None => url,
    };
    let query = query.split('#').next().unwrap_or_default();
    let param = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == DATA_PARAM)
        .map(|(_, value)| value);

    match param {
        Some(value) => decode(value),
        None => {
            debug!("no {} parameter in {:?}", DATA_PARAM, url);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use lpform_model::Iteration;

    fn sample() -> SolveResult {
        let mut optimal_solution = IndexMap::new();
        optimal_solution.insert("x1".to_string(), 10.0);
        optimal_solution.insert("x2".to_string(), 1.0 / 3.0);
        SolveResult {
            optimal_solution,
            optimal_value: Some(-10.333333333333334),
            iterations: vec![
                Iteration::new(vec![vec![-1.0, -1.0, 0.0, 0.0], vec![1.0, 1.0, 1.0, 10.0]]).unwrap(),
                Iteration::new(vec![vec![0.0, 0.0, 1.0, 10.0], vec![1.0, 1.0, 1.0, 10.0]]).unwrap(),
            ],
            status: Some("success".to_string()),
            message: Some("Solution trouvée & vérifiée".to_string()),
        }
    }

    #[test]
    fn test_round_trip() {
        let result = sample();
        let param = encode(&result).unwrap();
        assert!(!param.contains('{'));
        assert!(!param.contains('"'));
        assert!(!param.contains('&'));
        assert_eq!(decode(&param), Some(result));
    }

    #[test]
    fn test_encoding_matches_uri_component_rules() {
        let result = SolveResult {
            message: Some("a b(c)!*'~".to_string()),
            ..Default::default()
        };
        let param = encode(&result).unwrap();
        assert!(param.starts_with("%7B%22optimal_solution%22%3A%7B%7D"));
        assert!(param.contains("a%20b(c)!*'~"));
    }

    #[test]
    fn test_results_url_round_trip() {
        let result = sample();
        let url = results_url(&result).unwrap();
        assert!(url.starts_with("/results?data="));
        assert_eq!(decode_url(&url), Some(result.clone()));
        assert_eq!(
            decode_url(&format!("https://example.org{}#top", url)),
            Some(result)
        );
    }

    #[test]
    fn test_bad_input_yields_no_result() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("not-json"), None);
        assert_eq!(decode("%7B%22optimal_solution%22"), None);
        assert_eq!(decode("%FF%FE"), None);
        assert_eq!(decode("%zz"), None);
        assert_eq!(decode_url("/results"), None);
        assert_eq!(decode_url("/results?other=1"), None);
        assert_eq!(decode_url("/results?data="), None);
    }

    #[test]
    fn test_malformed_escape_inside_json_yields_no_result() {
        let raw = r#"{"optimal_solution":{"x1":1},"optimal_value":-1,"iterations":[],"message":"100%zz"}"#;
        assert_eq!(decode(raw), None);
        assert_eq!(decode(&raw.replace("%zz", "%2")), None);
        assert_eq!(decode(&raw.replace("%zz", "%")), None);

        let decoded = decode(&raw.replace("%zz", "%25")).unwrap();
        assert_eq!(decoded.message.as_deref(), Some("100%"));
        assert_eq!(decoded.optimal_solution["x1"], 1.0);
    }
}
