//! Representation negotiation
//!
//! Decides per request whether the caller gets structured JSON or the HTML
//! documentation view. Unlike a raw substring check on the Accept header,
//! this honors quality values, so `Accept: application/json,
//! text/html;q=0.9` correctly selects JSON. No signal means structured data.

use axum::http::header::ACCEPT;
use axum::http::HeaderMap;

/// Which representation the response takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Structured data (JSON), the default.
    Json,
    /// Human-readable documentation view (HTML).
    Html,
}

/// When an HTML-preferring request should get the documentation view.
///
/// The upstream product was ambiguous here: some endpoints showed
/// documentation even when parameters were supplied, others validated the
/// parameters and rendered errors as JSON. The policy makes that choice
/// explicit instead of varying per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocsPolicy {
    /// Documentation view only when the request carries no parameters;
    /// otherwise validation proceeds and errors come back as structured
    /// data.
    #[default]
    WhenParamsAbsent,
    /// Documentation view on every HTML-preferring request.
    Always,
}

impl DocsPolicy {
    /// Whether this request should render the documentation view.
    pub fn wants_docs(&self, representation: Representation, has_params: bool) -> bool {
        match self {
            DocsPolicy::WhenParamsAbsent => representation == Representation::Html && !has_params,
            DocsPolicy::Always => representation == Representation::Html,
        }
    }
}

/// Negotiate the representation from request headers.
pub fn negotiate(headers: &HeaderMap) -> Representation {
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    negotiate_accept(accept)
}

/// Quality-value-aware negotiation over the Accept header text.
///
/// HTML is chosen only when its best quality strictly exceeds JSON's;
/// ties, wildcards alone, and absent or malformed headers fall back to
/// structured data.
pub fn negotiate_accept(accept: &str) -> Representation {
    let mut html_q: f32 = 0.0;
    let mut json_q: f32 = 0.0;

    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media_type = match parts.next() {
            Some(m) => m.trim().to_ascii_lowercase(),
            None => continue,
        };
        if media_type.is_empty() {
            continue;
        }

        let q = parse_quality(parts);

        match media_type.as_str() {
            "text/html" | "text/*" => html_q = html_q.max(q),
            "application/json" | "application/*" => json_q = json_q.max(q),
            "*/*" => json_q = json_q.max(q),
            _ => {}
        }
    }

    if html_q > json_q {
        Representation::Html
    } else {
        Representation::Json
    }
}

/// Extract the q parameter from media-range parameters; defaults to 1.0,
/// and malformed values are treated as the default rather than rejected.
fn parse_quality<'a>(params: impl Iterator<Item = &'a str>) -> f32 {
    for param in params {
        let mut kv = param.splitn(2, '=');
        let key = kv.next().map(str::trim).unwrap_or("");
        if !key.eq_ignore_ascii_case("q") {
            continue;
        }
        if let Some(value) = kv.next() {
            if let Ok(q) = value.trim().parse::<f32>() {
                return q.clamp(0.0, 1.0);
            }
        }
    }
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_defaults_to_json() {
        assert_eq!(negotiate_accept(""), Representation::Json);
    }

    #[test]
    fn browser_accept_selects_html() {
        let browser = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
        assert_eq!(negotiate_accept(browser), Representation::Html);
    }

    #[test]
    fn plain_json_accept_selects_json() {
        assert_eq!(negotiate_accept("application/json"), Representation::Json);
    }

    #[test]
    fn quality_values_are_honored() {
        // The raw substring check this replaces got this case wrong.
        assert_eq!(
            negotiate_accept("application/json, text/html;q=0.9"),
            Representation::Json
        );
        assert_eq!(
            negotiate_accept("application/json;q=0.5, text/html"),
            Representation::Html
        );
    }

    #[test]
    fn ties_fall_back_to_json() {
        assert_eq!(
            negotiate_accept("text/html, application/json"),
            Representation::Json
        );
    }

    #[test]
    fn wildcard_alone_is_json() {
        assert_eq!(negotiate_accept("*/*"), Representation::Json);
    }

    #[test]
    fn malformed_quality_defaults_to_one() {
        assert_eq!(
            negotiate_accept("text/html;q=banana, application/json;q=0.4"),
            Representation::Html
        );
    }

    #[test]
    fn unrelated_media_types_are_ignored() {
        assert_eq!(negotiate_accept("image/png, audio/ogg"), Representation::Json);
    }

    #[test]
    fn docs_policy_when_params_absent() {
        let policy = DocsPolicy::WhenParamsAbsent;
        assert!(policy.wants_docs(Representation::Html, false));
        assert!(!policy.wants_docs(Representation::Html, true));
        assert!(!policy.wants_docs(Representation::Json, false));
    }

    #[test]
    fn docs_policy_always() {
        let policy = DocsPolicy::Always;
        assert!(policy.wants_docs(Representation::Html, true));
        assert!(policy.wants_docs(Representation::Html, false));
        assert!(!policy.wants_docs(Representation::Json, true));
    }
}
