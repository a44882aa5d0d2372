//! Documentation view rendering
//!
//! Every route declares a `RouteDoc` describing its usage: path, method,
//! description, parameters, and one example query/response pair. A single
//! renderer turns that metadata into the HTML documentation page, replacing
//! the per-route template blocks the upstream service copy-pasted.
//!
//! Pages are built fresh per request. The footer embeds the current year,
//! and some example payloads carry live timestamps, so nothing here is
//! cacheable.

use axum::response::Html;
use chrono::{Datelike, Utc};
use serde_json::Value;

/// A documented query parameter.
#[derive(Debug, Clone)]
pub struct ParamDoc {
    pub name: &'static str,
    pub ty: &'static str,
    pub description: &'static str,
}

/// Static usage metadata for one route, plus a per-request example payload.
#[derive(Debug, Clone)]
pub struct RouteDoc {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParamDoc>,
    pub example_query: &'static str,
    pub example_response: Value,
}

impl RouteDoc {
    /// Render the documentation page for this route.
    pub fn render(&self) -> Html<String> {
        let current_year = Utc::now().year();
        let example_response =
            serde_json::to_string_pretty(&self.example_response).unwrap_or_default();

        let mut params_html = String::new();
        for p in &self.parameters {
            params_html.push_str(&format!(
                "<tr><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
                escape(p.name),
                escape(p.ty),
                escape(p.description),
            ));
        }

        let page = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{path} &mdash; Financial Insights API</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; color: #222; }}
.method {{ background: #2d6cdf; color: #fff; border-radius: 4px; padding: 0.15rem 0.5rem; font-size: 0.85rem; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }}
pre {{ background: #f6f8fa; padding: 1rem; border-radius: 6px; overflow-x: auto; }}
footer {{ margin-top: 3rem; color: #888; font-size: 0.85rem; }}
</style>
</head>
<body>
<h1><span class="method">{method}</span> <code>{path}</code></h1>
<p>{description}</p>
<h2>Parameters</h2>
<table>
<tr><th>Name</th><th>Type</th><th>Description</th></tr>
{params}</table>
<h2>Example</h2>
<p><code>{method} {path}{query}</code></p>
<pre>{example}</pre>
<footer>&copy; {year} Financial Insights API</footer>
</body>
</html>
"#,
            path = escape(self.path),
            method = escape(self.method),
            description = escape(self.description),
            params = params_html,
            query = escape(self.example_query),
            example = escape(&example_response),
            year = current_year,
        );

        Html(page)
    }
}

/// Minimal HTML escaping for interpolated text.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
