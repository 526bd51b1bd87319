//! Response body to collapsible HTML.
//!
//! JSON bodies become nested lists, every nested container inside its own
//! open `<details>` region. Anything that is not JSON is shown verbatim in a
//! `<pre>` block. Formatting never fails.

use crate::utils::format::html_escape;
use serde_json::{Map, Value};

pub const EMPTY_LIST: &str = "[ ]";
pub const EMPTY_OBJECT: &str = "{ }";

const DETAILS_OPEN: &str = "<details open><summary></summary>";
const DETAILS_CLOSE: &str = "</details>";

/// Shape of a JSON value as far as rendering cares
enum Node<'a> {
    List(&'a [Value]),
    Object(&'a Map<String, Value>),
    Scalar(&'a Value),
    Null,
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Node::List(items),
            Value::Object(map) => Node::Object(map),
            Value::Null => Node::Null,
            scalar => Node::Scalar(scalar),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nesting {
    Outermost,
    Nested,
}

/// Render a response body. Absent or non UTF-8 bodies render as empty text.
pub fn format_body(body: Option<&[u8]>) -> String {
    let text = body
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or_default();

    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            let mut out = String::new();
            render(&value, Nesting::Outermost, &mut out);
            out
        }
        Err(_) => format!("<pre>{}</pre>", html_escape(text)),
    }
}

fn render(value: &Value, nesting: Nesting, out: &mut String) {
    match Node::from(value) {
        Node::List(items) => render_list(items, nesting, out),
        Node::Object(map) => render_object(map, nesting, out),
        Node::Scalar(scalar) => render_scalar(scalar, out),
        Node::Null => out.push_str(r#"<span class="null">null</span>"#),
    }
}

fn render_list(items: &[Value], nesting: Nesting, out: &mut String) {
    if items.is_empty() {
        out.push_str(EMPTY_LIST);
        return;
    }

    open_region(nesting, out);
    out.push_str(r#"<ul class="array">"#);
    for item in items {
        out.push_str("<li>");
        render(item, Nesting::Nested, out);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    close_region(nesting, out);
}

fn render_object(map: &Map<String, Value>, nesting: Nesting, out: &mut String) {
    if map.is_empty() {
        out.push_str(EMPTY_OBJECT);
        return;
    }

    open_region(nesting, out);
    out.push_str(r#"<ul class="obj">"#);
    for (key, value) in map {
        out.push_str(r#"<li><span class="prop">"#);
        out.push_str(&html_escape(key));
        out.push_str("</span>: ");
        render(value, Nesting::Nested, out);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    close_region(nesting, out);
}

fn render_scalar(value: &Value, out: &mut String) {
    match value {
        Value::Bool(b) => out.push_str(&format!(r#"<span class="bool">{}</span>"#, b)),
        Value::Number(n) => out.push_str(&format!(r#"<span class="num">{}</span>"#, n)),
        Value::String(s) => out.push_str(&format!(
            r#"<span class="string">"{}"</span>"#,
            html_escape(s)
        )),
        _ => {}
    }
}

fn open_region(nesting: Nesting, out: &mut String) {
    if nesting == Nesting::Nested {
        out.push_str(DETAILS_OPEN);
    }
}

fn close_region(nesting: Nesting, out: &mut String) {
    if nesting == Nesting::Nested {
        out.push_str(DETAILS_CLOSE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(body: &str) -> String {
        format_body(Some(body.as_bytes()))
    }

    #[test]
    fn test_flat_object() {
        assert_eq!(
            fmt(r#"{"id": 7, "name": "Ann"}"#),
            concat!(
                r#"<ul class="obj">"#,
                r#"<li><span class="prop">id</span>: <span class="num">7</span></li>"#,
                r#"<li><span class="prop">name</span>: <span class="string">"Ann"</span></li>"#,
                "</ul>"
            )
        );
    }

    #[test]
    fn test_nested_containers_are_collapsible() {
        assert_eq!(
            fmt("[1, [true, null]]"),
            concat!(
                r#"<ul class="array">"#,
                r#"<li><span class="num">1</span></li>"#,
                "<li><details open><summary></summary>",
                r#"<ul class="array">"#,
                r#"<li><span class="bool">true</span></li>"#,
                r#"<li><span class="null">null</span></li>"#,
                "</ul></details></li>",
                "</ul>"
            )
        );
    }

    #[test]
    fn test_outermost_value_is_not_wrapped() {
        let html = fmt(r#"{"a": {"b": 1}}"#);
        assert!(html.starts_with(r#"<ul class="obj">"#));
        assert_eq!(html.matches("<details open>").count(), 1);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(fmt("[]"), EMPTY_LIST);
        assert_eq!(fmt("{}"), EMPTY_OBJECT);
        assert_eq!(
            fmt(r#"{"tags": [], "meta": {}}"#),
            concat!(
                r#"<ul class="obj">"#,
                r#"<li><span class="prop">tags</span>: [ ]</li>"#,
                r#"<li><span class="prop">meta</span>: { }</li>"#,
                "</ul>"
            )
        );
    }

    #[test]
    fn test_key_order_is_preserved() {
        let html = fmt(r#"{"zeta": 1, "alpha": 2}"#);
        let zeta = html.find("zeta").unwrap();
        let alpha = html.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_escapes_keys_and_strings() {
        let html = fmt(r#"{"<k>": "<b>&</b>"}"#);
        assert!(html.contains(r#"<span class="prop">&lt;k&gt;</span>"#));
        assert!(html.contains(r#"<span class="string">"&lt;b&gt;&amp;&lt;/b&gt;"</span>"#));
    }

    #[test]
    fn test_plain_text_falls_back_to_pre() {
        assert_eq!(fmt("not json"), "<pre>not json</pre>");
        assert_eq!(fmt("<html>"), "<pre>&lt;html&gt;</pre>");
        assert_eq!(fmt(r#"{"unterminated": "#), r#"<pre>{&quot;unterminated&quot;: </pre>"#);
    }

    #[test]
    fn test_empty_and_absent_body() {
        assert_eq!(fmt(""), "<pre></pre>");
        assert_eq!(format_body(None), "<pre></pre>");
    }

    #[test]
    fn test_invalid_utf8_is_empty() {
        assert_eq!(format_body(Some(&[0xff, 0xfe, 0x00])), "<pre></pre>");
    }

    #[test]
    fn test_scalar_body() {
        assert_eq!(fmt("42"), r#"<span class="num">42</span>"#);
        assert_eq!(fmt(r#""quoted""#), r#"<span class="string">"quoted"</span>"#);
    }
}
