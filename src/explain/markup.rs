//! Rendering of backend text with `**bold**` emphasis.
//!
//! Backend output is untrusted. Only two constructs are recognised, bold
//! spans and line breaks; everything else is escaped.

/// A piece of parsed explanation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Text(&'a str),
    Strong(&'a str),
    LineBreak,
}

/// Split text into plain, strong and line-break spans.
///
/// Bold never spans lines, and an unmatched `**` stays literal.
pub fn parse(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            spans.push(Span::LineBreak);
        }
        let mut rest = line;
        while let Some(open) = rest.find("**") {
            let after = &rest[open + 2..];
            let Some(close) = after.find("**") else {
                break;
            };
            if open > 0 {
                spans.push(Span::Text(&rest[..open]));
            }
            spans.push(Span::Strong(&after[..close]));
            rest = &after[close + 2..];
        }
        if !rest.is_empty() {
            spans.push(Span::Text(rest));
        }
    }
    spans
}

/// Render as HTML: escaped text, `<strong>` for bold and `<br />` for newlines.
pub fn to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + 16);
    for span in parse(text) {
        match span {
            Span::Text(t) => escape_html_into(t, &mut html),
            Span::Strong(t) => {
                html.push_str("<strong>");
                escape_html_into(t, &mut html);
                html.push_str("</strong>");
            }
            Span::LineBreak => html.push_str("<br />"),
        }
    }
    html
}

/// Render for a terminal, using ANSI bold.
pub fn to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for span in parse(text) {
        match span {
            Span::Text(t) => out.push_str(&strip_control(t)),
            Span::Strong(t) => {
                out.push_str("\x1b[1m");
                out.push_str(&strip_control(t));
                out.push_str("\x1b[0m");
            }
            Span::LineBreak => out.push('\n'),
        }
    }
    out
}

fn escape_html_into(text: &str, out: &mut String) {
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
}

// Backend text must not smuggle its own terminal escapes.
fn strip_control(text: &str) -> String {
    text.chars().filter(|c| !c.is_control() || *c == '\t').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bold_and_breaks() {
        let spans = parse("Gain is **-2**.\nPhase **180°**");
        assert_eq!(
            spans,
            vec![
                Span::Text("Gain is "),
                Span::Strong("-2"),
                Span::Text("."),
                Span::LineBreak,
                Span::Text("Phase "),
                Span::Strong("180°"),
            ]
        );
    }

    #[test]
    fn test_unmatched_marker_is_literal() {
        assert_eq!(parse("a ** b"), vec![Span::Text("a ** b")]);
        assert_eq!(to_html("**open\nclose**"), "**open<br />close**");
    }

    #[test]
    fn test_html_is_escaped() {
        let html = to_html("<script>alert('x')</script> **<b>&</b>**");
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; <strong>&lt;b&gt;&amp;&lt;/b&gt;</strong>"
        );
    }

    #[test]
    fn test_ansi_bold() {
        assert_eq!(to_ansi("Vout = **2.5 V**"), "Vout = \x1b[1m2.5 V\x1b[0m");
        assert_eq!(to_ansi("x\x1b[31my"), "x[31my");
    }
}
