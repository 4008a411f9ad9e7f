use super::{Block, Inline, PLACEHOLDER, RenderedNote};

pub(super) fn to_html(note: &RenderedNote) -> String {
    let mut out = String::new();
    match note {
        RenderedNote::Placeholder => {
            out.push_str("<p class=\"placeholder\">");
            escape_into(&mut out, PLACEHOLDER);
            out.push_str("</p>");
        }
        RenderedNote::Document(blocks) => {
            for block in blocks {
                write_block(&mut out, block);
            }
        }
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            write_inlines(out, content);
            out.push_str(&format!("</h{level}>"));
        }
        Block::List(items) => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                write_inlines(out, item);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Block::Line(content) => write_inlines(out, content),
        Block::Break => out.push_str("<br />"),
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => escape_into(out, text),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                write_inlines(out, children);
                out.push_str("</strong>");
            }
            Inline::Code(code) => {
                out.push_str("<code>");
                escape_into(out, code);
                out.push_str("</code>");
            }
        }
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        let mut out = String::new();
        escape_into(&mut out, r#"<a href="x">&'"#);
        assert_eq!(out, "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn writes_nested_inline_markup() {
        let note = RenderedNote::Document(vec![Block::Line(vec![Inline::Strong(vec![
            Inline::Text("a ".to_string()),
            Inline::Code("<b>".to_string()),
        ])])]);
        assert_eq!(to_html(&note), "<strong>a <code>&lt;b&gt;</code></strong>");
    }
}
