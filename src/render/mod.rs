//! Renders the markdown subset returned by the generation service.
//!
//! Supported constructs: `**strong**`, `` `code` ``, `#`/`##`/`###` headings,
//! `* ` bullet items (consecutive items share one list) and line breaks.
//! Everything else is text, and text is always escaped on output.

mod html;
mod inline;

pub const PLACEHOLDER: &str = "Your generated notes will appear here.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    List(Vec<Vec<Inline>>),
    Line(Vec<Inline>),
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNote {
    Placeholder,
    Document(Vec<Block>),
}

impl RenderedNote {
    pub fn to_html(&self) -> String {
        html::to_html(self)
    }
}

enum LineKind<'a> {
    Heading(u8, &'a str),
    Item(&'a str),
    Text(&'a str),
}

pub fn render(markdown: &str) -> RenderedNote {
    if markdown.trim().is_empty() {
        return RenderedNote::Placeholder;
    }

    let mut blocks = Vec::new();
    let mut open_list: Vec<Vec<Inline>> = Vec::new();
    for (index, raw_line) in markdown.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let kind = classify(line);

        if index > 0 {
            let continues_list = !open_list.is_empty() && matches!(kind, LineKind::Item(_));
            if !continues_list {
                flush_list(&mut blocks, &mut open_list);
                blocks.push(Block::Break);
            }
        }

        match kind {
            LineKind::Heading(level, content) => blocks.push(Block::Heading {
                level,
                content: inline::parse_inlines(content),
            }),
            LineKind::Item(content) => open_list.push(inline::parse_inlines(content)),
            LineKind::Text("") => {}
            LineKind::Text(content) => blocks.push(Block::Line(inline::parse_inlines(content))),
        }
    }
    flush_list(&mut blocks, &mut open_list);
    RenderedNote::Document(blocks)
}

// Longest heading prefix first.
fn classify(line: &str) -> LineKind<'_> {
    if let Some(content) = line.strip_prefix("### ") {
        LineKind::Heading(3, content)
    } else if let Some(content) = line.strip_prefix("## ") {
        LineKind::Heading(2, content)
    } else if let Some(content) = line.strip_prefix("# ") {
        LineKind::Heading(1, content)
    } else if let Some(content) = line.strip_prefix("* ") {
        LineKind::Item(content)
    } else {
        LineKind::Text(line)
    }
}

fn flush_list(blocks: &mut Vec<Block>, open_list: &mut Vec<Vec<Inline>>) {
    if !open_list.is_empty() {
        blocks.push(Block::List(std::mem::take(open_list)));
    }
}
