use super::Inline;

const STRONG_MARK: &str = "**";
const CODE_MARK: char = '`';

/// Strong spans are matched first; code spans are then matched inside each
/// resulting segment, so a code span never crosses a strong boundary.
pub(super) fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find(STRONG_MARK) {
        let after_open = &rest[open + STRONG_MARK.len()..];
        let Some(close) = after_open.find(STRONG_MARK) else {
            break;
        };
        inlines.extend(parse_code_spans(&rest[..open]));
        inlines.push(Inline::Strong(parse_code_spans(&after_open[..close])));
        rest = &after_open[close + STRONG_MARK.len()..];
    }
    inlines.extend(parse_code_spans(rest));
    inlines
}

fn parse_code_spans(segment: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut rest = segment;
    while let Some(open) = rest.find(CODE_MARK) {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(CODE_MARK) else {
            break;
        };
        push_text(&mut inlines, &rest[..open]);
        inlines.push(Inline::Code(after_open[..close].to_string()));
        rest = &after_open[close + 1..];
    }
    push_text(&mut inlines, rest);
    inlines
}

fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if !text.is_empty() {
        inlines.push(Inline::Text(text.to_string()));
    }
}
