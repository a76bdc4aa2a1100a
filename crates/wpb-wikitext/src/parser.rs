//! Scanner for template invocations.
//!
//! `|` and `=` act as separators only at the top nesting level of an
//! invocation body: separators inside a nested `{{...}}` or inside a
//! `[[...]]` link belong to the nested construct. All scanning is
//! byte-based; the brace, bracket, pipe, and equals bytes are ASCII and
//! can never appear inside a UTF-8 continuation sequence.

use crate::document::{Document, Node};
use crate::template::{Param, Template};

pub(crate) fn parse_document(text: &str) -> Document {
    let mut nodes = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let Some(off) = text[pos..].find("{{") else {
            nodes.push(Node::Text(text[pos..].to_string()));
            break;
        };
        let open = pos + off;
        let Some(end) = matching_close(text, open) else {
            // Unterminated invocation: keep the rest as plain text.
            nodes.push(Node::Text(text[pos..].to_string()));
            break;
        };
        if open > pos {
            nodes.push(Node::Text(text[pos..open].to_string()));
        }
        nodes.push(Node::Template(parse_template(&text[open + 2..end - 2])));
        pos = end;
    }
    Document::from_nodes(nodes)
}

/// Index just past the `}}` matching the `{{` at `open`, or `None` if
/// the invocation never closes.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let b = text.as_bytes();
    let mut depth = 1usize;
    let mut i = open + 2;
    while i < b.len() {
        if i + 1 < b.len() && b[i] == b'{' && b[i + 1] == b'{' {
            depth += 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b'}' && b[i + 1] == b'}' {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Some(i);
            }
        } else {
            i += 1;
        }
    }
    None
}

fn parse_template(body: &str) -> Template {
    let mut segments = split_unnested(body);
    let raw_name = segments.remove(0);
    let params = segments
        .into_iter()
        .map(|segment| match unnested_equals(&segment) {
            Some(eq) => Param::named(&segment[..eq], &segment[eq + 1..]),
            None => Param::positional(segment),
        })
        .collect();
    Template::from_raw(raw_name, params)
}

/// Split an invocation body on `|` at nesting depth zero. The first
/// segment is the template name; the rest are parameters.
fn split_unnested(body: &str) -> Vec<String> {
    let b = body.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut tpl = 0usize;
    let mut link = 0usize;
    let mut i = 0;
    while i < b.len() {
        if i + 1 < b.len() && b[i] == b'{' && b[i + 1] == b'{' {
            tpl += 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b'}' && b[i + 1] == b'}' && tpl > 0 {
            tpl -= 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b'[' && b[i + 1] == b'[' {
            link += 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b']' && b[i + 1] == b']' && link > 0 {
            link -= 1;
            i += 2;
        } else if b[i] == b'|' && tpl == 0 && link == 0 {
            parts.push(body[start..i].to_string());
            start = i + 1;
            i += 1;
        } else {
            i += 1;
        }
    }
    parts.push(body[start..].to_string());
    parts
}

/// First `=` at nesting depth zero within one parameter segment, or
/// `None` for a positional parameter.
fn unnested_equals(segment: &str) -> Option<usize> {
    let b = segment.as_bytes();
    let mut tpl = 0usize;
    let mut link = 0usize;
    let mut i = 0;
    while i < b.len() {
        if i + 1 < b.len() && b[i] == b'{' && b[i + 1] == b'{' {
            tpl += 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b'}' && b[i + 1] == b'}' && tpl > 0 {
            tpl -= 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b'[' && b[i + 1] == b'[' {
            link += 1;
            i += 2;
        } else if i + 1 < b.len() && b[i] == b']' && b[i + 1] == b']' && link > 0 {
            link -= 1;
            i += 2;
        } else if b[i] == b'=' && tpl == 0 && link == 0 {
            return Some(i);
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::document::{Document, Node};

    fn round_trips(text: &str) {
        assert_eq!(Document::parse(text).to_string(), text, "round-trip failed for {text:?}");
    }

    // -----------------------------------------------------------------------
    // Round-trip identity
    // -----------------------------------------------------------------------

    #[test]
    fn empty_and_plain_text() {
        round_trips("");
        round_trips("Just some prose, no templates.\n");
    }

    #[test]
    fn simple_invocation() {
        round_trips("{{WikiProject Ships}}");
        round_trips("{{WikiProject Ships|importance=High}}");
    }

    #[test]
    fn whitespace_is_preserved_verbatim() {
        round_trips("{{ WikiProject Ships | importance = High | class=B }}");
        round_trips("{{WikiProject banner shell|1=\n{{WikiProject Ships}}\n}}");
    }

    #[test]
    fn nested_invocations() {
        round_trips("{{shell|1={{a|x=1}}{{b}}|collapsed=yes}}");
    }

    #[test]
    fn link_with_pipe_does_not_split() {
        round_trips("{{tpl|caption=[[Ship|a vessel]]|other=1}}");
    }

    #[test]
    fn unterminated_braces_stay_text() {
        round_trips("{{never closed");
        round_trips("text {{open|a=b then nothing");
    }

    #[test]
    fn stray_closing_braces_stay_text() {
        round_trips("}} orphan {{x}} }}");
    }

    #[test]
    fn triple_braces() {
        round_trips("{{{param}}}");
        round_trips("{{tpl|v={{{1}}}}}");
    }

    #[test]
    fn surrounding_text_preserved() {
        round_trips("before {{a}} between {{b|1=c}} after\n");
    }

    #[test]
    fn multibyte_content() {
        round_trips("{{船舶专题 |importance=High}}\n中文文本");
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    #[test]
    fn top_level_templates_in_document_order() {
        let doc = Document::parse("{{b}} text {{a}}");
        let names: Vec<String> = doc.templates().map(|t| t.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn nested_template_is_not_top_level() {
        let doc = Document::parse("{{shell|1={{inner}}}}");
        assert_eq!(doc.templates().count(), 1);
    }

    #[test]
    fn named_and_positional_params() {
        let doc = Document::parse("{{t|first|key=value|second}}");
        let tpl = doc.templates().next().unwrap();
        assert_eq!(tpl.param("1"), Some("first"));
        assert_eq!(tpl.param("key"), Some("value"));
        assert_eq!(tpl.param("2"), Some("second"));
    }

    #[test]
    fn equals_inside_nested_template_is_positional() {
        let doc = Document::parse("{{shell|{{x|importance=High}}}}");
        let tpl = doc.templates().next().unwrap();
        assert_eq!(tpl.param("1"), Some("{{x|importance=High}}"));
    }

    #[test]
    fn text_nodes_carry_the_gaps() {
        let doc = Document::parse("a{{t}}b");
        match doc.nodes() {
            [Node::Text(a), Node::Template(_), Node::Text(b)] => {
                assert_eq!(a, "a");
                assert_eq!(b, "b");
            }
            other => panic!("unexpected node shape: {other:?}"),
        }
    }
}
