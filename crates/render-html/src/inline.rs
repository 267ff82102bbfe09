use crate::node::{HtmlElement, HtmlNode};
use quire_richtext::{InlineKind, tokenize};

/// Rich text as inline HTML nodes.
pub fn inline_nodes(text: &str) -> Vec<HtmlNode> {
    tokenize(text)
        .into_iter()
        .map(|token| {
            let tag = match token.kind {
                InlineKind::Text => return HtmlNode::Text(token.content),
                InlineKind::Bold => "strong",
                InlineKind::Italic => "em",
                InlineKind::Code => "code",
                InlineKind::Strikethrough => "s",
                InlineKind::Link => {
                    return HtmlElement::new("a")
                        .attr("href", token.href.unwrap_or_default())
                        .attr("target", "_blank")
                        .attr("rel", "noopener noreferrer")
                        .text(token.content)
                        .into();
                }
            };
            HtmlElement::new(tag).text(token.content).into()
        })
        .collect()
}
