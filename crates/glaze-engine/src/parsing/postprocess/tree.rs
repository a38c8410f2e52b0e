//! Node-tree grouping backend.
//!
//! Builds an owned throwaway tree per call: list items lift out of their
//! line wrappers into fresh list elements, table runs buffer until they can
//! be promoted (or declined), fenced lines accumulate into a `<pre><code>`
//! sibling. The tree is serialized once at the end.

use super::{PostProcessor, TableLine, decode_code_line, render_code_block, render_table};
use crate::parsing::{ParseContext, unit::LineUnit};

/// A node in the throwaway output tree. Fully rendered fragments stay as
/// opaque HTML leaves; grouping containers are real elements.
#[derive(Debug)]
enum Node {
    Html(String),
    Element {
        tag: &'static str,
        children: Vec<Node>,
    },
}

impl Node {
    fn write(&self, out: &mut String) {
        match self {
            Node::Html(html) => out.push_str(html),
            Node::Element { tag, children } => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in children {
                    child.write(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

#[derive(Debug)]
struct FenceBlock {
    lang: Option<String>,
    lines: Vec<String>,
}

pub(crate) struct TreePostProcessor;

impl PostProcessor for TreePostProcessor {
    fn post_process(&self, units: &[LineUnit], ctx: &mut ParseContext) -> String {
        let mut nodes: Vec<Node> = Vec::new();
        // Tag of the list element currently sitting at the tail of `nodes`.
        let mut current_list: Option<&'static str> = None;
        // Buffered table run: classification plus the literal fallback html.
        let mut table: Vec<(TableLine, String)> = Vec::new();
        let mut fence: Option<FenceBlock> = None;

        for unit in units {
            match unit {
                LineUnit::Fence { lang, .. } => {
                    flush_table(&mut nodes, &mut table, ctx);
                    current_list = None;
                    match fence.take() {
                        None => {
                            nodes.push(Node::Html(unit.flat_html()));
                            fence = Some(FenceBlock {
                                lang: lang.clone(),
                                lines: Vec::new(),
                            });
                        }
                        Some(block) => {
                            nodes.push(Node::Html(render_code_block(
                                block.lang.as_deref(),
                                &block.lines,
                            )));
                            nodes.push(Node::Html(unit.flat_html()));
                        }
                    }
                }
                LineUnit::Code { text } if fence.is_some() => {
                    if let Some(block) = fence.as_mut() {
                        let content = if text.is_empty() { "&nbsp;" } else { text };
                        block.lines.push(decode_code_line(content));
                    }
                }
                LineUnit::Raw { text } if fence.is_some() => {
                    if let Some(block) = fence.as_mut() {
                        let content = if text.is_empty() { "&nbsp;" } else { text };
                        block.lines.push(decode_code_line(content));
                    }
                }
                LineUnit::TableRow { text } => {
                    current_list = None;
                    table.push((TableLine::Row(text.clone()), unit.flat_html()));
                }
                LineUnit::TableSeparator { .. } => {
                    current_list = None;
                    table.push((TableLine::Separator, unit.flat_html()));
                }
                LineUnit::ListItem {
                    indent,
                    class,
                    inner,
                } => {
                    flush_table(&mut nodes, &mut table, ctx);
                    let tag = if *class == "ordered-list" { "ol" } else { "ul" };
                    if current_list != Some(tag) {
                        nodes.push(Node::Element {
                            tag,
                            children: Vec::new(),
                        });
                        current_list = Some(tag);
                    }
                    if let Some(Node::Element { children, .. }) = nodes.last_mut() {
                        children.push(Node::Html(format!(
                            "<li class=\"{class}\">{indent}{inner}</li>"
                        )));
                    }
                }
                _ => {
                    flush_table(&mut nodes, &mut table, ctx);
                    current_list = None;
                    nodes.push(Node::Html(unit.flat_html()));
                }
            }
        }

        flush_table(&mut nodes, &mut table, ctx);
        if let Some(block) = fence.take() {
            // Unterminated fence: the block still materializes, there is
            // just no closing delimiter line after it.
            nodes.push(Node::Html(render_code_block(
                block.lang.as_deref(),
                &block.lines,
            )));
        }

        let mut out = String::new();
        for node in &nodes {
            node.write(&mut out);
        }
        out
    }
}

fn flush_table(
    nodes: &mut Vec<Node>,
    table: &mut Vec<(TableLine, String)>,
    ctx: &mut ParseContext,
) {
    if table.is_empty() {
        return;
    }
    let lines: Vec<TableLine> = table.iter().map(|(line, _)| line.clone()).collect();
    match render_table(&lines, ctx) {
        Some(html) => nodes.push(Node::Html(html)),
        None => {
            for (_, fallback) in table.iter() {
                nodes.push(Node::Html(fallback.clone()));
            }
        }
    }
    table.clear();
}
