//! Doc comment tree walker.
//!
//! Flattens a comment tree into a description string plus typed tags.
//! Markup in the comment survives verbatim; `{@link}` collapses to its label
//! (or the bare reference) and `{@code}` / `{@literal}` to their raw body.

use crate::model::{DocComment, DocTag};
use crate::source::{BlockTag, CommentTree, DocNode};

/// Block tag kinds with structured extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Param,
    Return,
    Throws,
    See,
    Prose,
    Uses,
    SerialField,
    Spec,
    Content,
    Other,
}

impl TagKind {
    fn from_name(name: &str) -> Self {
        match name {
            "param" => TagKind::Param,
            "return" => TagKind::Return,
            "throws" | "exception" => TagKind::Throws,
            "see" => TagKind::See,
            "since" | "author" | "version" | "deprecated" => TagKind::Prose,
            "uses" | "provides" => TagKind::Uses,
            "serialField" => TagKind::SerialField,
            "spec" => TagKind::Spec,
            "hidden" | "serial" | "serialData" => TagKind::Content,
            _ => TagKind::Other,
        }
    }
}

/// Convert a comment tree; `None` when no comment is attached.
pub fn parse(tree: Option<&CommentTree>) -> Option<DocComment> {
    let tree = tree?;
    Some(DocComment {
        description: process_all(&tree.body).trim().to_string(),
        tags: tree.block_tags.iter().map(parse_tag).collect(),
    })
}

/// Flatten a single inline node to text.
pub fn process(node: &DocNode) -> String {
    match node {
        DocNode::Link { reference, label } if label.is_empty() => reference.clone(),
        DocNode::Link { label, .. } => process_all(label),
        DocNode::Literal { body } | DocNode::Code { body } => body.clone(),
        other => other.to_string(),
    }
}

fn process_all(nodes: &[DocNode]) -> String {
    nodes.iter().map(process).collect()
}

/// Processed text of a node list, or `None` when there is nothing there.
fn text_of(nodes: &[DocNode]) -> Option<String> {
    if nodes.is_empty() {
        return None;
    }
    Some(process_all(nodes).trim().to_string())
}

fn parse_tag(tag: &BlockTag) -> DocTag {
    let mut out = DocTag::new(tag.kind.clone());
    match TagKind::from_name(&tag.kind) {
        TagKind::Param => {
            out.name = tag.name.clone();
            out.description = text_of(&tag.body);
        }
        TagKind::Return | TagKind::Prose => {
            out.description = text_of(&tag.body);
        }
        TagKind::Throws => {
            out.exception = tag.exception.clone();
            out.description = text_of(&tag.body);
        }
        TagKind::See => {
            out.reference = text_of(&tag.reference);
            if let [DocNode::Link { label, .. }] = tag.reference.as_slice() {
                out.label = text_of(label);
            }
        }
        TagKind::Uses => {
            out.reference = text_of(&tag.reference);
            out.description = text_of(&tag.body);
        }
        TagKind::SerialField => {
            out.name = tag.name.clone();
            out.reference = text_of(&tag.reference);
            out.description = text_of(&tag.body);
        }
        TagKind::Spec => {
            out.reference = text_of(&tag.reference);
            out.label = text_of(&tag.body);
        }
        TagKind::Content => {
            out.content = text_of(&tag.body);
        }
        TagKind::Other => {
            tracing::debug!(kind = %tag.kind, "no structured handler for tag, keeping raw text");
            out.description = Some(tag.raw_text());
        }
    }
    out
}
