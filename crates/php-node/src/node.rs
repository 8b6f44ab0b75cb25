use serde::Serialize;

/// Byte offsets of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::DUMMY
    }
}

/// A comment attached to a node. `Doc` is a `/** ... */` doc block, which is
/// the only kind builders attach; the other kinds come from a lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Comment {
    Line(String),
    Block(String),
    Doc(String),
}

impl Comment {
    pub fn text(&self) -> &str {
        match self {
            Comment::Line(text) | Comment::Block(text) | Comment::Doc(text) => text,
        }
    }

    pub fn is_doc(&self) -> bool {
        matches!(self, Comment::Doc(_))
    }
}

/// Out-of-band data carried by every node: position info and attached
/// comments. Never participates in a node's sub-node list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeAttributes {
    pub span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl NodeAttributes {
    pub fn at(span: Span) -> Self {
        Self {
            span,
            comments: Vec::new(),
        }
    }

    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            span: Span::DUMMY,
            comments,
        }
    }

    /// True when there is nothing worth serializing: no position, no comments.
    pub fn is_empty(&self) -> bool {
        self.span == Span::DUMMY && self.comments.is_empty()
    }

    /// The leading doc comment, if one is attached.
    pub fn doc_comment(&self) -> Option<&Comment> {
        self.comments.iter().find(|c| c.is_doc())
    }
}

/// Self-describing node shape. `node_type` and `sub_node_names` are constants
/// of the concrete variant and never depend on field values; serialization and
/// traversal rely on the declared sub-node order.
pub trait Node {
    /// Stable type identifier, e.g. `"Stmt_Echo"` or `"ArrayItem"`.
    fn node_type(&self) -> &'static str;

    /// Names of the node's sub-nodes in their fixed declaration order.
    fn sub_node_names(&self) -> &'static [&'static str];

    fn attributes(&self) -> &NodeAttributes;
}
