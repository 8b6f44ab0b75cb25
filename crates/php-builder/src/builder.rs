use php_node::{
    AttributeGroup, Comment, NodeAttributes, Stmt, StmtCategory, TraitNode,
};

use crate::diagnostics::StructuralError;

/// Assembles a trait declaration from statements supplied in any order.
///
/// Statements are classified on insertion and held in per-category buckets;
/// [`TraitBuilder::node`] concatenates the buckets in the canonical layout
/// (uses, then properties and constants, then methods). Insertion order is
/// preserved within each bucket and irrelevant across buckets.
#[derive(Debug, Clone, Default)]
pub struct TraitBuilder {
    name: String,
    uses: Vec<Stmt>,
    members: Vec<Stmt>,
    methods: Vec<Stmt>,
    doc_comment: Option<String>,
    attr_groups: Vec<AttributeGroup>,
}

impl TraitBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the doc comment for the declaration. Replaces any previously set
    /// doc comment; the text is taken as-is.
    pub fn set_doc_comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.doc_comment = Some(text.into());
        self
    }

    /// Adds a statement to the declaration body.
    ///
    /// Fails with [`StructuralError`] if the statement cannot appear in a
    /// trait body, in which case the builder is left unchanged.
    pub fn add_stmt(&mut self, stmt: Stmt) -> Result<&mut Self, StructuralError> {
        let bucket = match stmt.category() {
            StmtCategory::Use => &mut self.uses,
            StmtCategory::Member => &mut self.members,
            StmtCategory::Method => &mut self.methods,
            StmtCategory::Other => return Err(StructuralError::unexpected(&stmt)),
        };
        bucket.push(stmt);
        Ok(self)
    }

    /// Adds multiple statements, applying [`TraitBuilder::add_stmt`] to each
    /// in order. Not atomic: statements accepted before a failing one stay in
    /// their buckets.
    pub fn add_stmts<I>(&mut self, stmts: I) -> Result<&mut Self, StructuralError>
    where
        I: IntoIterator<Item = Stmt>,
    {
        for stmt in stmts {
            self.add_stmt(stmt)?;
        }
        Ok(self)
    }

    /// Appends an attribute group. Groups accumulate in call order and are
    /// never deduplicated or merged.
    pub fn add_attribute(&mut self, group: AttributeGroup) -> &mut Self {
        self.attr_groups.push(group);
        self
    }

    /// Produces the trait declaration node from the state accumulated so far.
    ///
    /// A repeatable read: the builder stays usable afterwards, and the
    /// returned node is independent of any further mutation.
    pub fn node(&self) -> TraitNode {
        let mut stmts =
            Vec::with_capacity(self.uses.len() + self.members.len() + self.methods.len());
        stmts.extend_from_slice(&self.uses);
        stmts.extend_from_slice(&self.members);
        stmts.extend_from_slice(&self.methods);

        let attrs = match &self.doc_comment {
            Some(text) => NodeAttributes::with_comments(vec![Comment::Doc(text.clone())]),
            None => NodeAttributes::default(),
        };

        TraitNode {
            name: self.name.clone(),
            stmts,
            attr_groups: self.attr_groups.clone(),
            attrs,
        }
    }
}
