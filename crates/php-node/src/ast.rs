use serde::Serialize;

use crate::node::{Node, NodeAttributes, Span};

// =============================================================================
// Names and Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Name {
    pub parts: Vec<String>,
    pub kind: NameKind,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NameKind {
    Unqualified,
    Qualified,
    FullyQualified,
    Relative,
}

impl Name {
    pub fn unqualified(part: impl Into<String>) -> Self {
        Self {
            parts: vec![part.into()],
            kind: NameKind::Unqualified,
            attrs: NodeAttributes::default(),
        }
    }
}

impl Node for Name {
    fn node_type(&self) -> &'static str {
        "Name"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["parts"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeHint {
    pub kind: TypeHintKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeHintKind {
    Named(Name),
    Nullable(Box<TypeHint>),
    Union(Vec<TypeHint>),
}

// =============================================================================
// Arguments and Attributes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
    pub by_ref: bool,
    pub unpack: bool,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Self {
            name: None,
            value,
            by_ref: false,
            unpack: false,
            attrs: NodeAttributes::default(),
        }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::positional(value)
        }
    }
}

impl Node for Arg {
    fn node_type(&self) -> &'static str {
        "Arg"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["name", "value", "byRef", "unpack"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

/// A single `#[Attr(args)]` annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: Name,
    pub args: Vec<Arg>,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl Node for Attribute {
    fn node_type(&self) -> &'static str {
        "Attribute"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["name", "args"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

/// One `#[A, B, C]` group. A declaration carries an ordered list of groups,
/// accumulated append-only and never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeGroup {
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl AttributeGroup {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            attrs: NodeAttributes::default(),
        }
    }
}

impl Node for AttributeGroup {
    fn node_type(&self) -> &'static str {
        "AttributeGroup"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["attrs"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// Integer literal
    Int(i64),

    /// Float literal
    Float(f64),

    /// String literal
    String(String),

    /// `true` / `false`
    Bool(bool),

    /// `null`
    Null,

    /// Variable: `$name`
    Variable(String),

    /// Array literal: `[1, 2, 3]` or `['a' => 1]`
    Array(Vec<ArrayItem>),

    /// Interpolated string: `"Hello $name"`
    InterpolatedString(Vec<StringPart>),
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            attrs: NodeAttributes::default(),
        }
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::String(value.into()))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Variable(name.into()))
    }
}

impl Node for Expr {
    fn node_type(&self) -> &'static str {
        match self.kind {
            ExprKind::Int(_) => "Scalar_Int",
            ExprKind::Float(_) => "Scalar_Float",
            ExprKind::String(_) => "Scalar_String",
            // true/false/null are constant fetches, matching their printed form
            ExprKind::Bool(_) | ExprKind::Null => "Expr_ConstFetch",
            ExprKind::Variable(_) => "Expr_Variable",
            ExprKind::Array(_) => "Expr_Array",
            ExprKind::InterpolatedString(_) => "Scalar_InterpolatedString",
        }
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        match self.kind {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::String(_) => &["value"],
            ExprKind::Bool(_) | ExprKind::Null => &["name"],
            ExprKind::Variable(_) => &["name"],
            ExprKind::Array(_) => &["items"],
            ExprKind::InterpolatedString(_) => &["parts"],
        }
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

/// One segment of an interpolated string: either a literal fragment node or
/// an embedded expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StringPart {
    Literal(InterpolatedStringPart),
    Expr(Expr),
}

// =============================================================================
// Leaf nodes
// =============================================================================

/// A single array entry: `key => value`, `&$value`, or `...$value`.
///
/// The constructor performs no validation: `unpack` combined with a key or
/// with `by_ref` is a caller bug, not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayItem {
    pub key: Option<Expr>,
    pub value: Expr,
    pub by_ref: bool,
    pub unpack: bool,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl ArrayItem {
    pub fn new(value: Expr) -> Self {
        Self {
            key: None,
            value,
            by_ref: false,
            unpack: false,
            attrs: NodeAttributes::default(),
        }
    }

    pub fn keyed(key: Expr, value: Expr) -> Self {
        Self {
            key: Some(key),
            ..Self::new(value)
        }
    }

    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    pub fn unpacked(mut self) -> Self {
        self.unpack = true;
        self
    }
}

impl Node for ArrayItem {
    fn node_type(&self) -> &'static str {
        "ArrayItem"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["key", "value", "byRef", "unpack"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

/// The literal fragment of an interpolated string, e.g. `"Hello "` in
/// `"Hello $name"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpolatedStringPart {
    pub value: String,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl InterpolatedStringPart {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            attrs: NodeAttributes::default(),
        }
    }
}

impl Node for InterpolatedStringPart {
    fn node_type(&self) -> &'static str {
        "InterpolatedStringPart"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["value"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /// `use OtherTrait;` inside a class-like body
    TraitUse(TraitUseDecl),

    /// Property declaration
    Property(PropertyDecl),

    /// Class constant declaration
    ClassConst(ClassConstDecl),

    /// Method declaration
    ClassMethod(MethodDecl),

    /// Echo statement: `echo expr1, expr2;`
    Echo(Vec<Expr>),

    /// Expression statement (e.g. `foo();`)
    Expression(Expr),

    /// Trait declaration
    Trait(TraitNode),

    /// Nop (empty statement `;`)
    Nop,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            attrs: NodeAttributes::default(),
        }
    }
}

impl Node for Stmt {
    fn node_type(&self) -> &'static str {
        match self.kind {
            StmtKind::TraitUse(_) => "Stmt_TraitUse",
            StmtKind::Property(_) => "Stmt_Property",
            StmtKind::ClassConst(_) => "Stmt_ClassConst",
            StmtKind::ClassMethod(_) => "Stmt_ClassMethod",
            StmtKind::Echo(_) => "Stmt_Echo",
            StmtKind::Expression(_) => "Stmt_Expression",
            StmtKind::Trait(_) => "Stmt_Trait",
            StmtKind::Nop => "Stmt_Nop",
        }
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        match self.kind {
            StmtKind::TraitUse(_) => &["traits", "adaptations"],
            StmtKind::Property(_) => &["attrGroups", "modifiers", "type", "name", "default"],
            StmtKind::ClassConst(_) => &["attrGroups", "modifiers", "type", "name", "value"],
            StmtKind::ClassMethod(_) => {
                &["attrGroups", "modifiers", "byRef", "name", "params", "returnType", "stmts"]
            }
            StmtKind::Echo(_) => &["exprs"],
            StmtKind::Expression(_) => &["expr"],
            StmtKind::Trait(_) => &["attrGroups", "name", "stmts"],
            StmtKind::Nop => &[],
        }
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

// =============================================================================
// Declaration members
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Modifier set shared by the class-like member declarations. Defaults to no
/// modifiers at all, which is how builder-constructed members start out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct MemberModifiers {
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
}

impl MemberModifiers {
    pub fn public() -> Self {
        Self {
            visibility: Some(Visibility::Public),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitUseDecl {
    pub traits: Vec<Name>,
    pub adaptations: Vec<TraitAdaptation>,
}

impl TraitUseDecl {
    pub fn new(traits: Vec<Name>) -> Self {
        Self {
            traits,
            adaptations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TraitAdaptation {
    /// `A::foo insteadof B, C;`
    Precedence {
        trait_name: Name,
        method: String,
        insteadof: Vec<Name>,
    },
    /// `foo as bar;` or `A::foo as protected bar;`
    Alias {
        trait_name: Option<Name>,
        method: String,
        new_modifier: Option<Visibility>,
        new_name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub modifiers: MemberModifiers,
    pub type_hint: Option<TypeHint>,
    pub default: Option<Expr>,
    pub attr_groups: Vec<AttributeGroup>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, modifiers: MemberModifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            type_hint: None,
            default: None,
            attr_groups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassConstDecl {
    pub name: String,
    pub modifiers: MemberModifiers,
    pub type_hint: Option<TypeHint>,
    pub value: Expr,
    pub attr_groups: Vec<AttributeGroup>,
}

impl ClassConstDecl {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            modifiers: MemberModifiers::default(),
            type_hint: None,
            value,
            attr_groups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: MemberModifiers,
    pub by_ref: bool,
    pub params: Vec<Param>,
    pub return_type: Option<TypeHint>,
    /// `None` for abstract methods.
    pub body: Option<Vec<Stmt>>,
    pub attr_groups: Vec<AttributeGroup>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: MemberModifiers::default(),
            by_ref: false,
            params: Vec::new(),
            return_type: None,
            body: Some(Vec::new()),
            attr_groups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<TypeHint>,
    pub default: Option<Expr>,
    pub by_ref: bool,
    pub variadic: bool,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl Node for Param {
    fn node_type(&self) -> &'static str {
        "Param"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["type", "byRef", "variadic", "name", "default"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

// =============================================================================
// Statement classification
// =============================================================================

/// The category a statement falls into inside a class-like body. Placement in
/// the canonical declaration layout and admission into a declaration builder
/// are both decided by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StmtCategory {
    /// Trait-use statements, printed first.
    Use,
    /// Properties and class constants, printed after uses in insertion order.
    Member,
    /// Methods, printed last.
    Method,
    /// Anything that cannot appear in a class-like body.
    Other,
}

impl Stmt {
    /// Classify this statement. Total over every `StmtKind`; extending the
    /// enum forces a decision here.
    pub fn category(&self) -> StmtCategory {
        match self.kind {
            StmtKind::TraitUse(_) => StmtCategory::Use,
            StmtKind::Property(_) | StmtKind::ClassConst(_) => StmtCategory::Member,
            StmtKind::ClassMethod(_) => StmtCategory::Method,
            StmtKind::Echo(_)
            | StmtKind::Expression(_)
            | StmtKind::Trait(_)
            | StmtKind::Nop => StmtCategory::Other,
        }
    }
}

// =============================================================================
// Trait declaration
// =============================================================================

/// A finalized trait declaration. Produced by the trait builder with `stmts`
/// already in canonical order (uses, then members, then methods); holds no
/// reference back to the builder that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitNode {
    pub name: String,
    pub stmts: Vec<Stmt>,
    pub attr_groups: Vec<AttributeGroup>,
    #[serde(skip_serializing_if = "NodeAttributes::is_empty")]
    pub attrs: NodeAttributes,
}

impl TraitNode {
    /// The declaration's methods, in declaration order.
    pub fn methods(&self) -> Vec<&Stmt> {
        filter_methods(&self.stmts)
    }

    /// The declaration's properties, in declaration order. Class constants
    /// are not properties and are excluded.
    pub fn properties(&self) -> Vec<&Stmt> {
        filter_properties(&self.stmts)
    }
}

impl Node for TraitNode {
    fn node_type(&self) -> &'static str {
        "Stmt_Trait"
    }

    fn sub_node_names(&self) -> &'static [&'static str] {
        &["attrGroups", "name", "stmts"]
    }

    fn attributes(&self) -> &NodeAttributes {
        &self.attrs
    }
}

/// Filter a statement sequence down to its method statements, preserving
/// relative order. Returns borrows of the input statements, so callers can
/// compare results by identity instead of re-classifying.
pub fn filter_methods(stmts: &[Stmt]) -> Vec<&Stmt> {
    stmts
        .iter()
        .filter(|s| s.category() == StmtCategory::Method)
        .collect()
}

/// Filter a statement sequence down to its property statements, preserving
/// relative order.
pub fn filter_properties(stmts: &[Stmt]) -> Vec<&Stmt> {
    stmts
        .iter()
        .filter(|s| matches!(s.kind, StmtKind::Property(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> Stmt {
        Stmt::new(StmtKind::ClassMethod(MethodDecl::new(name)))
    }

    fn property(name: &str) -> Stmt {
        Stmt::new(StmtKind::Property(PropertyDecl::new(
            name,
            MemberModifiers::public(),
        )))
    }

    fn class_const(name: &str) -> Stmt {
        Stmt::new(StmtKind::ClassConst(ClassConstDecl::new(name, Expr::int(1))))
    }

    fn trait_use(name: &str) -> Stmt {
        Stmt::new(StmtKind::TraitUse(TraitUseDecl::new(vec![
            Name::unqualified(name),
        ])))
    }

    #[test]
    fn test_array_item_sub_node_names_are_fixed() {
        let plain = ArrayItem::new(Expr::int(1));
        let keyed = ArrayItem::keyed(Expr::string("k"), Expr::int(2)).by_ref();
        let spread = ArrayItem::new(Expr::variable("rest")).unpacked();

        for item in [&plain, &keyed, &spread] {
            assert_eq!(item.node_type(), "ArrayItem");
            assert_eq!(item.sub_node_names(), ["key", "value", "byRef", "unpack"]);
        }
        assert!(plain.key.is_none());
        assert!(keyed.by_ref);
        assert!(spread.unpack);
    }

    #[test]
    fn test_array_item_unpack_is_not_validated() {
        // Semantically meaningless, but construction stays permissive.
        let item = ArrayItem::keyed(Expr::string("k"), Expr::variable("rest"))
            .by_ref()
            .unpacked();
        assert!(item.key.is_some());
        assert!(item.by_ref);
        assert!(item.unpack);
    }

    #[test]
    fn test_interpolated_string_part_shape() {
        let part = InterpolatedStringPart::new("Hello ");
        assert_eq!(part.node_type(), "InterpolatedStringPart");
        assert_eq!(part.sub_node_names(), ["value"]);
        assert_eq!(part.value, "Hello ");
    }

    #[test]
    fn test_stmt_type_tags() {
        assert_eq!(trait_use("T").node_type(), "Stmt_TraitUse");
        assert_eq!(property("p").node_type(), "Stmt_Property");
        assert_eq!(class_const("C").node_type(), "Stmt_ClassConst");
        assert_eq!(method("m").node_type(), "Stmt_ClassMethod");
        assert_eq!(
            Stmt::new(StmtKind::Echo(vec![])).node_type(),
            "Stmt_Echo"
        );
        assert_eq!(Stmt::new(StmtKind::Nop).node_type(), "Stmt_Nop");
    }

    #[test]
    fn test_classification() {
        assert_eq!(trait_use("T").category(), StmtCategory::Use);
        assert_eq!(property("p").category(), StmtCategory::Member);
        assert_eq!(class_const("C").category(), StmtCategory::Member);
        assert_eq!(method("m").category(), StmtCategory::Method);
        assert_eq!(
            Stmt::new(StmtKind::Echo(vec![])).category(),
            StmtCategory::Other
        );
        assert_eq!(
            Stmt::new(StmtKind::Expression(Expr::int(1))).category(),
            StmtCategory::Other
        );
        assert_eq!(Stmt::new(StmtKind::Nop).category(), StmtCategory::Other);
    }

    #[test]
    fn test_filter_methods_preserves_order_and_identity() {
        let stmts = vec![
            trait_use("T"),
            method("foo"),
            class_const("C"),
            method("bar"),
            property("p"),
            method("fooBar"),
        ];

        let methods = filter_methods(&stmts);
        assert_eq!(methods.len(), 3);
        assert!(std::ptr::eq(methods[0], &stmts[1]));
        assert!(std::ptr::eq(methods[1], &stmts[3]));
        assert!(std::ptr::eq(methods[2], &stmts[5]));
    }

    #[test]
    fn test_filter_properties_excludes_consts_and_methods() {
        let stmts = vec![
            trait_use("T"),
            property("foo"),
            class_const("C"),
            property("bar"),
            method("fooBar"),
        ];

        let properties = filter_properties(&stmts);
        assert_eq!(properties.len(), 2);
        assert!(std::ptr::eq(properties[0], &stmts[1]));
        assert!(std::ptr::eq(properties[1], &stmts[3]));
    }

    #[test]
    fn test_trait_node_queries_delegate() {
        let trait_node = TraitNode {
            name: "Foo".into(),
            stmts: vec![trait_use("T"), method("a"), property("p"), method("b")],
            attr_groups: Vec::new(),
            attrs: NodeAttributes::default(),
        };
        assert_eq!(trait_node.methods().len(), 2);
        assert_eq!(trait_node.properties().len(), 1);
        assert_eq!(trait_node.node_type(), "Stmt_Trait");
        assert_eq!(trait_node.sub_node_names(), ["attrGroups", "name", "stmts"]);
    }
}
