use std::fmt;

/// Grammar category a node type belongs to, exposed as the derived
/// `baseNodeType` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseNodeType {
    SourceUnit,
    ContractPart,
    Expression,
    PrimaryExpression,
    Statement,
    TypeName,
    YulStatement,
}

impl BaseNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseNodeType::SourceUnit => "SourceUnit",
            BaseNodeType::ContractPart => "ContractPart",
            BaseNodeType::Expression => "Expression",
            BaseNodeType::PrimaryExpression => "PrimaryExpression",
            BaseNodeType::Statement => "Statement",
            BaseNodeType::TypeName => "TypeName",
            BaseNodeType::YulStatement => "YulStatement",
        }
    }
}

impl fmt::Display for BaseNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! node_kinds {
    ($($variant:ident => $base:expr),* $(,)?) => {
        /// Typed tag for a solc AST `nodeType`.
        ///
        /// Unrecognized tags map to [`NodeKind::Other`]; the raw string is kept
        /// on the node either way.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($variant,)*
            Other,
        }

        impl NodeKind {
            pub fn from_node_type(node_type: &str) -> Self {
                match node_type {
                    $(stringify!($variant) => NodeKind::$variant,)*
                    _ => NodeKind::Other,
                }
            }

            /// Canonical `nodeType` string; `None` for [`NodeKind::Other`].
            pub fn as_str(&self) -> Option<&'static str> {
                match self {
                    $(NodeKind::$variant => Some(stringify!($variant)),)*
                    NodeKind::Other => None,
                }
            }

            pub fn base_type(&self) -> Option<BaseNodeType> {
                match self {
                    $(NodeKind::$variant => $base,)*
                    NodeKind::Other => None,
                }
            }
        }
    };
}

use BaseNodeType::{
    ContractPart, Expression, PrimaryExpression, SourceUnit as Unit, Statement, TypeName,
    YulStatement,
};

node_kinds! {
    SourceUnit => None,
    PragmaDirective => None,
    ImportDirective => Some(Unit),
    ContractDefinition => Some(Unit),
    InheritanceSpecifier => None,
    UsingForDirective => Some(ContractPart),
    StructDefinition => Some(ContractPart),
    EnumDefinition => Some(ContractPart),
    EnumValue => None,
    UserDefinedValueTypeDefinition => Some(ContractPart),
    ErrorDefinition => Some(ContractPart),
    EventDefinition => Some(ContractPart),
    FunctionDefinition => Some(ContractPart),
    ModifierDefinition => Some(ContractPart),
    ModifierInvocation => None,
    OverrideSpecifier => None,
    ParameterList => None,
    StructuredDocumentation => None,
    VariableDeclaration => Some(Expression),
    IdentifierPath => Some(TypeName),
    ElementaryTypeName => Some(TypeName),
    UserDefinedTypeName => Some(TypeName),
    FunctionTypeName => Some(TypeName),
    Mapping => Some(TypeName),
    ArrayTypeName => Some(TypeName),
    Block => None,
    UncheckedBlock => None,
    InlineAssembly => Some(Statement),
    PlaceholderStatement => Some(Statement),
    IfStatement => Some(Statement),
    TryStatement => Some(Statement),
    TryCatchClause => None,
    WhileStatement => Some(Statement),
    DoWhileStatement => Some(Statement),
    ForStatement => Some(Statement),
    Continue => Some(Statement),
    Break => Some(Statement),
    Return => Some(Statement),
    Throw => Some(Statement),
    EmitStatement => Some(Statement),
    RevertStatement => Some(Statement),
    VariableDeclarationStatement => Some(Statement),
    ExpressionStatement => Some(Statement),
    Conditional => Some(Expression),
    Assignment => Some(Expression),
    UnaryOperation => Some(Expression),
    BinaryOperation => Some(Expression),
    FunctionCall => Some(Expression),
    FunctionCallOptions => Some(Expression),
    NewExpression => Some(Expression),
    MemberAccess => Some(Expression),
    IndexAccess => Some(Expression),
    IndexRangeAccess => Some(Expression),
    TupleExpression => Some(PrimaryExpression),
    ElementaryTypeNameExpression => Some(PrimaryExpression),
    Literal => Some(PrimaryExpression),
    Identifier => Some(PrimaryExpression),
    YulBlock => None,
    YulVariableDeclaration => Some(YulStatement),
    YulAssignment => Some(YulStatement),
    YulExpressionStatement => Some(YulStatement),
    YulFunctionCall => Some(YulStatement),
    YulIf => Some(YulStatement),
    YulSwitch => Some(YulStatement),
    YulCase => None,
    YulForLoop => Some(YulStatement),
    YulBreak => Some(YulStatement),
    YulContinue => Some(YulStatement),
    YulLeave => Some(YulStatement),
    YulFunctionDefinition => Some(YulStatement),
    YulIdentifier => None,
    YulLiteral => None,
    YulTypedName => None,
}

impl NodeKind {
    /// Wrapper records whose statements are spliced into the owning node.
    pub fn is_block(&self) -> bool {
        matches!(self, NodeKind::Block | NodeKind::UncheckedBlock)
    }
}
