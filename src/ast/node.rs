use super::arena::NodeId;

/// Unary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

/// Binary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
    Xor,
    BitAnd,
    BitOr,
    BitXor,
}

/// Assignment operator kinds. `Plain` is `=`; the rest are the compound
/// forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Plain,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// A literal with its parsed value and width.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Byte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Null,
}

/// A syntax tree node. Nodes live in a `NodeArena` and refer to their
/// children by `NodeId`, so a whole subtree can be discarded by
/// truncating the arena.
#[derive(Debug, Clone)]
pub enum Node {
    /// A statement list: a block body or the top level of a file.
    Body { statements: Vec<NodeId> },
    /// One `if` or `elif` arm.
    Clause { predicate: NodeId, body: NodeId },
    /// A whole if-chain.
    Condition {
        if_clause: NodeId,
        elif_clauses: Vec<NodeId>,
        else_body: Option<NodeId>,
    },
    Def {
        return_type: Option<NodeId>,
        name: NodeId,
        parameters: Vec<NodeId>,
        body: NodeId,
    },
    Parameter { param_type: NodeId, name: NodeId },
    Use { path: NodeId },
    While { predicate: NodeId, body: NodeId },
    /// Counted loop. Absent header parts are `Empty` nodes.
    For {
        init: NodeId,
        condition: NodeId,
        increment: NodeId,
        body: NodeId,
    },
    Foreach { item: NodeId, iterable: NodeId, body: NodeId },
    Break,
    Continue,
    Return { value: Option<NodeId> },
    /// Bare name reference.
    Member { name: String },
    MemberAccess { target: NodeId, member: NodeId },
    Call { callee: NodeId, arguments: Vec<NodeId> },
    Indexer { target: NodeId, arguments: Vec<NodeId> },
    ConstructorCall { type_ref: NodeId, arguments: Vec<NodeId> },
    Cast { type_ref: NodeId, operand: NodeId },
    /// A type reference. Generic arguments may hold `None` placeholders
    /// where recovery dropped a malformed argument; an empty vec means
    /// the type is not generic.
    TypeRef {
        name: NodeId,
        arguments: Vec<Option<NodeId>>,
    },
    /// `var x` carries no type; `List<int> x` carries one.
    VariableDef {
        var_type: Option<NodeId>,
        name: NodeId,
    },
    Literal { value: LiteralValue },
    Unary { op: UnaryOp, operand: NodeId },
    Binary { op: BinaryOp, left: NodeId, right: NodeId },
    Assign { op: AssignOp, target: NodeId, value: NodeId },
    /// Placeholder for an absent but structurally required position.
    Empty,
}

impl Node {
    /// The ordered immediate children of the node. `None` generic
    /// argument placeholders are skipped.
    pub fn child_ids(&self) -> Vec<NodeId> {
        match self {
            Node::Body { statements } => statements.clone(),
            Node::Clause { predicate, body } => vec![*predicate, *body],
            Node::Condition { if_clause, elif_clauses, else_body } => {
                let mut ids = vec![*if_clause];
                ids.extend(elif_clauses.iter().copied());
                if let Some(body) = else_body {
                    ids.push(*body);
                }
                ids
            }
            Node::Def { return_type, name, parameters, body } => {
                let mut ids = vec![];
                if let Some(return_type) = return_type {
                    ids.push(*return_type);
                }
                ids.push(*name);
                ids.extend(parameters.iter().copied());
                ids.push(*body);
                ids
            }
            Node::Parameter { param_type, name } => vec![*param_type, *name],
            Node::Use { path } => vec![*path],
            Node::While { predicate, body } => vec![*predicate, *body],
            Node::For { init, condition, increment, body } => {
                vec![*init, *condition, *increment, *body]
            }
            Node::Foreach { item, iterable, body } => vec![*item, *iterable, *body],
            Node::Break | Node::Continue => vec![],
            Node::Return { value } => value.iter().copied().collect(),
            Node::Member { .. } => vec![],
            Node::MemberAccess { target, member } => vec![*target, *member],
            Node::Call { callee, arguments } => {
                let mut ids = vec![*callee];
                ids.extend(arguments.iter().copied());
                ids
            }
            Node::Indexer { target, arguments } => {
                let mut ids = vec![*target];
                ids.extend(arguments.iter().copied());
                ids
            }
            Node::ConstructorCall { type_ref, arguments } => {
                let mut ids = vec![*type_ref];
                ids.extend(arguments.iter().copied());
                ids
            }
            Node::Cast { type_ref, operand } => vec![*type_ref, *operand],
            Node::TypeRef { name, arguments } => {
                let mut ids = vec![*name];
                ids.extend(arguments.iter().flatten().copied());
                ids
            }
            Node::VariableDef { var_type, name } => {
                let mut ids = vec![];
                if let Some(var_type) = var_type {
                    ids.push(*var_type);
                }
                ids.push(*name);
                ids
            }
            Node::Literal { .. } => vec![],
            Node::Unary { operand, .. } => vec![*operand],
            Node::Binary { left, right, .. } => vec![*left, *right],
            Node::Assign { target, value, .. } => vec![*target, *value],
            Node::Empty => vec![],
        }
    }

    /// Compares everything about two nodes except their children: the
    /// variant, scalar payloads, and the shape of optional slots. Child
    /// subtrees are compared by `NodeArena::structural_eq`, which pairs
    /// this with a recursive walk.
    pub fn same_head(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Body { statements: a }, Node::Body { statements: b }) => a.len() == b.len(),
            (Node::Clause { .. }, Node::Clause { .. }) => true,
            (
                Node::Condition { elif_clauses: ea, else_body: ba, .. },
                Node::Condition { elif_clauses: eb, else_body: bb, .. },
            ) => ea.len() == eb.len() && ba.is_some() == bb.is_some(),
            (
                Node::Def { return_type: ra, parameters: pa, .. },
                Node::Def { return_type: rb, parameters: pb, .. },
            ) => ra.is_some() == rb.is_some() && pa.len() == pb.len(),
            (Node::Parameter { .. }, Node::Parameter { .. }) => true,
            (Node::Use { .. }, Node::Use { .. }) => true,
            (Node::While { .. }, Node::While { .. }) => true,
            (Node::For { .. }, Node::For { .. }) => true,
            (Node::Foreach { .. }, Node::Foreach { .. }) => true,
            (Node::Break, Node::Break) => true,
            (Node::Continue, Node::Continue) => true,
            (Node::Return { value: a }, Node::Return { value: b }) => {
                a.is_some() == b.is_some()
            }
            (Node::Member { name: a }, Node::Member { name: b }) => a == b,
            (Node::MemberAccess { .. }, Node::MemberAccess { .. }) => true,
            (Node::Call { arguments: a, .. }, Node::Call { arguments: b, .. }) => {
                a.len() == b.len()
            }
            (Node::Indexer { arguments: a, .. }, Node::Indexer { arguments: b, .. }) => {
                a.len() == b.len()
            }
            (
                Node::ConstructorCall { arguments: a, .. },
                Node::ConstructorCall { arguments: b, .. },
            ) => a.len() == b.len(),
            (Node::Cast { .. }, Node::Cast { .. }) => true,
            (Node::TypeRef { arguments: a, .. }, Node::TypeRef { arguments: b, .. }) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.is_some() == y.is_some())
            }
            (
                Node::VariableDef { var_type: a, .. },
                Node::VariableDef { var_type: b, .. },
            ) => a.is_some() == b.is_some(),
            (Node::Literal { value: a }, Node::Literal { value: b }) => a == b,
            (Node::Unary { op: a, .. }, Node::Unary { op: b, .. }) => a == b,
            (Node::Binary { op: a, .. }, Node::Binary { op: b, .. }) => a == b,
            (Node::Assign { op: a, .. }, Node::Assign { op: b, .. }) => a == b,
            (Node::Empty, Node::Empty) => true,
            _ => false,
        }
    }
}
