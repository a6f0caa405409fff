//! Conversions, constructors and accessors for native AST types.

use std::fmt;

use itertools::Itertools;

use crate::ast::nodes::*;
use crate::{Error, Result};

// ============================================================================
// From native types into Node
// ============================================================================

macro_rules! impl_from_boxed {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(v: $ty) -> Self {
                    Node::$ty(Box::new(v))
                }
            }
        )*
    };
}

impl_from_boxed!(
    RawStmt,
    SelectStmt,
    InsertStmt,
    UpdateStmt,
    DeleteStmt,
    MergeStmt,
    CallStmt,
    CreateTableStmt,
    AlterTableStmt,
    AlterTableCmd,
    AlterTableSetSchemaStmt,
    DropTableStmt,
    RenameTableStmt,
    RenameColumnStmt,
    CreateEnumStmt,
    CompositeTypeStmt,
    AlterTypeAddValueStmt,
    AlterTypeRenameValueStmt,
    AlterTypeSetSchemaStmt,
    RenameTypeStmt,
    DropTypeStmt,
    CreateSchemaStmt,
    DropSchemaStmt,
    CreateFunctionStmt,
    FuncParam,
    DropFunctionStmt,
    FuncSpec,
    CreateExtensionStmt,
    CommentOnTableStmt,
    CommentOnColumnStmt,
    CommentOnSchemaStmt,
    CommentOnTypeStmt,
    CommentOnViewStmt,
    CreateTableAsStmt,
    ViewStmt,
    IndexStmt,
    TruncateStmt,
    CreateSeqStmt,
    AlterSeqStmt,
    CreateTrigStmt,
    RuleStmt,
    CreateDomainStmt,
    RefreshMatViewStmt,
    DropStmt,
    TransactionStmt,
    AExpr,
    BetweenExpr,
    In,
    ColumnRef,
    ParamRef,
    AConst,
    TypeCast,
    CollateClause,
    FuncCall,
    NamedArgExpr,
    AIndices,
    AIndirection,
    AArrayExpr,
    SubLink,
    BoolExpr,
    NullTest,
    BooleanTest,
    CaseExpr,
    CaseWhen,
    CoalesceExpr,
    MinMaxExpr,
    RowExpr,
    MultiAssignRef,
    ResTarget,
    RangeVar,
    RangeSubselect,
    RangeFunction,
    JoinExpr,
    SortBy,
    WindowDef,
    WithClause,
    CommonTableExpr,
    IntoClause,
    OnConflictClause,
    InferClause,
    LockingClause,
    GroupingSet,
    MergeWhenClause,
    TypeName,
    ColumnDef,
    Constraint,
    DefElem,
    IndexElem,
    Alias,
    RoleSpec,
    SortGroupClause,
    AccessPriv,
    ObjectWithArgs,
    VariableSetStmt,
    VariableShowStmt,
    ExplainStmt,
    CopyStmt,
    GrantStmt,
    GrantRoleStmt,
    LockStmt,
    VacuumStmt,
    DoStmt,
    NotifyStmt,
    ListenStmt,
    UnlistenStmt,
    DiscardStmt,
    PrepareStmt,
    ExecuteStmt,
    DeallocateStmt,
    ClosePortalStmt,
    FetchStmt,
);

impl From<Integer> for Node {
    fn from(v: Integer) -> Self {
        Node::Integer(v)
    }
}

impl From<Float> for Node {
    fn from(v: Float) -> Self {
        Node::Float(v)
    }
}

impl From<Boolean> for Node {
    fn from(v: Boolean) -> Self {
        Node::Boolean(v)
    }
}

impl From<StringValue> for Node {
    fn from(v: StringValue) -> Self {
        Node::String(v)
    }
}

impl From<BitString> for Node {
    fn from(v: BitString) -> Self {
        Node::BitString(v)
    }
}

impl From<List> for Node {
    fn from(v: List) -> Self {
        Node::List(v)
    }
}

impl From<AStar> for Node {
    fn from(v: AStar) -> Self {
        Node::AStar(v)
    }
}

impl From<CheckPointStmt> for Node {
    fn from(v: CheckPointStmt) -> Self {
        Node::CheckPointStmt(v)
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Node {
    pub fn integer(ival: i64) -> Self {
        Node::Integer(Integer { ival })
    }

    pub fn string(sval: impl Into<String>) -> Self {
        Node::String(StringValue { sval: sval.into() })
    }

    pub fn list(items: Vec<Node>) -> Self {
        Node::List(List { items })
    }

    /// A column reference such as `t.col`, one string field per part.
    pub fn column_ref(parts: &[&str], location: i32) -> Self {
        Node::from(ColumnRef { fields: parts.iter().map(|p| Node::string(*p)).collect(), location })
    }

    pub fn range_var(schema: &str, relname: &str, location: i32) -> Self {
        Node::from(RangeVar {
            schemaname: schema.to_string(),
            relname: relname.to_string(),
            inh: true,
            location,
            ..Default::default()
        })
    }

    pub fn integer_const(ival: i64, location: i32) -> Self {
        Node::from(AConst { val: Some(AConstValue::Integer(Integer { ival })), isnull: false, location })
    }

    pub fn string_const(sval: &str, location: i32) -> Self {
        Node::from(AConst { val: Some(AConstValue::String(StringValue { sval: sval.to_string() })), isnull: false, location })
    }

    /// A `$n` parameter reference.
    pub fn param_ref(number: i32, location: i32) -> Self {
        Node::from(ParamRef { number, dollar: true, location })
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(&s.sval),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(l) => Some(&l.items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Byte offset of the node in its source text, for nodes that carry one.
    pub fn location(&self) -> Option<i32> {
        let location = match self {
            Node::RawStmt(n) => n.stmt_location,
            Node::AExpr(n) => n.location,
            Node::BetweenExpr(n) => n.location,
            Node::In(n) => n.location,
            Node::ColumnRef(n) => n.location,
            Node::ParamRef(n) => n.location,
            Node::AConst(n) => n.location,
            Node::TypeCast(n) => n.location,
            Node::CollateClause(n) => n.location,
            Node::FuncCall(n) => n.location,
            Node::NamedArgExpr(n) => n.location,
            Node::AArrayExpr(n) => n.location,
            Node::SubLink(n) => n.location,
            Node::BoolExpr(n) => n.location,
            Node::NullTest(n) => n.location,
            Node::BooleanTest(n) => n.location,
            Node::CaseExpr(n) => n.location,
            Node::CaseWhen(n) => n.location,
            Node::CoalesceExpr(n) => n.location,
            Node::MinMaxExpr(n) => n.location,
            Node::RowExpr(n) => n.location,
            Node::ResTarget(n) => n.location,
            Node::RangeVar(n) => n.location,
            Node::SortBy(n) => n.location,
            Node::WindowDef(n) => n.location,
            Node::WithClause(n) => n.location,
            Node::CommonTableExpr(n) => n.location,
            Node::OnConflictClause(n) => n.location,
            Node::InferClause(n) => n.location,
            Node::GroupingSet(n) => n.location,
            Node::TypeName(n) => n.location,
            Node::ColumnDef(n) => n.location,
            Node::Constraint(n) => n.location,
            Node::DefElem(n) => n.location,
            Node::RoleSpec(n) => n.location,
            _ => return None,
        };
        Some(location)
    }
}

impl Statement {
    pub fn new(stmt: Node, stmt_location: i32, stmt_len: i32) -> Self {
        Statement { raw: RawStmt { stmt, stmt_location, stmt_len } }
    }
}

impl AConst {
    /// The constant's text when it is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match &self.val {
            Some(AConstValue::String(s)) => Some(&s.sval),
            _ => None,
        }
    }
}

impl ColumnRef {
    /// The string parts of the reference; `*` and subscripts are skipped.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().filter_map(Node::as_str).collect()
    }
}

// ============================================================================
// Qualified names
// ============================================================================

impl TableName {
    pub fn new(schema: &str, name: &str) -> Self {
        TableName { catalog: String::new(), schema: schema.to_string(), name: name.to_string() }
    }

    /// Builds a name from one to three dotted parts.
    pub fn from_parts(parts: &[&str]) -> Option<Self> {
        match parts {
            [name] => Some(TableName::new("", name)),
            [schema, name] => Some(TableName::new(schema, name)),
            [catalog, schema, name] => Some(TableName { catalog: catalog.to_string(), ..TableName::new(schema, name) }),
            _ => None,
        }
    }
}

impl From<&RangeVar> for TableName {
    fn from(rv: &RangeVar) -> Self {
        TableName { catalog: rv.catalogname.clone(), schema: rv.schemaname.clone(), name: rv.relname.clone() }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&qualified(&self.catalog, &self.schema, &self.name))
    }
}

impl FuncName {
    pub fn new(schema: &str, name: &str) -> Self {
        FuncName { catalog: String::new(), schema: schema.to_string(), name: name.to_string() }
    }
}

impl fmt::Display for FuncName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&qualified(&self.catalog, &self.schema, &self.name))
    }
}

impl TypeName {
    pub fn new(schema: &str, name: &str) -> Self {
        TypeName { schema: schema.to_string(), name: name.to_string(), ..Default::default() }
    }

    /// Schema and name, taken from `names` when the dedicated fields are empty.
    pub fn schema_and_name(&self) -> (String, String) {
        if !self.name.is_empty() {
            return (self.schema.clone(), self.name.clone());
        }
        let parts: Vec<&str> = self.names.iter().filter_map(Node::as_str).collect();
        match parts.as_slice() {
            [] => (String::new(), String::new()),
            [name] => (String::new(), name.to_string()),
            [.., schema, name] => (schema.to_string(), name.to_string()),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (schema, name) = self.schema_and_name();
        f.write_str(&qualified(&self.catalog, &schema, &name))
    }
}

fn qualified(catalog: &str, schema: &str, name: &str) -> String {
    [catalog, schema, name].into_iter().filter(|p| !p.is_empty()).join(".")
}

/// Renders a tree as pretty-printed JSON, for debugging.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Statement(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names_skip_empty_parts() {
        assert_eq!(TableName::new("", "users").to_string(), "users");
        assert_eq!(TableName::from_parts(&["app", "users"]).unwrap().to_string(), "app.users");
        assert_eq!(TableName::from_parts(&["db", "app", "users"]).unwrap().catalog, "db");
        assert!(TableName::from_parts(&["a", "b", "c", "d"]).is_none());
        assert_eq!(FuncName::new("sqlc", "arg").to_string(), "sqlc.arg");
    }

    #[test]
    fn type_name_falls_back_to_names() {
        let tn = TypeName { names: vec![Node::string("pg_catalog"), Node::string("int4")], ..Default::default() };
        assert_eq!(tn.schema_and_name(), ("pg_catalog".to_string(), "int4".to_string()));
        assert_eq!(tn.to_string(), "pg_catalog.int4");
    }

    #[test]
    fn kinds_and_locations() {
        let node = Node::column_ref(&["u", "id"], 12);
        assert_eq!(node.kind(), "ColumnRef");
        assert_eq!(node.location(), Some(12));
        assert_eq!(Node::integer(1).location(), None);
        assert_eq!(Node::Null.kind(), "Null");
    }

    #[test]
    fn json_dump_names_variants() {
        let json = to_json(&Node::param_ref(1, 0)).unwrap();
        assert!(json.contains("\"ParamRef\""));
        assert!(json.contains("\"dollar\": true"));
    }
}
