//! Native Rust AST node types shared by every SQL dialect.
//!
//! Dialect adapters translate their own parse trees into these types. Child
//! nodes are always stored as [`Node`] (optional children as `Option<Node>`,
//! sequences as `Vec<Node>`) so that the traversal engines can visit and
//! replace any child without knowing its concrete type.

use serde::Serialize;

/// A statement as produced by a dialect adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statement {
    pub raw: RawStmt,
}

/// One statement and the byte span it covers in the query file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawStmt {
    /// Root of the statement's tree
    pub stmt: Node,
    /// Byte offset in source where statement starts
    pub stmt_location: i32,
    /// Length of statement in bytes (0 means "rest of string")
    pub stmt_len: i32,
}

/// Every construct a dialect adapter can hand to the compiler.
///
/// Adding a variant requires adding a row to the child table in
/// `children.rs`; both traversal engines match exhaustively on this enum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Node {
    // Literals
    Integer(Integer),
    Float(Float),
    Boolean(Boolean),
    String(StringValue),
    BitString(BitString),
    #[default]
    Null,

    List(List),
    RawStmt(Box<RawStmt>),

    // Queries
    SelectStmt(Box<SelectStmt>),
    InsertStmt(Box<InsertStmt>),
    UpdateStmt(Box<UpdateStmt>),
    DeleteStmt(Box<DeleteStmt>),
    MergeStmt(Box<MergeStmt>),
    CallStmt(Box<CallStmt>),

    // DDL the catalog applies
    CreateTableStmt(Box<CreateTableStmt>),
    AlterTableStmt(Box<AlterTableStmt>),
    AlterTableCmd(Box<AlterTableCmd>),
    AlterTableSetSchemaStmt(Box<AlterTableSetSchemaStmt>),
    DropTableStmt(Box<DropTableStmt>),
    RenameTableStmt(Box<RenameTableStmt>),
    RenameColumnStmt(Box<RenameColumnStmt>),
    CreateEnumStmt(Box<CreateEnumStmt>),
    CompositeTypeStmt(Box<CompositeTypeStmt>),
    AlterTypeAddValueStmt(Box<AlterTypeAddValueStmt>),
    AlterTypeRenameValueStmt(Box<AlterTypeRenameValueStmt>),
    AlterTypeSetSchemaStmt(Box<AlterTypeSetSchemaStmt>),
    RenameTypeStmt(Box<RenameTypeStmt>),
    DropTypeStmt(Box<DropTypeStmt>),
    CreateSchemaStmt(Box<CreateSchemaStmt>),
    DropSchemaStmt(Box<DropSchemaStmt>),
    CreateFunctionStmt(Box<CreateFunctionStmt>),
    FuncParam(Box<FuncParam>),
    DropFunctionStmt(Box<DropFunctionStmt>),
    FuncSpec(Box<FuncSpec>),
    CreateExtensionStmt(Box<CreateExtensionStmt>),
    CommentOnTableStmt(Box<CommentOnTableStmt>),
    CommentOnColumnStmt(Box<CommentOnColumnStmt>),
    CommentOnSchemaStmt(Box<CommentOnSchemaStmt>),
    CommentOnTypeStmt(Box<CommentOnTypeStmt>),
    CommentOnViewStmt(Box<CommentOnViewStmt>),
    CreateTableAsStmt(Box<CreateTableAsStmt>),
    ViewStmt(Box<ViewStmt>),

    // DDL the catalog ignores
    IndexStmt(Box<IndexStmt>),
    TruncateStmt(Box<TruncateStmt>),
    CreateSeqStmt(Box<CreateSeqStmt>),
    AlterSeqStmt(Box<AlterSeqStmt>),
    CreateTrigStmt(Box<CreateTrigStmt>),
    RuleStmt(Box<RuleStmt>),
    CreateDomainStmt(Box<CreateDomainStmt>),
    RefreshMatViewStmt(Box<RefreshMatViewStmt>),
    DropStmt(Box<DropStmt>),

    TransactionStmt(Box<TransactionStmt>),

    // Expressions
    AExpr(Box<AExpr>),
    BetweenExpr(Box<BetweenExpr>),
    In(Box<In>),
    ColumnRef(Box<ColumnRef>),
    ParamRef(Box<ParamRef>),
    AConst(Box<AConst>),
    TypeCast(Box<TypeCast>),
    CollateClause(Box<CollateClause>),
    FuncCall(Box<FuncCall>),
    NamedArgExpr(Box<NamedArgExpr>),
    AStar(AStar),
    AIndices(Box<AIndices>),
    AIndirection(Box<AIndirection>),
    AArrayExpr(Box<AArrayExpr>),
    SubLink(Box<SubLink>),
    BoolExpr(Box<BoolExpr>),
    NullTest(Box<NullTest>),
    BooleanTest(Box<BooleanTest>),
    CaseExpr(Box<CaseExpr>),
    CaseWhen(Box<CaseWhen>),
    CoalesceExpr(Box<CoalesceExpr>),
    MinMaxExpr(Box<MinMaxExpr>),
    RowExpr(Box<RowExpr>),
    MultiAssignRef(Box<MultiAssignRef>),

    ResTarget(Box<ResTarget>),

    // FROM items
    RangeVar(Box<RangeVar>),
    RangeSubselect(Box<RangeSubselect>),
    RangeFunction(Box<RangeFunction>),
    JoinExpr(Box<JoinExpr>),

    // Clauses
    SortBy(Box<SortBy>),
    WindowDef(Box<WindowDef>),
    WithClause(Box<WithClause>),
    CommonTableExpr(Box<CommonTableExpr>),
    IntoClause(Box<IntoClause>),
    OnConflictClause(Box<OnConflictClause>),
    InferClause(Box<InferClause>),
    LockingClause(Box<LockingClause>),
    GroupingSet(Box<GroupingSet>),
    MergeWhenClause(Box<MergeWhenClause>),

    TypeName(Box<TypeName>),
    ColumnDef(Box<ColumnDef>),
    Constraint(Box<Constraint>),
    DefElem(Box<DefElem>),
    IndexElem(Box<IndexElem>),

    Alias(Box<Alias>),
    RoleSpec(Box<RoleSpec>),

    SortGroupClause(Box<SortGroupClause>),
    AccessPriv(Box<AccessPriv>),
    ObjectWithArgs(Box<ObjectWithArgs>),

    // Session, utility and notification statements
    VariableSetStmt(Box<VariableSetStmt>),
    VariableShowStmt(Box<VariableShowStmt>),
    ExplainStmt(Box<ExplainStmt>),
    CopyStmt(Box<CopyStmt>),
    GrantStmt(Box<GrantStmt>),
    GrantRoleStmt(Box<GrantRoleStmt>),
    LockStmt(Box<LockStmt>),
    VacuumStmt(Box<VacuumStmt>),

    DoStmt(Box<DoStmt>),
    NotifyStmt(Box<NotifyStmt>),
    ListenStmt(Box<ListenStmt>),
    UnlistenStmt(Box<UnlistenStmt>),
    CheckPointStmt(CheckPointStmt),
    DiscardStmt(Box<DiscardStmt>),
    PrepareStmt(Box<PrepareStmt>),
    ExecuteStmt(Box<ExecuteStmt>),
    DeallocateStmt(Box<DeallocateStmt>),
    ClosePortalStmt(Box<ClosePortalStmt>),
    FetchStmt(Box<FetchStmt>),

    // Placeholder emitted by adapters for constructs they cannot translate
    Todo,
}

// Literal values.

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Integer {
    pub ival: i64,
}

/// Kept as text so no precision is lost before code generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Float {
    pub fval: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Boolean {
    pub boolval: bool,
}

/// A string literal or an identifier part.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StringValue {
    pub sval: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BitString {
    pub bsval: String,
}

/// The `*` of `SELECT *` or `t.*`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AStar;

/// An ordered sequence of nodes; insertion order is significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct List {
    pub items: Vec<Node>,
}

// Names.

/// A possibly schema-qualified relation name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TableName {
    pub catalog: String,
    pub schema: String,
    pub name: String,
}

/// A possibly schema-qualified function name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FuncName {
    pub catalog: String,
    pub schema: String,
    pub name: String,
}

// Queries.

/// A query, or a set operation over two queries when `op` is not `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectStmt {
    pub distinct_clause: Vec<Node>,
    pub into_clause: Option<Node>,
    pub target_list: Vec<Node>,
    pub from_clause: Vec<Node>,
    pub where_clause: Option<Node>,
    pub group_clause: Vec<Node>,
    pub group_distinct: bool,
    pub having_clause: Option<Node>,
    pub window_clause: Vec<Node>,
    pub values_lists: Vec<Node>,
    pub sort_clause: Vec<Node>,
    pub limit_offset: Option<Node>,
    pub limit_count: Option<Node>,
    pub limit_option: LimitOption,
    pub locking_clause: Vec<Node>,
    pub with_clause: Option<Node>,
    pub op: SetOperation,
    pub all: bool,
    pub larg: Option<Node>,
    pub rarg: Option<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsertStmt {
    pub relation: Option<Node>,
    pub cols: Vec<Node>,
    pub select_stmt: Option<Node>,
    pub on_conflict_clause: Option<Node>,
    pub returning_list: Vec<Node>,
    pub with_clause: Option<Node>,
    pub override_: OverridingKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateStmt {
    pub relation: Option<Node>,
    pub target_list: Vec<Node>,
    pub where_clause: Option<Node>,
    pub from_clause: Vec<Node>,
    pub limit_count: Option<Node>,
    pub returning_list: Vec<Node>,
    pub with_clause: Option<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteStmt {
    pub relation: Option<Node>,
    pub using_clause: Vec<Node>,
    pub where_clause: Option<Node>,
    pub limit_count: Option<Node>,
    pub returning_list: Vec<Node>,
    pub with_clause: Option<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeStmt {
    pub relation: Option<Node>,
    pub source_relation: Option<Node>,
    pub join_condition: Option<Node>,
    pub merge_when_clauses: Vec<Node>,
    pub with_clause: Option<Node>,
}

/// CALL statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallStmt {
    pub func_call: Option<Node>,
}

// Statements that change the catalog.

/// Adds a table to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTableStmt {
    pub if_not_exists: bool,
    pub name: TableName,
    pub cols: Vec<Node>,
    /// `CREATE TABLE t (LIKE other)`: copy the columns of `other`
    pub refer_table: Option<TableName>,
    pub inherits: Vec<TableName>,
    /// Table-level constraints such as `PRIMARY KEY (a, b)`
    pub constraints: Vec<Node>,
    pub comment: String,
}

/// A batch of column changes against one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableStmt {
    pub table: TableName,
    pub cmds: Vec<Node>,
    pub missing_ok: bool,
}

/// ALTER TABLE sub-command
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableCmd {
    pub subtype: AlterTableType,
    /// Column the command applies to
    pub name: Option<String>,
    /// Column definition for ADD COLUMN / ALTER COLUMN TYPE
    pub def: Option<Node>,
    pub behavior: DropBehavior,
    pub missing_ok: bool,
}

/// ALTER TABLE ... SET SCHEMA
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableSetSchemaStmt {
    pub table: TableName,
    pub new_schema: String,
    pub missing_ok: bool,
}

/// DROP TABLE statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropTableStmt {
    pub if_exists: bool,
    pub tables: Vec<TableName>,
}

/// ALTER TABLE ... RENAME TO
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenameTableStmt {
    pub table: TableName,
    pub new_name: String,
    pub missing_ok: bool,
}

/// ALTER TABLE ... RENAME COLUMN
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenameColumnStmt {
    pub table: TableName,
    pub col: String,
    pub new_name: String,
    pub missing_ok: bool,
}

/// CREATE TYPE ... AS ENUM
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateEnumStmt {
    pub type_name: TypeName,
    pub vals: Vec<Node>,
}

/// CREATE TYPE ... AS (composite)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositeTypeStmt {
    pub type_name: TypeName,
    pub cols: Vec<Node>,
}

/// ALTER TYPE ... ADD VALUE
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTypeAddValueStmt {
    pub type_name: TypeName,
    pub new_value: String,
    pub new_val_neighbor: Option<String>,
    pub new_val_is_after: bool,
    pub skip_if_new_val_exists: bool,
}

/// ALTER TYPE ... RENAME VALUE
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTypeRenameValueStmt {
    pub type_name: TypeName,
    pub old_value: String,
    pub new_value: String,
}

/// ALTER TYPE ... SET SCHEMA
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTypeSetSchemaStmt {
    pub type_name: TypeName,
    pub new_schema: String,
}

/// ALTER TYPE ... RENAME TO
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenameTypeStmt {
    pub type_name: TypeName,
    pub new_name: String,
}

/// DROP TYPE statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropTypeStmt {
    pub if_exists: bool,
    pub types: Vec<TypeName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSchemaStmt {
    pub name: String,
    pub authrole: Option<Node>,
    pub schema_elts: Vec<Node>,
    pub if_not_exists: bool,
}

/// DROP SCHEMA statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropSchemaStmt {
    pub schemas: Vec<String>,
    pub missing_ok: bool,
}

/// CREATE FUNCTION / CREATE PROCEDURE statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateFunctionStmt {
    pub replace: bool,
    pub is_procedure: bool,
    pub func: FuncName,
    pub params: Vec<Node>,
    pub return_type: Option<Node>,
    pub options: Vec<Node>,
    pub sql_body: Option<Node>,
}

/// Function parameter declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuncParam {
    pub name: Option<String>,
    pub arg_type: Option<Node>,
    pub def_expr: Option<Node>,
    pub mode: FuncParamMode,
}

/// DROP FUNCTION statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropFunctionStmt {
    pub funcs: Vec<Node>,
    pub missing_ok: bool,
}

/// One function named by DROP FUNCTION
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuncSpec {
    pub name: FuncName,
    pub args: Vec<Node>,
    pub has_args: bool,
}

/// CREATE EXTENSION statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateExtensionStmt {
    pub extname: String,
    pub if_not_exists: bool,
    pub options: Vec<Node>,
}

/// COMMENT ON TABLE
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommentOnTableStmt {
    pub table: TableName,
    pub comment: Option<String>,
}

/// COMMENT ON COLUMN
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommentOnColumnStmt {
    pub table: TableName,
    pub col: String,
    pub comment: Option<String>,
}

/// COMMENT ON SCHEMA
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommentOnSchemaStmt {
    pub schema: String,
    pub comment: Option<String>,
}

/// COMMENT ON TYPE
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommentOnTypeStmt {
    pub type_name: TypeName,
    pub comment: Option<String>,
}

/// COMMENT ON VIEW
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommentOnViewStmt {
    pub view: TableName,
    pub comment: Option<String>,
}

/// Creates a table shaped like a query's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTableAsStmt {
    pub query: Option<Node>,
    pub into: Option<Node>,
    pub objtype: ObjectType,
    pub is_select_into: bool,
    pub if_not_exists: bool,
}

/// Views are tables in the catalog, with columns from their query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewStmt {
    pub view: Option<Node>,
    pub aliases: Vec<Node>,
    pub query: Option<Node>,
    pub replace: bool,
    pub options: Vec<Node>,
    pub with_check_option: ViewCheckOption,
}

// DDL the catalog ignores.

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexStmt {
    pub idxname: String,
    pub relation: Option<Node>,
    pub access_method: String,
    pub index_params: Vec<Node>,
    pub index_including_params: Vec<Node>,
    pub options: Vec<Node>,
    pub where_clause: Option<Node>,
    pub unique: bool,
    pub primary: bool,
    pub concurrent: bool,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TruncateStmt {
    pub relations: Vec<Node>,
    pub restart_seqs: bool,
    pub behavior: DropBehavior,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSeqStmt {
    pub sequence: Option<Node>,
    pub options: Vec<Node>,
    pub for_identity: bool,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterSeqStmt {
    pub sequence: Option<Node>,
    pub options: Vec<Node>,
    pub for_identity: bool,
    pub missing_ok: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTrigStmt {
    pub replace: bool,
    pub isconstraint: bool,
    pub trigname: String,
    pub relation: Option<Node>,
    pub funcname: Vec<Node>,
    pub args: Vec<Node>,
    pub row: bool,
    pub timing: i32,
    pub events: i32,
    pub columns: Vec<Node>,
    pub when_clause: Option<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleStmt {
    pub relation: Option<Node>,
    pub rulename: String,
    pub where_clause: Option<Node>,
    pub event: CmdType,
    pub instead: bool,
    pub actions: Vec<Node>,
    pub replace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDomainStmt {
    pub domainname: Vec<Node>,
    pub type_name: Option<Node>,
    pub coll_clause: Option<Node>,
    pub constraints: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshMatViewStmt {
    pub concurrent: bool,
    pub skip_data: bool,
    pub relation: Option<Node>,
}

/// Generic DROP statement for objects the catalog does not model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropStmt {
    pub objects: Vec<Node>,
    pub remove_type: ObjectType,
    pub behavior: DropBehavior,
    pub missing_ok: bool,
    pub concurrent: bool,
}

/// BEGIN, COMMIT and friends; the catalog ignores these.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionStmt {
    pub kind: TransactionStmtKind,
    pub options: Vec<Node>,
    pub savepoint_name: String,
    pub gid: String,
    pub chain: bool,
}

// Expressions.

/// An expression with an operator (e.g., "a + b", "x = 1", "@name")
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AExpr {
    pub kind: AExprKind,
    pub name: Vec<Node>,
    pub lexpr: Option<Node>,
    pub rexpr: Option<Node>,
    pub location: i32,
}

/// BETWEEN expression
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BetweenExpr {
    pub expr: Option<Node>,
    pub left: Option<Node>,
    pub right: Option<Node>,
    pub not: bool,
    pub location: i32,
}

/// `expr [NOT] IN (list)` or `expr [NOT] IN (subselect)`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct In {
    pub expr: Option<Node>,
    pub list: Vec<Node>,
    pub not: bool,
    pub sel: Option<Node>,
    pub location: i32,
}

/// `col`, `t.col` or `t.*`; `fields` holds one node per dotted part.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnRef {
    pub fields: Vec<Node>,
    pub location: i32,
}

/// Parameter reference ($1, $2, ?, etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamRef {
    /// Slot number; 0 for an unnumbered `?`
    pub number: i32,
    /// Whether the reference was written `$n`
    pub dollar: bool,
    pub location: i32,
}

/// A literal, with the location used for error reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AConst {
    pub val: Option<AConstValue>,
    pub isnull: bool,
    pub location: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AConstValue {
    Integer(Integer),
    Float(Float),
    Boolean(Boolean),
    String(StringValue),
    BitString(BitString),
}

/// `expr::type` or `CAST(expr AS type)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeCast {
    pub arg: Option<Node>,
    pub type_name: Option<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollateClause {
    pub arg: Option<Node>,
    pub collname: Vec<Node>,
    pub location: i32,
}

/// A call to a builtin, a user function, or one of the `sqlc.*` markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuncCall {
    pub func: FuncName,
    pub args: Vec<Node>,
    pub agg_order: Vec<Node>,
    pub agg_filter: Option<Node>,
    pub over: Option<Node>,
    pub agg_within_group: bool,
    pub agg_star: bool,
    pub agg_distinct: bool,
    pub func_variadic: bool,
    pub location: i32,
}

/// Named argument in a function call (`name => value`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamedArgExpr {
    pub name: Option<String>,
    pub arg: Option<Node>,
    pub argnumber: i32,
    pub location: i32,
}

/// `[i]` or `[lo:hi]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AIndices {
    pub is_slice: bool,
    pub lidx: Option<Node>,
    pub uidx: Option<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AIndirection {
    pub arg: Option<Node>,
    pub indirection: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AArrayExpr {
    pub elements: Vec<Node>,
    pub location: i32,
}

/// A subquery used as an expression: `EXISTS (...)`, `x IN (...)` and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubLink {
    pub sub_link_type: SubLinkType,
    pub sub_link_id: i32,
    pub testexpr: Option<Node>,
    pub oper_name: Vec<Node>,
    pub subselect: Option<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolExpr {
    pub boolop: BoolExprType,
    pub args: Vec<Node>,
    pub location: i32,
}

/// `IS NULL` / `IS NOT NULL`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NullTest {
    pub arg: Option<Node>,
    pub nulltesttype: NullTestType,
    pub argisrow: bool,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanTest {
    pub arg: Option<Node>,
    pub booltesttype: BoolTestType,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseExpr {
    pub arg: Option<Node>,
    pub args: Vec<Node>,
    pub defresult: Option<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseWhen {
    pub expr: Option<Node>,
    pub result: Option<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoalesceExpr {
    pub args: Vec<Node>,
    pub location: i32,
}

/// `GREATEST(...)` or `LEAST(...)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MinMaxExpr {
    pub op: MinMaxOp,
    pub args: Vec<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowExpr {
    pub args: Vec<Node>,
    pub row_format: CoercionForm,
    pub colnames: Vec<Node>,
    pub location: i32,
}

/// One column of `SET (a, b) = (...)`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiAssignRef {
    pub source: Option<Node>,
    pub colno: i32,
    pub ncolumns: i32,
}

/// One output column of a SELECT, or one `SET col = val` of an UPDATE.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResTarget {
    pub name: Option<String>,
    pub indirection: Vec<Node>,
    pub val: Option<Node>,
    pub location: i32,
}

// FROM items.

/// A table named in FROM, INSERT INTO, UPDATE and similar positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeVar {
    pub catalogname: String,
    pub schemaname: String,
    pub relname: String,
    pub inh: bool,
    pub relpersistence: String,
    pub alias: Option<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeSubselect {
    pub lateral: bool,
    pub subquery: Option<Node>,
    pub alias: Option<Node>,
}

/// A set-returning function used as a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeFunction {
    pub lateral: bool,
    pub ordinality: bool,
    pub is_rowsfrom: bool,
    pub functions: Vec<Node>,
    pub alias: Option<Node>,
    pub coldeflist: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinExpr {
    pub jointype: JoinType,
    pub is_natural: bool,
    pub larg: Option<Node>,
    pub rarg: Option<Node>,
    pub using_clause: Vec<Node>,
    pub quals: Option<Node>,
    pub alias: Option<Node>,
    pub rtindex: i32,
}

// Clauses.

/// One `ORDER BY` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SortBy {
    pub node: Option<Node>,
    pub sortby_dir: SortByDir,
    pub sortby_nulls: SortByNulls,
    pub use_op: Vec<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowDef {
    pub name: String,
    pub refname: String,
    pub partition_clause: Vec<Node>,
    pub order_clause: Vec<Node>,
    pub frame_options: i32,
    pub start_offset: Option<Node>,
    pub end_offset: Option<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WithClause {
    pub ctes: Vec<Node>,
    pub recursive: bool,
    pub location: i32,
}

/// One named query of a WITH clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonTableExpr {
    pub ctename: String,
    pub aliascolnames: Vec<Node>,
    pub ctematerialized: CTEMaterialize,
    pub ctequery: Option<Node>,
    pub location: i32,
    pub cterecursive: bool,
    pub cterefcount: i32,
}

/// INTO clause for SELECT INTO / CREATE TABLE AS
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntoClause {
    pub rel: Option<Node>,
    pub col_names: Vec<Node>,
    pub options: Vec<Node>,
    pub on_commit: OnCommitAction,
    pub table_space_name: String,
    pub view_query: Option<Node>,
    pub skip_data: bool,
}

/// The upsert part of an INSERT.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OnConflictClause {
    pub action: OnConflictAction,
    pub infer: Option<Node>,
    pub target_list: Vec<Node>,
    pub where_clause: Option<Node>,
    pub location: i32,
}

/// Conflict target of ON CONFLICT
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InferClause {
    pub index_elems: Vec<Node>,
    pub where_clause: Option<Node>,
    pub conname: String,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LockingClause {
    pub locked_rels: Vec<Node>,
    pub strength: LockClauseStrength,
    pub wait_policy: LockWaitPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupingSet {
    pub kind: GroupingSetKind,
    pub content: Vec<Node>,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeWhenClause {
    pub matched: bool,
    pub command_type: CmdType,
    pub override_: OverridingKind,
    pub condition: Option<Node>,
    pub target_list: Vec<Node>,
    pub values: Vec<Node>,
}

// Types and column definitions.

/// A possibly qualified type, with array bounds and modifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeName {
    pub catalog: String,
    pub schema: String,
    pub name: String,
    pub names: Vec<Node>,
    pub setof: bool,
    pub pct_type: bool,
    pub typmods: Vec<Node>,
    pub array_bounds: Vec<Node>,
    pub location: i32,
}

/// A column in CREATE TABLE or ALTER TABLE ADD COLUMN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnDef {
    pub colname: String,
    pub type_name: Option<Node>,
    pub is_not_null: bool,
    pub is_unsigned: bool,
    pub is_array: bool,
    pub array_dims: i32,
    /// Inline enum values (MySQL `ENUM('a', 'b')`)
    pub vals: Vec<Node>,
    pub length: Option<i32>,
    pub primary_key: bool,
    pub comment: String,
    pub raw_default: Option<Node>,
    pub coll_clause: Option<Node>,
    pub constraints: Vec<Node>,
    pub location: i32,
}

/// A column or table constraint. Only NOT NULL and PRIMARY KEY matter to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraint {
    pub contype: ConstrType,
    pub conname: String,
    pub deferrable: bool,
    pub initdeferred: bool,
    pub location: i32,
    pub raw_expr: Option<Node>,
    pub keys: Vec<Node>,
    pub including: Vec<Node>,
    pub exclusions: Vec<Node>,
    pub options: Vec<Node>,
    pub indexname: String,
    pub where_clause: Option<Node>,
    pub pktable: Option<Node>,
    pub fk_attrs: Vec<Node>,
    pub pk_attrs: Vec<Node>,
    pub fk_matchtype: String,
    pub fk_upd_action: String,
    pub fk_del_action: String,
    pub skip_validation: bool,
    pub initially_valid: bool,
}

/// A `name = value` option.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefElem {
    pub defnamespace: String,
    pub defname: String,
    pub arg: Option<Node>,
    pub defaction: DefElemAction,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexElem {
    pub name: String,
    pub expr: Option<Node>,
    pub indexcolname: String,
    pub collation: Vec<Node>,
    pub opclass: Vec<Node>,
    pub ordering: SortByDir,
    pub nulls_ordering: SortByNulls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alias {
    pub aliasname: String,
    pub colnames: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleSpec {
    pub roletype: RoleSpecType,
    pub rolename: String,
    pub location: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SortGroupClause {
    pub tle_sort_group_ref: u32,
    pub nulls_first: bool,
    pub hashable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccessPriv {
    pub priv_name: String,
    pub cols: Vec<Node>,
}

/// A function or operator named together with its argument types.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectWithArgs {
    pub objname: Vec<Node>,
    pub objargs: Vec<Node>,
    pub args_unspecified: bool,
}

// Session and administrative statements.

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariableSetStmt {
    pub kind: VariableSetKind,
    pub name: String,
    pub args: Vec<Node>,
    pub is_local: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariableShowStmt {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplainStmt {
    pub query: Option<Node>,
    pub options: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CopyStmt {
    pub relation: Option<Node>,
    pub query: Option<Node>,
    pub attlist: Vec<Node>,
    pub is_from: bool,
    pub is_program: bool,
    pub filename: String,
    pub options: Vec<Node>,
    pub where_clause: Option<Node>,
}

/// GRANT, or REVOKE when `is_grant` is false.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrantStmt {
    pub is_grant: bool,
    pub targtype: GrantTargetType,
    pub objtype: ObjectType,
    pub objects: Vec<Node>,
    pub privileges: Vec<Node>,
    pub grantees: Vec<Node>,
    pub grant_option: bool,
    pub grantor: Option<Node>,
    pub behavior: DropBehavior,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrantRoleStmt {
    pub granted_roles: Vec<Node>,
    pub grantee_roles: Vec<Node>,
    pub is_grant: bool,
    pub opt: Vec<Node>,
    pub grantor: Option<Node>,
    pub behavior: DropBehavior,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LockStmt {
    pub relations: Vec<Node>,
    pub mode: i32,
    pub nowait: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VacuumStmt {
    pub options: Vec<Node>,
    pub rels: Vec<Node>,
    pub is_vacuumcmd: bool,
}

/// An anonymous code block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoStmt {
    pub args: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotifyStmt {
    pub conditionname: String,
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListenStmt {
    pub conditionname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnlistenStmt {
    pub conditionname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckPointStmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscardStmt {
    pub target: DiscardMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrepareStmt {
    pub name: String,
    pub argtypes: Vec<Node>,
    pub query: Option<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecuteStmt {
    pub name: String,
    pub params: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeallocateStmt {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClosePortalStmt {
    pub portalname: String,
}

/// FETCH, or MOVE when `ismove` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchStmt {
    pub direction: FetchDirection,
    pub how_many: i64,
    pub portalname: String,
    pub ismove: bool,
}

// Enumerations.

/// How a SelectStmt combines its two arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SetOperation {
    #[default]
    None,
    Union,
    Intersect,
    Except,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LimitOption {
    #[default]
    Default,
    Count,
    WithTies,
}

/// Which operator family an [`AExpr`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AExprKind {
    #[default]
    Op,
    OpAny,
    OpAll,
    Distinct,
    NotDistinct,
    NullIf,
    In,
    Like,
    ILike,
    Similar,
    Between,
    NotBetween,
    BetweenSym,
    NotBetweenSym,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BoolExprType {
    #[default]
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SubLinkType {
    #[default]
    Exists,
    All,
    Any,
    RowCompare,
    Expr,
    MultiExpr,
    Array,
    Cte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NullTestType {
    #[default]
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BoolTestType {
    #[default]
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,
    IsUnknown,
    IsNotUnknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MinMaxOp {
    #[default]
    Greatest,
    Least,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Full,
    Right,
    Semi,
    Anti,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortByDir {
    #[default]
    Default,
    Asc,
    Desc,
    Using,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortByNulls {
    #[default]
    Default,
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CTEMaterialize {
    #[default]
    Default,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OnCommitAction {
    #[default]
    Noop,
    PreserveRows,
    DeleteRows,
    Drop,
}

/// The kind of object a DROP or COMMENT names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ObjectType {
    #[default]
    Table,
    Index,
    Sequence,
    View,
    MatView,
    Type,
    Schema,
    Function,
    Procedure,
    Aggregate,
    Trigger,
    Rule,
    Database,
    Role,
    Extension,
    ForeignTable,
    Policy,
    Collation,
    Domain,
    Constraint,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DropBehavior {
    #[default]
    Restrict,
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OnConflictAction {
    #[default]
    None,
    Nothing,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GroupingSetKind {
    #[default]
    Empty,
    Simple,
    Rollup,
    Cube,
    Sets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CmdType {
    #[default]
    Unknown,
    Select,
    Update,
    Insert,
    Delete,
    Merge,
    Utility,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TransactionStmtKind {
    #[default]
    Begin,
    Start,
    Commit,
    Rollback,
    Savepoint,
    Release,
    RollbackTo,
    Prepare,
    CommitPrepared,
    RollbackPrepared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ConstrType {
    #[default]
    Null,
    NotNull,
    Default,
    Identity,
    Generated,
    Check,
    Primary,
    Unique,
    Exclusion,
    Foreign,
    AttrDeferrable,
    AttrNotDeferrable,
    AttrDeferred,
    AttrImmediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DefElemAction {
    #[default]
    Unspec,
    Set,
    Add,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RoleSpecType {
    #[default]
    CString,
    CurrentRole,
    CurrentUser,
    SessionUser,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CoercionForm {
    #[default]
    ExplicitCall,
    ExplicitCast,
    ImplicitCast,
    SqlSyntax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VariableSetKind {
    #[default]
    Value,
    Default,
    Current,
    Multi,
    Reset,
    ResetAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LockClauseStrength {
    #[default]
    None,
    ForKeyShare,
    ForShare,
    ForNoKeyUpdate,
    ForUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LockWaitPolicy {
    #[default]
    Block,
    Skip,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ViewCheckOption {
    #[default]
    NoCheckOption,
    Local,
    Cascaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DiscardMode {
    #[default]
    All,
    Plans,
    Sequences,
    Temp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FetchDirection {
    #[default]
    Forward,
    Backward,
    Absolute,
    Relative,
}

/// IN, OUT, INOUT, VARIADIC or TABLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FuncParamMode {
    In,
    Out,
    InOut,
    Variadic,
    Table,
    #[default]
    Default,
}

/// What an [`AlterTableCmd`] does to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlterTableType {
    #[default]
    AddColumn,
    AlterColumnType,
    ColumnDefault,
    DropColumn,
    DropNotNull,
    SetNotNull,
    DropExpression,
    SetStatistics,
    SetOptions,
    ResetOptions,
    SetStorage,
    SetCompression,
    AddIndex,
    AddConstraint,
    AlterConstraint,
    ValidateConstraint,
    DropConstraint,
    ClusterOn,
    DropCluster,
    SetLogged,
    SetUnLogged,
    SetTableSpace,
    SetRelOptions,
    ResetRelOptions,
    EnableTrig,
    DisableTrig,
    EnableRule,
    DisableRule,
    AddInherit,
    DropInherit,
    ReplicaIdentity,
    EnableRowSecurity,
    DisableRowSecurity,
    ForceRowSecurity,
    NoForceRowSecurity,
    AttachPartition,
    DetachPartition,
    AddIdentity,
    SetIdentity,
    DropIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GrantTargetType {
    #[default]
    Object,
    AllInSchema,
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OverridingKind {
    #[default]
    NotSet,
    UserValue,
    SystemValue,
}
