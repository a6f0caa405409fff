//! The per-variant child table.
//!
//! Every [`Node`] variant is listed once, together with its child fields in
//! traversal order. The table expands into the child arms of both traversal
//! engines and into [`Node::kind`], so a variant missing from it is a compile
//! error rather than a runtime surprise.

use std::ops::ControlFlow;

use crate::ast::apply::Applier;
use crate::ast::nodes::*;

/// A field that holds zero or more child nodes.
pub(crate) trait Child {
    fn each<'ast>(&'ast self, f: &mut dyn FnMut(&'ast Node));

    fn apply(&mut self, parent: &'static str, name: &'static str, applier: &mut Applier<'_>) -> ControlFlow<()>;
}

impl Child for Node {
    fn each<'ast>(&'ast self, f: &mut dyn FnMut(&'ast Node)) {
        f(self)
    }

    fn apply(&mut self, parent: &'static str, name: &'static str, applier: &mut Applier<'_>) -> ControlFlow<()> {
        applier.apply_field(self, parent, name)
    }
}

impl Child for Option<Node> {
    fn each<'ast>(&'ast self, f: &mut dyn FnMut(&'ast Node)) {
        if let Some(node) = self {
            f(node)
        }
    }

    fn apply(&mut self, parent: &'static str, name: &'static str, applier: &mut Applier<'_>) -> ControlFlow<()> {
        match self {
            Some(node) => applier.apply_field(node, parent, name),
            None => ControlFlow::Continue(()),
        }
    }
}

impl Child for Vec<Node> {
    fn each<'ast>(&'ast self, f: &mut dyn FnMut(&'ast Node)) {
        for node in self {
            f(node)
        }
    }

    fn apply(&mut self, parent: &'static str, name: &'static str, applier: &mut Applier<'_>) -> ControlFlow<()> {
        applier.apply_list(self, parent, name)
    }
}

macro_rules! child_table {
    ($( $variant:ident [ $( $field:ident ),* ] ),* $(,)?) => {
        impl Node {
            /// Name of the variant, e.g. `"SelectStmt"`.
            pub fn kind(&self) -> &'static str {
                match self {
                    $( Node::$variant(_) => stringify!($variant), )*
                    Node::Null => "Null",
                    Node::Todo => "Todo",
                }
            }
        }

        #[allow(unused_variables)]
        pub(crate) fn each_child<'ast>(node: &'ast Node, f: &mut dyn FnMut(&'ast Node)) {
            match node {
                $( Node::$variant(n) => { $( Child::each(&n.$field, f); )* } )*
                Node::Null | Node::Todo => {}
            }
        }

        #[allow(unused_variables)]
        pub(crate) fn apply_children(node: &mut Node, applier: &mut Applier<'_>) -> ControlFlow<()> {
            let parent = node.kind();
            match node {
                $( Node::$variant(n) => { $( Child::apply(&mut n.$field, parent, stringify!($field), applier)?; )* } )*
                Node::Null | Node::Todo => {}
            }
            ControlFlow::Continue(())
        }
    };
}

child_table! {
    // Primitive value types
    Integer [],
    Float [],
    Boolean [],
    String [],
    BitString [],

    // Structural wrappers
    List [items],
    RawStmt [stmt],

    // Statement types
    SelectStmt [
        distinct_clause, into_clause, target_list, from_clause, where_clause, group_clause, having_clause,
        window_clause, values_lists, sort_clause, limit_offset, limit_count, locking_clause, with_clause, larg, rarg
    ],
    InsertStmt [relation, cols, select_stmt, on_conflict_clause, returning_list, with_clause],
    UpdateStmt [relation, target_list, where_clause, from_clause, limit_count, returning_list, with_clause],
    DeleteStmt [relation, using_clause, where_clause, limit_count, returning_list, with_clause],
    MergeStmt [relation, source_relation, join_condition, merge_when_clauses, with_clause],
    CallStmt [func_call],

    // Catalog-shaping DDL statements
    CreateTableStmt [cols, constraints],
    AlterTableStmt [cmds],
    AlterTableCmd [def],
    AlterTableSetSchemaStmt [],
    DropTableStmt [],
    RenameTableStmt [],
    RenameColumnStmt [],
    CreateEnumStmt [vals],
    CompositeTypeStmt [cols],
    AlterTypeAddValueStmt [],
    AlterTypeRenameValueStmt [],
    AlterTypeSetSchemaStmt [],
    RenameTypeStmt [],
    DropTypeStmt [],
    CreateSchemaStmt [authrole, schema_elts],
    DropSchemaStmt [],
    CreateFunctionStmt [params, return_type, options, sql_body],
    FuncParam [arg_type, def_expr],
    DropFunctionStmt [funcs],
    FuncSpec [args],
    CreateExtensionStmt [options],
    CommentOnTableStmt [],
    CommentOnColumnStmt [],
    CommentOnSchemaStmt [],
    CommentOnTypeStmt [],
    CommentOnViewStmt [],
    CreateTableAsStmt [query, into],
    ViewStmt [view, aliases, query, options],

    // Other DDL statements
    IndexStmt [relation, index_params, index_including_params, options, where_clause],
    TruncateStmt [relations],
    CreateSeqStmt [sequence, options],
    AlterSeqStmt [sequence, options],
    CreateTrigStmt [relation, funcname, args, columns, when_clause],
    RuleStmt [relation, where_clause, actions],
    CreateDomainStmt [domainname, type_name, coll_clause, constraints],
    RefreshMatViewStmt [relation],
    DropStmt [objects],
    TransactionStmt [options],

    // Expression types
    AExpr [name, lexpr, rexpr],
    BetweenExpr [expr, left, right],
    In [expr, list, sel],
    ColumnRef [fields],
    ParamRef [],
    AConst [],
    TypeCast [arg, type_name],
    CollateClause [arg, collname],
    FuncCall [args, agg_order, agg_filter, over],
    NamedArgExpr [arg],
    AStar [],
    AIndices [lidx, uidx],
    AIndirection [arg, indirection],
    AArrayExpr [elements],
    SubLink [testexpr, oper_name, subselect],
    BoolExpr [args],
    NullTest [arg],
    BooleanTest [arg],
    CaseExpr [arg, args, defresult],
    CaseWhen [expr, result],
    CoalesceExpr [args],
    MinMaxExpr [args],
    RowExpr [args, colnames],
    MultiAssignRef [source],

    // Target/Result types
    ResTarget [indirection, val],

    // Table/Range types
    RangeVar [alias],
    RangeSubselect [subquery, alias],
    RangeFunction [functions, alias, coldeflist],
    JoinExpr [larg, rarg, using_clause, quals, alias],

    // Clause types
    SortBy [node, use_op],
    WindowDef [partition_clause, order_clause, start_offset, end_offset],
    WithClause [ctes],
    CommonTableExpr [aliascolnames, ctequery],
    IntoClause [rel, col_names, options, view_query],
    OnConflictClause [infer, target_list, where_clause],
    InferClause [index_elems, where_clause],
    LockingClause [locked_rels],
    GroupingSet [content],
    MergeWhenClause [condition, target_list, values],

    // Type-related
    TypeName [names, typmods, array_bounds],
    ColumnDef [type_name, vals, raw_default, coll_clause, constraints],
    Constraint [raw_expr, keys, including, exclusions, options, where_clause, pktable, fk_attrs, pk_attrs],
    DefElem [arg],
    IndexElem [expr, collation, opclass],

    // Alias and role types
    Alias [colnames],
    RoleSpec [],

    // Other commonly used types
    SortGroupClause [],
    AccessPriv [cols],
    ObjectWithArgs [objname, objargs],

    // Administrative statements
    VariableSetStmt [args],
    VariableShowStmt [],
    ExplainStmt [query, options],
    CopyStmt [relation, query, attlist, options, where_clause],
    GrantStmt [objects, privileges, grantees, grantor],
    GrantRoleStmt [granted_roles, grantee_roles, opt, grantor],
    LockStmt [relations],
    VacuumStmt [options, rels],

    // Other statements
    DoStmt [args],
    NotifyStmt [],
    ListenStmt [],
    UnlistenStmt [],
    CheckPointStmt [],
    DiscardStmt [],
    PrepareStmt [argtypes, query],
    ExecuteStmt [params],
    DeallocateStmt [],
    ClosePortalStmt [],
    FetchStmt [],
}
