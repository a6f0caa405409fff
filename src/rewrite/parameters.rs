use std::collections::HashSet;

use tracing::trace;

use crate::ast::{apply, FuncCall, Node, ParamRef, RawStmt};
use crate::engine::Engine;
use crate::named::{is_param_call, is_param_sign, Param, ParamSet};
use crate::rewrite::flatten;
use crate::source::Edit;

/// Rewrites named-parameter markers into positional parameter references.
///
/// `used` holds the slots already taken by literal `$n` / `?` references and
/// `dollar` whether the statement numbers its parameters `$n`. Returns the
/// rewritten statement, the slot assignments, and the source edits that make
/// the query text match the rewritten tree. Edit locations are relative to
/// the start of the statement.
pub fn named_parameters(engine: Engine, raw: RawStmt, used: &HashSet<i32>, dollar: bool) -> (RawStmt, ParamSet, Vec<Edit>) {
    let mut params = ParamSet::new(used, engine.supports_named_reuse());
    let mut edits = vec![];
    let stmt_location = raw.stmt_location;

    let stmt = apply(
        raw.stmt,
        |cursor| {
            let rewritten = match cursor.node() {
                Node::FuncCall(call) if is_param_call(call) => {
                    let (param, old) = param_from_func_call(call);
                    Some((param, old, call.location))
                }
                Node::AExpr(expr) if is_param_sign(cursor.node()) => {
                    let (param_name, _) = match &expr.rexpr {
                        Some(Node::TypeCast(cast)) => flatten(cast.arg.as_slice()),
                        rexpr => flatten(rexpr.as_slice()),
                    };
                    let old = format!("@{param_name}");
                    Some((Param::new(&param_name), old, expr.location))
                }
                _ => None,
            };
            let Some((param, old, location)) = rewritten else {
                return true;
            };

            let argn = params.add(param.clone());
            let reference = Node::from(ParamRef { number: argn, dollar, location });
            let node = match cursor.node_mut() {
                Node::AExpr(expr) => match expr.rexpr.take() {
                    // `@name::type` keeps its cast around the new reference.
                    Some(Node::TypeCast(mut cast)) => {
                        cast.arg = Some(reference);
                        Node::TypeCast(cast)
                    }
                    _ => reference,
                },
                _ => reference,
            };
            cursor.replace(node);

            let new = placeholder(engine, dollar, argn, &param);
            trace!(param = %param.name, slot = argn, replacement = %new, "rewrote named parameter");
            edits.push(Edit { location: location - stmt_location, old, new });
            false
        },
        |_| true,
    );

    (RawStmt { stmt, ..raw }, params, edits)
}

/// The parameter a `sqlc.arg`-style call introduces, and the call's text as
/// it most likely appears in the source.
fn param_from_func_call(call: &FuncCall) -> (Param, String) {
    let (name, is_const) = flatten(&call.args);
    let param = match call.func.name.as_str() {
        "narg" => Param::nullable(&name),
        "slice" => Param::slice(&name),
        _ => Param::new(&name),
    };

    // Assumes the call sits on one line, with blanks only between the
    // function name and its opening parenthesis.
    let func_name = format!("{}.{}", call.func.schema, call.func.name);
    let spaces = match call.args.first().and_then(Node::location) {
        Some(arg) => {
            let left_paren = arg - 1;
            usize::try_from(left_paren - call.location).unwrap_or(0).saturating_sub(func_name.len())
        }
        None => 0,
    };
    let orig_name = if is_const { format!("'{name}'") } else { name };
    (param, format!("{func_name}{}({orig_name})", " ".repeat(spaces)))
}

fn placeholder(engine: Engine, dollar: bool, argn: i32, param: &Param) -> String {
    if engine == Engine::PostgreSQL && dollar {
        return format!("${argn}");
    }
    if param.is_sqlc_slice {
        return format!("/*SLICE:{}*/?", param.name);
    }
    match engine {
        Engine::SQLite => format!("?{argn}"),
        _ => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{search, AExpr, FuncName, SelectStmt, TypeCast, TypeName};

    fn arg(name: &str, location: i32) -> Node {
        Node::from(FuncCall {
            func: FuncName::new("sqlc", "arg"),
            args: vec![Node::column_ref(&[name], location + 9)],
            location,
            ..Default::default()
        })
    }

    fn select_where(exprs: Vec<Node>) -> RawStmt {
        RawStmt { stmt: Node::from(SelectStmt { target_list: exprs, ..Default::default() }), stmt_location: 0, stmt_len: 0 }
    }

    fn refs(raw: &RawStmt) -> Vec<i32> {
        search(&raw.stmt, |n| matches!(n, Node::ParamRef(_)))
            .into_iter()
            .filter_map(|n| match n {
                Node::ParamRef(p) => Some(p.number),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn func_call_markers() {
        let raw = select_where(vec![arg("foo", 7), arg("foo", 30), arg("bar", 50)]);
        let (raw, params, edits) = named_parameters(Engine::PostgreSQL, raw, &HashSet::new(), true);
        assert_eq!(refs(&raw), vec![1, 1, 2]);
        assert_eq!(params.name_for(1), Some("foo"));
        assert_eq!(params.name_for(2), Some("bar"));
        assert_eq!(edits[0], Edit { location: 7, old: "sqlc.arg(foo)".into(), new: "$1".into() });
        assert_eq!(edits[2].new, "$2");
    }

    #[test]
    fn mysql_never_reuses_slots() {
        let raw = select_where(vec![arg("foo", 7), arg("foo", 30)]);
        let (raw, _, edits) = named_parameters(Engine::MySQL, raw, &HashSet::new(), false);
        assert_eq!(refs(&raw), vec![1, 2]);
        assert!(edits.iter().all(|e| e.new == "?"));
    }

    #[test]
    fn sqlite_numbers_its_placeholders() {
        let raw = select_where(vec![arg("foo", 7)]);
        let (_, _, edits) = named_parameters(Engine::SQLite, raw, &[1].into_iter().collect(), false);
        assert_eq!(edits[0].new, "?2");
    }

    #[test]
    fn quoted_names_and_slices() {
        let call = |name: &str, quoted: bool| {
            Node::from(FuncCall {
                func: FuncName::new("sqlc", name),
                args: vec![if quoted { Node::string_const("ids", 21) } else { Node::column_ref(&["ids"], 21) }],
                location: 10,
                ..Default::default()
            })
        };
        let (_, params, edits) = named_parameters(Engine::MySQL, select_where(vec![call("slice", true)]), &HashSet::new(), false);
        assert_eq!(edits[0].old, "sqlc.slice('ids')");
        assert_eq!(edits[0].new, "/*SLICE:ids*/?");
        assert!(params.iter().all(|(_, p)| p.is_sqlc_slice));

        // Blanks between the function name and its parenthesis survive.
        let (_, _, edits) = named_parameters(Engine::PostgreSQL, select_where(vec![call("arg", false)]), &HashSet::new(), true);
        assert_eq!(edits[0].old, "sqlc.arg  (ids)");
    }

    #[test]
    fn sign_markers() {
        let sign = |rexpr: Node, location: i32| Node::from(AExpr { name: vec![Node::string("@")], rexpr: Some(rexpr), location, ..Default::default() });
        let cast = Node::from(TypeCast {
            arg: Some(Node::column_ref(&["flag"], 21)),
            type_name: Some(Node::from(TypeName::new("", "bool"))),
            location: 25,
        });
        let raw = RawStmt {
            stmt: Node::from(SelectStmt { target_list: vec![sign(Node::column_ref(&["id"], 11), 110), sign(cast, 120)], ..Default::default() }),
            stmt_location: 100,
            stmt_len: 0,
        };
        let (raw, _, edits) = named_parameters(Engine::PostgreSQL, raw, &HashSet::new(), true);
        assert_eq!(edits[0], Edit { location: 10, old: "@id".into(), new: "$1".into() });
        assert_eq!(edits[1], Edit { location: 20, old: "@flag".into(), new: "$2".into() });

        let casts = search(&raw.stmt, |n| matches!(n, Node::TypeCast(_)));
        assert_eq!(casts.len(), 1);
        assert!(matches!(casts[0], Node::TypeCast(c) if matches!(c.arg, Some(Node::ParamRef(_)))));
        assert!(search(&raw.stmt, |n| matches!(n, Node::ColumnRef(_))).is_empty());
    }

    #[test]
    fn no_markers_leaves_the_tree_alone() {
        let raw = select_where(vec![Node::param_ref(1, 7)]);
        let (out, params, edits) = named_parameters(Engine::PostgreSQL, raw.clone(), &[1].into_iter().collect(), true);
        assert_eq!(out, raw);
        assert!(params.is_empty());
        assert!(edits.is_empty());
    }
}
