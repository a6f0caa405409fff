use brunch::{Bench, Benches};
use sqlc_core::ast::{apply, search, walk, AExpr, BoolExpr, FuncCall, FuncName, Node, RawStmt, SelectStmt, VisitorFn};
use sqlc_core::rewrite::named_parameters;
use sqlc_core::Engine;

/// SELECT with a WHERE clause of `width` equality tests on named parameters.
fn wide_select(width: usize) -> Node {
    let conds = (0..width)
        .map(|i| {
            let name = format!("p{i}");
            let location = i as i32 * 32;
            let marker = FuncCall { func: FuncName::new("sqlc", "arg"), args: vec![Node::column_ref(&[name.as_str()], location + 9)], location, ..Default::default() };
            Node::from(AExpr { name: vec![Node::string("=")], lexpr: Some(Node::column_ref(&[name.as_str()], location)), rexpr: Some(Node::from(marker)), location, ..Default::default() })
        })
        .collect();
    Node::from(SelectStmt { where_clause: Some(Node::from(BoolExpr { args: conds, ..Default::default() })), ..Default::default() })
}

fn main() {
    let tree = wide_select(200);
    let mut benches = Benches::default();

    benches.push(Bench::new("walk(200 conditions)").run(|| {
        let mut count = 0;
        walk(
            &mut VisitorFn(|_: &Node| {
                count += 1;
                true
            }),
            &tree,
        );
        count
    }));
    benches.push(Bench::new("search(ColumnRef)").run(|| search(&tree, |n| matches!(n, Node::ColumnRef(_))).len()));
    benches.push(Bench::new("apply(identity)").run(|| apply(tree.clone(), |_| true, |_| true)));
    benches.push(Bench::new("named_parameters(200 markers)").run(|| {
        let raw = RawStmt { stmt: tree.clone(), ..Default::default() };
        named_parameters(Engine::PostgreSQL, raw, &Default::default(), true)
    }));

    benches.finish();
}
