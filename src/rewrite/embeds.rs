use serde::Serialize;
use tracing::trace;

use crate::ast::{apply, search, AStar, ColumnRef, FuncCall, Node, RawStmt, TableName};

/// One `sqlc.embed(table)` call, now a `table.*` column reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub table: TableName,
    param: String,
    /// The column reference that replaced the call
    pub node: ColumnRef,
}

impl Embed {
    /// The call's text in the query source.
    pub fn orig(&self) -> String {
        format!("sqlc.embed({})", self.param)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedSet(pub Vec<Embed>);

impl EmbedSet {
    /// The embed that produced `node`.
    pub fn find(&self, node: &ColumnRef) -> Option<&Embed> {
        self.0.iter().find(|e| e.node == *node)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Embed> {
        self.0.iter()
    }
}

fn is_embed(call: &FuncCall) -> bool {
    call.func.schema == "sqlc" && call.func.name == "embed"
}

/// Replaces each `sqlc.embed(table)` with `table.*`.
///
/// Calls without arguments, or naming more than three parts, are left as
/// they are.
pub fn embeds(raw: RawStmt) -> (RawStmt, EmbedSet) {
    let mut found = vec![];
    let stmt = apply(
        raw.stmt,
        |cursor| {
            let Node::FuncCall(call) = cursor.node() else {
                return true;
            };
            if !is_embed(call) {
                return true;
            }
            let parts: Vec<&str> = call.args.iter().flat_map(|a| search(a, |n| matches!(n, Node::String(_)))).filter_map(Node::as_str).collect();
            let Some(table) = TableName::from_parts(&parts) else {
                return false;
            };

            let mut fields: Vec<Node> = parts.iter().map(|p| Node::string(*p)).collect();
            fields.push(Node::AStar(AStar));
            let node = ColumnRef { fields, location: call.location };
            let param = parts.join(".");
            trace!(table = %table, "expanded embed");

            found.push(Embed { table, param, node: node.clone() });
            cursor.replace(Node::from(node));
            false
        },
        |_| true,
    );
    (RawStmt { stmt, ..raw }, EmbedSet(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FuncName, SelectStmt};

    fn embed_call(args: Vec<Node>) -> Node {
        Node::from(FuncCall { func: FuncName::new("sqlc", "embed"), args, location: 7, ..Default::default() })
    }

    fn select(targets: Vec<Node>) -> RawStmt {
        RawStmt { stmt: Node::from(SelectStmt { target_list: targets, ..Default::default() }), ..Default::default() }
    }

    #[test]
    fn embed_becomes_star_reference() {
        let (raw, set) = embeds(select(vec![embed_call(vec![Node::column_ref(&["users"], 18)])]));
        let embed = set.iter().next().unwrap();
        assert_eq!(embed.table, TableName::new("", "users"));
        assert_eq!(embed.orig(), "sqlc.embed(users)");

        let Node::SelectStmt(select) = &raw.stmt else { panic!("not a select") };
        let Node::ColumnRef(column) = &select.target_list[0] else { panic!("not a column ref") };
        assert_eq!(column.fields, vec![Node::string("users"), Node::AStar(AStar)]);
        assert!(set.find(column).is_some());
    }

    #[test]
    fn schema_qualified_embed() {
        let arg = Node::column_ref(&["auth", "users"], 18);
        let (_, set) = embeds(select(vec![embed_call(vec![arg])]));
        let embed = set.iter().next().unwrap();
        assert_eq!(embed.table, TableName::new("auth", "users"));
        assert_eq!(embed.orig(), "sqlc.embed(auth.users)");
    }

    #[test]
    fn empty_embed_is_left_alone() {
        let raw = select(vec![embed_call(vec![])]);
        let (out, set) = embeds(raw.clone());
        assert_eq!(out, raw);
        assert!(set.is_empty());
    }
}
