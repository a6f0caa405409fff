use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;

use crate::ast::{CreateFunctionStmt, DropFunctionStmt, FuncCall, FuncName, FuncParamMode, Node, TypeName};
use crate::catalog::schema::Schema;
use crate::catalog::Catalog;
use crate::error::{SqlError, SqlResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub args: Vec<Argument>,
    /// `None` for procedures
    pub return_type: Option<TypeName>,
    pub return_type_nullable: bool,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Argument {
    pub name: Option<String>,
    pub type_name: TypeName,
    pub has_default: bool,
    pub mode: FuncParamMode,
}

impl Argument {
    fn is_input(&self) -> bool {
        !matches!(self.mode, FuncParamMode::Out | FuncParamMode::Table)
    }
}

impl Function {
    /// Arguments a caller passes values for.
    pub fn in_args(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter().filter(|a| a.is_input())
    }

    pub fn out_args(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter().filter(|a| !a.is_input())
    }

    /// Whether a call with these positional and named arguments can resolve
    /// to this function.
    ///
    /// Positional arguments fill input parameters first. Trailing input
    /// parameters with defaults may be left out, and a variadic parameter
    /// soaks up any number of extra arguments. Without defaults or a variadic
    /// parameter this is an exact arity match.
    pub fn accepts(&self, positional: usize, named: &[&str]) -> bool {
        let inputs: Vec<&Argument> = self.in_args().collect();
        let outputs = self.out_args().count();
        let variadic = inputs.iter().any(|a| a.mode == FuncParamMode::Variadic);
        let optional = inputs.iter().filter(|a| a.has_default || a.mode == FuncParamMode::Variadic).count();
        let required = inputs.len() - optional;

        let mut named_in = 0;
        let mut named_out = 0;
        for name in named {
            let known = |a: &&Argument| a.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name));
            if inputs.iter().any(known) {
                named_in += 1;
            } else if self.args.iter().any(|a| known(&a)) {
                named_out += 1;
            } else {
                return false;
            }
        }

        let provided = positional.min(inputs.len()) + named_in;
        if provided < required || (!variadic && provided > inputs.len()) {
            return false;
        }
        let extra = if variadic { 0 } else { positional.saturating_sub(inputs.len()) };
        let placeholders = extra + named_out;
        match self.return_type {
            // Procedures may be handed placeholders for their OUT parameters.
            None => placeholders <= outputs,
            Some(_) => placeholders == 0,
        }
    }

    fn signature_matches(&self, types: &[TypeName]) -> bool {
        let inputs: Vec<&Argument> = self.in_args().collect();
        inputs.len() == types.len() && inputs.iter().zip(types).all(|(a, t)| same_type(&a.type_name, t))
    }
}

fn same_type(a: &TypeName, b: &TypeName) -> bool {
    let (a_schema, a_name) = a.schema_and_name();
    let (b_schema, b_name) = b.schema_and_name();
    let schemas_agree = a_schema.is_empty() || b_schema.is_empty() || a_schema == b_schema;
    schemas_agree && a_name.eq_ignore_ascii_case(&b_name) && a.array_bounds.len() == b.array_bounds.len()
}

impl Schema {
    fn func_index(&self, name: &FuncName, types: &[TypeName]) -> SqlResult<usize> {
        self.funcs
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(&name.name) && f.signature_matches(types))
            .ok_or_else(|| SqlError::function_not_found(&name.name))
    }

    fn func_index_by_name(&self, name: &FuncName) -> SqlResult<usize> {
        let mut found = self.funcs.iter().positions(|f| f.name.eq_ignore_ascii_case(&name.name));
        match (found.next(), found.next()) {
            (Some(idx), None) => Ok(idx),
            (Some(_), Some(_)) => Err(SqlError::function_not_unique(&name.name)),
            (None, _) => Err(SqlError::function_not_found(&name.name)),
        }
    }
}

impl Catalog {
    pub(crate) fn create_function(&mut self, stmt: &CreateFunctionStmt) -> SqlResult<()> {
        let sidx = self.schema_for_write(&stmt.func.schema)?;
        let args: Vec<Argument> = stmt
            .params
            .iter()
            .filter_map(|p| match p {
                Node::FuncParam(p) => Some(Argument {
                    name: p.name.clone(),
                    type_name: match &p.arg_type {
                        Some(Node::TypeName(tn)) => (**tn).clone(),
                        _ => TypeName::default(),
                    },
                    has_default: p.def_expr.is_some(),
                    mode: p.mode,
                }),
                _ => None,
            })
            .collect();
        let function = Function {
            name: stmt.func.name.clone(),
            return_type: match &stmt.return_type {
                Some(Node::TypeName(tn)) => Some((**tn).clone()),
                _ => None,
            },
            return_type_nullable: false,
            comment: String::new(),
            args,
        };

        let types: Vec<TypeName> = function.in_args().map(|a| a.type_name.clone()).collect();
        let schema = &mut self.schemas[sidx];
        match schema.func_index(&stmt.func, &types) {
            Ok(idx) if stmt.replace => schema.funcs[idx] = function,
            Ok(_) => return Err(SqlError::relation_exists(&stmt.func.name)),
            Err(_) => schema.funcs.push(function),
        }
        Ok(())
    }

    pub(crate) fn drop_function(&mut self, stmt: &DropFunctionStmt) -> SqlResult<()> {
        let mut doomed: Vec<(usize, usize)> = vec![];
        for spec in &stmt.funcs {
            let Node::FuncSpec(spec) = spec else { continue };
            let sidx = match self.schema_for_write(&spec.name.schema) {
                Err(err) if err.is_not_found() && stmt.missing_ok => continue,
                located => located?,
            };
            let schema = &self.schemas[sidx];
            let found = if spec.has_args {
                let types: Vec<TypeName> = spec
                    .args
                    .iter()
                    .filter_map(|a| match a {
                        Node::TypeName(tn) => Some((**tn).clone()),
                        _ => None,
                    })
                    .collect();
                schema.func_index(&spec.name, &types)
            } else {
                schema.func_index_by_name(&spec.name)
            };
            match found {
                Ok(fidx) => doomed.push((sidx, fidx)),
                Err(err) if err.is_not_found() && stmt.missing_ok => continue,
                Err(err) => return Err(err),
            }
        }
        // Remove from the back so earlier indexes stay valid.
        doomed.sort_unstable();
        doomed.dedup();
        for (sidx, fidx) in doomed.into_iter().rev() {
            self.schemas[sidx].funcs.remove(fidx);
        }
        Ok(())
    }

    /// Schemas searched for a function name: the search path, then the
    /// named schema (or the default one).
    fn schemas_to_search<'a>(&'a self, schema: &'a str) -> impl Iterator<Item = &'a str> {
        self.search_path.iter().map(String::as_str).chain(std::iter::once(self.schema_name(schema))).unique()
    }

    /// All functions called `name`, ignoring case, across the search path.
    ///
    /// Search path entries that name no schema are skipped. A missing
    /// schema named by the call itself is an error.
    pub fn list_funcs_by_name(&self, name: &FuncName) -> SqlResult<Vec<&Function>> {
        let named = self.schema_name(&name.schema);
        let mut funcs = vec![];
        for schema in self.schemas_to_search(&name.schema) {
            match self.schema(schema) {
                Ok(found) => funcs.extend(found.funcs_named(&name.name)),
                Err(err) if schema == named => return Err(err),
                Err(_) => continue,
            }
        }
        Ok(funcs)
    }

    /// Resolves a call to the first overload that accepts its arguments.
    ///
    /// Fails with a not-found error when no function has the name, and with
    /// `42883` when functions exist but none accepts the arguments.
    pub fn resolve_func_call(&self, call: &FuncCall) -> SqlResult<&Function> {
        let funcs = match self.list_funcs_by_name(&call.func) {
            Ok(funcs) if !funcs.is_empty() => funcs,
            _ => return Err(SqlError::function_not_found(&call.func.name).at(call.location)),
        };

        let mut positional = 0;
        let mut named: Vec<&str> = vec![];
        for arg in &call.args {
            match arg {
                Node::NamedArgExpr(n) => named.push(n.name.as_deref().unwrap_or_default()),
                _ if !named.is_empty() => {
                    return Err(SqlError::invalid("42601", "positional argument cannot follow named argument").at(call.location));
                }
                _ => positional += 1,
            }
        }
        let unique: HashSet<&str> = named.iter().copied().collect();
        if unique.len() != named.len() {
            return Err(SqlError::invalid("42601", "argument name used more than once").at(call.location));
        }

        if let Some(found) = funcs.into_iter().find(|f| f.accepts(positional, &named)) {
            return Ok(found);
        }
        let signature = call.args.iter().map(|_| "unknown").join(", ");
        Err(SqlError::invalid("42883", format!("function {}({}) does not exist", call.func.name, signature)).at(call.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FuncParam, FuncSpec, NamedArgExpr};
    use crate::engine::Engine;

    fn param(name: &str, ty: &str, default: bool, mode: FuncParamMode) -> Node {
        Node::from(FuncParam {
            name: Some(name.into()),
            arg_type: Some(Node::from(TypeName::new("", ty))),
            def_expr: default.then(|| Node::integer_const(0, 0)),
            mode,
        })
    }

    fn create(name: &str, params: Vec<Node>, replace: bool) -> CreateFunctionStmt {
        CreateFunctionStmt {
            func: FuncName::new("", name),
            params,
            return_type: Some(Node::from(TypeName::new("", "int4"))),
            replace,
            ..Default::default()
        }
    }

    fn call(name: &str, args: Vec<Node>) -> FuncCall {
        FuncCall { func: FuncName::new("", name), args, location: 7, ..Default::default() }
    }

    fn named(name: &str) -> Node {
        Node::from(NamedArgExpr { name: Some(name.into()), arg: Some(Node::integer_const(1, 0)), ..Default::default() })
    }

    fn catalog() -> Catalog {
        let mut c = Catalog::new(Engine::PostgreSQL, "public");
        let params = vec![param("a", "int4", false, FuncParamMode::In), param("b", "int4", true, FuncParamMode::In)];
        c.create_function(&create("add_it", params, false)).unwrap();
        c
    }

    #[test]
    fn defaults_may_be_omitted() {
        let c = catalog();
        assert!(c.resolve_func_call(&call("add_it", vec![Node::integer(1)])).is_ok());
        assert!(c.resolve_func_call(&call("add_it", vec![Node::integer(1), Node::integer(2)])).is_ok());
        let err = c.resolve_func_call(&call("add_it", vec![])).unwrap_err();
        assert_eq!(err.code, "42883");
        assert_eq!(err.message, "function add_it() does not exist");
        let err = c.resolve_func_call(&call("ADD_IT", vec![Node::integer(1); 3])).unwrap_err();
        assert_eq!(err.message, "function ADD_IT(unknown, unknown, unknown) does not exist");
        assert_eq!(err.location, Some(7));
    }

    #[test]
    fn named_arguments() {
        let c = catalog();
        assert!(c.resolve_func_call(&call("add_it", vec![Node::integer(1), named("b")])).is_ok());
        assert!(c.resolve_func_call(&call("add_it", vec![named("a")])).is_ok());
        assert_eq!(c.resolve_func_call(&call("add_it", vec![named("zzz")])).unwrap_err().code, "42883");
        let err = c.resolve_func_call(&call("add_it", vec![named("b"), Node::integer(1)])).unwrap_err();
        assert_eq!(err.message, "positional argument cannot follow named argument");
    }

    #[test]
    fn missing_schemas() {
        let mut c = catalog();
        c.search_path.insert(0, "ext".into());
        assert_eq!(c.list_funcs_by_name(&FuncName::new("", "add_it")).unwrap().len(), 1);
        assert!(c.list_funcs_by_name(&FuncName::new("ext", "add_it")).unwrap_err().is_not_found());
        assert!(c.list_funcs_by_name(&FuncName::new("nope", "add_it")).unwrap_err().is_not_found());
    }

    #[test]
    fn unknown_function_is_not_found() {
        let c = catalog();
        assert!(c.resolve_func_call(&call("nope", vec![])).unwrap_err().is_not_found());
    }

    #[test]
    fn variadic_accepts_extra_arguments() {
        let mut c = catalog();
        c.create_function(&create("pick", vec![param("xs", "int4", false, FuncParamMode::Variadic)], false)).unwrap();
        assert!(c.resolve_func_call(&call("pick", vec![Node::integer(1); 5])).is_ok());
        assert!(c.resolve_func_call(&call("pick", vec![])).is_ok());
    }

    #[test]
    fn create_or_replace_and_drop() {
        let mut c = catalog();
        let params = || vec![param("a", "int4", false, FuncParamMode::In), param("b", "int4", true, FuncParamMode::In)];
        assert!(c.create_function(&create("add_it", params(), false)).unwrap_err().is_exists());
        c.create_function(&create("add_it", params(), true)).unwrap();
        c.create_function(&create("add_it", vec![param("a", "text", false, FuncParamMode::In)], false)).unwrap();
        assert_eq!(c.list_funcs_by_name(&FuncName::new("", "add_it")).unwrap().len(), 2);

        let by_name = DropFunctionStmt { funcs: vec![Node::from(FuncSpec { name: FuncName::new("", "add_it"), ..Default::default() })], missing_ok: false };
        assert!(c.drop_function(&by_name).unwrap_err().is_not_unique());

        let by_args = DropFunctionStmt {
            funcs: vec![Node::from(FuncSpec { name: FuncName::new("", "add_it"), args: vec![Node::from(TypeName::new("", "text"))], has_args: true })],
            missing_ok: false,
        };
        c.drop_function(&by_args).unwrap();
        c.drop_function(&by_name).unwrap();
        assert!(c.list_funcs_by_name(&FuncName::new("", "add_it")).unwrap().is_empty());
    }
}
