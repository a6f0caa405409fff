//! Named query parameters and the markers that introduce them.
//!
//! A query can name its parameters with `sqlc.arg(name)`, `sqlc.narg(name)`,
//! `sqlc.slice(name)` or `@name`. The rewrite pass turns each marker into a
//! positional [`ParamRef`](crate::ast::ParamRef) and records what it knew
//! about the parameter in a [`ParamSet`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::ast::{FuncCall, Node};

/// What is known about a parameter's nullability, as two bits that are
/// combined when the same parameter is seen more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Nullability {
    #[default]
    Unspecified = 0b00,
    Nullable = 0b01,
    NotNullable = 0b10,
    /// Both nullable and not nullable, a conflict for type inference to report
    Invalid = 0b11,
}

impl Nullability {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Nullability::Unspecified,
            0b01 => Nullability::Nullable,
            0b10 => Nullability::NotNullable,
            _ => Nullability::Invalid,
        }
    }

    pub fn merge(self, other: Nullability) -> Nullability {
        Nullability::from_bits(self as u8 | other as u8)
    }
}

impl fmt::Display for Nullability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A user-named parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub nullability: Nullability,
    /// Introduced by `sqlc.slice`, expanded to a variable-length list later
    pub is_sqlc_slice: bool,
}

impl Param {
    pub fn new(name: &str) -> Self {
        Param { name: name.to_string(), ..Default::default() }
    }

    pub fn nullable(name: &str) -> Self {
        Param { nullability: Nullability::Nullable, ..Param::new(name) }
    }

    pub fn slice(name: &str) -> Self {
        Param { is_sqlc_slice: true, ..Param::new(name) }
    }

    pub fn not_null(&self) -> bool {
        self.nullability == Nullability::NotNullable
    }

    /// Combines what two occurrences say about one parameter. The name of
    /// `self` wins unless it is empty.
    pub fn merge(&self, other: &Param) -> Param {
        Param {
            name: if self.name.is_empty() { other.name.clone() } else { self.name.clone() },
            nullability: self.nullability.merge(other.nullability),
            is_sqlc_slice: self.is_sqlc_slice || other.is_sqlc_slice,
        }
    }
}

/// Assigns positional slots to named parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamSet {
    named_reuse: bool,
    params: BTreeMap<String, Param>,
    locations: HashMap<String, Vec<i32>>,
    /// Every claimed slot; literal positional parameters map to `""`
    slots: BTreeMap<i32, String>,
    argn: i32,
}

impl ParamSet {
    /// A set whose first free slot skips every number in `used`.
    ///
    /// With `named_reuse` a name seen twice shares one slot; without it
    /// every occurrence gets a fresh slot.
    pub fn new(used: &HashSet<i32>, named_reuse: bool) -> Self {
        ParamSet {
            named_reuse,
            slots: used.iter().map(|n| (*n, String::new())).collect(),
            argn: 1,
            ..Default::default()
        }
    }

    fn next_arg_num(&mut self) -> i32 {
        while self.slots.contains_key(&self.argn) {
            self.argn += 1;
        }
        self.argn
    }

    /// Records `param` and returns the slot it occupies.
    pub fn add(&mut self, param: Param) -> i32 {
        let name = param.name.clone();
        let seen = match self.params.get(&name) {
            Some(existing) => {
                let merged = existing.merge(&param);
                self.params.insert(name.clone(), merged);
                true
            }
            None => {
                self.params.insert(name.clone(), param);
                false
            }
        };
        if seen && self.named_reuse {
            if let Some(first) = self.locations.get(&name).and_then(|l| l.first()) {
                return *first;
            }
        }
        let argn = self.next_arg_num();
        self.slots.insert(argn, name.clone());
        self.locations.entry(name).or_default().push(argn);
        argn
    }

    /// The parameter name bound to `slot`, if a named parameter claimed it.
    pub fn name_for(&self, slot: i32) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str).filter(|n| !n.is_empty())
    }

    /// Merges `param` with whatever the set knows about `slot`. The flag
    /// tells whether `slot` belongs to a named parameter.
    pub fn fetch_merge(&self, slot: i32, param: &Param) -> (Param, bool) {
        match self.name_for(slot).and_then(|name| self.params.get(name)) {
            Some(known) => (known.merge(param), true),
            None => (param.clone(), false),
        }
    }

    /// Named parameters in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Param)> {
        self.slots.iter().filter_map(|(slot, name)| match name.is_empty() {
            true => None,
            false => self.params.get(name).map(|p| (*slot, p)),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// `sqlc.arg`, `sqlc.narg` or `sqlc.slice`.
pub fn is_param_func(node: &Node) -> bool {
    matches!(node, Node::FuncCall(call) if is_param_call(call))
}

pub(crate) fn is_param_call(call: &FuncCall) -> bool {
    call.func.schema == "sqlc" && matches!(call.func.name.as_str(), "arg" | "narg" | "slice")
}

/// The prefix operator `@name`.
pub fn is_param_sign(node: &Node) -> bool {
    match node {
        Node::AExpr(expr) => expr.lexpr.is_none() && expr.name.iter().filter_map(Node::as_str).join(".") == "@",
        _ => false,
    }
}

/// Either named-parameter marker.
pub fn is_named_param(node: &Node) -> bool {
    is_param_func(node) || is_param_sign(node)
}
