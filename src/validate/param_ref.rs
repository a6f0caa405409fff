use std::collections::{BTreeSet, HashSet};

use crate::ast::{search, Node};
use crate::error::{SqlError, SqlResult};
use crate::validate::USAGE;

/// Checks that positional parameters are numbered `1..=n` with no gaps, and
/// that `$n` and `?` are not mixed.
///
/// Returns the slots in use and whether the statement uses `$n` numbering.
/// A statement without positional parameters counts as `$n` style.
pub fn param_ref(stmt: &Node) -> SqlResult<(HashSet<i32>, bool)> {
    let refs: Vec<_> = search(stmt, |n| matches!(n, Node::ParamRef(_)))
        .into_iter()
        .filter_map(|n| match n {
            Node::ParamRef(r) => Some(r),
            _ => None,
        })
        .collect();

    let dollar = refs.iter().any(|r| r.dollar);
    if dollar && refs.iter().any(|r| !r.dollar) {
        return Err(SqlError::invalid(USAGE, "can not mix $1 format with ? format"));
    }

    let seen: BTreeSet<i32> = refs.iter().map(|r| r.number).filter(|n| *n > 0).collect();
    for i in 1..=seen.len() as i32 {
        if !seen.contains(&i) {
            let location = refs.iter().map(|r| r.location).min().unwrap_or_default();
            return Err(SqlError::invalid("42P18", format!("could not determine data type of parameter ${i}")).at(location));
        }
    }
    Ok((seen.into_iter().collect(), dollar || refs.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ParamRef, SelectStmt};

    fn select(refs: Vec<Node>) -> Node {
        Node::from(SelectStmt { target_list: refs, ..Default::default() })
    }

    #[test]
    fn gaps_are_rejected() {
        let err = param_ref(&select(vec![Node::param_ref(1, 7), Node::param_ref(3, 12)])).unwrap_err();
        assert_eq!(err.code, "42P18");
        assert_eq!(err.message, "could not determine data type of parameter $2");
    }

    #[test]
    fn any_order_of_first_appearance() {
        let (used, dollar) = param_ref(&select(vec![Node::param_ref(3, 7), Node::param_ref(1, 12), Node::param_ref(2, 17)])).unwrap();
        assert_eq!(used, [1, 2, 3].into_iter().collect());
        assert!(dollar);
    }

    #[test]
    fn question_marks() {
        let q = |number| Node::from(ParamRef { number, dollar: false, location: 0 });
        let (used, dollar) = param_ref(&select(vec![q(1), q(2)])).unwrap();
        assert_eq!(used.len(), 2);
        assert!(!dollar);

        let err = param_ref(&select(vec![q(1), Node::param_ref(2, 0)])).unwrap_err();
        assert_eq!(err.message, "can not mix $1 format with ? format");
    }

    #[test]
    fn no_parameters() {
        let (used, dollar) = param_ref(&select(vec![])).unwrap();
        assert!(used.is_empty());
        assert!(dollar);
    }
}
