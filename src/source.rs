//! Text edits against the original query source.

use serde::Serialize;

use crate::{Error, Result};

/// Replace `old`, found at byte `location`, with `new`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub location: i32,
    pub old: String,
    pub new: String,
}

/// Applies `edits` to `source`, highest location first so that earlier
/// offsets stay valid.
pub fn mutate(source: &str, edits: &[Edit]) -> Result<String> {
    let mut edits = edits.to_vec();
    edits.sort_by(|a, b| b.location.cmp(&a.location));

    let mut out = source.to_string();
    let mut previous: Option<usize> = None;
    for edit in &edits {
        let start = usize::try_from(edit.location).map_err(|_| Error::Edit("edit start location is out of bounds".into()))?;
        if start > out.len() {
            return Err(Error::Edit("edit start location is out of bounds".into()));
        }
        let stop = start + edit.old.len();
        if stop > out.len() {
            return Err(Error::Edit("edit stop location is out of bounds".into()));
        }
        if previous.is_some_and(|p| p < stop) {
            return Err(Error::Edit("2 edits overlap".into()));
        }
        if !out.is_char_boundary(start) || !out.is_char_boundary(stop) {
            return Err(Error::Edit("edit location is not on a character boundary".into()));
        }
        out.replace_range(start..stop, &edit.new);
        previous = Some(start);
    }
    Ok(out)
}

/// The `len` bytes of `source` starting at `location`. A zero `len` means
/// the rest of the source.
pub fn pluck(source: &str, location: i32, len: i32) -> Result<&str> {
    let start = usize::try_from(location).map_err(|_| Error::Edit(format!("statement location {location} is out of bounds")))?;
    let stop = match len {
        0 => source.len(),
        len => start + usize::try_from(len).map_err(|_| Error::Edit(format!("statement length {len} is negative")))?,
    };
    source
        .get(start..stop)
        .ok_or_else(|| Error::Edit(format!("statement at {start}..{stop} is out of bounds")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(location: i32, old: &str, new: &str) -> Edit {
        Edit { location, old: old.into(), new: new.into() }
    }

    #[test]
    fn applies_edits_in_any_order() {
        let sql = "SELECT * FROM t WHERE a = @a AND b = @b";
        let out = mutate(sql, &[edit(26, "@a", "$1"), edit(37, "@b", "$2")]).unwrap();
        assert_eq!(out, "SELECT * FROM t WHERE a = $1 AND b = $2");
    }

    #[test]
    fn rejects_bad_edits() {
        assert_eq!(mutate("abc", &[edit(4, "", "x")]).unwrap_err(), Error::Edit("edit start location is out of bounds".into()));
        assert_eq!(mutate("abc", &[edit(2, "cd", "x")]).unwrap_err(), Error::Edit("edit stop location is out of bounds".into()));
        assert_eq!(mutate("abcdef", &[edit(0, "abc", "x"), edit(2, "cd", "y")]).unwrap_err(), Error::Edit("2 edits overlap".into()));
    }

    #[test]
    fn adjacent_edits_do_not_overlap() {
        assert_eq!(mutate("abcdef", &[edit(0, "abc", "x"), edit(3, "def", "y")]).unwrap(), "xy");
    }

    #[test]
    fn pluck_statement() {
        let sql = "SELECT 1; SELECT 2;";
        assert_eq!(pluck(sql, 10, 8).unwrap(), "SELECT 2");
        assert_eq!(pluck(sql, 10, 0).unwrap(), "SELECT 2;");
        assert!(pluck(sql, 10, 50).is_err());
    }
}
