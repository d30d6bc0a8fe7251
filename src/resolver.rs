//! Maps index and range entries onto concrete positions of a sequence.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::ast::IndexSpec;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("index out of range ({0})")]
    OutOfRange(i64),

    #[error("indexes out of range ({0})")]
    EmptyRange(IndexSpec),
}

/// Resolves `specs` against a sequence of length `len`.
///
/// The result is ascending and free of duplicates. With `capped` every
/// position must lie in `[0, len)`; without it positions past the end are
/// returned so the caller can grow the sequence.
pub fn resolve(specs: &[IndexSpec], len: usize, capped: bool) -> Result<Vec<usize>, ResolveError> {
    let mut out = BTreeSet::new();
    for spec in specs {
        resolve_spec(*spec, len, capped, &mut out)?;
    }
    Ok(out.into_iter().collect())
}

/// Positions in `[0, len)` hit by any of `specs`, silently skipping entries
/// that fall outside the sequence.
pub fn matching(specs: &[IndexSpec], len: usize) -> BTreeSet<usize> {
    let mut out = BTreeSet::new();
    for spec in specs {
        let mut hits = BTreeSet::new();
        if resolve_spec(*spec, len, true, &mut hits).is_ok() {
            out.extend(hits);
        }
    }
    out
}

fn resolve_spec(
    spec: IndexSpec,
    len: usize,
    capped: bool,
    out: &mut BTreeSet<usize>,
) -> Result<(), ResolveError> {
    let len = len as i64;
    match spec {
        IndexSpec::Index(idx) => {
            out.insert(wrap(idx, idx, len, capped)? as usize);
        }
        IndexSpec::Range { start, end } => {
            let first = wrap(start.unwrap_or(0), start.unwrap_or(0), len, capped)?;
            let last = match end {
                // End bounds are exclusive; negative ones count from the end.
                Some(e) if e < 0 => {
                    let before = e.checked_sub(1).ok_or(ResolveError::OutOfRange(e))?;
                    wrap(before, e, len, capped)?
                }
                Some(0) => return Err(ResolveError::EmptyRange(spec)),
                Some(e) => {
                    if capped && e - 1 >= len {
                        return Err(ResolveError::OutOfRange(e));
                    }
                    e - 1
                }
                None => len - 1,
            };

            if first > last {
                return Err(ResolveError::EmptyRange(spec));
            }
            out.extend((first..=last).map(|i| i as usize));
        }
    }
    Ok(())
}

/// Wraps a negative position. `written` is the bound as it appeared in the
/// path, used for the error message.
fn wrap(idx: i64, written: i64, len: i64, capped: bool) -> Result<i64, ResolveError> {
    let wrapped = if idx < 0 { len + idx } else { idx };
    if wrapped < 0 || (capped && wrapped >= len) {
        return Err(ResolveError::OutOfRange(written));
    }
    Ok(wrapped)
}
