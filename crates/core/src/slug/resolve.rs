//! Uniqueness resolution by suffix probing.

/// Find the first free slug starting from `base`.
///
/// The base itself is probed first, then `base-1`, `base-2` and so on until
/// `exists` reports a free candidate. Probing is strictly sequential, so
/// given the same oracle state the result is deterministic. An oracle error
/// aborts the walk immediately.
///
/// This is inherently racy against concurrent writers: a candidate reported
/// free can be taken before the caller inserts it. The store's unique
/// constraint stays the final arbiter and callers handle that conflict by
/// re-resolving once.
pub fn resolve_unique<F, E>(base: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    if !exists(base)? {
        return Ok(base.to_string());
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !exists(&candidate)? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
