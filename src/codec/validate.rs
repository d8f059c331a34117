// Size checks wrapped around every top-level and nested traversal.

use log::trace;

use crate::codec::cursor::Remaining;
use crate::codec::Mode;
use crate::internal::error::{Error, Result, Strictness};
use crate::schema::types::TypeLayout;

/// Checks that `available` bytes are enough for `layout` under `mode`.
pub fn check_remaining(layout: &TypeLayout, mode: Mode, available: usize) -> Result<()> {
    let expected = layout.total_size();
    let (ok, strictness) = match mode {
        Mode::Strict => (available == expected, Strictness::Exact),
        Mode::Embedded => (available >= expected, Strictness::AtLeast),
    };
    trace!("{}: {:?} check, {} of {} bytes available", layout.name(), mode, available, expected);
    if !ok {
        return Err(Error::BufferSizeMismatch {
            type_name: layout.name(),
            expected,
            available,
            strictness,
        });
    }
    Ok(())
}

/// Checks that a traversal starting at `start` and ending at `end` moved exactly `total_size` bytes.
pub fn check_consumed(layout: &TypeLayout, start: usize, end: usize) -> Result<()> {
    let consumed = end.saturating_sub(start);
    if consumed != layout.total_size() {
        return Err(Error::ConsumedMismatch {
            type_name: layout.name(),
            expected: layout.total_size(),
            consumed,
        });
    }
    Ok(())
}

/// Runs `op` between the remaining-length check and the consumed-bytes check.
pub(crate) fn guarded<C, R>(layout: &TypeLayout, mode: Mode, cursor: &mut C, op: impl FnOnce(&mut C) -> Result<R>) -> Result<R>
where
    C: Remaining,
{
    check_remaining(layout, mode, cursor.remaining())?;
    let start = cursor.offset();
    let result = op(cursor)?;
    check_consumed(layout, start, cursor.offset())?;
    Ok(result)
}
