use crate::basic_types::ConstraintOperationError;

/// Largest magnitude of a value in an integer domain.
///
/// Keeping values well inside `i32` means views can add offsets and propagators can sum bounds
/// without overflowing.
pub const INT_LIMIT: i32 = 1_000_000_000;

/// Largest magnitude of an element of a set variable.
pub const SET_LIMIT: i32 = INT_LIMIT / 2;

pub(crate) fn check_int_value(value: i64) -> Result<i32, ConstraintOperationError> {
    if value < -(INT_LIMIT as i64) || value > INT_LIMIT as i64 {
        return Err(ConstraintOperationError::ValueOutOfLimits(value));
    }

    Ok(value as i32)
}

pub(crate) fn check_set_value(value: i64) -> Result<i32, ConstraintOperationError> {
    if value < -(SET_LIMIT as i64) || value > SET_LIMIT as i64 {
        return Err(ConstraintOperationError::ValueOutOfLimits(value));
    }

    Ok(value as i32)
}
