//! Leveled assertions.
//!
//! Checks are grouped by how expensive they are. Release builds only run the
//! [`MARROW_ASSERT_SIMPLE`] level; tests and the `debug-checks` feature run everything up to
//! [`MARROW_ASSERT_EXTREME`], which includes re-running every propagator after each fixpoint.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const MARROW_ASSERT_LEVEL: u8 = MARROW_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const MARROW_ASSERT_LEVEL: u8 = MARROW_ASSERT_EXTREME;

/// Constant-time checks on public entry points.
pub const MARROW_ASSERT_SIMPLE: u8 = 1;
/// Checks which are linear in the size of a single domain or propagator.
pub const MARROW_ASSERT_MODERATE: u8 = 2;
/// Checks which are linear in the size of the space.
pub const MARROW_ASSERT_ADVANCED: u8 = 3;
/// Checks which re-derive state from scratch.
pub const MARROW_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! print_marrow_assert_warning_message {
    () => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_MODERATE {
            log::warn!(
                "Potential performance degradation: the assert level is set to {}, expensive consistency checks are active.",
                $crate::asserts::MARROW_ASSERT_LEVEL
            );
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_eq_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_MODERATE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL >= $crate::asserts::MARROW_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
