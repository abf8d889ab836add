//! Rounded integer division, which `i32` only offers on nightly.

pub(crate) trait NumExt {
    /// Division rounding towards positive infinity.
    fn div_ceil(self, other: Self) -> Self;

    /// Division rounding towards negative infinity.
    fn div_floor(self, other: Self) -> Self;
}

impl NumExt for i32 {
    fn div_ceil(self, other: Self) -> Self {
        let quotient = self / other;
        let remainder = self % other;
        if (remainder > 0 && other > 0) || (remainder < 0 && other < 0) {
            quotient + 1
        } else {
            quotient
        }
    }

    fn div_floor(self, other: Self) -> Self {
        let quotient = self / other;
        let remainder = self % other;
        if (remainder > 0 && other < 0) || (remainder < 0 && other > 0) {
            quotient - 1
        } else {
            quotient
        }
    }
}

impl NumExt for i64 {
    fn div_ceil(self, other: Self) -> Self {
        let quotient = self / other;
        let remainder = self % other;
        if (remainder > 0 && other > 0) || (remainder < 0 && other < 0) {
            quotient + 1
        } else {
            quotient
        }
    }

    fn div_floor(self, other: Self) -> Self {
        let quotient = self / other;
        let remainder = self % other;
        if (remainder > 0 && other < 0) || (remainder < 0 && other > 0) {
            quotient - 1
        } else {
            quotient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NumExt;

    #[test]
    fn rounding_directions() {
        assert_eq!(<i32 as NumExt>::div_ceil(7, 2), 4);
        assert_eq!(<i32 as NumExt>::div_ceil(-7, 2), -3);
        assert_eq!(<i32 as NumExt>::div_floor(7, 2), 3);
        assert_eq!(<i32 as NumExt>::div_floor(-7, 2), -4);
        assert_eq!(<i32 as NumExt>::div_floor(7, -2), -4);
        assert_eq!(<i64 as NumExt>::div_ceil(6, 3), 2);
    }
}
