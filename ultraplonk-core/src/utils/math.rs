pub trait Math: Sized {
    /// `Some(log2(self))` when `self` is a non-zero power of two.
    fn exact_log_2(self) -> Option<u32>;
}

impl Math for u32 {
    #[inline]
    fn exact_log_2(self) -> Option<u32> {
        self.is_power_of_two().then(|| self.trailing_zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::Math;

    #[test]
    fn exact_log_2() {
        assert_eq!(0u32.exact_log_2(), None);
        assert_eq!(12u32.exact_log_2(), None);
        assert_eq!(1u32.exact_log_2(), Some(0));
        assert_eq!((1u32 << 16).exact_log_2(), Some(16));
        assert_eq!(u32::MAX.exact_log_2(), None);
    }
}
