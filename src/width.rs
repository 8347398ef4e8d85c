// SPDX-License-Identifier: Apache-2.0

/// Bit widths used at one level of the Karatsuba decomposition of an `n`-bit
/// multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthPlan {
    /// Operand width at this level.
    pub width: usize,
    /// Bits in the high half of each operand.
    pub high_width: usize,
    /// Bits in the low half of each operand; never smaller than `high_width`.
    pub low_width: usize,
    /// Width of a high half plus a low half without truncation.
    pub sum_width: usize,
    /// Width of the product of two `sum_width`-bit sums.
    pub product_width: usize,
    /// Width of the full product.
    pub final_width: usize,
}

impl WidthPlan {
    /// Plans one decomposition level for `n`-bit operands. Panics if `n` is
    /// zero.
    pub fn new(n: usize) -> Self {
        assert!(n >= 1, "cannot plan a decomposition of a zero-width operand");
        let high_width = n / 2;
        let low_width = n - high_width;
        let sum_width = high_width.max(low_width) + 1;
        WidthPlan {
            width: n,
            high_width,
            low_width,
            sum_width,
            product_width: 2 * sum_width,
            final_width: 2 * n,
        }
    }

    /// Returns `true` if the sum-product would be at least as wide as the
    /// operands, in which case it is multiplied directly instead of recursing.
    pub fn sum_product_is_direct(&self) -> bool {
        self.sum_width >= self.width
    }
}
