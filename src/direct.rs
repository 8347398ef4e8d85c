// SPDX-License-Identifier: Apache-2.0

use crate::expr::{Expr, SignalRef};

/// Returns the full-precision product of two `w`-bit operands as a `2w`-bit
/// expression: the sum over every bit pair `(i, j)` of `a[i] & b[j]` shifted
/// left by `i + j`. Each term is a `2w`-bit concatenation of leading zeros,
/// the AND bit, and `i + j` trailing zeros.
pub(crate) fn direct_product(a: &SignalRef, b: &SignalRef) -> Expr {
    assert_eq!(
        a.width(),
        b.width(),
        "Operands {} and {} of a direct product must have the same width",
        a,
        b
    );
    let w = a.width();
    let product_width = 2 * w;

    let mut terms = Vec::with_capacity(w * w);
    for i in 0..w {
        for j in 0..w {
            let shift = i + j;
            let mut parts = vec![
                Expr::Zeros(product_width - 1 - shift),
                Expr::and(&a.bit(a.lsb() + i), &b.bit(b.lsb() + j)),
            ];
            if shift > 0 {
                parts.push(Expr::Zeros(shift));
            }
            terms.push(Expr::concat(parts));
        }
    }
    Expr::sum(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_bit_is_a_single_and() {
        let x = SignalRef::new("x", 1);
        let y = SignalRef::new("y", 1);
        let e = direct_product(&x, &y);
        assert_eq!(e.to_string(), "{1'd0, (x & y)}");
        assert_eq!(e.width(), 2);
    }

    #[test]
    fn two_bits_sum_four_terms() {
        let x = SignalRef::new("x", 2);
        let y = SignalRef::new("y", 2);
        let e = direct_product(&x, &y);
        assert_eq!(
            e.to_string(),
            "{3'd0, (x[0] & y[0])} + {2'd0, (x[0] & y[1]), 1'd0} + \
             {2'd0, (x[1] & y[0]), 1'd0} + {1'd0, (x[1] & y[1]), 2'd0}"
        );
        assert_eq!(e.width(), 4);
    }
}
