// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use itertools::Itertools;

/// Reference to a contiguous range of bits of a named port or wire, from `msb`
/// down to `lsb`, inclusive. The declared width of the underlying signal is
/// carried along so that a reference covering the whole signal is rendered as
/// the bare name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalRef {
    pub(crate) name: String,
    pub(crate) declared_width: usize,
    pub(crate) msb: usize,
    pub(crate) lsb: usize,
}

impl SignalRef {
    pub(crate) fn new(name: impl AsRef<str>, declared_width: usize) -> Self {
        assert!(declared_width >= 1, "signal {} has zero width", name.as_ref());
        SignalRef {
            name: name.as_ref().to_string(),
            declared_width,
            msb: declared_width - 1,
            lsb: 0,
        }
    }

    /// Returns the name of the referenced port or wire.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn msb(&self) -> usize {
        self.msb
    }

    pub fn lsb(&self) -> usize {
        self.lsb
    }

    /// Returns the number of bits covered by this reference.
    pub fn width(&self) -> usize {
        self.msb - self.lsb + 1
    }

    /// Returns `true` if this reference covers every bit of the signal.
    pub fn is_whole(&self) -> bool {
        self.lsb == 0 && self.msb + 1 == self.declared_width
    }

    /// Returns bits `msb` down to `lsb` of the underlying signal. Panics if the
    /// range falls outside this reference.
    pub fn slice(&self, msb: usize, lsb: usize) -> SignalRef {
        if lsb > msb || lsb < self.lsb || msb > self.msb {
            panic!(
                "Cannot slice {}[{}:{}] out of {}.",
                self.name, msb, lsb, self
            );
        }
        SignalRef {
            name: self.name.clone(),
            declared_width: self.declared_width,
            msb,
            lsb,
        }
    }

    /// Returns a single bit of the underlying signal.
    pub fn bit(&self, index: usize) -> SignalRef {
        self.slice(index, index)
    }

    /// Returns the lowest `width` bits of this reference.
    pub fn low_bits(&self, width: usize) -> SignalRef {
        self.slice(self.lsb + width - 1, self.lsb)
    }
}

impl fmt::Display for SignalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.name)
        } else if self.msb == self.lsb {
            write!(f, "{}[{}]", self.name, self.msb)
        } else {
            write!(f, "{}[{}:{}]", self.name, self.msb, self.lsb)
        }
    }
}

/// Expression on the right-hand side of a continuous assignment or in a port
/// connection. Every expression has an exact width, and constructors ensure
/// that the operands of sums and differences all have the same width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Signal(SignalRef),
    /// Constant zero of the given width.
    Zeros(usize),
    /// Concatenation, most significant part first.
    Concat(Vec<Expr>),
    /// Bitwise AND of two references of equal width.
    And(SignalRef, SignalRef),
    /// Sum of equal-width terms, truncated to that width.
    Sum(Vec<Expr>),
    /// Difference of two equal-width operands, modulo 2^width.
    Difference(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Returns the width of this expression in bits.
    pub fn width(&self) -> usize {
        match self {
            Expr::Signal(signal) => signal.width(),
            Expr::Zeros(width) => *width,
            Expr::Concat(parts) => parts.iter().map(Expr::width).sum(),
            Expr::And(lhs, _) => lhs.width(),
            Expr::Sum(terms) => terms[0].width(),
            Expr::Difference(lhs, _) => lhs.width(),
        }
    }

    /// Concatenates `parts`, most significant first. Nested concatenations are
    /// flattened and a single part is returned as is.
    pub fn concat(parts: Vec<Expr>) -> Expr {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Expr::Concat(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        assert!(!flat.is_empty(), "Cannot concatenate zero expressions.");
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Expr::Concat(flat)
        }
    }

    pub fn and(lhs: &SignalRef, rhs: &SignalRef) -> Expr {
        assert_eq!(
            lhs.width(),
            rhs.width(),
            "Width mismatch in {} & {}",
            lhs,
            rhs
        );
        Expr::And(lhs.clone(), rhs.clone())
    }

    /// Sums `terms`, which must all have the same width. A single term is
    /// returned as is.
    pub fn sum(mut terms: Vec<Expr>) -> Expr {
        assert!(!terms.is_empty(), "Cannot sum zero terms.");
        let width = terms[0].width();
        if let Some(bad) = terms.iter().find(|t| t.width() != width) {
            panic!(
                "Width mismatch in sum: expected {} bits, found {} ({} bits)",
                width,
                bad,
                bad.width()
            );
        }
        if terms.len() == 1 {
            terms.remove(0)
        } else {
            Expr::Sum(terms)
        }
    }

    pub fn difference(lhs: Expr, rhs: Expr) -> Expr {
        assert_eq!(
            lhs.width(),
            rhs.width(),
            "Width mismatch in {} - {}",
            lhs,
            rhs
        );
        Expr::Difference(Box::new(lhs), Box::new(rhs))
    }

    /// Zero-extends `signal` to exactly `width` bits. Panics if the signal is
    /// wider than `width`.
    pub fn zero_extend(signal: &SignalRef, width: usize) -> Expr {
        if signal.width() > width {
            panic!(
                "Cannot zero-extend {} ({} bits) to {} bits.",
                signal,
                signal.width(),
                width
            );
        }
        Expr::resize(signal, width)
    }

    /// Brings `signal` to exactly `width` bits, zero-extending if it is
    /// narrower and keeping only its low bits if it is wider.
    pub fn resize(signal: &SignalRef, width: usize) -> Expr {
        assert!(width >= 1, "Cannot resize {} to zero bits.", signal);
        if signal.width() >= width {
            Expr::Signal(signal.low_bits(width))
        } else {
            Expr::concat(vec![
                Expr::Zeros(width - signal.width()),
                Expr::Signal(signal.clone()),
            ])
        }
    }

    /// Returns `(signal << amount) mod 2^width` as an expression of exactly
    /// `width` bits.
    pub fn shifted(signal: &SignalRef, amount: usize, width: usize) -> Expr {
        if amount >= width {
            return Expr::Zeros(width);
        }
        let body = Expr::resize(signal, width - amount);
        if amount == 0 {
            body
        } else {
            Expr::concat(vec![body, Expr::Zeros(amount)])
        }
    }
}

impl From<SignalRef> for Expr {
    fn from(signal: SignalRef) -> Self {
        Expr::Signal(signal)
    }
}

impl From<&SignalRef> for Expr {
    fn from(signal: &SignalRef) -> Self {
        Expr::Signal(signal.clone())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Signal(signal) => write!(f, "{signal}"),
            Expr::Zeros(width) => write!(f, "{width}'d0"),
            Expr::Concat(parts) => write!(f, "{{{}}}", parts.iter().join(", ")),
            Expr::And(lhs, rhs) => write!(f, "({lhs} & {rhs})"),
            Expr::Sum(terms) => write!(f, "{}", terms.iter().map(Operand).join(" + ")),
            Expr::Difference(lhs, rhs) => write!(
                f,
                "{} - {}",
                Operand(lhs.as_ref()),
                Operand(rhs.as_ref())
            ),
        }
    }
}

/// Renders an operand of `+` or `-`, parenthesizing nested sums and
/// differences so the text keeps the grouping of the expression tree.
struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Sum(_) | Expr::Difference(_, _) => write!(f, "({})", self.0),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_slices() {
        let x = SignalRef::new("x", 4);
        assert_eq!(x.to_string(), "x");
        assert_eq!(x.slice(3, 2).to_string(), "x[3:2]");
        assert_eq!(x.bit(1).to_string(), "x[1]");
        assert_eq!(SignalRef::new("w", 1).to_string(), "w");
    }

    #[test]
    fn resize_extends_or_truncates() {
        let z = SignalRef::new("z", 4);
        let wide = Expr::resize(&z, 6);
        assert_eq!(wide.to_string(), "{2'd0, z}");
        assert_eq!(wide.width(), 6);

        let narrow = Expr::resize(&z, 3);
        assert_eq!(narrow.to_string(), "z[2:0]");
        assert_eq!(narrow.width(), 3);

        assert_eq!(Expr::resize(&z, 4).to_string(), "z");
    }

    #[test]
    fn shifted_keeps_exact_width() {
        let z = SignalRef::new("z_mid", 6);
        let e = Expr::shifted(&z, 2, 6);
        assert_eq!(e.to_string(), "{z_mid[3:0], 2'd0}");
        assert_eq!(e.width(), 6);

        let e = Expr::shifted(&z, 3, 12);
        assert_eq!(e.to_string(), "{3'd0, z_mid, 3'd0}");
        assert_eq!(e.width(), 12);

        assert_eq!(Expr::shifted(&z, 8, 8), Expr::Zeros(8));
    }

    #[test]
    fn nested_differences_keep_their_grouping() {
        let a = Expr::from(SignalRef::new("a", 4));
        let b = Expr::from(SignalRef::new("b", 4));
        let c = Expr::from(SignalRef::new("c", 4));

        let e = Expr::difference(a.clone(), Expr::difference(b.clone(), c.clone()));
        assert_eq!(e.to_string(), "a - (b - c)");

        let e = Expr::difference(a.clone(), Expr::sum(vec![b.clone(), c.clone()]));
        assert_eq!(e.to_string(), "a - (b + c)");

        let e = Expr::sum(vec![a, Expr::difference(b, c)]);
        assert_eq!(e.to_string(), "a + (b - c)");
    }

    #[test]
    fn zero_operands_of_nested_difference_are_grouped() {
        let e = Expr::difference(
            Expr::Zeros(4),
            Expr::difference(Expr::Zeros(4), Expr::Zeros(4)),
        );
        assert_eq!(e.to_string(), "4'd0 - (4'd0 - 4'd0)");
        assert_eq!(e.width(), 4);
    }

    #[test]
    #[should_panic(expected = "Width mismatch in sum")]
    fn sum_rejects_mixed_widths() {
        let a = SignalRef::new("a", 3);
        let b = SignalRef::new("b", 4);
        Expr::sum(vec![Expr::from(&a), Expr::from(&b)]);
    }

    #[test]
    #[should_panic(expected = "Cannot zero-extend")]
    fn zero_extend_rejects_narrowing() {
        Expr::zero_extend(&SignalRef::new("p", 6), 4);
    }
}
