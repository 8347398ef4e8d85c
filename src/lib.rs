// SPDX-License-Identifier: Apache-2.0

//! Generates Verilog-2001 module hierarchies for unsigned N-bit multipliers
//! built by recursive Karatsuba decomposition, together with a self-checking
//! testbench.
//!
//! ```
//! let verilog = karatsuba_gen::generate_multiplier_module(8).unwrap();
//! assert!(verilog.contains("module karatsuba_mult_8("));
//!
//! let tb = karatsuba_gen::generate_testbench(8).unwrap();
//! assert!(tb.contains("karatsuba_mult_8 uut ("));
//! ```

mod arith;
mod builder;
mod context;
mod design;
mod direct;
mod error;
mod expr;
mod module;
mod testbench;
mod width;

pub use context::GenerationContext;
pub use design::Design;
pub use error::Error;
pub use expr::{Expr, SignalRef};
pub use module::{IO, Instance, ModuleDef, ModuleKey, ModuleKind, Statement};
pub use testbench::TestbenchPlan;
pub use width::WidthPlan;

/// Largest operand width accepted by the generators. The product port of a
/// `MAX_WIDTH`-bit multiplier is 65536 bits wide, which is the smallest vector
/// length limit a Verilog-2001 implementation is allowed to impose.
pub const MAX_WIDTH: usize = 1 << 15;

/// Widths below the Karatsuba threshold are multiplied directly.
pub const DIRECT_THRESHOLD: usize = 2;

/// Returns the Verilog source of the Karatsuba multiplier hierarchy for `n`-bit
/// operands. The top module is `karatsuba_mult_<n>` and is emitted last.
///
/// Returns an empty string if `n` is less than 1, and
/// [`Error::WidthTooLarge`] if `n` exceeds [`MAX_WIDTH`].
pub fn generate_multiplier_module(n: i64) -> Result<String, Error> {
    match checked_width(n)? {
        Some(width) => Ok(Design::build(width)?.emit()),
        None => Ok(String::new()),
    }
}

/// Returns a self-checking testbench for the `n`-bit multiplier generated by
/// [`generate_multiplier_module`].
///
/// Returns an empty string if `n` is less than 1, and
/// [`Error::WidthTooLarge`] if `n` exceeds [`MAX_WIDTH`].
pub fn generate_testbench(n: i64) -> Result<String, Error> {
    match checked_width(n)? {
        Some(width) => Ok(TestbenchPlan::new(width)?.emit()),
        None => Ok(String::new()),
    }
}

/// Maps a raw width to `None` when it is below 1, and rejects widths above
/// [`MAX_WIDTH`].
fn checked_width(n: i64) -> Result<Option<usize>, Error> {
    if n < 1 {
        log::debug!("width {n} is below 1; nothing to generate");
        return Ok(None);
    }
    let width = usize::try_from(n).map_err(|_| Error::WidthTooLarge {
        width: n as u64,
        max: MAX_WIDTH,
    })?;
    error::check_max_width(width)?;
    Ok(Some(width))
}
