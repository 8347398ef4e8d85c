// SPDX-License-Identifier: Apache-2.0

use num_bigint::BigUint;

use crate::error::{Error, check_width};
use crate::module::ModuleKey;

/// Operand widths up to this are tested exhaustively.
const EXHAUSTIVE_MAX_WIDTH: usize = 8;

/// Parameters of the self-checking testbench for an `n`-bit multiplier.
/// Operand pairs are drawn from `[0, max)` in increments of `step`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestbenchPlan {
    pub width: usize,
    /// `1` for widths up to 8, otherwise `2^(width / 2)`.
    pub step: BigUint,
    /// `2^width`.
    pub max: BigUint,
}

impl TestbenchPlan {
    pub fn new(width: usize) -> Result<Self, Error> {
        check_width(width)?;
        let one = BigUint::from(1u32);
        let step = if width <= EXHAUSTIVE_MAX_WIDTH {
            one.clone()
        } else {
            one.clone() << (width / 2)
        };
        Ok(TestbenchPlan {
            width,
            step,
            max: one << width,
        })
    }

    /// Returns the testbench source. It instantiates `karatsuba_mult_<width>`
    /// as `uut`, compares every sampled product against `a * b` computed at
    /// the full product width, and prints `All tests passed.` or the number of
    /// mismatches.
    pub fn emit(&self) -> String {
        let n = self.width;
        // Loop variables are one bit wider than the operands so that they can
        // hold MAX itself.
        let loop_width = n + 1;
        let top = ModuleKey::multiplier(n).name();
        let max = &self.max;
        let step = &self.step;

        format!(
            "\
`timescale 1ns / 1ps

module tb_karatsuba_multiplier;

  parameter N = {n};
  parameter [N:0] MAX = {loop_width}'d{max};
  parameter [N:0] STEP = {loop_width}'d{step};

  reg [N-1:0] a;
  reg [N-1:0] b;
  wire [2*N-1:0] product;

  {top} uut (
    .x(a),
    .y(b),
    .product(product)
  );

  reg [N:0] i;
  reg [N:0] j;
  reg [2*N-1:0] expected;
  integer errors;

  initial begin
    a = 0;
    b = 0;
    errors = 0;

    #10;

    for (i = 0; i < MAX; i = i + STEP) begin
      for (j = 0; j < MAX; j = j + STEP) begin
        a = i;
        b = j;
        expected = a * b;
        #1;
        if (product !== expected) begin
          $display(\"Mismatch! a=%0d, b=%0d, product=%0d, expected=%0d\", a, b, product, expected);
          errors = errors + 1;
        end
      end
    end

    if (errors == 0) begin
      $display(\"All tests passed.\");
    end else begin
      $display(\"Errors found: %0d.\", errors);
    end

    $finish;
  end

endmodule
"
        )
    }
}
