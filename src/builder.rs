// SPDX-License-Identifier: Apache-2.0

use crate::DIRECT_THRESHOLD;
use crate::context::GenerationContext;
use crate::direct::direct_product;
use crate::expr::{Expr, SignalRef};
use crate::module::{ModuleDef, ModuleKey};
use crate::width::WidthPlan;

impl GenerationContext {
    /// Ensures that the multiplier module for `n`-bit operands, and every
    /// module it depends on, is emitted into this context, and returns its
    /// key. Calling this again with the same `n` returns the same key without
    /// emitting anything. Panics if `n` is zero.
    ///
    /// Widths up to 2 are multiplied directly. Wider operands are split into
    /// high and low halves and recombined from three narrower products.
    pub fn build_multiplier(&mut self, n: usize) -> ModuleKey {
        assert!(n >= 1, "cannot build a zero-width multiplier");
        let key = ModuleKey::multiplier(n);
        if self.has_multiplier(n) {
            return key;
        }

        let mut module = ModuleDef::new(key);
        let x = module.get_port("x");
        let y = module.get_port("y");
        let product = module.get_port("product");

        if n <= DIRECT_THRESHOLD {
            module.assign(&product, direct_product(&x, &y));
        } else {
            self.build_karatsuba_body(&mut module, &WidthPlan::new(n), &x, &y, &product);
        }

        self.register_multiplier(module);
        key
    }

    fn build_karatsuba_body(
        &mut self,
        module: &mut ModuleDef,
        plan: &WidthPlan,
        x: &SignalRef,
        y: &SignalRef,
        product: &SignalRef,
    ) {
        let n = plan.width;
        let lw = plan.low_width;
        let hw = plan.high_width;

        // Split both operands into halves
        let a_low = module.add_wire("a_low", lw);
        module.assign(&a_low, x.slice(lw - 1, 0).into());
        let a_high = module.add_wire("a_high", hw);
        module.assign(&a_high, x.slice(n - 1, lw).into());
        let b_low = module.add_wire("b_low", lw);
        module.assign(&b_low, y.slice(lw - 1, 0).into());
        let b_high = module.add_wire("b_high", hw);
        module.assign(&b_high, y.slice(n - 1, lw).into());

        // z_high = a_high * b_high, z_low = a_low * b_low
        let z_high = module.add_wire("z_high", 2 * hw);
        let high = self.build_multiplier(hw);
        self.instantiate_multiplier(module, high, &a_high, &b_high, &z_high);

        let z_low = module.add_wire("z_low", 2 * lw);
        let low = self.build_multiplier(lw);
        self.instantiate_multiplier(module, low, &a_low, &b_low, &z_low);

        // s1 = a_high + a_low, s2 = b_high + b_low
        let s1 = module.add_wire("s1", plan.sum_width);
        self.instantiate_adder(module, plan.sum_width, &a_high, &a_low, &s1);
        let s2 = module.add_wire("s2", plan.sum_width);
        self.instantiate_adder(module, plan.sum_width, &b_high, &b_low, &s2);

        // p = s1 * s2
        let p = module.add_wire("p", plan.product_width);
        if plan.sum_product_is_direct() {
            module.assign(&p, direct_product(&s1, &s2));
        } else {
            let mid = self.build_multiplier(plan.sum_width);
            self.instantiate_multiplier(module, mid, &s1, &s2, &p);
        }

        // z_mid = p - z_high - z_low
        let z_mid_partial = module.add_wire("z_mid_partial", plan.product_width);
        self.instantiate_subtractor(module, plan.product_width, &p, &z_high, &z_mid_partial);
        let z_mid = module.add_wire("z_mid", plan.product_width);
        self.instantiate_subtractor(module, plan.product_width, &z_mid_partial, &z_low, &z_mid);

        // product = (z_high << 2*lw) + (z_mid << lw) + z_low
        let fw = plan.final_width;
        let adder = self.require_adder(fw);
        let product_partial = module.add_wire("product_partial", fw);
        let name = self.next_instance_name(adder);
        log::trace!("instantiating {adder} as {name} in {}", module.key);
        module.instantiate(
            adder,
            name,
            vec![
                ("a", Expr::shifted(&z_high, 2 * lw, fw)),
                ("b", Expr::shifted(&z_mid, lw, fw)),
                ("sum", product_partial.clone().into()),
            ],
        );
        self.instantiate_adder(module, fw, &product_partial, &z_low, product);
    }

    fn instantiate_multiplier(
        &mut self,
        module: &mut ModuleDef,
        multiplier: ModuleKey,
        x: &SignalRef,
        y: &SignalRef,
        product: &SignalRef,
    ) {
        let name = self.next_instance_name(multiplier);
        log::trace!("instantiating {multiplier} as {name} in {}", module.key);
        module.instantiate(
            multiplier,
            name,
            vec![
                ("x", x.into()),
                ("y", y.into()),
                ("product", product.into()),
            ],
        );
    }

    /// Instantiates `adder_<width>` computing `sum = a + b`, zero-extending
    /// both operands to `width`.
    fn instantiate_adder(
        &mut self,
        module: &mut ModuleDef,
        width: usize,
        a: &SignalRef,
        b: &SignalRef,
        sum: &SignalRef,
    ) {
        let adder = self.require_adder(width);
        let name = self.next_instance_name(adder);
        log::trace!("instantiating {adder} as {name} in {}", module.key);
        module.instantiate(
            adder,
            name,
            vec![
                ("a", Expr::zero_extend(a, width)),
                ("b", Expr::zero_extend(b, width)),
                ("sum", sum.into()),
            ],
        );
    }

    /// Instantiates `subtractor_<width>` computing `diff = a - b`,
    /// zero-extending both operands to `width`.
    fn instantiate_subtractor(
        &mut self,
        module: &mut ModuleDef,
        width: usize,
        a: &SignalRef,
        b: &SignalRef,
        diff: &SignalRef,
    ) {
        let subtractor = self.require_subtractor(width);
        let name = self.next_instance_name(subtractor);
        log::trace!("instantiating {subtractor} as {name} in {}", module.key);
        module.instantiate(
            subtractor,
            name,
            vec![
                ("a", Expr::zero_extend(a, width)),
                ("b", Expr::zero_extend(b, width)),
                ("diff", diff.into()),
            ],
        );
    }
}
