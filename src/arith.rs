// SPDX-License-Identifier: Apache-2.0

use crate::expr::Expr;
use crate::module::{ModuleDef, ModuleKey};

/// `adder_<width>`: `sum = a + b`, truncated to `width` bits.
pub(crate) fn adder_module(width: usize) -> ModuleDef {
    let mut module = ModuleDef::new(ModuleKey::adder(width));
    let a = module.get_port("a");
    let b = module.get_port("b");
    let sum = module.get_port("sum");
    module.assign(&sum, Expr::sum(vec![Expr::from(a), Expr::from(b)]));
    module
}

/// `subtractor_<width>`: `diff = a - b`, modulo 2^width.
pub(crate) fn subtractor_module(width: usize) -> ModuleDef {
    let mut module = ModuleDef::new(ModuleKey::subtractor(width));
    let a = module.get_port("a");
    let b = module.get_port("b");
    let diff = module.get_port("diff");
    module.assign(&diff, Expr::difference(Expr::from(a), Expr::from(b)));
    module
}
