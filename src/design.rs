// SPDX-License-Identifier: Apache-2.0

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::arith::{adder_module, subtractor_module};
use crate::context::GenerationContext;
use crate::error::{Error, check_width};
use crate::module::{Instance, ModuleDef, ModuleKey, ModuleKind};

/// A complete multiplier hierarchy: every module definition needed by the top
/// module, ordered so that each module appears after the modules it
/// instantiates.
#[derive(Clone, Debug)]
pub struct Design {
    top: ModuleKey,
    modules: IndexMap<ModuleKey, ModuleDef>,
}

impl Design {
    /// Builds the Karatsuba multiplier hierarchy for `width`-bit operands in a
    /// fresh [`GenerationContext`].
    pub fn build(width: usize) -> Result<Design, Error> {
        check_width(width)?;
        let mut ctx = GenerationContext::new();
        let top = ctx.build_multiplier(width);
        Ok(ctx.assemble(top))
    }

    /// Returns the key of the top module.
    pub fn top(&self) -> ModuleKey {
        self.top
    }

    /// Returns the module definition for `key`, if it is part of the design.
    pub fn get(&self, key: &ModuleKey) -> Option<&ModuleDef> {
        self.modules.get(key)
    }

    /// Returns all module definitions in emission order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleDef> {
        self.modules.values()
    }

    /// Returns the Verilog source of the whole design, one module after
    /// another separated by a blank line.
    pub fn emit(&self) -> String {
        self.modules.values().map(ModuleDef::emit).join("\n")
    }
}

impl GenerationContext {
    /// Consumes this context and orders the modules that `top` depends on
    /// into a [`Design`]: adders by ascending width, then subtractors by
    /// ascending width, then the multipliers in the order they were
    /// registered, which places dependencies before dependents and `top` last.
    /// Modules built in this context but not used by `top` are left out.
    /// Panics if `top` has not been built in this context.
    pub fn assemble(self, top: ModuleKey) -> Design {
        if top.kind != ModuleKind::Multiplier || !self.has_multiplier(top.width) {
            panic!("{top} has not been built in this context");
        }
        let used = self.reachable_from(top);

        let adders = self
            .adder_widths
            .iter()
            .copied()
            .filter(|width| used.contains(&ModuleKey::adder(*width)))
            .sorted()
            .map(adder_module);
        let subtractors = self
            .subtractor_widths
            .iter()
            .copied()
            .filter(|width| used.contains(&ModuleKey::subtractor(*width)))
            .sorted()
            .map(subtractor_module);
        let multipliers = self
            .multipliers
            .into_values()
            .filter(|module| used.contains(&module.key));

        let modules = adders
            .chain(subtractors)
            .chain(multipliers)
            .map(|module| (module.key, module))
            .collect::<IndexMap<_, _>>();

        log::debug!("assembled {} modules for {top}", modules.len());
        Design { top, modules }
    }

    /// Returns `top` and every module it instantiates, directly or through
    /// other multipliers.
    fn reachable_from(&self, top: ModuleKey) -> IndexSet<ModuleKey> {
        let mut reached = IndexSet::new();
        let mut pending = vec![top];
        while let Some(key) = pending.pop() {
            if !reached.insert(key) {
                continue;
            }
            if key.kind == ModuleKind::Multiplier {
                let module = &self.multipliers[&key.width];
                pending.extend(module.instances().map(Instance::module));
            }
        }
        reached
    }
}
