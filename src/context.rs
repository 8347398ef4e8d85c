// SPDX-License-Identifier: Apache-2.0

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::module::{ModuleDef, ModuleKey};

/// Bookkeeping for one generation request: the multiplier modules emitted so
/// far (in dependency order), the adder and subtractor widths that the
/// multipliers need, and a counter for minting instance names.
///
/// A context is created for each top-level request and consumed by
/// [`GenerationContext::assemble`]. Contexts are never shared, so independent
/// requests can run concurrently.
#[derive(Debug, Default)]
pub struct GenerationContext {
    pub(crate) multipliers: IndexMap<usize, ModuleDef>,
    pub(crate) adder_widths: IndexSet<usize>,
    pub(crate) subtractor_widths: IndexSet<usize>,
    next_instance: usize,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the multiplier module for `width` has already been
    /// emitted into this context.
    pub fn has_multiplier(&self, width: usize) -> bool {
        self.multipliers.contains_key(&width)
    }

    /// Widths of the emitted multiplier modules, in emission order.
    pub fn multiplier_widths(&self) -> Vec<usize> {
        self.multipliers.keys().copied().collect()
    }

    /// Distinct adder widths required so far, ascending.
    pub fn adder_widths(&self) -> Vec<usize> {
        self.adder_widths.iter().copied().sorted().collect()
    }

    /// Distinct subtractor widths required so far, ascending.
    pub fn subtractor_widths(&self) -> Vec<usize> {
        self.subtractor_widths.iter().copied().sorted().collect()
    }

    /// Records that an adder of `width` bits is needed and returns its key.
    pub(crate) fn require_adder(&mut self, width: usize) -> ModuleKey {
        if self.adder_widths.insert(width) {
            log::debug!("requiring adder_{width}");
        }
        ModuleKey::adder(width)
    }

    /// Records that a subtractor of `width` bits is needed and returns its key.
    pub(crate) fn require_subtractor(&mut self, width: usize) -> ModuleKey {
        if self.subtractor_widths.insert(width) {
            log::debug!("requiring subtractor_{width}");
        }
        ModuleKey::subtractor(width)
    }

    /// Registers a finished multiplier module. Panics if a module for the same
    /// width has already been registered.
    pub(crate) fn register_multiplier(&mut self, module: ModuleDef) {
        let width = module.key.width;
        log::debug!("registering {}", module.key);
        if self.multipliers.insert(width, module).is_some() {
            panic!("Two definitions of karatsuba_mult_{width}");
        }
    }

    /// Returns a fresh instance name for an instance of `module`.
    pub(crate) fn next_instance_name(&mut self, module: ModuleKey) -> String {
        let name = format!("{}_i{}", module.name(), self.next_instance);
        self.next_instance += 1;
        name
    }
}
