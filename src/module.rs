// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::expr::{Expr, SignalRef};

mod emit;

/// Kind of generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKind {
    Adder,
    Subtractor,
    Multiplier,
}

/// Identifies a generated module definition. The key alone determines the
/// module name and its ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
    pub kind: ModuleKind,
    pub width: usize,
}

impl ModuleKey {
    pub fn multiplier(width: usize) -> Self {
        ModuleKey {
            kind: ModuleKind::Multiplier,
            width,
        }
    }

    pub fn adder(width: usize) -> Self {
        ModuleKey {
            kind: ModuleKind::Adder,
            width,
        }
    }

    pub fn subtractor(width: usize) -> Self {
        ModuleKey {
            kind: ModuleKind::Subtractor,
            width,
        }
    }

    /// Returns the Verilog module name: `karatsuba_mult_<w>`, `adder_<w>` or
    /// `subtractor_<w>`.
    pub fn name(&self) -> String {
        match self.kind {
            ModuleKind::Multiplier => format!("karatsuba_mult_{}", self.width),
            ModuleKind::Adder => format!("adder_{}", self.width),
            ModuleKind::Subtractor => format!("subtractor_{}", self.width),
        }
    }

    /// Returns the ports of the module identified by this key, in declaration
    /// order.
    pub fn ports(&self) -> Vec<(&'static str, IO)> {
        let w = self.width;
        match self.kind {
            ModuleKind::Multiplier => vec![
                ("x", IO::Input(w)),
                ("y", IO::Input(w)),
                ("product", IO::Output(2 * w)),
            ],
            ModuleKind::Adder => vec![
                ("a", IO::Input(w)),
                ("b", IO::Input(w)),
                ("sum", IO::Output(w)),
            ],
            ModuleKind::Subtractor => vec![
                ("a", IO::Input(w)),
                ("b", IO::Input(w)),
                ("diff", IO::Output(w)),
            ],
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the direction (`Input` or `Output`) and bit width of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IO {
    Input(usize),
    Output(usize),
}

impl IO {
    /// Returns the width of the port in bits.
    pub fn width(&self) -> usize {
        match self {
            IO::Input(width) => *width,
            IO::Output(width) => *width,
        }
    }
}

/// Instantiation of a generated module with named port connections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub(crate) module: ModuleKey,
    pub(crate) name: String,
    pub(crate) connections: IndexMap<String, Expr>,
}

impl Instance {
    /// Returns the key of the instantiated module.
    pub fn module(&self) -> ModuleKey {
        self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the port connections, in the port order of the instantiated
    /// module.
    pub fn connections(&self) -> &IndexMap<String, Expr> {
        &self.connections
    }
}

/// A statement in the body of a module definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// `assign <target> = <expr>;`
    Assign { target: SignalRef, expr: Expr },
    Instance(Instance),
}

/// Represents a module definition, like `module <name> ... endmodule` in
/// Verilog. Ports are fixed by the module key; wires and statements are added
/// by the generators, in dataflow order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDef {
    pub(crate) key: ModuleKey,
    pub(crate) ports: IndexMap<String, IO>,
    pub(crate) wires: IndexMap<String, usize>,
    pub(crate) statements: Vec<Statement>,
}

impl ModuleDef {
    /// Creates an empty module definition with the ports implied by `key`.
    pub(crate) fn new(key: ModuleKey) -> Self {
        let ports = key
            .ports()
            .into_iter()
            .map(|(name, io)| (name.to_string(), io))
            .collect();
        ModuleDef {
            key,
            ports,
            wires: IndexMap::new(),
            statements: Vec::new(),
        }
    }

    pub fn key(&self) -> ModuleKey {
        self.key
    }

    pub fn name(&self) -> String {
        self.key.name()
    }

    pub fn ports(&self) -> &IndexMap<String, IO> {
        &self.ports
    }

    pub fn wires(&self) -> &IndexMap<String, usize> {
        &self.wires
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Returns the instances in this module definition, in emission order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Instance(inst) => Some(inst),
            Statement::Assign { .. } => None,
        })
    }

    /// Returns the port with the given name as a signal reference; panics if
    /// it does not exist.
    pub fn get_port(&self, name: &str) -> SignalRef {
        match self.ports.get(name) {
            Some(io) => SignalRef::new(name, io.width()),
            None => panic!("Port '{}' does not exist in module '{}'.", name, self.key),
        }
    }

    /// Declares a wire and returns a reference to it; panics if a port or
    /// wire with the same name already exists.
    pub(crate) fn add_wire(&mut self, name: &str, width: usize) -> SignalRef {
        if self.ports.contains_key(name) {
            panic!("Net '{}' is already declared in module {}.", name, self.key);
        }
        match self.wires.entry(name.to_string()) {
            Entry::Occupied(_) => {
                panic!("Net '{}' is already declared in module {}.", name, self.key)
            }
            Entry::Vacant(entry) => {
                entry.insert(width);
                SignalRef::new(name, width)
            }
        }
    }

    /// Adds `assign target = expr;`. The target must be a whole wire or output
    /// port whose width equals that of `expr`.
    pub(crate) fn assign(&mut self, target: &SignalRef, expr: Expr) {
        if !target.is_whole() {
            panic!("Assignment target {} must be a whole net.", target);
        }
        if target.width() != expr.width() {
            panic!(
                "Width mismatch in module {}: cannot assign {} ({} bits) to {} ({} bits).",
                self.key,
                expr,
                expr.width(),
                target,
                target.width()
            );
        }
        self.statements.push(Statement::Assign {
            target: target.clone(),
            expr,
        });
    }

    /// Instantiates `module` as `inst_name`, connecting every port of the
    /// instantiated module. Connection widths must match port widths exactly,
    /// and outputs must drive a whole net.
    pub(crate) fn instantiate(
        &mut self,
        module: ModuleKey,
        inst_name: String,
        connections: Vec<(&str, Expr)>,
    ) {
        let mut connected: IndexMap<String, Expr> = IndexMap::new();
        for (port_name, io) in module.ports() {
            let expr = match connections.iter().find(|(name, _)| *name == port_name) {
                Some((_, expr)) => expr.clone(),
                None => panic!("{}.{}.{} is unconnected", self.key, inst_name, port_name),
            };
            if expr.width() != io.width() {
                panic!(
                    "Width mismatch connecting {} ({} bits) to {}.{}.{} ({} bits)",
                    expr,
                    expr.width(),
                    self.key,
                    inst_name,
                    port_name,
                    io.width()
                );
            }
            if let IO::Output(_) = io {
                if !matches!(&expr, Expr::Signal(s) if s.is_whole()) {
                    panic!(
                        "Output {}.{}.{} must drive a whole net, not {}",
                        self.key, inst_name, port_name, expr
                    );
                }
            }
            connected.insert(port_name.to_string(), expr);
        }
        if connected.len() != connections.len() {
            panic!(
                "{}.{} has connections to ports that {} does not declare",
                self.key, inst_name, module
            );
        }
        self.statements.push(Statement::Instance(Instance {
            module,
            name: inst_name,
            connections: connected,
        }));
    }
}
