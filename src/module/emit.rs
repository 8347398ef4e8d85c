// SPDX-License-Identifier: Apache-2.0

use itertools::Itertools;

use crate::module::{IO, Instance, ModuleDef, Statement};

impl ModuleDef {
    /// Returns Verilog code for this module definition as a string, ending in
    /// `endmodule` and a newline.
    pub fn emit(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("module {}(", self.key.name()));
        let ports = self
            .ports
            .iter()
            .map(|(name, io)| {
                let direction = match io {
                    IO::Input(_) => "input",
                    IO::Output(_) => "output",
                };
                format!("  {direction} wire {} {name}", range(io.width()))
            })
            .join(",\n");
        lines.push(ports);
        lines.push(");".to_string());

        for (name, width) in self.wires.iter() {
            lines.push(format!("  wire {} {name};", range(*width)));
        }

        for statement in self.statements.iter() {
            match statement {
                Statement::Assign { target, expr } => {
                    lines.push(format!("  assign {target} = {expr};"));
                }
                Statement::Instance(inst) => lines.push(emit_instance(inst)),
            }
        }

        lines.push("endmodule".to_string());

        let mut result = lines.join("\n");
        result.push('\n');
        result
    }
}

fn emit_instance(inst: &Instance) -> String {
    let connections = inst
        .connections
        .iter()
        .map(|(port_name, expr)| format!("    .{port_name}({expr})"))
        .join(",\n");
    format!(
        "  {} {} (\n{}\n  );",
        inst.module.name(),
        inst.name,
        connections
    )
}

/// Packed range for a net of `width` bits. Single-bit nets keep an explicit
/// `[0:0]` range so that bit-selects on them stay legal.
fn range(width: usize) -> String {
    format!("[{}:0]", width - 1)
}
