// SPDX-License-Identifier: Apache-2.0

//! Evaluates a generated [`Design`] on concrete operands, statement by
//! statement, with arbitrary-precision integers.

#![allow(dead_code)]

use std::collections::HashMap;

use karatsuba_gen::*;
use num_bigint::BigUint;

fn mask(value: BigUint, width: usize) -> BigUint {
    value % (BigUint::from(1u32) << width)
}

fn read(env: &HashMap<String, BigUint>, signal: &SignalRef) -> BigUint {
    let value = env
        .get(signal.name())
        .unwrap_or_else(|| panic!("{} read before it was driven", signal.name()));
    mask(value >> signal.lsb(), signal.width())
}

fn eval(env: &HashMap<String, BigUint>, expr: &Expr) -> BigUint {
    let value = match expr {
        Expr::Signal(signal) => read(env, signal),
        Expr::Zeros(_) => BigUint::from(0u32),
        Expr::Concat(parts) => parts.iter().fold(BigUint::from(0u32), |acc, part| {
            (acc << part.width()) + eval(env, part)
        }),
        Expr::And(lhs, rhs) => read(env, lhs) & read(env, rhs),
        Expr::Sum(terms) => terms.iter().map(|t| eval(env, t)).sum(),
        Expr::Difference(lhs, rhs) => {
            let modulus = BigUint::from(1u32) << expr.width();
            eval(env, lhs) + modulus - eval(env, rhs)
        }
    };
    mask(value, expr.width())
}

/// Runs `module` on the given input port values and returns the values of its
/// output ports.
pub fn run_module(
    design: &Design,
    module: &ModuleDef,
    inputs: HashMap<String, BigUint>,
) -> HashMap<String, BigUint> {
    let mut env = inputs;
    for statement in module.statements() {
        match statement {
            Statement::Assign { target, expr } => {
                env.insert(target.name().to_string(), eval(&env, expr));
            }
            Statement::Instance(inst) => {
                let sub = design
                    .get(&inst.module())
                    .unwrap_or_else(|| panic!("{} is not part of the design", inst.module()));
                let mut sub_inputs = HashMap::new();
                for (port, io) in sub.ports() {
                    if let IO::Input(_) = io {
                        sub_inputs.insert(port.clone(), eval(&env, &inst.connections()[port]));
                    }
                }
                let outputs = run_module(design, sub, sub_inputs);
                for (port, value) in outputs {
                    match &inst.connections()[&port] {
                        Expr::Signal(signal) => {
                            env.insert(signal.name().to_string(), value);
                        }
                        other => panic!("output {port} drives {other}"),
                    }
                }
            }
        }
    }
    module
        .ports()
        .iter()
        .filter(|(_, io)| matches!(io, IO::Output(_)))
        .map(|(name, _)| (name.clone(), env[name].clone()))
        .collect()
}

/// Multiplies `x` by `y` with the top module of `design`.
pub fn multiply(design: &Design, x: &BigUint, y: &BigUint) -> BigUint {
    let top = design.get(&design.top()).unwrap();
    let inputs = HashMap::from([
        ("x".to_string(), x.clone()),
        ("y".to_string(), y.clone()),
    ]);
    run_module(design, top, inputs).remove("product").unwrap()
}

/// Deterministic pseudo-random operands of `width` bits, including the
/// extremes.
pub fn sample_operands(width: usize, count: usize) -> Vec<BigUint> {
    let max = (BigUint::from(1u32) << width) - BigUint::from(1u32);
    let mut values = vec![BigUint::from(0u32), BigUint::from(1u32), max.clone()];
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15 ^ width as u64;
    while values.len() < count {
        let mut value = BigUint::from(0u32);
        for _ in 0..width.div_ceil(64) {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            value = (value << 64) + BigUint::from(state);
        }
        values.push(mask(value, width));
    }
    values
}
