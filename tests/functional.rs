// SPDX-License-Identifier: Apache-2.0

mod common;

use karatsuba_gen::*;
use num_bigint::BigUint;
use rstest::rstest;

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(6)]
fn exhaustive_products(#[case] width: usize) {
    let design = Design::build(width).unwrap();
    for x in 0u32..(1 << width) {
        for y in 0u32..(1 << width) {
            let product = common::multiply(&design, &BigUint::from(x), &BigUint::from(y));
            assert_eq!(product, BigUint::from(x * y), "{x} * {y} at width {width}");
        }
    }
}

#[rstest]
#[case(7)]
#[case(8)]
#[case(9)]
#[case(16)]
#[case(31)]
#[case(32)]
#[case(33)]
#[case(64)]
#[case(100)]
#[case(129)]
fn sampled_products(#[case] width: usize) {
    let design = Design::build(width).unwrap();
    let operands = common::sample_operands(width, 12);
    for x in operands.iter() {
        for y in operands.iter() {
            assert_eq!(
                common::multiply(&design, x, y),
                x * y,
                "{x} * {y} at width {width}"
            );
        }
    }
}

#[test]
fn every_submodule_multiplies_correctly() {
    let design = Design::build(24).unwrap();
    for module in design.modules() {
        let key = module.key();
        if key.kind != ModuleKind::Multiplier {
            continue;
        }
        let sub = Design::build(key.width).unwrap();
        let operands = common::sample_operands(key.width, 6);
        for x in operands.iter() {
            for y in operands.iter() {
                assert_eq!(common::multiply(&sub, x, y), x * y, "{key}: {x} * {y}");
            }
        }
    }
}
