//! Generated programs must behave the same whether they are evaluated
//! directly or through their synthesized form.

use loopc::{eval::Interpreter, parser::parse_program, synth};
use proptest::{prelude::*, strategy::Union};

const HELPERS: &str = "inc x1 DO x0 := x1 + 1 END\ndec x1 DO x0 := x1 - 1 END\n";

/// Generates statements which always terminate: bounded loops only count
/// over `x1` and `x2`, which are never assigned, and conditional loops only
/// test `x9`, which they decrement first and which is never reset inside a
/// conditional loop.
fn stmt(depth: u32, in_while: bool) -> BoxedStrategy<String> {
    let target = prop_oneof![Just("x0"), Just("x3"), Just("x4")];
    let operand = prop_oneof![
        Just("x0"),
        Just("x1"),
        Just("x2"),
        Just("x3"),
        Just("x4"),
        Just("x9"),
    ];
    let op = prop_oneof![Just("+"), Just("-")];

    let mut leaves = vec![
        (target.clone(), operand.clone(), op, 0u64..4)
            .prop_map(|(t, l, o, n)| format!("{t} := {l} {o} {n}"))
            .boxed(),
        // Right operands are never assigned targets, so values grow additively.
        (
            target.clone(),
            operand.clone(),
            prop_oneof![Just("+"), Just("-")],
            prop_oneof![Just("x1"), Just("x2"), Just("x9")],
        )
            .prop_map(|(t, l, o, r)| format!("{t} := {l} {o} {r}"))
            .boxed(),
        (target.clone(), prop_oneof![Just("inc"), Just("dec")], operand.clone())
            .prop_map(|(t, f, a)| format!("{t} := {f} {a}"))
            .boxed(),
        (target.clone(), 0u64..10)
            .prop_map(|(t, n)| format!("{t} := {n}"))
            .boxed(),
        (target, operand)
            .prop_map(|(t, v)| format!("{t} := {v}"))
            .boxed(),
    ];
    if !in_while {
        leaves.push((0u64..4).prop_map(|n| format!("x9 := x1 + {n}")).boxed());
    }
    let leaf = Union::new(leaves).boxed();
    if depth == 0 {
        return leaf;
    }

    let body = |in_while| {
        prop::collection::vec(stmt(depth - 1, in_while), 1..4).prop_map(|stmts| stmts.join("; "))
    };
    let bounded = (prop_oneof![Just("x1"), Just("x2")], body(in_while))
        .prop_map(|(var, body)| format!("LOOP {var} DO {body} END"));
    let conditional = (0u64..10, body(true))
        .prop_map(|(n, body)| format!("WHILE x9 != {n} DO x9 := x9 - 1; {body} END"));
    prop_oneof![3 => leaf, 1 => bounded, 1 => conditional].boxed()
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(stmt(2, false), 1..5)
        .prop_map(|stmts| format!("{HELPERS}main x1 x2 DO {} END", stmts.join(";\n")))
}

proptest! {
    #[test]
    fn synthesized_matches_direct_evaluation(src in program(), a in 0u64..6, b in 0u64..6) {
        let program = parse_program(&src).unwrap();
        let direct = Interpreter::new(&program).call("main", &[a, b]);
        let module = synth::lower(&program);
        let synthesized = synth::exec::Machine::new(&module).call("main", &[a, b]);
        prop_assert!(direct.is_ok());
        prop_assert_eq!(direct, synthesized);
    }

    #[test]
    fn conditional_literal_is_irrelevant(n in 0u64..1000, start in 0u64..50) {
        let src = format!("main x1 DO WHILE x1 != {n} DO x1 := x1 - 1; x0 := x0 + 1 END END");
        let program = parse_program(&src).unwrap();
        prop_assert_eq!(Interpreter::new(&program).call("main", &[start]), Ok(start));
    }

    #[test]
    fn bounded_loop_uses_entry_value(start in 0u64..50, step in 0u64..5) {
        let src = format!("main x1 DO LOOP x1 DO x1 := x1 + {step}; x0 := x0 + 1 END END");
        let program = parse_program(&src).unwrap();
        let module = synth::lower(&program);
        prop_assert_eq!(synth::exec::Machine::new(&module).call("main", &[start]), Ok(start));
    }
}
