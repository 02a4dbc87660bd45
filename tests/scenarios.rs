use loopc::{
    compile,
    eval::Interpreter,
    parser::{self, parse_program},
    synth::{self, exec::Machine},
    token::{Position, TokenKind},
    Error,
};
use pretty_assertions::assert_eq;

/// Runs `function` both over the source tree and over the synthesized
/// target, checking they agree.
#[track_caller]
fn run(src: &str, function: &str, args: &[u64]) -> u64 {
    let program = parse_program(src).expect("failed to parse");
    let direct = Interpreter::new(&program).call(function, args);
    let module = synth::lower(&program);
    let synthesized = Machine::new(&module).call(function, args);
    assert_eq!(direct, synthesized);
    direct.expect("failed to evaluate")
}

#[test]
fn scenario_a_increment() {
    assert_eq!(run("main x1 DO x0 := x1 + 1 END", "main", &[5]), 6);
}

#[test]
fn scenario_b_bounded_loop() {
    let src = "main x1 DO x0 := 0; LOOP x1 DO x0 := x0 + 1 END END";
    assert_eq!(run(src, "main", &[3]), 3);
}

#[test]
fn scenario_c_conditional_loop_ignores_literal() {
    let src = "main x1 DO WHILE x1 != 5 DO x1 := x1 - 1 END; x0 := x1 END";
    assert_eq!(run(src, "main", &[3]), 0);
    assert_eq!(run(src, "main", &[5]), 0);
    assert_eq!(run(src, "main", &[8]), 0);
}

#[test]
fn scenario_d_saturating_subtraction() {
    let src = "main x1 x2 DO x0 := x1 - x2 END";
    assert_eq!(run(src, "main", &[2, 5]), 0);
    assert_eq!(run(src, "main", &[5, 2]), 3);
    assert!(compile(src)
        .unwrap()
        .contains("data.set('x0', subtract(data.get('x1'), data.get('x2')))"));

    let src = "main x1 x2 DO x0 := x1; LOOP x2 DO x0 := x0 - 1 END END";
    assert_eq!(run(src, "main", &[2, 5]), 0);
    assert_eq!(run("main x1 DO x0 := x1 - 5 END", "main", &[2]), 0);
}

#[test]
fn scenario_e_unknown_symbol() {
    let error = compile("@").unwrap_err();
    assert!(matches!(error, Error::Lex(_)));
    assert!(error.to_string().contains('@'));
    assert_eq!(error.pos(), Position::new(1, 1));
}

#[test]
fn scenario_f_missing_end() {
    let error = compile("main DO x0 := x0 + 1").unwrap_err();
    let Error::Parse(parser::Error::Unexpected {
        expected,
        actual,
        pos,
    }) = error
    else {
        panic!("unexpected error {error:?}");
    };
    assert_eq!(expected, TokenKind::End);
    assert_eq!(actual, TokenKind::Eof);
    assert_eq!(pos, Position::new(1, 8));
}

#[test]
fn bounded_loop_bound_is_fixed_at_entry() {
    let src = "main x1 DO LOOP x1 DO x1 := x1 + 2; x0 := x0 + 1 END END";
    assert_eq!(run(src, "main", &[3]), 3);
}

#[test]
fn demos() {
    let mult = include_str!("../demos/mult.loop");
    assert_eq!(run(mult, "mult", &[6, 7]), 42);
    assert_eq!(run(mult, "square", &[9]), 81);

    let countdown = include_str!("../demos/countdown.loop");
    assert_eq!(run(countdown, "countdown", &[12]), 12);
    assert_eq!(run(countdown, "diff", &[12, 5]), 7);
    assert_eq!(run(countdown, "diff", &[5, 12]), 0);

    let add = include_str!("../demos/add.loop");
    assert_eq!(run(add, "add", &[20, 22]), 42);
}

#[test]
fn compile_emits_prelude_then_functions() {
    let code = compile(include_str!("../demos/add.loop")).unwrap();
    assert!(code.starts_with(synth::print::PRELUDE));
    assert!(code.contains("\n\n\ndef add(arg1, arg2):\n"));
    assert!(code.ends_with("    return data.get('x0')\n"));
}

#[test]
fn compile_is_deterministic() {
    let src = include_str!("../demos/countdown.loop");
    assert_eq!(compile(src), compile(src));
}
