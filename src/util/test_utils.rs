use crate::{
    ast::Program,
    parser,
    synth::{self, print::PRELUDE},
    util::fmt::tree,
};

/// Each variant contains the input.
pub enum Test {
    /// Dumps the parsed tree.
    Parser(&'static str),
    /// Prints the synthesized code, without the prelude.
    Synth(&'static str),
}

pub enum Assertion {
    TreeOk(&'static str),
    ExpectedErrors(&'static [&'static str]),
}

/// Runs the given test, returning its textual output along with the
/// formatted error (if any).
#[track_caller]
pub fn run_pipeline(test: Test) -> (String, Vec<String>) {
    let (input, print): (_, fn(&Program) -> String) = match test {
        Test::Parser(input) => (input, tree::print_program_string),
        Test::Synth(input) => (input, |program| {
            let code = synth::synthesize(program);
            code.strip_prefix(PRELUDE)
                .expect("synthesized code starts with the prelude")
                .to_owned()
        }),
    };
    match parser::parse_program(input) {
        Ok(program) => (print(&program), vec![]),
        Err(error) => (String::new(), vec![error.to_string()]),
    }
}

#[track_caller]
pub fn run_assertion(assertion: Assertion, formatted_actual: &str, formatted_errors: &[String]) {
    match assertion {
        Assertion::TreeOk(expected) => {
            let expected_errors: &[&str] = &[];
            ::pretty_assertions::assert_eq!(formatted_errors, expected_errors);
            ::pretty_assertions::assert_eq!(formatted_actual.trim(), expected.trim());
        }
        Assertion::ExpectedErrors(expected_errors) => {
            ::pretty_assertions::assert_eq!(formatted_errors, expected_errors);
        }
    }
}

macro_rules! tree_tests {
    (
        use $test_kind:ident;

        $(
            fn $test_name:ident() {
                let program = $source:expr;
                $($assertions_tt:tt)*
            }
        )*
    ) => {
        $(
            #[test]
            fn $test_name() {
                let test: crate::util::test_utils::Test =
                    tree_tests!(@@get_test($test_kind), $source);
                let (formatted_actual, formatted_errors) =
                    crate::util::test_utils::run_pipeline(test);
                let ctx = (&formatted_actual, &formatted_errors);
                tree_tests!(@@expand_assertions, ctx, [$($assertions_tt)*]);
            }
        )*
    };

    (@@expand_assertions, $ctx:expr, []) => {};
    (@@expand_assertions, $ctx:expr, [
        let $assertion:ident = $assertion_expected:expr;
        $($rest_assertions_tt:tt)*
    ]) => {
        crate::util::test_utils::run_assertion(
            tree_tests!(@@assertion, $assertion, $assertion_expected),
            $ctx.0,
            $ctx.1,
        );
        tree_tests!(@@expand_assertions, $ctx, [$($rest_assertions_tt)*]);
    };

    (@@assertion, tree_ok, $expected:expr) => {
        crate::util::test_utils::Assertion::TreeOk(::indoc::indoc! { $expected })
    };
    (@@assertion, code_ok, $expected:expr) => {
        crate::util::test_utils::Assertion::TreeOk(::indoc::indoc! { $expected })
    };
    (@@assertion, expected_errors, $expected:expr) => {
        crate::util::test_utils::Assertion::ExpectedErrors($expected)
    };

    (@@get_test(parser), $source:expr) => {
        crate::util::test_utils::Test::Parser($source)
    };
    (@@get_test(synth), $source:expr) => {
        crate::util::test_utils::Test::Synth($source)
    };
}
pub(crate) use tree_tests;
