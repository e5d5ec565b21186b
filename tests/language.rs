use std::{cell::RefCell, collections::HashMap, fs, rc::Rc};

use quackscript::{
    interpreter::{
        evaluator::core::Evaluator,
        host::{Host, HostOutput},
    },
    parse, run_script, tokenize,
};

fn run(src: &str) -> HostOutput {
    let (host, output) = Host::collecting();
    if let Err(e) = run_script(src, host) {
        panic!("Script failed to parse: {e}");
    }
    Rc::try_unwrap(output).expect("host is dropped after the run")
                          .into_inner()
}

fn assert_stdout(src: &str, expected: &[&str]) {
    let output = run(src);
    assert_eq!(output.stderr, Vec::<String>::new(), "unexpected stderr for: {src}");
    assert_eq!(output.stdout, expected, "stdout mismatch for: {src}");
}

fn assert_runtime_error(src: &str, fragment: &str) {
    let output = run(src);
    let stderr = output.stderr.join("\n");
    assert!(stderr.contains(fragment),
            "expected stderr containing {fragment:?} for: {src}\ngot: {stderr:?}");
}

fn assert_parse_error(src: &str) {
    let (host, _output) = Host::collecting();
    assert!(run_script(src, host).is_err(),
            "script parsed but was expected to fail: {src}");
}

/// Builds a host whose file loader serves from an in-memory map, for
/// exercising imports.
fn host_with_files(files: &[(&str, &str)]) -> (Host, Rc<RefCell<HostOutput>>) {
    let output = Rc::new(RefCell::new(HostOutput::default()));
    let stdout = Rc::clone(&output);
    let stderr = Rc::clone(&output);
    let files: HashMap<String, String> = files.iter()
                                              .map(|(p, s)| (p.to_string(), s.to_string()))
                                              .collect();

    let host = Host::new(Box::new(move |line| stdout.borrow_mut().stdout.push(line.to_string())),
                         Box::new(move |line| stderr.borrow_mut().stderr.push(line.to_string())),
                         Box::new(move |path| {
                             files.get(path)
                                  .cloned()
                                  .ok_or_else(|| "file not found".to_string())
                         }));
    (host, output)
}

// ─── Declarations and assignment ─────────────────────────────────────────────

#[test]
fn declaration_and_arithmetic() {
    assert_stdout("QUACK x <- 2 + 3🦆 x🦆", &["5"]);
    assert_stdout("quack y <- 7 * 9🦆 y🦆", &["63"]);
    assert_stdout("quack z <- 10 / 4🦆 z🦆", &["2.5"]);
    assert_stdout("quack r <- 7 % 4🦆 r🦆", &["3"]);
}

#[test]
fn variables_can_be_reassigned() {
    assert_stdout("quack x <- 1🦆 x <- 2🦆 x🦆", &["2"]);
}

#[test]
fn constants_cannot_be_reassigned() {
    assert_runtime_error("QUACK x <- 1🦆 x <- 2🦆", "Cannot assign to constant 'x'");
}

#[test]
fn redeclaration_in_same_scope_is_error() {
    assert_runtime_error("quack x <- 1🦆 quack x <- 2🦆", "already declared");
}

#[test]
fn undefined_identifier_is_error() {
    assert_runtime_error("y🦆", "Unknown identifier 'y'");
}

#[test]
fn declared_type_is_checked() {
    assert_stdout("quack n: number <- 4🦆 n🦆", &["4"]);
    assert_runtime_error("quack n: number <- 'hi'🦆", "expected number, found text");
}

#[test]
fn assignment_is_type_checked() {
    assert_runtime_error("quack n <- 1🦆 n <- 'hi'🦆", "expected number, found text");
}

#[test]
fn nothing_requires_an_optional() {
    assert_runtime_error("quack x <- nothing🦆", "not optional");
    assert_runtime_error("quack n: number <- nothing🦆", "not optional");
    assert_runtime_error("quack n: number? <- 1🦆 n <- nothing🦆 n <- 'hi'🦆",
                         "expected number, found text");
}

#[test]
fn optionals_accept_nothing_and_their_type() {
    // A `nothing` result at the top level prints no line.
    assert_stdout("quack n: number? <- nothing🦆 n🦆", &[]);
    assert_stdout("quack n: number? <- nothing🦆 n <- 5🦆 n🦆", &["5"]);
}

// ─── Functions ───────────────────────────────────────────────────────────────

#[test]
fn function_declaration_and_call() {
    assert_stdout("QUACK greet <- (:name:) :> {: return 'hi ' + name🦆 :}🦆 greet(:'ada':)🦆",
                  &["hi ada"]);
    assert_stdout("QUACK add <- (:a, b:) :> {: return a + b🦆 :}🦆 add(:2, 5:)🦆", &["7"]);
}

#[test]
fn function_without_return_yields_nothing() {
    assert_stdout("QUACK noop <- (::) :> {: 1 + 1🦆 :}🦆 noop(::)🦆", &[]);
}

#[test]
fn bare_return_yields_nothing() {
    assert_stdout("QUACK quiet <- (::) :> {: return🦆 :}🦆 quiet(::)🦆", &[]);
}

#[test]
fn wrong_function_arity_is_error() {
    let output = run("QUACK f <- (:a, b:) :> {: return a + b🦆 :}🦆 f(:1:)🦆");
    assert!(output.stdout.is_empty());
    assert!(output.stderr.join("\n").contains("Expected 2 arguments, found 1"));
}

#[test]
fn typed_parameters_check_their_arguments() {
    assert_stdout("QUACK double <- (:n: number:) :> {: return n * 2🦆 :}🦆 double(:21:)🦆",
                  &["42"]);
    assert_runtime_error("QUACK double <- (:n: number:) :> {: return n * 2🦆 :}🦆 double(:'x':)🦆",
                         "Argument 'n' expects number, found text");
}

#[test]
fn functions_are_first_class() {
    assert_stdout("QUACK one <- (::) :> {: return 1🦆 :}🦆 QUACK alias <- one🦆 alias(::)🦆",
                  &["1"]);
    assert_stdout(
                  "QUACK call <- (:f: func:) :> {: return f(::)🦆 :}🦆
                   QUACK one <- (::) :> {: return 1🦆 :}🦆
                   call(:one:)🦆",
                  &["1"],
    );
}

#[test]
fn return_escapes_nested_statements() {
    assert_stdout(
                  "QUACK pick <- (:flag: boolean:) :> {:
                       if flag then
                           return 'yes'🦆
                       end
                       return 'no'🦆
                   :}🦆
                   pick(:true:)🦆
                   pick(:false:)🦆",
                  &["yes", "no"],
    );
}

#[test]
fn return_outside_function_is_error() {
    assert_runtime_error("return 1🦆", "'return' outside of a function");
}

#[test]
fn calling_a_non_function_is_error() {
    assert_runtime_error("quack x <- 1🦆 x(:2:)🦆", "'x' is not callable");
    assert_runtime_error("quack f: func? <- nothing🦆 f(::)🦆",
                         "'f' is nothing and cannot be called");
}

// ─── Conditionals ────────────────────────────────────────────────────────────

#[test]
fn if_takes_the_matching_branch() {
    assert_stdout("if 2 < 3 then print(:'yes':)🦆 else print(:'no':)🦆 end", &["yes"]);
    assert_stdout("if 2 > 3 then print(:'yes':)🦆 else print(:'no':)🦆 end", &["no"]);
    assert_stdout("if false then print(:'yes':)🦆 end", &[]);
}

#[test]
fn nothing_condition_is_false() {
    assert_stdout("quack b: boolean? <- nothing🦆 if b then print(:'t':)🦆 else print(:'f':)🦆 end",
                  &["f"]);
}

#[test]
fn non_boolean_condition_is_error() {
    assert_runtime_error("if 1 then 2🦆 end", "Condition must be a boolean, found number");
    assert_runtime_error("if 'yes' then 2🦆 end", "Condition must be a boolean, found text");
}

// ─── Binary operators ────────────────────────────────────────────────────────

#[test]
fn comparisons_and_logic() {
    assert_stdout("1 < 2🦆", &["true"]);
    assert_stdout("2 <= 2🦆", &["true"]);
    assert_stdout("3 > 4🦆", &["false"]);
    assert_stdout("2 == 2🦆", &["true"]);
    assert_stdout("2 != 2🦆", &["false"]);
    assert_stdout("true && false🦆", &["false"]);
    assert_stdout("true || false🦆", &["true"]);
    assert_stdout("true == false🦆", &["false"]);
}

#[test]
fn text_concatenation_and_equality() {
    assert_stdout("'quack' + '!'🦆", &["quack!"]);
    assert_stdout("'a' == 'a'🦆", &["true"]);
    assert_stdout("'a' != 'b'🦆", &["true"]);
}

#[test]
fn cross_type_equality_is_false() {
    assert_stdout("'a' == 3🦆", &["false"]);
    assert_stdout("'a' != 3🦆", &["true"]);
    assert_stdout("nothing == 0🦆", &["false"]);
}

#[test]
fn cross_type_arithmetic_is_error() {
    assert_runtime_error("'a' + 3🦆", "Cannot use + on text and number");
    assert_runtime_error("true + true🦆", "Cannot use + on boolean and boolean");
    assert_runtime_error("nothing == nothing🦆", "Cannot use == on nothing and nothing");
}

#[test]
fn division_by_zero_is_infinite() {
    assert_stdout("1 / 0🦆", &["inf"]);
    assert_stdout("0 - 1 / 0🦆", &["-inf"]);
}

#[test]
fn nan_comparisons_follow_ieee() {
    assert_stdout("quack n <- 0 / 0🦆 n == n🦆", &["false"]);
    assert_stdout("quack n <- 0 / 0🦆 n != n🦆", &["true"]);
    assert_stdout("quack n <- 0 / 0🦆 n < 1🦆", &["false"]);
}

#[test]
fn functions_are_not_operands() {
    assert_runtime_error("QUACK f <- (::) :> {: return 1🦆 :}🦆 f + 1🦆",
                         "cannot be used as an operand");
    assert_runtime_error("QUACK f <- (::) :> {: return 1🦆 :}🦆 f == f🦆",
                         "cannot be used as an operand");
}

#[test]
fn vector_arithmetic_is_not_defined() {
    assert_runtime_error("vec2(:1, 2:) + vec2(:3, 4:)🦆", "Cannot use + on vector2 and vector2");
}

// ─── Accessors ───────────────────────────────────────────────────────────────

#[test]
fn primitive_attributes_dispatch() {
    assert_stdout("'duck'.length(::)🦆", &["4"]);
    assert_stdout("'Quack'.upper(::)🦆", &["QUACK"]);
    assert_stdout("'Quack'.lower(::)🦆", &["quack"]);
    assert_stdout("'  q  '.trim(::)🦆", &["q"]);
    assert_stdout("(2.7).floor(::)🦆", &["2"]);
    assert_stdout("(2.2).ceil(::)🦆", &["3"]);
    assert_stdout("(2.5).round(::)🦆", &["3"]);
    assert_stdout("(0 - 4).abs(::)🦆", &["4"]);
    assert_stdout("true.negate(::)🦆", &["false"]);
}

#[test]
fn attributes_chain() {
    assert_stdout("'  duck  '.trim(::).upper(::)🦆", &["DUCK"]);
    assert_stdout("'duck'.length(::) + 1🦆", &["5"]);
}

#[test]
fn unknown_attribute_is_error() {
    assert_runtime_error("'a'.size(::)🦆", "text has no attribute 'size'");
    assert_runtime_error("(1).quack(::)🦆", "number has no attribute 'quack'");
}

#[test]
fn plain_field_access_is_error() {
    assert_runtime_error("'a'.length🦆", "text has no attribute 'length'");
}

// ─── Standard library ────────────────────────────────────────────────────────

#[test]
fn print_writes_and_returns_nothing() {
    // One line from print itself; no echo of a return value.
    assert_stdout("print(:'hi':)🦆", &["hi"]);
    assert_stdout("print(:1 + 1:)🦆", &["2"]);
}

#[test]
fn to_text_converts_values() {
    assert_stdout("to_text(:5:) + '!'🦆", &["5!"]);
    assert_stdout("to_text(:true:)🦆", &["true"]);
}

#[test]
fn to_number_parses_or_yields_nothing() {
    assert_stdout("quack n: number? <- to_number(:'4.5':)🦆 n🦆", &["4.5"]);
    assert_stdout("quack n: number? <- to_number(:'duck':)🦆 n🦆", &[]);
    assert_runtime_error("to_number(:7:)🦆", "Argument 'value' expects text, found number");
}

#[test]
fn vector_constructors() {
    assert_stdout("vec2(:1, 2:)🦆", &["(1, 2)"]);
    assert_stdout("vec3(:1, 2, 3:)🦆", &["(1, 2, 3)"]);
}

#[test]
fn stdlib_names_are_reserved_in_the_global_scope() {
    use quackscript::interpreter::evaluator::stdlib::INTERNAL_FUNCTIONS;

    for name in INTERNAL_FUNCTIONS {
        assert_runtime_error(&format!("QUACK {name} <- 1🦆"),
                             &format!("'{name}' is already declared"));
    }
}

// ─── Imports ─────────────────────────────────────────────────────────────────

#[test]
fn imports_share_the_global_environment() {
    let (host, output) = host_with_files(&[("lib", "QUACK base <- 40🦆")]);
    run_script("import 'lib'🦆 base + 2🦆", host).unwrap();

    assert_eq!(output.borrow().stdout, vec!["42".to_string()]);
    assert!(output.borrow().stderr.is_empty());
}

#[test]
fn imported_toplevel_expressions_also_print() {
    let (host, output) = host_with_files(&[("noisy", "'from the import'🦆")]);
    run_script("import 'noisy'🦆 'from the main module'🦆", host).unwrap();

    assert_eq!(output.borrow().stdout,
               vec!["from the import".to_string(), "from the main module".to_string()]);
}

#[test]
fn imports_are_first_wins() {
    let (host, output) = host_with_files(&[("lib", "QUACK base <- 40🦆")]);
    run_script("import 'lib'🦆 QUACK base <- 1🦆", host).unwrap();

    assert!(output.borrow().stderr.join("\n").contains("'base' is already declared"));
}

#[test]
fn import_after_statement_is_error() {
    assert_runtime_error("1🦆 import 'lib'🦆", "Imports must appear before any other statement");
}

#[test]
fn import_cycles_are_detected() {
    let (host, output) = host_with_files(&[("a", "import 'b'🦆"), ("b", "import 'a'🦆")]);
    run_script("import 'a'🦆", host).unwrap();

    assert!(output.borrow().stderr.join("\n").contains("Import cycle detected through 'a'"));
}

#[test]
fn imports_need_a_capable_host() {
    assert_runtime_error("import 'lib'🦆", "Cannot import 'lib'");
}

#[test]
fn missing_import_is_reported() {
    let (host, output) = host_with_files(&[]);
    run_script("import 'gone'🦆", host).unwrap();

    assert!(output.borrow().stderr.join("\n").contains("Cannot import 'gone': file not found"));
}

#[test]
fn import_syntax_errors_pass_through() {
    let (host, output) = host_with_files(&[("broken", "quack <- 1🦆")]);
    run_script("import 'broken'🦆", host).unwrap();

    assert!(output.borrow().stderr.join("\n").contains("Expected identifier"));
}

// ─── Resource discipline ─────────────────────────────────────────────────────

#[test]
fn memory_returns_to_one_scope_after_success() {
    let tokens = tokenize("QUACK f <- (:n: number:) :> {: return n + 1🦆 :}🦆 f(:1:)🦆").unwrap();
    let module = parse(&tokens).unwrap();

    let (host, _output) = Host::collecting();
    let mut evaluator = Evaluator::new(host);
    evaluator.execute(&module, None);

    assert_eq!(evaluator.memory.depth(), 1);
}

#[test]
fn memory_returns_to_one_scope_after_nested_failure() {
    // `boom` is undefined two call frames deep; both scopes must unwind.
    let source = "QUACK g <- (::) :> {: return boom🦆 :}🦆
                  QUACK f <- (::) :> {: return g(::)🦆 :}🦆
                  f(::)🦆";
    let tokens = tokenize(source).unwrap();
    let module = parse(&tokens).unwrap();

    let (host, output) = Host::collecting();
    let mut evaluator = Evaluator::new(host);
    evaluator.execute(&module, None);

    assert_eq!(evaluator.memory.depth(), 1);
    assert!(output.borrow().stderr.join("\n").contains("Unknown identifier 'boom'"));
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn missing_terminator_is_a_parse_error() {
    assert_parse_error("quack x <- 1");
}

#[test]
fn unknown_type_annotation_is_a_parse_error() {
    assert_parse_error("quack x: quux <- 1🦆");
}

#[test]
fn stray_characters_are_a_parse_error() {
    assert_parse_error("quack x <- 1🦆 #");
}

#[test]
fn comments_are_skipped() {
    assert_stdout("-- nothing to see here\nQUACK x <- 1🦆 -- declare\nx🦆", &["1"]);
}

#[test]
fn number_text_round_trips() {
    assert_stdout("quack n: number? <- to_number(:to_text(:0.1 + 0.2:):)🦆 n == 0.1 + 0.2🦆",
                  &["true"]);
}

// ─── Whole scripts ───────────────────────────────────────────────────────────

#[test]
fn example_script_works() {
    let script = fs::read_to_string("tests/example.quack").expect("missing file");
    let output = run(&script);
    assert_eq!(output.stderr, Vec::<String>::new());
}
