use assert_cmd::Command;

fn rlox() -> Command {
    Command::cargo_bin("rlox").unwrap()
}

#[test]
fn tokenize_prints_tokens() {
    rlox()
        .args(["tokenize", "tests/target/cli/scan.lox"])
        .assert()
        .success()
        .stdout(
            "VAR var null\n\
             IDENTIFIER answer null\n\
             EQUAL = null\n\
             NUMBER 76 76.0\n\
             SEMICOLON ; null\n\
             PRINT print null\n\
             STRING \"hi\" hi\n\
             SEMICOLON ; null\n\
             EOF  null\n",
        );
}

#[test]
fn tokenize_continues_after_lexical_error() {
    rlox()
        .args(["tokenize", "tests/target/cli/scan_error.lox"])
        .assert()
        .code(65)
        .stdout(
            "IDENTIFIER ok null\n\
             SEMICOLON ; null\n\
             EOF  null\n",
        )
        .stderr("[line 1] Error: Unexpected character: @\n");
}

#[test]
fn parse_prints_s_expressions() {
    rlox()
        .args(["parse", "tests/target/cli/parse.lox"])
        .assert()
        .success()
        .stdout(
            "(var a 1.0)\n\
             (print (+ a (* 2.0 3.0)))\n\
             (block (= a 4.0))\n",
        );
}

#[test]
fn parse_error_exits_65() {
    rlox()
        .args(["parse", "tests/target/cli/parse_error.lox"])
        .assert()
        .code(65)
        .stdout("")
        .stderr("[line 1] Error at ';': Expect expression.\n");
}

#[test]
fn evaluate_prints_value() {
    rlox()
        .args(["evaluate", "tests/target/cli/evaluate.lox"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn evaluate_runtime_error_exits_70() {
    rlox()
        .args(["evaluate", "tests/target/cli/evaluate_error.lox"])
        .assert()
        .code(70)
        .stdout("")
        .stderr("Operand must be a number.\n[line 1]\n");
}

#[test]
fn run_exits_0() {
    rlox()
        .args(["run", "tests/target/cli/run.lox"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn run_static_error_exits_65() {
    rlox()
        .args(["run", "tests/target/cli/run_static.lox"])
        .assert()
        .code(65)
        .stderr("[line 1] Error at 'return': Can't return from top-level code.\n");
}

#[test]
fn run_runtime_error_exits_70() {
    rlox()
        .args(["run", "tests/target/cli/run_runtime.lox"])
        .assert()
        .code(70)
        .stderr("Operand must be a number.\n[line 1]\n");
}

#[test]
fn run_duplicate_declaration_exits_65() {
    rlox()
        .args(["run", "tests/target/cli/run_duplicate.lox"])
        .assert()
        .code(65)
        .stderr("[line 1] Error at 'a': Already a variable with this name in this scope.\n");
}
