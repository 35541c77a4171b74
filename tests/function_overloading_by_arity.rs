use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn two_declarations_with_different_arity_coexist() -> Result<(), Box<dyn Error>> {
    check_source(
        "fun greet() { println(\"hello\"); }\nfun greet(name) { println(\"hello, \" + name); }\ngreet();\ngreet(\"sox\");\n",
        Expected {
            stdout: "hello\nhello, sox\n",
            stderr: "",
        },
    )
}
