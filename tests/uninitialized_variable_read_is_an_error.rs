use std::error::Error;

use test_utils::check_source_fails;

#[test]
fn reading_an_uninitialized_variable_is_a_runtime_error() -> Result<(), Box<dyn Error>> {
    check_source_fails("var x;\nprintln(x);\n", "used before being initialized")
}
