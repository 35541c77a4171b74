use std::error::Error;

use test_utils::check_source_fails;

#[test]
fn return_outside_a_function_is_a_resolve_error() -> Result<(), Box<dyn Error>> {
    check_source_fails("return 1;\n", "Can't return from top-level code")
}
