use std::error::Error;

use test_utils::check_source_fails;

#[test]
fn subtraction_requires_numbers_on_both_sides() -> Result<(), Box<dyn Error>> {
    check_source_fails("println(\"abc\" - 1);\n", "requires numbers")
}
