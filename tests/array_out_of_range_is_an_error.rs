use std::error::Error;

use test_utils::check_source_fails;

#[test]
fn indexing_past_the_end_of_an_array_is_a_runtime_error() -> Result<(), Box<dyn Error>> {
    check_source_fails("var a = [1, 2];\nprintln(a[5]);\n", "out of range")
}
