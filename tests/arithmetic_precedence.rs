use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn multiplication_binds_tighter_than_addition() -> Result<(), Box<dyn Error>> {
    check_source(
        "println(2 + 3 * 4);",
        Expected {
            stdout: "14\n",
            stderr: "",
        },
    )
}
