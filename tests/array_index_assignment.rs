use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn assigning_through_an_index_mutates_the_array() -> Result<(), Box<dyn Error>> {
    check_source(
        "var a = [1, 2, 3];\na[1] = 99;\nprintln(a[1]);\n",
        Expected {
            stdout: "99\n",
            stderr: "",
        },
    )
}
