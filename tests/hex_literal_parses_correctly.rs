use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn hex_literal_is_parsed_in_its_own_base() -> Result<(), Box<dyn Error>> {
    check_source(
        "println(0x1F);\n",
        Expected {
            stdout: "31\n",
            stderr: "",
        },
    )
}
