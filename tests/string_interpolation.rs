use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn dollar_name_interpolates_into_the_string() -> Result<(), Box<dyn Error>> {
    check_source(
        "var name = \"sox\";\nprintln(\"hello, $name!\");\n",
        Expected {
            stdout: "hello, sox!\n",
            stderr: "",
        },
    )
}
