use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn assigning_through_an_index_inserts_into_the_map() -> Result<(), Box<dyn Error>> {
    check_source(
        "var m = {\"a\": 1};\nm[\"b\"] = 2;\nprintln(m[\"b\"]);\n",
        Expected {
            stdout: "2\n",
            stderr: "",
        },
    )
}
