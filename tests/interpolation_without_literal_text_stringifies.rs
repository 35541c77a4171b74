use std::error::Error;

use test_utils::{check_source, Expected};

/// An interpolated literal with no literal text of its own (`"$a"`, or
/// `"${...}"`) must still evaluate to a string, not the raw interpolated
/// value — otherwise `"$a"` where `a` is an array would alias the array
/// instead of producing text, and `"${1}${2}"` would add the two numbers
/// instead of concatenating their text.
#[test]
fn bare_dollar_interpolation_produces_a_string_not_the_raw_value() -> Result<(), Box<dyn Error>> {
    check_source(
        "var a = [1, 2]; var s = \"$a\"; println(type(s)); println(s);",
        Expected {
            stdout: "string\n[1, 2]\n",
            stderr: "",
        },
    )
}

#[test]
fn back_to_back_brace_interpolations_concatenate_as_text() -> Result<(), Box<dyn Error>> {
    check_source(
        "println(\"${1}${2}\");",
        Expected {
            stdout: "12\n",
            stderr: "",
        },
    )
}
