use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn same_scope_overloads_of_different_arity_both_run() -> Result<(), Box<dyn Error>> {
    check_source(
        "fun f(x){return x*x;} fun f(x,y){return x+y;} println(f(3)); println(f(3,4));",
        Expected {
            stdout: "9\n7\n",
            stderr: "",
        },
    )
}
