use std::error::Error;

use test_utils::{check_source, Expected};

/// The interpreter this was ported from evaluated both branches of a
/// ternary unconditionally before picking one to keep; a side effect in
/// the untaken branch ran regardless. Here only the taken branch runs.
#[test]
fn untaken_ternary_branch_has_no_side_effect() -> Result<(), Box<dyn Error>> {
    let source = "\
fun boom() { println(\"side effect\"); return 1; }
var x = true ? 1 : boom();
println(x);
";
    check_source(
        source,
        Expected {
            stdout: "1\n",
            stderr: "",
        },
    )
}
