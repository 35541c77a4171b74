use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn for_loop_runs_init_condition_and_increment() -> Result<(), Box<dyn Error>> {
    let source = "\
var total = 0;
for (var i = 0; i < 5; i = i + 1) {
  total = total + i;
}
println(total);
";
    check_source(
        source,
        Expected {
            stdout: "10\n",
            stderr: "",
        },
    )
}
