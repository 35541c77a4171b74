use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn nested_function_closes_over_the_enclosing_variable() -> Result<(), Box<dyn Error>> {
    let source = "\
fun make_counter() {
  var count = 0;
  fun increment() {
    count = count + 1;
    return count;
  }
  return increment;
}
var counter = make_counter();
println(counter());
println(counter());
println(counter());
";
    check_source(
        source,
        Expected {
            stdout: "1\n2\n3\n",
            stderr: "",
        },
    )
}
