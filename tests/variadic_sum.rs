use std::error::Error;

use test_utils::{check_source, Expected};

#[test]
fn varargs_parameter_collects_into_an_array() -> Result<(), Box<dyn Error>> {
    let source = "\
fun sum(varargs nums) {
  var total = 0;
  var i = 0;
  while (i < length(nums)) {
    total = total + nums[i];
    i = i + 1;
  }
  return total;
}
println(sum(1, 2, 3, 4));
";
    check_source(
        source,
        Expected {
            stdout: "10\n",
            stderr: "",
        },
    )
}
