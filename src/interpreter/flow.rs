use crate::value::Value;

/// What a statement did, besides running to completion.
///
/// `return` doesn't unwind via a Rust `panic` or a thrown exception type
/// the way the tree this interpreter grew from does it — it's carried
/// back up through ordinary `Result`-returning calls as this signal,
/// and every block/loop/if propagates it instead of swallowing it.
pub enum Flow {
    Normal,
    Return(Value),
}
