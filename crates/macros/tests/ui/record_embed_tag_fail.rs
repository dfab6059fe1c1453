//! Tests for the Record derive macro - annotations on embedded fields.

use fieldcheck_validator::Record;

#[derive(Record)]
pub struct Inner {
    code: String,
}

#[derive(Record)]
pub struct Outer {
    #[record(embed)]
    #[tag(validate = "required")]
    inner: Option<Inner>,
}

fn main() {}
