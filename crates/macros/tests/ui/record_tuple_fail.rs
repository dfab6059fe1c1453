//! Tests for the Record derive macro - error cases.

use fieldcheck_validator::Record;

#[derive(Record)]
pub struct Pair(u8, u8);

fn main() {}
