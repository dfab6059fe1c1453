//! Tests for the Record derive macro - successful cases.

use fieldcheck_validator::{Record, validate_record};

#[derive(Record)]
pub struct Common {
    #[tag(validate = "required")]
    id: u64,
}

#[derive(Record)]
pub struct Listener {
    #[tag(validate = "required", env = "HOST")]
    host: String,

    #[tag(validate = "gte=1,lte=65535")]
    port: u32,

    #[record(embed)]
    common: Common,

    #[record(embed)]
    extra: Option<Box<Extra>>,

    #[record(rename = "Mode")]
    mode: Option<String>,

    #[tag(validate = "required_if=Mode strict")]
    token: String,

    #[record(skip)]
    #[allow(dead_code)]
    cache: std::cell::Cell<u8>,

    #[tag(validate = "dive,required")]
    upstreams: Vec<String>,

    r#type: bool,
}

#[derive(Record)]
pub struct Extra {
    #[tag(validate = "omitempty,oneof=a b")]
    flavor: String,
}

fn main() {
    let listener = Listener {
        host: "localhost".into(),
        port: 8080,
        common: Common { id: 1 },
        extra: None,
        mode: Some("strict".into()),
        token: "t".into(),
        cache: std::cell::Cell::new(0),
        upstreams: vec!["a".into()],
        r#type: true,
    };
    assert!(validate_record(&listener).is_ok());
    assert!(Listener::fields().iter().any(|d| d.name == "type"));
}
