//! Tests for the Bind derive macro - successful cases.

use std::time::Duration;

use fieldcheck_config::{Bind, Binder, MapSource};
use fieldcheck_validator::Record;

#[derive(Default, Record, Bind)]
pub struct Limits {
    #[tag(default = "10")]
    burst: u32,
}

#[derive(Default, Record, Bind)]
pub struct Pool {
    #[tag(key = "pool.size", default = "4", validate = "gte=1")]
    size: usize,
}

#[derive(Default, Record, Bind)]
pub struct Settings {
    #[tag(default = "localhost", validate = "required")]
    host: String,

    #[tag(default = "5s")]
    timeout: Duration,

    #[record(embed)]
    limits: Limits,

    #[record(embed)]
    pool: Option<Pool>,

    labels: Vec<String>,

    retries: Option<u8>,

    #[bind(skip)]
    hits: u64,

    r#type: char,
}

fn main() {
    let settings: Settings = Binder::new()
        .source(
            MapSource::new("file")
                .with("pool.size", "8")
                .with("labels", "a,b")
                .with("type", "x"),
        )
        .bind()
        .unwrap();

    assert_eq!(settings.host, "localhost");
    assert_eq!(settings.timeout, Duration::from_secs(5));
    assert_eq!(settings.limits.burst, 10);
    assert_eq!(settings.pool.map(|p| p.size), Some(8));
    assert_eq!(settings.labels, vec!["a", "b"]);
    assert_eq!(settings.retries, None);
    assert_eq!(settings.hits, 0);
    assert_eq!(settings.r#type, 'x');
}
