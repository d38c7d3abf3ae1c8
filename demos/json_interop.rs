//! Converting between TOML and JSON.
//!
//! Run with: cargo run --example json_interop

use std::error::Error;
use toml_tree::{from_str, json, to_string};

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str("title = \"x\"\nreleased = 1979-05-27\n[limits]\nmax = 10\n")?;

    let value = json::to_json_value(&doc);
    println!("As JSON:\n{}\n", serde_json::to_string_pretty(&value)?);

    let input = br#"{
        "name": "demo",
        "unset": null,
        "big": 18446744073709551615,
        "list": [1, null, 2]
    }"#;
    let imported = json::from_json_slice(input)?;
    println!("From JSON (nulls dropped, big integers become floats):\n{}", to_string(&imported));

    match json::from_json_slice(b"[1, 2, 3]") {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("Rejected: {}", err),
    }

    Ok(())
}
