//! Parse a TOML document, query it, and write it back out.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use toml_tree::{from_str, to_string, Value};

const CARGO: &str = r#"
[package]
name = "demo"
version = "0.1.0"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str(CARGO)?;

    let name = doc.lookup("package.name").and_then(Value::as_str);
    println!("package name: {:?}", name);
    println!("serde features: {:?}", doc.lookup("dependencies.serde.features[0]"));

    let text = to_string(&doc);
    println!("TOML output:\n{}", text);

    let back = from_str(&text)?;
    assert_eq!(doc, back);
    println!("✓ Round-trip successful");

    match from_str("a = 1\na = 2") {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("Rejected duplicate key: {}", err),
    }

    Ok(())
}
