//! Using the toml! macro to build document trees.
//!
//! Run with: cargo run --example macro

use std::error::Error;
use toml_tree::{to_string, toml};

fn main() -> Result<(), Box<dyn Error>> {
    let flag = toml!(true);
    let number = toml!(42);
    let text = toml!("Hello, TOML!");

    println!("Primitives:");
    println!("  bool:   {}", flag);
    println!("  number: {}", number);
    println!("  text:   {}\n", text);

    let mixed = toml!([1, "two", true, [3.0]]);
    println!("Array:  {}\n", mixed);

    let doc = toml!({
        "title": "Service",
        "server": {
            "host": "0.0.0.0",
            "ports": [8080, 8443]
        },
        "workers": [
            { "name": "ingest", "threads": 4 },
            { "name": "export", "threads": 2 }
        ]
    });

    let table = doc.as_table().ok_or("macro did not build a table")?;
    println!("Document:\n{}", to_string(table));

    Ok(())
}
