//! Customizing parse limits and output layout.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use toml_tree::{
    from_str, from_str_with_options, to_string_with_options, FormatOptions, ParseOptions,
};

const INPUT: &str = r#"
name = "MyApp"
versions = ["1.0.0", "1.1.0", "1.2.0", "2.0.0", "2.1.0"]

[database]
url = "postgres://localhost"

[cache]
ttl = 300
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str(INPUT)?;

    println!("Compact:");
    println!("{}", to_string_with_options(&doc, &FormatOptions::new()));

    println!("Pretty:");
    println!("{}", to_string_with_options(&doc, &FormatOptions::pretty()));

    println!("Two-space indent, arrays over 2 elements split:");
    let options = FormatOptions::new().with_indent(2).with_array_width(2);
    println!("{}", to_string_with_options(&doc, &options));

    let strict = ParseOptions::new().with_max_depth(2);
    match from_str_with_options("a = [[[1]]]", &strict) {
        Ok(_) => println!("parsed"),
        Err(err) => println!("Depth limit enforced: {}", err),
    }

    Ok(())
}
