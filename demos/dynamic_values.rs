//! Editing a parsed tree in place: set, remove, push, pop and lookup_mut.
//!
//! Run with: cargo run --example dynamic_values

use std::error::Error;
use toml_tree::{from_str, to_string, Table, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = from_str(
        "[server]\nhost = \"localhost\"\nport = 8080\n\n[[users]]\nname = \"alice\"\n",
    )?;

    // Kinds are checked, never coerced
    let port = doc.lookup("server.port").ok_or("missing port")?;
    println!("port is a {} with value {:?}", port.kind(), port.as_integer());
    println!("port as string: {:?}", port.as_str());

    // Replacing keeps the key's position
    let server = doc.get_mut("server").and_then(Value::as_table_mut).ok_or("no server")?;
    server.set("port", Value::from(9090));
    server.set("tls", Value::from(true));
    println!("server keys: {:?}", server.keys());

    // Append to an array of tables
    let mut bob = Table::new();
    bob.set("name", Value::from("bob"));
    doc.get_mut("users")
        .and_then(Value::as_array_mut)
        .ok_or("no users")?
        .push(Value::from(bob));

    // Edit through a path
    let mut root = Value::Table(doc);
    if let Some(name) = root.lookup_mut("users[0].name") {
        *name = Value::from("alice (admin)");
    }

    let Value::Table(mut doc) = root else {
        return Err("root is not a table".into());
    };
    println!("\nEdited document:\n{}", to_string(&doc));

    // Detach a subtree; it stays valid on its own
    let users = doc.remove("users").ok_or("no users")?;
    println!("detached users: {}", users);
    println!("remaining keys: {:?}", doc.keys());

    Ok(())
}
