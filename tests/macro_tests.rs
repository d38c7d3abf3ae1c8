use toml_tree::{to_string, toml, Array, Table, Value};

#[test]
fn test_toml_macro_booleans() {
    assert_eq!(toml!(true), Value::Boolean(true));
    assert_eq!(toml!(false), Value::Boolean(false));
}

#[test]
fn test_toml_macro_numbers() {
    assert_eq!(toml!(42), Value::Integer(42));
    assert_eq!(toml!(3.5), Value::Float(3.5));
    assert_eq!(toml!(-123), Value::Integer(-123));
    assert_eq!(toml!([(-1), (-2.5)]), Value::from(vec![Value::Integer(-1), Value::Float(-2.5)]));
}

#[test]
fn test_toml_macro_strings() {
    assert_eq!(toml!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(toml!(""), Value::String(String::new()));
}

#[test]
fn test_toml_macro_arrays() {
    assert_eq!(toml!([]), Value::Array(Array::new()));

    let nested = toml!([[1, 2], ["a"], []]);
    assert_eq!(nested.lookup("[0][1]"), Some(&Value::Integer(2)));
    assert_eq!(nested.lookup("[1][0]").and_then(Value::as_str), Some("a"));
    assert_eq!(nested.lookup("[2]").and_then(Value::as_array).map(Array::len), Some(0));
}

#[test]
fn test_toml_macro_tables() {
    assert_eq!(toml!({}), Value::Table(Table::new()));

    let value = toml!({
        "package": {
            "name": "demo",
            "authors": ["a", "b"],
        },
        "workspace": { "members": [] }
    });
    let table = value.as_table().unwrap();
    assert_eq!(table.keys(), vec!["package", "workspace"]);
    assert_eq!(value.lookup("package.authors[1]").and_then(Value::as_str), Some("b"));
    assert_eq!(
        to_string(table),
        "[package]\nname = \"demo\"\nauthors = [\"a\", \"b\"]\n[workspace]\nmembers = []\n"
    );
}

#[test]
fn test_toml_macro_array_of_tables() {
    let value = toml!({ "bin": [{ "name": "a" }, { "name": "b" }] });
    assert_eq!(
        to_string(value.as_table().unwrap()),
        "[[bin]]\nname = \"a\"\n[[bin]]\nname = \"b\"\n"
    );
}

#[test]
fn test_toml_macro_with_variables() {
    let name = "server";
    let ports: Vec<Value> = vec![80.into(), 443.into()];
    let value = toml!({ "name": name, "ports": ports, "debug": (cfg!(debug_assertions)) });
    assert_eq!(value.lookup("ports[1]"), Some(&Value::Integer(443)));
    assert!(value.lookup("debug").map(Value::is_bool).unwrap_or(false));
}
