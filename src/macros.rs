/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become tables with keys in the order written. Any other token
/// tree is converted with `Value::from`, so negative numbers and other
/// multi-token expressions need parentheses.
///
/// ```rust
/// use toml_tree::{toml, Value};
///
/// let value = toml!({
///     "name": "demo",
///     "offset": (-1),
///     "tags": ["a", "b"],
///     "owner": { "active": true }
/// });
/// assert_eq!(value.lookup("owner.active"), Some(&Value::Boolean(true)));
/// assert_eq!(value.lookup("offset").and_then(|v| v.as_integer()), Some(-1));
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array($crate::Array::from(vec![$($crate::toml!($elem)),*]))
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.set($key, $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Array, Table, Value};

    #[test]
    fn test_toml_macro_primitives() {
        assert_eq!(toml!(true), Value::Boolean(true));
        assert_eq!(toml!(false), Value::Boolean(false));
        assert_eq!(toml!(42), Value::Integer(42));
        assert_eq!(toml!(3.5), Value::Float(3.5));
        assert_eq!(toml!("hello"), Value::String("hello".to_string()));
        assert_eq!(toml!((-7)), Value::Integer(-7));
    }

    #[test]
    fn test_toml_macro_arrays() {
        assert_eq!(toml!([]), Value::Array(Array::new()));

        let arr = toml!([1, "two", [3.0]]);
        let arr = arr.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0], Value::Integer(1));
        assert_eq!(arr[1], Value::from("two"));
        assert_eq!(arr[2], Value::from(vec![Value::Float(3.0)]));
    }

    #[test]
    fn test_toml_macro_tables() {
        assert_eq!(toml!({}), Value::Table(Table::new()));

        let value = toml!({
            "name": "Alice",
            "age": 30,
        });
        let table = value.as_table().unwrap();
        assert_eq!(table.keys(), vec!["name", "age"]);
        assert_eq!(table.get("age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_toml_macro_uses_expressions() {
        let port: u16 = 8080;
        let host = String::from("localhost");
        let value = toml!({ "host": host, "port": port });
        assert_eq!(value.lookup("port"), Some(&Value::Integer(8080)));
        assert_eq!(value.lookup("host").and_then(Value::as_str), Some("localhost"));
    }
}
