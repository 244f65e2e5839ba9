//! Nested structures, flattening and container fields.

use std::collections::{BTreeMap, HashMap};

use structure::{to_map, Map, Structure, Value};

#[derive(Structure)]
pub struct Limits {
    pub max_conns: u32,
    #[structure = "timeout_ms"]
    pub timeout: u64,
}

#[derive(Structure)]
pub struct Server {
    pub name: String,
    pub limits: Limits,
}

#[derive(Structure)]
pub struct FlatServer {
    pub name: String,
    #[structure(flatten)]
    pub limits: Limits,
}

fn limits() -> Limits {
    Limits { max_conns: 64, timeout: 1500 }
}

fn limits_map() -> Map<'static> {
    Map::from([
        ("max_conns".to_string(), Value::U32(64)),
        ("timeout_ms".to_string(), Value::U64(1500)),
    ])
}

#[test]
fn nested_structure_becomes_map_value() {
    let server = Server { name: "db".to_string(), limits: limits() };
    let map = to_map(&server).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map["name"], Value::from("db"));
    assert_eq!(map["limits"], Value::Map(limits_map()));
}

#[test]
fn flattened_structure_merges_into_parent() {
    let server = FlatServer { name: "db".to_string(), limits: limits() };
    let map = to_map(&server).unwrap();

    assert_eq!(map.len(), 3);
    assert!(!map.contains_key("limits"));
    assert_eq!(map["max_conns"], Value::U32(64));
    assert_eq!(map["timeout_ms"], Value::U64(1500));
}

#[test]
fn flatten_through_one_pointer() {
    #[derive(Structure)]
    struct Boxed {
        #[structure(flatten)]
        pub limits: Box<Limits>,
    }

    let record = Boxed { limits: Box::new(limits()) };
    let map = to_map(&record).unwrap();
    assert_eq!(map, limits_map());
}

#[test]
fn flatten_on_plain_field_keeps_the_field() {
    #[derive(Structure)]
    struct Odd {
        #[structure(flatten)]
        pub count: u16,
    }

    let record = Odd { count: 3 };
    let map = to_map(&record).unwrap();
    assert_eq!(map["count"], Value::U16(3));
}

#[test]
fn flattened_keys_overwrite_earlier_entries() {
    #[derive(Structure)]
    struct Shadowed {
        pub max_conns: u32,
        #[structure(flatten)]
        pub limits: Limits,
    }

    let record = Shadowed { max_conns: 1, limits: limits() };
    let map = to_map(&record).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["max_conns"], Value::U32(64));
}

#[test]
fn pointer_fields_are_read_through() {
    #[derive(Structure)]
    struct Refs<'a> {
        pub label: &'a str,
        pub parent: Option<Box<Limits>>,
        pub shared: std::sync::Arc<Limits>,
    }

    let record = Refs {
        label: "edge",
        parent: None,
        shared: std::sync::Arc::new(limits()),
    };
    let map = to_map(&record).unwrap();

    assert_eq!(map["label"], Value::from("edge"));
    assert_eq!(map["parent"], Value::Null);
    assert_eq!(map["shared"], Value::Map(limits_map()));
}

#[test]
fn container_fields_keep_their_shape() {
    #[derive(Structure)]
    struct Containers {
        pub tags: Vec<String>,
        pub weights: [f32; 2],
        pub env: HashMap<String, String>,
        pub ports: BTreeMap<String, u16>,
        pub backup: Option<String>,
    }

    let record = Containers {
        tags: vec!["a".to_string(), "b".to_string()],
        weights: [0.5, 1.5],
        env: HashMap::from([("HOME".to_string(), "/root".to_string())]),
        ports: BTreeMap::from([("http".to_string(), 80)]),
        backup: Some("db-2".to_string()),
    };
    let map = to_map(&record).unwrap();

    assert_eq!(map["tags"], Value::from(vec!["a", "b"]));
    assert_eq!(map["weights"], Value::Seq(vec![Value::F32(0.5), Value::F32(1.5)]));
    assert_eq!(
        map["env"],
        Value::Map(Map::from([("HOME".to_string(), Value::from("/root"))]))
    );
    assert_eq!(
        map["ports"],
        Value::Map(Map::from([("http".to_string(), Value::U16(80))]))
    );
    assert_eq!(map["backup"], Value::from("db-2"));
}

#[test]
fn generic_structure() {
    #[derive(Structure)]
    struct Pair<T> {
        pub left: T,
        pub right: T,
    }

    let record = Pair { left: 'l', right: 'r' };
    let map = to_map(&record).unwrap();
    assert_eq!(map["left"], Value::Char('l'));
    assert_eq!(map["right"], Value::Char('r'));
}

#[test]
fn nested_map_serializes_to_json() {
    let server = Server { name: "db".to_string(), limits: limits() };
    let map = to_map(&server).unwrap();

    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "db",
            "limits": { "max_conns": 64, "timeout_ms": 1500 },
        })
    );
}
