use serde_json::{Map, Value};

use super::{Error, Result};

// (source, canonical)
pub type Synonyms<'a> = &'a [(&'a str, &'a str)];

pub fn initialize(data: Value, defaults: &Map<String, Value>, synonyms: Synonyms<'_>) -> Result<Map<String, Value>> {
    let mut data = match data {
        Value::Object(data) => data,
        other => {
            return Err(Error::InvalidArgument(format!(
                "options were expected to be an object, {} was received",
                type_tag(&other)
            )));
        }
    };

    for (source, canonical) in synonyms {
        if let Some(value) = data.get(*source).cloned() {
            data.insert((*canonical).to_owned(), value);
        }
    }

    for (key, default) in defaults {
        if !data.contains_key(key) {
            data.insert(key.clone(), default.clone());
        }
    }

    for (key, value) in &data {
        let Some(default) = defaults.get(key) else {
            continue;
        };

        let expected = type_tag(default);
        let received = type_tag(value);
        if expected != received {
            return Err(Error::TypeMismatch {
                key: key.clone(),
                expected,
                received,
            });
        }
    }

    Ok(data)
}

pub fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
