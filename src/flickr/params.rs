use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

#[macro_export]
macro_rules! params {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut params = $crate::RequestParams::new();
        $(params.set($key, $value);)*
        params
    }};
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, String>);

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<String>, V: ToString>(&mut self, key: K, value: V) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    pub fn set_default<K: Into<String>, V: ToString>(&mut self, key: K, value: V) -> &mut Self {
        self.0.entry(key.into()).or_insert_with(|| value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn page(&self) -> Option<i64> {
        self.get("page").and_then(|page| page.trim().parse().ok())
    }

    pub fn set_page(&mut self, page: i64) -> &mut Self {
        self.set("page", page)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }

        params
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Primitive {
    fn into_string(self) -> String {
        match self {
            Primitive::Bool(value) => value.to_string(),
            Primitive::Int(value) => value.to_string(),
            Primitive::Float(value) => value.to_string(),
            Primitive::Text(value) => value,
        }
    }
}

// Accepts JSON numbers and booleans as well as strings.
impl<'de> Deserialize<'de> for RequestParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Primitive>::deserialize(deserializer)?;

        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value.into_string()))
            .collect())
    }
}
