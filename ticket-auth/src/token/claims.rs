use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Token payload: string keys mapped to JSON values.
///
/// Encoding the same claims always yields the same compact bytes. Registered names (`sub`, `exp`) get typed accessors;
/// anything else goes through [`Claims::with_claim`] and [`Claims::get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub const SUBJECT: &'static str = "sub";
    pub const EXPIRATION: &'static str = "exp";

    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject. Integers and strings are both accepted on the wire.
    pub fn with_subject(mut self, sub: impl Into<Value>) -> Self {
        self.0.insert(Self::SUBJECT.to_string(), sub.into());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.set_expiration(exp);
        self
    }

    /// Add a custom field. Values that fail to serialize are skipped.
    pub fn with_claim(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.0.insert(key.to_string(), json_value);
        }
        self
    }

    pub(crate) fn set_expiration(&mut self, exp: i64) {
        self.0.insert(Self::EXPIRATION.to_string(), Value::from(exp));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn subject(&self) -> Option<&Value> {
        self.get(Self::SUBJECT)
    }

    /// Subject as an integer identifier.
    ///
    /// Accepts a JSON integer or a decimal string; anything else is `None`.
    pub fn subject_id(&self) -> Option<i64> {
        match self.subject()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Expiration as a Unix timestamp.
    ///
    /// Fractional timestamps are truncated. `None` when `exp` is absent or
    /// not a finite number.
    pub fn expiration(&self) -> Option<i64> {
        let exp = self.get(Self::EXPIRATION)?;
        exp.as_i64().or_else(|| {
            exp.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
    }

    /// Check if token is expired.
    ///
    /// Claims without `exp` never expire.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expiration()
            .map_or(false, |exp| exp < current_timestamp)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
