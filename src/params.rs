//! Query Parameters - Normalization and Serialization
//!
//! One representation for everything the endpoints accept: booleans
//! serialize as literal `true`/`false`, lists join with commas, and
//! null values are omitted entirely. Insertion order is preserved so
//! serialized URLs are reproducible.

use chrono::NaiveDate;

/// A single parameter value before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
  /// Omitted from serialization.
  Null,
  /// Serializes as `true` / `false`.
  Bool(bool),
  /// Signed integer.
  Int(i64),
  /// Unsigned integer.
  UInt(u64),
  /// Floating point; whole values render without a decimal point.
  Float(f64),
  /// Passed through as-is.
  String(String),
  /// Joins rendered elements with commas.
  List(Vec<ParamValue>),
}

impl ParamValue {
  /// Render to query-string text. `None` means the value is omitted.
  #[must_use]
  pub fn render(&self) -> Option<String> {
    match self {
      Self::Null => None,
      Self::Bool(value) => Some(if *value { "true" } else { "false" }.to_string()),
      Self::Int(value) => Some(value.to_string()),
      Self::UInt(value) => Some(value.to_string()),
      Self::Float(value) => Some(value.to_string()),
      Self::String(value) => Some(value.clone()),
      Self::List(values) => Some(
        values
          .iter()
          .map(|value| value.render().unwrap_or_default())
          .collect::<Vec<_>>()
          .join(","),
      ),
    }
  }
}

impl From<bool> for ParamValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<i32> for ParamValue {
  fn from(value: i32) -> Self {
    Self::Int(i64::from(value))
  }
}

impl From<i64> for ParamValue {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<u32> for ParamValue {
  fn from(value: u32) -> Self {
    Self::UInt(u64::from(value))
  }
}

impl From<u64> for ParamValue {
  fn from(value: u64) -> Self {
    Self::UInt(value)
  }
}

impl From<f64> for ParamValue {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    Self::String(value.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(value: String) -> Self {
    Self::String(value)
  }
}

impl From<NaiveDate> for ParamValue {
  fn from(value: NaiveDate) -> Self {
    Self::String(value.format("%Y-%m-%d").to_string())
  }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
  fn from(value: Option<T>) -> Self {
    value.map_or(Self::Null, Into::into)
  }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
  fn from(values: Vec<T>) -> Self {
    Self::List(values.into_iter().map(Into::into).collect())
  }
}

impl<T: Into<ParamValue>, const N: usize> From<[T; N]> for ParamValue {
  fn from(values: [T; N]) -> Self {
    Self::List(values.into_iter().map(Into::into).collect())
  }
}

impl<T: Clone + Into<ParamValue>> From<&[T]> for ParamValue {
  fn from(values: &[T]) -> Self {
    Self::List(values.iter().cloned().map(Into::into).collect())
  }
}

/// Insertion-ordered query parameters.
///
/// Built with chained [`set`](Params::set) calls; setting an existing
/// key replaces the value in place without changing its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
  entries: Vec<(String, ParamValue)>,
}

impl Params {
  /// Empty parameter set.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a parameter, replacing any existing value for the key.
  #[must_use]
  pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
    let key = key.into();
    let value = value.into();
    if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == key) {
      entry.1 = value;
    } else {
      self.entries.push((key, value));
    }
    self
  }

  /// Look up a value by key.
  #[must_use]
  pub fn get(&self, key: &str) -> Option<&ParamValue> {
    self
      .entries
      .iter()
      .find(|(name, _)| name == key)
      .map(|(_, value)| value)
  }

  /// Whether a key holds a usable value. Null and the empty string
  /// count as absent; everything else, including empty lists, counts
  /// as present.
  #[must_use]
  pub fn has_value(&self, key: &str) -> bool {
    match self.get(key) {
      None | Some(ParamValue::Null) => false,
      Some(ParamValue::String(text)) => !text.is_empty(),
      Some(_) => true,
    }
  }

  /// Number of entries, including nulls.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether no entries are set.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Iterate entries in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
    self
      .entries
      .iter()
      .map(|(name, value)| (name.as_str(), value))
  }

  /// Serialize to `application/x-www-form-urlencoded` text, without
  /// the leading `?`. Null values are skipped; an all-null set
  /// serializes to the empty string.
  #[must_use]
  pub fn to_query_string(&self) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &self.entries {
      if let Some(rendered) = value.render() {
        serializer.append_pair(key, &rendered);
      }
    }
    serializer.finish()
  }
}
