use std::fmt;

/// One element of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
  Null,
  Bool(bool),
  Int(i64),
  Str(String),
}

impl From<&str> for KeyPart {
  fn from(value: &str) -> Self {
    KeyPart::Str(value.to_string())
  }
}

impl From<String> for KeyPart {
  fn from(value: String) -> Self {
    KeyPart::Str(value)
  }
}

impl From<&String> for KeyPart {
  fn from(value: &String) -> Self {
    KeyPart::Str(value.clone())
  }
}

impl From<bool> for KeyPart {
  fn from(value: bool) -> Self {
    KeyPart::Bool(value)
  }
}

impl From<i64> for KeyPart {
  fn from(value: i64) -> Self {
    KeyPart::Int(value)
  }
}

impl From<u32> for KeyPart {
  fn from(value: u32) -> Self {
    KeyPart::Int(i64::from(value))
  }
}

impl From<i32> for KeyPart {
  fn from(value: i32) -> Self {
    KeyPart::Int(i64::from(value))
  }
}

impl<T: Into<KeyPart>> From<Option<T>> for KeyPart {
  fn from(value: Option<T>) -> Self {
    value.map(Into::into).unwrap_or(KeyPart::Null)
  }
}

impl fmt::Display for KeyPart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KeyPart::Null => write!(f, "null"),
      KeyPart::Bool(b) => write!(f, "{}", b),
      KeyPart::Int(i) => write!(f, "{}", i),
      KeyPart::Str(s) => write!(f, "{:?}", s),
    }
  }
}

/// Ordered tuple identifying a cache slot.
///
/// Equality is structural. A key acts as a prefix of every key that begins
/// with the same parts, which is how invalidation addresses whole resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
  pub fn new(parts: Vec<KeyPart>) -> Self {
    Self(parts)
  }

  pub fn parts(&self) -> &[KeyPart] {
    &self.0
  }

  /// First element, conventionally the resource name.
  pub fn resource(&self) -> Option<&str> {
    match self.0.first() {
      Some(KeyPart::Str(s)) => Some(s),
      _ => None,
    }
  }

  pub fn starts_with(&self, prefix: &QueryKey) -> bool {
    self.0.starts_with(&prefix.0)
  }
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[")?;
    for (i, part) in self.0.iter().enumerate() {
      if i > 0 {
        write!(f, ",")?;
      }
      write!(f, "{}", part)?;
    }
    write!(f, "]")
  }
}

/// Build a [`QueryKey`] from anything convertible into [`KeyPart`].
///
/// ```ignore
/// let key = query_key!["merchants", 1u32, 10u32, None::<&str>];
/// ```
#[macro_export]
macro_rules! query_key {
  ($($part:expr),* $(,)?) => {
    $crate::query::QueryKey::new(vec![$($crate::query::KeyPart::from($part)),*])
  };
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::query_key;
  use std::collections::HashSet;

  #[test]
  fn test_structural_equality() {
    let a = query_key!["merchants", 1u32, 10u32, None::<&str>];
    let b = query_key!["merchants", 1u32, 10u32, None::<&str>];
    let c = query_key!["merchants", 1u32, 10u32, Some("chai")];
    assert_eq!(a, b);
    assert_ne!(a, c);

    let set: HashSet<_> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
  }

  #[test]
  fn test_prefix_matching() {
    let key = query_key!["merchants", 2u32, 10u32];
    assert!(key.starts_with(&query_key!["merchants"]));
    assert!(key.starts_with(&query_key!["merchants", 2u32]));
    assert!(key.starts_with(&key.clone()));
    assert!(!key.starts_with(&query_key!["merchant"]));
    assert!(!key.starts_with(&query_key!["merchants", 1u32]));
    assert!(!query_key!["merchants"].starts_with(&key));
  }

  #[test]
  fn test_display() {
    let key = query_key!["social-event-transactions", "e1", 1u32, 10u32, None::<bool>];
    assert_eq!(key.to_string(), r#"["social-event-transactions","e1",1,10,null]"#);
    assert_eq!(key.resource(), Some("social-event-transactions"));
  }
}
