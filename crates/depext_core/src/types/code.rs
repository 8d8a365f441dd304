use std::fmt::Debug;
use std::fmt::Formatter;

/// The byte contents of a finished output asset.
#[derive(PartialEq, Default, Clone)]
pub struct Code {
  inner: Vec<u8>,
}

impl Code {
  pub fn new(bytes: Vec<u8>) -> Self {
    Self { inner: bytes }
  }

  pub fn bytes(&self) -> &[u8] {
    &self.inner
  }

  pub fn size(&self) -> usize {
    self.inner.len()
  }
}

impl Debug for Code {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "Code({} bytes)", self.inner.len())
  }
}

impl From<String> for Code {
  fn from(value: String) -> Self {
    Self {
      inner: value.into_bytes(),
    }
  }
}

impl From<&str> for Code {
  fn from(value: &str) -> Self {
    Self {
      inner: value.to_owned().into_bytes(),
    }
  }
}

impl From<Vec<u8>> for Code {
  fn from(value: Vec<u8>) -> Self {
    Self { inner: value }
  }
}
