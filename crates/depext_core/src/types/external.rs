use serde::Deserialize;
use serde::Serialize;

/// Property path on the host runtime's global object that satisfies an
/// externalized import at runtime, e.g. `["platform", "escapeHtml"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExternalBinding(Vec<String>);

impl ExternalBinding {
  pub fn new<I, S>(path: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self(path.into_iter().map(Into::into).collect())
  }

  pub fn path(&self) -> &[String] {
    &self.0
  }
}
