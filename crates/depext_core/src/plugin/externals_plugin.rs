use std::fmt::Debug;

use crate::types::ExternalBinding;

/// Outcome of offering an unresolved import to an externals plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalsResolution {
  /// The import stays out of the bundle and is satisfied by the given
  /// global binding at runtime.
  External(ExternalBinding),
  /// No opinion; the compiler bundles the module normally.
  Unresolved,
}

/// Consulted once for every unresolved import encountered during module
/// resolution.
///
/// The host interleaves invocations with the rest of the build in whatever
/// order resolution proceeds, and may offer the same request more than
/// once; implementations must answer deterministically for a given request.
pub trait ExternalsPlugin: Debug + Send + Sync {
  fn resolve_external(&self, request: &str) -> ExternalsResolution;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug)]
  struct TestExternalsPlugin {}

  impl ExternalsPlugin for TestExternalsPlugin {
    fn resolve_external(&self, _request: &str) -> ExternalsResolution {
      ExternalsResolution::Unresolved
    }
  }

  #[test]
  fn can_be_dyn() {
    let plugin: Box<dyn ExternalsPlugin> = Box::new(TestExternalsPlugin {});

    assert_eq!(
      plugin.resolve_external("left-pad"),
      ExternalsResolution::Unresolved
    );
  }
}
