use std::collections::HashSet;
use std::sync::Arc;

use depext_core::plugin::ExternalsPlugin;
use depext_core::plugin::ExternalsResolution;
use parking_lot::RwLock;

use crate::policy::RequestPolicy;

/// Answers the host's per-import externals hook and records every request
/// it externalizes.
///
/// The recorded set spans the whole compilation, not one entry point:
/// externalization is a module-graph-wide decision, while attribution to
/// entry points happens later during manifest assembly. Resolution appends
/// to the set; assembly only reads it. Inserts are idempotent, so repeated
/// or interleaved hook invocations need no ordering guarantee.
#[derive(Debug, Default)]
pub struct Externalizer {
  policy: Arc<RequestPolicy>,
  externalized: RwLock<HashSet<String>>,
}

impl Externalizer {
  pub fn new(policy: Arc<RequestPolicy>) -> Self {
    Self {
      policy,
      externalized: RwLock::new(HashSet::new()),
    }
  }

  /// Snapshot of every request externalized so far.
  pub fn externalized_requests(&self) -> HashSet<String> {
    self.externalized.read().clone()
  }
}

impl ExternalsPlugin for Externalizer {
  fn resolve_external(&self, request: &str) -> ExternalsResolution {
    match self.policy.classify_external(request) {
      Some(binding) => {
        self.externalized.write().insert(request.to_owned());
        tracing::debug!(request, ?binding, "externalized import");
        ExternalsResolution::External(binding)
      }
      None => ExternalsResolution::Unresolved,
    }
  }
}

#[cfg(test)]
mod tests {
  use depext_core::types::ExternalBinding;
  use pretty_assertions::assert_eq;

  use super::*;

  fn create_externalizer() -> Externalizer {
    Externalizer::new(Arc::new(RequestPolicy::default()))
  }

  #[test]
  fn externalizable_requests_are_recorded_and_resolved() {
    let externalizer = create_externalizer();

    let resolution = externalizer.resolve_external("@platform/api-fetch");

    assert_eq!(
      resolution,
      ExternalsResolution::External(ExternalBinding::new(["platform", "apiFetch"]))
    );
    assert_eq!(
      externalizer.externalized_requests(),
      HashSet::from(["@platform/api-fetch".to_string()])
    );
  }

  #[test]
  fn declined_requests_never_enter_the_set() {
    let externalizer = create_externalizer();

    let resolution = externalizer.resolve_external("left-pad");

    assert_eq!(resolution, ExternalsResolution::Unresolved);
    assert!(externalizer.externalized_requests().is_empty());
  }

  #[test]
  fn repeated_offers_of_one_request_are_idempotent() {
    let externalizer = create_externalizer();

    let first = externalizer.resolve_external("react");
    let second = externalizer.resolve_external("react");

    assert_eq!(first, second);
    assert_eq!(externalizer.externalized_requests().len(), 1);
  }
}
