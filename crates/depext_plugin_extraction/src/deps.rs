use std::collections::BTreeSet;
use std::collections::HashSet;

use depext_core::types::Entrypoint;
use depext_core::types::Module;
use depext_core::types::ModuleId;

use crate::policy::RequestPolicy;

/// Collects the canonical handles of every externalized import reachable
/// from one entry point.
///
/// Walks every chunk's modules, descending into concatenated sub-modules
/// so scope hoisting cannot hide an externalized dependency. A module whose
/// request was externalized maps through the policy's handle lookup, with
/// the raw request standing in when no handle is known.
///
/// Chunk and module visitation order is irrelevant: the result is a sorted
/// set, so a module shared between chunks, or present both directly and
/// inside a concatenation, contributes once however often it is reached.
pub fn entrypoint_external_handles(
  entrypoint: &Entrypoint,
  externalized: &HashSet<String>,
  policy: &RequestPolicy,
  inject_polyfill: bool,
) -> BTreeSet<String> {
  let mut handles = BTreeSet::new();
  if inject_polyfill {
    handles.insert(policy.polyfill_handle());
  }

  // The host graph may share sub-module references between containers;
  // visit each module once per traversal.
  let mut visited: HashSet<ModuleId> = HashSet::new();

  for chunk in &entrypoint.chunks {
    for module in &chunk.modules {
      collect_module(module, externalized, policy, &mut visited, &mut handles);
    }
  }

  handles
}

fn collect_module(
  module: &Module,
  externalized: &HashSet<String>,
  policy: &RequestPolicy,
  visited: &mut HashSet<ModuleId>,
  handles: &mut BTreeSet<String>,
) {
  if !visited.insert(module.id) {
    return;
  }

  if let Some(request) = &module.request {
    if externalized.contains(request) {
      let handle = policy
        .handle_for(request)
        .unwrap_or_else(|| request.clone());
      handles.insert(handle);
    }
  }

  for sub_module in &module.concatenated {
    collect_module(sub_module, externalized, policy, visited, handles);
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use depext_core::types::Chunk;
  use pretty_assertions::assert_eq;

  use super::*;

  fn entrypoint_with_modules(modules: Vec<Arc<Module>>) -> Entrypoint {
    Entrypoint {
      name: "app".into(),
      chunks: vec![Arc::new(Chunk {
        id: "app".into(),
        modules,
        files: Vec::new(),
      })],
    }
  }

  fn handles(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
  }

  #[test]
  fn attributes_only_externalized_requests() {
    let entrypoint = entrypoint_with_modules(vec![
      Arc::new(Module::new(ModuleId(1), "@platform/api-fetch")),
      Arc::new(Module::new(ModuleId(2), "./src/local.js")),
    ]);
    let externalized = HashSet::from(["@platform/api-fetch".to_string()]);

    let result = entrypoint_external_handles(
      &entrypoint,
      &externalized,
      &RequestPolicy::default(),
      false,
    );

    assert_eq!(result, handles(&["platform-api-fetch"]));
  }

  #[test]
  fn a_request_the_policy_declined_is_never_attributed() {
    // "./src/local.js" was bundled normally, so it never entered the
    // externalized set even though it appears in the graph.
    let entrypoint =
      entrypoint_with_modules(vec![Arc::new(Module::new(ModuleId(1), "./src/local.js"))]);

    let result = entrypoint_external_handles(
      &entrypoint,
      &HashSet::new(),
      &RequestPolicy::default(),
      false,
    );

    assert!(result.is_empty());
  }

  #[test]
  fn falls_back_to_the_raw_request_when_no_handle_is_known() {
    let entrypoint = entrypoint_with_modules(vec![Arc::new(Module::new(ModuleId(1), "react"))]);
    let externalized = HashSet::from(["react".to_string()]);

    let result = entrypoint_external_handles(
      &entrypoint,
      &externalized,
      &RequestPolicy::default(),
      false,
    );

    assert_eq!(result, handles(&["react"]));
  }

  #[test]
  fn descends_into_concatenated_sub_modules() {
    let concatenated = Module {
      id: ModuleId(1),
      request: None,
      concatenated: vec![
        Arc::new(Module::new(ModuleId(2), "@platform/escape-html")),
        Arc::new(Module::new(ModuleId(3), "./src/util.js")),
      ],
    };
    let entrypoint = entrypoint_with_modules(vec![Arc::new(concatenated)]);
    let externalized = HashSet::from(["@platform/escape-html".to_string()]);

    let result = entrypoint_external_handles(
      &entrypoint,
      &externalized,
      &RequestPolicy::default(),
      false,
    );

    assert_eq!(result, handles(&["platform-escape-html"]));
  }

  #[test]
  fn a_module_shared_between_containers_contributes_once() {
    let shared = Arc::new(Module::new(ModuleId(7), "@platform/url"));
    let concatenated = Module {
      id: ModuleId(1),
      request: None,
      concatenated: vec![shared.clone()],
    };
    // Present directly in the chunk and embedded inside a concatenation.
    let entrypoint = entrypoint_with_modules(vec![shared, Arc::new(concatenated)]);
    let externalized = HashSet::from(["@platform/url".to_string()]);

    let result = entrypoint_external_handles(
      &entrypoint,
      &externalized,
      &RequestPolicy::default(),
      false,
    );

    assert_eq!(result, handles(&["platform-url"]));
  }

  #[test]
  fn injects_the_polyfill_handle_when_configured() {
    let entrypoint = entrypoint_with_modules(Vec::new());

    let result = entrypoint_external_handles(
      &entrypoint,
      &HashSet::new(),
      &RequestPolicy::default(),
      true,
    );

    assert_eq!(result, handles(&["platform-polyfill"]));
  }

  #[test]
  fn result_is_sorted_lexicographically() {
    let entrypoint = entrypoint_with_modules(vec![
      Arc::new(Module::new(ModuleId(1), "@platform/url")),
      Arc::new(Module::new(ModuleId(2), "@platform/api-fetch")),
      Arc::new(Module::new(ModuleId(3), "react")),
    ]);
    let externalized = HashSet::from([
      "@platform/url".to_string(),
      "@platform/api-fetch".to_string(),
      "react".to_string(),
    ]);

    let result = entrypoint_external_handles(
      &entrypoint,
      &externalized,
      &RequestPolicy::default(),
      false,
    );

    let ordered: Vec<_> = result.into_iter().collect();
    assert_eq!(
      ordered,
      vec!["platform-api-fetch", "platform-url", "react"]
    );
  }
}
