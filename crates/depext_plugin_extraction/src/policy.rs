use std::collections::HashMap;

use depext_core::types::ExternalBinding;
use inflector::Inflector;

/// Maps import requests to external global bindings and to canonical
/// handles.
///
/// The two lookups are independent tables, not one combined mapping: a
/// request can be externalizable without owning a distinct handle (the raw
/// request then stands in downstream), and a handle can exist for requests
/// that resolve through other means.
///
/// Both lookups are pure and total; a miss means the request falls back to
/// default bundling or to the raw-request handle.
#[derive(Debug, Clone)]
pub struct RequestPolicy {
  /// Package scope whose members are externalized wholesale.
  scope: String,
  /// Root object on the runtime global hosting scoped modules.
  global_root: String,
  /// Prefix applied to canonical handles of scoped modules.
  handle_prefix: String,
  globals: HashMap<String, ExternalBinding>,
  handles: HashMap<String, String>,
}

impl Default for RequestPolicy {
  fn default() -> Self {
    let mut policy = RequestPolicy::new("@platform/", "platform", "platform-");

    for (request, global) in [
      ("jquery", "jQuery"),
      ("moment", "moment"),
      ("react", "React"),
      ("react-dom", "ReactDOM"),
    ] {
      policy = policy.with_global(request, ExternalBinding::new([global]));
    }

    policy
      .with_global("lodash", ExternalBinding::new(["lodash"]))
      .with_global("lodash-es", ExternalBinding::new(["lodash"]))
      .with_handle("lodash-es", "lodash")
  }
}

impl RequestPolicy {
  pub fn new(
    scope: impl Into<String>,
    global_root: impl Into<String>,
    handle_prefix: impl Into<String>,
  ) -> Self {
    Self {
      scope: scope.into(),
      global_root: global_root.into(),
      handle_prefix: handle_prefix.into(),
      globals: HashMap::new(),
      handles: HashMap::new(),
    }
  }

  /// Adds a fixed request to global-binding row.
  pub fn with_global(mut self, request: impl Into<String>, binding: ExternalBinding) -> Self {
    self.globals.insert(request.into(), binding);
    self
  }

  /// Adds a fixed request to handle row.
  pub fn with_handle(mut self, request: impl Into<String>, handle: impl Into<String>) -> Self {
    self.handles.insert(request.into(), handle.into());
    self
  }

  /// Resolves a request to the global binding satisfying it at runtime,
  /// or `None` when the request is not externalizable.
  pub fn classify_external(&self, request: &str) -> Option<ExternalBinding> {
    if let Some(binding) = self.globals.get(request) {
      return Some(binding.clone());
    }

    let unscoped = request.strip_prefix(&self.scope)?;
    Some(ExternalBinding::new([
      self.global_root.clone(),
      unscoped.to_camel_case(),
    ]))
  }

  /// Resolves a request to its canonical handle, or `None` when no handle
  /// is known and the raw request should stand in.
  pub fn handle_for(&self, request: &str) -> Option<String> {
    if let Some(handle) = self.handles.get(request) {
      return Some(handle.clone());
    }

    let unscoped = request.strip_prefix(&self.scope)?;
    Some(format!("{}{}", self.handle_prefix, unscoped))
  }

  /// The baseline compatibility handle injectable into every entry point.
  pub fn polyfill_handle(&self) -> String {
    format!("{}polyfill", self.handle_prefix)
  }
}
