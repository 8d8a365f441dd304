use std::sync::Arc;

/// Identity of a module within one compilation, assigned by the host
/// compiler.
///
/// Graph traversals key their visited sets on this, so shared or
/// self-referential sub-module references are visited once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub u64);

/// Read-only view of one module in the compiled graph.
///
/// `request` holds the import specifier as written in source, for modules
/// that originated from one. A module produced by scope-hoisting carries
/// the merged source modules in `concatenated`; those sub-modules may also
/// appear in other containers.
#[derive(Debug, Default)]
pub struct Module {
  pub id: ModuleId,
  pub request: Option<String>,
  pub concatenated: Vec<Arc<Module>>,
}

impl Module {
  pub fn new(id: ModuleId, request: impl Into<String>) -> Self {
    Self {
      id,
      request: Some(request.into()),
      concatenated: Vec::new(),
    }
  }
}
