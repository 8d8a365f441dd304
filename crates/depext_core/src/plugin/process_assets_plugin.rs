use std::fmt::Debug;

use crate::types::Compilation;

/// Runs once per compilation, after asset generation and before the final
/// output write.
///
/// Module resolution has completed by the time this fires; the module and
/// chunk graphs are no longer mutated, so implementations may treat the
/// compilation as a fully materialized snapshot.
pub trait ProcessAssetsPlugin: Debug + Send + Sync {
  fn process_assets(&self, compilation: &mut Compilation) -> Result<(), anyhow::Error>;
}
