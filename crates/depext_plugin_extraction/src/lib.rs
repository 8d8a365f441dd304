use std::sync::Arc;

use depext_core::plugin::ExternalsPlugin;
use depext_core::plugin::ExternalsResolution;
use depext_core::plugin::ProcessAssetsPlugin;
use depext_core::types::Compilation;
use serde::Deserialize;

use crate::assets::entrypoint_assets;
use crate::deps::entrypoint_external_handles;
use crate::externals::Externalizer;
use crate::manifest::AssetsManifest;
use crate::policy::RequestPolicy;

pub mod assets;
pub mod deps;
pub mod externals;
pub mod manifest;
pub mod policy;

/// Options bag for [`DependencyExtractionPlugin`].
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyExtractionOptions {
  /// Unconditionally adds the baseline compatibility handle to every entry
  /// point's dependency list.
  pub inject_polyfill: bool,
}

/// Excludes policy-matched imports from the bundle during module
/// resolution, then derives the assets manifest once the compilation has
/// finished generating output.
///
/// The manifest tells a server-side page renderer which files belong to
/// which entry point and which externally-provided runtime modules each
/// entry point needs, without the renderer re-parsing bundles itself.
#[derive(Debug)]
pub struct DependencyExtractionPlugin {
  options: DependencyExtractionOptions,
  policy: Arc<RequestPolicy>,
  externalizer: Externalizer,
}

impl Default for DependencyExtractionPlugin {
  fn default() -> Self {
    Self::new(DependencyExtractionOptions::default())
  }
}

impl DependencyExtractionPlugin {
  pub fn new(options: DependencyExtractionOptions) -> Self {
    Self::with_policy(options, RequestPolicy::default())
  }

  pub fn with_policy(options: DependencyExtractionOptions, policy: RequestPolicy) -> Self {
    let policy = Arc::new(policy);

    Self {
      options,
      externalizer: Externalizer::new(policy.clone()),
      policy,
    }
  }
}

impl ExternalsPlugin for DependencyExtractionPlugin {
  fn resolve_external(&self, request: &str) -> ExternalsResolution {
    self.externalizer.resolve_external(request)
  }
}

impl ProcessAssetsPlugin for DependencyExtractionPlugin {
  #[tracing::instrument(
    level = "debug",
    skip_all,
    fields(plugin = "DependencyExtractionPlugin")
  )]
  fn process_assets(&self, compilation: &mut Compilation) -> Result<(), anyhow::Error> {
    let externalized = self.externalizer.externalized_requests();
    let mut manifest = AssetsManifest::default();

    for (entrypoint_name, entrypoint) in &compilation.entrypoints {
      let external_handles = entrypoint_external_handles(
        entrypoint,
        &externalized,
        &self.policy,
        self.options.inject_polyfill,
      );
      let assets = entrypoint_assets(entrypoint, compilation)?;

      tracing::debug!(
        entrypoint = %entrypoint_name,
        assets = assets.len(),
        externals = external_handles.len(),
        "assembled entry point"
      );

      manifest.add_entrypoint_assets(entrypoint_name, assets, &external_handles);
    }

    manifest.emit(compilation)
  }
}
