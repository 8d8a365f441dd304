use std::sync::Arc;

use super::module::Module;

/// A unit of compiled output grouping one or more modules.
///
/// Chunks are owned by one or more entry points; splitting optimizations
/// routinely share a chunk between several of them.
#[derive(Debug, Default)]
pub struct Chunk {
  pub id: String,
  pub modules: Vec<Arc<Module>>,
  /// Output file paths emitted for this chunk, in emission order.
  pub files: Vec<String>,
}

/// A named logical bundle requested by the build configuration.
#[derive(Debug, Default)]
pub struct Entrypoint {
  pub name: String,
  pub chunks: Vec<Arc<Chunk>>,
}

impl Entrypoint {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      chunks: Vec::new(),
    }
  }

  /// All output files of this entry point, in chunk order.
  ///
  /// The list is unfiltered and may still contain hot-update or other
  /// development-only artifacts.
  pub fn files(&self) -> Vec<String> {
    self
      .chunks
      .iter()
      .flat_map(|chunk| chunk.files.iter().cloned())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn files_preserves_chunk_order() {
    let entrypoint = Entrypoint {
      name: "main".into(),
      chunks: vec![
        Arc::new(Chunk {
          id: "main".into(),
          modules: Vec::new(),
          files: vec!["main.js".into(), "main.css".into()],
        }),
        Arc::new(Chunk {
          id: "vendors".into(),
          modules: Vec::new(),
          files: vec!["vendors.js".into()],
        }),
      ],
    };

    assert_eq!(entrypoint.files(), vec!["main.js", "main.css", "vendors.js"]);
  }
}
