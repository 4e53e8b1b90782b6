use std::path::Path;

use super::filter_error::FilterError;

/// Domain interface for the external audio-transform capability.
///
/// Implementations run a complete filter-graph expression over `input` and
/// write the result to `output` in one pass.
pub trait TransformExecutor: Send {
    fn execute(&self, input: &Path, filter_graph: &str, output: &Path) -> Result<(), FilterError>;
}
