use std::path::PathBuf;

use crate::dtype::DType;

/// Bootstrap settings handed to whichever backend is linked.
///
/// Backends that load weights require `model_path`; backends without weights
/// (see [`EchoEngine`](crate::EchoEngine)) only log it.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub model_path: Option<PathBuf>,
    pub dtype: DType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            dtype: DType::Bf16,
        }
    }
}
