//! ONNX classifier adapter
//!
//! Loads a scikit-learn style binary classifier exported to ONNX. Such
//! exports carry two outputs: an int64 label tensor and either an f32
//! probability tensor or a seq(map(int64, float)), depending on the
//! converter. Both layouts are handled here so the rest of the crate
//! never sees them.

use anyhow::{Context, Result};
use ndarray::Array2;
use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, Value};
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

use super::features::FEATURE_COUNT;
use super::{InferenceError, OutbreakClassifier};

pub struct OnnxClassifier {
    name: String,
    // session.run takes &mut in this ort release
    session: RwLock<Session>,
    input_name: String,
    label_output: String,
    proba_output: String,
}

impl OnnxClassifier {
    /// Load a classifier artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            anyhow::bail!("model artifact not found at {}", path.display());
        }

        ort::init().commit()?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "label".to_string());

        let proba_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "probabilities".to_string());

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        info!(
            model = %name,
            input = %input_name,
            label = %label_output,
            proba = %proba_output,
            "ONNX classifier loaded"
        );

        Ok(Self {
            name,
            session: RwLock::new(session),
            input_name,
            label_output,
            proba_output,
        })
    }

    /// Extract class probabilities from seq(map(int64, float)) output,
    /// ordered by class label.
    fn proba_from_sequence_map(
        output: &ort::value::DynValue,
    ) -> Result<Vec<f64>, InferenceError> {
        let allocator = Allocator::default();

        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| InferenceError::BadOutput(format!("sequence downcast: {e}")))?;

        let maps = sequence
            .try_extract_sequence::<DynMapValueType>(&allocator)
            .map_err(|e| InferenceError::BadOutput(format!("sequence extract: {e}")))?;

        let map_value = maps
            .first()
            .ok_or_else(|| InferenceError::BadOutput("empty probability sequence".to_string()))?;

        let mut pairs = map_value
            .try_extract_key_values::<i64, f32>()
            .map_err(|e| InferenceError::BadOutput(format!("map extract: {e}")))?;

        if pairs.is_empty() {
            return Err(InferenceError::BadOutput("empty probability map".to_string()));
        }

        pairs.sort_by_key(|(class_id, _)| *class_id);
        Ok(pairs.into_iter().map(|(_, p)| p as f64).collect())
    }
}

impl OutbreakClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> Result<i64, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("input array: {e}")))?;
        let tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("input tensor: {e}")))?;

        let mut session = self
            .session
            .write()
            .map_err(|e| InferenceError::Runtime(format!("session lock: {e}")))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => tensor])
            .map_err(|e| InferenceError::Runtime(format!("inference: {e}")))?;

        let output = outputs
            .get(&self.label_output)
            .ok_or_else(|| InferenceError::BadOutput(format!("no output '{}'", self.label_output)))?;

        if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
            return data
                .first()
                .copied()
                .ok_or_else(|| InferenceError::BadOutput("empty label tensor".to_string()));
        }

        // Some converters emit the label as f32
        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::BadOutput(format!("label extract: {e}")))?;
        data.first()
            .map(|&v| v.round() as i64)
            .ok_or_else(|| InferenceError::BadOutput("empty label tensor".to_string()))
    }

    fn predict_proba(&self, features: &[f32; FEATURE_COUNT]) -> Result<Vec<f64>, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("input array: {e}")))?;
        let tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("input tensor: {e}")))?;

        let mut session = self
            .session
            .write()
            .map_err(|e| InferenceError::Runtime(format!("session lock: {e}")))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => tensor])
            .map_err(|e| InferenceError::Runtime(format!("inference: {e}")))?;

        let output = outputs
            .get(&self.proba_output)
            .ok_or_else(|| InferenceError::BadOutput(format!("no output '{}'", self.proba_output)))?;

        // Tensor layout: [1, num_classes]
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            if data.is_empty() {
                return Err(InferenceError::BadOutput("empty probability tensor".to_string()));
            }
            return Ok(data.iter().map(|&p| p as f64).collect());
        }

        // seq(map) layout used by some sklearn converters
        if DynSequenceValueType::can_downcast(&output.dtype()) {
            return Self::proba_from_sequence_map(output);
        }

        Err(InferenceError::BadOutput(
            "unsupported probability output format".to_string(),
        ))
    }
}
