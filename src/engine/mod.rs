//! Recognition Engine
//!
//! Owns the classifier backend lifecycle (lazy single-flight load with a
//! synthetic fallback), converts canonical images to tensors, and reduces raw
//! prediction vectors into ranked, catalog-resolved results. The engine never
//! fails a recognition request: every error path degrades to a usable ranked
//! list and a status-channel report.

pub mod backend;
pub mod models;

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use anyhow::Result;
use ndarray::Array4;
use parking_lot::{Mutex, RwLock};
use tokio::sync::{watch, OnceCell};
use tracing::{debug, info, warn};

use crate::catalog::CharacterCatalog;
use crate::config::RecognitionSettings;
use crate::normalize::{NormalizedImage, CANONICAL_SIZE};

pub use backend::{BackendError, BackendKind, InferenceBackend, OnnxBackend, SyntheticBackend};
pub use models::ModelManager;

/// Most recent top candidates kept in the recognition history.
const HISTORY_CAPACITY: usize = 50;

/// Backend lifecycle state. Transitions are one-directional:
/// `Unloaded -> Loading -> (Ready | Degraded)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unloaded,
    Loading,
    /// Real classifier loaded and cached
    Ready,
    /// Synthetic fallback active; functionally equivalent to Ready
    Degraded,
}

/// Phase reports published on the status channel.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineStatus {
    Idle,
    Loading,
    Analyzing,
    Ready,
    Error(String),
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Idle => write!(f, "idle"),
            EngineStatus::Loading => write!(f, "loading"),
            EngineStatus::Analyzing => write!(f, "analyzing"),
            EngineStatus::Ready => write!(f, "ready"),
            EngineStatus::Error(message) => write!(f, "{message}"),
        }
    }
}

/// One ranked recognition candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub character: char,
    pub pinyin: &'static str,
    /// Raw backend score; ordering matters, calibration does not.
    pub confidence: f32,
}

impl fmt::Display for RankedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {:.0}%",
            self.character,
            self.pinyin,
            self.confidence * 100.0
        )
    }
}

struct LoadedBackend {
    kind: BackendKind,
    backend: Box<dyn InferenceBackend>,
}

/// Handwriting recognition engine over a lazily-acquired backend.
pub struct RecognitionEngine {
    loaded: OnceCell<LoadedBackend>,
    state: RwLock<EngineState>,
    status_tx: watch::Sender<EngineStatus>,
    // Kept so the channel stays open with zero external subscribers
    _status_rx: watch::Receiver<EngineStatus>,
    catalog: CharacterCatalog,
    models: ModelManager,
    history: Mutex<Vec<char>>,
    acquisition_attempts: AtomicUsize,
}

impl RecognitionEngine {
    /// Create an engine from recognition settings.
    pub fn new(settings: &RecognitionSettings) -> Result<Self> {
        let mut models = ModelManager::new(&settings.model_url)?;
        if settings.offline {
            models = models.offline();
        }
        Ok(Self::with_model_manager(models))
    }

    /// Create an engine over an explicit model manager.
    pub fn with_model_manager(models: ModelManager) -> Self {
        let (status_tx, status_rx) = watch::channel(EngineStatus::Idle);
        Self {
            loaded: OnceCell::new(),
            state: RwLock::new(EngineState::Unloaded),
            status_tx,
            _status_rx: status_rx,
            catalog: CharacterCatalog::new(),
            models,
            history: Mutex::new(Vec::new()),
            acquisition_attempts: AtomicUsize::new(0),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    /// Which backend variant is active, once loaded.
    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.loaded.get().map(|l| l.kind)
    }

    /// Subscribe to phase reports. Any number of observers may subscribe;
    /// each sees the latest status.
    pub fn subscribe(&self) -> watch::Receiver<EngineStatus> {
        self.status_tx.subscribe()
    }

    /// The character catalog backing index resolution.
    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    /// Top candidates from past recognitions, most recent first, de-duplicated.
    pub fn history(&self) -> Vec<char> {
        self.history.lock().clone()
    }

    /// Ensure the backend is loaded, acquiring it on first call.
    ///
    /// Idempotent and single-flight: concurrent callers await the same
    /// in-flight acquisition, and the resulting backend is cached for the
    /// lifetime of the engine. Acquisition failure is not an error — the
    /// engine degrades to the synthetic backend and stays usable.
    pub async fn load_backend(&self) -> EngineState {
        self.loaded_backend().await;
        self.state()
    }

    async fn loaded_backend(&self) -> &LoadedBackend {
        self.loaded
            .get_or_init(|| async {
                self.acquisition_attempts.fetch_add(1, AtomicOrdering::SeqCst);
                *self.state.write() = EngineState::Loading;
                self.publish(EngineStatus::Loading);

                match self.acquire_onnx().await {
                    Ok(backend) => {
                        info!("Recognition backend ready (onnx)");
                        *self.state.write() = EngineState::Ready;
                        self.publish(EngineStatus::Ready);
                        LoadedBackend {
                            kind: BackendKind::Onnx,
                            backend,
                        }
                    }
                    Err(e) => {
                        warn!("Model acquisition failed, using demonstration backend: {e:#}");
                        *self.state.write() = EngineState::Degraded;
                        self.publish(EngineStatus::Error(format!(
                            "model load failed, using demonstration backend: {e}"
                        )));
                        LoadedBackend {
                            kind: BackendKind::Synthetic,
                            backend: Box::new(SyntheticBackend),
                        }
                    }
                }
            })
            .await
    }

    async fn acquire_onnx(&self) -> Result<Box<dyn InferenceBackend>> {
        let model_path = self.models.ensure_model().await?;
        let backend = OnnxBackend::new(&model_path)?;
        Ok(Box::new(backend))
    }

    /// Recognize the drawn character, returning the `k` best candidates.
    ///
    /// Suspends until the backend is loaded. Total: inference failures fall
    /// back to the fixed demonstration ranking and are reported on the status
    /// channel, never to the caller.
    pub async fn recognize(&self, image: &NormalizedImage, k: usize) -> Vec<RankedResult> {
        let loaded = self.loaded_backend().await;

        self.publish(EngineStatus::Analyzing);
        let tensor = image_to_tensor(image);

        let results = match loaded.backend.predict(tensor).await {
            Ok(scores) => {
                debug!(backend = loaded.backend.name(), "prediction complete");
                let results = self.rank(&scores, k);
                self.publish(EngineStatus::Ready);
                results
            }
            Err(e) => {
                warn!("Inference failed, returning demonstration results: {e}");
                self.publish(EngineStatus::Error(format!("recognition failed: {e}")));
                self.rank(&SyntheticBackend::demonstration_scores(), k)
            }
        };

        if let Some(top) = results.first() {
            self.remember(top.character);
        }
        results
    }

    /// Reduce a prediction vector to the top `k` catalog-resolved results,
    /// sorted by descending score with ties broken by class index.
    fn rank(&self, scores: &[f32], k: usize) -> Vec<RankedResult> {
        let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        indexed.truncate(k.min(self.catalog.class_count()));

        indexed
            .into_iter()
            .map(|(index, confidence)| {
                let record = self.catalog.resolve(index);
                RankedResult {
                    character: record.character,
                    pinyin: record.pinyin,
                    confidence,
                }
            })
            .collect()
    }

    fn remember(&self, character: char) {
        let mut history = self.history.lock();
        history.retain(|&c| c != character);
        history.insert(0, character);
        history.truncate(HISTORY_CAPACITY);
    }

    fn publish(&self, status: EngineStatus) {
        let _ = self.status_tx.send(status);
    }

    #[cfg(test)]
    fn acquisition_attempt_count(&self) -> usize {
        self.acquisition_attempts.load(AtomicOrdering::SeqCst)
    }
}

/// Convert a canonical image into the backend's `[1, 1, S, S]` input tensor.
///
/// Values are scaled to [0, 1] and inverted so drawn strokes become the
/// high-intensity class, matching the classifier's training data.
pub fn image_to_tensor(image: &NormalizedImage) -> Array4<f32> {
    let size = CANONICAL_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, 1, size, size));

    for (x, y, pixel) in image.pixels().enumerate_pixels() {
        tensor[[0, 0, y as usize, x as usize]] = 1.0 - pixel.0[0] as f32 / 255.0;
    }

    tensor
}
