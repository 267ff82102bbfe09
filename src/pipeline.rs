use crate::config::PipelineConfig;
use crate::error::{ExternalProducerError, QuireError};
use log::{debug, info};
use quire_model::{Document, validate_document};
use quire_render_pdf::{ArtifactProducer, LopdfProducer, PrintDocument, project_document};
use quire_style::PaperSize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Builds a [`PrintPipeline`].
///
/// ```no_run
/// # async fn run(doc: &quire::Document) -> Result<(), quire::QuireError> {
/// use std::time::Duration;
///
/// let pipeline = quire::PrintPipelineBuilder::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_compression(false)
///     .build()?;
/// let pdf = pipeline.generate(doc).await?;
/// # Ok(()) }
/// ```
#[derive(Default)]
pub struct PrintPipelineBuilder {
    config: PipelineConfig,
    producer: Option<Arc<dyn ArtifactProducer>>,
}

impl PrintPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every setting at once, e.g. with one loaded from JSON.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.producer_timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Only affects the built-in producer.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.config.compress = compress;
        self
    }

    pub fn with_fallback_paper(mut self, paper: PaperSize) -> Self {
        self.config.fallback_paper = paper;
        self
    }

    /// Uses `producer` instead of the built-in [`LopdfProducer`].
    pub fn with_producer(mut self, producer: impl ArtifactProducer + 'static) -> Self {
        self.producer = Some(Arc::new(producer));
        self
    }

    pub fn build(self) -> Result<PrintPipeline, QuireError> {
        self.config.check()?;
        let producer = match self.producer {
            Some(producer) => producer,
            None => Arc::new(LopdfProducer::new().with_compression(self.config.compress)),
        };
        info!("Print pipeline ready with producer '{}'", producer.name());
        Ok(PrintPipeline {
            config: self.config,
            producer,
        })
    }
}

/// Document to artifact: sanitize, project, then run the producer on a
/// blocking task under the configured timeout.
pub struct PrintPipeline {
    config: PipelineConfig,
    producer: Arc<dyn ArtifactProducer>,
}

impl PrintPipeline {
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The sanitized print projection, without producing anything.
    pub fn prepare(&self, doc: &Document) -> Result<PrintDocument, QuireError> {
        let sanitized = doc.sanitized_for_print()?;
        Ok(project_document(&sanitized))
    }

    pub async fn generate(&self, doc: &Document) -> Result<Vec<u8>, QuireError> {
        info!("Generating '{}'", doc.metadata.title);
        let printed = self.prepare(doc)?;
        self.produce(printed).await
    }

    /// Validates untyped input first, filling in the fallback paper size.
    pub async fn generate_json(&self, value: &Value) -> Result<Vec<u8>, QuireError> {
        let mut value = value.clone();
        self.apply_fallback_paper(&mut value);
        let doc = validate_document(&value)?;
        self.generate(&doc).await
    }

    fn apply_fallback_paper(&self, value: &mut Value) {
        let Some(root) = value.as_object_mut() else {
            return;
        };
        let settings = root
            .entry("pageSettings")
            .or_insert_with(|| Value::Object(Default::default()));
        if let Some(settings) = settings.as_object_mut() {
            if !settings.contains_key("paperSize") {
                debug!("No paper size given, using {}", self.config.fallback_paper.name());
                settings.insert(
                    "paperSize".into(),
                    Value::String(self.config.fallback_paper.name().to_string()),
                );
            }
        }
    }

    /// Runs the producer. A timeout leaves the blocking task to finish on its
    /// own; its result is discarded.
    pub async fn produce(&self, printed: PrintDocument) -> Result<Vec<u8>, QuireError> {
        let producer = Arc::clone(&self.producer);
        let name = producer.name().to_string();
        let timeout = self.config.timeout();

        let task = tokio::task::spawn_blocking(move || producer.produce(&printed));
        let bytes = match tokio::time::timeout(timeout, task).await {
            Err(_) => return Err(ExternalProducerError::TimedOut { producer: name, timeout }.into()),
            Ok(Err(join)) => {
                return Err(ExternalProducerError::Aborted {
                    producer: name,
                    message: join.to_string(),
                }
                .into());
            }
            Ok(Ok(Err(source))) => {
                return Err(ExternalProducerError::Failed { producer: name, source }.into());
            }
            Ok(Ok(Ok(bytes))) => bytes,
        };
        info!("Producer '{}' wrote {} bytes", name, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_render_pdf::ProducerError;
    use serde_json::json;

    struct Failing;

    impl ArtifactProducer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn produce(&self, _doc: &PrintDocument) -> Result<Vec<u8>, ProducerError> {
            Err(ProducerError::Failed {
                producer: "failing".into(),
                message: "disk full".into(),
            })
        }
    }

    struct Slow;

    impl ArtifactProducer for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        fn produce(&self, _doc: &PrintDocument) -> Result<Vec<u8>, ProducerError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(vec![])
        }
    }

    fn doc() -> Document {
        validate_document(&json!({ "metadata": { "title": "T" }, "content": [] })).unwrap()
    }

    #[tokio::test]
    async fn producer_failure_is_external_error() {
        let pipeline = PrintPipelineBuilder::new().with_producer(Failing).build().unwrap();
        let err = pipeline.generate(&doc()).await.unwrap_err();
        assert!(matches!(
            err,
            QuireError::Producer(ExternalProducerError::Failed { ref producer, .. }) if producer == "failing"
        ));
    }

    #[tokio::test]
    async fn slow_producer_times_out() {
        let pipeline = PrintPipelineBuilder::new()
            .with_producer(Slow)
            .with_timeout(Duration::from_millis(20))
            .build()
            .unwrap();
        let err = pipeline.generate(&doc()).await.unwrap_err();
        assert!(matches!(err, QuireError::Producer(ExternalProducerError::TimedOut { .. })));
    }

    #[test]
    fn zero_timeout_fails_to_build() {
        let result = PrintPipelineBuilder::new().with_timeout(Duration::ZERO).build();
        assert!(matches!(result, Err(QuireError::Config(_))));
    }

    #[test]
    fn fallback_paper_fills_missing_size_only() {
        let pipeline = PrintPipelineBuilder::new()
            .with_fallback_paper(PaperSize::Letter)
            .build()
            .unwrap();
        let mut bare = json!({ "metadata": { "title": "T" }, "content": [] });
        pipeline.apply_fallback_paper(&mut bare);
        assert_eq!(bare["pageSettings"]["paperSize"], "Letter");

        let mut given = json!({ "metadata": { "title": "T" }, "pageSettings": { "paperSize": "A5" }, "content": [] });
        pipeline.apply_fallback_paper(&mut given);
        assert_eq!(given["pageSettings"]["paperSize"], "A5");
    }
}
