//! Pipeline orchestration for the main entry points.
//!
//! [`Pipeline`] wires the stage components together; [`run`] is the
//! one-call entry point with default components.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use archive::{ArchiveExtractor, StrategyRegistry};
use codegen::{EmitError, Emitter, RustEmitter};
use registry::{HandlerLookup, HandlerRegistry};
use resolver::{ArtifactLocator, DynResolver};
use schema::{ParseErrorKind, SchemaFormat, SchemaParseError, YamlSchemaFormat};
use tracing::{debug, info, warn};
use types::{ArtifactItem, PipelineConfig};

use crate::report::{ItemOutcome, RunReport};
use crate::sink::{CompileRootRegistrar, IncrementalFileSink, SourceSink};
use crate::state::{ItemState, Stage};
use crate::ConfigurationError;

/// Run the pipeline over `config` with the default components.
///
/// Artifacts are resolved through `resolver`; archives are unpacked with the
/// built-in strategies; YAML schemas are rendered to Rust and written with an
/// [`IncrementalFileSink`].
///
/// # Errors
///
/// Returns [`ConfigurationError`] when the configuration is unusable. Every
/// other failure is recorded in the returned [`RunReport`].
pub fn run(config: &PipelineConfig, resolver: DynResolver) -> Result<RunReport, ConfigurationError> {
    Pipeline::builder().resolver(resolver).build()?.run(config)
}

/// The assembled resolve → extract → discover → parse → generate pipeline.
pub struct Pipeline {
    locator: ArtifactLocator,
    extractor: ArchiveExtractor,
    formats: Vec<Arc<dyn SchemaFormat>>,
    emitter: Option<Arc<dyn Emitter>>,
    sink: Arc<dyn SourceSink>,
    registrar: Option<Arc<dyn CompileRootRegistrar>>,
}

/// Builder for [`Pipeline`]
///
/// Only the resolver is required. Defaults: the conventional handler registry,
/// the built-in unpack strategies, the YAML schema format, a [`RustEmitter`]
/// writing into the run's output directory, and an [`IncrementalFileSink`].
#[derive(Default)]
pub struct PipelineBuilder {
    resolver: Option<DynResolver>,
    handlers: Option<Arc<dyn HandlerLookup>>,
    strategies: Option<StrategyRegistry>,
    formats: Vec<Arc<dyn SchemaFormat>>,
    emitter: Option<Arc<dyn Emitter>>,
    sink: Option<Arc<dyn SourceSink>>,
    registrar: Option<Arc<dyn CompileRootRegistrar>>,
}

impl PipelineBuilder {
    /// Set the artifact resolver
    pub fn resolver(mut self, resolver: DynResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the artifact handler lookup
    pub fn handlers(mut self, handlers: Arc<dyn HandlerLookup>) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// Set the unpack strategy registry
    pub fn strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Add a schema format; the first format accepting a file parses it
    pub fn format(mut self, format: Arc<dyn SchemaFormat>) -> Self {
        self.formats.push(format);
        self
    }

    /// Set the emitter
    pub fn emitter(mut self, emitter: Arc<dyn Emitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Set the output sink
    pub fn sink(mut self, sink: Arc<dyn SourceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the compile-root registrar
    pub fn registrar(mut self, registrar: Arc<dyn CompileRootRegistrar>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Build the Pipeline
    pub fn build(self) -> Result<Pipeline, ConfigurationError> {
        let resolver = self.resolver.ok_or(ConfigurationError::MissingComponent("resolver"))?;
        let handlers =
            self.handlers.unwrap_or_else(|| Arc::new(HandlerRegistry::with_defaults()));
        let formats = if self.formats.is_empty() {
            vec![Arc::new(YamlSchemaFormat::new()) as Arc<dyn SchemaFormat>]
        } else {
            self.formats
        };

        Ok(Pipeline {
            locator: ArtifactLocator::new(resolver, handlers),
            extractor: ArchiveExtractor::new(
                self.strategies.unwrap_or_else(StrategyRegistry::with_defaults),
            ),
            formats,
            emitter: self.emitter,
            sink: self.sink.unwrap_or_else(|| Arc::new(IncrementalFileSink::new())),
            registrar: self.registrar,
        })
    }
}

/// Per-run mutable state shared across items.
struct RunContext<'a> {
    config: &'a PipelineConfig,
    emitter: &'a dyn Emitter,
    suffixes: Vec<&'a str>,
    /// generated path -> schema file that produced it
    claimed: BTreeMap<PathBuf, PathBuf>,
    report: RunReport,
}

impl Pipeline {
    /// Create a new builder for Pipeline
    pub fn builder() -> PipelineBuilder { PipelineBuilder::default() }

    /// Check `config` without touching the filesystem.
    pub fn validate(config: &PipelineConfig) -> Result<(), ConfigurationError> {
        if config.artifact_items.is_empty() {
            return Err(ConfigurationError::NoArtifactItems);
        }
        if config.output_directory.as_os_str().is_empty() {
            return Err(ConfigurationError::EmptyOutputDirectory);
        }
        for (index, item) in config.artifact_items.iter().enumerate() {
            if let Some(field) = item.coordinate.missing_field() {
                return Err(ConfigurationError::IncompleteCoordinate {
                    index,
                    coordinate: item.coordinate.to_string(),
                    field,
                });
            }
            if item.output_directory.as_os_str().is_empty() {
                return Err(ConfigurationError::EmptyItemDirectory {
                    index,
                    coordinate: item.coordinate.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Process every configured item in order and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] before any stage runs when the
    /// configuration is unusable. Stage failures are recorded in the report.
    pub fn run(&self, config: &PipelineConfig) -> Result<RunReport, ConfigurationError> {
        Self::validate(config)?;

        let output_dir = config.output_directory();
        fs::create_dir_all(output_dir).map_err(|source| ConfigurationError::OutputDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;
        info!(
            "Generating source(s) into {}",
            path::relative_display(&config.project_root, output_dir)
        );

        let default_emitter;
        let emitter: &dyn Emitter = match &self.emitter {
            Some(emitter) => emitter.as_ref(),
            None => {
                default_emitter = RustEmitter::new(output_dir);
                &default_emitter
            }
        };

        let mut ctx = RunContext {
            config,
            emitter,
            suffixes: self.formats.iter().flat_map(|f| f.suffixes().iter().copied()).collect(),
            claimed: BTreeMap::new(),
            report: RunReport::default(),
        };
        ctx.report.output_directories.push(output_dir.to_path_buf());
        self.register(output_dir);

        for item in &config.artifact_items {
            let state = self.process_item(item, &mut ctx);
            ctx.report.items.push(ItemOutcome { coordinate: item.coordinate.clone(), state });
        }

        let report = ctx.report;
        info!(
            "Code generation done: {} generated, {} failed, {} item failure(s)",
            report.documents_generated,
            report.documents_failed,
            report.failures.iter().filter(|f| f.stage.is_item_level()).count()
        );
        Ok(report)
    }

    fn register(&self, dir: &Path) {
        if let Some(registrar) = &self.registrar {
            registrar.add_compile_source_root(dir);
        }
    }

    fn process_item(&self, item: &ArtifactItem, ctx: &mut RunContext<'_>) -> ItemState {
        let coordinate = &item.coordinate;
        let mut state = ItemState::Pending;
        info!("Processing artifact(s): {}", coordinate);

        let archive = match self.locator.locate(coordinate) {
            Ok(archive) => archive,
            Err(e) => {
                warn!("Unable to resolve {}: {}", coordinate, e);
                ctx.report.record(coordinate, Stage::Locate, None, e);
                return state.fail();
            }
        };
        state = state.advance();
        debug!(%coordinate, archive = %archive.display(), %state);

        let extraction = match self.extractor.extract(
            &archive,
            item.kind(),
            item.output_directory(),
            item.overwrite,
        ) {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!("Unable to unpack {}: {}", coordinate, e);
                ctx.report.record(coordinate, Stage::Extract, Some(archive), e);
                return state.fail();
            }
        };
        state = state.advance();
        debug!(%coordinate, files = extraction.len(), %state);
        ctx.report.output_directories.push(extraction.destination.clone());
        self.register(&extraction.destination);

        // files in the destination that this archive did not provide are stale
        let documents: Vec<PathBuf> =
            match discovery::discover(item.output_directory(), &ctx.suffixes) {
                Ok(found) => found
                    .filter(|document| {
                        let member = extraction.contains(document);
                        if !member {
                            debug!(file = %document.display(), "skipping file not in archive");
                        }
                        member
                    })
                    .collect(),
                Err(e) => {
                    ctx.report.record(coordinate, Stage::Discover, None, e);
                    return state.fail();
                }
            };
        state = state.advance();
        debug!(%coordinate, documents = documents.len(), %state);
        if documents.is_empty() {
            warn!("No schema documents found in {}", item.output_directory().display());
        }

        for document in documents {
            self.process_document(item, &document, ctx);
        }

        state.advance()
    }

    fn process_document(&self, item: &ArtifactItem, document: &Path, ctx: &mut RunContext<'_>) {
        let coordinate = &item.coordinate;
        let Some(format) = self.formats.iter().find(|f| f.accepts(document)) else {
            let error = SchemaParseError::new(document, ParseErrorKind::NoFormat);
            warn!("{}", error);
            ctx.report.record(coordinate, Stage::Parse, Some(document.to_path_buf()), error);
            return;
        };

        let parsed = match schema::parse_file(format.as_ref(), document) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{}", e);
                ctx.report.record(coordinate, Stage::Parse, Some(document.to_path_buf()), e);
                return;
            }
        };

        let source = match ctx.emitter.emit(&parsed) {
            Ok(source) => source,
            Err(e) => {
                warn!("{}", e);
                ctx.report.record(coordinate, Stage::Emit, Some(document.to_path_buf()), e);
                return;
            }
        };

        if let Some(first) = ctx.claimed.get(source.path()) {
            let collision = EmitError::Collision {
                path: source.path().to_path_buf(),
                first: first.clone(),
                second: document.to_path_buf(),
            };
            warn!("{}", collision);
            ctx.report.record(coordinate, Stage::Emit, Some(document.to_path_buf()), collision);
            return;
        }

        info!(
            "Writing file: {}",
            path::relative_display(&ctx.config.project_root, source.path())
        );
        if let Err(e) = self.sink.write(source.path(), source.as_bytes()) {
            let error = EmitError::Write { path: source.path().to_path_buf(), source: e };
            ctx.report.record(coordinate, Stage::Emit, Some(document.to_path_buf()), error);
            return;
        }

        ctx.claimed.insert(source.path().to_path_buf(), document.to_path_buf());
        ctx.report.generated.push(source.path.clone());
        ctx.report.documents_generated += 1;
    }
}
