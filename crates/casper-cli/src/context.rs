//! Command context
//!
//! Resolves the project config and command-line overrides into the concrete
//! template, sources and store a command works on.

use std::fs;
use std::path::{Path, PathBuf};

use casper_core::{ChangeSet, Format, Reconciler, Store};
use casper_source::{Placeholders, SourceSpec, TemplateEngine};
use casper_store::FileStore;
use serde_yaml::Value;

use crate::cli::{BuildArgs, StorageArgs};
use crate::config::{Config, StorageConfig};
use crate::error::{CliError, Result};

pub const FILE_STORAGE: &str = "file";

#[derive(Debug)]
pub struct Context {
    template: PathBuf,
    format: Format,
    sources: Vec<SourceSpec>,
    storage: StorageConfig,
}

impl Context {
    /// Build a context from the config file, paths resolved against its
    /// directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let (config, base) = Config::discover(config_path)?;
        Self::from_config(config, &base)
    }

    pub fn from_config(config: Config, base: &Path) -> Result<Self> {
        let sources = config
            .sources
            .iter()
            .map(|s| Ok(SourceSpec::parse(s)?.relative_to(base)))
            .collect::<Result<Vec<_>>>()?;
        let mut storage = config.storage;
        storage.path = base.join(&storage.path);

        Ok(Self {
            template: base.join(&config.template),
            format: config.format,
            sources,
            storage,
        })
    }

    /// Apply template and source flags. Flag sources go after the
    /// configured ones.
    pub fn with_build_args(mut self, args: &BuildArgs) -> Result<Self> {
        if let Some(template) = &args.template {
            self.template = template.clone();
        }
        if let Some(format) = args.template_format {
            self.format = format;
        }
        for descriptor in &args.sources {
            self.sources.push(SourceSpec::parse(descriptor)?);
        }
        Ok(self)
    }

    pub fn with_storage_args(mut self, args: &StorageArgs) -> Self {
        if let Some(kind) = &args.storage {
            self.storage.kind = kind.clone();
        }
        if let Some(path) = &args.storage_path {
            self.storage.path = path.clone();
        }
        if let Some(ignore) = &args.ignore {
            self.storage.ignore = ignore.clone();
        }
        self
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.storage.ignore.as_str())
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Result<Box<dyn Store>> {
        match self.storage.kind.as_str() {
            FILE_STORAGE => Ok(Box::new(FileStore::new(&self.storage.path))),
            other => Err(CliError::user(format!("invalid storage type '{other}'"))),
        }
    }

    /// Render the template with every source merged in.
    pub fn render_template(&self) -> Result<String> {
        let template = fs::read_to_string(&self.template).map_err(|e| CliError::Config {
            path: self.template.clone(),
            message: e.to_string(),
        })?;
        let values = casper_source::resolve(&self.sources)?;
        tracing::debug!(
            template = %self.template.display(),
            values = values.len(),
            "Rendering template"
        );
        Ok(Placeholders.render(&template, &values)?)
    }

    /// The desired document: the rendered template, decoded.
    pub fn desired(&self) -> Result<Value> {
        let rendered = self.render_template()?;
        Ok(self.format.parse(&rendered)?)
    }

    /// Changes that bring `store` in line with the desired document.
    pub fn changes(&self, store: &dyn Store, key: Option<&str>) -> Result<ChangeSet> {
        let desired = self
            .desired()
            .map_err(|e| e.during("building template"))?;
        Ok(self.reconciler().changes(store, &desired, key)?)
    }
}
