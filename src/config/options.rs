//! Loader options and mechanism selection

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration source mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// A dotenv-style `KEY=value` file
    Dotenv,
    /// A flat JSON object file
    Json,
    /// `CONFIG_*` process environment variables
    Env,
}

impl Mechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mechanism::Dotenv => "dotenv",
            Mechanism::Json => "json",
            Mechanism::Env => "env",
        }
    }
}

impl FromStr for Mechanism {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dotenv" => Ok(Mechanism::Dotenv),
            "json" => Ok(Mechanism::Json),
            "env" => Ok(Mechanism::Env),
            _ => Err(format!(
                "Unknown configuration mechanism '{}'. Valid values are: dotenv, json, env",
                s
            )),
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options shared by every source loader
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    /// Directory holding the source file; defaults to `<document_root>/app`
    pub directory: Option<PathBuf>,
    /// Source file name; defaults per mechanism
    pub filename: Option<String>,
    /// Keys that must be present after loading
    pub required: Vec<String>,
    /// Lower-case every key
    pub lowercase_keys: bool,
    /// Coerce string values into typed literals
    pub literal_types: bool,
    /// Expand dotted keys into nested sections (dotenv only)
    pub multidimensional: bool,
    /// Base path for derived directories
    pub document_root: PathBuf,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            directory: None,
            filename: None,
            required: Vec::new(),
            lowercase_keys: true,
            literal_types: true,
            multidimensional: false,
            document_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl LoaderOptions {
    pub fn with_document_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.document_root = root.into();
        self
    }

    pub fn with_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    pub fn with_literal_types(mut self, enabled: bool) -> Self {
        self.literal_types = enabled;
        self
    }

    pub fn with_multidimensional(mut self, enabled: bool) -> Self {
        self.multidimensional = enabled;
        self
    }

    /// `<document_root>/app`
    pub fn app_directory(&self) -> PathBuf {
        self.document_root.join("app")
    }

    /// Resolve the source path, filling in defaults
    pub fn source_path(&self, default_filename: &str) -> PathBuf {
        let directory = self
            .directory
            .clone()
            .unwrap_or_else(|| self.app_directory());
        let filename = self.filename.as_deref().unwrap_or(default_filename);
        directory.join(filename)
    }
}
