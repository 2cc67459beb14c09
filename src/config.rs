// Run configuration: JSON config file merged with command-line overrides
//
// Priority: CLI flag > config file > built-in default.

use crate::error::{ReachError, Result};
use crate::graph::{Label, LabelSet};
use crate::reach::{QueueOrder, ReachOptions, Strategy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Label section of a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelsFile {
    pub terminal: Option<Label>,
    pub link: Option<Label>,
    pub query: Option<Label>,
}

/// On-disk JSON configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub degrees: Option<PathBuf>,
    /// Signed so that zero and negative values get a proper config error
    pub bound: Option<i64>,
    #[serde(default)]
    pub labels: LabelsFile,
    pub order: Option<QueueOrder>,
    pub strategy: Option<Strategy>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ReachError::io(path, e))?;
        let config = serde_json::from_str(&text).map_err(|source| ReachError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub degrees: Option<PathBuf>,
    pub bound: Option<i64>,
    pub terminal: Option<Label>,
    pub link: Option<Label>,
    pub query: Option<Label>,
    pub order: Option<QueueOrder>,
    pub strategy: Option<Strategy>,
}

/// Fully resolved configuration of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub degrees: Option<PathBuf>,
    pub bound: usize,
    pub labels: LabelSet,
    pub order: QueueOrder,
    pub strategy: Strategy,
}

impl RunConfig {
    /// Merge file values and overrides, then validate
    ///
    /// `bound_required` is false for commands that can work on the index
    /// alone; a missing bound then resolves to 0.
    pub fn resolve(file: ConfigFile, cli: Overrides, bound_required: bool) -> Result<Self> {
        let input = cli
            .input
            .or(file.input)
            .ok_or_else(|| ReachError::Config("no input file given".to_string()))?;

        let bound = match cli.bound.or(file.bound) {
            Some(b) => validate_bound(b)?,
            None if bound_required => {
                return Err(ReachError::Config("no bound given".to_string()));
            }
            None => 0,
        };

        let defaults = LabelSet::default();
        let terminal = cli.terminal.or(file.labels.terminal).unwrap_or(defaults.terminal);
        let link = cli.link.or(file.labels.link).unwrap_or(defaults.link);
        // The default query label steps aside when terminal or link took it
        let query = match cli.query.or(file.labels.query) {
            Some(query) => Some(query),
            None => defaults.query.filter(|q| *q != terminal && *q != link),
        };
        let labels = LabelSet {
            query,
            ..LabelSet::new(terminal, link)
        };
        labels.validate()?;

        Ok(RunConfig {
            input,
            output: cli.output.or(file.output),
            degrees: cli.degrees.or(file.degrees),
            bound,
            labels,
            order: cli.order.or(file.order).unwrap_or_default(),
            strategy: cli.strategy.or(file.strategy).unwrap_or_default(),
        })
    }

    /// Load the optional config file and resolve against it
    pub fn from_sources(config_path: Option<&Path>, cli: Overrides, bound_required: bool) -> Result<Self> {
        let file = match config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, cli, bound_required)
    }

    pub fn options(&self) -> ReachOptions {
        ReachOptions {
            bound: self.bound,
            order: self.order,
            strategy: self.strategy,
        }
    }

    /// Output path, which emitting commands cannot do without
    pub fn require_output(&self) -> Result<&Path> {
        self.output
            .as_deref()
            .ok_or_else(|| ReachError::Config("no output file given".to_string()))
    }

    /// Query label, which the query command cannot do without
    pub fn require_query_label(&self) -> Result<&Label> {
        self.labels.query.as_ref().ok_or_else(|| {
            ReachError::Config(
                "query command needs a query label distinct from the terminal and link labels"
                    .to_string(),
            )
        })
    }

    /// Fail fast before any work: input must exist, outputs must not, and
    /// every output must land in an existing directory
    pub fn preflight(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(ReachError::InputNotFound(self.input.clone()));
        }
        for path in self.output.iter().chain(self.degrees.iter()) {
            if path.exists() {
                return Err(ReachError::OutputExists(path.clone()));
            }
            match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
                    return Err(ReachError::OutputDirNotFound(dir.to_path_buf()));
                }
                _ => {}
            }
        }
        if let (Some(output), Some(degrees)) = (&self.output, &self.degrees) {
            if output == degrees {
                return Err(ReachError::Config(format!(
                    "output and degree files are the same path: {}",
                    output.display()
                )));
            }
        }
        Ok(())
    }
}

fn validate_bound(bound: i64) -> Result<usize> {
    if bound <= 0 {
        return Err(ReachError::Config(format!(
            "bound must be a positive integer, got {}",
            bound
        )));
    }
    usize::try_from(bound)
        .map_err(|_| ReachError::Config(format!("bound {} does not fit this platform", bound)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(input: &str, bound: i64) -> Overrides {
        Overrides {
            input: Some(PathBuf::from(input)),
            bound: Some(bound),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::resolve(ConfigFile::default(), overrides("g.facts", 10), true).unwrap();
        assert_eq!(config.bound, 10);
        assert_eq!(config.labels, LabelSet::default());
        assert_eq!(config.order, QueueOrder::Fifo);
        assert_eq!(config.strategy, Strategy::Worklist);
        assert!(config.output.is_none());
        assert!(config.require_output().is_err());
    }

    #[test]
    fn test_file_values_and_cli_priority() {
        let file: ConfigFile = serde_json::from_str(
            r#"{
                "input": "from_file.facts",
                "output": "out.tsv",
                "bound": 80,
                "labels": { "terminal": "c", "link": "b" },
                "order": "lifo",
                "strategy": "naive"
            }"#,
        )
        .unwrap();
        let cli = Overrides {
            bound: Some(5),
            link: Some(Label::parse("d")),
            ..Overrides::default()
        };
        let config = RunConfig::resolve(file, cli, true).unwrap();
        assert_eq!(config.input, PathBuf::from("from_file.facts"));
        assert_eq!(config.bound, 5);
        assert_eq!(config.labels.terminal, Label::parse("c"));
        assert_eq!(config.labels.link, Label::parse("d"));
        assert_eq!(config.labels.query, Some(Label::Int(1)));
        assert_eq!(config.order, QueueOrder::Lifo);
        assert_eq!(config.strategy, Strategy::Naive);
        assert_eq!(config.require_output().unwrap(), Path::new("out.tsv"));
    }

    #[test]
    fn test_bound_must_be_positive() {
        for bad in [0, -4] {
            let err = RunConfig::resolve(ConfigFile::default(), overrides("g", bad), true).unwrap_err();
            assert!(matches!(err, ReachError::Config(_)));
        }
    }

    #[test]
    fn test_missing_bound() {
        let cli = Overrides {
            input: Some(PathBuf::from("g")),
            ..Overrides::default()
        };
        assert!(RunConfig::resolve(ConfigFile::default(), cli.clone(), true).is_err());
        assert_eq!(RunConfig::resolve(ConfigFile::default(), cli, false).unwrap().bound, 0);
    }

    #[test]
    fn test_missing_input() {
        let cli = Overrides {
            bound: Some(3),
            ..Overrides::default()
        };
        assert!(matches!(
            RunConfig::resolve(ConfigFile::default(), cli, true),
            Err(ReachError::Config(_))
        ));
    }

    #[test]
    fn test_clashing_labels_rejected() {
        let cli = Overrides {
            terminal: Some(Label::Int(2)),
            ..overrides("g", 3)
        };
        assert!(RunConfig::resolve(ConfigFile::default(), cli, true).is_err());
    }

    #[test]
    fn test_default_query_label_yields_to_explicit_labels() {
        let cli = Overrides {
            terminal: Some(Label::Int(1)),
            ..overrides("g", 3)
        };
        let config = RunConfig::resolve(ConfigFile::default(), cli, true).unwrap();
        assert_eq!(config.labels.query, None);

        let explicit = Overrides {
            terminal: Some(Label::Int(1)),
            query: Some(Label::Int(1)),
            ..overrides("g", 3)
        };
        assert!(RunConfig::resolve(ConfigFile::default(), explicit, true).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "bound": 3, "limit": 4 }"#).unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ReachError::ConfigFile { .. }));
    }

    #[test]
    fn test_preflight() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.facts");
        let output = dir.path().join("out.tsv");
        let mut config = RunConfig::resolve(
            ConfigFile::default(),
            Overrides {
                output: Some(output.clone()),
                ..overrides(input.to_str().unwrap(), 2)
            },
            true,
        )
        .unwrap();

        assert!(matches!(config.preflight(), Err(ReachError::InputNotFound(_))));
        std::fs::write(&input, "1 3 2\n").unwrap();
        assert!(config.preflight().is_ok());
        std::fs::write(&output, "").unwrap();
        assert!(matches!(config.preflight(), Err(ReachError::OutputExists(_))));

        config.output = Some(dir.path().join("fresh.tsv"));
        config.degrees = config.output.clone();
        assert!(matches!(config.preflight(), Err(ReachError::Config(_))));
    }

    #[test]
    fn test_preflight_rejects_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.facts");
        std::fs::write(&input, "1 3 2
").unwrap();
        let config = RunConfig::resolve(
            ConfigFile::default(),
            Overrides {
                output: Some(dir.path().join("out.tsv")),
                degrees: Some(dir.path().join("no/such/dir/deg.tsv")),
                ..overrides(input.to_str().unwrap(), 2)
            },
            true,
        )
        .unwrap();
        match config.preflight() {
            Err(ReachError::OutputDirNotFound(missing)) => {
                assert_eq!(missing, dir.path().join("no/such/dir"));
            }
            other => panic!("unexpected preflight result: {:?}", other),
        }
    }

    #[test]
    fn test_bare_output_name_uses_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.facts");
        std::fs::write(&input, "1 3 2
").unwrap();
        let config = RunConfig::resolve(
            ConfigFile::default(),
            Overrides {
                output: Some(PathBuf::from("bounded-reach-never-created.tsv")),
                ..overrides(input.to_str().unwrap(), 2)
            },
            true,
        )
        .unwrap();
        assert!(config.preflight().is_ok());
    }

    #[test]
    fn test_require_query_label() {
        let config = RunConfig::resolve(ConfigFile::default(), overrides("g", 3), true).unwrap();
        assert_eq!(config.require_query_label().unwrap(), &Label::Int(1));

        let taken = Overrides {
            terminal: Some(Label::Int(1)),
            ..overrides("g", 3)
        };
        let config = RunConfig::resolve(ConfigFile::default(), taken, true).unwrap();
        assert!(matches!(config.require_query_label(), Err(ReachError::Config(_))));
    }
}
