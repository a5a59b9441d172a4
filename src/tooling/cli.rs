//! CLI Tooling
//!
//! Command-line front end for the tree table. One-shot commands operate on a
//! file-backed navigation history, so successive invocations behave like
//! successive clicks in the same address bar. `shell` runs an interactive
//! session against in-memory history.

use crate::config::paths::default_state_file;
use crate::config::{ConfigLoader, TableConfig};
use crate::error::ApiError;
use crate::params::{FileNavigation, MemoryNavigation, Navigation};
use crate::render::{render_table, StandardRowRenderer};
use crate::session::TableSession;
use crate::store::FileRecordSource;
use crate::tree::index::ActiveFilter;
use crate::tree::sort::SortDirection;
use crate::types::RecordId;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Treetable CLI - filterable, sortable, paginated tree tables
#[derive(Parser, Debug)]
#[command(name = "treetable")]
#[command(about = "Filterable, sortable, paginated tree tables with query-string state")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Record data file (json, yaml)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Navigation history file shared between invocations
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Root records per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path when output includes file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Render a query string once, without touching navigation history
    Render {
        /// Query string, e.g. "page=2&sort=balance&dir=desc"
        #[arg(long, default_value = "")]
        query: String,
        /// Expand a row (repeatable)
        #[arg(long = "expand")]
        expand: Vec<RecordId>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the current view of the navigation history
    Show {
        /// Expand a row (repeatable)
        #[arg(long = "expand")]
        expand: Vec<RecordId>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Sort by a field; repeating the same field flips direction
    Sort {
        /// Field name (id, name, email, balance, isActive); omit to clear sorting
        key: Option<String>,
        /// Force ascending order
        #[arg(long, conflicts_with = "desc")]
        asc: bool,
        /// Force descending order
        #[arg(long)]
        desc: bool,
    },
    /// Filter by active status (all, true, false)
    Filter { value: ActiveFilter },
    /// Go to a page
    Page { page: usize },
    /// Navigate back in history
    Back,
    /// Navigate forward in history
    Forward,
    /// Print the current query string
    Url,
    /// Interactive session reading commands from stdin
    Shell {
        /// Initial query string
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Loaded configuration plus CLI overrides
pub struct CliContext {
    config: TableConfig,
    color: bool,
}

impl CliContext {
    /// Load configuration and fold CLI flags over it.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => {
                let cwd = std::env::current_dir()?;
                ConfigLoader::load(&cwd)?
            }
        };

        if let Some(data) = &cli.data {
            config.data = Some(data.clone());
        }
        if let Some(state_file) = &cli.state_file {
            config.navigation.state_file = Some(state_file.clone());
        }
        if let Some(page_size) = cli.page_size {
            config.page_size = page_size;
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if cli.log_file.is_some() {
            config.logging.file = cli.log_file.clone();
        }
        if cli.no_color {
            config.logging.color = false;
        }
        config.validate()?;

        Ok(Self {
            color: !cli.no_color,
            config,
        })
    }

    /// Build a context from an already-resolved configuration.
    pub fn from_config(config: TableConfig, color: bool) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self { config, color })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn renderer(&self) -> StandardRowRenderer {
        StandardRowRenderer {
            color: self.color,
            ..StandardRowRenderer::default()
        }
    }

    fn records(&self) -> Result<FileRecordSource, ApiError> {
        let path = self.config.data.as_ref().ok_or_else(|| {
            ApiError::ConfigError(
                "No data file configured (use --data or set `data` in treetable.toml)"
                    .to_string(),
            )
        })?;
        FileRecordSource::open(path)
    }

    fn state_file(&self) -> Result<PathBuf, ApiError> {
        match &self.config.navigation.state_file {
            Some(path) => Ok(path.clone()),
            None => default_state_file(),
        }
    }

    fn file_session(&self) -> Result<TableSession<FileRecordSource, FileNavigation>, ApiError> {
        let navigation = FileNavigation::open(self.state_file()?, "")?;
        Ok(TableSession::new(
            self.records()?,
            navigation,
            self.config.page_size,
        ))
    }

    /// Execute a one-shot command and return its output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Render {
                query,
                expand,
                format,
            } => {
                let mut session = TableSession::new(
                    self.records()?,
                    MemoryNavigation::new(query.as_str()),
                    self.config.page_size,
                );
                self.present(&mut session, expand, format)
            }
            Commands::Show { expand, format } => {
                let mut session = self.file_session()?;
                self.present(&mut session, expand, format)
            }
            Commands::Sort { key, asc, desc } => {
                let mut session = self.file_session()?;
                match (key.as_deref(), *asc, *desc) {
                    (None, _, _) => session.request_sort(None, SortDirection::Asc)?,
                    (Some(key), true, _) => session.request_sort(Some(key), SortDirection::Asc)?,
                    (Some(key), _, true) => session.request_sort(Some(key), SortDirection::Desc)?,
                    (Some(key), false, false) => session.cycle_sort(key)?,
                }
                self.present(&mut session, &[], "text")
            }
            Commands::Filter { value } => {
                let mut session = self.file_session()?;
                session.request_filter(*value)?;
                self.present(&mut session, &[], "text")
            }
            Commands::Page { page } => {
                let mut session = self.file_session()?;
                session.request_page(*page)?;
                self.present(&mut session, &[], "text")
            }
            Commands::Back => {
                let mut session = self.file_session()?;
                if !session.back()? {
                    return Ok("Already at the oldest entry".to_string());
                }
                self.present(&mut session, &[], "text")
            }
            Commands::Forward => {
                let mut session = self.file_session()?;
                if !session.forward()? {
                    return Ok("Already at the newest entry".to_string());
                }
                self.present(&mut session, &[], "text")
            }
            Commands::Url => {
                let navigation = FileNavigation::open(self.state_file()?, "")?;
                Ok(format_location(&navigation.location()))
            }
            Commands::Shell { .. } => Err(ApiError::InvalidCommand(
                "shell must be run with run_shell".to_string(),
            )),
            Commands::Config => self.config.to_toml(),
        }
    }

    fn present<N: Navigation>(
        &self,
        session: &mut TableSession<FileRecordSource, N>,
        expand: &[RecordId],
        format: &str,
    ) -> Result<String, ApiError> {
        for id in expand {
            if !session.expansion().is_expanded(*id) {
                session.toggle_row(*id);
            }
        }
        let view = session.view()?;
        match format {
            "json" => {
                let output = json!({
                    "query": session.location(),
                    "view": view,
                    "expanded": session.expansion().expanded_ids(),
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            "text" => {
                let table = render_table(&view, session.expansion(), &self.renderer());
                Ok(format!("{}{}", table, format_location(&session.location())))
            }
            other => Err(ApiError::InvalidCommand(format!(
                "Unknown output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    /// Run the interactive shell until `quit` or end of input.
    pub fn run_shell<R: BufRead, W: Write>(
        &self,
        query: &str,
        input: R,
        mut output: W,
    ) -> Result<(), ApiError> {
        let mut session = TableSession::new(
            self.records()?,
            MemoryNavigation::new(query),
            self.config.page_size,
        );
        info!(query, "Starting shell session");
        writeln!(output, "{}", self.present(&mut session, &[], "text")?)?;

        for line in input.lines() {
            let line = line?;
            let command = match ShellCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "Error: {}", e)?;
                    continue;
                }
            };
            if command == ShellCommand::Quit {
                break;
            }
            match self.apply_shell_command(&mut session, &command) {
                Ok(text) => writeln!(output, "{}", text)?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    fn apply_shell_command(
        &self,
        session: &mut TableSession<FileRecordSource, MemoryNavigation>,
        command: &ShellCommand,
    ) -> Result<String, ApiError> {
        match command {
            ShellCommand::Sort { key, dir } => match dir {
                Some(dir) => session.request_sort(Some(key.as_str()), *dir)?,
                None => session.cycle_sort(key)?,
            },
            ShellCommand::Unsort => session.request_sort(None, SortDirection::Asc)?,
            ShellCommand::Filter(filter) => session.request_filter(*filter)?,
            ShellCommand::Page(page) => session.request_page(*page)?,
            ShellCommand::Next => {
                let page = session.view()?.pagination.current_page + 1;
                session.request_page(page)?;
            }
            ShellCommand::Prev => {
                let page = session.view()?.pagination.current_page.saturating_sub(1);
                session.request_page(page)?;
            }
            ShellCommand::Toggle(id) => {
                session.toggle_row(*id);
            }
            ShellCommand::Back => {
                if !session.back()? {
                    return Ok("Already at the oldest entry".to_string());
                }
            }
            ShellCommand::Forward => {
                if !session.forward()? {
                    return Ok("Already at the newest entry".to_string());
                }
            }
            ShellCommand::Url => return Ok(format_location(&session.location())),
            ShellCommand::Show => {}
            ShellCommand::Help => return Ok(SHELL_HELP.to_string()),
            ShellCommand::Quit => return Ok(String::new()),
        }
        self.present(session, &[], "text")
    }
}

fn format_location(query: &str) -> String {
    if query.is_empty() {
        "URL: ?".to_string()
    } else {
        format!("URL: ?{}", query)
    }
}

const SHELL_HELP: &str = "\
Commands:
  sort KEY [asc|desc]   sort by field (repeat to flip direction)
  unsort                clear sorting
  filter all|true|false filter by active status
  page N | next | prev  change page
  toggle ID             expand or collapse a row
  back | forward        move through history
  url                   print the current query string
  show                  redraw the table
  help                  this text
  quit                  leave the shell";

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Sort {
        key: String,
        dir: Option<SortDirection>,
    },
    Unsort,
    Filter(ActiveFilter),
    Page(usize),
    Next,
    Prev,
    Toggle(RecordId),
    Back,
    Forward,
    Url,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse a line; blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ApiError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        if verb.starts_with('#') {
            return Ok(None);
        }
        let arg = words.next();
        let extra = words.next();

        let command = match (verb, arg, extra) {
            ("sort", Some(key), None) => ShellCommand::Sort {
                key: key.to_string(),
                dir: None,
            },
            ("sort", Some(key), Some(dir)) => ShellCommand::Sort {
                key: key.to_string(),
                dir: Some(dir.parse()?),
            },
            ("unsort", None, None) => ShellCommand::Unsort,
            ("filter", Some(value), None) => ShellCommand::Filter(value.parse()?),
            ("page", Some(page), None) => ShellCommand::Page(parse_number(page)?),
            ("next", None, None) => ShellCommand::Next,
            ("prev", None, None) => ShellCommand::Prev,
            ("toggle", Some(id), None) => ShellCommand::Toggle(parse_number(id)?),
            ("back", None, None) => ShellCommand::Back,
            ("forward", None, None) => ShellCommand::Forward,
            ("url", None, None) => ShellCommand::Url,
            ("show", None, None) => ShellCommand::Show,
            ("help", None, None) => ShellCommand::Help,
            ("quit", None, None) | ("exit", None, None) => ShellCommand::Quit,
            _ => {
                return Err(ApiError::InvalidCommand(format!(
                    "{} (type 'help' for commands)",
                    line.trim()
                )))
            }
        };
        Ok(Some(command))
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::InvalidCommand(format!("Expected a number, got {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_commands() {
        assert_eq!(
            ShellCommand::parse("sort balance desc").unwrap(),
            Some(ShellCommand::Sort {
                key: "balance".into(),
                dir: Some(SortDirection::Desc)
            })
        );
        assert_eq!(
            ShellCommand::parse("  filter true ").unwrap(),
            Some(ShellCommand::Filter(ActiveFilter::Active))
        );
        assert_eq!(
            ShellCommand::parse("toggle 12").unwrap(),
            Some(ShellCommand::Toggle(12))
        );
        assert_eq!(ShellCommand::parse("").unwrap(), None);
        assert_eq!(ShellCommand::parse("# note").unwrap(), None);
        assert_eq!(ShellCommand::parse("exit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_shell_errors() {
        assert!(ShellCommand::parse("page two").is_err());
        assert!(ShellCommand::parse("filter maybe").is_err());
        assert!(ShellCommand::parse("sort name sideways").is_err());
        assert!(ShellCommand::parse("dance").is_err());
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "treetable",
            "render",
            "--data",
            "records.json",
            "--query",
            "page=2",
            "--expand",
            "1",
            "--expand",
            "4",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("records.json")));
        assert_eq!(
            cli.command,
            Commands::Render {
                query: "page=2".into(),
                expand: vec![1, 4],
                format: "text".into(),
            }
        );
    }

    #[test]
    fn test_cli_parses_filter_value() {
        let cli = Cli::parse_from(["treetable", "filter", "false"]);
        assert_eq!(
            cli.command,
            Commands::Filter {
                value: ActiveFilter::Inactive
            }
        );
        assert!(Cli::try_parse_from(["treetable", "filter", "nope"]).is_err());
    }
}
