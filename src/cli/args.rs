//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract gettext messages from the project's templates
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::keywords::KeywordDefinition;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Template root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-file catalogs as JSON
    #[default]
    Json,
    /// Message counts per file
    Summary,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Extra keyword: NAME, NAME:MSGID, NAME:MSGID,PLURAL or NAME:ROLE=POS,...
    /// Can be specified multiple times: -k _ -k n_:0,1
    #[arg(short = 'k', long = "keyword", value_name = "SPEC")]
    pub keywords: Vec<KeywordDefinition>,

    /// Write JSON output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable messages from Nunjucks templates
    Extract(ExtractCommand),
    /// Initialize a new .njkxrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::RawRoleSpec;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_extract_flags() {
        let args = Arguments::try_parse_from([
            "njk-xgettext",
            "extract",
            "--source-root",
            "views",
            "-k",
            "t",
            "--keyword",
            "nt:0,1",
            "--format",
            "summary",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose());
        let Some(Command::Extract(cmd)) = args.command else {
            panic!("expected extract");
        };
        assert_eq!(cmd.args.common.source_root, Some(PathBuf::from("views")));
        assert_eq!(cmd.args.format, OutputFormat::Summary);
        assert_eq!(cmd.args.keywords.len(), 2);
        assert_eq!(cmd.args.keywords[0].name, "t");
        assert_eq!(cmd.args.keywords[1].spec, RawRoleSpec::Positions(vec![0, 1]));
    }

    #[test]
    fn test_invalid_keyword_is_a_usage_error() {
        let result =
            Arguments::try_parse_from(["njk-xgettext", "extract", "--keyword", "t:0,1,2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_format_is_json() {
        let args = Arguments::try_parse_from(["njk-xgettext", "extract"]).unwrap();
        let Some(Command::Extract(cmd)) = args.command else {
            panic!("expected extract");
        };
        assert_eq!(cmd.args.format, OutputFormat::Json);
        assert!(!cmd.args.common.verbose);
        assert!(cmd.args.keywords.is_empty());
    }
}
