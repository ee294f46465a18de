use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand};

use triad::prelude::*;

/// The statement translated when no input is given.
pub const DEMO_STATEMENT: &str = "c:=(z+a-1)/2+('A'*'T');";

#[derive(Debug, Parser)]
#[command(about = "Translates assignment statements into triads and expression trees")]
pub struct Options {
    #[command(subcommand)]
    pub operation: Operation,
    #[arg(short, long, default_value_t = 1)]
    pub verbose: usize,
    /// Silence all log output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Check statements for syntax errors
    Check {
        #[command(flatten)]
        input: InputOptions,
    },
    /// Print the triads generated for each statement
    Triads {
        #[command(flatten)]
        input: InputOptions,
    },
    /// Print the expression tree rebuilt from the triads
    Tree {
        #[command(flatten)]
        input: InputOptions,
    },
    /// Print the triads followed by the expression tree
    Run {
        #[command(flatten)]
        input: InputOptions,
    },
}

impl Operation {
    pub fn input(&self) -> &InputOptions {
        match self {
            Self::Check { input }
            | Self::Triads { input }
            | Self::Tree { input }
            | Self::Run { input } => input,
        }
    }

    pub fn prints_triads(&self) -> bool {
        matches!(self, Self::Triads { .. } | Self::Run { .. })
    }

    pub fn prints_tree(&self) -> bool {
        matches!(self, Self::Tree { .. } | Self::Run { .. })
    }
}

#[derive(Debug, Args)]
pub struct InputOptions {
    /// Statements to translate, e.g. `a:=b+1;`
    statements: Vec<String>,
    /// Read statements from a file, one per line
    #[arg(short, long, conflicts_with = "statements")]
    file: Option<PathBuf>,
}

impl InputOptions {
    /// Collects the statements to translate with all whitespace removed.
    /// Falls back to [`DEMO_STATEMENT`] when none were given.
    pub fn load(&self) -> Result<Vec<String>> {
        let raw: Vec<String> = match &self.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Unable to read {}", path.display()))?
                .lines()
                .map(str::to_string)
                .collect(),
            None => self.statements.clone(),
        };

        let statements: Vec<_> = raw
            .iter()
            .map(|s| strip_whitespace(s))
            .filter(|s| !s.is_empty())
            .collect();

        if statements.is_empty() {
            debug!("No input given, using {}", DEMO_STATEMENT);
            return Ok(vec![DEMO_STATEMENT.to_string()]);
        }
        Ok(statements)
    }
}

fn strip_whitespace(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> Options {
        Options::try_parse_from(args).unwrap()
    }

    #[test]
    fn statements_are_stripped_of_whitespace() {
        let opts = options(&["triad", "triads", "a := b + 1 ;", "  ", "c:=\t2;"]);

        assert_eq!(
            vec!["a:=b+1;".to_string(), "c:=2;".to_string()],
            opts.operation.input().load().unwrap()
        );
    }

    #[test]
    fn missing_input_falls_back_to_demo() {
        let opts = options(&["triad", "run"]);

        assert_eq!(vec![DEMO_STATEMENT.to_string()], opts.operation.input().load().unwrap());
        assert!(opts.operation.prints_triads());
        assert!(opts.operation.prints_tree());
    }

    #[test]
    fn verbosity_defaults_to_one() {
        let opts = options(&["triad", "check", "a:=1;"]);

        assert_eq!(1, opts.verbose);
        assert!(!opts.quiet);
        assert!(!opts.operation.prints_triads());
        assert!(!opts.operation.prints_tree());
    }

    #[test]
    fn file_and_statements_conflict() {
        let result = Options::try_parse_from(["triad", "tree", "-f", "in.txt", "a:=1;"]);

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let opts = options(&["triad", "tree", "--file", "/nonexistent/statements.txt"]);

        let err = opts.operation.input().load().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/statements.txt"));
    }
}
