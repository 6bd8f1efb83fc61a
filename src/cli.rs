// SPDX-License-Identifier: BSD-3-Clause
use std::path::PathBuf;

use ircensus::report::{self, Format};

/// Basic-block census for LLVM IR modules
#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print one `["module","function",blocks]` row per function to stdout
    /// instead of writing a JSON report
    #[arg(long)]
    pub bb_analyze: bool,

    /// Write a folded-stack profile to this file
    #[arg(long)]
    pub flame: Option<PathBuf>,

    /// LLVM IR modules (.ll or .bc)
    #[arg(required = true)]
    pub modules: Vec<PathBuf>,

    /// JSON report
    #[arg(short, long, default_value = report::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Tracing
    #[arg(long)]
    pub tracing: bool,
}

impl Args {
    pub fn report_options(&self) -> report::Options {
        report::Options {
            format: if self.bb_analyze {
                Format::Rows
            } else {
                Format::Json
            },
            output: self.output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn verify() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["ircensus", "a.ll", "b.bc"]).unwrap();
        assert_eq!(args.modules, vec![PathBuf::from("a.ll"), PathBuf::from("b.bc")]);
        assert_eq!(args.report_options(), report::Options::default());
    }

    #[test]
    fn bb_analyze_selects_rows() {
        let args =
            Args::try_parse_from(["ircensus", "--bb-analyze", "-o", "x.json", "a.ll"]).unwrap();
        let opts = args.report_options();
        assert_eq!(opts.format, Format::Rows);
        assert_eq!(opts.output, PathBuf::from("x.json"));
    }

    #[test]
    fn needs_a_module() {
        assert!(Args::try_parse_from(["ircensus"]).is_err());
    }
}
