// SPDX-License-Identifier: BSD-3-Clause
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use tracing::{error, level_filters::LevelFilter};
use tracing_flame::{FlameLayer, FlushGuard};
use tracing_subscriber::{fmt, prelude::*};

use ircensus::report::{self, Format};
use ircensus::{llvm, Census};

mod cli;

fn setup_global_subscriber(
    tracing: bool,
    flame: Option<&Path>,
) -> Result<Option<FlushGuard<BufWriter<File>>>> {
    let filter_layer = if tracing {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    // stdout is reserved for reports
    let fmt_layer = fmt::Layer::default().with_writer(io::stderr);
    let (flame_layer, guard) = match flame {
        Some(path) => {
            let (layer, guard) = FlameLayer::with_file(path)
                .with_context(|| format!("Couldn't create flame output {}", path.display()))?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(flame_layer)
        .init();
    Ok(guard)
}

fn census(modules: &[PathBuf]) -> Census {
    let mut census = Census::new();
    for path in modules {
        match llvm::Module::load(path) {
            Ok(module) => census.add(&module),
            Err(e) => error!("{}: {e}", path.display()),
        }
    }
    census
}

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let _guard = setup_global_subscriber(args.tracing, args.flame.as_deref())?;
    let opts = args.report_options();

    // In row mode stdout carries nothing but rows.
    let mut info: Box<dyn Write> = match opts.format {
        Format::Json => Box::new(io::stdout()),
        Format::Rows => Box::new(io::stderr()),
    };
    writeln!(info, "Total {} file(s)", args.modules.len())?;

    let census = census(&args.modules);

    match report::write(&census, &opts) {
        Ok(()) => {
            if opts.format == Format::Json {
                writeln!(info, "Output file: {}", opts.output.display())?;
            }
        }
        Err(e @ report::Error::Write(_)) if opts.format == Format::Rows => {
            return Err(e).context("Couldn't write rows to stdout");
        }
        Err(e) => error!("{e}"),
    }
    Ok(())
}
