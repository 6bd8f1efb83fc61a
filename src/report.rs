// SPDX-License-Identifier: BSD-3-Clause
//! Serializing a [`Census`]
//!
//! Two formats:
//!
//! - [`Format::Json`]: one object per module, keyed by the module's path,
//!   mapping each function to `{"BasicBlocks": n}`. Written to a file.
//! - [`Format::Rows`]: one `["path","function",n]` row per record, written to
//!   standard output.
//!
//! Both are streamed: separators are written before every element but the
//! first, so nothing ever has to be taken back out of the output.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::census::Census;

pub const DEFAULT_OUTPUT: &str = "bb_info.json";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Json,
    Rows,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Rows => write!(f, "rows"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub format: Format,
    /// Only used by [`Format::Json`]
    pub output: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: Format::Json,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open {} for writing: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("Failed to write report: {0}")]
    Write(#[from] io::Error),
}

#[derive(serde::Serialize)]
struct Row<'a>(&'a str, &'a str, usize);

pub fn write_json<W: Write>(census: &Census, out: &mut W) -> io::Result<()> {
    out.write_all(b"{\n")?;
    let mut first_module = true;
    for module in census.modules() {
        if !first_module {
            out.write_all(b",\n")?;
        }
        first_module = false;

        serde_json::to_writer(&mut *out, &module.path)?;
        out.write_all(b": {\n")?;
        let mut first_function = true;
        for r in &module.records {
            if !first_function {
                out.write_all(b",\n")?;
            }
            first_function = false;
            serde_json::to_writer(&mut *out, &r.function)?;
            write!(out, ": {{\"BasicBlocks\": {}}}", r.basic_blocks)?;
        }
        if !first_function {
            out.write_all(b"\n")?;
        }
        out.write_all(b"}")?;
    }
    if !first_module {
        out.write_all(b"\n")?;
    }
    out.write_all(b"}\n")
}

pub fn write_rows<W: Write>(census: &Census, out: &mut W) -> io::Result<()> {
    for r in census.records() {
        serde_json::to_writer(&mut *out, &Row(&r.module, &r.function, r.basic_blocks))?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the census wherever `opts` says to.
pub fn write(census: &Census, opts: &Options) -> Result<(), Error> {
    debug!("Writing {} module(s) as {}", census.modules().len(), opts.format);
    match opts.format {
        Format::Json => {
            let file = File::create(&opts.output).map_err(|source| Error::Create {
                path: opts.output.clone(),
                source,
            })?;
            let mut out = BufWriter::new(file);
            write_json(census, &mut out)?;
            out.flush()?;
        }
        Format::Rows => {
            let mut out = io::stdout().lock();
            write_rows(census, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
