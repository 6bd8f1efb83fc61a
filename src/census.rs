// SPDX-License-Identifier: BSD-3-Clause
//! Basic-block census
//!
//! Walks the functions of each loaded module and records how many basic
//! blocks every eligible function has. A function is eligible when it is not
//! an intrinsic and has a body. Records keep discovery order: module order,
//! then function order within the module.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, trace_span, warn};

use crate::llvm::{Function, Module};

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Record {
    pub module: String,
    pub function: String,
    pub basic_blocks: usize,
}

/// Every module gets a group, even if none of its functions were eligible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleCensus {
    pub path: String,
    pub records: Vec<Record>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    modules: Vec<ModuleCensus>,
}

pub fn is_eligible(f: &Function) -> bool {
    !f.is_intrinsic() && !f.is_declaration()
}

/// Absolute, symlink-free form of a module's name. Names that don't exist on
/// disk are made absolute against the working directory, or kept as-is if
/// even that fails.
pub fn canonical_path(name: &str) -> String {
    let path = Path::new(name);
    let resolved = match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(e) => {
            warn!("Couldn't resolve module path {name}: {e}");
            best_effort(path)
        }
    };
    resolved.to_string_lossy().into_owned()
}

fn best_effort(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

impl Census {
    pub fn new() -> Self {
        Census::default()
    }

    pub fn add(&mut self, module: &Module) {
        let _span = trace_span!("census", module = module.name.as_str()).entered();
        let path = canonical_path(&module.name);
        self.add_with_path(module, path);
    }

    /// Like [`Census::add`], but with the module's path already resolved.
    pub fn add_with_path(&mut self, module: &Module, path: String) {
        let mut records = Vec::new();
        for f in &module.functions {
            if !is_eligible(f) {
                trace!("Skipping {}", f.name);
                continue;
            }
            records.push(Record {
                module: path.clone(),
                function: f.name.get().to_string(),
                basic_blocks: f.blocks,
            });
        }
        debug!(
            "{} eligible of {} functions in {path}",
            records.len(),
            module.functions.len()
        );
        self.modules.push(ModuleCensus { path, records });
    }

    pub fn modules(&self) -> &[ModuleCensus] {
        &self.modules
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.modules.iter().flat_map(|m| m.records.iter())
    }
}
