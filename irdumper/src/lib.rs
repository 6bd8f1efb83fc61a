// SPDX-License-Identifier: BSD-3-Clause
//! LLVM pass plugin that writes a bitcode snapshot of every module it sees
//! to `bcfile/<dir>/<stem>.bc`, mirroring the module's source layout.
//!
//! Load it with `opt -load-pass-plugin=libirdumper.so` (or clang's
//! `-fpass-plugin=`); the pass runs at the start of the module pipeline and
//! is also available as `-passes=ir-dumper`.

pub mod snapshot;

// The plugin half only resolves its LLVM symbols once loaded into a host.
#[cfg(not(test))]
mod plugin;
