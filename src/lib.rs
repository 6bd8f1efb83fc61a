// SPDX-License-Identifier: BSD-3-Clause
pub mod census;
pub mod llvm;
pub mod report;

pub use census::{Census, ModuleCensus, Record};
pub use llvm::{Function, FunctionName, Module};
