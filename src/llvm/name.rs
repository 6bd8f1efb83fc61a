// SPDX-License-Identifier: BSD-3-Clause
use std::fmt::Display;

/// Names starting with this are compiler intrinsics, not user code.
pub const INTRINSIC_PREFIX: &str = "llvm.";

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FunctionName(String);

impl From<&str> for FunctionName {
    fn from(s: &str) -> Self {
        FunctionName(s.to_string())
    }
}

impl From<String> for FunctionName {
    fn from(s: String) -> Self {
        FunctionName(s)
    }
}

impl<T> PartialEq<T> for FunctionName
where
    T: AsRef<str>,
{
    fn eq(&self, other: &T) -> bool {
        self.0.as_str().eq(other.as_ref())
    }
}

impl FunctionName {
    pub(crate) fn definition(f: &llvm_ir::Function) -> Self {
        FunctionName(f.name.clone())
    }

    pub(crate) fn declaration(f: &llvm_ir::function::FunctionDeclaration) -> Self {
        FunctionName(f.name.clone())
    }

    pub(crate) fn starts_with(&self, s: &str) -> bool {
        self.0.starts_with(s)
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for FunctionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
