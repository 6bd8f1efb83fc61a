// SPDX-License-Identifier: BSD-3-Clause
//! Representation of an LLVM module that is amenable to a basic-block
//! census. The census only needs to know which functions a module contains
//! and how many blocks each one has, so we keep that and drop the rest of
//! the LLVM AST as soon as the module is loaded.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

mod error;
pub use error::*;
mod name;
pub use name::*;

const BITCODE_MAGIC: [u8; 4] = *b"BC\xC0\xDE";
const WRAPPER_MAGIC: [u8; 4] = [0xDE, 0xC0, 0x17, 0x0B];

/// Bitcode is recognized by its magic, raw or wrapped; anything else is
/// treated as textual IR.
fn is_bitcode(path: &Path) -> io::Result<bool> {
    let mut magic = [0u8; 4];
    match File::open(path)?.read_exact(&mut magic) {
        Ok(()) => Ok(magic == BITCODE_MAGIC || magic == WRAPPER_MAGIC),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Function {
    pub name: FunctionName,
    /// Zero for declarations
    pub blocks: usize,
}

impl Function {
    pub fn new(name: impl Into<FunctionName>, blocks: usize) -> Self {
        Function {
            name: name.into(),
            blocks,
        }
    }

    pub(crate) fn definition(f: &llvm_ir::Function) -> Self {
        Function {
            name: FunctionName::definition(f),
            blocks: f.basic_blocks.len(),
        }
    }

    pub(crate) fn declaration(d: &llvm_ir::function::FunctionDeclaration) -> Self {
        Function {
            name: FunctionName::declaration(d),
            blocks: 0,
        }
    }

    pub fn is_intrinsic(&self) -> bool {
        self.name.starts_with(INTRINSIC_PREFIX)
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    /// Where the module came from, usually the path it was loaded from
    pub name: String,
    /// Definitions in module order, then declarations in module order
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(m: &llvm_ir::Module) -> Self {
        let mut functions = Vec::with_capacity(m.functions.len() + m.func_declarations.len());
        functions.extend(m.functions.iter().map(Function::definition));
        functions.extend(m.func_declarations.iter().map(Function::declaration));
        Module {
            name: m.name.clone(),
            functions,
        }
    }

    /// Parse a module from disk, as bitcode or textual IR depending on the
    /// file's contents.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let load_error = |message: String| Error::Load {
            path: path.to_path_buf(),
            message,
        };
        let parsed = if is_bitcode(path).map_err(|e| load_error(e.to_string()))? {
            llvm_ir::Module::from_bc_path(path)
        } else {
            llvm_ir::Module::from_ir_path(path)
        };
        let llvm_module = parsed.map_err(load_error)?;
        let mut module = Module::new(&llvm_module);
        // LLVM names modules after their buffer, which isn't always the
        // path we were handed.
        module.name = path.to_string_lossy().into_owned();
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsic_prefix() {
        assert!(Function::new("llvm.dbg.value", 1).is_intrinsic());
        assert!(Function::new("llvm.memcpy.p0i8.p0i8.i64", 0).is_intrinsic());
        assert!(!Function::new("llvmish", 2).is_intrinsic());
        assert!(!Function::new("my.llvm.thing", 2).is_intrinsic());
    }

    #[test]
    fn declarations_have_no_blocks() {
        assert!(Function::new("bar", 0).is_declaration());
        assert!(!Function::new("foo", 3).is_declaration());
    }

    #[test]
    fn bitcode_magic() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, bytes: &[u8]| {
            let path = dir.path().join(name);
            std::fs::write(&path, bytes).unwrap();
            path
        };
        assert!(is_bitcode(&write("raw.ll", b"BC\xC0\xDE\x35\x14")).unwrap());
        assert!(is_bitcode(&write("wrapped", &[0xDE, 0xC0, 0x17, 0x0B, 0, 0])).unwrap());
        assert!(!is_bitcode(&write("text.bc", b"define void @f() {\n")).unwrap());
        assert!(!is_bitcode(&write("short.bc", b"BC")).unwrap());
        assert!(!is_bitcode(&write("empty.bc", b"")).unwrap());
        assert!(is_bitcode(&dir.path().join("missing.bc")).is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = Module::load(Path::new("does/not/exist.ll")).unwrap_err();
        let Error::Load { path, .. } = &err;
        assert_eq!(path, Path::new("does/not/exist.ll"));
        assert!(err.to_string().contains("error loading file"));
    }
}
