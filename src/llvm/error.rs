// SPDX-License-Identifier: BSD-3-Clause
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("error loading file '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },
}
