//! Ordered collection of output files.

use std::collections::HashSet;

use crate::{Error, File, Result};

/// Output files in emission order. A path can only be written once.
#[derive(Debug, Default)]
pub struct FileSet {
    files: Vec<File>,
    paths: HashSet<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Result<()> {
        self.push_file(File::new(path, contents))
    }

    pub fn push_file(&mut self, file: File) -> Result<()> {
        if !self.paths.insert(file.path().to_string()) {
            return Err(Error::internal(format!(
                "`{}` was generated twice",
                file.path()
            )));
        }
        self.files.push(file);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> Vec<File> {
        self.files
    }
}
