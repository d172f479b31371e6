use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use std::collections::HashMap;

/// A buffer that has already been fetched from wherever it lives.
#[derive(Default)]
pub struct VFile {
    pub data: Vec<u8>,
}

/// Read-only set of loaded buffers keyed by the path they were loaded from.
#[derive(Default, Clone)]
pub struct VFileSystem {
    pub files: Arc<HashMap<String, VFile>>,
}

impl VFileSystem {
    pub fn from_files(files: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        Self {
            files: Arc::new(
                files
                    .into_iter()
                    .map(|(name, data)| (name, VFile { data }))
                    .collect(),
            ),
        }
    }

    /// Reads every path fully into memory.
    pub fn read_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> io::Result<Self> {
        let mut files = HashMap::new();
        for path in paths {
            let path = path.as_ref();
            let data = fs::read(path)?;
            log::debug!("read {} bytes from {:?}", data.len(), path);
            files.insert(path.to_string_lossy().into_owned(), VFile { data });
        }
        Ok(Self {
            files: Arc::new(files),
        })
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.get_str(&path.to_string_lossy())
    }

    pub fn get_str(&self, path: &str) -> Option<&[u8]> {
        match self.files.get(path) {
            Some(file) => Some(&file.data[..]),
            None => {
                log::error!("{:?} file not found", path);
                None
            }
        }
    }

    /// File name component of a loaded path, which is how maps refer to their WADs.
    pub fn file_name(path: &str) -> String {
        PathBuf::from(path.replace('\\', "/"))
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_owned())
    }
}
