pub use crate::vertex::{UVVertex, Vertex, VertexAttribute};
pub use crate::vfile::{VFile, VFileSystem};
