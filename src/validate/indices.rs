//! Vertex index checks.

use crate::arrays::AccessorArray;
use crate::memory::MemoryAccessor;
use crate::util::{Error, Result};

/// Check that every index addresses one of `vertex_count` vertices.
///
/// The restart value of the encoding (its maximum) is never a valid vertex
/// index and fails with [`Error::RestartValueUsed`] whatever the vertex
/// count.
pub fn verify_vertex_indices<B: AsRef<[u8]>>(indices: &MemoryAccessor<B>, vertex_count: u32) -> Result<()> {
    let view = indices.as_index_array()?;
    let encoding = view.encoding();
    let restart = encoding.restart_value();

    for (position, index) in view.iter().enumerate() {
        if Some(index) == restart {
            return Err(Error::RestartValueUsed { position, encoding });
        }
        if index >= vertex_count {
            return Err(Error::IndexOutOfRange { position, index, vertex_count });
        }
    }
    Ok(())
}
