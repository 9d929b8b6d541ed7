//! Per-axis bounds.

use crate::arrays::Row;
use crate::memory::MemoryAccessor;
use crate::util::{Error, Result};

/// Per-axis minimum and maximum of an accessor's decoded values.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: Row,
    pub max: Row,
}

/// Decoded per-axis bounds of every item, `None` when the accessor is empty.
///
/// These are the values a document writes into an accessor's `min`/`max`.
pub fn compute_bounds<B: AsRef<[u8]>>(accessor: &MemoryAccessor<B>) -> Result<Option<Bounds>> {
    let numeric = accessor.numeric()?;
    if numeric.is_empty() {
        return Ok(None);
    }

    let n = numeric.component_count();
    let mut row: Row = Row::from_elem(0.0, n);
    numeric.read_into(0, &mut row);
    let mut bounds = Bounds { min: row.clone(), max: row.clone() };

    for item in 1..numeric.len() {
        numeric.read_into(item, &mut row);
        for (axis, &v) in row.iter().enumerate() {
            bounds.min[axis] = bounds.min[axis].min(v);
            bounds.max[axis] = bounds.max[axis].max(v);
        }
    }
    Ok(Some(bounds))
}

/// Check that every decoded component lies within `[min[axis], max[axis]]`.
///
/// Empty `min` and `max` accept anything. Otherwise both must have one
/// entry per component. NaN components are out of bounds.
pub fn verify_bounds<B: AsRef<[u8]>>(accessor: &MemoryAccessor<B>, min: &[f32], max: &[f32]) -> Result<()> {
    if min.is_empty() && max.is_empty() {
        return Ok(());
    }

    let numeric = accessor.numeric()?;
    let n = numeric.component_count();
    if min.len() != n || max.len() != n {
        return Err(Error::invalid_layout(format!(
            "bounds have {} / {} entries, items have {n} components",
            min.len(),
            max.len()
        )));
    }

    let mut row: Row = Row::from_elem(0.0, n);
    for index in 0..numeric.len() {
        numeric.read_into(index, &mut row);
        for (axis, &value) in row.iter().enumerate() {
            if !(value >= min[axis] && value <= max[axis]) {
                return Err(Error::OutOfBounds { index, axis, value, min: min[axis], max: max[axis] });
            }
        }
    }
    Ok(())
}
