//! Skin weight sums.
//!
//! Every vertex's weights must add up to one: 255 for normalized bytes,
//! 65535 for normalized shorts, and `1.0` within [`WEIGHT_SUM_TOLERANCE`]
//! per non-zero weight for floats. Vertices influenced by more than four
//! joints spread their weights over two 4-wide sets (`WEIGHTS_0` and
//! `WEIGHTS_1`), which are summed together.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::memory::{LayoutDescriptor, MemoryAccessor};
use crate::util::{ComponentEncoding, Error, Result};

/// Allowed deviation of a float weight sum from one, per non-zero weight.
pub const WEIGHT_SUM_TOLERANCE: f32 = 2e-7;

/// Weights per set.
const SET_WIDTH: usize = 4;

/// Fix the weight sum of every item of a single weight set.
///
/// Integer sets add the missing amount to the first weight; float sets are
/// divided by their sum. Returns whether any item changed. All items are
/// checked before anything is written, so an item that cannot be fixed
/// (NaN or out-of-range floats, an integer excess larger than the first
/// weight) fails with [`Error::InvalidWeightSum`] and leaves the buffer as it
/// was.
pub fn sanitize_weights_sum<B>(weights: &mut MemoryAccessor<B>) -> Result<bool>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let (layout, data) = weights.parts_mut();
    sanitize_sets(&[(layout, 0)], &mut [data])
}

/// Fix the combined weight sum of two weight sets held in separate buffers.
///
/// Same rules as [`sanitize_weights_sum`] over eight weights per item; the
/// first weight of `weights0` absorbs integer deficits.
pub fn sanitize_weights_sum_pair<B0, B1>(weights0: &mut MemoryAccessor<B0>, weights1: &mut MemoryAccessor<B1>) -> Result<bool>
where
    B0: AsRef<[u8]> + AsMut<[u8]>,
    B1: AsRef<[u8]> + AsMut<[u8]>,
{
    let (l0, d0) = weights0.parts_mut();
    let (l1, d1) = weights1.parts_mut();
    sanitize_sets(&[(l0, 0), (l1, 1)], &mut [d0, d1])
}

/// Fix the combined weight sum of two weight sets laid out in one buffer,
/// typically `WEIGHTS_0` and `WEIGHTS_1` interleaved with the other vertex
/// attributes.
pub fn sanitize_weights_sum_pair_in(data: &mut [u8], weights0: &LayoutDescriptor, weights1: &LayoutDescriptor) -> Result<bool> {
    sanitize_sets(&[(weights0, 0), (weights1, 0)], &mut [data])
}

/// Check that every item of a weight set sums to one.
pub fn verify_weights_sum<B: AsRef<[u8]>>(weights: &MemoryAccessor<B>) -> Result<()> {
    let data: &[u8] = weights.data().as_ref();
    verify_sets(&[(weights.layout(), 0)], &[data])
}

/// Check that every item of two weight sets sums to one.
pub fn verify_weights_sum_pair<B0, B1>(weights0: &MemoryAccessor<B0>, weights1: &MemoryAccessor<B1>) -> Result<()>
where
    B0: AsRef<[u8]>,
    B1: AsRef<[u8]>,
{
    let d0: &[u8] = weights0.data().as_ref();
    let d1: &[u8] = weights1.data().as_ref();
    verify_sets(&[(weights0.layout(), 0), (weights1.layout(), 1)], &[d0, d1])
}

/// Check two weight sets laid out in one buffer.
pub fn verify_weights_sum_pair_in(data: &[u8], weights0: &LayoutDescriptor, weights1: &LayoutDescriptor) -> Result<()> {
    verify_sets(&[(weights0, 0), (weights1, 0)], &[data])
}

/// A weight set: its layout and the index of the buffer holding it.
type WeightSet<'a> = (&'a LayoutDescriptor, usize);

fn sanitize_sets(sets: &[WeightSet<'_>], buffers: &mut [&mut [u8]]) -> Result<bool> {
    let (encoding, rows) = check_sets(sets, &*buffers)?;
    let width = sets.len() * SET_WIDTH;
    let mut row = [0.0f32; 2 * SET_WIDTH];

    for index in 0..rows {
        load_row(sets, &*buffers, encoding, index, &mut row[..width]);
        if sanitize_row(encoding, &mut row[..width]).is_none() {
            return Err(Error::InvalidWeightSum { index });
        }
    }

    let mut adjusted = 0usize;
    for index in 0..rows {
        load_row(sets, &*buffers, encoding, index, &mut row[..width]);
        if sanitize_row(encoding, &mut row[..width]) == Some(true) {
            store_row(sets, buffers, encoding, index, &row[..width]);
            adjusted += 1;
        }
    }

    debug!(rows, adjusted, %encoding, sets = sets.len(), "sanitized weight sums");
    Ok(adjusted > 0)
}

fn verify_sets(sets: &[WeightSet<'_>], buffers: &[&[u8]]) -> Result<()> {
    let (encoding, rows) = check_sets(sets, buffers)?;
    let width = sets.len() * SET_WIDTH;
    let mut row = [0.0f32; 2 * SET_WIDTH];

    for index in 0..rows {
        load_row(sets, buffers, encoding, index, &mut row[..width]);
        if !row_is_valid(encoding, &row[..width]) {
            return Err(Error::InvalidWeightSum { index });
        }
    }
    Ok(())
}

/// Common encoding and item count of the weight sets.
fn check_sets<D: AsRef<[u8]>>(sets: &[WeightSet<'_>], buffers: &[D]) -> Result<(ComponentEncoding, usize)> {
    let format = sets[0].0.format;
    let mut rows = None;

    for &(layout, slot) in sets {
        if layout.format.component_count() != SET_WIDTH {
            return Err(Error::invalid_layout(format!(
                "weights must have {SET_WIDTH} components, got {}",
                layout.format.dimensions
            )));
        }
        if layout.format.encoding != format.encoding {
            return Err(Error::invalid_layout("weight sets use different encodings"));
        }
        layout.validate_stride()?;

        let bytes: &[u8] = buffers[slot].as_ref();
        let count = layout.effective_item_count(bytes.len());
        match rows {
            Some(r) if r != count => {
                return Err(Error::invalid_layout(format!("weight sets have {r} and {count} items")));
            }
            _ => rows = Some(count),
        }
    }

    match format.encoding {
        ComponentEncoding::Uint8 | ComponentEncoding::Uint16 | ComponentEncoding::Float32 => {
            Ok((format.encoding, rows.unwrap_or(0)))
        }
        encoding => Err(Error::UnsupportedEncoding { encoding, normalized: format.normalized }),
    }
}

#[inline]
fn component_offset(layout: &LayoutDescriptor, index: usize, component: usize) -> usize {
    layout.byte_offset + index * layout.step_byte_length() + component * layout.format.encoding.num_bytes()
}

/// Raw stored values; integers stay unscaled, which `f32` holds exactly.
fn load_row<D: AsRef<[u8]>>(
    sets: &[WeightSet<'_>],
    buffers: &[D],
    encoding: ComponentEncoding,
    index: usize,
    row: &mut [f32],
) {
    for (s, &(layout, slot)) in sets.iter().enumerate() {
        let bytes: &[u8] = buffers[slot].as_ref();
        for c in 0..SET_WIDTH {
            let at = component_offset(layout, index, c);
            row[s * SET_WIDTH + c] = match encoding {
                ComponentEncoding::Uint8 => bytes[at] as f32,
                ComponentEncoding::Uint16 => LittleEndian::read_u16(&bytes[at..]) as f32,
                _ => LittleEndian::read_f32(&bytes[at..]),
            };
        }
    }
}

fn store_row(sets: &[WeightSet<'_>], buffers: &mut [&mut [u8]], encoding: ComponentEncoding, index: usize, row: &[f32]) {
    for (s, &(layout, slot)) in sets.iter().enumerate() {
        let bytes = &mut *buffers[slot];
        for c in 0..SET_WIDTH {
            let at = component_offset(layout, index, c);
            let v = row[s * SET_WIDTH + c];
            match encoding {
                ComponentEncoding::Uint8 => bytes[at] = v as u8,
                ComponentEncoding::Uint16 => LittleEndian::write_u16(&mut bytes[at..], v as u16),
                _ => LittleEndian::write_f32(&mut bytes[at..], v),
            }
        }
    }
}

/// `Some(changed)` on success, `None` if the row cannot be fixed.
fn sanitize_row(encoding: ComponentEncoding, row: &mut [f32]) -> Option<bool> {
    match encoding {
        ComponentEncoding::Uint8 => sanitize_unorm_row(row, 255.0),
        ComponentEncoding::Uint16 => sanitize_unorm_row(row, 65535.0),
        _ => sanitize_float_row(row),
    }
}

fn sanitize_unorm_row(row: &mut [f32], max: f32) -> Option<bool> {
    let sum: f32 = row.iter().sum();
    if sum == max {
        return Some(false);
    }
    let first = row[0] + (max - sum);
    if first < 0.0 {
        return None;
    }
    row[0] = first;
    Some(true)
}

fn sanitize_float_row(row: &mut [f32]) -> Option<bool> {
    let (sum, non_zero) = float_row_sum(row)?;
    if float_sum_ok(sum, non_zero) {
        return Some(false);
    }
    if sum == 0.0 {
        return None;
    }
    for w in row.iter_mut() {
        *w /= sum;
    }
    Some(true)
}

fn row_is_valid(encoding: ComponentEncoding, row: &[f32]) -> bool {
    match encoding {
        ComponentEncoding::Uint8 => row.iter().sum::<f32>() == 255.0,
        ComponentEncoding::Uint16 => row.iter().sum::<f32>() == 65535.0,
        _ => float_row_sum(row).is_some_and(|(sum, non_zero)| float_sum_ok(sum, non_zero)),
    }
}

/// Sum of the positive weights and their count; `None` for NaN or values
/// outside `[0, 1]`.
fn float_row_sum(row: &[f32]) -> Option<(f32, usize)> {
    let mut sum = 0.0;
    let mut non_zero = 0;
    for &w in row {
        if !(0.0..=1.0).contains(&w) {
            return None;
        }
        if w > 0.0 {
            sum += w;
            non_zero += 1;
        }
    }
    Some((sum, non_zero))
}

#[inline]
fn float_sum_ok(sum: f32, non_zero: usize) -> bool {
    (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE * non_zero as f32
}
