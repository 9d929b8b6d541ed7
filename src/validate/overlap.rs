//! Buffer aliasing detection.
//!
//! Ranges are compared as absolute addresses, so accessors over distinct
//! allocations never overlap while accessors sharing one allocation (or
//! slices of it) are compared by the bytes they actually cover.

use std::ops::Range;

use crate::memory::MemoryAccessor;

#[inline]
fn intersects(a: &Range<usize>, b: &Range<usize>) -> bool {
    !a.is_empty() && !b.is_empty() && a.start < b.end && b.start < a.end
}

/// Returns true if the bytes covered by `a` and `b` intersect.
pub fn have_overlapping_buffers<A, B>(a: &MemoryAccessor<A>, b: &MemoryAccessor<B>) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    intersects(&a.address_range(), &b.address_range())
}

/// Returns true if any two accessors in the set share bytes.
pub fn any_overlapping_buffers<B: AsRef<[u8]>>(accessors: &[MemoryAccessor<B>]) -> bool {
    let ranges: Vec<_> = accessors.iter().map(MemoryAccessor::address_range).collect();
    ranges
        .iter()
        .enumerate()
        .any(|(i, a)| ranges[i + 1..].iter().any(|b| intersects(a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::LayoutDescriptor;
    use crate::util::AttributeFormat;

    fn region(buf: &[u8], offset: usize, len: usize) -> MemoryAccessor<&[u8]> {
        MemoryAccessor::new(LayoutDescriptor::new(offset, len / 4, 0, AttributeFormat::FLOAT), buf)
    }

    #[test]
    fn test_same_allocation() {
        let buf = vec![0u8; 128];
        assert!(have_overlapping_buffers(&region(&buf, 0, 64), &region(&buf, 32, 64)));
        assert!(!have_overlapping_buffers(&region(&buf, 0, 32), &region(&buf, 32, 32)));
    }

    #[test]
    fn test_distinct_allocations() {
        let a = vec![0u8; 64];
        let b = vec![0u8; 64];
        assert!(!have_overlapping_buffers(&region(&a, 0, 64), &region(&b, 0, 64)));
    }

    #[test]
    fn test_empty_never_overlaps() {
        let buf = vec![0u8; 64];
        assert!(!have_overlapping_buffers(&region(&buf, 0, 64), &region(&buf, 16, 0)));
    }

    #[test]
    fn test_any() {
        let buf = vec![0u8; 96];
        let disjoint = [region(&buf, 0, 32), region(&buf, 32, 32), region(&buf, 64, 32)];
        assert!(!any_overlapping_buffers(&disjoint));

        let clash = [region(&buf, 0, 32), region(&buf, 64, 32), region(&buf, 16, 32)];
        assert!(any_overlapping_buffers(&clash));
    }

    #[test]
    fn test_interleaved_attributes_share_bytes() {
        let buf = vec![0u8; 2 * 24];
        let mut attrs = [LayoutDescriptor::for_attribute("POSITION"), LayoutDescriptor::for_attribute("NORMAL")];
        LayoutDescriptor::set_interleaved_info(&mut attrs, 0, 2);
        let pos = MemoryAccessor::new(attrs[0].clone(), &buf[..]);
        let nrm = MemoryAccessor::new(attrs[1].clone(), &buf[..]);
        assert!(have_overlapping_buffers(&pos, &nrm));
    }
}
