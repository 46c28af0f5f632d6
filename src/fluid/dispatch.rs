//! Data-parallel pass execution.
//!
//! A pass runs one kernel invocation per particle, partitioned into
//! fixed-size groups of lanes executed on the thread pool. [`dispatch`]
//! returns only after every group has finished and its writes are
//! visible to the caller; that synchronous return is the barrier
//! separating one pass from the next.

use rayon::prelude::*;

use super::particle::ParticleRecord;

/// Number of groups needed to cover `lanes` at `group_size` lanes each.
pub fn group_count(lanes: usize, group_size: usize) -> usize {
    lanes.div_ceil(group_size)
}

/// Runs `kernel` once per lane over the input snapshot, writing each
/// lane's result into its slot of `output`.
///
/// Lanes read only the snapshot and write only their own record, so the
/// result is identical for any group scheduling.
pub fn dispatch<K>(
    input: &[ParticleRecord],
    output: &mut [ParticleRecord],
    group_size: usize,
    kernel: K,
) where
    K: Fn(usize, &[ParticleRecord]) -> ParticleRecord + Sync,
{
    assert_eq!(input.len(), output.len(), "pass buffers must match in length");
    assert!(group_size > 0, "group_size must be nonzero");

    output
        .par_chunks_mut(group_size)
        .enumerate()
        .for_each(|(group, lanes)| {
            let base = group * group_size;
            for (lane, out) in lanes.iter_mut().enumerate() {
                *out = kernel(base + lane, input);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_count() {
        assert_eq!(group_count(1024, 256), 4);
        assert_eq!(group_count(1025, 256), 5);
        assert_eq!(group_count(1, 256), 1);
        assert_eq!(group_count(0, 256), 0);
    }

    #[test]
    fn test_dispatch_covers_every_lane_once() {
        // Group size does not divide the lane count; the tail group is short
        let input = vec![ParticleRecord::default(); 10];
        let mut output = vec![ParticleRecord::default(); 10];

        dispatch(&input, &mut output, 4, |i, snapshot| {
            let mut record = snapshot[i];
            record.density = i as f32 + 1.0;
            record
        });

        for (i, record) in output.iter().enumerate() {
            assert_eq!(record.density, i as f32 + 1.0);
        }
    }

    #[test]
    fn test_dispatch_with_oversized_group() {
        let input = vec![ParticleRecord::default(); 3];
        let mut output = vec![ParticleRecord::default(); 3];

        dispatch(&input, &mut output, 256, |i, snapshot| {
            let mut record = snapshot[i];
            record.density = 7.0;
            record
        });

        assert!(output.iter().all(|r| r.density == 7.0));
    }

    #[test]
    fn test_dispatch_reads_only_the_snapshot() {
        // Each lane reads its right-hand neighbor's input density; the
        // outcome must reflect the snapshot, not any same-pass write.
        let mut input = vec![ParticleRecord::default(); 8];
        for (i, record) in input.iter_mut().enumerate() {
            record.density = i as f32;
        }
        let mut output = vec![ParticleRecord::default(); 8];

        dispatch(&input, &mut output, 3, |i, snapshot| {
            let mut record = snapshot[i];
            record.density = snapshot[(i + 1) % snapshot.len()].density * 10.0;
            record
        });

        for (i, record) in output.iter().enumerate() {
            assert_eq!(record.density, ((i + 1) % 8) as f32 * 10.0);
        }
    }
}
