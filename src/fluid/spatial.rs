//! Neighbor enumeration.
//!
//! A brute-force all-pairs scan: for a query point, yields every record
//! within the smoothing radius. The scan sits behind this small
//! interface so a spatial index could replace it at larger particle
//! counts without touching the density or force logic.

use bevy::prelude::*;

use super::particle::ParticleRecord;

/// A particle found within the smoothing radius of a query point.
#[derive(Clone, Copy, Debug)]
pub struct Neighbor {
    /// Index of the neighbor in the particle snapshot.
    pub index: usize,
    /// Offset from the neighbor to the query point.
    pub offset: Vec2,
    /// Squared distance between the two.
    pub dist_sq: f32,
}

/// Scans every record and yields those strictly within `radius` of
/// `center`. A record at the query point itself is included, with a zero
/// offset.
pub fn neighbors(
    records: &[ParticleRecord],
    center: Vec2,
    radius: f32,
) -> impl Iterator<Item = Neighbor> + '_ {
    let radius_sq = radius * radius;

    records.iter().enumerate().filter_map(move |(index, record)| {
        let offset = center - record.position();
        let dist_sq = offset.length_squared();
        (dist_sq < radius_sq).then_some(Neighbor { index, offset, dist_sq })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_at(positions: &[Vec2]) -> Vec<ParticleRecord> {
        positions.iter().map(|&p| ParticleRecord::at_rest(p)).collect()
    }

    #[test]
    fn test_neighbors_filtered_by_radius() {
        let records = records_at(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, 50.0),
        ]);

        let found: Vec<_> = neighbors(&records, Vec2::ZERO, 16.0).collect();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].index, 0);
        assert_eq!(found[1].index, 1);
    }

    #[test]
    fn test_neighbors_includes_query_point() {
        let records = records_at(&[Vec2::new(10.0, 10.0)]);

        let found: Vec<_> = neighbors(&records, Vec2::new(10.0, 10.0), 16.0).collect();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dist_sq, 0.0);
        assert_eq!(found[0].offset, Vec2::ZERO);
    }

    #[test]
    fn test_neighbor_offset_points_toward_query() {
        let records = records_at(&[Vec2::new(3.0, 0.0)]);

        let found: Vec<_> = neighbors(&records, Vec2::ZERO, 16.0).collect();

        // Offset runs from the neighbor to the query point
        assert_eq!(found[0].offset, Vec2::new(-3.0, 0.0));
        assert_eq!(found[0].dist_sq, 9.0);
    }

    #[test]
    fn test_boundary_of_support_excluded() {
        let records = records_at(&[Vec2::new(16.0, 0.0)]);

        // Exactly at the radius the kernel is zero, so the pair is skipped
        assert_eq!(neighbors(&records, Vec2::ZERO, 16.0).count(), 0);
    }
}
