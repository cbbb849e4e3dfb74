//! Per-vertex normals for a height lattice

use glam::Vec3;

use crate::core::params::NormalStrategy;
use crate::world::grid::Lattice;

pub struct NormalEstimator;

impl NormalEstimator {
    pub fn estimate(strategy: NormalStrategy, lattice: &Lattice, indices: &[u32]) -> Vec<Vec3> {
        match strategy {
            NormalStrategy::NeighborEdges => Self::neighbor_edges(lattice),
            NormalStrategy::FaceAverage => Self::face_average(lattice, indices),
        }
    }

    /// Cross product of one edge along the row axis and one along the column axis.
    ///
    /// Forward neighbours are preferred; on the last row/column the backward
    /// neighbour is used and its edge flipped so every edge points along +row
    /// or +col. A grid with a single row or column has no second edge and gets
    /// an up vector.
    pub fn neighbor_edges(lattice: &Lattice) -> Vec<Vec3> {
        let rows = lattice.rows;
        let cols = lattice.cols;
        let mut normals = Vec::with_capacity(lattice.len());

        for row in 0..rows {
            for col in 0..cols {
                let origin = lattice.position(row, col);

                let edge_row = if row + 1 < rows {
                    lattice.position(row + 1, col) - origin
                } else if row > 0 {
                    origin - lattice.position(row - 1, col)
                } else {
                    Vec3::ZERO
                };

                let edge_col = if col + 1 < cols {
                    lattice.position(row, col + 1) - origin
                } else if col > 0 {
                    origin - lattice.position(row, col - 1)
                } else {
                    Vec3::ZERO
                };

                normals.push(normalize_or_up(edge_row.cross(edge_col)));
            }
        }

        normals
    }

    /// Area-weighted average of the faces sharing each vertex.
    pub fn face_average(lattice: &Lattice, indices: &[u32]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; lattice.len()];

        for tri in indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let v0 = lattice.positions[i0];
            let v1 = lattice.positions[i1];
            let v2 = lattice.positions[i2];

            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        normals.into_iter().map(normalize_or_up).collect()
    }
}

#[inline]
fn normalize_or_up(normal: Vec3) -> Vec3 {
    normal.try_normalize().unwrap_or(Vec3::Y)
}
