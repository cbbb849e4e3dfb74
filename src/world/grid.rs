//! Vertex lattice and triangle index buffer for a rows x cols height grid

use glam::Vec3;

use crate::core::params::GenerationParams;
use crate::world::noise::HeightSampler;

/// Row-major grid of world positions. `index = row * cols + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    pub rows: u32,
    pub cols: u32,
    pub positions: Vec<Vec3>,
}

impl Lattice {
    #[inline]
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    #[inline]
    pub fn position(&self, row: u32, col: u32) -> Vec3 {
        self.positions[self.index(row, col)]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

pub struct GridTopology;

impl GridTopology {
    /// Samples one height per lattice point. Rows run along +Z, columns along +X.
    pub fn build_lattice<S: HeightSampler + ?Sized>(
        params: &GenerationParams,
        sampler: &S,
    ) -> Lattice {
        let rows = params.rows;
        let cols = params.cols;
        let quad_size = params.quad_size;
        let x_offset = params.origin.offset(cols, quad_size);
        let z_offset = params.origin.offset(rows, quad_size);

        let mut positions = Vec::with_capacity(params.vertex_count());
        for row in 0..rows {
            let z = row as f32 * quad_size + z_offset;
            for col in 0..cols {
                let x = col as f32 * quad_size + x_offset;
                let y = params
                    .height_mapping
                    .apply(sampler.sample(x, z), params.max_height);
                positions.push(Vec3::new(x, y, z));
            }
        }

        Lattice {
            rows,
            cols,
            positions,
        }
    }

    /// Two triangles per interior cell, wound so a flat grid faces +Y.
    ///
    /// ```text
    ///  i ----- right      (+X to the right, +Z downwards)
    ///  |     /  |
    ///  |   /    |
    /// below --- diag
    /// ```
    pub fn build_indices(rows: u32, cols: u32) -> Vec<u32> {
        let cells = rows.saturating_sub(1) as usize * cols.saturating_sub(1) as usize;
        let mut indices = Vec::with_capacity(cells * 6);

        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                let i = row * cols + col;
                let right = i + 1;
                let below = i + cols;
                let diag = below + 1;

                indices.extend_from_slice(&[i, below, right, diag, right, below]);
            }
        }

        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{HeightMapping, LatticeOrigin, NoiseConfig};
    use crate::world::noise::{FlatNoise, NoiseField};

    fn triangle_normal(lattice: &Lattice, tri: &[u32]) -> Vec3 {
        let v0 = lattice.positions[tri[0] as usize];
        let v1 = lattice.positions[tri[1] as usize];
        let v2 = lattice.positions[tri[2] as usize];
        (v1 - v0).cross(v2 - v0)
    }

    #[test]
    fn test_flat_lattice_layout() {
        let params = GenerationParams::new(2, 3, 10.0, 30.0);
        let lattice = GridTopology::build_lattice(&params, &FlatNoise(0.0));

        assert_eq!(lattice.len(), 6);
        let xs: Vec<f32> = lattice.positions.iter().map(|p| p.x).collect();
        let zs: Vec<f32> = lattice.positions.iter().map(|p| p.z).collect();
        assert_eq!(xs, vec![-10.0, 0.0, 10.0, -10.0, 0.0, 10.0]);
        assert_eq!(zs, vec![-5.0, -5.0, -5.0, 5.0, 5.0, 5.0]);
        assert!(lattice.positions.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_cell_corner_origin() {
        let mut params = GenerationParams::new(2, 3, 10.0, 30.0);
        params.origin = LatticeOrigin::CellCorner;
        let lattice = GridTopology::build_lattice(&params, &FlatNoise(0.0));

        assert_eq!(lattice.position(0, 0), Vec3::new(-15.0, 0.0, -10.0));
        assert_eq!(lattice.position(1, 2), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_height_scaling() {
        let mut params = GenerationParams::new(2, 2, 1.0, 30.0);
        let lattice = GridTopology::build_lattice(&params, &FlatNoise(1.0));
        assert!(lattice.positions.iter().all(|p| p.y == 15.0));

        params.height_mapping = HeightMapping::Positive;
        let lattice = GridTopology::build_lattice(&params, &FlatNoise(-1.0));
        assert!(lattice.positions.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_index_counts_and_range() {
        for (rows, cols) in [(1, 1), (1, 7), (7, 1), (2, 2), (5, 3), (16, 9)] {
            let indices = GridTopology::build_indices(rows, cols);
            let expected = 6 * (rows as usize - 1) * (cols as usize - 1);
            assert_eq!(indices.len(), expected, "{}x{}", rows, cols);
            assert!(indices.iter().all(|&i| i < rows * cols), "{}x{}", rows, cols);
        }
    }

    #[test]
    fn test_flat_triangles_face_up() {
        let params = GenerationParams::new(2, 3, 10.0, 30.0);
        let lattice = GridTopology::build_lattice(&params, &FlatNoise(0.0));
        let indices = GridTopology::build_indices(params.rows, params.cols);

        assert_eq!(indices.len(), 12);
        for tri in indices.chunks(3) {
            assert!(triangle_normal(&lattice, tri).y > 0.0, "triangle {:?}", tri);
        }
    }

    #[test]
    fn test_triangles_cover_each_cell_once() {
        let indices = GridTopology::build_indices(3, 3);
        // cell (1, 1) starts at vertex 4
        assert_eq!(&indices[18..24], &[4, 7, 5, 8, 5, 7]);
    }

    #[test]
    fn test_noise_lattice_is_reproducible() {
        let params = GenerationParams::new(12, 9, 0.5, 30.0);
        let a = GridTopology::build_lattice(&params, &NoiseField::new(NoiseConfig::with_seed(5)));
        let b = GridTopology::build_lattice(&params, &NoiseField::new(NoiseConfig::with_seed(5)));
        let bits =
            |l: &Lattice| -> Vec<u32> { l.positions.iter().map(|p| p.y.to_bits()).collect() };
        assert_eq!(bits(&a), bits(&b));
    }
}
