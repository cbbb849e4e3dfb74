use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::core::params::GenerationParams;
use crate::error::{Result, TerrainError};
use crate::render::mesh::{MeshAssembler, MeshBuffers, TerrainMesh};

const MAGIC_HEADER: &[u8; 4] = b"TRMS";
const VERSION: u32 = 1;
// magic + version + payload length
const HEADER_LEN: u64 = 16;

#[derive(Serialize, Deserialize)]
pub struct SavedMesh {
    pub seed: i32,
    pub params: GenerationParams,
    pub buffers: MeshBuffers,
}

impl SavedMesh {
    pub fn from_mesh(mesh: &TerrainMesh, params: &GenerationParams) -> Self {
        SavedMesh {
            seed: mesh.seed(),
            params: params.clone(),
            buffers: mesh.buffers().clone(),
        }
    }

    /// Re-validates the stored buffers into a fresh mesh.
    pub fn into_mesh(self) -> Result<TerrainMesh> {
        Ok(MeshAssembler::assemble(self.seed, self.buffers)?)
    }
}

pub fn save_mesh<P: AsRef<Path>>(path: P, mesh: &SavedMesh) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(MAGIC_HEADER)?;
    writer.write_all(&VERSION.to_le_bytes())?;

    let data = bincode::serialize(mesh)?;

    let size = data.len() as u64;
    writer.write_all(&size.to_le_bytes())?;

    writer.write_all(&data)?;
    writer.flush()?;

    Ok(())
}

pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<SavedMesh> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC_HEADER {
        return Err(TerrainError::Format("missing TRMS header".to_string()));
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(TerrainError::Format(format!(
            "unsupported mesh file version: {}",
            version
        )));
    }

    let mut size_bytes = [0u8; 8];
    reader.read_exact(&mut size_bytes)?;
    let size = u64::from_le_bytes(size_bytes);
    let remaining = file_len.saturating_sub(HEADER_LEN);
    if size > remaining {
        return Err(TerrainError::Format(format!(
            "mesh payload claims {} bytes but only {} remain",
            size, remaining
        )));
    }

    let mut data = vec![0u8; size as usize];
    reader.read_exact(&mut data)?;

    Ok(bincode::deserialize(&data)?)
}

pub const MESH_FILE_EXTENSION: &str = "trms";
pub const DEFAULT_MESH_FILE: &str = "terrain.trms";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generator::build_mesh;
    use crate::world::noise::FlatNoise;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "meshgen-{}-{}.{}",
            name,
            std::process::id(),
            MESH_FILE_EXTENSION
        ))
    }

    #[test]
    fn test_save_and_load_mesh() {
        let params = GenerationParams::new(3, 4, 2.0, 8.0);
        let mesh = build_mesh(&FlatNoise(0.25), 321, &params).unwrap();
        let path = temp_path("roundtrip");

        save_mesh(&path, &SavedMesh::from_mesh(&mesh, &params)).unwrap();
        let loaded = load_mesh(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.seed, 321);
        assert_eq!(loaded.params, params);
        let restored = loaded.into_mesh().unwrap();
        assert_eq!(restored.positions(), mesh.positions());
        assert_eq!(restored.normals(), mesh.normals());
        assert_eq!(restored.indices(), mesh.indices());
        assert_ne!(restored.id(), mesh.id());
    }

    #[test]
    fn test_rejects_oversized_length_prefix() {
        let path = temp_path("oversized");
        let mut bytes = MAGIC_HEADER.to_vec();
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 8]);
        std::fs::write(&path, bytes).unwrap();

        let err = load_mesh(&path).err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, Some(TerrainError::Format(_))));
    }

    #[test]
    fn test_rejects_foreign_file() {
        let path = temp_path("foreign");
        std::fs::write(&path, b"R3DW\x01\x00\x00\x00").unwrap();
        let err = load_mesh(&path).err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, Some(TerrainError::Format(_))));
    }
}
