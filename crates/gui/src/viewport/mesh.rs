//! Validated runtime mesh store.
//!
//! Built all-or-nothing from a `shared::ModelDescription` at model load:
//! a malformed face is a construction error (it indicates a corrupt
//! generator), never a per-frame skip. Geometry is read-only afterwards;
//! only region *colors* change per frame, and those live outside the store.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use glam::Vec3;
use shared::{ModelDescription, Rgba};

/// Style used for faces whose region key has no metadata.
pub const UNREGIONED_KEY: &str = "unregioned";
const UNREGIONED_COLOR: Rgba = [140, 140, 148, 255];

/// A resolved vertex: position, optional precomputed normal, region index.
pub struct Vertex {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub region: usize,
}

/// A resolved triangle: vertex indices, region index, object-space normal.
///
/// The normal is computed once from the original vertex positions; the mesh
/// itself never rotates, only the camera does, so it is never recomputed.
pub struct Face {
    pub indices: [u32; 3],
    pub region: usize,
    pub normal: Vec3,
}

/// Region metadata plus membership; centroid is computed once on first
/// request and cached.
pub struct Region {
    pub key: String,
    pub name: String,
    pub base_color: Rgba,
    pub vertices: Vec<u32>,
    precomputed_centroid: Option<Vec3>,
    centroid: OnceLock<Vec3>,
}

/// A labeled interactive point (graph node, anatomical landmark).
pub struct Marker {
    pub id: String,
    pub label: String,
    pub position: Vec3,
    pub region: Option<usize>,
}

/// An edge whose two adjacent faces belong to different regions.
pub struct BoundaryEdge {
    pub a: u32,
    pub b: u32,
    pub regions: (usize, usize),
}

pub struct AnatomyMesh {
    name: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    regions: Vec<Region>,
    region_index: HashMap<String, usize>,
    markers: Vec<Marker>,
    /// Marker links resolved to marker indices
    links: Vec<(usize, usize)>,
    boundary_edges: Vec<BoundaryEdge>,
    bounding_radius: f32,
}

type QuantizedPos = (i64, i64, i64);

fn quantize(p: Vec3) -> QuantizedPos {
    let scale = 10000.0;
    (
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    )
}

fn ordered(a: QuantizedPos, b: QuantizedPos) -> (QuantizedPos, QuantizedPos) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl AnatomyMesh {
    /// Build the runtime store from a model description.
    ///
    /// Fatal (construction error): empty vertex list, face index out of
    /// range, repeated face index, region membership index out of range.
    /// Non-fatal: a face or vertex referencing an unknown region key falls
    /// back to the default unregioned style with a logged warning.
    pub fn build(desc: &ModelDescription) -> Result<Self, String> {
        if desc.vertices.is_empty() {
            return Err(format!("model '{}' has no vertices", desc.name));
        }
        let vertex_count = desc.vertices.len() as u32;

        // Region table from declared metadata; unknown referenced keys are
        // appended with the default style as they are first seen.
        let mut regions: Vec<Region> = Vec::with_capacity(desc.regions.len() + 1);
        let mut region_index: HashMap<String, usize> = HashMap::new();
        for info in &desc.regions {
            for &vi in &info.vertices {
                if vi >= vertex_count {
                    return Err(format!(
                        "region '{}': vertex index {} out of range ({} vertices)",
                        info.key, vi, vertex_count
                    ));
                }
            }
            region_index.insert(info.key.clone(), regions.len());
            regions.push(Region {
                key: info.key.clone(),
                name: info.name.clone(),
                base_color: info.color,
                vertices: info.vertices.clone(),
                precomputed_centroid: info.centroid.map(Vec3::from),
                centroid: OnceLock::new(),
            });
        }

        let mut warned: HashSet<String> = HashSet::new();
        let mut resolve_region = |key: &str,
                                  regions: &mut Vec<Region>,
                                  region_index: &mut HashMap<String, usize>|
         -> usize {
            if let Some(&idx) = region_index.get(key) {
                return idx;
            }
            if key != UNREGIONED_KEY && warned.insert(key.to_string()) {
                tracing::warn!("region '{key}' has no metadata, using default style");
            }
            region_index.insert(key.to_string(), regions.len());
            regions.push(Region {
                key: key.to_string(),
                name: key.to_string(),
                base_color: UNREGIONED_COLOR,
                vertices: Vec::new(),
                precomputed_centroid: None,
                centroid: OnceLock::new(),
            });
            regions.len() - 1
        };

        // The catch-all region for untagged geometry is created lazily too,
        // so a fully-tagged model never carries it.
        let mut vertices: Vec<Vertex> = Vec::with_capacity(desc.vertices.len());
        for v in &desc.vertices {
            let region = match &v.region {
                Some(key) => resolve_region(key, &mut regions, &mut region_index),
                None => resolve_region(UNREGIONED_KEY, &mut regions, &mut region_index),
            };
            vertices.push(Vertex {
                position: Vec3::from(v.position),
                normal: v.normal.map(Vec3::from),
                region,
            });
        }
        // The implicit unregioned entry keeps the default color, not a warning-styled one
        if let Some(&idx) = region_index.get(UNREGIONED_KEY) {
            if desc.region(UNREGIONED_KEY).is_none() {
                regions[idx].name = "Unregioned".to_string();
            }
        }

        let mut faces: Vec<Face> = Vec::with_capacity(desc.faces.len());
        for (i, f) in desc.faces.iter().enumerate() {
            let [a, b, c] = f.indices;
            for &ix in &f.indices {
                if ix >= vertex_count {
                    return Err(format!(
                        "face {i}: vertex index {ix} out of range ({vertex_count} vertices)"
                    ));
                }
            }
            if a == b || b == c || a == c {
                return Err(format!("face {i}: degenerate (repeated vertex index)"));
            }
            let region = match &f.region {
                Some(key) => resolve_region(key, &mut regions, &mut region_index),
                // Falls back to the first vertex's region
                None => vertices[a as usize].region,
            };
            let p0 = vertices[a as usize].position;
            let p1 = vertices[b as usize].position;
            let p2 = vertices[c as usize].position;
            // Outward for counter-clockwise winding viewed from outside
            // (view space looks down +z, so this is cross(e2, e1))
            let normal = (p2 - p0).cross(p1 - p0).normalize_or_zero();
            faces.push(Face {
                indices: f.indices,
                region,
                normal,
            });
        }

        // Derive region membership from vertex tags where not declared
        for (vi, v) in vertices.iter().enumerate() {
            let region = &mut regions[v.region];
            if desc
                .regions
                .iter()
                .find(|r| r.key == region.key)
                .map(|r| r.vertices.is_empty())
                .unwrap_or(true)
            {
                region.vertices.push(vi as u32);
            }
        }

        let mut markers: Vec<Marker> = Vec::with_capacity(desc.markers.len());
        let mut marker_index: HashMap<&str, usize> = HashMap::new();
        for m in &desc.markers {
            let region = m
                .region
                .as_ref()
                .map(|key| resolve_region(key, &mut regions, &mut region_index));
            marker_index.insert(m.id.as_str(), markers.len());
            markers.push(Marker {
                id: m.id.clone(),
                label: m.label.clone(),
                position: Vec3::from(m.position),
                region,
            });
        }

        let mut links: Vec<(usize, usize)> = Vec::with_capacity(desc.links.len());
        for link in &desc.links {
            match (
                marker_index.get(link.from.as_str()),
                marker_index.get(link.to.as_str()),
            ) {
                (Some(&from), Some(&to)) => links.push((from, to)),
                _ => {
                    tracing::warn!(
                        "link '{}' -> '{}' references an unknown marker, skipped",
                        link.from,
                        link.to
                    );
                }
            }
        }

        let boundary_edges = extract_boundary_edges(&vertices, &faces);

        let bounding_radius = vertices
            .iter()
            .map(|v| v.position.length())
            .fold(0.0_f32, f32::max);

        tracing::info!(
            "built mesh '{}': {} vertices, {} faces, {} regions, {} boundary edges",
            desc.name,
            vertices.len(),
            faces.len(),
            regions.len(),
            boundary_edges.len()
        );

        Ok(Self {
            name: desc.name.clone(),
            vertices,
            faces,
            regions,
            region_index,
            markers,
            links,
            boundary_edges,
            bounding_radius,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    pub fn boundary_edges(&self) -> &[BoundaryEdge] {
        &self.boundary_edges
    }

    /// Radius of the smallest origin-centered sphere containing the mesh.
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Region index of a face.
    pub fn region_of(&self, face_index: usize) -> usize {
        self.faces[face_index].region
    }

    pub fn region_by_key(&self, key: &str) -> Option<usize> {
        self.region_index.get(key).copied()
    }

    pub fn marker_by_id(&self, id: &str) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    /// Member vertex indices of a region.
    pub fn vertices_of(&self, key: &str) -> &[u32] {
        self.region_by_key(key)
            .map(|i| self.regions[i].vertices.as_slice())
            .unwrap_or(&[])
    }

    /// Region centroid: the precomputed value if the generator supplied
    /// one, otherwise the average of member vertex positions, computed once
    /// and cached.
    pub fn centroid_of(&self, region: usize) -> Vec3 {
        let r = &self.regions[region];
        *r.centroid.get_or_init(|| {
            if let Some(c) = r.precomputed_centroid {
                return c;
            }
            if r.vertices.is_empty() {
                return Vec3::ZERO;
            }
            let sum: Vec3 = r
                .vertices
                .iter()
                .map(|&vi| self.vertices[vi as usize].position)
                .sum();
            sum / r.vertices.len() as f32
        })
    }
}

/// Extract edges where adjacent faces belong to different regions.
///
/// Endpoints are matched by quantized position, not index, so generators
/// that duplicate vertices along region seams still pair up.
fn extract_boundary_edges(vertices: &[Vertex], faces: &[Face]) -> Vec<BoundaryEdge> {
    // Edge -> (first face's region, original vertex index pair)
    let mut seen: HashMap<(QuantizedPos, QuantizedPos), (usize, u32, u32)> = HashMap::new();
    let mut boundary: HashMap<(QuantizedPos, QuantizedPos), BoundaryEdge> = HashMap::new();

    for face in faces {
        let [a, b, c] = face.indices;
        for (va, vb) in [(a, b), (b, c), (c, a)] {
            let qa = quantize(vertices[va as usize].position);
            let qb = quantize(vertices[vb as usize].position);
            let key = ordered(qa, qb);
            match seen.get(&key).copied() {
                None => {
                    seen.insert(key, (face.region, va, vb));
                }
                Some((other_region, oa, ob)) if other_region != face.region => {
                    boundary.entry(key).or_insert(BoundaryEdge {
                        a: oa,
                        b: ob,
                        regions: (other_region, face.region),
                    });
                }
                Some(_) => {}
            }
        }
    }

    boundary.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use shared::{ModelDescription, ModelFace, ModelVertex};

    #[test]
    fn test_empty_model_is_fatal() {
        let desc = ModelDescription::default();
        assert!(AnatomyMesh::build(&desc).is_err());
    }

    #[test]
    fn test_out_of_range_index_is_fatal() {
        let desc = ModelDescription {
            name: "bad".to_string(),
            vertices: vec![
                ModelVertex::new(0.0, 0.0, 0.0),
                ModelVertex::new(1.0, 0.0, 0.0),
                ModelVertex::new(0.0, 1.0, 0.0),
            ],
            faces: vec![ModelFace::new(0, 1, 7)],
            ..Default::default()
        };
        let err = AnatomyMesh::build(&desc).unwrap_err();
        assert!(err.contains("out of range"), "unexpected error: {err}");
    }

    #[test]
    fn test_repeated_index_is_fatal() {
        let desc = ModelDescription {
            name: "bad".to_string(),
            vertices: vec![
                ModelVertex::new(0.0, 0.0, 0.0),
                ModelVertex::new(1.0, 0.0, 0.0),
                ModelVertex::new(0.0, 1.0, 0.0),
            ],
            faces: vec![ModelFace::new(0, 1, 1)],
            ..Default::default()
        };
        assert!(AnatomyMesh::build(&desc).is_err());
    }

    #[test]
    fn test_unknown_region_falls_back_to_default() {
        let desc = ModelDescription {
            name: "m".to_string(),
            vertices: vec![
                ModelVertex::with_region(0.0, 0.0, 0.0, "mystery"),
                ModelVertex::new(1.0, 0.0, 0.0),
                ModelVertex::new(0.0, 1.0, 0.0),
            ],
            faces: vec![ModelFace::new(0, 1, 2)],
            ..Default::default()
        };
        let mesh = AnatomyMesh::build(&desc).expect("non-fatal");
        let idx = mesh.region_by_key("mystery").unwrap();
        assert_eq!(mesh.regions()[idx].base_color, UNREGIONED_COLOR);
        // Untagged vertices land in the catch-all region
        assert!(mesh.region_by_key(UNREGIONED_KEY).is_some());
    }

    #[test]
    fn test_untagged_face_inherits_first_vertex_region() {
        let desc = ModelDescription {
            name: "m".to_string(),
            vertices: vec![
                ModelVertex::with_region(0.0, 0.0, 0.0, "a"),
                ModelVertex::with_region(1.0, 0.0, 0.0, "b"),
                ModelVertex::with_region(0.0, 1.0, 0.0, "b"),
            ],
            faces: vec![ModelFace::new(0, 1, 2)],
            regions: vec![
                shared::RegionInfo::new("a", "A", [255, 0, 0, 255]),
                shared::RegionInfo::new("b", "B", [0, 255, 0, 255]),
            ],
            ..Default::default()
        };
        let mesh = AnatomyMesh::build(&desc).unwrap();
        assert_eq!(mesh.region_of(0), mesh.region_by_key("a").unwrap());
        // An explicit face tag wins over the first vertex
        let mesh = AnatomyMesh::build(&fixtures::two_region_cube()).unwrap();
        for face in mesh.faces() {
            assert!(face.region < mesh.regions().len());
        }
    }

    #[test]
    fn test_cube_face_normals_point_outward() {
        let mesh = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        for face in mesh.faces() {
            let centroid: Vec3 = face
                .indices
                .iter()
                .map(|&i| mesh.vertices()[i as usize].position)
                .sum::<Vec3>()
                / 3.0;
            assert!(
                face.normal.dot(centroid) > 0.0,
                "inward-facing normal on a centered convex mesh"
            );
        }
    }

    #[test]
    fn test_centroid_cached_and_averaged() {
        let mesh = AnatomyMesh::build(&fixtures::two_region_cube()).unwrap();
        let idx = mesh.region_by_key("left").unwrap();
        let c1 = mesh.centroid_of(idx);
        let c2 = mesh.centroid_of(idx);
        assert_eq!(c1, c2);
        // All "left" vertices have x = -0.5
        assert!((c1.x + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_boundary_edges_between_regions() {
        let mesh = AnatomyMesh::build(&fixtures::two_region_cube()).unwrap();
        assert!(!mesh.boundary_edges().is_empty());
        for edge in mesh.boundary_edges() {
            assert_ne!(edge.regions.0, edge.regions.1);
        }
        // Single-region mesh has none
        let cube = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        assert!(cube.boundary_edges().is_empty());
    }

    #[test]
    fn test_bounding_radius() {
        let mesh = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        let expected = (0.75_f32).sqrt();
        assert!((mesh.bounding_radius() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_markers_and_links_resolved() {
        let mesh = AnatomyMesh::build(&fixtures::lobed_shell(8, 12, 4)).unwrap();
        assert!(!mesh.markers().is_empty());
        for &(from, to) in mesh.links() {
            assert!(from < mesh.markers().len());
            assert!(to < mesh.markers().len());
        }
    }
}
