//! Factory functions for model descriptions.
//!
//! Used by unit and integration tests, and by the application as the
//! built-in demo model when no `--model` file is given. Faces are wound so
//! that face normals point outward.

use shared::{
    MarkerLink, ModelDescription, ModelFace, ModelMarker, ModelVertex, RegionInfo, Rgba,
};

/// The single-triangle model: one face at z = 5 facing a camera at the
/// origin looking down +z.
pub fn single_triangle() -> ModelDescription {
    ModelDescription {
        name: "triangle".to_string(),
        vertices: vec![
            ModelVertex::with_region(0.0, 0.0, 5.0, "membrane"),
            ModelVertex::with_region(1.0, 0.0, 5.0, "membrane"),
            ModelVertex::with_region(0.0, 1.0, 5.0, "membrane"),
        ],
        faces: vec![ModelFace::new(0, 1, 2)],
        regions: vec![RegionInfo::new("membrane", "Membrane", [210, 160, 120, 255])],
        ..Default::default()
    }
}

/// Unit cube centered at the origin, one region.
pub fn unit_cube() -> ModelDescription {
    cube_model(false)
}

/// Unit cube split into "left"/"right" regions with explicit face tags,
/// producing region-boundary edges on the four side faces.
pub fn two_region_cube() -> ModelDescription {
    cube_model(true)
}

fn cube_model(two_regions: bool) -> ModelDescription {
    let h = 0.5_f32;
    let corners = [
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];

    let vertices: Vec<ModelVertex> = corners
        .iter()
        .map(|c| {
            if two_regions {
                let region = if c[0] < 0.0 { "left" } else { "right" };
                ModelVertex::with_region(c[0], c[1], c[2], region)
            } else {
                ModelVertex::with_region(c[0], c[1], c[2], "shell")
            }
        })
        .collect();

    // Quads with outward normals; triangulated below
    let quads: [[u32; 4]; 6] = [
        [4, 5, 6, 7], // +Z
        [1, 0, 3, 2], // -Z
        [5, 1, 2, 6], // +X
        [0, 4, 7, 3], // -X
        [7, 6, 2, 3], // +Y
        [0, 1, 5, 4], // -Y
    ];

    let mut faces = Vec::with_capacity(12);
    for q in &quads {
        for tri in [[q[0], q[2], q[1]], [q[0], q[3], q[2]]] {
            let region = if two_regions {
                let cx: f32 = tri.iter().map(|&i| corners[i as usize][0]).sum::<f32>() / 3.0;
                Some(if cx < 0.0 { "left" } else { "right" }.to_string())
            } else {
                None
            };
            faces.push(ModelFace {
                indices: tri,
                region,
            });
        }
    }

    let regions = if two_regions {
        vec![
            RegionInfo::new("left", "Left half", [200, 120, 120, 255]),
            RegionInfo::new("right", "Right half", [120, 140, 210, 255]),
        ]
    } else {
        vec![RegionInfo::new("shell", "Shell", [180, 180, 190, 255])]
    };

    ModelDescription {
        name: if two_regions {
            "two-region-cube".to_string()
        } else {
            "cube".to_string()
        },
        vertices,
        faces,
        regions,
        ..Default::default()
    }
}

/// Minimal picking fixture: a small off-center triangle plus two markers at
/// different depths, linked.
pub fn marker_pair() -> ModelDescription {
    ModelDescription {
        name: "marker-pair".to_string(),
        vertices: vec![
            ModelVertex::with_region(-0.3, -2.5, 0.0, "base"),
            ModelVertex::with_region(0.3, -2.5, 0.0, "base"),
            ModelVertex::with_region(0.0, -2.2, 0.0, "base"),
        ],
        faces: vec![ModelFace::new(0, 1, 2)],
        regions: vec![RegionInfo::new("base", "Base", [150, 150, 150, 255])],
        markers: vec![
            ModelMarker {
                id: "m-near".to_string(),
                label: "Near node".to_string(),
                position: [-0.6, 0.8, 0.0],
                region: None,
            },
            ModelMarker {
                id: "m-far".to_string(),
                label: "Far node".to_string(),
                position: [0.6, 0.8, 0.9],
                region: None,
            },
        ],
        links: vec![MarkerLink {
            from: "m-near".to_string(),
            to: "m-far".to_string(),
        }],
    }
}

/// An ellipsoidal shell sliced into angular lobes, with one linked marker
/// per lobe — the shape of the anatomical models this viewer exists for.
pub fn lobed_shell(rings: u32, sectors: u32, lobes: u32) -> ModelDescription {
    let lobes = lobes.max(1);
    let radii = [1.1_f32, 0.9, 1.3];

    let mut vertices = Vec::new();
    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let (sp, cp) = phi.sin_cos();
        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let (st, ct) = theta.sin_cos();
            let unit = [sp * ct, cp, sp * st];
            let lobe = lobe_of(s.min(sectors - 1), sectors, lobes);
            let mut v = ModelVertex::with_region(
                unit[0] * radii[0],
                unit[1] * radii[1],
                unit[2] * radii[2],
                &lobe_key(lobe),
            );
            v.normal = Some(unit);
            vertices.push(v);
        }
    }

    let mut faces: Vec<ModelFace> = Vec::new();
    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            let lobe = lobe_key(lobe_of(s, sectors, lobes));
            for tri in [[i0, i1, i2], [i1, i3, i2]] {
                if let Some(face) = oriented_face(&vertices, tri, &lobe) {
                    faces.push(face);
                }
            }
        }
    }

    let palette: [Rgba; 6] = [
        [214, 120, 110, 255],
        [120, 170, 214, 255],
        [130, 200, 140, 255],
        [210, 180, 110, 255],
        [170, 130, 200, 255],
        [110, 190, 190, 255],
    ];
    let regions: Vec<RegionInfo> = (0..lobes)
        .map(|i| {
            RegionInfo::new(
                &lobe_key(i),
                &format!("Lobe {}", i + 1),
                palette[i as usize % palette.len()],
            )
        })
        .collect();

    // One marker just outside each lobe's mid-surface, chained in a ring
    let mut markers = Vec::new();
    let mut links = Vec::new();
    for i in 0..lobes {
        let theta = std::f32::consts::TAU * (i as f32 + 0.5) / lobes as f32;
        let (st, ct) = theta.sin_cos();
        markers.push(ModelMarker {
            id: format!("node-{i}"),
            label: format!("Node {}", i + 1),
            position: [ct * radii[0] * 1.15, 0.0, st * radii[2] * 1.15],
            region: Some(lobe_key(i)),
        });
        links.push(MarkerLink {
            from: format!("node-{i}"),
            to: format!("node-{}", (i + 1) % lobes),
        });
    }

    ModelDescription {
        name: "lobed-shell".to_string(),
        vertices,
        faces,
        regions,
        markers,
        links,
    }
}

/// The built-in demo: a brain-like lobed shell with named regions.
pub fn demo_model() -> ModelDescription {
    let mut model = lobed_shell(14, 24, 6);
    model.name = "demo-brain".to_string();
    let names = [
        "Frontal lobe",
        "Temporal lobe",
        "Parietal lobe",
        "Occipital lobe",
        "Cerebellum",
        "Brainstem",
    ];
    for (region, name) in model.regions.iter_mut().zip(names) {
        region.name = name.to_string();
    }
    model
}

fn lobe_of(sector: u32, sectors: u32, lobes: u32) -> u32 {
    (sector * lobes / sectors).min(lobes - 1)
}

fn lobe_key(lobe: u32) -> String {
    format!("lobe-{lobe}")
}

/// Wind the triangle so its normal points away from the origin; drops the
/// degenerate triangles at the poles.
fn oriented_face(vertices: &[ModelVertex], tri: [u32; 3], region: &str) -> Option<ModelFace> {
    let p = |i: u32| glam::Vec3::from(vertices[i as usize].position);
    let (p0, p1, p2) = (p(tri[0]), p(tri[1]), p(tri[2]));
    let normal = (p2 - p0).cross(p1 - p0);
    if normal.length_squared() < 1e-12 {
        return None;
    }
    let centroid = (p0 + p1 + p2) / 3.0;
    let indices = if normal.dot(centroid) >= 0.0 {
        tri
    } else {
        [tri[0], tri[2], tri[1]]
    };
    Some(ModelFace {
        indices,
        region: Some(region.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_has_twelve_faces() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
    }

    #[test]
    fn test_two_region_cube_tags_every_face() {
        let cube = two_region_cube();
        for face in &cube.faces {
            assert!(face.region.is_some());
        }
    }

    #[test]
    fn test_lobed_shell_counts() {
        let shell = lobed_shell(6, 12, 4);
        assert_eq!(shell.regions.len(), 4);
        assert_eq!(shell.markers.len(), 4);
        assert_eq!(shell.links.len(), 4);
        assert!(!shell.faces.is_empty());
        // Pole rows produce degenerate quads; those triangles are dropped
        assert!(shell.face_count() < (6 * 12 * 2) as usize);
    }

    #[test]
    fn test_demo_model_is_buildable() {
        let desc = demo_model();
        assert!(crate::viewport::mesh::AnatomyMesh::build(&desc).is_ok());
    }
}
