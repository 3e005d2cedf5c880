//! Scene to draw-batch conversion
//!
//! [`FrameBuilder`] reads the camera and marker views of a [`Scene`] and
//! produces a [`Frame`]: uniforms plus instance batches, with no GPU access.
//! The marker chain is `T(camera) · R(camera) · R(entity) · T(anchor) · S(size)`;
//! the first two factors go into the view uniform, the rest into each
//! instance's model matrix.

use fileorbit_core::{DisplayFlags, EntryKind, Scene};
use fileorbit_math::{mat4, Mat4};
use crate::mesh::MeshKind;
use crate::pipeline::{perspective_matrix, FrameUniforms, MarkerInstance, PipelineVariant};

/// Edge length of the centre cube
pub const CENTRE_CUBE_SIZE: f32 = 0.2;

/// Highlight sphere radius relative to the marker size
pub const HIGHLIGHT_SCALE: f32 = 4.0 / 3.0;

/// Colors for each kind of draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub file: [f32; 4],
    pub directory: [f32; 4],
    pub highlight: [f32; 4],
    pub wire: [f32; 4],
    pub cube: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            file: [0.8, 0.8, 0.8, 1.0],
            directory: [0.8, 0.8, 0.8, 1.0],
            highlight: [1.0, 0.0, 1.0, 0.3],
            wire: [1.0, 1.0, 1.0, 1.0],
            cube: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// Instances of one mesh drawn with one pipeline variant
#[derive(Clone, Debug, PartialEq)]
pub struct DrawBatch {
    pub mesh: MeshKind,
    pub variant: PipelineVariant,
    pub instances: Vec<MarkerInstance>,
}

impl DrawBatch {
    pub fn new(mesh: MeshKind, variant: PipelineVariant, instances: Vec<MarkerInstance>) -> Self {
        Self { mesh, variant, instances }
    }

    fn empty(mesh: MeshKind, variant: PipelineVariant) -> Self {
        Self::new(mesh, variant, Vec::new())
    }
}

/// Everything the pipeline needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub uniforms: FrameUniforms,
    /// Solid batches first, then wire, then overlays
    pub batches: Vec<DrawBatch>,
}

impl Frame {
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(|b| b.instances.len()).sum()
    }

    /// Batch drawing `mesh` with `variant`, if any
    pub fn batch(&self, mesh: MeshKind, variant: PipelineVariant) -> Option<&DrawBatch> {
        self.batches.iter().find(|b| b.mesh == mesh && b.variant == variant)
    }
}

/// Converts scene views into frames
#[derive(Clone, Debug)]
pub struct FrameBuilder {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Direction towards the light, in view space
    pub light_dir: [f32; 3],
    pub ambient: f32,
    pub palette: Palette,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 2000.0,
            light_dir: [0.0, 0.0, 1.0],
            ambient: 0.2,
            palette: Palette::default(),
        }
    }
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set projection parameters
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    /// Builder: set lighting parameters
    pub fn with_lighting(mut self, light_dir: [f32; 3], ambient: f32) -> Self {
        self.light_dir = light_dir;
        self.ambient = ambient;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Build the frame for `scene` on a surface of the given aspect ratio
    pub fn build(&self, scene: &Scene, aspect: f32) -> Frame {
        let camera = scene.camera_view();
        let view = mat4::mul(mat4::translation(camera.translation), camera.rotation);

        let uniforms = FrameUniforms {
            view,
            projection: perspective_matrix(self.fov.to_radians(), aspect, self.near, self.far),
            light_dir: self.light_dir,
            ambient: self.ambient,
        };

        let mut cubes = DrawBatch::empty(MeshKind::Cube, PipelineVariant::Solid);
        let mut spheres = DrawBatch::empty(MeshKind::Sphere, PipelineVariant::Solid);
        let mut wire = DrawBatch::empty(MeshKind::WireSphere, PipelineVariant::Wire);
        let mut highlights = DrawBatch::empty(MeshKind::Sphere, PipelineVariant::Overlay);

        let display = scene.display();
        if display.contains(DisplayFlags::CUBE) {
            cubes
                .instances
                .push(MarkerInstance::new(mat4::scale(CENTRE_CUBE_SIZE), self.palette.cube));
        }
        if display.contains(DisplayFlags::SPHERE) {
            wire.instances
                .push(MarkerInstance::new(mat4::scale(scene.settings().radius), self.palette.wire));
        }

        for marker in scene.markers() {
            let placed = mat4::mul(marker.rotation, mat4::translation(marker.position));

            if marker.selected {
                let model = mat4::mul(placed, mat4::scale(marker.size * HIGHLIGHT_SCALE));
                highlights
                    .instances
                    .push(MarkerInstance::new(model, self.palette.highlight));
            }

            let model: Mat4 = mat4::mul(placed, mat4::scale(marker.size));
            match marker.kind {
                EntryKind::File => cubes
                    .instances
                    .push(MarkerInstance::new(model, self.palette.file)),
                EntryKind::Directory => spheres
                    .instances
                    .push(MarkerInstance::new(model, self.palette.directory)),
            }
        }

        Frame {
            uniforms,
            batches: vec![cubes, spheres, wire, highlights],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileorbit_core::{DirectoryEntry, Quaternion, Vec3};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn make_scene() -> Scene {
        let mut scene = Scene::default().with_seed(3);
        scene.rebuild(vec![
            DirectoryEntry::directory(".."),
            DirectoryEntry::file("a.txt"),
            DirectoryEntry::file("b.txt"),
            DirectoryEntry::directory("src"),
        ]);
        scene
    }

    #[test]
    fn test_markers_split_by_kind() {
        let frame = FrameBuilder::new().build(&make_scene(), 1.0);

        let cubes = frame.batch(MeshKind::Cube, PipelineVariant::Solid).unwrap();
        let spheres = frame.batch(MeshKind::Sphere, PipelineVariant::Solid).unwrap();
        assert_eq!(cubes.instances.len(), 2);
        assert_eq!(spheres.instances.len(), 2);

        // One highlight for the selected marker, no overlays switched on
        let highlights = frame.batch(MeshKind::Sphere, PipelineVariant::Overlay).unwrap();
        assert_eq!(highlights.instances.len(), 1);
        assert_eq!(highlights.instances[0].color, Palette::default().highlight);
        assert!(frame.batch(MeshKind::WireSphere, PipelineVariant::Wire).unwrap().instances.is_empty());
        assert_eq!(frame.instance_count(), 5);
    }

    #[test]
    fn test_empty_scene() {
        let frame = FrameBuilder::new().build(&Scene::default(), 1.5);
        assert_eq!(frame.instance_count(), 0);
    }

    #[test]
    fn test_overlays_follow_display_flags() {
        let mut scene = make_scene();
        scene.toggle_display(DisplayFlags::SPHERE | DisplayFlags::CUBE);
        let frame = FrameBuilder::new().build(&scene, 1.0);

        let wire = frame.batch(MeshKind::WireSphere, PipelineVariant::Wire).unwrap();
        assert_eq!(wire.instances.len(), 1);
        assert!(approx_eq(wire.instances[0].model[0][0], scene.settings().radius));

        let cubes = frame.batch(MeshKind::Cube, PipelineVariant::Solid).unwrap();
        assert_eq!(cubes.instances.len(), 3);
        assert!(approx_eq(cubes.instances[0].model[0][0], CENTRE_CUBE_SIZE));
    }

    #[test]
    fn test_batch_order() {
        let frame = FrameBuilder::new().build(&make_scene(), 1.0);
        let variants: Vec<PipelineVariant> = frame.batches.iter().map(|b| b.variant).collect();
        assert_eq!(
            variants,
            vec![
                PipelineVariant::Solid,
                PipelineVariant::Solid,
                PipelineVariant::Wire,
                PipelineVariant::Overlay,
            ]
        );
    }

    #[test]
    fn test_marker_chain_without_rotation() {
        let scene = make_scene();
        let frame = FrameBuilder::new().build(&scene, 1.0);
        let translation = scene.settings().translation;
        let markers = scene.markers();
        let marker = &markers[1];

        let cubes = frame.batch(MeshKind::Cube, PipelineVariant::Solid).unwrap();
        let model = cubes.instances[0].model;
        let centre = mat4::transform_point(mat4::mul(frame.uniforms.view, model), Vec3::ZERO);
        assert!(vec_approx_eq(centre, marker.position + translation), "got {:?}", centre);

        // Marker half-edge scales with the marker size
        let corner = mat4::transform_point(model, Vec3::new(0.5, 0.0, 0.0));
        assert!(approx_eq((corner - marker.position).length(), 0.5 * marker.size));
    }

    #[test]
    fn test_camera_rotation_applies_after_entity() {
        let mut scene = make_scene();
        let quarter = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        scene.camera_mut().begin(Quaternion::IDENTITY);
        scene.camera_mut().drag_to(quarter);

        let frame = FrameBuilder::new().build(&scene, 1.0);
        let markers = scene.markers();
        let marker = &markers[0];
        let spheres = frame.batch(MeshKind::Sphere, PipelineVariant::Solid).unwrap();
        let centre = mat4::transform_point(
            mat4::mul(frame.uniforms.view, spheres.instances[0].model),
            Vec3::ZERO,
        );
        let expected = quarter.rotate(marker.position) + scene.settings().translation;
        assert!(vec_approx_eq(centre, expected), "got {:?} want {:?}", centre, expected);
    }

    #[test]
    fn test_highlight_is_larger() {
        let scene = make_scene();
        let frame = FrameBuilder::new().build(&scene, 1.0);
        let highlight = &frame.batch(MeshKind::Sphere, PipelineVariant::Overlay).unwrap().instances[0];
        let marker = &frame.batch(MeshKind::Sphere, PipelineVariant::Solid).unwrap().instances[0];
        assert!(approx_eq(highlight.model[0][0], marker.model[0][0] * HIGHLIGHT_SCALE));
    }

    #[test]
    fn test_projection_uses_aspect() {
        let builder = FrameBuilder::new().with_projection(90.0, 0.1, 100.0);
        let wide = builder.build(&Scene::default(), 2.0);
        let square = builder.build(&Scene::default(), 1.0);
        assert!(approx_eq(wide.uniforms.projection[0][0] * 2.0, square.uniforms.projection[0][0]));
        assert!(approx_eq(square.uniforms.projection[1][1], 1.0));
    }
}
