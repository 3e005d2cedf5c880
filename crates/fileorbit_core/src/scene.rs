//! Scene state
//!
//! One `Scene` owns everything that changes while the program runs: the
//! entity batch, the camera orientation, the display settings and the RNG used
//! for orbit axes. Reloads swap the whole entity vector in a single
//! assignment, so a frame never sees a half-built batch.

use std::mem;
use std::path::{Component, Path, PathBuf};
use bitflags::bitflags;
use rand::rngs::StdRng;
use rand::SeedableRng;
use fileorbit_math::{Mat4, Vec3};
use crate::{
    fibonacci_sphere, AxisPolicy, DirectoryEntry, DirectoryLister, EntityRecord, EntryKind,
    ListingError, OrientationState, ViewFilter, PARENT_ENTRY,
};

/// Sphere radius change per key press
pub const RADIUS_STEP: f32 = 0.1;
/// Orbit speed change per key press, in turns per tick
pub const SPEED_STEP: f32 = 0.001;
/// Marker size change per key press
pub const MARKER_STEP: f32 = 0.01;
/// Camera translation per key press
pub const TRANSLATION_STEP: f32 = 0.1;
/// Labels sit this far out along the anchor, relative to the radius
pub const LABEL_OFFSET: f32 = 1.2;

bitflags! {
    /// Optional overlays
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DisplayFlags: u8 {
        /// Entry names next to markers; glyphs are not drawn, the window title shows the selection
        const LABELS = 1 << 0;
        /// Wire sphere of the current radius
        const SPHERE = 1 << 1;
        /// Small cube at the centre
        const CUBE = 1 << 2;
    }
}

/// Numeric scene parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    /// Radius of the sphere markers are placed on
    pub radius: f32,
    /// Edge length of file cubes and radius of directory spheres
    pub marker_size: f32,
    /// Orbit speed in turns per tick
    pub speed: f32,
    /// Camera position relative to the scene centre
    pub translation: Vec3,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            marker_size: 0.1,
            speed: 0.002,
            translation: Vec3::new(0.0, 0.0, -4.0),
        }
    }
}

/// Discrete user commands a scene understands
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneCommand {
    ToggleOrbit,
    GrowRadius,
    ShrinkRadius,
    SpeedUp,
    SlowDown,
    GrowMarkers,
    ShrinkMarkers,
    RerandomizeAxes,
    ToggleAxisPolicy,
    SetViewFilter(ViewFilter),
    DescendSelected,
    SelectNext,
    SelectPrevious,
    ToggleDisplay(DisplayFlags),
    TranslateCamera(Vec3),
}

impl SceneCommand {
    /// Whether applying this command may read a directory
    pub fn needs_listing(&self) -> bool {
        matches!(self, SceneCommand::SetViewFilter(_) | SceneCommand::DescendSelected)
    }
}

/// Per-entity data a renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerView<'a> {
    /// Entity orientation, column-major
    pub rotation: Mat4,
    /// Anchor scaled by the current radius
    pub position: Vec3,
    /// Where the label goes, before the entity rotation is applied
    pub label_position: Vec3,
    pub kind: EntryKind,
    pub selected: bool,
    /// Entry name when labels are shown
    pub label: Option<&'a str>,
    pub size: f32,
}

/// Camera data a renderer needs for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Arcball orientation, column-major
    pub rotation: Mat4,
    pub translation: Vec3,
}

/// The whole visualized state
#[derive(Debug)]
pub struct Scene {
    entities: Vec<EntityRecord>,
    camera: OrientationState,
    settings: SceneSettings,
    axis_policy: AxisPolicy,
    view_filter: ViewFilter,
    display: DisplayFlags,
    orbit_enabled: bool,
    selected: usize,
    current_dir: PathBuf,
    rng: StdRng,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneSettings::default())
    }
}

impl Scene {
    /// Empty scene in the working directory, orbit off, nothing overlaid
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            entities: Vec::new(),
            camera: OrientationState::new(),
            settings,
            axis_policy: AxisPolicy::default(),
            view_filter: ViewFilter::default(),
            display: DisplayFlags::empty(),
            orbit_enabled: false,
            selected: 0,
            current_dir: PathBuf::from("."),
            rng: StdRng::from_entropy(),
        }
    }

    /// Builder: deterministic orbit axes
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_axis_policy(mut self, policy: AxisPolicy) -> Self {
        self.axis_policy = policy;
        self
    }

    pub fn with_view_filter(mut self, filter: ViewFilter) -> Self {
        self.view_filter = filter;
        self
    }

    /// Builder: directory listed by the next [`reload`](Self::reload)
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = dir.into();
        self
    }

    pub fn with_orbit(mut self, enabled: bool) -> Self {
        self.orbit_enabled = enabled;
        self
    }

    pub fn with_display(mut self, display: DisplayFlags) -> Self {
        self.display = display;
        self
    }

    // --- Accessors ---

    #[inline]
    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    #[inline]
    pub fn axis_policy(&self) -> AxisPolicy {
        self.axis_policy
    }

    #[inline]
    pub fn view_filter(&self) -> ViewFilter {
        self.view_filter
    }

    #[inline]
    pub fn display(&self) -> DisplayFlags {
        self.display
    }

    #[inline]
    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    /// Index of the selected entity; meaningless when the scene is empty
    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&EntityRecord> {
        self.entities.get(self.selected)
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Global arcball orientation
    #[inline]
    pub fn camera(&self) -> &OrientationState {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut OrientationState {
        &mut self.camera
    }

    // --- Batch lifecycle ---

    /// Replace every entity with a fresh record per entry
    ///
    /// Anchors come from the golden-angle layout for the new count; axes and
    /// directions are drawn anew and all orientations start at identity.
    pub fn rebuild(&mut self, entries: Vec<DirectoryEntry>) {
        let anchors = fibonacci_sphere(entries.len());
        let policy = self.axis_policy;
        let rng = &mut self.rng;

        let entities: Vec<EntityRecord> = entries
            .into_iter()
            .zip(anchors)
            .map(|(entry, anchor)| EntityRecord::new(entry.name, entry.kind, anchor, policy, &mut *rng))
            .collect();

        self.entities = entities;
        self.selected = 0;
    }

    /// List the current directory and rebuild from it
    ///
    /// On failure the previous batch stays in place.
    pub fn reload(&mut self, lister: &dyn DirectoryLister) -> Result<(), ListingError> {
        let entries = lister.list(&self.current_dir, self.view_filter)?;
        log::info!(
            "Loaded {} entries from {} ({:?})",
            entries.len(),
            self.current_dir.display(),
            self.view_filter
        );
        self.rebuild(entries);
        Ok(())
    }

    /// Draw new axes and directions for every entity, keeping anchors
    pub fn rerandomize_axes(&mut self) {
        let policy = self.axis_policy;
        for entity in &mut self.entities {
            entity.rerandomize(policy, &mut self.rng);
        }
        log::debug!("Re-randomized {} orbit axes ({:?})", self.entities.len(), policy);
    }

    /// Switch between random and tangential axes; takes effect immediately
    pub fn toggle_axis_policy(&mut self) {
        self.axis_policy = self.axis_policy.toggled();
        log::info!("Axis policy: {:?}", self.axis_policy);
        self.rerandomize_axes();
    }

    /// Change the view filter and reload
    ///
    /// The previous filter is restored if the reload fails.
    pub fn set_view_filter(
        &mut self,
        filter: ViewFilter,
        lister: &dyn DirectoryLister,
    ) -> Result<(), ListingError> {
        let previous = mem::replace(&mut self.view_filter, filter);
        if let Err(e) = self.reload(lister) {
            self.view_filter = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Enter the selected directory (or climb out of it for `..`)
    ///
    /// Selecting a file does nothing. If the new directory cannot be listed
    /// the scene stays in the old one.
    pub fn descend_selected(&mut self, lister: &dyn DirectoryLister) -> Result<(), ListingError> {
        let target = match self.selected_entry() {
            Some(entry) if entry.is_directory() => {
                if entry.name == PARENT_ENTRY {
                    parent_dir(&self.current_dir)
                } else {
                    self.current_dir.join(&entry.name)
                }
            }
            _ => return Ok(()),
        };

        let previous = mem::replace(&mut self.current_dir, target);
        if let Err(e) = self.reload(lister) {
            self.current_dir = previous;
            return Err(e);
        }
        Ok(())
    }

    // --- Selection ---

    pub fn select_next(&mut self) {
        if self.entities.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entities.len();
    }

    pub fn select_previous(&mut self) {
        if self.entities.is_empty() {
            return;
        }
        let n = self.entities.len();
        self.selected = (self.selected + n - 1) % n;
    }

    // --- Settings ---

    /// Start or freeze every orbit; frozen angles stay where they are
    pub fn toggle_orbit(&mut self) {
        self.orbit_enabled = !self.orbit_enabled;
    }

    pub fn grow_radius(&mut self) {
        self.settings.radius += RADIUS_STEP;
    }

    pub fn shrink_radius(&mut self) {
        self.settings.radius = (self.settings.radius - RADIUS_STEP).max(0.0);
    }

    pub fn speed_up(&mut self) {
        self.settings.speed += SPEED_STEP;
    }

    pub fn slow_down(&mut self) {
        self.settings.speed = (self.settings.speed - SPEED_STEP).max(0.0);
    }

    pub fn grow_markers(&mut self) {
        self.settings.marker_size += MARKER_STEP;
    }

    pub fn shrink_markers(&mut self) {
        self.settings.marker_size = (self.settings.marker_size - MARKER_STEP).max(0.0);
    }

    pub fn toggle_display(&mut self, flags: DisplayFlags) {
        self.display.toggle(flags);
    }

    pub fn translate_camera(&mut self, delta: Vec3) {
        self.settings.translation += delta;
    }

    /// Apply one discrete command
    ///
    /// Only commands that read a directory can fail.
    pub fn apply(
        &mut self,
        command: SceneCommand,
        lister: &dyn DirectoryLister,
    ) -> Result<(), ListingError> {
        match command {
            SceneCommand::ToggleOrbit => self.toggle_orbit(),
            SceneCommand::GrowRadius => self.grow_radius(),
            SceneCommand::ShrinkRadius => self.shrink_radius(),
            SceneCommand::SpeedUp => self.speed_up(),
            SceneCommand::SlowDown => self.slow_down(),
            SceneCommand::GrowMarkers => self.grow_markers(),
            SceneCommand::ShrinkMarkers => self.shrink_markers(),
            SceneCommand::RerandomizeAxes => self.rerandomize_axes(),
            SceneCommand::ToggleAxisPolicy => self.toggle_axis_policy(),
            SceneCommand::SetViewFilter(filter) => return self.set_view_filter(filter, lister),
            SceneCommand::DescendSelected => return self.descend_selected(lister),
            SceneCommand::SelectNext => self.select_next(),
            SceneCommand::SelectPrevious => self.select_previous(),
            SceneCommand::ToggleDisplay(flags) => self.toggle_display(flags),
            SceneCommand::TranslateCamera(delta) => self.translate_camera(delta),
        }
        Ok(())
    }

    // --- Simulation ---

    /// Advance every orbit by one tick while orbiting is enabled
    pub fn tick(&mut self) {
        if !self.orbit_enabled {
            return;
        }
        let speed = self.settings.speed;
        for entity in &mut self.entities {
            entity.tick(speed);
        }
    }

    // --- Presentation ---

    /// One view per entity, in batch order
    pub fn markers(&self) -> Vec<MarkerView<'_>> {
        let radius = self.settings.radius;
        let show_labels = self.display.contains(DisplayFlags::LABELS);

        self.entities
            .iter()
            .enumerate()
            .map(|(i, entity)| MarkerView {
                rotation: entity.rotation_matrix(),
                position: entity.anchor() * radius,
                label_position: entity.anchor() * (LABEL_OFFSET * radius),
                kind: entity.kind,
                selected: i == self.selected,
                label: show_labels.then_some(entity.name.as_str()),
                size: self.settings.marker_size,
            })
            .collect()
    }

    pub fn camera_view(&self) -> CameraView {
        CameraView {
            rotation: self.camera.rotation_matrix(),
            translation: self.settings.translation,
        }
    }
}

/// Lexical parent; falls back to appending `..` for `.` or a bare root
fn parent_dir(dir: &Path) -> PathBuf {
    match (dir.components().next_back(), dir.parent()) {
        (Some(Component::Normal(_)), Some(parent)) if !parent.as_os_str().is_empty() => {
            parent.to_path_buf()
        }
        _ => dir.join(PARENT_ENTRY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use fileorbit_math::Quaternion;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// In-memory directory tree
    #[derive(Default)]
    struct FakeLister {
        dirs: HashMap<PathBuf, Vec<DirectoryEntry>>,
    }

    impl FakeLister {
        fn with_dir(mut self, path: &str, entries: Vec<DirectoryEntry>) -> Self {
            self.dirs.insert(PathBuf::from(path), entries);
            self
        }
    }

    impl DirectoryLister for FakeLister {
        fn list(&self, dir: &Path, filter: ViewFilter) -> Result<Vec<DirectoryEntry>, ListingError> {
            let entries = self.dirs.get(dir).ok_or_else(|| ListingError::Io {
                path: dir.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })?;
            Ok(entries.iter().filter(|e| filter.admits(e.kind)).cloned().collect())
        }
    }

    fn make_lister() -> FakeLister {
        FakeLister::default()
            .with_dir(
                "/home",
                vec![
                    DirectoryEntry::directory(".."),
                    DirectoryEntry::file("a.txt"),
                    DirectoryEntry::directory("src"),
                    DirectoryEntry::file("b.txt"),
                ],
            )
            .with_dir(
                "/home/src",
                vec![DirectoryEntry::directory(".."), DirectoryEntry::file("main.rs")],
            )
            .with_dir("/", vec![DirectoryEntry::directory("home")])
    }

    fn make_scene() -> Scene {
        let mut scene = Scene::default().with_seed(9).with_directory("/home");
        scene.reload(&make_lister()).unwrap();
        scene
    }

    #[test]
    fn test_defaults() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert!(!scene.orbit_enabled());
        assert_eq!(scene.display(), DisplayFlags::empty());
        assert_eq!(scene.axis_policy(), AxisPolicy::Tangential);
        assert_eq!(scene.view_filter(), ViewFilter::All);
        assert_eq!(scene.settings().translation, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(scene.camera().effective(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_reload_builds_fresh_batch() {
        let scene = make_scene();
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.selected(), 0);

        let anchors = fibonacci_sphere(4);
        for (entity, anchor) in scene.entities().iter().zip(&anchors) {
            assert_eq!(entity.anchor(), *anchor);
            assert_eq!(entity.orientation().effective(), Quaternion::IDENTITY);
            assert_eq!(entity.orbit().angle(), 0.0);
            assert!(!entity.orbit().is_started());
        }
        assert_eq!(scene.entities()[2].name, "src");
        assert!(scene.entities()[2].is_directory());
    }

    #[test]
    fn test_reload_failure_keeps_batch() {
        let mut scene = make_scene().with_directory("/missing");
        assert!(scene.reload(&make_lister()).is_err());
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn test_rebuild_replaces_previous_state() {
        let mut scene = make_scene().with_orbit(true);
        for _ in 0..20 {
            scene.tick();
        }
        scene.select_next();

        scene.rebuild(vec![DirectoryEntry::file("x"), DirectoryEntry::file("y")]);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.selected(), 0);
        for entity in scene.entities() {
            assert_eq!(entity.orientation().effective(), Quaternion::IDENTITY);
            assert_eq!(entity.orbit().angle(), 0.0);
        }
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let mut scene = Scene::default().with_orbit(true);
        scene.rebuild(Vec::new());
        scene.tick();
        scene.select_next();
        scene.select_previous();
        assert_eq!(scene.selected(), 0);
        assert!(scene.markers().is_empty());
        assert!(scene.selected_entry().is_none());
    }

    #[test]
    fn test_tick_only_when_orbiting() {
        let mut scene = make_scene();
        scene.tick();
        assert!(scene.entities().iter().all(|e| !e.orbit().is_started()));

        scene.toggle_orbit();
        scene.tick();
        scene.tick();
        assert!(scene.entities().iter().all(|e| e.orbit().is_started()));

        // Freezing keeps angles in place
        let angles: Vec<f32> = scene.entities().iter().map(|e| e.orbit().angle()).collect();
        scene.toggle_orbit();
        scene.tick();
        let frozen: Vec<f32> = scene.entities().iter().map(|e| e.orbit().angle()).collect();
        assert_eq!(angles, frozen);
    }

    #[test]
    fn test_selection_wraps() {
        let mut scene = make_scene();
        scene.select_previous();
        assert_eq!(scene.selected(), 3);
        scene.select_next();
        assert_eq!(scene.selected(), 0);
        scene.select_next();
        scene.select_next();
        assert_eq!(scene.selected_entry().unwrap().name, "src");
    }

    #[test]
    fn test_descend_into_directory_and_back() {
        let lister = make_lister();
        let mut scene = make_scene();
        scene.select_next();
        scene.select_next();

        scene.descend_selected(&lister).unwrap();
        assert_eq!(scene.current_dir(), Path::new("/home/src"));
        assert_eq!(scene.len(), 2);

        // Selection resets to `..`
        scene.descend_selected(&lister).unwrap();
        assert_eq!(scene.current_dir(), Path::new("/home"));
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn test_descend_into_file_is_noop() {
        let lister = make_lister();
        let mut scene = make_scene();
        scene.select_next();
        assert_eq!(scene.selected_entry().unwrap().kind, EntryKind::File);

        scene.descend_selected(&lister).unwrap();
        assert_eq!(scene.current_dir(), Path::new("/home"));
        assert_eq!(scene.selected(), 1);
    }

    #[test]
    fn test_descend_failure_restores_directory() {
        let lister = FakeLister::default()
            .with_dir("/home", vec![DirectoryEntry::directory("locked")]);
        let mut scene = Scene::default().with_seed(1).with_directory("/home");
        scene.reload(&lister).unwrap();

        assert!(scene.descend_selected(&lister).is_err());
        assert_eq!(scene.current_dir(), Path::new("/home"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_set_view_filter_reloads() {
        let lister = make_lister();
        let mut scene = make_scene();

        scene.set_view_filter(ViewFilter::Files, &lister).unwrap();
        assert_eq!(scene.len(), 2);
        assert!(scene.entities().iter().all(|e| e.kind == EntryKind::File));

        scene.set_view_filter(ViewFilter::Directories, &lister).unwrap();
        assert_eq!(scene.len(), 2);
        assert!(scene.entities().iter().all(|e| e.is_directory()));
    }

    #[test]
    fn test_set_view_filter_failure_restores_filter() {
        let mut scene = Scene::default().with_directory("/missing");
        assert!(scene.set_view_filter(ViewFilter::Files, &make_lister()).is_err());
        assert_eq!(scene.view_filter(), ViewFilter::All);
    }

    #[test]
    fn test_toggle_axis_policy_rerandomizes() {
        let mut scene = make_scene().with_orbit(true);
        scene.tick();
        scene.toggle_axis_policy();

        assert_eq!(scene.axis_policy(), AxisPolicy::Random);
        for entity in scene.entities() {
            assert!(!entity.orbit().is_started());
            assert_eq!(entity.orientation().effective(), Quaternion::IDENTITY);
        }
    }

    #[test]
    fn test_tangential_axes_after_rebuild() {
        let scene = make_scene();
        for entity in scene.entities() {
            assert!(entity.orbit().axis().dot(entity.anchor()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_adjustments_clamp_at_zero() {
        let mut scene = Scene::default();
        for _ in 0..20 {
            scene.shrink_radius();
            scene.slow_down();
            scene.shrink_markers();
        }
        let settings = scene.settings();
        assert_eq!(settings.radius, 0.0);
        assert_eq!(settings.speed, 0.0);
        assert_eq!(settings.marker_size, 0.0);

        scene.grow_radius();
        scene.speed_up();
        scene.grow_markers();
        assert!(approx_eq(scene.settings().radius, RADIUS_STEP));
        assert!(approx_eq(scene.settings().speed, SPEED_STEP));
        assert!(approx_eq(scene.settings().marker_size, MARKER_STEP));
    }

    #[test]
    fn test_apply_commands() {
        let lister = make_lister();
        let mut scene = make_scene();

        scene.apply(SceneCommand::ToggleOrbit, &lister).unwrap();
        assert!(scene.orbit_enabled());

        scene.apply(SceneCommand::ToggleDisplay(DisplayFlags::LABELS), &lister).unwrap();
        assert!(scene.display().contains(DisplayFlags::LABELS));

        scene
            .apply(SceneCommand::TranslateCamera(Vec3::new(0.0, 0.0, TRANSLATION_STEP)), &lister)
            .unwrap();
        assert!(approx_eq(scene.settings().translation.z, -3.9));

        scene.apply(SceneCommand::SetViewFilter(ViewFilter::Files), &lister).unwrap();
        assert_eq!(scene.len(), 2);

        assert!(SceneCommand::DescendSelected.needs_listing());
        assert!(!SceneCommand::GrowRadius.needs_listing());
    }

    #[test]
    fn test_markers_follow_settings() {
        let mut scene = make_scene();
        scene.grow_radius();
        scene.select_next();

        let markers = scene.markers();
        assert_eq!(markers.len(), 4);
        for (marker, entity) in markers.iter().zip(scene.entities()) {
            assert!(approx_eq(marker.position.length(), 1.1));
            assert!(approx_eq(marker.label_position.length(), 1.1 * LABEL_OFFSET));
            assert!(marker.label.is_none());
            assert_eq!(marker.kind, entity.kind);
        }
        assert!(markers[1].selected);
        assert!(!markers[0].selected);

        scene.toggle_display(DisplayFlags::LABELS);
        assert_eq!(scene.markers()[2].label, Some("src"));
    }

    #[test]
    fn test_camera_view() {
        let mut scene = Scene::default();
        scene.camera_mut().begin(Quaternion::IDENTITY);
        scene.camera_mut().drag_to(Quaternion::from_axis_angle(Vec3::Y, 1.0));

        let view = scene.camera_view();
        assert_eq!(view.rotation, scene.camera().rotation_matrix());
        assert_eq!(view.translation, SceneSettings::default().translation);
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("/home/src")), PathBuf::from("/home"));
        assert_eq!(parent_dir(Path::new("/home")), PathBuf::from("/"));
        assert_eq!(parent_dir(Path::new(".")), PathBuf::from("./.."));
        assert_eq!(parent_dir(Path::new("/")), PathBuf::from("/.."));
    }
}
