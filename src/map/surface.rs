use super::{Annotation, LineOverlay, MapScene};
use crate::geometry::Region;

/// A map view the scene is drawn onto.
///
/// The user-location marker belongs to the surface itself;
/// `remove_annotations` must leave it in place.
pub trait MapSurface {
    fn set_region(&mut self, region: Region);
    fn remove_annotations(&mut self);
    fn remove_overlays(&mut self);
    fn add_annotation(&mut self, annotation: Annotation);
    fn add_overlay(&mut self, overlay: LineOverlay);
}

/// Draw a scene onto a surface, replacing whatever it showed before.
///
/// The viewport is only moved when `reframe` is set, so repeated
/// presentations of the same hole keep the player's pan and zoom.
pub fn present(surface: &mut impl MapSurface, scene: &MapScene, reframe: bool) {
    if reframe && let Some(region) = scene.region {
        surface.set_region(region);
    }

    surface.remove_annotations();
    surface.remove_overlays();

    for overlay in &scene.overlays {
        surface.add_overlay(*overlay);
    }
    for annotation in &scene.annotations {
        surface.add_annotation(annotation.clone());
    }
}

/// In-memory surface that keeps what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub region: Option<Region>,
    /// Number of times the viewport was moved
    pub region_updates: usize,
    pub annotations: Vec<Annotation>,
    pub overlays: Vec<LineOverlay>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSurface for RecordingSurface {
    fn set_region(&mut self, region: Region) {
        self.region = Some(region);
        self.region_updates += 1;
    }

    fn remove_annotations(&mut self) {
        self.annotations.clear();
    }

    fn remove_overlays(&mut self) {
        self.overlays.clear();
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    fn add_overlay(&mut self, overlay: LineOverlay) {
        self.overlays.push(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Coordinate, RegionFramer};

    #[test]
    fn test_present_replaces_previous_scene() {
        let user = Coordinate::new(0.0, 0.0);
        let flag = Coordinate::new(0.002, 0.0);
        let region = RegionFramer::default().frame(user, flag);
        let mut surface = RecordingSurface::new();

        let with_spot = MapScene::render(Some(region), user, flag, Some(Coordinate::new(0.001, 0.0)));
        present(&mut surface, &with_spot, true);
        assert_eq!(surface.overlays.len(), 3);
        assert_eq!(surface.annotations.len(), 5);

        let without_spot = MapScene::render(Some(region), user, flag, None);
        present(&mut surface, &without_spot, false);
        assert_eq!(surface.overlays.len(), 1);
        assert_eq!(surface.annotations.len(), 2);
        assert_eq!(surface.region, Some(region));
        assert_eq!(surface.region_updates, 1);
    }

    #[test]
    fn test_present_without_region() {
        let mut surface = RecordingSurface::new();
        let scene = MapScene::render(None, Coordinate::default(), Coordinate::new(1.0, 1.0), None);
        present(&mut surface, &scene, true);
        assert_eq!(surface.region_updates, 0);
        assert_eq!(surface.overlays.len(), 1);
    }
}
