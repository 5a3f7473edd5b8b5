use chrono::Utc;

use super::keypad::StrokeCounter;
use super::navigation::HoleNavigator;
use super::summary::RoundSummary;
use crate::config::FramingConfig;
use crate::domain::{Hole, Round};
use crate::geometry::{Coordinate, Region, RegionFramer};
use crate::location::LocationService;
use crate::map::{self, MapScene, MapSurface};
use crate::store::ScoreStore;

/// Discrete input the screen reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenEvent {
    Appear,
    Disappear,
    /// The location service has new fixes to pick up
    LocationChanged,
    MapTapped(Coordinate),
    PreviousHole,
    NextHole,
    KeypadDigit(u8),
    StartHole,
    RecordShot,
    DeleteLastShot,
    RequestFinish,
    ConfirmFinish,
    CancelFinish,
}

/// What the host should do after an event
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEffect {
    None,
    /// Ask the player to confirm finishing the round
    ConfirmFinishPrompt,
    NavigateToSummary(RoundSummary),
}

/// Banner content for the hole being played
#[derive(Debug, Clone, PartialEq)]
pub struct HolePanel {
    pub number: u16,
    pub par: u8,
    pub distance_to_flag: i64,
    pub strokes: u32,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    NoHoles { next_hole_number: usize },
    AwaitingLocation,
    Playing(HolePanel),
    Finished(RoundSummary),
}

/// Scorecard for one round.
///
/// Owns the store and location handles it was built with. All state
/// changes happen through [`ScorecardScreen::handle`]; the map content is
/// derived from that state on demand by [`ScorecardScreen::scene`].
///
/// The map viewport is framed once per hole, on the first fix after the hole
/// became current, and stays put while further fixes stream in.
pub struct ScorecardScreen<S, L> {
    store: S,
    location: L,
    round: Round,
    holes: Vec<Hole>,
    navigator: HoleNavigator,
    strokes: StrokeCounter,
    framer: RegionFramer,
    region: Option<Region>,
    region_set: bool,
    /// Region was recomputed and not yet pushed to a surface
    reframe_pending: bool,
    user_location: Option<Coordinate>,
    flag_location: Option<Coordinate>,
    selected_spot: Option<Coordinate>,
    finish_prompt: bool,
    finished: bool,
}

impl<S: ScoreStore, L: LocationService> ScorecardScreen<S, L> {
    pub fn new(store: S, location: L, round: Round, framing: &FramingConfig) -> Self {
        Self {
            store,
            location,
            round,
            holes: Vec::new(),
            navigator: HoleNavigator::default(),
            strokes: StrokeCounter::new(),
            framer: RegionFramer::new(framing),
            region: None,
            region_set: false,
            reframe_pending: false,
            user_location: None,
            flag_location: None,
            selected_spot: None,
            finish_prompt: false,
            finished: false,
        }
    }

    pub fn handle(&mut self, event: ScreenEvent) -> ScreenEffect {
        if self.finished && event != ScreenEvent::Disappear {
            tracing::debug!(?event, "round finished, ignoring event");
            return ScreenEffect::None;
        }

        match event {
            ScreenEvent::Appear => self.appear(),
            ScreenEvent::Disappear => self.location.stop_heading_updates(),
            ScreenEvent::LocationChanged => {
                if self.location.poll() {
                    self.update_locations();
                }
            }
            ScreenEvent::MapTapped(coordinate) => {
                if self.current_hole().is_some() {
                    self.selected_spot = Some(coordinate);
                }
            }
            ScreenEvent::PreviousHole => {
                if self.navigator.previous() {
                    self.hole_changed();
                }
            }
            ScreenEvent::NextHole => {
                if self.navigator.next() {
                    self.hole_changed();
                }
            }
            ScreenEvent::KeypadDigit(digit) => {
                if let Err(e) = self.strokes.press(digit) {
                    tracing::warn!("{}", e);
                }
            }
            ScreenEvent::StartHole => self.start_hole(),
            ScreenEvent::RecordShot => self.record_shot(),
            ScreenEvent::DeleteLastShot => self.delete_last_shot(),
            ScreenEvent::RequestFinish => {
                self.finish_prompt = true;
                return ScreenEffect::ConfirmFinishPrompt;
            }
            ScreenEvent::ConfirmFinish => {
                if self.finish_prompt {
                    self.finish_prompt = false;
                    return ScreenEffect::NavigateToSummary(self.finish());
                }
            }
            ScreenEvent::CancelFinish => self.finish_prompt = false,
        }
        ScreenEffect::None
    }

    /// Pick up pending location fixes without going through an event
    pub fn pump_location(&mut self) -> bool {
        let changed = self.location.poll();
        if changed && !self.finished {
            self.update_locations();
        }
        changed
    }

    pub fn title(&self) -> &str {
        self.round.title()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn current_hole(&self) -> Option<&Hole> {
        self.holes.get(self.navigator.index())
    }

    pub fn current_index(&self) -> usize {
        self.navigator.index()
    }

    pub fn stroke_count(&self) -> u32 {
        self.strokes.count()
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn is_region_set(&self) -> bool {
        self.region_set
    }

    pub fn selected_spot(&self) -> Option<Coordinate> {
        self.selected_spot
    }

    pub fn is_finish_prompt_shown(&self) -> bool {
        self.finish_prompt
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn view(&self) -> ScreenView {
        if self.finished {
            return ScreenView::Finished(self.summary());
        }

        let Some(hole) = self.current_hole() else {
            return ScreenView::NoHoles {
                next_hole_number: self.navigator.next_hole_number(),
            };
        };
        let Some(current) = self.location.current_location() else {
            return ScreenView::AwaitingLocation;
        };

        ScreenView::Playing(HolePanel {
            number: hole.number,
            par: hole.par,
            distance_to_flag: current.whole_meters_to(&hole.flag),
            strokes: self.strokes.count(),
            can_go_previous: self.navigator.can_go_previous(),
            can_go_next: self.navigator.can_go_next(),
        })
    }

    /// Map content for the current hole; `None` until both a hole and a fix exist
    pub fn scene(&self) -> Option<MapScene> {
        self.current_hole()?;
        let user = self.user_location?;
        let flag = self.flag_location?;
        Some(MapScene::render(self.region, user, flag, self.selected_spot))
    }

    /// Draw the current scene, moving the viewport only after a re-frame
    pub fn present(&mut self, surface: &mut impl MapSurface) {
        if let Some(scene) = self.scene() {
            map::present(surface, &scene, self.reframe_pending);
            self.reframe_pending = false;
        }
    }

    pub fn summary(&self) -> RoundSummary {
        match RoundSummary::collect(&self.store, &self.round) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Failed to load round summary: {}", e);
                RoundSummary::from_holes(&self.round, &self.holes)
            }
        }
    }

    fn appear(&mut self) {
        self.fetch_holes();
        self.location.start_updates();
        self.location.poll();
        self.region_set = false;
        self.update_locations();
    }

    fn hole_changed(&mut self) {
        tracing::debug!(index = self.navigator.index(), "hole changed");
        self.strokes.reset();
        self.region_set = false;
        self.selected_spot = None;
        self.update_locations();
    }

    fn update_locations(&mut self) {
        let Some(flag) = self.current_hole().map(|h| h.flag) else {
            return;
        };
        let Some(user) = self.location.current_location() else {
            return;
        };

        self.user_location = Some(user);
        self.flag_location = Some(flag);

        if !self.region_set {
            self.region = Some(self.framer.frame(user, flag));
            self.region_set = true;
            self.reframe_pending = true;
        }
    }

    fn fetch_holes(&mut self) {
        match self.store.fetch_holes(self.round.id) {
            Ok(holes) => {
                tracing::info!("Fetched holes count: {}", holes.len());
                self.navigator.set_hole_count(holes.len());
                self.holes = holes;
            }
            Err(e) => tracing::error!("Failed to fetch holes: {}", e),
        }
    }

    fn save(&mut self) -> bool {
        match self.store.save() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to save store: {}", e);
                false
            }
        }
    }

    fn start_hole(&mut self) {
        if self.navigator.has_holes() {
            return;
        }

        let number = match u16::try_from(self.navigator.next_hole_number()) {
            Ok(n) => n,
            Err(_) => {
                tracing::error!("Hole number out of range");
                return;
            }
        };
        match self.store.create_hole(self.round.id, number) {
            Ok(hole) => {
                tracing::info!(hole = hole.number, "hole started");
                self.save();
                self.fetch_holes();
                self.update_locations();
            }
            Err(e) => tracing::error!("Failed to start hole {}: {}", number, e),
        }
    }

    fn record_shot(&mut self) {
        let Some(hole) = self.current_hole().map(|h| h.id) else {
            return;
        };
        let Some(at) = self.location.current_location() else {
            tracing::warn!("No location fix, shot not recorded");
            return;
        };

        match self.store.create_shot(hole, at, Utc::now()) {
            Ok(_) => {
                if self.save() {
                    tracing::info!("Shot recorded with location. Store saved.");
                }
                self.fetch_holes();
            }
            Err(e) => tracing::error!("Failed to record shot: {}", e),
        }
    }

    fn delete_last_shot(&mut self) {
        let Some(hole) = self.current_hole().map(|h| h.id) else {
            return;
        };

        match self.store.delete_most_recent_shot(hole) {
            Ok(Some(_)) => {
                if self.save() {
                    tracing::info!("Last shot deleted. Store saved.");
                }
                self.fetch_holes();
            }
            Ok(None) => tracing::debug!("No shot to delete"),
            Err(e) => tracing::error!("Failed to delete last shot: {}", e),
        }
    }

    fn finish(&mut self) -> RoundSummary {
        self.round.completed = true;
        self.finished = true;

        match self.store.mark_completed(self.round.id) {
            Ok(()) => {
                if self.save() {
                    tracing::info!("Round completed and saved successfully");
                }
            }
            Err(e) => tracing::error!("Error saving the round end: {}", e),
        }

        self.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HoleId, RoundId, Shot};
    use crate::location::{LocationFeed, LocationSender};
    use crate::map::{FLAG_TITLE, RecordingSurface, SELECTED_SPOT_TITLE};
    use crate::store::{MemoryStore, StoreError};
    use chrono::DateTime;

    const TEE: Coordinate = Coordinate {
        latitude: 36.5680,
        longitude: -121.9500,
    };
    const FLAG_ONE: Coordinate = Coordinate {
        latitude: 36.5710,
        longitude: -121.9480,
    };
    const FLAG_TWO: Coordinate = Coordinate {
        latitude: 36.5600,
        longitude: -121.9400,
    };

    type Screen = ScorecardScreen<MemoryStore, LocationFeed>;

    fn setup(flags: &[Coordinate]) -> (Screen, LocationSender) {
        let mut store = MemoryStore::new();
        let round = store.create_round(Some("Pebble Beach".to_string())).unwrap();
        for (i, flag) in flags.iter().enumerate() {
            let hole = store.create_hole(round.id, i as u16 + 1).unwrap();
            store
                .update_hole(&hole.with_details(4, *flag))
                .unwrap();
        }
        let (tx, feed) = LocationFeed::channel();
        let screen = ScorecardScreen::new(store, feed, round, &FramingConfig::default());
        (screen, tx)
    }

    fn fix(screen: &mut Screen, tx: &LocationSender, at: Coordinate) {
        tx.send(at);
        screen.handle(ScreenEvent::LocationChanged);
    }

    #[test]
    fn test_views_before_playing() {
        let (mut screen, tx) = setup(&[]);
        screen.handle(ScreenEvent::Appear);
        assert_eq!(
            screen.view(),
            ScreenView::NoHoles {
                next_hole_number: 1
            }
        );
        assert_eq!(screen.title(), "Pebble Beach");

        screen.handle(ScreenEvent::StartHole);
        assert_eq!(screen.holes().len(), 1);
        assert_eq!(screen.view(), ScreenView::AwaitingLocation);

        fix(&mut screen, &tx, TEE);
        assert!(matches!(screen.view(), ScreenView::Playing(_)));
    }

    #[test]
    fn test_start_hole_only_without_holes() {
        let (mut screen, _tx) = setup(&[FLAG_ONE]);
        screen.handle(ScreenEvent::Appear);
        screen.handle(ScreenEvent::StartHole);
        assert_eq!(screen.holes().len(), 1);
    }

    #[test]
    fn test_first_fix_frames_region() {
        let (mut screen, tx) = setup(&[FLAG_ONE]);
        screen.handle(ScreenEvent::Appear);
        assert!(!screen.is_region_set());
        assert!(screen.scene().is_none());

        fix(&mut screen, &tx, TEE);
        let region = screen.region().unwrap();
        assert!(screen.is_region_set());
        assert_eq!(region.center, TEE.midpoint(&FLAG_ONE));
    }

    #[test]
    fn test_later_fixes_do_not_reframe() {
        let (mut screen, tx) = setup(&[FLAG_ONE]);
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);
        let framed = screen.region();

        let walked = Coordinate::new(36.5695, -121.9490);
        fix(&mut screen, &tx, walked);
        assert_eq!(screen.region(), framed);

        // overlays still follow the player
        let scene = screen.scene().unwrap();
        assert_eq!(scene.overlays[0].from, walked);
    }

    #[test]
    fn test_navigation_resets_hole_state() {
        let (mut screen, tx) = setup(&[FLAG_ONE, FLAG_TWO]);
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);
        screen.handle(ScreenEvent::KeypadDigit(5));
        screen.handle(ScreenEvent::MapTapped(Coordinate::new(36.569, -121.949)));
        assert_eq!(screen.scene().unwrap().overlays.len(), 3);

        screen.handle(ScreenEvent::NextHole);
        assert_eq!(screen.current_index(), 1);
        assert_eq!(screen.stroke_count(), 0);
        assert_eq!(screen.selected_spot(), None);

        let scene = screen.scene().unwrap();
        assert_eq!(scene.overlays.len(), 1);
        assert_eq!(scene.region.unwrap().center, TEE.midpoint(&FLAG_TWO));
        assert!(
            scene
                .annotations
                .iter()
                .all(|a| a.title != SELECTED_SPOT_TITLE)
        );
    }

    #[test]
    fn test_boundaries_are_noops() {
        let (mut screen, tx) = setup(&[FLAG_ONE, FLAG_TWO]);
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);
        screen.handle(ScreenEvent::KeypadDigit(4));
        let spot = Coordinate::new(36.569, -121.949);
        screen.handle(ScreenEvent::MapTapped(spot));
        let region = screen.region();

        screen.handle(ScreenEvent::PreviousHole);
        assert_eq!(screen.current_index(), 0);
        assert_eq!(screen.stroke_count(), 4);
        assert_eq!(screen.selected_spot(), Some(spot));
        assert_eq!(screen.region(), region);

        screen.handle(ScreenEvent::NextHole);
        screen.handle(ScreenEvent::KeypadDigit(6));
        screen.handle(ScreenEvent::NextHole);
        assert_eq!(screen.current_index(), 1);
        assert_eq!(screen.stroke_count(), 6);
    }

    #[test]
    fn test_hole_panel() {
        let (mut screen, tx) = setup(&[FLAG_ONE, FLAG_TWO]);
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);
        for digit in [0, 1, 2] {
            screen.handle(ScreenEvent::KeypadDigit(digit));
        }

        let ScreenView::Playing(panel) = screen.view() else {
            panic!("expected playing view");
        };
        assert_eq!(panel.number, 1);
        assert_eq!(panel.par, 4);
        assert_eq!(panel.strokes, 12);
        assert_eq!(panel.distance_to_flag, TEE.whole_meters_to(&FLAG_ONE));
        assert!(!panel.can_go_previous);
        assert!(panel.can_go_next);
    }

    #[test]
    fn test_present_moves_viewport_once_per_hole() {
        let (mut screen, tx) = setup(&[FLAG_ONE, FLAG_TWO]);
        let mut surface = RecordingSurface::new();
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);

        screen.present(&mut surface);
        fix(&mut screen, &tx, Coordinate::new(36.5690, -121.9490));
        screen.present(&mut surface);
        assert_eq!(surface.region_updates, 1);
        assert_eq!(surface.annotations[0].title, FLAG_TITLE);

        screen.handle(ScreenEvent::NextHole);
        screen.present(&mut surface);
        assert_eq!(surface.region_updates, 2);
        assert_eq!(surface.annotations[0].coordinate, FLAG_TWO);
    }

    #[test]
    fn test_record_and_delete_shots() {
        let (mut screen, tx) = setup(&[FLAG_ONE]);
        screen.handle(ScreenEvent::Appear);

        screen.handle(ScreenEvent::RecordShot);
        let hole = screen.current_hole().unwrap().id;
        assert!(screen.store().fetch_shots(hole).unwrap().is_empty());

        fix(&mut screen, &tx, TEE);
        screen.handle(ScreenEvent::RecordShot);
        fix(&mut screen, &tx, Coordinate::new(36.5700, -121.9490));
        screen.handle(ScreenEvent::RecordShot);
        assert_eq!(screen.store().fetch_shots(hole).unwrap().len(), 2);

        screen.handle(ScreenEvent::DeleteLastShot);
        let shots = screen.store().fetch_shots(hole).unwrap();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].coordinate, TEE);

        screen.handle(ScreenEvent::DeleteLastShot);
        screen.handle(ScreenEvent::DeleteLastShot);
        assert!(screen.store().fetch_shots(hole).unwrap().is_empty());
    }

    #[test]
    fn test_finish_flow() {
        let (mut screen, tx) = setup(&[FLAG_ONE]);
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);

        assert_eq!(screen.handle(ScreenEvent::ConfirmFinish), ScreenEffect::None);
        assert!(!screen.is_finished());

        assert_eq!(
            screen.handle(ScreenEvent::RequestFinish),
            ScreenEffect::ConfirmFinishPrompt
        );
        screen.handle(ScreenEvent::CancelFinish);
        assert!(!screen.is_finish_prompt_shown());
        assert_eq!(screen.handle(ScreenEvent::ConfirmFinish), ScreenEffect::None);

        screen.handle(ScreenEvent::RequestFinish);
        let ScreenEffect::NavigateToSummary(summary) = screen.handle(ScreenEvent::ConfirmFinish)
        else {
            panic!("expected navigation to summary");
        };
        assert!(summary.completed);
        assert_eq!(summary.course, "Pebble Beach");
        assert!(screen.store().fetch_round(screen.round().id).unwrap().completed);

        // nothing undoes a finished round
        screen.handle(ScreenEvent::KeypadDigit(3));
        assert_eq!(screen.stroke_count(), 0);
        assert!(matches!(screen.view(), ScreenView::Finished(_)));
    }

    #[test]
    fn test_disappear_stops_updates() {
        let (mut screen, tx) = setup(&[FLAG_ONE]);
        screen.handle(ScreenEvent::Appear);
        fix(&mut screen, &tx, TEE);
        screen.handle(ScreenEvent::Disappear);

        tx.send(Coordinate::new(36.0, -121.0));
        assert!(!screen.pump_location());
        assert_eq!(screen.scene().unwrap().overlays[0].from, TEE);
    }

    /// Store whose writes always fail
    struct BrokenStore {
        inner: MemoryStore,
    }

    fn io_error() -> StoreError {
        StoreError::Io {
            path: "broken.json".into(),
            source: std::io::Error::other("disk full"),
        }
    }

    impl ScoreStore for BrokenStore {
        fn fetch_rounds(&self) -> crate::store::Result<Vec<Round>> {
            self.inner.fetch_rounds()
        }
        fn fetch_round(&self, round: RoundId) -> crate::store::Result<Round> {
            self.inner.fetch_round(round)
        }
        fn create_round(&mut self, _: Option<String>) -> crate::store::Result<Round> {
            Err(io_error())
        }
        fn mark_completed(&mut self, _: RoundId) -> crate::store::Result<()> {
            Err(io_error())
        }
        fn fetch_holes(&self, round: RoundId) -> crate::store::Result<Vec<Hole>> {
            self.inner.fetch_holes(round)
        }
        fn create_hole(&mut self, _: RoundId, _: u16) -> crate::store::Result<Hole> {
            Err(io_error())
        }
        fn update_hole(&mut self, _: &Hole) -> crate::store::Result<()> {
            Err(io_error())
        }
        fn fetch_shots(&self, hole: HoleId) -> crate::store::Result<Vec<Shot>> {
            self.inner.fetch_shots(hole)
        }
        fn create_shot(
            &mut self,
            _: HoleId,
            _: Coordinate,
            _: DateTime<Utc>,
        ) -> crate::store::Result<Shot> {
            Err(io_error())
        }
        fn delete_most_recent_shot(&mut self, _: HoleId) -> crate::store::Result<Option<Shot>> {
            Err(io_error())
        }
        fn save(&mut self) -> crate::store::Result<()> {
            Err(io_error())
        }
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut inner = MemoryStore::new();
        let round = inner.create_round(None).unwrap();
        let (tx, feed) = LocationFeed::channel();
        let mut screen = ScorecardScreen::new(
            BrokenStore { inner },
            feed,
            round,
            &FramingConfig::default(),
        );

        screen.handle(ScreenEvent::Appear);
        screen.handle(ScreenEvent::StartHole);
        assert!(screen.holes().is_empty());
        assert_eq!(
            screen.view(),
            ScreenView::NoHoles {
                next_hole_number: 1
            }
        );

        tx.send(TEE);
        screen.handle(ScreenEvent::LocationChanged);
        screen.handle(ScreenEvent::RecordShot);
        screen.handle(ScreenEvent::DeleteLastShot);

        screen.handle(ScreenEvent::RequestFinish);
        let effect = screen.handle(ScreenEvent::ConfirmFinish);
        assert!(matches!(effect, ScreenEffect::NavigateToSummary(_)));
        assert!(screen.round().completed);
        assert!(screen.is_finished());
    }
}
