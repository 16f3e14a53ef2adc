use crate::engine::camera::{OrbitControls, PerspectiveCamera};
use crate::engine::core::settings::ViewerSettings;
use crate::engine::error::ViewerError;
use crate::engine::loading::bounds::ModelBounds;
use crate::engine::session::debounce::DebouncedTrigger;
use crate::engine::session::host::{
    Clock, FrameRequest, LoadTicket, ResizeSubscription, SceneGraph, Surface, ViewerHost,
    ViewportSource,
};
use bevy::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Snapshot reported to the overlay and the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerStatus {
    pub state: SessionPhase,
    pub initialized: bool,
    pub loading: bool,
    pub playing: bool,
}

/// One mounted instantiation of the 3D scene and every handle it owns.
///
/// Construction is lazy: nothing exists until the first `activate` (or
/// `toggle`). The render loop is only scheduled once the model has loaded
/// and is always cancelled by `dispose` or a failed load.
#[derive(Resource)]
pub struct ViewerSession {
    settings: ViewerSettings,
    phase: SessionPhase,
    playing: bool,
    next_ticket: u64,
    pending_load: Option<LoadTicket>,
    pending_frame: Option<FrameRequest>,
    resize_subscription: Option<ResizeSubscription>,
    resize_debounce: DebouncedTrigger<UVec2>,
    camera: Option<PerspectiveCamera>,
    controls: Option<OrbitControls>,
    scene_built: bool,
    surface_attached: bool,
    model_offset: Option<Vec3>,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl ViewerSession {
    pub fn new(settings: ViewerSettings) -> Self {
        let resize_debounce = DebouncedTrigger::new(settings.resize_debounce());
        Self {
            settings,
            phase: SessionPhase::Idle,
            playing: false,
            next_ticket: 0,
            pending_load: None,
            pending_frame: None,
            resize_subscription: None,
            resize_debounce,
            camera: None,
            controls: None,
            scene_built: false,
            surface_attached: false,
            model_offset: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn status(&self) -> ViewerStatus {
        ViewerStatus {
            state: self.phase,
            initialized: self.is_initialized(),
            loading: self.is_loading(),
            playing: self.playing,
        }
    }

    #[cfg(test)]
    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.camera.as_ref()
    }

    #[cfg(test)]
    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    /// Input handlers go through here; the controls ignore input while disabled.
    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    /// Offset applied to the model to centre it, once loaded.
    #[cfg(test)]
    pub fn model_offset(&self) -> Option<Vec3> {
        self.model_offset
    }

    #[cfg(test)]
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Replace the settings used by the next activation.
    pub fn configure(&mut self, settings: ViewerSettings) -> Result<(), ViewerError> {
        if self.phase != SessionPhase::Idle {
            return Err(ViewerError::NotIdle);
        }
        self.resize_debounce = DebouncedTrigger::new(settings.resize_debounce());
        self.settings = settings;
        Ok(())
    }

    /// Build the scene and start loading the model. No-op unless idle.
    ///
    /// Returns whether construction happened.
    pub fn activate(&mut self, host: &mut impl ViewerHost) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        let Some(size) = host.container_size() else {
            warn!("Viewer activation skipped: {}", ViewerError::MissingContainer);
            return false;
        };

        host.build_scene(&self.settings.lighting);
        self.scene_built = true;

        host.attach_surface(size, self.settings.lighting.background_colour());
        self.surface_attached = true;

        let camera = PerspectiveCamera::new(&self.settings.camera, size);
        let mut controls = OrbitControls::new(self.settings.orbit.clone(), &camera);
        controls.enabled = self.playing;
        self.camera = Some(camera);
        self.controls = Some(controls);

        self.resize_subscription = Some(host.subscribe_resize());

        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.pending_load = Some(ticket);
        host.load_model(&self.settings.model_path, ticket);

        self.phase = SessionPhase::Loading;
        info!(
            "Viewer activated at {}x{}, loading {}",
            size.x, size.y, self.settings.model_path
        );
        true
    }

    /// Flip play/pause, activating first when nothing has been built yet.
    ///
    /// Pausing only disables input; the render loop keeps running.
    pub fn toggle(&mut self, host: &mut impl ViewerHost) {
        if self.phase == SessionPhase::Idle {
            self.activate(host);
        }
        self.playing = !self.playing;
        if let Some(controls) = self.controls.as_mut() {
            controls.enabled = self.playing;
        }
        debug!("Viewer playing: {}", self.playing);
    }

    /// Deliver the outcome of the load started by `activate`.
    ///
    /// Outcomes for any other ticket (a previous attempt, or a load that
    /// finished after `dispose`) are dropped.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ModelBounds, ViewerError>,
        host: &mut impl ViewerHost,
    ) {
        if self.pending_load != Some(ticket) {
            debug!("Ignoring stale model load {:?}", ticket);
            return;
        }
        self.pending_load = None;

        match result {
            Ok(bounds) => {
                let offset = -bounds.center();
                host.place_model(offset);
                self.model_offset = Some(offset);
                self.phase = SessionPhase::Ready;
                self.pending_frame = Some(host.request_frame());
                info!(
                    "Model loaded ({:.2} x {:.2} x {:.2}), render loop started",
                    bounds.size().x,
                    bounds.size().y,
                    bounds.size().z
                );
            }
            Err(error) => {
                error!("Error loading model: {}", error);
                self.release(host);
                self.phase = SessionPhase::Idle;
            }
        }
    }

    /// One render-loop iteration: advance damping, present, schedule the next frame.
    pub fn run_frame(&mut self, request: FrameRequest, host: &mut impl ViewerHost) {
        if self.pending_frame != Some(request) {
            return;
        }
        self.pending_frame = None;
        if self.phase != SessionPhase::Ready {
            return;
        }

        if let Some(camera) = self.camera.as_mut() {
            if let Some(controls) = self.controls.as_mut() {
                controls.update(camera);
            }
            host.present(camera);
        }
        self.pending_frame = Some(host.request_frame());
    }

    /// Container resize notification; applied after the debounce window.
    pub fn notify_resize(&mut self, host: &mut impl ViewerHost) {
        if self.resize_subscription.is_none() {
            return;
        }
        let Some(size) = host.container_size() else {
            return;
        };
        self.resize_debounce.fire(host.now(), size);
    }

    /// Run any timer whose deadline has passed.
    pub fn poll_timers(&mut self, host: &mut impl ViewerHost) {
        let Some(size) = self.resize_debounce.poll(host.now()) else {
            return;
        };
        if !self.surface_attached {
            return;
        }
        host.resize_surface(size);
        if let Some(camera) = self.camera.as_mut() {
            camera.set_viewport(size);
        }
        debug!("Viewer resized to {}x{}", size.x, size.y);
    }

    /// Release everything the session owns and return to idle.
    pub fn dispose(&mut self, host: &mut impl ViewerHost) {
        if self.phase == SessionPhase::Idle && !self.scene_built {
            return;
        }
        self.pending_load = None;
        self.release(host);
        self.phase = SessionPhase::Idle;
        self.playing = false;
        info!("Viewer disposed");
    }

    fn release(&mut self, host: &mut impl ViewerHost) {
        if let Some(subscription) = self.resize_subscription.take() {
            host.unsubscribe_resize(subscription);
        }
        self.resize_debounce.cancel();
        if let Some(request) = self.pending_frame.take() {
            host.cancel_frame(request);
        }
        if self.surface_attached {
            host.detach_surface();
            self.surface_attached = false;
        }
        self.controls = None;
        self.camera = None;
        if self.scene_built {
            host.clear_scene();
            self.scene_built = false;
        }
        self.model_offset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::LightingRig;
    use std::collections::HashSet;
    use std::time::Duration;

    /// Records every capability call so tests can count live resources.
    #[derive(Default)]
    struct RecordingHost {
        now: Duration,
        container: Option<UVec2>,
        next_id: u64,
        pending_frames: HashSet<u64>,
        listeners: HashSet<u64>,
        scenes_built: usize,
        scenes_cleared: usize,
        lights_spawned: usize,
        surfaces_attached: usize,
        surfaces_detached: usize,
        surface_resizes: Vec<UVec2>,
        presents: usize,
        loads: Vec<(String, LoadTicket)>,
        placements: Vec<Vec3>,
    }

    impl RecordingHost {
        fn mounted() -> Self {
            Self {
                container: Some(UVec2::new(800, 500)),
                ..default()
            }
        }

        fn live_scenes(&self) -> usize {
            self.scenes_built - self.scenes_cleared
        }

        fn live_surfaces(&self) -> usize {
            self.surfaces_attached - self.surfaces_detached
        }

        fn last_ticket(&self) -> LoadTicket {
            self.loads.last().map(|(_, ticket)| *ticket).unwrap()
        }

        fn pending_frame(&self) -> FrameRequest {
            FrameRequest(*self.pending_frames.iter().next().unwrap())
        }

        fn advance(&mut self, millis: u64) {
            self.now += Duration::from_millis(millis);
        }

        fn next(&mut self) -> u64 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl Clock for RecordingHost {
        fn now(&self) -> Duration {
            self.now
        }

        fn request_frame(&mut self) -> FrameRequest {
            let id = self.next();
            self.pending_frames.insert(id);
            FrameRequest(id)
        }

        fn cancel_frame(&mut self, request: FrameRequest) {
            self.pending_frames.remove(&request.0);
        }
    }

    impl ViewportSource for RecordingHost {
        fn container_size(&self) -> Option<UVec2> {
            self.container
        }

        fn subscribe_resize(&mut self) -> ResizeSubscription {
            let id = self.next();
            self.listeners.insert(id);
            ResizeSubscription(id)
        }

        fn unsubscribe_resize(&mut self, subscription: ResizeSubscription) {
            self.listeners.remove(&subscription.0);
        }
    }

    impl Surface for RecordingHost {
        fn attach_surface(&mut self, _size: UVec2, _clear_colour: Color) {
            self.surfaces_attached += 1;
        }

        fn resize_surface(&mut self, size: UVec2) {
            self.surface_resizes.push(size);
        }

        fn present(&mut self, _camera: &PerspectiveCamera) {
            self.presents += 1;
        }

        fn detach_surface(&mut self) {
            self.surfaces_detached += 1;
        }
    }

    impl SceneGraph for RecordingHost {
        fn build_scene(&mut self, lighting: &LightingRig) {
            self.scenes_built += 1;
            self.lights_spawned += lighting.light_count();
        }

        fn load_model(&mut self, path: &str, ticket: LoadTicket) {
            self.loads.push((path.to_string(), ticket));
        }

        fn place_model(&mut self, offset: Vec3) {
            self.placements.push(offset);
        }

        fn clear_scene(&mut self) {
            self.scenes_cleared += 1;
        }
    }

    /// Pretend frame loop: consume the pending request and run it.
    fn tick(session: &mut ViewerSession, host: &mut RecordingHost) {
        let request = host.pending_frame();
        host.pending_frames.remove(&request.0);
        session.run_frame(request, host);
    }

    fn off_centre_bounds() -> ModelBounds {
        ModelBounds::from_min_max(Vec3::new(2.0, -1.0, 5.0), Vec3::new(6.0, 3.0, 9.0))
    }

    fn load_failure() -> ViewerError {
        ViewerError::AssetLoad {
            path: "models/model.glb".to_string(),
            reason: "404".to_string(),
        }
    }

    #[test]
    fn repeated_activation_builds_once() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();

        assert!(session.activate(&mut host));
        assert!(!session.activate(&mut host));

        assert_eq!(host.scenes_built, 1);
        assert_eq!(host.surfaces_attached, 1);
        assert_eq!(host.lights_spawned, 3);
        assert_eq!(host.loads.len(), 1);
        assert_eq!(host.loads[0].0, "models/model.glb");
        assert!(session.is_loading());
    }

    #[test]
    fn loaded_model_is_centred_on_origin() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.activate(&mut host);

        let bounds = off_centre_bounds();
        session.complete_load(host.last_ticket(), Ok(bounds), &mut host);

        assert!(session.is_initialized());
        let offset = host.placements[0];
        let centred = (bounds.min + offset + bounds.max + offset) * 0.5;
        assert!(centred.length() < 1e-5);
        assert_eq!(session.model_offset(), Some(offset));
    }

    #[test]
    fn render_loop_starts_only_after_load() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.activate(&mut host);
        assert!(host.pending_frames.is_empty());

        session.complete_load(host.last_ticket(), Ok(off_centre_bounds()), &mut host);
        assert_eq!(host.pending_frames.len(), 1);

        for _ in 0..5 {
            tick(&mut session, &mut host);
        }
        assert_eq!(host.presents, 5);
        assert_eq!(host.pending_frames.len(), 1);
    }

    #[test]
    fn toggle_from_idle_activates_once_and_plays() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();

        session.toggle(&mut host);

        assert_eq!(host.scenes_built, 1);
        assert_eq!(host.loads.len(), 1);
        assert!(session.is_playing());
        assert!(session.controls().unwrap().enabled);
    }

    #[test]
    fn pause_disables_input_but_keeps_rendering() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.toggle(&mut host);
        session.complete_load(host.last_ticket(), Ok(off_centre_bounds()), &mut host);

        session.toggle(&mut host);
        assert!(!session.is_playing());
        assert!(!session.controls().unwrap().enabled);

        tick(&mut session, &mut host);
        tick(&mut session, &mut host);
        assert_eq!(host.presents, 2);
        assert_eq!(host.scenes_built, 1);
    }

    #[test]
    fn dispose_releases_listeners_and_frames() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.toggle(&mut host);
        session.complete_load(host.last_ticket(), Ok(off_centre_bounds()), &mut host);
        session.notify_resize(&mut host);
        tick(&mut session, &mut host);

        session.dispose(&mut host);

        assert!(host.listeners.is_empty());
        assert!(host.pending_frames.is_empty());
        assert_eq!(host.live_surfaces(), 0);
        assert_eq!(host.live_scenes(), 0);
        assert!(!session.is_initialized());
        assert!(!session.is_playing());
        assert!(session.controls().is_none());

        host.advance(500);
        session.poll_timers(&mut host);
        assert!(host.surface_resizes.is_empty());
    }

    #[test]
    fn resize_burst_applies_last_bounds_once() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.activate(&mut host);

        host.container = Some(UVec2::new(700, 500));
        session.notify_resize(&mut host);
        host.advance(40);
        host.container = Some(UVec2::new(600, 500));
        session.notify_resize(&mut host);
        host.advance(60);
        host.container = Some(UVec2::new(1000, 250));
        session.notify_resize(&mut host);

        host.advance(99);
        session.poll_timers(&mut host);
        assert!(host.surface_resizes.is_empty());

        // Bounds captured at the last event win, even if the container moves again.
        host.container = Some(UVec2::new(10, 10));
        host.advance(1);
        session.poll_timers(&mut host);
        host.advance(500);
        session.poll_timers(&mut host);

        assert_eq!(host.surface_resizes, vec![UVec2::new(1000, 250)]);
        assert_eq!(session.camera().unwrap().aspect, 4.0);
    }

    #[test]
    fn failed_load_returns_to_idle_and_can_retry() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.activate(&mut host);

        session.complete_load(host.last_ticket(), Err(load_failure()), &mut host);

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.is_initialized());
        assert!(host.listeners.is_empty());
        assert!(host.pending_frames.is_empty());
        assert_eq!(host.live_surfaces(), 0);

        assert!(session.activate(&mut host));
        session.complete_load(host.last_ticket(), Ok(off_centre_bounds()), &mut host);

        assert!(session.is_initialized());
        assert_eq!(host.live_scenes(), 1);
        assert_eq!(host.live_surfaces(), 1);
        assert_eq!(host.listeners.len(), 1);
    }

    #[test]
    fn load_finishing_after_dispose_is_ignored() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.activate(&mut host);
        let ticket = host.last_ticket();

        session.dispose(&mut host);
        session.complete_load(ticket, Ok(off_centre_bounds()), &mut host);

        assert!(!session.is_initialized());
        assert!(host.placements.is_empty());
        assert!(host.pending_frames.is_empty());
    }

    #[test]
    fn missing_container_is_a_no_op() {
        let mut host = RecordingHost::default();
        let mut session = ViewerSession::default();

        assert!(!session.activate(&mut host));
        session.dispose(&mut host);

        assert_eq!(host.scenes_built, 0);
        assert_eq!(host.surfaces_attached, 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn stale_frame_requests_do_not_render() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        session.activate(&mut host);
        session.complete_load(host.last_ticket(), Ok(off_centre_bounds()), &mut host);

        session.run_frame(FrameRequest(9_999), &mut host);
        assert_eq!(host.presents, 0);
        assert!(session.has_pending_frame());
    }

    #[test]
    fn settings_locked_once_active() {
        let mut host = RecordingHost::mounted();
        let mut session = ViewerSession::default();
        let custom = ViewerSettings {
            model_path: "models/alt.glb".to_string(),
            ..default()
        };

        assert!(session.configure(custom.clone()).is_ok());
        session.activate(&mut host);
        assert_eq!(host.loads[0].0, "models/alt.glb");
        assert!(matches!(
            session.configure(custom),
            Err(ViewerError::NotIdle)
        ));
    }
}
