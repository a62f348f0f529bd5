//! End-to-end reveal/hide behavior against a recording host

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use cascade_animation::AnimationScheduler;
use cascade_core::{Affine2D, Rect};
use cascade_reveal::{
    ConfigError, ContainerId, Direction, HostCapabilities, LineLayerId, LineRevealController,
    OverlayId, RevealConfig, RevealHost, RevealOptions, TargetId, TargetInfo,
};
use cascade_text::{FontDescriptor, LayoutRequest, StyledText, TextStyle};

const LABEL: TargetId = TargetId(1);
const CONTAINER: ContainerId = ContainerId(100);

#[derive(Debug, Clone, PartialEq)]
enum Event {
    SetHidden(TargetId, bool),
    CreateOverlay(OverlayId),
    RemoveOverlay(OverlayId),
    CreateLayer(LineLayerId),
}

#[derive(Debug, Clone)]
struct LayerState {
    overlay: OverlayId,
    bounds: Rect,
    text: String,
    opacity: f32,
    transform: Affine2D,
    blur_radius: Option<f32>,
    panel_opacity: Option<f32>,
}

#[derive(Default)]
struct MockHost {
    capabilities: HostCapabilities,
    targets: HashMap<TargetId, TargetInfo>,
    hidden: HashMap<TargetId, bool>,
    attached: Vec<OverlayId>,
    layers: HashMap<LineLayerId, LayerState>,
    events: Vec<Event>,
    next_id: u64,
}

impl MockHost {
    fn with_blur_filter() -> Self {
        Self {
            capabilities: HostCapabilities { blur_filter: true },
            ..Self::default()
        }
    }

    /// A hidden label in `CONTAINER`, 40 units wide with 12 unit lines
    fn add_label(&mut self, target: TargetId, text: &str) {
        self.add_target(target, text, Some(CONTAINER), 40.0);
        self.hidden.insert(target, true);
    }

    fn add_target(
        &mut self,
        target: TargetId,
        text: &str,
        container: Option<ContainerId>,
        width: f32,
    ) {
        let style = TextStyle::new(FontDescriptor::system(10.0)).line_height(12.0);
        self.targets.insert(
            target,
            TargetInfo {
                frame: Rect::new(10.0, 20.0, width, 36.0),
                container,
                request: LayoutRequest::plain(text, style, width),
            },
        );
    }

    fn set_wrap_width(&mut self, target: TargetId, width: f32) {
        if let Some(info) = self.targets.get_mut(&target) {
            info.request.wrap_width = width;
            info.frame.size.width = width;
        }
    }

    fn is_hidden(&self, target: TargetId) -> bool {
        self.hidden.get(&target).copied().unwrap_or(false)
    }

    fn overlays_created(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::CreateOverlay(_)))
            .count()
    }

    fn layers_of(&self, overlay: OverlayId) -> Vec<LayerState> {
        let mut layers: Vec<_> = self
            .layers
            .values()
            .filter(|layer| layer.overlay == overlay)
            .cloned()
            .collect();
        layers.sort_by(|a, b| a.bounds.y().total_cmp(&b.bounds.y()));
        layers
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl RevealHost for MockHost {
    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    fn target_info(&self, target: TargetId) -> Option<TargetInfo> {
        self.targets.get(&target).cloned()
    }

    fn set_target_hidden(&mut self, target: TargetId, hidden: bool) {
        self.hidden.insert(target, hidden);
        self.events.push(Event::SetHidden(target, hidden));
    }

    fn create_overlay(&mut self, container: ContainerId, _frame: Rect) -> OverlayId {
        assert_eq!(container, CONTAINER);
        let id = OverlayId(self.next());
        self.attached.push(id);
        self.events.push(Event::CreateOverlay(id));
        id
    }

    fn remove_overlay(&mut self, overlay: OverlayId) {
        self.attached.retain(|id| *id != overlay);
        self.events.push(Event::RemoveOverlay(overlay));
    }

    fn create_line_layer(
        &mut self,
        overlay: OverlayId,
        bounds: Rect,
        content: &StyledText,
        _style: &TextStyle,
    ) -> LineLayerId {
        let id = LineLayerId(self.next());
        self.layers.insert(
            id,
            LayerState {
                overlay,
                bounds,
                text: content.content().to_string(),
                opacity: 1.0,
                transform: Affine2D::IDENTITY,
                blur_radius: None,
                panel_opacity: None,
            },
        );
        self.events.push(Event::CreateLayer(id));
        id
    }

    fn set_line_pose(&mut self, layer: LineLayerId, opacity: f32, transform: Affine2D) {
        let state = self.layers.get_mut(&layer).expect("unknown layer");
        state.opacity = opacity;
        state.transform = transform;
    }

    fn set_line_blur_radius(&mut self, layer: LineLayerId, radius: f32) {
        assert!(self.capabilities.blur_filter);
        self.layers.get_mut(&layer).expect("unknown layer").blur_radius = Some(radius);
    }

    fn add_blur_panel(&mut self, layer: LineLayerId) {
        self.layers.get_mut(&layer).expect("unknown layer").panel_opacity = Some(0.0);
    }

    fn set_blur_panel_opacity(&mut self, layer: LineLayerId, opacity: f32) {
        let state = self.layers.get_mut(&layer).expect("unknown layer");
        assert!(state.panel_opacity.is_some(), "panel opacity set before panel");
        state.panel_opacity = Some(opacity);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .with_test_writer()
        .try_init();
}

fn controller(host: MockHost, scheduler: &AnimationScheduler) -> LineRevealController<MockHost> {
    init_tracing();
    LineRevealController::new(host, scheduler.handle(), RevealConfig::standard()).unwrap()
}

fn recorder() -> (Rc<RefCell<Vec<Direction>>>, impl Fn() -> Box<dyn FnOnce(Direction)>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let handle = Rc::clone(&calls);
    let make = move || {
        let calls = Rc::clone(&handle);
        Box::new(move |direction: Direction| calls.borrow_mut().push(direction))
            as Box<dyn FnOnce(Direction)>
    };
    (calls, make)
}

/// Tick in 16ms frames until nothing is animating
fn run_to_completion(
    scheduler: &AnimationScheduler,
    controller: &mut LineRevealController<MockHost>,
) {
    let mut frames = 0;
    while controller.update() {
        scheduler.tick_by(Duration::from_millis(16));
        frames += 1;
        assert!(frames < 200, "cascade never settled");
    }
}

#[test]
fn reveal_three_lines_end_to_end() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    // 5.5 units per character at 10pt: wraps into three lines at 40
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());

    assert!(controller.is_animating(LABEL));
    assert_eq!(controller.direction(LABEL), Some(Direction::Reveal));
    let overlay = controller.overlay(LABEL).unwrap().id();
    assert_eq!(controller.overlay(LABEL).unwrap().len(), 3);

    let host = controller.host();
    assert_eq!(host.attached, vec![overlay]);
    let layers = host.layers_of(overlay);
    assert_eq!(
        layers.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(),
        vec!["hello ", "world ", "again"]
    );
    for (i, layer) in layers.iter().enumerate() {
        assert_eq!(layer.bounds, Rect::new(0.0, i as f32 * 12.0, 40.0, 12.0));
        // Hidden pose with the fallback panel fully covering the line
        assert_eq!(layer.opacity, 0.0);
        assert_eq!(layer.panel_opacity, Some(1.0));
        let bottom = layer.transform.apply(cascade_core::Point::new(20.0, 12.0));
        assert!((bottom.y - 20.0).abs() < 1e-4);
    }
    assert!(host.is_hidden(LABEL));

    // Line 2 starts at 252ms, so at 200ms only the earlier lines have moved
    scheduler.tick_by(Duration::from_millis(200));
    assert!(controller.update());
    let layers = controller.host().layers_of(overlay);
    assert!(layers[0].opacity > 0.0);
    assert!(layers[1].opacity > 0.0);
    assert_eq!(layers[2].opacity, 0.0);
    assert!(controller.host().is_hidden(LABEL));
    assert!(calls.borrow().is_empty());

    scheduler.tick_by(Duration::from_millis(400));
    assert!(!controller.update());

    let host = controller.host();
    assert!(host.attached.is_empty());
    assert!(!host.is_hidden(LABEL));
    for layer in host.layers_of(overlay) {
        assert_eq!(layer.opacity, 1.0);
        assert!(layer.transform.is_identity());
        assert_eq!(layer.panel_opacity, Some(0.0));
    }
    assert_eq!(*calls.borrow(), vec![Direction::Reveal]);
    assert_eq!(controller.active_count(), 0);
    assert_eq!(scheduler.timeline_count(), 0);
}

#[test]
fn blur_filter_host_animates_radius() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::with_blur_filter();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);

    controller.reveal(LABEL, RevealOptions::default());
    let overlay = controller.overlay(LABEL).unwrap().id();
    for layer in controller.host().layers_of(overlay) {
        assert_eq!(layer.blur_radius, Some(8.0));
        assert_eq!(layer.panel_opacity, None);
    }

    run_to_completion(&scheduler, &mut controller);
    for layer in controller.host().layers_of(overlay) {
        assert_eq!(layer.blur_radius, Some(0.0));
    }
}

#[test]
fn hide_mid_reveal_reverses_in_place() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());
    scheduler.tick_by(Duration::from_millis(100));
    controller.update();
    let overlay = controller.overlay(LABEL).unwrap().id();

    controller.hide_then(LABEL, RevealOptions::default(), callback());
    assert_eq!(controller.active_count(), 1);
    assert_eq!(controller.direction(LABEL), Some(Direction::Hide));
    assert_eq!(controller.overlay(LABEL).unwrap().id(), overlay);
    assert_eq!(controller.host().overlays_created(), 1);
    assert_eq!(scheduler.timeline_count(), 1);

    // Retracing 100ms of progress takes 100ms, not a full cascade
    scheduler.tick_by(Duration::from_millis(60));
    assert!(controller.update());
    assert_eq!(controller.host().overlays_created(), 1);
    scheduler.tick_by(Duration::from_millis(60));
    assert!(!controller.update());

    let host = controller.host();
    assert!(host.is_hidden(LABEL));
    assert!(host.attached.is_empty());
    for layer in host.layers_of(overlay) {
        assert_eq!(layer.opacity, 0.0);
    }
    assert_eq!(*calls.borrow(), vec![Direction::Hide, Direction::Hide]);
}

#[test]
fn reveal_mid_hide_reverses_in_place() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    host.hidden.insert(LABEL, false);
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.hide_then(LABEL, RevealOptions::default(), callback());
    assert!(controller.host().is_hidden(LABEL));
    scheduler.tick_by(Duration::from_millis(100));
    assert!(controller.update());
    let overlay = controller.overlay(LABEL).unwrap().id();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());
    assert_eq!(controller.active_count(), 1);
    assert_eq!(controller.direction(LABEL), Some(Direction::Reveal));
    assert_eq!(controller.overlay(LABEL).unwrap().id(), overlay);
    assert_eq!(scheduler.timeline_count(), 1);
    // Stays hidden until the overlay is gone
    assert!(controller.host().is_hidden(LABEL));

    scheduler.tick_by(Duration::from_millis(60));
    assert!(controller.update());
    scheduler.tick_by(Duration::from_millis(60));
    assert!(!controller.update());

    let host = controller.host();
    assert_eq!(host.overlays_created(), 1);
    assert!(host.attached.is_empty());
    assert!(!host.is_hidden(LABEL));
    for layer in host.layers_of(overlay) {
        assert_eq!(layer.opacity, 1.0);
        assert!(layer.transform.is_identity());
        assert_eq!(layer.panel_opacity, Some(0.0));
    }
    assert_eq!(*calls.borrow(), vec![Direction::Reveal, Direction::Reveal]);
    assert_eq!(scheduler.timeline_count(), 0);
}

#[test]
fn double_reversal_finishes_forward() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);

    controller.reveal(LABEL, RevealOptions::default());
    scheduler.tick_by(Duration::from_millis(100));
    controller.hide(LABEL, RevealOptions::default());
    scheduler.tick_by(Duration::from_millis(20));
    controller.reveal(LABEL, RevealOptions::default());
    assert_eq!(controller.direction(LABEL), Some(Direction::Reveal));

    run_to_completion(&scheduler, &mut controller);
    assert!(!controller.host().is_hidden(LABEL));
    assert_eq!(controller.host().overlays_created(), 1);
}

#[test]
fn same_direction_retrigger_is_collapsed() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());
    scheduler.tick_by(Duration::from_millis(100));
    controller.reveal_then(LABEL, RevealOptions::default(), callback());

    assert_eq!(controller.host().overlays_created(), 1);
    assert_eq!(scheduler.timeline_count(), 1);

    // Still finishes on the original schedule
    scheduler.tick_by(Duration::from_millis(470));
    assert!(!controller.update());
    assert_eq!(*calls.borrow(), vec![Direction::Reveal, Direction::Reveal]);
}

#[test]
fn hide_conceals_target_before_building_overlay() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    host.hidden.insert(LABEL, false);
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.hide_then(LABEL, RevealOptions::default(), callback());

    let events = &controller.host().events;
    let hidden_at = events
        .iter()
        .position(|e| *e == Event::SetHidden(LABEL, true))
        .unwrap();
    let overlay_at = events
        .iter()
        .position(|e| matches!(e, Event::CreateOverlay(_)))
        .unwrap();
    assert!(hidden_at < overlay_at);

    let overlay = controller.overlay(LABEL).unwrap().id();
    for layer in controller.host().layers_of(overlay) {
        assert_eq!(layer.opacity, 1.0);
        assert_eq!(layer.panel_opacity, Some(0.0));
    }

    run_to_completion(&scheduler, &mut controller);
    assert!(controller.host().is_hidden(LABEL));
    assert!(controller.host().attached.is_empty());
    assert_eq!(*calls.borrow(), vec![Direction::Hide]);
}

#[test]
fn target_without_container_is_a_no_op() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_target(LABEL, "hello world again", None, 40.0);
    host.hidden.insert(LABEL, true);
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());

    assert_eq!(*calls.borrow(), vec![Direction::Reveal]);
    assert!(!controller.is_animating(LABEL));
    assert!(controller.host().events.is_empty());
    assert!(controller.host().is_hidden(LABEL));
    assert_eq!(scheduler.timeline_count(), 0);
}

#[test]
fn zero_size_frame_is_a_no_op() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    if let Some(info) = host.targets.get_mut(&LABEL) {
        info.frame = Rect::new(10.0, 20.0, 40.0, 0.0);
    }
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());

    assert_eq!(*calls.borrow(), vec![Direction::Reveal]);
    assert!(!controller.is_animating(LABEL));
    assert!(controller.host().events.is_empty());
    assert_eq!(controller.layout_cache().stats().misses, 0);
    assert_eq!(scheduler.timeline_count(), 0);
}

#[test]
fn unknown_target_is_a_no_op() {
    let scheduler = AnimationScheduler::new();
    let mut controller = controller(MockHost::default(), &scheduler);
    let (calls, callback) = recorder();

    controller.hide_then(TargetId(42), RevealOptions::default(), callback());

    assert_eq!(*calls.borrow(), vec![Direction::Hide]);
    assert!(controller.host().events.is_empty());
}

#[test]
fn blank_text_never_attaches_an_overlay() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "  \n\t ");
    host.add_label(TargetId(2), "");
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());
    controller.hide_then(LABEL, RevealOptions::default(), callback());
    controller.reveal_then(TargetId(2), RevealOptions::default(), callback());

    assert_eq!(
        *calls.borrow(),
        vec![Direction::Reveal, Direction::Hide, Direction::Reveal]
    );
    assert!(controller.host().events.is_empty());
    assert_eq!(controller.active_count(), 0);
}

#[test]
fn repeated_reveals_hit_the_layout_cache() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);

    controller.reveal(LABEL, RevealOptions::default());
    run_to_completion(&scheduler, &mut controller);
    controller.hide(LABEL, RevealOptions::default());
    run_to_completion(&scheduler, &mut controller);

    let stats = controller.layout_cache().stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);

    // Sub-pixel jitter maps to the same key
    controller.host_mut().set_wrap_width(LABEL, 40.3);
    controller.reveal(LABEL, RevealOptions::default());
    assert_eq!(controller.layout_cache().stats().hits, 2);
    run_to_completion(&scheduler, &mut controller);

    // A real width change lays out again
    controller.host_mut().set_wrap_width(LABEL, 100.0);
    controller.hide(LABEL, RevealOptions::default());
    assert_eq!(controller.layout_cache().stats().misses, 2);
    assert_eq!(controller.overlay(LABEL).unwrap().len(), 1);
}

#[test]
fn targets_animate_independently() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    host.add_label(TargetId(2), "short");
    let mut controller = controller(host, &scheduler);

    controller.reveal(LABEL, RevealOptions::default());
    controller.reveal(TargetId(2), RevealOptions::new(0.2, 0.0));
    assert_eq!(controller.active_count(), 2);

    scheduler.tick_by(Duration::from_millis(250));
    assert!(controller.update());
    assert!(!controller.is_animating(TargetId(2)));
    assert!(!controller.host().is_hidden(TargetId(2)));
    assert!(controller.is_animating(LABEL));
    assert!(controller.host().is_hidden(LABEL));

    run_to_completion(&scheduler, &mut controller);
    assert!(!controller.host().is_hidden(LABEL));
}

#[test]
fn finish_settles_immediately() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();

    controller.reveal_then(LABEL, RevealOptions::default(), callback());
    scheduler.tick_by(Duration::from_millis(50));
    controller.finish(LABEL);

    assert!(!controller.is_animating(LABEL));
    assert!(!controller.host().is_hidden(LABEL));
    assert!(controller.host().attached.is_empty());
    assert_eq!(*calls.borrow(), vec![Direction::Reveal]);
    assert_eq!(scheduler.timeline_count(), 0);

    // Finishing an idle target does nothing
    controller.finish(LABEL);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn dropped_scheduler_finalizes_without_animating() {
    let scheduler = AnimationScheduler::new();
    let mut host = MockHost::default();
    host.add_label(LABEL, "hello world again");
    let mut controller = controller(host, &scheduler);
    let (calls, callback) = recorder();
    drop(scheduler);

    controller.reveal_then(LABEL, RevealOptions::default(), callback());

    assert!(!controller.is_animating(LABEL));
    assert!(!controller.host().is_hidden(LABEL));
    assert_eq!(controller.host().overlays_created(), 0);
    assert_eq!(*calls.borrow(), vec![Direction::Reveal]);
}

#[test]
fn invalid_config_is_rejected() {
    let scheduler = AnimationScheduler::new();
    let config = RevealConfig::standard().with_cascade_fraction(1.5);
    let err = LineRevealController::new(MockHost::default(), scheduler.handle(), config)
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::InvalidCascadeFraction(_)));
}
