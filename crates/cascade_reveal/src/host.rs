//! Host rendering interface
//!
//! The controller never touches a view tree directly. Everything it needs
//! from the UI runtime goes through [`RevealHost`], addressed by opaque ids
//! the host hands out.

use cascade_core::{Affine2D, Rect};
use cascade_text::{LayoutRequest, StyledText, TextStyle};

/// A text element that can be revealed or hidden
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// The view a target lives in; overlays are attached here as siblings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// One per-line wrapper inside an overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineLayerId(pub u64);

/// Current state of a target, as resolved by the host's layout
#[derive(Clone, Debug)]
pub struct TargetInfo {
    /// Frame of the target in its container's coordinates
    pub frame: Rect,
    /// `None` when the target is not attached to anything
    pub container: Option<ContainerId>,
    /// Text, style and wrap width to lay out
    pub request: LayoutRequest,
}

/// What the host's compositor can do
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Per-layer animatable blur filter
    pub blur_filter: bool,
}

/// Rendering collaborator driven by the controller
pub trait RevealHost {
    fn capabilities(&self) -> HostCapabilities;

    /// Look up a target; `None` if the host does not know it
    fn target_info(&self, target: TargetId) -> Option<TargetInfo>;

    fn set_target_hidden(&mut self, target: TargetId, hidden: bool);

    /// Attach a transparent, non-interactive container at `frame`
    fn create_overlay(&mut self, container: ContainerId, frame: Rect) -> OverlayId;

    /// Detach an overlay and everything inside it
    fn remove_overlay(&mut self, overlay: OverlayId);

    /// Add a wrapper at `bounds` (overlay coordinates) rendering `content`
    fn create_line_layer(
        &mut self,
        overlay: OverlayId,
        bounds: Rect,
        content: &StyledText,
        style: &TextStyle,
    ) -> LineLayerId;

    /// Opacity and layer-local transform of a line wrapper
    fn set_line_pose(&mut self, layer: LineLayerId, opacity: f32, transform: Affine2D);

    /// Only called when [`HostCapabilities::blur_filter`] is set
    fn set_line_blur_radius(&mut self, layer: LineLayerId, radius: f32);

    /// Cover a line wrapper with a translucent blur panel
    fn add_blur_panel(&mut self, layer: LineLayerId);

    fn set_blur_panel_opacity(&mut self, layer: LineLayerId, opacity: f32);
}
