//! Keyboard stand-in for the parameter panel.

use glasswork_engine::input::{InputFrame, Key};

use crate::params::Params;

const ROUNDNESS_STEP: f32 = 0.5;
const DEPTH_STEP: f32 = 10.0;

/// Wheel lines per PageUp/PageDown; one screen of the two-page layout.
pub const PAGE_LINES: f32 = 20.0;

/// What a batch of key presses changed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ControlOutcome {
    /// Extrusion inputs changed; the solid must be rebuilt.
    pub geometry: bool,
    /// Any other knob changed.
    pub material: bool,
    pub exit: bool,
}

/// Applies this frame's key presses to `params`, clamping afterwards.
///
/// ```text
/// Up / Down     roundness +/-
/// Right / Left  depth +/-
/// H             toggle high-res bevels
/// B             toggle background content
/// R             cycle refraction quality
/// Esc           exit
/// ```
pub fn apply_keys(params: &mut Params, input: &InputFrame) -> ControlOutcome {
    let mut out = ControlOutcome::default();
    let g = &mut params.geometry;

    if input.pressed(Key::ArrowUp) {
        g.roundness += ROUNDNESS_STEP;
        out.geometry = true;
    }
    if input.pressed(Key::ArrowDown) {
        g.roundness -= ROUNDNESS_STEP;
        out.geometry = true;
    }
    if input.pressed(Key::ArrowRight) {
        g.depth += DEPTH_STEP;
        out.geometry = true;
    }
    if input.pressed(Key::ArrowLeft) {
        g.depth -= DEPTH_STEP;
        out.geometry = true;
    }
    if input.pressed(Key::H) {
        params.quality.high_res = !params.quality.high_res;
        out.geometry = true;
    }
    if input.pressed(Key::B) {
        params.background.show_demo_elements = !params.background.show_demo_elements;
        out.material = true;
    }
    if input.pressed(Key::R) {
        let q = &mut params.performance.refraction_quality;
        *q = q.next();
        out.material = true;
    }
    out.exit = input.pressed(Key::Escape);

    if out.geometry || out.material {
        params.clamp();
        log::info!(
            "roundness {:.1}, depth {:.0}, high-res {}, demo elements {}, quality {:?}",
            params.geometry.roundness,
            params.geometry.depth,
            params.quality.high_res,
            params.background.show_demo_elements,
            params.performance.refraction_quality
        );
    }
    out
}

/// Wheel motion plus keyboard paging, in wheel lines (positive = up).
///
/// Home and End jump far enough to hit either end of the range.
pub fn scroll_lines(input: &InputFrame) -> f32 {
    let mut lines = input.wheel_lines;
    if input.pressed(Key::PageUp) {
        lines += PAGE_LINES;
    }
    if input.pressed(Key::PageDown) {
        lines -= PAGE_LINES;
    }
    if input.pressed(Key::Home) {
        lines += 100.0 * PAGE_LINES;
    }
    if input.pressed(Key::End) {
        lines -= 100.0 * PAGE_LINES;
    }
    lines
}

/// Window title summarizing the knobs the keys edit.
pub fn title(params: &Params) -> String {
    format!(
        "glasswork | roundness {:.1} | depth {:.0} | {:?} refraction",
        params.geometry.roundness, params.geometry.depth, params.performance.refraction_quality
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glasswork_engine::render::RefractionQuality;

    fn frame(keys: &[Key]) -> InputFrame {
        let mut f = InputFrame::default();
        f.keys_pressed.extend(keys.iter().copied());
        f
    }

    #[test]
    fn arrows_edit_geometry() {
        let mut p = Params::default();
        let out = apply_keys(&mut p, &frame(&[Key::ArrowUp, Key::ArrowRight]));
        assert!(out.geometry);
        assert_eq!(p.geometry.roundness, 7.5);
        assert_eq!(p.geometry.depth, 110.0);
    }

    #[test]
    fn edits_are_clamped() {
        let mut p = Params::default();
        p.geometry.roundness = 0.2;
        p.geometry.depth = 5.0;
        apply_keys(&mut p, &frame(&[Key::ArrowDown, Key::ArrowLeft]));
        assert_eq!(p.geometry.roundness, 0.0);
        assert_eq!(p.geometry.depth, 1.0);
    }

    #[test]
    fn toggles_and_cycles() {
        let mut p = Params::default();
        let out = apply_keys(&mut p, &frame(&[Key::B, Key::R, Key::H]));
        assert!(!p.background.show_demo_elements);
        assert!(!p.quality.high_res);
        assert_eq!(p.performance.refraction_quality, RefractionQuality::High);
        assert!(out.geometry && out.material && !out.exit);
    }

    #[test]
    fn no_keys_no_changes() {
        let mut p = Params::default();
        assert_eq!(apply_keys(&mut p, &frame(&[])), ControlOutcome::default());
        assert_eq!(p, Params::default());
    }

    #[test]
    fn paging_keys_add_to_wheel() {
        let mut f = frame(&[Key::PageDown]);
        f.wheel_lines = 2.0;
        assert_eq!(scroll_lines(&f), 2.0 - PAGE_LINES);
        assert!(scroll_lines(&frame(&[Key::Home])) >= PAGE_LINES * 2.0);
    }

    #[test]
    fn title_reflects_knobs() {
        let t = title(&Params::default());
        assert!(t.contains("roundness 7.0"));
        assert!(t.contains("Medium"));
    }

    #[test]
    fn escape_requests_exit() {
        let mut p = Params::default();
        assert!(apply_keys(&mut p, &frame(&[Key::Escape])).exit);
    }
}
