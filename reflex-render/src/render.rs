use anyhow::{Result, anyhow};
use reflex_core::{StimulusColor, TrialPhase};
use reflex_session::SessionView;
use std::time::{Duration, Instant};
use tiny_skia::{Paint, Pixmap, Rect, Transform};

const PANEL_MARGIN: f32 = 32.0;
const PANEL_PADDING: f32 = 4.0;
const INFO_PANEL_SIZE: (f32, f32) = (180.0, 64.0);

const STATS_PANEL_HEIGHT: f32 = 120.0;
const STATS_BAR_WIDTH: f32 = 10.0;
const MAX_STATS_BARS: usize = 20;
const STATS_CEILING_MS: u64 = 1000;

const RESULT_BAR_HEIGHT: f32 = 16.0;
const RESULT_SCALE_MS: u64 = 500;

/// Seven-segment readout: digit cell, stroke and spacing
const DIGIT_SIZE: (f32, f32) = (40.0, 72.0);
const DIGIT_STROKE: f32 = 8.0;
const DIGIT_GAP: f32 = 12.0;
const READOUT_OFFSET: f32 = 100.0;

/// Lit segments per digit, bits a..g from the top clockwise then the middle
const SEGMENTS: [u8; 10] = [
    0b0111111, 0b0000110, 0b1011011, 0b1001111, 0b1100110,
    0b1101101, 0b1111101, 0b0000111, 0b1111111, 0b1101111,
];

const INFO_MARK_SIZE: (f32, f32) = (6.0, 30.0);

const PANEL_COLOR: StimulusColor = StimulusColor::rgb(255, 255, 255);
const BEST_COLOR: StimulusColor = StimulusColor::rgb(250, 204, 21);

pub struct FrameStats {
    pub draw: Duration,
    pub copy: Duration,
    pub total: Duration,
}

pub trait ViewRenderer {
    fn render_view(&mut self, view: &SessionView) -> Result<()>;
}

/// Paints the session view into an offscreen canvas and copies it to the frame buffer
pub struct SkiaRenderer {
    width: u32,
    height: u32,
    center: (f32, f32),
    canvas: Pixmap,
}

impl SkiaRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let (width, height) = (width.max(1), height.max(1));
        let canvas = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("cannot allocate {width}x{height} canvas"))?;
        Ok(Self {
            width,
            height,
            center: (width as f32 / 2.0, height as f32 / 2.0),
            canvas,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<()> {
        *self = Self::new(new_width, new_height)?;
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn canvas(&self) -> &Pixmap {
        &self.canvas
    }

    /// Bottom-right info panel; input landing here is not a game interaction
    pub fn info_panel_rect(&self) -> Option<Rect> {
        let (w, h) = INFO_PANEL_SIZE;
        Rect::from_xywh(
            self.width as f32 - PANEL_MARGIN - w,
            self.height as f32 - PANEL_MARGIN - h,
            w,
            h,
        )
    }

    pub fn hit_info_panel(&self, x: f64, y: f64) -> bool {
        let (x, y) = (x as f32, y as f32);
        self.info_panel_rect().is_some_and(|r| {
            x >= r.left() && x < r.right() && y >= r.top() && y < r.bottom()
        })
    }

    /// Draws `view` and copies the result into an RGBA8 frame buffer of the same size
    pub fn render_frame(&mut self, view: &SessionView, frame_buffer: &mut [u8]) -> Result<FrameStats> {
        let start = Instant::now();
        self.render_view(view)?;
        let draw = start.elapsed();

        // every layer ends up opaque, so premultiplied bytes equal straight RGBA
        let data = self.canvas.data();
        if frame_buffer.len() != data.len() {
            return Err(anyhow!(
                "frame buffer is {} bytes, canvas needs {}",
                frame_buffer.len(),
                data.len()
            ));
        }
        let t_copy = Instant::now();
        frame_buffer.copy_from_slice(data);
        let copy = t_copy.elapsed();

        Ok(FrameStats {
            draw,
            copy,
            total: start.elapsed(),
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: StimulusColor) {
        let [r, g, b, a] = color.rgba;
        let mut paint = Paint::default();
        paint.anti_alias = false;
        paint.set_color_rgba8(r, g, b, a);
        self.canvas
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Translucent panel labelled with an "i" mark
    fn draw_info_panel(&mut self) {
        let Some(rect) = self.info_panel_rect() else {
            return;
        };
        self.fill_rect(rect, PANEL_COLOR.with_alpha(51));

        let (w, h) = INFO_MARK_SIZE;
        let x = rect.left() + 16.0;
        let dot = Rect::from_xywh(x, rect.top() + 10.0, w, w);
        let stem = Rect::from_xywh(x, rect.top() + 22.0, w, h);
        for part in [dot, stem].into_iter().flatten() {
            self.fill_rect(part, PANEL_COLOR);
        }
    }

    /// Reaction time in large seven-segment digits above the result bar
    fn draw_readout(&mut self, ms: u64) {
        let digits: Vec<usize> = ms
            .to_string()
            .bytes()
            .map(|b| usize::from(b - b'0'))
            .collect();
        let (w, _) = DIGIT_SIZE;
        let total = digits.len() as f32 * (w + DIGIT_GAP) - DIGIT_GAP;
        let top = self.center.1 - READOUT_OFFSET;
        let mut left = self.center.0 - total / 2.0;
        for digit in digits {
            self.draw_digit(left, top, SEGMENTS[digit]);
            left += w + DIGIT_GAP;
        }
    }

    fn draw_digit(&mut self, x: f32, y: f32, lit: u8) {
        let (w, h) = DIGIT_SIZE;
        let t = DIGIT_STROKE;
        let half = h / 2.0;
        let segments = [
            (x, y, w, t),
            (x + w - t, y, t, half),
            (x + w - t, y + half, t, half),
            (x, y + h - t, w, t),
            (x, y + half, t, half),
            (x, y, t, half),
            (x, y + half - t / 2.0, w, t),
        ];
        for (bit, (sx, sy, sw, sh)) in segments.into_iter().enumerate() {
            if lit & (1 << bit) == 0 {
                continue;
            }
            if let Some(rect) = Rect::from_xywh(sx, sy, sw, sh) {
                self.fill_rect(rect, PANEL_COLOR);
            }
        }
    }

    fn draw_stats_panel(&mut self, view: &SessionView) {
        if view.attempts.is_empty() {
            return;
        }
        let recent = &view.attempts[view.attempts.len().saturating_sub(MAX_STATS_BARS)..];
        let panel_w = PANEL_PADDING + recent.len() as f32 * (STATS_BAR_WIDTH + PANEL_PADDING);
        let bottom = self.height as f32 - PANEL_MARGIN;
        let Some(panel) = Rect::from_xywh(
            PANEL_MARGIN,
            bottom - STATS_PANEL_HEIGHT,
            panel_w,
            STATS_PANEL_HEIGHT,
        ) else {
            return;
        };
        self.fill_rect(panel, PANEL_COLOR.with_alpha(51));

        let max_bar = STATS_PANEL_HEIGHT - 2.0 * PANEL_PADDING;
        for (i, attempt) in recent.iter().enumerate() {
            let ms = attempt.as_millis().min(STATS_CEILING_MS);
            let bar_h = (ms as f32 / STATS_CEILING_MS as f32 * max_bar).max(1.0);
            let x = PANEL_MARGIN + PANEL_PADDING + i as f32 * (STATS_BAR_WIDTH + PANEL_PADDING);
            let color = if Some(*attempt) == view.best {
                BEST_COLOR
            } else {
                PANEL_COLOR.with_alpha(220)
            };
            if let Some(bar) =
                Rect::from_xywh(x, bottom - PANEL_PADDING - bar_h, STATS_BAR_WIDTH, bar_h)
            {
                self.fill_rect(bar, color);
            }
        }
    }

    fn draw_result_bar(&mut self, ms: u64) {
        let full = self.width as f32 * 0.6;
        let w = (ms.min(RESULT_SCALE_MS) as f32 / RESULT_SCALE_MS as f32 * full).max(2.0);
        if let Some(bar) = Rect::from_xywh(
            self.center.0 - full / 2.0,
            self.center.1 + 60.0,
            w,
            RESULT_BAR_HEIGHT,
        ) {
            self.fill_rect(bar, PANEL_COLOR);
        }
    }
}

impl ViewRenderer for SkiaRenderer {
    fn render_view(&mut self, view: &SessionView) -> Result<()> {
        let [r, g, b, a] = view.color().rgba;
        self.canvas
            .fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        if view.phase == TrialPhase::Result {
            if let Some(rt) = view.last_reaction {
                self.draw_readout(rt.as_millis());
                self.draw_result_bar(rt.as_millis());
            }
        }
        self.draw_stats_panel(view);
        self.draw_info_panel();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflex_core::Attempt;

    fn view(phase: TrialPhase, attempts: &[u64]) -> SessionView {
        let attempts: Vec<Attempt> = attempts.iter().copied().map(Attempt::from_millis).collect();
        SessionView {
            phase,
            live_ms: None,
            last_reaction: attempts.last().copied(),
            best: attempts.iter().copied().min(),
            average: None,
            attempts,
        }
    }

    fn rgb_at(r: &SkiaRenderer, x: u32, y: u32) -> [u8; 3] {
        let p = r.canvas().pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue()]
    }

    #[test]
    fn center_shows_phase_color() {
        let mut r = SkiaRenderer::new(640, 480).unwrap();
        for phase in [TrialPhase::Idle, TrialPhase::Armed, TrialPhase::Go, TrialPhase::FalseStart] {
            r.render_view(&view(phase, &[])).unwrap();
            let [cr, cg, cb, _] = StimulusColor::for_phase(phase).rgba;
            assert_eq!(rgb_at(&r, 320, 240), [cr, cg, cb], "{phase}");
        }
    }

    #[test]
    fn stats_bars_appear_with_history() {
        let mut r = SkiaRenderer::new(640, 480).unwrap();
        let spot = (40, 480 - 32 - 4 - 1);
        r.render_view(&view(TrialPhase::Idle, &[])).unwrap();
        let empty = rgb_at(&r, spot.0, spot.1);
        r.render_view(&view(TrialPhase::Idle, &[250])).unwrap();
        assert_ne!(rgb_at(&r, spot.0, spot.1), empty);
    }

    #[test]
    fn result_shows_reaction_digits() {
        let mut r = SkiaRenderer::new(640, 480).unwrap();
        r.render_view(&view(TrialPhase::Result, &[237])).unwrap();
        let background = rgb_at(&r, 320, 20);
        let white = [255, 255, 255];

        // "237" is 144 px wide, centered, top edge 100 px above center
        let (two, three, top) = (248, 300, 140);
        assert_eq!(rgb_at(&r, two + 20, top + 4), white);
        assert_eq!(rgb_at(&r, two + 4, top + 18), background);
        assert_eq!(rgb_at(&r, three + 36, top + 18), white);
        assert_eq!(rgb_at(&r, three + 4, top + 54), background);

        r.render_view(&view(TrialPhase::Idle, &[237])).unwrap();
        assert_ne!(rgb_at(&r, two + 20, top + 4), white);
    }

    #[test]
    fn info_panel_carries_a_mark() {
        let mut r = SkiaRenderer::new(640, 480).unwrap();
        r.render_view(&view(TrialPhase::Idle, &[])).unwrap();
        let panel = r.info_panel_rect().unwrap();
        let (left, top) = (panel.left() as u32, panel.top() as u32);
        assert_eq!(rgb_at(&r, left + 18, top + 12), [255, 255, 255]);
        assert_eq!(rgb_at(&r, left + 18, top + 40), [255, 255, 255]);
        assert_ne!(rgb_at(&r, left + 60, top + 40), [255, 255, 255]);
    }

    #[test]
    fn info_panel_hit_test() {
        let r = SkiaRenderer::new(800, 600).unwrap();
        assert!(r.hit_info_panel(800.0 - 40.0, 600.0 - 40.0));
        assert!(!r.hit_info_panel(400.0, 300.0));
        assert!(!r.hit_info_panel(799.0, 599.0));
    }

    #[test]
    fn frame_copy_requires_matching_size() {
        let mut r = SkiaRenderer::new(4, 4).unwrap();
        let mut small = vec![0u8; 8];
        assert!(r.render_frame(&view(TrialPhase::Go, &[]), &mut small).is_err());

        let mut frame = vec![0u8; 4 * 4 * 4];
        r.render_frame(&view(TrialPhase::Go, &[]), &mut frame).unwrap();
        assert_eq!(&frame[..4], &StimulusColor::GREEN.rgba);
    }

    #[test]
    fn resize_recreates_canvas() {
        let mut r = SkiaRenderer::new(10, 10).unwrap();
        r.resize(20, 30).unwrap();
        assert_eq!(r.size(), (20, 30));
        assert_eq!(r.canvas().width(), 20);
    }
}
