//! Numbers behind the decorative animations.
//!
//! Everything here is plain arithmetic on an injected random source returning
//! values in `[0, 1)`, so the browser passes `js_sys::Math::random` and tests
//! pass a fixed sequence.

const TILT_PERSPECTIVE_PX: f64 = 1000.0;
const TILT_DEGREES_PER_PX: f64 = 0.01;
pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateZ(0)";
pub const TILT_SETTLE_MS: u32 = 300;

const NEON_PALETTE: [&str; 4] = [
    "rgba(0, 255, 136, 0.7)",
    "rgba(0, 238, 255, 0.7)",
    "rgba(255, 0, 200, 0.7)",
    "rgba(255, 255, 255, 0.7)",
];
const GLOW_COLORS: [&str; 2] = ["rgba(255, 0, 200, 0.3)", "rgba(0, 238, 255, 0.3)"];

/// `min + floor(r * span)`, with `r` clamped into `[0, 1)`.
fn pick(random: &mut impl FnMut() -> f64, min: u32, span: u32) -> u32 {
    let r = random().clamp(0.0, 0.999_999);
    min + (r * f64::from(span)).floor() as u32
}

fn between(random: &mut impl FnMut() -> f64, min: f64, span: f64) -> f64 {
    min + random().clamp(0.0, 1.0) * span
}

fn choose<'a>(random: &mut impl FnMut() -> f64, options: &[&'a str]) -> &'a str {
    options[pick(random, 0, options.len() as u32) as usize]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn tilt_transform(client_x: f64, client_y: f64, card: Rect) -> String {
    let offset_x = client_x - (card.left + card.width / 2.0);
    let offset_y = client_y - (card.top + card.height / 2.0);
    let rotate_y = offset_x * TILT_DEGREES_PER_PX;
    let rotate_x = -offset_y * TILT_DEGREES_PER_PX;

    format!(
        "perspective({TILT_PERSPECTIVE_PX}px) rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg) translateZ(10px)"
    )
}

/// Pointer position inside `rect` as percentages.
pub fn pointer_percent(client_x: f64, client_y: f64, rect: Rect) -> (f64, f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return (50.0, 50.0);
    }

    (
        (client_x - rect.left) / rect.width * 100.0,
        (client_y - rect.top) / rect.height * 100.0,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillAnimationConfig {
    pub start_delay_ms: u32,
    pub stagger_ms: u32,
    pub duration_ms: u32,
    pub steps: u32,
}

impl Default for SkillAnimationConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 300,
            stagger_ms: 100,
            duration_ms: 1_500,
            steps: 30,
        }
    }
}

impl SkillAnimationConfig {
    pub fn tick_ms(&self) -> u32 {
        self.duration_ms / self.steps.max(1)
    }

    pub fn start_after_ms(&self, index: usize) -> u32 {
        self.start_delay_ms + self.stagger_ms * index as u32
    }
}

/// Reads the leading integer of a width like `"85%"`, the way the markup
/// stores skill levels. Anything unparsable counts as zero.
pub fn parse_percent(value: &str) -> f64 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<f64>().map(|v| v.min(100.0)).unwrap_or(0.0)
}

/// Counts a skill bar up to its target in equal steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillProgress {
    target: f64,
    steps: u32,
    step: u32,
}

impl SkillProgress {
    pub fn new(target: f64, steps: u32) -> Self {
        Self {
            target,
            steps: steps.max(1),
            step: 0,
        }
    }

    pub fn width(&self) -> f64 {
        if self.is_done() {
            return self.target;
        }
        (self.target / f64::from(self.steps) * f64::from(self.step)).min(self.target)
    }

    pub fn label(&self) -> String {
        format!("{}%", self.width().round())
    }

    pub fn is_done(&self) -> bool {
        self.step >= self.steps
    }

    /// Moves one step forward and returns the new width.
    pub fn advance(&mut self) -> f64 {
        if !self.is_done() {
            self.step += 1;
        }
        self.width()
    }
}

pub const RIPPLE_MS: u32 = 600;

/// Buttons and project links ripple when clicked.
pub fn wants_ripple(class_name: &str, tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("button")
        || class_name
            .split_whitespace()
            .any(|class| class == "btn" || class == "view-project")
}

/// Delay before the `index`-th child of a revealed section fades in.
pub fn reveal_delay_ms(index: usize) -> u32 {
    100 + 100 * index as u32
}

/// Typing animation length in seconds, capped so long paragraphs stay snappy.
pub fn typewriter_duration_secs(text_len: usize) -> f64 {
    (text_len as f64 * 0.03).min(3.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingBlob {
    pub size_px: u32,
    pub left_pct: u32,
    pub top_pct: u32,
    pub duration_s: u32,
    pub delay_s: u32,
    pub hue: u32,
}

impl FloatingBlob {
    pub fn generate(random: &mut impl FnMut() -> f64) -> Self {
        Self {
            size_px: pick(random, 50, 200),
            left_pct: pick(random, 0, 100),
            top_pct: pick(random, 0, 100),
            duration_s: pick(random, 20, 20),
            delay_s: pick(random, 0, 10),
            hue: pick(random, 0, 360),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {left}%; top: {top}%; animation-duration: {duration}s; animation-delay: -{delay}s; background: radial-gradient(circle, hsla({hue}, 100%, 70%, 0.1), transparent 70%);",
            size = self.size_px,
            left = self.left_pct,
            top = self.top_pct,
            duration = self.duration_s,
            delay = self.delay_s,
            hue = self.hue,
        )
    }
}

/// Between three and seven background blobs.
pub fn floating_blobs(random: &mut impl FnMut() -> f64) -> Vec<FloatingBlob> {
    let count = pick(random, 3, 5);
    (0..count).map(|_| FloatingBlob::generate(random)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub cell_size_px: u32,
    pub pool_capacity: usize,
    pub interval_ms: u32,
    pub glow_ms: u32,
    pub min_cells: u32,
    pub extra_cells: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 30,
            pool_capacity: 10,
            interval_ms: 3_000,
            glow_ms: 2_000,
            min_cells: 2,
            extra_cells: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlowCell {
    pub left_px: u32,
    pub top_px: u32,
    pub size_px: u32,
    pub color: &'static str,
}

/// Picks this tick's glowing cells on a grid covering the viewport.
pub fn plan_glow_cells(
    config: &GridConfig,
    viewport_width: f64,
    viewport_height: f64,
    random: &mut impl FnMut() -> f64,
) -> Vec<GlowCell> {
    let cell = config.cell_size_px.max(1);
    let columns = (viewport_width / f64::from(cell)).ceil().max(1.0) as u32;
    let rows = (viewport_height / f64::from(cell)).ceil().max(1.0) as u32;
    let count = pick(random, config.min_cells, config.extra_cells);

    (0..count)
        .map(|_| {
            let column = pick(random, 0, columns);
            let row = pick(random, 0, rows);
            GlowCell {
                left_px: column * cell,
                top_px: row * cell,
                size_px: cell,
                color: if random() > 0.5 { GLOW_COLORS[0] } else { GLOW_COLORS[1] },
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    pub pool_capacity: usize,
    pub ambient_count: usize,
    pub spawn_chance: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 10,
            ambient_count: 10,
            spawn_chance: 0.3,
        }
    }
}

/// A particle that drifts around a project image forever via CSS.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub color: &'static str,
}

impl AmbientParticle {
    pub fn generate(random: &mut impl FnMut() -> f64) -> Self {
        Self {
            left_pct: between(random, 0.0, 100.0),
            top_pct: between(random, 0.0, 100.0),
            size_px: between(random, 4.0, 6.0),
            duration_s: between(random, 2.0, 3.0),
            delay_s: between(random, 0.0, 4.0),
            drift_x: between(random, -40.0, 80.0),
            drift_y: between(random, -40.0, 80.0),
            color: choose(random, &NEON_PALETTE),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "left: {:.1}%; top: {:.1}%; width: {size:.1}px; height: {size:.1}px; background-color: {}; animation-duration: {:.2}s; animation-delay: {:.2}s; --drift-x: {:.1}px; --drift-y: {:.1}px;",
            self.left_pct,
            self.top_pct,
            self.color,
            self.duration_s,
            self.delay_s,
            self.drift_x,
            self.drift_y,
            size = self.size_px,
        )
    }
}

/// A particle spawned under the pointer, shown from the particle pool.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerParticle {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub color: &'static str,
}

impl PointerParticle {
    /// Rolls the spawn chance; most pointer moves produce nothing.
    pub fn roll(
        config: &ParticleConfig,
        left_pct: f64,
        top_pct: f64,
        random: &mut impl FnMut() -> f64,
    ) -> Option<Self> {
        if random() <= 1.0 - config.spawn_chance {
            return None;
        }

        Some(Self {
            left_pct,
            top_pct,
            color: choose(random, &NEON_PALETTE),
            size_px: between(random, 4.0, 6.0),
            duration_s: between(random, 1.0, 2.0),
            drift_x: between(random, -50.0, 100.0),
            drift_y: between(random, -50.0, 100.0),
        })
    }

    /// Fade-in plus fade-out time, after which the particle goes back to the pool.
    pub fn lifetime_ms(&self) -> u32 {
        (self.duration_s * 1_500.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut index = 0;
        move || {
            let value = values[index % values.len()];
            index += 1;
            value
        }
    }

    #[test]
    fn tilt_is_zero_at_card_center() {
        let card = Rect {
            left: 100.0,
            top: 100.0,
            width: 200.0,
            height: 100.0,
        };

        assert_eq!(
            tilt_transform(200.0, 150.0, card),
            "perspective(1000px) rotateX(-0.00deg) rotateY(0.00deg) translateZ(10px)"
        );
        assert_eq!(
            tilt_transform(300.0, 100.0, card),
            "perspective(1000px) rotateX(0.50deg) rotateY(1.00deg) translateZ(10px)"
        );
    }

    #[test]
    fn pointer_percent_handles_degenerate_rects() {
        let rect = Rect {
            left: 10.0,
            top: 20.0,
            width: 0.0,
            height: 40.0,
        };
        assert_eq!(pointer_percent(15.0, 30.0, rect), (50.0, 50.0));
    }

    #[test]
    fn skill_bar_counts_up_to_exact_target() {
        let mut progress = SkillProgress::new(85.0, 30);
        let mut last = 0.0;

        for _ in 0..29 {
            let width = progress.advance();
            assert!(width >= last);
            assert!(width <= 85.0);
            last = width;
        }

        assert!(!progress.is_done());
        assert_eq!(progress.advance(), 85.0);
        assert!(progress.is_done());
        assert_eq!(progress.advance(), 85.0);
        assert_eq!(progress.label(), "85%");
    }

    #[test]
    fn skill_level_parsing_matches_markup() {
        assert_eq!(parse_percent("90%"), 90.0);
        assert_eq!(parse_percent(" 75 "), 75.0);
        assert_eq!(parse_percent("n/a"), 0.0);
        assert_eq!(parse_percent("250%"), 100.0);
    }

    #[test]
    fn skill_timings_follow_stagger() {
        let config = SkillAnimationConfig::default();
        assert_eq!(config.tick_ms(), 50);
        assert_eq!(config.start_after_ms(0), 300);
        assert_eq!(config.start_after_ms(4), 700);
    }

    #[test]
    fn ripple_applies_to_buttons_and_project_links() {
        assert!(wants_ripple("", "BUTTON"));
        assert!(wants_ripple("btn btn-primary", "A"));
        assert!(wants_ripple("card view-project", "A"));
        assert!(!wants_ripple("btn-like", "DIV"));
    }

    #[test]
    fn reveal_and_typewriter_timings() {
        assert_eq!(reveal_delay_ms(0), 100);
        assert_eq!(reveal_delay_ms(3), 400);
        assert!((typewriter_duration_secs(50) - 1.5).abs() < 1e-9);
        assert_eq!(typewriter_duration_secs(1_000), 3.0);
    }

    #[test]
    fn floating_blob_count_stays_in_range() {
        assert_eq!(floating_blobs(&mut sequence(&[0.0])).len(), 3);
        assert_eq!(floating_blobs(&mut sequence(&[0.999])).len(), 7);
    }

    #[test]
    fn floating_blob_parameters_stay_in_range() {
        let blob = FloatingBlob::generate(&mut sequence(&[0.999]));
        assert_eq!(blob.size_px, 249);
        assert_eq!(blob.duration_s, 39);
        assert_eq!(blob.delay_s, 9);
        assert!(blob.style().contains("animation-delay: -9s"));
    }

    #[test]
    fn glow_cells_snap_to_grid_inside_viewport() {
        let config = GridConfig::default();
        let cells = plan_glow_cells(&config, 95.0, 60.0, &mut sequence(&[0.99, 0.99, 0.99, 0.2]));

        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert_eq!(cell.left_px % 30, 0);
            assert_eq!(cell.top_px % 30, 0);
            assert!(cell.left_px < 120);
            assert!(cell.top_px < 60);
        }
        assert_eq!(cells[0].color, GLOW_COLORS[1]);
    }

    #[test]
    fn glow_cell_count_is_between_two_and_four() {
        let config = GridConfig::default();
        assert_eq!(plan_glow_cells(&config, 300.0, 300.0, &mut sequence(&[0.0])).len(), 2);
    }

    #[test]
    fn pointer_particles_spawn_only_above_chance() {
        let config = ParticleConfig::default();

        assert!(PointerParticle::roll(&config, 10.0, 10.0, &mut sequence(&[0.5])).is_none());

        let particle = PointerParticle::roll(&config, 10.0, 20.0, &mut sequence(&[0.9, 0.0, 0.5]))
            .expect("roll above threshold");
        assert_eq!(particle.color, NEON_PALETTE[0]);
        assert_eq!(particle.size_px, 7.0);
        assert_eq!(particle.lifetime_ms(), 4_200);
    }
}
