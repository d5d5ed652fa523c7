//! Colour scheme generation on the RYB wheel
//!
//! A scheme starts at a base hue and walks the wheel by a fixed turn
//! sequence, adjusting saturation and lightness of every colour it visits.
//! `invert` undoes that adjustment for a single edited colour so the base
//! parameters can be recovered from it.

use crate::color::{clamp_unit, wrap_unit, Color};
use crate::ryb::{rgb_hue_to_ryb_hue, ryb_hue_to_rgb};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Most swatches a display surface shows at once
pub const MAX_VISIBLE: usize = 5;

/// Reference saturation at or below this is treated as achromatic
const ACHROMATIC_EPSILON: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemeError {
    #[error("unknown scheme type index {0}")]
    InvalidType(i32),
}

/// Colour harmony patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemeType {
    #[default]
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Tetradic,
    Square,
    Neutral,
}

/// Fixed shape of a scheme: how many colours follow the base and how far apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeShape {
    pub colors: usize,
    pub turns: &'static [f64],
}

impl SchemeType {
    pub fn all() -> &'static [SchemeType] {
        &[
            SchemeType::Complementary,
            SchemeType::Analogous,
            SchemeType::Triadic,
            SchemeType::SplitComplementary,
            SchemeType::Tetradic,
            SchemeType::Square,
            SchemeType::Neutral,
        ]
    }

    pub const fn shape(self) -> SchemeShape {
        match self {
            SchemeType::Complementary => SchemeShape { colors: 1, turns: &[180.0] },
            SchemeType::Analogous => SchemeShape { colors: 4, turns: &[30.0] },
            SchemeType::Triadic => SchemeShape { colors: 2, turns: &[120.0] },
            SchemeType::SplitComplementary => SchemeShape { colors: 2, turns: &[150.0, 60.0] },
            SchemeType::Tetradic => SchemeShape { colors: 3, turns: &[60.0, 120.0] },
            SchemeType::Square => SchemeShape { colors: 3, turns: &[90.0] },
            SchemeType::Neutral => SchemeShape { colors: 4, turns: &[15.0] },
        }
    }

    /// Number of colours a generated scheme holds, base included
    pub const fn color_count(self) -> usize {
        self.shape().colors + 1
    }

    /// Turn (in turns, not degrees) taken after the colour at `step`
    pub fn turn(self, step: usize) -> f64 {
        let turns = self.shape().turns;
        turns[step % turns.len()] / 360.0
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchemeType::Complementary => "Complementary",
            SchemeType::Analogous => "Analogous",
            SchemeType::Triadic => "Triadic",
            SchemeType::SplitComplementary => "Split-Complementary",
            SchemeType::Tetradic => "Rectangle (tetradic)",
            SchemeType::Square => "Square",
            SchemeType::Neutral => "Neutral",
        }
    }

    pub fn index(&self) -> i32 {
        match self {
            SchemeType::Complementary => 0,
            SchemeType::Analogous => 1,
            SchemeType::Triadic => 2,
            SchemeType::SplitComplementary => 3,
            SchemeType::Tetradic => 4,
            SchemeType::Square => 5,
            SchemeType::Neutral => 6,
        }
    }

    pub fn from_index(idx: i32) -> Result<SchemeType, SchemeError> {
        usize::try_from(idx)
            .ok()
            .and_then(|i| Self::all().get(i).copied())
            .ok_or(SchemeError::InvalidType(idx))
    }

    pub fn next(self) -> SchemeType {
        let all = Self::all();
        all[(self.index() as usize + 1) % all.len()]
    }

    pub fn prev(self) -> SchemeType {
        let all = Self::all();
        all[(self.index() as usize + all.len() - 1) % all.len()]
    }
}

/// Inputs of one generation pass, in slider units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Base hue in degrees, [0, 360)
    pub base_hue: f64,
    /// Saturation multiplier in percent, [0, 120]
    pub saturation_pct: f64,
    /// Lightness shift in percent, [-50, 80]
    pub lightness_pct: f64,
    pub scheme_type: SchemeType,
    /// Random spread added to every turn, [0, 1)
    pub chaos: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            base_hue: 180.0,
            saturation_pct: 100.0,
            lightness_pct: 0.0,
            scheme_type: SchemeType::Complementary,
            chaos: 0.0,
        }
    }
}

/// One colour of a scheme, with the hue rotation that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratedColor {
    pub rgb: Color,
    /// Cumulative turn from the base hue, [0, 1)
    pub hue_offset: f64,
}

/// Slider positions recovered from an edited colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderValues {
    /// Degrees, [0, 360)
    pub hue: f64,
    /// Percent
    pub saturation: f64,
    /// Percent, signed
    pub lightness: f64,
}

/// Colour at `hue` (RYB turns) after the saturation factor and lightness shift
fn adjust(hue: f64, saturation: f64, lightness: f64) -> Color {
    let mut hsl = ryb_hue_to_rgb(hue).to_hsl();
    hsl.lightness = clamp_unit(hsl.lightness + lightness);
    hsl.saturation = clamp_unit(hsl.saturation * saturation);
    hsl.to_rgb()
}

/// Walk the wheel from the base hue and collect every colour of the scheme
pub fn generate<R: Rng>(params: &GenerationParams, rng: &mut R) -> Vec<GeneratedColor> {
    let scheme = params.scheme_type;
    let saturation = params.saturation_pct / 100.0;
    let lightness = params.lightness_pct / 100.0;

    let mut hue = wrap_unit(params.base_hue / 360.0);
    let mut hue_offset = 0.0;
    let mut colors = Vec::with_capacity(scheme.color_count());

    for step in 0..scheme.color_count() {
        colors.push(GeneratedColor {
            rgb: adjust(hue, saturation, lightness),
            hue_offset,
        });

        let mut hue_step = scheme.turn(step);
        if params.chaos > 0.0 {
            hue_step += params.chaos * (rng.random::<f64>() - 0.5);
        }
        hue = wrap_unit(hue + hue_step);
        hue_offset = wrap_unit(hue_offset + hue_step);
    }

    debug!(
        scheme = scheme.label(),
        base_hue = params.base_hue,
        count = colors.len(),
        "generated scheme"
    );
    colors
}

/// Divide without blowing up on an achromatic reference
fn saturation_factor(edited: f64, reference: f64) -> f64 {
    if reference <= ACHROMATIC_EPSILON {
        1.0
    } else {
        edited / reference
    }
}

/// Recover the slider values that make `edited` appear at the position
/// recorded by `hue_offset`
pub fn invert(edited: Color, hue_offset: f64) -> SliderValues {
    let hsl = edited.to_hsl();
    let ryb_hue = rgb_hue_to_ryb_hue(hsl.hue);
    let shifted_hue = wrap_unit(ryb_hue - hue_offset);

    let reference = ryb_hue_to_rgb(ryb_hue).to_hsl();
    let saturation = saturation_factor(hsl.saturation, reference.saturation);
    let lightness = hsl.lightness - reference.lightness;

    let values = SliderValues {
        hue: shifted_hue * 360.0,
        saturation: saturation * 100.0,
        lightness: lightness * 100.0,
    };
    debug!(color = %edited, hue_offset, ?values, "inverted edited colour");
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn params(base_hue: f64, scheme_type: SchemeType) -> GenerationParams {
        GenerationParams {
            base_hue,
            saturation_pct: 100.0,
            lightness_pct: 0.0,
            scheme_type,
            chaos: 0.0,
        }
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 1.0;
        d.min(1.0 - d)
    }

    #[test]
    fn test_shape_table() {
        let expected = vec![
            (1, vec![180.0]),
            (4, vec![30.0]),
            (2, vec![120.0]),
            (2, vec![150.0, 60.0]),
            (3, vec![60.0, 120.0]),
            (3, vec![90.0]),
            (4, vec![15.0]),
        ];
        for (scheme, (colors, turns)) in SchemeType::all().iter().zip(expected) {
            assert_eq!(scheme.shape().colors, colors);
            assert_eq!(scheme.shape().turns.to_vec(), turns);
            assert_eq!(scheme.color_count(), colors + 1);
        }
    }

    #[test]
    fn test_index_roundtrip_and_range_check() {
        for &scheme in SchemeType::all() {
            assert_eq!(SchemeType::from_index(scheme.index()), Ok(scheme));
        }
        assert_eq!(SchemeType::from_index(7), Err(SchemeError::InvalidType(7)));
        assert_eq!(SchemeType::from_index(-1), Err(SchemeError::InvalidType(-1)));
    }

    #[test]
    fn test_next_prev_cycle() {
        assert_eq!(SchemeType::Neutral.next(), SchemeType::Complementary);
        assert_eq!(SchemeType::Complementary.prev(), SchemeType::Neutral);
        assert_eq!(SchemeType::Triadic.next().prev(), SchemeType::Triadic);
    }

    #[test]
    fn test_complementary_scenario() {
        let colors = generate(&params(0.0, SchemeType::Complementary), &mut rng());
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].hue_offset, 0.0);
        assert!((colors[1].hue_offset - 0.5).abs() < 1e-12);
        // Red base at full saturation is the wheel's red anchor
        assert_eq!(colors[0].rgb.to_rgb8(), [255, 0, 0]);
    }

    #[test]
    fn test_analogous_offsets() {
        let colors = generate(&params(40.0, SchemeType::Analogous), &mut rng());
        let offsets: Vec<f64> = colors.iter().map(|c| c.hue_offset).collect();
        assert_eq!(offsets.len(), 5);
        for (i, offset) in offsets.iter().enumerate() {
            assert!((offset - i as f64 / 12.0).abs() < 1e-12, "offset {} = {}", i, offset);
        }
    }

    #[test]
    fn test_split_complementary_alternates_turns() {
        let colors = generate(&params(0.0, SchemeType::SplitComplementary), &mut rng());
        let offsets: Vec<f64> = colors.iter().map(|c| c.hue_offset).collect();
        assert!((offsets[1] - 150.0 / 360.0).abs() < 1e-12);
        assert!((offsets[2] - 210.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        // Square: four 90 degree turns add up to one full turn
        let scheme = SchemeType::Square;
        let start = 0.3;
        let total: f64 = (0..4).map(|i| scheme.turn(i)).sum();
        assert!(hue_distance(wrap_unit(start + total), start) < 1e-12);

        // Tetradic: 60 + 120 + 60 + 120
        let scheme = SchemeType::Tetradic;
        let total: f64 = (0..4).map(|i| scheme.turn(i)).sum();
        assert!(hue_distance(wrap_unit(start + total), start) < 1e-12);
    }

    #[test]
    fn test_chaos_is_deterministic_per_seed_and_stays_in_range() {
        let mut p = params(90.0, SchemeType::Neutral);
        p.chaos = 0.9;
        let a = generate(&p, &mut StdRng::seed_from_u64(42));
        let b = generate(&p, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.iter().all(|c| (0.0..1.0).contains(&c.hue_offset)));

        let calm = generate(&params(90.0, SchemeType::Neutral), &mut rng());
        assert_ne!(a, calm);
    }

    #[test]
    fn test_lightness_clamps_instead_of_wrapping() {
        let mut p = params(200.0, SchemeType::Analogous);
        p.lightness_pct = 80.0;
        for c in generate(&p, &mut rng()) {
            assert_eq!(c.rgb.to_rgb8(), [255, 255, 255]);
        }
        p.lightness_pct = -50.0;
        p.saturation_pct = 120.0;
        for c in generate(&p, &mut rng()) {
            let hsl = c.rgb.to_hsl();
            assert!((0.0..=1.0).contains(&hsl.lightness));
            assert!((0.0..=1.0).contains(&hsl.saturation));
        }
    }

    #[test]
    fn test_saturation_factor_guard() {
        assert_eq!(saturation_factor(0.5, 0.0), 1.0);
        assert_eq!(saturation_factor(0.5, 1e-9), 1.0);
        assert_eq!(saturation_factor(0.5, 0.25), 2.0);
    }

    #[test]
    fn test_invert_neutral_saturation_is_finite() {
        let mut p = params(120.0, SchemeType::Triadic);
        p.saturation_pct = 0.0;
        for c in generate(&p, &mut rng()) {
            let values = invert(c.rgb, c.hue_offset);
            assert!(values.saturation.is_finite());
            assert!(values.lightness.is_finite());
            assert!((0.0..360.0).contains(&values.hue));
        }
    }

    #[test]
    fn test_invert_of_gray_uses_red_reference() {
        let values = invert(Color::new(0.5, 0.5, 0.5), 0.0);
        assert!(values.hue < 1e-9);
        assert_eq!(values.saturation, 0.0);
        assert!(values.lightness.abs() < 1e-9);
    }

    fn scheme_strategy() -> impl Strategy<Value = SchemeType> {
        (0..SchemeType::all().len()).prop_map(|i| SchemeType::all()[i])
    }

    proptest! {
        #[test]
        fn prop_count_and_offset_range(
            scheme in scheme_strategy(),
            base_hue in 0.0f64..360.0,
            saturation_pct in 0.0f64..=120.0,
            lightness_pct in -50.0f64..=80.0,
            chaos in 0.0f64..1.0,
            seed in any::<u64>(),
        ) {
            let p = GenerationParams { base_hue, saturation_pct, lightness_pct, scheme_type: scheme, chaos };
            let colors = generate(&p, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(colors.len(), scheme.shape().colors + 1);
            for c in &colors {
                prop_assert!((0.0..1.0).contains(&c.hue_offset));
                for channel in [c.rgb.red, c.rgb.green, c.rgb.blue] {
                    prop_assert!((-1e-12..=1.0 + 1e-12).contains(&channel));
                }
            }
        }

        #[test]
        fn prop_invert_recovers_params(
            scheme in scheme_strategy(),
            base_hue in 0.0f64..360.0,
            saturation_pct in 10.0f64..=100.0,
            lightness_pct in -25.0f64..=40.0,
        ) {
            let p = GenerationParams { base_hue, saturation_pct, lightness_pct, scheme_type: scheme, chaos: 0.0 };
            for c in generate(&p, &mut rng()) {
                let values = invert(c.rgb, c.hue_offset);
                prop_assert!(hue_distance(values.hue / 360.0, base_hue / 360.0) < 1e-6,
                    "hue {} vs {}", values.hue, base_hue);
                prop_assert!((values.saturation - saturation_pct).abs() < 1e-4,
                    "saturation {} vs {}", values.saturation, saturation_pct);
                prop_assert!((values.lightness - lightness_pct).abs() < 1e-4,
                    "lightness {} vs {}", values.lightness, lightness_pct);
            }
        }
    }
}
