//! Bike sizing
//!
//! Frame size recommendations from rider height, refined by inseam when known.

use std::fmt;

use clap::ValueEnum;
use thiserror::Error;

/// Shortest rider height accepted, in centimetres.
pub const MIN_HEIGHT_CM: u16 = 80;

/// Tallest rider height accepted, in centimetres.
pub const MAX_HEIGHT_CM: u16 = 230;

/// Accepted inseam range, in centimetres.
pub const INSEAM_RANGE_CM: (u16, u16) = (30, 110);

/// Errors raised by the size calculator.
#[derive(Debug, Error, PartialEq)]
pub enum SizingError {
    /// Height is outside the accepted range.
    #[error("height of {0} cm is outside {MIN_HEIGHT_CM}-{MAX_HEIGHT_CM} cm")]
    HeightOutOfRange(u16),

    /// Inseam is outside the accepted range.
    #[error(
        "inseam of {0} cm is outside {lo}-{hi} cm",
        lo = INSEAM_RANGE_CM.0,
        hi = INSEAM_RANGE_CM.1
    )]
    InseamOutOfRange(u16),

    /// Inseam is longer than the rider is tall.
    #[error("inseam of {inseam} cm is longer than height of {height} cm")]
    InseamAboveHeight {
        /// Rider height
        height: u16,
        /// Rider inseam
        inseam: u16,
    },

    /// The rider is too tall for the bike category.
    #[error("no {0} size fits a rider of {1} cm")]
    NoSizeForHeight(BikeKind, u16),
}

/// Bike category; each has its own size chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BikeKind {
    /// Mountain bikes, sized in inches
    Mountain,
    /// Road bikes, sized in centimetres
    Road,
    /// Hybrid and commuter bikes, sized in inches
    Hybrid,
    /// Kids bikes, sized by wheel diameter
    Kids,
}

impl fmt::Display for BikeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BikeKind::Mountain => "mountain",
            BikeKind::Road => "road",
            BikeKind::Hybrid => "hybrid",
            BikeKind::Kids => "kids",
        };

        f.write_str(name)
    }
}

/// One row of a size chart: riders up to `max_height_cm` take this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBand {
    /// Tallest rider (inclusive) for this band
    pub max_height_cm: u16,
    /// Size label shown to the shopper
    pub label: &'static str,
    /// Frame size range, or wheel size for kids bikes
    pub frame: &'static str,
}

const fn band(max_height_cm: u16, label: &'static str, frame: &'static str) -> SizeBand {
    SizeBand {
        max_height_cm,
        label,
        frame,
    }
}

const MOUNTAIN: &[SizeBand] = &[
    band(155, "XS", "13-14 in"),
    band(165, "S", "15-16 in"),
    band(175, "M", "17-18 in"),
    band(185, "L", "19-20 in"),
    band(195, "XL", "21-22 in"),
    band(MAX_HEIGHT_CM, "XXL", "23+ in"),
];

const ROAD: &[SizeBand] = &[
    band(155, "XS", "47-49 cm"),
    band(165, "S", "50-52 cm"),
    band(175, "M", "53-55 cm"),
    band(185, "L", "56-58 cm"),
    band(195, "XL", "58-60 cm"),
    band(MAX_HEIGHT_CM, "XXL", "61-63 cm"),
];

const HYBRID: &[SizeBand] = &[
    band(155, "XS", "14 in"),
    band(165, "S", "15-16 in"),
    band(175, "M", "17-18 in"),
    band(185, "L", "19-20 in"),
    band(195, "XL", "21-22 in"),
    band(MAX_HEIGHT_CM, "XXL", "23 in"),
];

const KIDS: &[SizeBand] = &[
    band(100, "2-4 yrs", "12 in wheel"),
    band(110, "3-5 yrs", "14 in wheel"),
    band(120, "4-6 yrs", "16 in wheel"),
    band(135, "6-9 yrs", "20 in wheel"),
    band(150, "9-12 yrs", "24 in wheel"),
    band(160, "12+ yrs", "26 in wheel"),
];

impl BikeKind {
    /// The size chart for this category, ordered by height.
    pub fn chart(self) -> &'static [SizeBand] {
        match self {
            BikeKind::Mountain => MOUNTAIN,
            BikeKind::Road => ROAD,
            BikeKind::Hybrid => HYBRID,
            BikeKind::Kids => KIDS,
        }
    }

    /// Multiplier from inseam to frame size, and the unit of the result.
    fn inseam_factor(self) -> Option<(f64, FrameUnit)> {
        match self {
            BikeKind::Mountain => Some((0.685, FrameUnit::Inches)),
            BikeKind::Road => Some((0.70, FrameUnit::Centimetres)),
            BikeKind::Hybrid => Some((0.66, FrameUnit::Inches)),
            BikeKind::Kids => None,
        }
    }
}

/// Unit of a frame measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnit {
    /// Inches (mountain and hybrid)
    Inches,
    /// Centimetres (road)
    Centimetres,
}

/// A frame size derived from the rider's inseam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMeasure {
    /// Frame size, rounded to one decimal place
    pub value: f64,
    /// Unit of `value`
    pub unit: FrameUnit,
}

impl fmt::Display for FrameMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            FrameUnit::Inches => write!(f, "{:.1} in", self.value),
            FrameUnit::Centimetres => write!(f, "{:.1} cm", self.value),
        }
    }
}

/// A size recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRecommendation {
    /// Category the recommendation is for
    pub kind: BikeKind,
    /// Band matched by height
    pub band: SizeBand,
    /// Frame size from inseam, when an inseam was given
    pub inseam_frame: Option<FrameMeasure>,
}

impl fmt::Display for SizeRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.band.label, self.band.frame)?;

        if let Some(frame) = self.inseam_frame {
            write!(f, ", {frame} frame by inseam")?;
        }

        Ok(())
    }
}

/// Recommend a size for a rider.
///
/// # Errors
///
/// Returns a [`SizingError`] if a measurement is out of range or the chart
/// has no size for the rider.
pub fn recommend_frame_size(
    kind: BikeKind,
    height_cm: u16,
    inseam_cm: Option<u16>,
) -> Result<SizeRecommendation, SizingError> {
    if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height_cm) {
        return Err(SizingError::HeightOutOfRange(height_cm));
    }

    if let Some(inseam) = inseam_cm {
        if !(INSEAM_RANGE_CM.0..=INSEAM_RANGE_CM.1).contains(&inseam) {
            return Err(SizingError::InseamOutOfRange(inseam));
        }

        if inseam >= height_cm {
            return Err(SizingError::InseamAboveHeight {
                height: height_cm,
                inseam,
            });
        }
    }

    let band = *kind
        .chart()
        .iter()
        .find(|band| height_cm <= band.max_height_cm)
        .ok_or(SizingError::NoSizeForHeight(kind, height_cm))?;

    let inseam_frame = inseam_cm
        .zip(kind.inseam_factor())
        .map(|(inseam, (factor, unit))| frame_from_inseam(inseam, factor, unit));

    Ok(SizeRecommendation {
        kind,
        band,
        inseam_frame,
    })
}

fn frame_from_inseam(inseam_cm: u16, factor: f64, unit: FrameUnit) -> FrameMeasure {
    let cm = f64::from(inseam_cm) * factor;

    let value = match unit {
        FrameUnit::Inches => cm / 2.54,
        FrameUnit::Centimetres => cm,
    };

    FrameMeasure {
        value: (value * 10.0).round() / 10.0,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn height_picks_band() -> TestResult {
        let rec = recommend_frame_size(BikeKind::Mountain, 170, None)?;

        assert_eq!(rec.band.label, "M");
        assert_eq!(rec.inseam_frame, None);

        Ok(())
    }

    #[test]
    fn band_upper_bound_is_inclusive() -> TestResult {
        assert_eq!(recommend_frame_size(BikeKind::Road, 165, None)?.band.label, "S");
        assert_eq!(recommend_frame_size(BikeKind::Road, 166, None)?.band.label, "M");

        Ok(())
    }

    #[test]
    fn inseam_refines_mountain_frame_in_inches() -> TestResult {
        let rec = recommend_frame_size(BikeKind::Mountain, 178, Some(81))?;

        // 81 × 0.685 / 2.54 = 21.84
        assert_eq!(
            rec.inseam_frame,
            Some(FrameMeasure {
                value: 21.8,
                unit: FrameUnit::Inches
            })
        );
        assert_eq!(rec.to_string(), "L (19-20 in), 21.8 in frame by inseam");

        Ok(())
    }

    #[test]
    fn inseam_refines_road_frame_in_centimetres() -> TestResult {
        let rec = recommend_frame_size(BikeKind::Road, 178, Some(80))?;

        assert_eq!(
            rec.inseam_frame,
            Some(FrameMeasure {
                value: 56.0,
                unit: FrameUnit::Centimetres
            })
        );

        Ok(())
    }

    #[test]
    fn kids_sizes_ignore_inseam() -> TestResult {
        let rec = recommend_frame_size(BikeKind::Kids, 118, Some(50))?;

        assert_eq!(rec.band.frame, "16 in wheel");
        assert_eq!(rec.inseam_frame, None);

        Ok(())
    }

    #[test]
    fn range_errors_name_the_limits() {
        assert_eq!(
            SizingError::InseamOutOfRange(5).to_string(),
            "inseam of 5 cm is outside 30-110 cm"
        );
        assert_eq!(
            SizingError::HeightOutOfRange(20).to_string(),
            "height of 20 cm is outside 80-230 cm"
        );
    }

    #[test]
    fn kids_chart_tops_out() {
        assert_eq!(
            recommend_frame_size(BikeKind::Kids, 175, None),
            Err(SizingError::NoSizeForHeight(BikeKind::Kids, 175))
        );
    }

    #[test]
    fn out_of_range_measurements_are_rejected() {
        assert_eq!(
            recommend_frame_size(BikeKind::Hybrid, 0, None),
            Err(SizingError::HeightOutOfRange(0))
        );
        assert_eq!(
            recommend_frame_size(BikeKind::Hybrid, 170, Some(5)),
            Err(SizingError::InseamOutOfRange(5))
        );
        assert_eq!(
            recommend_frame_size(BikeKind::Hybrid, 100, Some(100)),
            Err(SizingError::InseamAboveHeight {
                height: 100,
                inseam: 100
            })
        );
    }
}
