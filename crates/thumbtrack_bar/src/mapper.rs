//! Content offset <-> indicator offset mapping
//!
//! Both directions are linear interpolations between the two spaces' bounds.
//! Indicator offsets past the track are rubber-banded. The band is stiffer or
//! softer depending on which space the input came from, so the stretch looks
//! the same whether the user drags the thumb or the content.

use thumbtrack_animation::RubberBand;
use thumbtrack_core::{interval, Axis};

use crate::bounds::OffsetBounds;

/// Where an out-of-bounds indicator offset originated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverscrollSource {
    /// The thumb itself is being dragged past its track
    Drag,
    /// The content is past its bounds (bounce, pull to refresh)
    Content,
}

/// Pure mapping between the two offset spaces along one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetMapper {
    pub axis: Axis,
    pub bounds: OffsetBounds,
    /// Default stiffness and upper clamp of the scaled coefficient
    pub coefficient: f64,
    /// Lower clamp of the scaled coefficient
    pub minimum_coefficient: f64,
}

impl OffsetMapper {
    pub fn new(axis: Axis, bounds: OffsetBounds, coefficient: f64, minimum_coefficient: f64) -> Self {
        Self {
            axis,
            bounds,
            coefficient,
            minimum_coefficient,
        }
    }

    /// `indicator range / content range`, if both ranges are usable
    pub fn size_ratio(&self) -> Option<f64> {
        let ratio =
            self.bounds.indicator_axis(self.axis).range() / self.bounds.content_axis(self.axis).range();
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }

    /// Rubber-band stiffness for an overscroll coming from `source`
    pub fn rubber_band_coefficient(&self, source: OverscrollSource) -> f64 {
        let Some(ratio) = self.size_ratio() else {
            return self.coefficient;
        };
        let scaled = match source {
            OverscrollSource::Drag => self.coefficient * ratio,
            OverscrollSource::Content => self.coefficient / ratio,
        };
        interval(self.minimum_coefficient, scaled, self.coefficient)
    }

    /// Compress an indicator offset that lies beyond the track
    pub fn rubber_band(&self, indicator_offset: f64, source: OverscrollSource) -> f64 {
        let band = RubberBand::new(
            self.rubber_band_coefficient(source),
            self.bounds.dimensions,
            self.bounds.indicator,
        );
        let point = self.axis.with_component(self.bounds.indicator.min(), indicator_offset);
        self.axis.component(band.clamp(point))
    }

    /// Content offset for a (possibly out of track) indicator offset
    pub fn to_content_offset(&self, indicator_offset: f64) -> f64 {
        let adjusted = self.rubber_band(indicator_offset, OverscrollSource::Drag);
        let content = self.bounds.content_axis(self.axis);
        match self.bounds.indicator_axis(self.axis).fraction(adjusted) {
            Some(fraction) => content.lerp(fraction),
            None => {
                tracing::trace!(axis = ?self.axis, "zero-width track, pinning content to min");
                content.min
            }
        }
    }

    /// Indicator offset for a content offset.
    ///
    /// With `adjust_for_overscroll` the result is rubber-banded inside the
    /// track, which is what a passive observer wants while content bounces.
    pub fn to_indicator_offset(&self, content_offset: f64, adjust_for_overscroll: bool) -> f64 {
        let indicator = self.bounds.indicator_axis(self.axis);
        let Some(fraction) = self.bounds.content_axis(self.axis).fraction(content_offset) else {
            tracing::trace!(axis = ?self.axis, "zero-width content range, pinning indicator to min");
            return indicator.min;
        };
        let offset = indicator.lerp(fraction);
        if adjust_for_overscroll {
            self.rubber_band(offset, OverscrollSource::Content)
        } else {
            offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::ScrollLayout;
    use thumbtrack_animation::DEFAULT_COEFFICIENT;
    use thumbtrack_core::{EdgeInsets, Size};

    fn mapper(content_height: f64) -> OffsetMapper {
        let layout = ScrollLayout::new(Size::new(300.0, content_height), Size::new(300.0, 300.0));
        let bounds = OffsetBounds::from_layout(
            &layout,
            Size::new(4.0, 60.0),
            EdgeInsets::new(8.0, 0.0, 8.0, 2.0),
        );
        OffsetMapper::new(Axis::Vertical, bounds, DEFAULT_COEFFICIENT, 0.1)
    }

    #[test]
    fn test_linear_mapping_between_spaces() {
        // content [0, 1000], indicator [8, 232]
        let mapper = mapper(1300.0);
        assert_eq!(mapper.to_indicator_offset(0.0, false), 8.0);
        assert_eq!(mapper.to_indicator_offset(1000.0, false), 232.0);
        assert_eq!(mapper.to_indicator_offset(500.0, false), 120.0);
        assert_eq!(mapper.to_content_offset(120.0), 500.0);
    }

    #[test]
    fn test_round_trip_inside_track() {
        let mapper = mapper(1300.0);
        for step in 0..=56 {
            let indicator = 8.0 + step as f64 * 4.0;
            let back = mapper.to_indicator_offset(mapper.to_content_offset(indicator), false);
            assert!((back - indicator).abs() < 1e-9, "{indicator} -> {back}");
        }
    }

    #[test]
    fn test_drag_past_track_resists() {
        let mapper = mapper(1300.0);
        let beyond = mapper.to_content_offset(300.0);
        assert!(beyond > 1000.0);
        // 68 points of thumb travel past the end maps to far less than 68 / 224 of the content
        assert!(beyond < 1000.0 + 68.0 / 224.0 * 1000.0);
    }

    #[test]
    fn test_overscroll_adjustment_keeps_indicator_near_track() {
        let mapper = mapper(1300.0);
        let raw = mapper.to_indicator_offset(-200.0, false);
        let adjusted = mapper.to_indicator_offset(-200.0, true);
        assert!(raw < adjusted && adjusted < 8.0);
        // Inside bounds the adjustment is the identity
        assert_eq!(mapper.to_indicator_offset(400.0, true), mapper.to_indicator_offset(400.0, false));
    }

    #[test]
    fn test_coefficient_scaling_by_source() {
        let mapper = mapper(1300.0);
        let ratio = mapper.size_ratio().unwrap();
        assert!((ratio - 0.224).abs() < 1e-12);
        let drag = mapper.rubber_band_coefficient(OverscrollSource::Drag);
        assert!((drag - DEFAULT_COEFFICIENT * 0.224).abs() < 1e-12);
        // 0.55 / 0.224 exceeds the default and is clamped to it
        assert_eq!(mapper.rubber_band_coefficient(OverscrollSource::Content), DEFAULT_COEFFICIENT);
    }

    #[test]
    fn test_coefficient_clamped_below() {
        // content range 100000, ratio 0.00224
        let mapper = mapper(100_300.0);
        assert_eq!(mapper.rubber_band_coefficient(OverscrollSource::Drag), 0.1);
    }

    #[test]
    fn test_content_equal_to_viewport_pins_indicator() {
        let mapper = mapper(300.0);
        for offset in [-100.0, 0.0, 0.0001, 50.0, 1e9] {
            let indicator = mapper.to_indicator_offset(offset, true);
            assert_eq!(indicator, 8.0);
            assert!(!indicator.is_nan());
        }
        assert_eq!(mapper.size_ratio(), None);
        assert_eq!(mapper.to_content_offset(100.0), 0.0);
    }
}
