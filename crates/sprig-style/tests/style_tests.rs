//! Tests for style defaults, dimension resolution and axis helpers.

use std::str::FromStr;

use sprig_style::math::{clamp_size, sanitize_length};
use sprig_style::{
    AlignItems, AlignSelf, Dimension, Direction, FlexDirection, JustifyContent, MaybeMath, Rect,
    Size, Style,
};

// ========== defaults ==========

#[test]
fn test_default_style_matches_flexbox_initial_values() {
    let style = Style::default();
    assert_eq!(style.flex_direction, FlexDirection::Row);
    assert_eq!(style.align_items, AlignItems::Stretch);
    assert_eq!(style.align_self, AlignSelf::Auto);
    assert_eq!(style.justify_content, JustifyContent::FlexStart);
    assert_eq!(style.flex_grow, 0.0);
    assert_eq!(style.flex_shrink, 0.0);
    assert_eq!(style.flex_basis, Dimension::Auto);
    assert_eq!(style.size, Size::AUTO);
    assert_eq!(style.margin, Rect::uniform(Dimension::Undefined));
    assert_eq!(style.aspect_ratio, None);
}

#[test]
fn test_empty_json_object_is_default_style() {
    let style: Style = serde_json::from_str("{}").unwrap();
    assert_eq!(style, Style::DEFAULT);
}

#[test]
fn test_json_keywords_and_dimensions() {
    let style: Style = serde_json::from_str(
        r#"{
            "flex_direction": "column-reverse",
            "justify_content": "space-evenly",
            "size": {"width": {"unit": "points", "value": 120.0}},
            "margin": {"start": {"unit": "auto"}},
            "flex_basis": {"unit": "percent", "value": 0.25}
        }"#,
    )
    .unwrap();
    assert_eq!(style.flex_direction, FlexDirection::ColumnReverse);
    assert_eq!(style.justify_content, JustifyContent::SpaceEvenly);
    assert_eq!(style.size.width, Dimension::Points(120.0));
    assert_eq!(style.size.height, Dimension::Undefined);
    assert_eq!(style.margin.start, Dimension::Auto);
    assert_eq!(style.margin.end, Dimension::Undefined);
    assert_eq!(style.flex_basis, Dimension::Percent(0.25));
}

#[test]
fn test_keywords_display_as_css() {
    assert_eq!(FlexDirection::RowReverse.to_string(), "row-reverse");
    assert_eq!(JustifyContent::SpaceBetween.to_string(), "space-between");
    assert_eq!(
        AlignItems::from_str("flex-end").unwrap(),
        AlignItems::FlexEnd
    );
}

// ========== dimension ==========

#[test]
fn test_points_resolve_without_reference() {
    assert_eq!(Dimension::Points(10.0).resolve(None), Some(10.0));
}

#[test]
fn test_percent_needs_definite_reference() {
    assert_eq!(Dimension::Percent(0.5).resolve(Some(300.0)), Some(150.0));
    assert_eq!(Dimension::Percent(0.5).resolve(None), None);
}

#[test]
fn test_auto_and_undefined_are_indefinite() {
    assert_eq!(Dimension::Auto.resolve(Some(100.0)), None);
    assert_eq!(Dimension::Undefined.resolve(Some(100.0)), None);
    assert_eq!(Dimension::Auto.resolve_or_zero(Some(100.0)), 0.0);
}

#[test]
fn test_non_finite_points_are_indefinite() {
    assert_eq!(Dimension::Points(f32::NAN).resolve(None), None);
    assert_eq!(Dimension::Points(f32::INFINITY).resolve(None), None);
}

#[test]
fn test_edges_resolve_against_inline_reference() {
    let padding = Rect {
        start: Dimension::Percent(0.1),
        end: Dimension::Points(4.0),
        top: Dimension::Percent(0.1),
        bottom: Dimension::Auto,
    };
    let resolved = padding.resolve_edges(Some(200.0));
    assert_eq!(resolved.start, 20.0);
    assert_eq!(resolved.end, 4.0);
    assert_eq!(resolved.top, 20.0);
    assert_eq!(resolved.bottom, 0.0);
}

// ========== axes ==========

#[test]
fn test_main_and_cross_follow_flex_direction() {
    let size = Size {
        width: 10.0,
        height: 20.0,
    };
    assert_eq!(size.main(FlexDirection::Row), 10.0);
    assert_eq!(size.cross(FlexDirection::Row), 20.0);
    assert_eq!(size.main(FlexDirection::ColumnReverse), 20.0);
    assert_eq!(size.cross(FlexDirection::ColumnReverse), 10.0);

    let rebuilt = Size::from_main_cross(FlexDirection::Column, 20.0, 10.0);
    assert_eq!(rebuilt, size);
}

#[test]
fn test_rect_edges_follow_flex_direction() {
    let rect = Rect {
        start: 1.0,
        end: 2.0,
        top: 3.0,
        bottom: 4.0,
    };
    assert_eq!(rect.main_start(FlexDirection::Row), 1.0);
    assert_eq!(rect.cross_end(FlexDirection::Row), 4.0);
    assert_eq!(rect.main_start(FlexDirection::Column), 3.0);
    assert_eq!(rect.cross_start(FlexDirection::Column), 1.0);
    assert_eq!(rect.main(FlexDirection::Column), 7.0);
    assert_eq!(rect.cross(FlexDirection::Column), 3.0);
}

#[test]
fn test_direction_inherits_from_parent() {
    assert_eq!(Direction::Inherit.resolve(Direction::Rtl), Direction::Rtl);
    assert_eq!(Direction::Inherit.resolve(Direction::Inherit), Direction::Ltr);
    assert_eq!(Direction::Ltr.resolve(Direction::Rtl), Direction::Ltr);
}

#[test]
fn test_align_self_auto_takes_parent_align_items() {
    assert_eq!(AlignSelf::Auto.resolve(AlignItems::Center), AlignItems::Center);
    assert_eq!(AlignSelf::FlexEnd.resolve(AlignItems::Center), AlignItems::FlexEnd);
}

// ========== math ==========

#[test]
fn test_maybe_math_ignores_indefinite_rhs() {
    assert_eq!(Some(5.0_f32).maybe_min(None::<f32>), Some(5.0));
    assert_eq!(Some(5.0_f32).maybe_max(Some(7.0_f32)), Some(7.0));
    assert_eq!(None::<f32>.maybe_add(Some(7.0_f32)), None);
    assert_eq!(10.0_f32.maybe_sub(Some(4.0)), 6.0);
}

#[test]
fn test_clamp_prefers_min_over_max() {
    assert_eq!(clamp_size(50.0, Some(10.0), Some(40.0)), 40.0);
    assert_eq!(clamp_size(50.0, Some(60.0), Some(40.0)), 60.0);
    assert_eq!(clamp_size(50.0, None, None), 50.0);
}

#[test]
fn test_sanitize_length() {
    assert_eq!(sanitize_length(-3.0), 0.0);
    assert_eq!(sanitize_length(f32::NAN), 0.0);
    assert_eq!(sanitize_length(f32::INFINITY), 0.0);
    assert_eq!(sanitize_length(12.5), 12.5);
}

#[test]
fn test_flex_factors_ignore_negative_values() {
    let style = Style {
        flex_grow: -1.0,
        flex_shrink: f32::NAN,
        aspect_ratio: Some(0.0),
        ..Style::default()
    };
    assert_eq!(style.grow_factor(), 0.0);
    assert_eq!(style.shrink_factor(), 0.0);
    assert_eq!(style.used_aspect_ratio(), None);
}
