//! Tests for name parsing and rendering.

use super::*;
use pretty_assertions::assert_eq;

fn prefixes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_tokenize_camel_and_separated() {
    assert_eq!(tokenize_words("UpperArm"), vec!["Upper", "Arm"]);
    assert_eq!(tokenize_words("Upper Arm"), vec!["Upper", "Arm"]);
    assert_eq!(tokenize_words("upper_arm"), vec!["upper", "arm"]);
    assert_eq!(tokenize_words("upper-arm.twist"), vec!["upper", "arm", "twist"]);
    assert_eq!(tokenize_words("upperArm"), vec!["upper", "Arm"]);
}

#[test]
fn test_tokenize_acronyms_and_digits() {
    assert_eq!(tokenize_words("HTTPServer"), vec!["HTTP", "Server"]);
    assert_eq!(tokenize_words("IK"), vec!["IK"]);
    assert_eq!(tokenize_words("Thumb2"), vec!["Thumb", "2"]);
    assert_eq!(tokenize_words("Spine01Twist"), vec!["Spine", "01", "Twist"]);
}

#[test]
fn test_tokenize_opaque_scripts() {
    assert_eq!(tokenize_words("腕"), vec!["腕"]);
    assert_eq!(tokenize_words("左腕 ひじ"), vec!["左腕 ひじ"]);
    assert_eq!(tokenize_words("arm#1"), vec!["arm#1"]);
    assert!(!is_tokenizable("腕"));
    assert!(is_tokenizable("Ärmel_Links"));
}

#[test]
fn test_tokenize_empty_and_separators_only() {
    assert!(tokenize_words("").is_empty());
    assert!(tokenize_words("__ ").is_empty());
}

#[test]
fn test_parse_suffix_convention() {
    let c = NameComponents::parse("UpperArm_L.001", &[]);
    assert_eq!(c.convention, Convention::CamelUnderscore);
    assert_eq!(c.custom_prefix, "");
    assert_eq!(c.base, "UpperArm");
    assert_eq!(c.base_words, vec!["Upper", "Arm"]);
    let side = c.side.as_ref().unwrap();
    assert_eq!(side.side, Side::Left);
    assert_eq!(side.form, SideForm::Short);
    assert_eq!(side.placement, SidePlacement::Suffix);
    assert_eq!(c.ordinal_suffix, ".001");
}

#[test]
fn test_parse_prefix_convention() {
    let c = NameComponents::parse("R_LowerLeg", &[]);
    assert_eq!(c.convention, Convention::SidePrefix);
    assert_eq!(c.base, "LowerLeg");
    assert_eq!(c.side.as_ref().unwrap().side, Side::Right);
    assert_eq!(c.side.as_ref().unwrap().placement, SidePlacement::Prefix);
}

#[test]
fn test_parse_generic_without_side() {
    let c = NameComponents::parse("Root", &[]);
    assert_eq!(c.convention, Convention::Generic);
    assert!(c.side.is_none());
    assert_eq!(c.base, "Root");
    assert_eq!(c.ordinal_suffix, "");

    let c = NameComponents::parse("Spine.003", &[]);
    assert_eq!(c.base, "Spine");
    assert_eq!(c.ordinal_suffix, ".003");
}

#[test]
fn test_parse_generic_salvages_loose_side() {
    let c = NameComponents::parse("upperArm_Left", &[]);
    assert_eq!(c.convention, Convention::Generic);
    let side = c.side.as_ref().unwrap();
    assert_eq!(side.side, Side::Left);
    assert_eq!(side.form, SideForm::Long);
    assert_eq!(side.delimiter, "_");
    assert_eq!(c.base_words, vec!["upper", "Arm"]);

    let c = NameComponents::parse("Hand Right", &[]);
    assert_eq!(c.side.as_ref().unwrap().side, Side::Right);
    assert_eq!(c.base_words, vec!["Hand"]);
}

#[test]
fn test_parse_empty_name() {
    let c = NameComponents::parse("", &[]);
    assert_eq!(c.convention, Convention::Generic);
    assert_eq!(c.render(Convention::CamelUnderscore), "");
}

#[test]
fn test_first_matching_prefix_is_stripped() {
    let list = prefixes(&["J_Bip_", "J_"]);
    let c = NameComponents::parse("J_Bip_UpperArm_L", &list);
    assert_eq!(c.custom_prefix, "J_Bip_");
    assert_eq!(c.base, "UpperArm");

    // Host order wins, not the longest match.
    let list = prefixes(&["J_", "J_Bip_"]);
    let c = NameComponents::parse("J_Bip_UpperArm_L", &list);
    assert_eq!(c.custom_prefix, "J_");
}

#[test]
fn test_unlisted_prefix_is_not_stripped() {
    let c = NameComponents::parse("Twist_UpperArm_L", &prefixes(&["Adj_"]));
    assert_eq!(c.custom_prefix, "");
    assert_eq!(c.convention, Convention::Generic);
    assert_eq!(c.base, "Twist_UpperArm");
    assert_eq!(c.base_words, vec!["Twist", "Upper", "Arm"]);
}

#[test]
fn test_round_trip_examples() {
    let names = [
        "UpperArm_L",
        "Upper Arm_R.002",
        "upper_arm_Left",
        "UpperArm.L",
        "Upper Arm.Right",
        "upper_arm.L.010",
        "L_UpperArm",
        "Right_Thumb2.001",
        "Root",
        "Spine.001",
        "upperArm_L",
        "腕_L",
        "Hand Left",
        "LeftEye",
        "R.hand.001",
    ];
    for name in names {
        let c = NameComponents::parse(name, &[]);
        assert_eq!(c.render(c.convention), name, "round trip via {}", c.convention);
    }
}

#[test]
fn test_round_trip_with_custom_prefix() {
    let list = prefixes(&["Twist_"]);
    for name in ["Twist_UpperArm_L", "Twist_Spine", "Twist_L_Hand"] {
        let c = NameComponents::parse(name, &list);
        assert_eq!(c.custom_prefix, "Twist_");
        assert_eq!(c.render(c.convention), name);
    }
}

#[test]
fn test_render_across_conventions() {
    let c = NameComponents::parse("UpperArm_L", &[]);
    let expected = [
        (Convention::CamelUnderscore, "UpperArm_L"),
        (Convention::SpacedUnderscore, "Upper Arm_L"),
        (Convention::SnakeUnderscore, "Upper_Arm_L"),
        (Convention::CamelDot, "UpperArm.L"),
        (Convention::SpacedDot, "Upper Arm.L"),
        (Convention::SnakeDot, "Upper_Arm.L"),
        (Convention::SidePrefix, "L_UpperArm"),
        (Convention::Generic, "UpperArm_L"),
    ];
    for (target, name) in expected {
        assert_eq!(c.render(target), name);
    }
}

#[test]
fn test_capitalize_only_for_concatenated_targets() {
    let c = NameComponents::parse("upper_arm.R", &[]);
    assert_eq!(c.render(Convention::CamelUnderscore), "UpperArm_R");
    assert_eq!(c.render(Convention::SpacedDot), "upper arm.R");
}

#[test]
fn test_side_normalization() {
    let mut c = NameComponents::parse("UpperArm_L", &[]);
    c.normalize_side(SideLength::Long);
    assert_eq!(c.render(Convention::SpacedDot), "Upper Arm.Left");
    c.normalize_side(SideLength::Short);
    assert_eq!(c.render(Convention::SpacedDot), "Upper Arm.L");

    let mut c = NameComponents::parse("Hand_Right", &[]);
    c.normalize_side(SideLength::Preserve);
    assert_eq!(c.render(Convention::CamelDot), "Hand.Right");
}

#[test]
fn test_sideless_name_never_gains_side() {
    let c = NameComponents::parse("Chest", &[]);
    for target in Convention::PRIORITY {
        assert_eq!(c.render(target), "Chest");
    }
}

#[test]
fn test_opaque_base_is_untouched() {
    let c = NameComponents::parse("左腕_L", &[]);
    assert_eq!(c.render(Convention::SpacedDot), "左腕.L");
    assert_eq!(c.render(Convention::SidePrefix), "L_左腕");
}

#[test]
fn test_parse_as_rejects_foreign_names() {
    assert!(NameComponents::parse_as("Upper Arm.L", Convention::CamelUnderscore).is_none());
    assert!(NameComponents::parse_as("Upper Arm.L", Convention::SpacedDot).is_some());
}

#[test]
fn test_side_token_base_parses_as_sideless() {
    for name in ["LeftRight", "RightL", "LeftL", "L_R"] {
        let c = NameComponents::parse(name, &[]);
        assert!(c.side.is_none(), "{}", name);
        assert_eq!(c.base, name);
    }
    assert!(NameComponents::parse_as("Left_L", Convention::CamelUnderscore).is_none());
}

#[test]
fn test_sideless_name_keeps_custom_prefix() {
    let c = NameComponents::parse("Twist_Spine.002", &prefixes(&["Twist_"]));
    assert!(c.side.is_none());
    assert_eq!(c.custom_prefix, "Twist_");
    for target in Convention::PRIORITY {
        assert_eq!(c.render(target), "Twist_Spine.002");
    }
}

#[test]
fn test_strip_custom_prefix_ignores_empty() {
    let list = prefixes(&["", "Adj_"]);
    assert_eq!(strip_custom_prefix("Adj_Hip", &list), ("Adj_", "Hip"));
    assert_eq!(strip_custom_prefix("Hip", &list), ("", "Hip"));
}

#[test]
fn test_sideless_base_is_kept_verbatim() {
    let c = NameComponents::parse("tail.x", &[]);
    assert!(c.side.is_none());
    for target in Convention::PRIORITY {
        assert_eq!(c.render(target), "tail.x");
    }
}
