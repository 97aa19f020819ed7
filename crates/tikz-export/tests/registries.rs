//! Tests for the color and style registries

use proptest::prelude::*;
use tikz_export::prelude::*;

fn color() -> impl Strategy<Value = Color> {
    // A small channel range makes repeats likely
    (0u8..4, 0u8..4, 0u8..4).prop_map(|(r, g, b)| Color::rgb(r * 85, g * 85, b * 85))
}

proptest! {
    #[test]
    fn prop_names_follow_first_seen_order(colors in prop::collection::vec(color(), 0..40)) {
        let mut registry = ColorRegistry::new();
        let mut seen: Vec<Color> = Vec::new();

        for color in colors {
            let name = registry.resolve_name(color);
            if color == Color::BLACK {
                prop_assert_eq!(name, "black");
            } else if color == Color::WHITE {
                prop_assert_eq!(name, "white");
            } else {
                let index = match seen.iter().position(|c| *c == color) {
                    Some(index) => index,
                    None => {
                        seen.push(color);
                        seen.len() - 1
                    }
                };
                prop_assert_eq!(name, format!("colorDef{:02}", index));
            }
        }

        prop_assert_eq!(registry.len(), seen.len());
    }

    #[test]
    fn prop_resolving_again_never_allocates(colors in prop::collection::vec(color(), 1..20)) {
        let mut registry = ColorRegistry::new();
        let first: Vec<String> = colors.iter().map(|c| registry.resolve_name(*c)).collect();
        let len = registry.len();
        let second: Vec<String> = colors.iter().map(|c| registry.resolve_name(*c)).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(registry.len(), len);
    }
}

#[test]
fn test_definitions_in_registration_order() {
    let mut colors = ColorRegistry::new();
    colors.add(Color::rgb(0, 0, 255));
    colors.add(Color::BLACK);
    colors.add(Color::rgb(255, 0, 0));

    let definitions: Vec<String> = colors.definitions().collect();
    assert_eq!(
        definitions,
        vec![
            r"\definecolor{colorDef00}{rgb}{0.000000,0.000000,1.000000}",
            r"\definecolor{colorDef01}{rgb}{1.000000,0.000000,0.000000}",
        ]
    );
}

#[test]
fn test_major_grid_slot_is_overwritten() {
    let mut colors = ColorRegistry::new();
    let mut options = StyleRegistry::new();
    options.set_major_grid_style(&mut colors, Color::rgb(1, 2, 3), DashStyle::Dashed, 4);
    options.set_major_grid_style(&mut colors, Color::BLACK, DashStyle::Dotted, 2);

    let major: Vec<&String> = options
        .directives()
        .iter()
        .filter(|d| d.starts_with("major grid style="))
        .collect();
    assert_eq!(major.len(), 1);
    assert_eq!(
        major[0],
        "major grid style={color=black,dotted,line width=1pt}"
    );
    assert_eq!(options.len(), 4);
}

#[test]
fn test_appended_directives_keep_order() {
    let mut options = StyleRegistry::new();
    options.add_colormap(&Colormap::jet());
    options.add_directive("   ");
    options.add_colormap(&Colormap::gray());
    options.set_compatibility("1.18");

    assert_eq!(options.len(), 7);
    let lines: Vec<String> = tikz_export::element_lines(&options).collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], r"\pgfplotsset{compat=1.18}");
    assert!(lines[4].starts_with(r"\pgfplotsset{colormap={jet}"));
    assert!(lines[5].starts_with(r"\pgfplotsset{colormap={gray}"));
}

#[test]
fn test_context_registries_are_fresh_per_export() {
    let config = ExportConfig::default();
    let mut first = ExportContext::new(&config);
    first.color_name(Color::rgb(9, 9, 9));

    let second = ExportContext::new(&config);
    assert!(second.colors.is_empty());
    assert_eq!(second.options, StyleRegistry::new());
}
