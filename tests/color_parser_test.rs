use distui::config::{rgb_to_256_color, rgb_to_basic_ansi, ColorParser, Theme, ThemeConfig};
use ratatui::style::Color;

// Capabilities are fixed so results don't depend on the terminal running the tests
fn parser() -> ColorParser {
    ColorParser::with_capabilities(false, true)
}

#[test]
fn test_parse_named_colors() {
    let parser = parser();
    assert_eq!(parser.parse("red").unwrap(), Color::Red);
    assert_eq!(parser.parse("CYAN").unwrap(), Color::Cyan);
    assert_eq!(parser.parse("  white ").unwrap(), Color::White);
    assert_eq!(parser.parse("bright red").unwrap(), Color::Indexed(9));
    assert_eq!(parser.parse("bright_cyan").unwrap(), Color::Indexed(14));
    assert_eq!(parser.parse("dark_gray").unwrap(), Color::Indexed(8));
    assert_eq!(parser.parse("light grey").unwrap(), Color::Indexed(7));
    assert_eq!(parser.parse("reset").unwrap(), Color::Reset);
    assert!(parser.parse("unknowncolor").is_err());
}

#[test]
fn test_parse_indexed_colors() {
    let parser = parser();
    assert_eq!(parser.parse("indexed(0)").unwrap(), Color::Indexed(0));
    assert_eq!(parser.parse("Indexed(236)").unwrap(), Color::Indexed(236));
    assert!(parser.parse("indexed(999)").is_err());
    assert!(parser.parse("indexed(abc)").is_err());
    assert!(parser.parse("indexed()").is_err());
}

#[test]
fn test_parse_hex_by_capability() {
    assert_eq!(
        ColorParser::with_capabilities(true, true).parse("#FF8800").unwrap(),
        Color::Rgb(255, 136, 0)
    );
    assert_eq!(parser().parse("#ff0000").unwrap(), Color::Indexed(196));
    assert_eq!(
        ColorParser::with_capabilities(false, false)
            .parse("#00ff00")
            .unwrap(),
        Color::Green
    );
    assert!(parser().parse("#ff00").is_err());
    assert!(parser().parse("#gggggg").is_err());
}

#[test]
fn test_rgb_to_256_color() {
    assert_eq!(rgb_to_256_color(0, 0, 0), 16);
    assert_eq!(rgb_to_256_color(255, 255, 255), 231);
    assert_eq!(rgb_to_256_color(0, 0, 255), 21);
    assert_eq!(rgb_to_256_color(128, 128, 128), 244);
}

#[test]
fn test_rgb_to_basic_ansi() {
    assert_eq!(rgb_to_basic_ansi(200, 30, 30), Color::Red);
    assert_eq!(rgb_to_basic_ansi(30, 30, 200), Color::Blue);
    assert_eq!(rgb_to_basic_ansi(20, 20, 20), Color::Black);
    assert_eq!(rgb_to_basic_ansi(200, 200, 200), Color::White);
}

#[test]
fn test_theme_from_config() {
    let mut config = ThemeConfig::default();
    config.colors.curve = "#00ff00".to_string();
    config.colors.error = "bright_red".to_string();

    let theme = Theme::from_config_with(&config, &ColorParser::with_capabilities(true, true)).unwrap();
    assert_eq!(theme.get("curve"), Color::Rgb(0, 255, 0));
    assert_eq!(theme.get("error"), Color::Indexed(9));
    assert_eq!(theme.get_optional("border"), Some(Color::Cyan));
    assert_eq!(theme.get_optional("nonexistent"), None);
}

#[test]
fn test_theme_rejects_bad_color() {
    let mut config = ThemeConfig::default();
    config.colors.border = "plaid".to_string();
    assert!(Theme::from_config_with(&config, &parser()).is_err());
}
