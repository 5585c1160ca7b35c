/*
 *  tests/display_integration.rs
 *
 *  Integration tests for display system
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 */

use chrono::NaiveTime;

use segmons::config::DisplaySettings;
use segmons::display::components::FixedTime;
use segmons::display::segment::{encode, BAR_FULL, BAR_HALF, BLANK, DEGREE};
use segmons::display::{
    CommandError, DigitOrder, DisplayFunction, DisplayManager, DisplayMode, DisplayModel,
    DisplayResponse, MockDriver,
};
use segmons::glyphs::{GLYPH_HEART, ICONS};

fn setup(settings: DisplaySettings) -> (DisplayManager, MockDriver) {
    let mock = MockDriver::new(settings.model, settings.width);
    let time = FixedTime(NaiveTime::from_hms_milli_opt(9, 41, 30, 800).unwrap());
    let mut display = DisplayManager::new_with_driver(Box::new(mock.clone()), &settings, Box::new(time));
    display.dispatch(DisplayFunction::Init).unwrap();
    (display, mock)
}

fn width(width: usize) -> DisplaySettings {
    DisplaySettings { width, scroll_delay: 0, ..Default::default() }
}

fn send(display: &mut DisplayManager, line: &str) -> Result<DisplayResponse, CommandError> {
    DisplayFunction::parse_line(line).and_then(|f| display.dispatch(f))
}

fn text(s: &str) -> Vec<u8> {
    s.chars().map(|c| encode(c, false)).collect()
}

#[test]
fn test_init_blanks_and_sets_intensity() {
    let (_display, mock) = setup(width(4));
    let state = mock.state();
    let state = state.lock().unwrap();
    assert_eq!(state.init_count, 1);
    assert_eq!(state.clear_count, 1);
    assert_eq!(state.last_intensity, Some(7));
    assert_eq!(state.powered, Some(true));
}

#[test]
fn test_number_padding() {
    let (mut display, mock) = setup(width(6));

    send(&mut display, "DisplayNumber 1234,0,1,6").unwrap();
    assert_eq!(mock.last_frame().unwrap(), text("001234"));

    send(&mut display, "DisplayNumber 1234,0,0,6").unwrap();
    assert_eq!(mock.last_frame().unwrap(), text("  1234"));
}

#[test]
fn test_no_clear_variant_keeps_other_digits() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Text 88").unwrap();
    send(&mut display, "NumberNC 1,3").unwrap();
    assert_eq!(
        mock.last_frame().unwrap(),
        vec![encode('8', false), encode('8', false), BLANK, encode('1', false)]
    );

    send(&mut display, "Number 1,3").unwrap();
    assert_eq!(mock.last_frame().unwrap(), text("   1"));
}

#[test]
fn test_float_folds_point() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Float 12.34,0,2").unwrap();
    assert_eq!(
        mock.last_frame().unwrap(),
        vec![encode('1', false), encode('2', true), encode('3', false), BLANK]
    );
}

#[test]
fn test_temperature_text() {
    let (mut display, mock) = setup(width(6));
    send(&mut display, "Text 22.5^").unwrap();
    assert_eq!(
        mock.last_frame().unwrap(),
        vec![encode('2', false), encode('2', true), encode('5', false), DEGREE, BLANK, BLANK]
    );
}

#[test]
fn test_out_of_range_position_falls_back() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Text A,9").unwrap();
    assert_eq!(mock.last_frame().unwrap()[0], encode('A', false));
    send(&mut display, "Text A,-3").unwrap();
    assert_eq!(mock.last_frame().unwrap()[0], encode('A', false));
}

#[test]
fn test_repeated_text_is_idempotent() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Text Hi.").unwrap();
    let first = mock.last_frame().unwrap();
    send(&mut display, "Text Hi.").unwrap();
    assert_eq!(mock.last_frame().unwrap(), first);
}

#[test]
fn test_raw_segments() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Raw 1,2,0x40,0x40,0x40").unwrap();
    assert_eq!(mock.last_frame().unwrap(), vec![BLANK, 0x40, 0x40, BLANK]);
}

#[test]
fn test_level_bars() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Level 50").unwrap();
    assert_eq!(mock.last_frame().unwrap(), vec![BAR_FULL, BAR_FULL, BLANK, BLANK]);

    send(&mut display, "Level 60").unwrap();
    // 8 * 0.6 = 4.8 -> 5 bars
    assert_eq!(mock.last_frame().unwrap(), vec![BAR_FULL, BAR_FULL, BAR_HALF, BLANK]);
}

#[test]
fn test_level_out_of_range_rejected() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Text 1234").unwrap();
    let before = mock.frame_count();

    for line in ["Level 150", "Level -1"] {
        let err = send(&mut display, line).unwrap_err();
        assert!(matches!(err, CommandError::LevelOutOfRange { .. }));
        assert_eq!(
            err.to_payload()["Error"],
            format!("Level should be a number in the range [0, 100], got {}", &line[6..])
        );
    }
    assert_eq!(mock.frame_count(), before);
    assert_eq!(display.frame().as_slice(), text("1234").as_slice());
}

#[test]
fn test_scroll_runs_once_then_idles() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "ScrollText hi,1").unwrap();
    assert_eq!(display.mode(), DisplayMode::Scrolling);

    for _ in 0..50 {
        display.dispatch(DisplayFunction::Tick).unwrap();
    }
    assert_eq!(display.mode(), DisplayMode::Static);

    // the text crossed the display
    let frames = mock.state().lock().unwrap().frames.clone();
    assert!(frames.contains(&vec![BLANK, BLANK, encode('h', false), encode('i', false)]));
    assert!(frames.contains(&text("hi  ")));

    let count = mock.frame_count();
    for _ in 0..10 {
        display.dispatch(DisplayFunction::Tick).unwrap();
    }
    assert_eq!(mock.frame_count(), count);
}

#[test]
fn test_scroll_too_long_rejected() {
    let (mut display, _mock) = setup(width(4));
    let long = format!("ScrollText {}", "x".repeat(51));
    assert!(matches!(
        send(&mut display, &long),
        Err(CommandError::ScrollTextTooLong { len: 51, max: 50 })
    ));
    assert_eq!(display.mode(), DisplayMode::Static);
}

#[test]
fn test_command_too_long_rejected() {
    let (mut display, _mock) = setup(width(4));
    let long = format!("Text {}", "8".repeat(60));
    let err = send(&mut display, &long).unwrap_err();
    assert_eq!(err.to_payload()["Error"], "Command text too long. Please limit it to 55 characters");
}

#[test]
fn test_scroll_delay_query_and_clamp() {
    let (mut display, _mock) = setup(DisplaySettings { scroll_delay: 4, ..width(4) });
    assert_eq!(send(&mut display, "ScrollDelay").unwrap(), DisplayResponse::ScrollDelay(4));
    assert_eq!(send(&mut display, "ScrollDelay 22").unwrap(), DisplayResponse::ScrollDelay(15));
    assert_eq!(send(&mut display, "ScrollDelay -4").unwrap(), DisplayResponse::ScrollDelay(0));
}

#[test]
fn test_clock_and_scroll_cancel_each_other() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "Clock 2").unwrap();
    assert_eq!(display.mode(), DisplayMode::Clock);
    display.dispatch(DisplayFunction::Tick).unwrap();
    // 09:41 with the dot lit past the half second
    assert_eq!(
        mock.last_frame().unwrap(),
        vec![encode('0', false), encode('9', true), encode('4', false), encode('1', false)]
    );

    send(&mut display, "ScrollText abc").unwrap();
    assert_eq!(display.mode(), DisplayMode::Scrolling);

    send(&mut display, "Clock 1").unwrap();
    assert_eq!(display.mode(), DisplayMode::Clock);
    display.dispatch(DisplayFunction::Tick).unwrap();
    assert_eq!(mock.last_frame().unwrap()[0], BLANK);

    send(&mut display, "Clock 0").unwrap();
    assert_eq!(display.mode(), DisplayMode::Static);
}

#[test]
fn test_reversed_digit_order() {
    let (mut display, mock) = setup(DisplaySettings { digit_order: DigitOrder::Reversed, ..width(6) });
    send(&mut display, "Text 123456").unwrap();
    assert_eq!(mock.last_frame().unwrap(), text("321654"));
}

#[test]
fn test_icons_on_matrix() {
    let (mut display, mock) = setup(DisplaySettings { model: DisplayModel::Matrix, ..width(8) });
    send(&mut display, "Dots 1").unwrap();
    assert_eq!(mock.state().lock().unwrap().bitmaps, vec![GLYPH_HEART]);

    let err = send(&mut display, &format!("Dots {}", ICONS.len())).unwrap_err();
    assert!(matches!(err, CommandError::IconOutOfRange { .. }));
}

#[test]
fn test_icon_leaves_segment_frame_alone() {
    let (mut display, mock) = setup(DisplaySettings { model: DisplayModel::Matrix, ..width(8) });
    send(&mut display, "Text 12").unwrap();
    let frames = mock.frame_count();

    send(&mut display, "Dots 1").unwrap();
    assert_eq!(display.frame().as_slice(), text("12      ").as_slice());
    assert_eq!(mock.frame_count(), frames);

    // a no-clear write afterwards must not carry bitmap rows
    send(&mut display, "TextNC 3,7").unwrap();
    assert_eq!(mock.last_frame().unwrap(), text("12     3"));

    mock.state().lock().unwrap().simulate_write_failure = true;
    assert!(send(&mut display, "Dots 2").is_err());
    assert_eq!(display.frame().as_slice(), text("12     3").as_slice());
    assert_eq!(mock.state().lock().unwrap().bitmaps, vec![GLYPH_HEART]);
}

#[test]
fn test_scroll_two_loops_then_idles() {
    let (mut display, mock) = setup(width(4));
    send(&mut display, "ScrollText hi,2").unwrap();
    let before = mock.frame_count();

    let mut ticks = 0;
    while display.mode() == DisplayMode::Scrolling && ticks < 100 {
        display.dispatch(DisplayFunction::Tick).unwrap();
        ticks += 1;
    }
    // two passes of seven windows each, then the stopping tick
    assert_eq!(mock.frame_count() - before, 14);
    assert_eq!(ticks, 15);
    assert_eq!(display.mode(), DisplayMode::Static);
}

#[test]
fn test_host_requests() {
    let (mut display, mock) = setup(DisplaySettings { model: DisplayModel::Max7219, ..width(8) });
    assert_eq!(send(&mut display, "model").unwrap(), DisplayResponse::Model("MAX7219"));

    send(&mut display, "brightness 9").unwrap();
    assert_eq!(display.brightness(), 9);
    assert_eq!(mock.state().lock().unwrap().last_intensity, Some(9));

    send(&mut display, "power off").unwrap();
    assert!(!display.is_powered_on());
    send(&mut display, "power on").unwrap();
    assert!(display.is_powered_on());
    assert_eq!(mock.state().lock().unwrap().powered, Some(true));
}

#[test]
fn test_transport_failure_surfaces() {
    let (mut display, mock) = setup(width(4));
    mock.state().lock().unwrap().simulate_write_failure = true;
    let err = send(&mut display, "Text 1").unwrap_err();
    assert!(!err.is_validation());
}
