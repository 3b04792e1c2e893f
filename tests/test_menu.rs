use space_invaders::input::{FrameInput, MenuEvent};
use space_invaders::menu::Menu;

#[test]
fn main_menu_layout() {
    let menu = Menu::main();
    assert_eq!(menu.title(), "SPACE INVADERS");
    assert_eq!(menu.options(), &["Start Game", "Quit"]);
    assert_eq!(menu.selected(), 0);
}

#[test]
fn pause_menu_layout() {
    let menu = Menu::pause();
    assert_eq!(menu.title(), "PAUSED");
    assert_eq!(menu.options(), &["Return to Game", "Back to Menu", "Quit"]);
}

#[test]
fn game_over_title_shows_score() {
    let menu = Menu::game_over(1234);
    assert!(menu.title().starts_with("GAME OVER"));
    assert!(menu.title().contains("1234"));
    assert_eq!(menu.options(), &["Play Again", "Main Menu", "Quit"]);
}

#[test]
fn confirm_returns_highlighted_option() {
    let mut menu = Menu::main();
    assert_eq!(menu.select(MenuEvent::Confirm), Some(Menu::START));
}

#[test]
fn navigation_moves_cursor() {
    let mut menu = Menu::pause();
    assert_eq!(menu.select(MenuEvent::Down), None);
    assert_eq!(menu.selected(), 1);
    assert_eq!(menu.select(MenuEvent::Down), None);
    assert_eq!(menu.select(MenuEvent::Confirm), Some(Menu::QUIT_FROM_PAUSE));
    assert_eq!(menu.select(MenuEvent::Up), None);
    assert_eq!(menu.select(MenuEvent::Confirm), Some(Menu::BACK_TO_MENU));
}

#[test]
fn navigation_wraps() {
    let mut menu = Menu::game_over(0);
    menu.select(MenuEvent::Up);
    assert_eq!(menu.selected(), 2);
    menu.select(MenuEvent::Down);
    assert_eq!(menu.selected(), 0);

    let mut main = Menu::main();
    main.select(MenuEvent::Down);
    main.select(MenuEvent::Down);
    assert_eq!(main.selected(), 0);
}

#[test]
fn cancel_backs_out() {
    assert_eq!(Menu::main().select(MenuEvent::Cancel), Some(Menu::QUIT_FROM_MAIN));
    assert_eq!(Menu::pause().select(MenuEvent::Cancel), Some(Menu::RESUME));
    assert_eq!(Menu::game_over(10).select(MenuEvent::Cancel), Some(Menu::MAIN_MENU));
}

#[test]
fn cancel_ignores_cursor() {
    let mut menu = Menu::pause();
    menu.select(MenuEvent::Down);
    menu.select(MenuEvent::Down);
    assert_eq!(menu.select(MenuEvent::Cancel), Some(Menu::RESUME));
}

// ── FrameInput ────────────────────────────────────────────────────────────────

#[test]
fn frame_input_direction() {
    assert_eq!(FrameInput::default().direction(), 0);
    assert_eq!(FrameInput { left: true, ..Default::default() }.direction(), -1);
    assert_eq!(FrameInput { right: true, ..Default::default() }.direction(), 1);
    assert_eq!(
        FrameInput { left: true, right: true, ..Default::default() }.direction(),
        0
    );
}
