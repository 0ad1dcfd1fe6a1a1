//! The shipped menu so every adjustable player setting hangs off one schema.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::commands::{MenuConfig, NamedPreset};
use crate::menu::{MenuEntry, MenuItem};
use crate::player::types::{cycle_track, parse_chapters, track_display};
use crate::player::Player;
use crate::settings::Settings;

const DELAY_STEP_SECONDS: f64 = 0.025;
const SCALE_STEP: f64 = 0.05;
const SCALE_MIN: f64 = 0.05;
const SCALE_MAX: f64 = 5.0;
const SCALE_RESET: f64 = 1.0;
const SUB_POS_STEP: i64 = 5;
const SUB_POS_MIN: i64 = 0;
const SUB_POS_MAX: i64 = 150;
const SUB_POS_RESET: i64 = 100;

/// State that outlives a single menu-open: the settings bag, the loaded
/// config, and the per-item cursors/applied markers.
pub struct MenuContext {
    pub settings: Rc<RefCell<Settings>>,
    pub config: Rc<RefCell<MenuConfig>>,
    selected_command: Rc<Cell<usize>>,
    selected_audio_filter: Rc<Cell<usize>>,
    applied_audio_filter: Rc<RefCell<Option<String>>>,
    selected_shader: Rc<Cell<usize>>,
    applied_shader: Rc<RefCell<Option<String>>>,
}

impl MenuContext {
    pub fn new(settings: Rc<RefCell<Settings>>, config: Rc<RefCell<MenuConfig>>) -> Self {
        Self {
            settings,
            config,
            selected_command: Rc::new(Cell::new(0)),
            selected_audio_filter: Rc::new(Cell::new(0)),
            applied_audio_filter: Rc::new(RefCell::new(None)),
            selected_shader: Rc::new(Cell::new(0)),
            applied_shader: Rc::new(RefCell::new(None)),
        }
    }
}

/// Build the full menu. Called on every open so closures capture the live
/// player and the current shared state.
pub fn build_main_menu(player: &Rc<dyn Player>, ctx: &MenuContext) -> Vec<MenuEntry> {
    vec![
        MenuEntry::Item(chapter_item(player)),
        MenuEntry::Item(fullscreen_item(player)),
        MenuEntry::Separator,
        // TODO: press opens a per-track selection submenu
        MenuEntry::Item(track_item(player, "Audio Track", "audio")),
        MenuEntry::Item(track_item(player, "Subtitle Track", "sub")),
        MenuEntry::Separator,
        MenuEntry::Item(delay_item(player, "Audio Delay", "audio-delay")),
        MenuEntry::Item(delay_item(player, "Subtitle Delay", "sub-delay")),
        MenuEntry::Separator,
        MenuEntry::Item(scale_item(player)),
        MenuEntry::Item(sub_pos_item(player)),
        MenuEntry::Separator,
        MenuEntry::Item(preset_item(
            player,
            ctx,
            "Audio Filter",
            "af",
            |config| config.audio_filters.clone(),
            &ctx.selected_audio_filter,
            &ctx.applied_audio_filter,
        )),
        MenuEntry::Item(preset_item(
            player,
            ctx,
            "Glsl Shaders",
            "glsl-shaders",
            |config| config.shaders.clone(),
            &ctx.selected_shader,
            &ctx.applied_shader,
        )),
        MenuEntry::Separator,
        MenuEntry::Item(autoload_item(ctx)),
        MenuEntry::Item(save_settings_item(player, ctx)),
        MenuEntry::Item(load_settings_item(player, ctx)),
        MenuEntry::Separator,
        MenuEntry::Item(command_item(player, ctx)),
        MenuEntry::Separator,
        MenuEntry::Item(quit_item(player, "Save Position & Quit", "quit-watch-later")),
        MenuEntry::Item(quit_item(player, "Quit", "quit")),
    ]
}

fn chapter_item(player: &Rc<dyn Player>) -> MenuItem {
    let value_player = Rc::clone(player);
    let adjust_player = Rc::clone(player);
    MenuItem::new("Chapter")
        .with_value_fn(move || {
            let chapters =
                parse_chapters(value_player.get_node("chapter-list").unwrap_or(Value::Null));
            if chapters.is_empty() {
                return "N/A".to_string();
            }
            let current = value_player.get_i64("chapter").unwrap_or(0);
            format!("{}/{}", current + 1, chapters.len())
        })
        .on_adjust(move |direction| {
            let chapters =
                parse_chapters(adjust_player.get_node("chapter-list").unwrap_or(Value::Null));
            if chapters.is_empty() {
                return;
            }
            let current = adjust_player.get_i64("chapter").unwrap_or(0);
            let target = (current + i64::from(direction)).clamp(0, chapters.len() as i64 - 1);
            let _ = adjust_player.set_i64("chapter", target);
        })
}

fn toggle_fullscreen(player: &dyn Player) {
    let current = player.get_str("fullscreen").unwrap_or_default();
    let next = if current == "yes" { "no" } else { "yes" };
    let _ = player.set_str("fullscreen", next);
}

fn fullscreen_item(player: &Rc<dyn Player>) -> MenuItem {
    let value_player = Rc::clone(player);
    let press_player = Rc::clone(player);
    let adjust_player = Rc::clone(player);
    MenuItem::new("Fullscreen")
        .with_value_fn(move || {
            value_player
                .get_str("fullscreen")
                .unwrap_or_else(|_| "no".to_string())
        })
        .on_press(move || toggle_fullscreen(&*press_player))
        .on_adjust(move |_direction| toggle_fullscreen(&*adjust_player))
}

fn track_item(player: &Rc<dyn Player>, title: &str, kind: &'static str) -> MenuItem {
    let value_player = Rc::clone(player);
    let adjust_player = Rc::clone(player);
    MenuItem::new(title)
        .with_value_fn(move || track_display(&*value_player, kind))
        .on_adjust(move |direction| cycle_track(&*adjust_player, kind, direction))
}

fn delay_item(player: &Rc<dyn Player>, title: &str, property: &'static str) -> MenuItem {
    let value_player = Rc::clone(player);
    let press_player = Rc::clone(player);
    let adjust_player = Rc::clone(player);
    MenuItem::new(title)
        .with_value_fn(move || {
            let seconds = value_player.get_f64(property).unwrap_or(0.0);
            format!("{}ms", (seconds * 1000.0).round() as i64)
        })
        .on_press(move || {
            let _ = press_player.set_f64(property, 0.0);
        })
        .on_adjust(move |direction| {
            let seconds = adjust_player.get_f64(property).unwrap_or(0.0);
            let _ = adjust_player.set_f64(
                property,
                seconds + f64::from(direction) * DELAY_STEP_SECONDS,
            );
        })
}

fn scale_item(player: &Rc<dyn Player>) -> MenuItem {
    let value_player = Rc::clone(player);
    let press_player = Rc::clone(player);
    let adjust_player = Rc::clone(player);
    MenuItem::new("Subtitle Scale")
        .with_value_fn(move || {
            let scale = value_player.get_f64("sub-scale").unwrap_or(SCALE_RESET);
            let rounded = (scale * 100.0).round() / 100.0;
            format!("{rounded}")
        })
        .on_press(move || {
            let _ = press_player.set_f64("sub-scale", SCALE_RESET);
        })
        .on_adjust(move |direction| {
            let scale = adjust_player.get_f64("sub-scale").unwrap_or(SCALE_RESET);
            let next = (scale + f64::from(direction) * SCALE_STEP).clamp(SCALE_MIN, SCALE_MAX);
            let _ = adjust_player.set_f64("sub-scale", next);
        })
}

fn sub_pos_item(player: &Rc<dyn Player>) -> MenuItem {
    let value_player = Rc::clone(player);
    let press_player = Rc::clone(player);
    let adjust_player = Rc::clone(player);
    MenuItem::new("Subtitle Position")
        .with_value_fn(move || {
            value_player
                .get_str("sub-pos")
                .unwrap_or_else(|_| "N/A".to_string())
        })
        .on_press(move || {
            let _ = press_player.set_i64("sub-pos", SUB_POS_RESET);
        })
        .on_adjust(move |direction| {
            let position = adjust_player.get_i64("sub-pos").unwrap_or(SUB_POS_RESET);
            let next =
                (position + i64::from(direction) * SUB_POS_STEP).clamp(SUB_POS_MIN, SUB_POS_MAX);
            let _ = adjust_player.set_i64("sub-pos", next);
        })
}

/// Preset toggle against a filter-chain property.
///
/// The applied marker tracks the last value this item set and is compared by
/// value equality against the live property on each render. A change made
/// outside the menu can desync the on/off tag until the values line up again.
fn preset_item(
    player: &Rc<dyn Player>,
    ctx: &MenuContext,
    title: &str,
    property: &'static str,
    presets_of: fn(&MenuConfig) -> Vec<NamedPreset>,
    selected: &Rc<Cell<usize>>,
    applied: &Rc<RefCell<Option<String>>>,
) -> MenuItem {
    let config = Rc::clone(&ctx.config);
    let value_player = Rc::clone(player);
    let value_selected = Rc::clone(selected);
    let value_applied = Rc::clone(applied);
    let value_config = Rc::clone(&config);

    let press_player = Rc::clone(player);
    let press_selected = Rc::clone(selected);
    let press_applied = Rc::clone(applied);
    let press_config = Rc::clone(&config);

    let adjust_selected = Rc::clone(selected);

    MenuItem::new(title)
        .with_value_fn(move || {
            let presets = presets_of(&value_config.borrow());
            if presets.is_empty() {
                return "N/A".to_string();
            }
            let index = value_selected.get().min(presets.len() - 1);
            let preset = &presets[index];
            let current = value_player.get_str(property).unwrap_or_default();
            let on = value_applied.borrow().as_deref() == Some(preset.value.as_str())
                && current == preset.value;
            format!(
                "{} {}/{} {}",
                preset.name,
                index + 1,
                presets.len(),
                if on { "on" } else { "off" }
            )
        })
        .on_press(move || {
            let presets = presets_of(&press_config.borrow());
            if presets.is_empty() {
                return;
            }
            let index = press_selected.get().min(presets.len() - 1);
            let preset = presets[index].clone();
            let mut applied = press_applied.borrow_mut();
            if applied.as_deref() == Some(preset.value.as_str()) {
                let _ = press_player.set_str(property, "");
                *applied = None;
            } else {
                let _ = press_player.set_str(property, &preset.value);
                *applied = Some(preset.value);
            }
        })
        .on_adjust(move |direction| {
            let count = presets_of(&config.borrow()).len();
            if count == 0 {
                return;
            }
            let index = adjust_selected.get().min(count - 1) as i32;
            let next = (index + direction).rem_euclid(count as i32) as usize;
            adjust_selected.set(next);
        })
}

fn autoload_item(ctx: &MenuContext) -> MenuItem {
    let value_settings = Rc::clone(&ctx.settings);
    let adjust_settings = Rc::clone(&ctx.settings);
    MenuItem::new("Autoload Settings")
        .with_value_fn(move || {
            if value_settings.borrow().autoload {
                "yes".to_string()
            } else {
                "no".to_string()
            }
        })
        .on_adjust(move |_direction| {
            let mut settings = adjust_settings.borrow_mut();
            settings.autoload = !settings.autoload;
        })
}

fn save_settings_item(player: &Rc<dyn Player>, ctx: &MenuContext) -> MenuItem {
    let settings = Rc::clone(&ctx.settings);
    let player = Rc::clone(player);
    MenuItem::new("Save Settings").on_press(move || settings.borrow().save(&*player))
}

fn load_settings_item(player: &Rc<dyn Player>, ctx: &MenuContext) -> MenuItem {
    let settings = Rc::clone(&ctx.settings);
    let player = Rc::clone(player);
    MenuItem::new("Load Settings").on_press(move || settings.borrow_mut().load(&*player, false))
}

fn command_item(player: &Rc<dyn Player>, ctx: &MenuContext) -> MenuItem {
    let value_config = Rc::clone(&ctx.config);
    let value_selected = Rc::clone(&ctx.selected_command);

    let press_player = Rc::clone(player);
    let press_config = Rc::clone(&ctx.config);
    let press_selected = Rc::clone(&ctx.selected_command);

    let adjust_config = Rc::clone(&ctx.config);
    let adjust_selected = Rc::clone(&ctx.selected_command);

    MenuItem::new("Command")
        .with_value_fn(move || {
            let config = value_config.borrow();
            if config.commands.is_empty() {
                return "N/A".to_string();
            }
            let index = value_selected.get().min(config.commands.len() - 1);
            format!(
                "{} ({}/{})",
                config.commands[index].name,
                index + 1,
                config.commands.len()
            )
        })
        .on_press(move || {
            let config = press_config.borrow();
            if config.commands.is_empty() {
                return;
            }
            let index = press_selected.get().min(config.commands.len() - 1);
            let cmd = &config.commands[index].cmd;
            tracing::info!("running user command '{cmd}'");
            let _ = press_player.command_text(cmd);
        })
        .on_adjust(move |direction| {
            let count = adjust_config.borrow().commands.len();
            if count == 0 {
                return;
            }
            let index = adjust_selected.get().min(count - 1) as i32;
            let next = (index + direction).rem_euclid(count as i32) as usize;
            adjust_selected.set(next);
        })
}

fn quit_item(player: &Rc<dyn Player>, title: &str, command: &'static str) -> MenuItem {
    let player = Rc::clone(player);
    MenuItem::new(title).on_press(move || {
        let _ = player.command(&[command]);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::UserCommand;
    use crate::menu::partition;
    use crate::player::fake::FakePlayer;
    use serde_json::json;
    use std::path::PathBuf;

    fn context() -> MenuContext {
        let settings = Settings::new(PathBuf::from("/nonexistent/tvosd-settings.json"));
        MenuContext::new(
            Rc::new(RefCell::new(settings)),
            Rc::new(RefCell::new(MenuConfig::default())),
        )
    }

    /// One fake instance seen both concretely (for its recorders) and through
    /// the trait object the builders take.
    fn player_pair() -> (Rc<FakePlayer>, Rc<dyn Player>) {
        let fake = Rc::new(FakePlayer::new());
        let player: Rc<dyn Player> = fake.clone();
        (fake, player)
    }

    fn find_item<'a>(
        items: &'a mut [(usize, MenuItem)],
        title: &str,
    ) -> &'a mut MenuItem {
        &mut items
            .iter_mut()
            .find(|(_, item)| item.title() == title)
            .expect("item present")
            .1
    }

    fn five_chapters() -> Value {
        json!([
            {"title": "one", "time": 0.0},
            {"title": "two", "time": 60.0},
            {"title": "three", "time": 120.0},
            {"title": "four", "time": 180.0},
            {"title": "five", "time": 240.0},
        ])
    }

    #[test]
    fn menu_lists_every_item_in_order() {
        let (_fake, player) = player_pair();
        let ctx = context();
        let items = partition(build_main_menu(&player, &ctx));
        let titles: Vec<&str> = items.iter().map(|(_, item)| item.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Chapter",
                "Fullscreen",
                "Audio Track",
                "Subtitle Track",
                "Audio Delay",
                "Subtitle Delay",
                "Subtitle Scale",
                "Subtitle Position",
                "Audio Filter",
                "Glsl Shaders",
                "Autoload Settings",
                "Save Settings",
                "Load Settings",
                "Command",
                "Save Position & Quit",
                "Quit",
            ]
        );
        // Separators fold into the gap before each group head.
        let gaps: Vec<usize> = items.iter().map(|(gap, _)| *gap).collect();
        assert_eq!(gaps, vec![0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn chapter_value_is_one_based_over_count() {
        let (fake, player) = player_pair();
        fake.set_prop("chapter-list", five_chapters());
        fake.set_prop("chapter", json!(2));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let chapter = find_item(&mut items, "Chapter");
        assert_eq!(chapter.value().expect("value").render(), "3/5");
    }

    #[test]
    fn chapter_adjust_clamps_to_list_bounds() {
        let (fake, player) = player_pair();
        fake.set_prop("chapter-list", five_chapters());
        fake.set_prop("chapter", json!(2));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let chapter = find_item(&mut items, "Chapter");
        chapter.adjust(1);
        assert_eq!(fake.prop("chapter"), Some(json!(3)));
        chapter.adjust(1);
        chapter.adjust(1);
        assert_eq!(fake.prop("chapter"), Some(json!(4)));
        for _ in 0..6 {
            chapter.adjust(-1);
        }
        assert_eq!(fake.prop("chapter"), Some(json!(0)));
    }

    #[test]
    fn empty_chapter_list_is_na_and_adjust_is_inert() {
        let (fake, player) = player_pair();
        fake.set_prop("chapter-list", json!([]));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let chapter = find_item(&mut items, "Chapter");
        assert_eq!(chapter.value().expect("value").render(), "N/A");
        chapter.adjust(1);
        assert_eq!(fake.prop("chapter"), None);
    }

    #[test]
    fn delay_renders_whole_milliseconds() {
        let (fake, player) = player_pair();
        fake.set_prop("audio-delay", json!(0.1234));
        fake.set_prop("sub-delay", json!(-0.025));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        assert_eq!(
            find_item(&mut items, "Audio Delay")
                .value()
                .expect("value")
                .render(),
            "123ms"
        );
        assert_eq!(
            find_item(&mut items, "Subtitle Delay")
                .value()
                .expect("value")
                .render(),
            "-25ms"
        );
    }

    #[test]
    fn delay_steps_by_25ms_and_resets_to_zero() {
        let (fake, player) = player_pair();
        fake.set_prop("audio-delay", json!(0.1));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let delay = find_item(&mut items, "Audio Delay");
        delay.adjust(1);
        let stepped = fake.prop("audio-delay").expect("stepped");
        assert!((stepped.as_f64().expect("f64") - 0.125).abs() < 1e-9);
        delay.press();
        assert_eq!(fake.prop("audio-delay"), Some(json!(0.0)));
    }

    #[test]
    fn scale_rounds_to_two_decimals_without_trailing_zeros() {
        let (fake, player) = player_pair();
        fake.set_prop("sub-scale", json!(1.004));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let scale = find_item(&mut items, "Subtitle Scale");
        assert_eq!(scale.value().expect("value").render(), "1");
        fake.set_prop("sub-scale", json!(1.006));
        assert_eq!(scale.value().expect("value").render(), "1.01");
        fake.set_prop("sub-scale", json!(2.5));
        assert_eq!(scale.value().expect("value").render(), "2.5");
    }

    #[test]
    fn scale_adjust_clamps_to_range() {
        let (fake, player) = player_pair();
        fake.set_prop("sub-scale", json!(0.05));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let scale = find_item(&mut items, "Subtitle Scale");
        scale.adjust(-1);
        assert_eq!(fake.prop("sub-scale"), Some(json!(0.05)));
        scale.press();
        assert_eq!(fake.prop("sub-scale"), Some(json!(1.0)));
    }

    #[test]
    fn sub_pos_steps_and_clamps() {
        let (fake, player) = player_pair();
        fake.set_prop("sub-pos", json!(145));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let position = find_item(&mut items, "Subtitle Position");
        position.adjust(1);
        assert_eq!(fake.prop("sub-pos"), Some(json!(150)));
        position.adjust(1);
        assert_eq!(fake.prop("sub-pos"), Some(json!(150)));
        position.press();
        assert_eq!(fake.prop("sub-pos"), Some(json!(100)));
    }

    #[test]
    fn fullscreen_press_and_adjust_both_toggle() {
        let (fake, player) = player_pair();
        fake.set_prop("fullscreen", json!("no"));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let fullscreen = find_item(&mut items, "Fullscreen");
        assert_eq!(fullscreen.value().expect("value").render(), "no");
        fullscreen.press();
        assert_eq!(fake.prop("fullscreen"), Some(json!("yes")));
        fullscreen.adjust(-1);
        assert_eq!(fake.prop("fullscreen"), Some(json!("no")));
    }

    #[test]
    fn track_items_cycle_through_available_tracks() {
        let (fake, player) = player_pair();
        fake.set_prop(
            "track-list",
            json!([
                {"id": 1, "type": "audio", "lang": "en"},
                {"id": 2, "type": "audio", "lang": "ja"},
            ]),
        );
        fake.set_prop("audio", json!("2"));
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let audio = find_item(&mut items, "Audio Track");
        assert_eq!(audio.value().expect("value").render(), "2/2");
        audio.adjust(1);
        assert_eq!(fake.prop("audio"), Some(json!("no")));
    }

    #[test]
    fn autoload_item_flips_the_flag() {
        let (_fake, player) = player_pair();
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let autoload = find_item(&mut items, "Autoload Settings");
        assert_eq!(autoload.value().expect("value").render(), "no");
        autoload.adjust(1);
        assert_eq!(autoload.value().expect("value").render(), "yes");
        assert!(ctx.settings.borrow().autoload);
    }

    #[test]
    fn command_item_cycles_and_runs_raw_lines() {
        let (fake, player) = player_pair();
        let ctx = context();
        ctx.config.borrow_mut().commands = vec![
            UserCommand {
                name: "Zoom".to_string(),
                cmd: "add video-zoom 0.1".to_string(),
            },
            UserCommand {
                name: "Stats".to_string(),
                cmd: "script-binding stats/display-stats-toggle".to_string(),
            },
        ];
        let mut items = partition(build_main_menu(&player, &ctx));
        let command = find_item(&mut items, "Command");
        assert_eq!(command.value().expect("value").render(), "Zoom (1/2)");
        command.adjust(1);
        assert_eq!(command.value().expect("value").render(), "Stats (2/2)");
        command.adjust(1);
        assert_eq!(command.value().expect("value").render(), "Zoom (1/2)");
        command.adjust(-1);
        assert_eq!(command.value().expect("value").render(), "Stats (2/2)");
        command.press();
        assert_eq!(
            *fake.raw_commands.borrow(),
            vec!["script-binding stats/display-stats-toggle".to_string()]
        );
    }

    #[test]
    fn command_item_without_commands_is_na_and_inert() {
        let (fake, player) = player_pair();
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        let command = find_item(&mut items, "Command");
        assert_eq!(command.value().expect("value").render(), "N/A");
        command.press();
        command.adjust(1);
        assert!(fake.raw_commands.borrow().is_empty());
    }

    #[test]
    fn audio_filter_preset_applies_and_clears() {
        let (fake, player) = player_pair();
        let ctx = context();
        ctx.config.borrow_mut().audio_filters = vec![NamedPreset {
            name: "Night".to_string(),
            value: "lavfi=[dynaudnorm=g=5]".to_string(),
        }];
        let mut items = partition(build_main_menu(&player, &ctx));
        let filter = find_item(&mut items, "Audio Filter");
        assert_eq!(filter.value().expect("value").render(), "Night 1/1 off");
        filter.press();
        assert_eq!(fake.prop("af"), Some(json!("lavfi=[dynaudnorm=g=5]")));
        assert_eq!(filter.value().expect("value").render(), "Night 1/1 on");
        filter.press();
        assert_eq!(fake.prop("af"), Some(json!("")));
        assert_eq!(filter.value().expect("value").render(), "Night 1/1 off");
    }

    #[test]
    fn preset_tag_desyncs_when_property_changes_externally() {
        let (fake, player) = player_pair();
        let ctx = context();
        ctx.config.borrow_mut().shaders = vec![NamedPreset {
            name: "Sharpen".to_string(),
            value: "~~/shaders/sharpen.glsl".to_string(),
        }];
        let mut items = partition(build_main_menu(&player, &ctx));
        let shaders = find_item(&mut items, "Glsl Shaders");
        shaders.press();
        assert_eq!(shaders.value().expect("value").render(), "Sharpen 1/1 on");
        // Someone else rewrites the chain; the tag follows the live value.
        fake.set_prop("glsl-shaders", json!(""));
        assert_eq!(shaders.value().expect("value").render(), "Sharpen 1/1 off");
    }

    #[test]
    fn preset_selection_clamps_after_config_shrinks() {
        let (_fake, player) = player_pair();
        let ctx = context();
        ctx.config.borrow_mut().audio_filters = vec![
            NamedPreset {
                name: "A".to_string(),
                value: "af-a".to_string(),
            },
            NamedPreset {
                name: "B".to_string(),
                value: "af-b".to_string(),
            },
        ];
        let mut items = partition(build_main_menu(&player, &ctx));
        let filter = find_item(&mut items, "Audio Filter");
        filter.adjust(1);
        assert_eq!(filter.value().expect("value").render(), "B 2/2 off");
        ctx.config.borrow_mut().audio_filters.pop();
        assert_eq!(filter.value().expect("value").render(), "A 1/1 off");
    }

    #[test]
    fn quit_items_run_their_commands() {
        let (fake, player) = player_pair();
        let ctx = context();
        let mut items = partition(build_main_menu(&player, &ctx));
        find_item(&mut items, "Save Position & Quit").press();
        find_item(&mut items, "Quit").press();
        assert!(fake.has_command(&["quit-watch-later"]));
        assert!(fake.has_command(&["quit"]));
    }
}
