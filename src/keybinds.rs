//! Navigation key bindings so the five menu keys are claimed and returned as a unit.

use anyhow::Result;

use crate::menu::NavKey;
use crate::player::Player;

/// Script message that toggles the menu, dispatched by the startup binding.
pub const TOGGLE_MESSAGE: &str = "tvosd-toggle";

struct NavBinding {
    key: &'static str,
    message: &'static str,
    nav: NavKey,
    repeatable: bool,
}

/// Up/Down repeat while held; Left/Right/Enter fire once per press so a held
/// adjust key cannot run away.
const NAV_BINDINGS: &[NavBinding] = &[
    NavBinding {
        key: "up",
        message: "tvosd-up",
        nav: NavKey::Up,
        repeatable: true,
    },
    NavBinding {
        key: "down",
        message: "tvosd-down",
        nav: NavKey::Down,
        repeatable: true,
    },
    NavBinding {
        key: "left",
        message: "tvosd-left",
        nav: NavKey::Left,
        repeatable: false,
    },
    NavBinding {
        key: "right",
        message: "tvosd-right",
        nav: NavKey::Right,
        repeatable: false,
    },
    NavBinding {
        key: "enter",
        message: "tvosd-enter",
        nav: NavKey::Enter,
        repeatable: false,
    },
];

/// Register the menu toggle key. Stays bound for the whole session.
pub fn bind_toggle(player: &dyn Player, key: &str) -> Result<()> {
    player.command(&["keybind", key, &format!("script-message {TOGGLE_MESSAGE}")])
}

/// Claim the five navigation keys while the menu is open.
pub fn bind_navigation(player: &dyn Player) -> Result<()> {
    for binding in NAV_BINDINGS {
        let prefix = if binding.repeatable {
            "repeatable script-message"
        } else {
            "script-message"
        };
        player.command(&[
            "keybind",
            binding.key,
            &format!("{prefix} {}", binding.message),
        ])?;
    }
    Ok(())
}

/// Return the navigation keys to default player behavior.
///
/// Binding to an empty command removes the binding; removing an absent
/// binding is a no-op on the player side, so this is safe to repeat.
pub fn unbind_navigation(player: &dyn Player) -> Result<()> {
    for binding in NAV_BINDINGS {
        player.command(&["keybind", binding.key, ""])?;
    }
    Ok(())
}

/// Map a received script message back to its navigation event.
pub fn nav_key_for_message(message: &str) -> Option<NavKey> {
    NAV_BINDINGS
        .iter()
        .find(|binding| binding.message == message)
        .map(|binding| binding.nav)
}
