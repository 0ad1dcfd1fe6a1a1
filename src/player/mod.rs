//! Player boundary so menu logic talks to a closed, typed capability set.

pub mod ipc;
pub mod protocol;
pub mod types;

use anyhow::Result;
use serde_json::Value;

/// Live player state and command surface.
///
/// The accessor set is deliberately closed: boolean, integer, float, text,
/// and structured node, mirroring the shapes the player itself distinguishes.
/// Text accessors use the player's own string coercion (booleans read back as
/// `yes`/`no`, track ids as `no` or a number).
pub trait Player {
    fn get_bool(&self, name: &str) -> Result<bool>;
    fn get_i64(&self, name: &str) -> Result<i64>;
    fn get_f64(&self, name: &str) -> Result<f64>;
    fn get_str(&self, name: &str) -> Result<String>;
    fn get_node(&self, name: &str) -> Result<Value>;

    fn set_bool(&self, name: &str, value: bool) -> Result<()>;
    fn set_i64(&self, name: &str, value: i64) -> Result<()>;
    fn set_f64(&self, name: &str, value: f64) -> Result<()>;
    fn set_str(&self, name: &str, value: &str) -> Result<()>;
    fn set_node(&self, name: &str, value: &Value) -> Result<()>;

    /// Run an input command in array form.
    fn command(&self, args: &[&str]) -> Result<()>;

    /// Run a raw input line, parsed by the player like an `input.conf` entry.
    fn command_text(&self, line: &str) -> Result<()>;

    /// Subscribe to change notifications for a property.
    fn observe(&self, name: &str) -> Result<()>;
}

/// Transient on-screen notice through the player's own message display.
pub fn osd_message(player: &dyn Player, text: &str) {
    if let Err(err) = player.command(&["show-text", text]) {
        tracing::debug!("osd message failed: {err:#}");
    }
}

#[cfg(any(test, feature = "mutants"))]
pub mod fake {
    //! In-memory player double that records every mutation.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use anyhow::{anyhow, Result};
    use serde_json::{json, Value};

    use super::Player;

    #[derive(Debug, Default)]
    pub struct FakePlayer {
        props: RefCell<HashMap<String, Value>>,
        pub commands: RefCell<Vec<Vec<String>>>,
        pub raw_commands: RefCell<Vec<String>>,
        pub observed: RefCell<Vec<String>>,
    }

    impl FakePlayer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_prop(&self, name: &str, value: Value) {
            self.props.borrow_mut().insert(name.to_string(), value);
        }

        pub fn prop(&self, name: &str) -> Option<Value> {
            self.props.borrow().get(name).cloned()
        }

        pub fn command_count(&self, first: &str) -> usize {
            self.commands
                .borrow()
                .iter()
                .filter(|args| args.first().map(String::as_str) == Some(first))
                .count()
        }

        pub fn has_command(&self, args: &[&str]) -> bool {
            self.commands.borrow().iter().any(|seen| seen == args)
        }

        fn lookup(&self, name: &str) -> Result<Value> {
            self.prop(name)
                .ok_or_else(|| anyhow!("property unavailable: {name}"))
        }
    }

    impl Player for FakePlayer {
        fn get_bool(&self, name: &str) -> Result<bool> {
            self.lookup(name)?
                .as_bool()
                .ok_or_else(|| anyhow!("not a boolean: {name}"))
        }

        fn get_i64(&self, name: &str) -> Result<i64> {
            self.lookup(name)?
                .as_i64()
                .ok_or_else(|| anyhow!("not an integer: {name}"))
        }

        fn get_f64(&self, name: &str) -> Result<f64> {
            self.lookup(name)?
                .as_f64()
                .ok_or_else(|| anyhow!("not a number: {name}"))
        }

        // String coercion matching the player: booleans as yes/no, numbers
        // via their canonical display.
        fn get_str(&self, name: &str) -> Result<String> {
            match self.lookup(name)? {
                Value::String(text) => Ok(text),
                Value::Bool(true) => Ok("yes".to_string()),
                Value::Bool(false) => Ok("no".to_string()),
                Value::Number(num) => Ok(num.to_string()),
                other => Err(anyhow!("not coercible to text: {name} = {other}")),
            }
        }

        fn get_node(&self, name: &str) -> Result<Value> {
            self.lookup(name)
        }

        fn set_bool(&self, name: &str, value: bool) -> Result<()> {
            self.set_prop(name, json!(value));
            Ok(())
        }

        fn set_i64(&self, name: &str, value: i64) -> Result<()> {
            self.set_prop(name, json!(value));
            Ok(())
        }

        fn set_f64(&self, name: &str, value: f64) -> Result<()> {
            self.set_prop(name, json!(value));
            Ok(())
        }

        fn set_str(&self, name: &str, value: &str) -> Result<()> {
            self.set_prop(name, json!(value));
            Ok(())
        }

        fn set_node(&self, name: &str, value: &Value) -> Result<()> {
            self.set_prop(name, value.clone());
            Ok(())
        }

        fn command(&self, args: &[&str]) -> Result<()> {
            self.commands
                .borrow_mut()
                .push(args.iter().map(|arg| arg.to_string()).collect());
            Ok(())
        }

        fn command_text(&self, line: &str) -> Result<()> {
            self.raw_commands.borrow_mut().push(line.to_string());
            Ok(())
        }

        fn observe(&self, name: &str) -> Result<()> {
            self.observed.borrow_mut().push(name.to_string());
            Ok(())
        }
    }
}
