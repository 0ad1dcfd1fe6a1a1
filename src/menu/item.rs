//! Menu item schema so rendering and dispatch share one description of every row.

/// Displayed value of an item: fixed text, a number, or a provider invoked
/// fresh on every render pass so live state is never cached.
pub enum ItemValue {
    Text(String),
    Number(f64),
    Dynamic(Box<dyn Fn() -> String>),
}

impl ItemValue {
    pub(crate) fn render(&self) -> String {
        match self {
            ItemValue::Text(text) => text.clone(),
            ItemValue::Number(value) => format!("{value}"),
            ItemValue::Dynamic(provider) => provider(),
        }
    }
}

/// One selectable row.
///
/// Capabilities are optional slots checked for presence before invocation:
/// a press handler makes the item actionable, an adjust handler makes it
/// adjustable, and either, both, or neither is legal.
pub struct MenuItem {
    title: String,
    value: Option<ItemValue>,
    on_press: Option<Box<dyn FnMut()>>,
    on_adjust: Option<Box<dyn FnMut(i32)>>,
}

impl MenuItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: None,
            on_press: None,
            on_adjust: None,
        }
    }

    pub fn with_value(mut self, value: ItemValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_value_fn(self, provider: impl Fn() -> String + 'static) -> Self {
        self.with_value(ItemValue::Dynamic(Box::new(provider)))
    }

    pub fn on_press(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(handler));
        self
    }

    pub fn on_adjust(mut self, handler: impl FnMut(i32) + 'static) -> Self {
        self.on_adjust = Some(Box::new(handler));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> Option<&ItemValue> {
        self.value.as_ref()
    }

    pub fn is_actionable(&self) -> bool {
        self.on_press.is_some()
    }

    pub fn is_adjustable(&self) -> bool {
        self.on_adjust.is_some()
    }

    /// Invoke the press handler if present. Handler faults propagate.
    pub fn press(&mut self) {
        if let Some(handler) = self.on_press.as_mut() {
            handler();
        }
    }

    /// Invoke the adjust handler with -1 or +1 if present.
    pub fn adjust(&mut self, direction: i32) {
        if let Some(handler) = self.on_adjust.as_mut() {
            handler(direction);
        }
    }
}

/// Declared menu content: real items interleaved with separators.
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

/// Fold separators into the gap count preceding the next real item.
///
/// Separators never get a selection position; trailing separators with no
/// following item disappear.
pub fn partition(entries: Vec<MenuEntry>) -> Vec<(usize, MenuItem)> {
    let mut items = Vec::new();
    let mut gaps = 0;
    for entry in entries {
        match entry {
            MenuEntry::Separator => gaps += 1,
            MenuEntry::Item(item) => {
                items.push((gaps, item));
                gaps = 0;
            }
        }
    }
    items
}
