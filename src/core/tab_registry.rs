//! Ordered registry of open workspace tabs, keyed by name.

/// A named workspace tab holding one feature's content
#[derive(Debug, Clone)]
pub struct Tab<C> {
    /// Unique key, also shown in the tab strip
    pub name: String,
    /// Content owned by the feature that constructed it
    pub content: C,
    /// Optional glyph drawn before the name
    pub icon: Option<String>,
}

impl<C> Tab<C> {
    pub fn new(name: impl Into<String>, content: C) -> Self {
        Self {
            name: name.into(),
            content,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Manages the open tabs in insertion order plus the active pointer
#[derive(Debug)]
pub struct TabRegistry<C> {
    /// Open tabs, insertion ordered
    tabs: Vec<Tab<C>>,
    /// Name of the active tab
    active: Option<String>,
}

impl<C> Default for TabRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TabRegistry<C> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
        }
    }

    /// Insert a tab, or replace content and icon in place if the name exists.
    ///
    /// The tab always becomes active.
    pub fn add(&mut self, tab: Tab<C>) {
        let name = tab.name.clone();
        match self.position(&tab.name) {
            Some(index) => {
                let existing = &mut self.tabs[index];
                existing.content = tab.content;
                existing.icon = tab.icon;
            }
            None => self.tabs.push(tab),
        }
        tracing::debug!(tab = %name, "Tab added");
        self.active = Some(name);
    }

    /// Remove a tab by name. Returns the removed tab, if any.
    ///
    /// Removing the active tab activates the last remaining tab (by position),
    /// or clears the pointer when nothing is left.
    pub fn remove(&mut self, name: &str) -> Option<Tab<C>> {
        let index = self.position(name)?;
        let removed = self.tabs.remove(index);

        if self.active.as_deref() == Some(name) {
            self.active = self.tabs.last().map(|tab| tab.name.clone());
        }
        if self.tabs.is_empty() {
            self.active = None;
        }

        tracing::debug!(tab = %name, active = ?self.active, "Tab removed");
        Some(removed)
    }

    /// Point the active tab at `name`.
    ///
    /// No existence check is made; a dangling pointer simply resolves to no
    /// active tab.
    pub fn set_active(&mut self, name: impl Into<String>) {
        self.active = Some(name.into());
    }

    /// Remove every tab
    pub fn clear(&mut self) {
        self.tabs.clear();
        self.active = None;
    }

    /// Activate the tab after the active one, wrapping around
    pub fn activate_next(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let next = match self.active_index() {
            Some(index) => (index + 1) % self.tabs.len(),
            None => 0,
        };
        self.active = Some(self.tabs[next].name.clone());
    }

    /// Activate the tab before the active one, wrapping around
    pub fn activate_prev(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let prev = match self.active_index() {
            Some(0) | None => self.tabs.len() - 1,
            Some(index) => index - 1,
        };
        self.active = Some(self.tabs[prev].name.clone());
    }

    /// Activate the tab at a position; returns false when out of range
    pub fn activate_index(&mut self, index: usize) -> bool {
        match self.tabs.get(index) {
            Some(tab) => {
                self.active = Some(tab.name.clone());
                true
            }
            None => false,
        }
    }

    /// Name the active pointer holds, even if it dangles
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Position of the active tab
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_deref().and_then(|name| self.position(name))
    }

    pub fn active_tab(&self) -> Option<&Tab<C>> {
        self.active_index().map(|index| &self.tabs[index])
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab<C>> {
        let index = self.active_index()?;
        self.tabs.get_mut(index)
    }

    pub fn get(&self, name: &str) -> Option<&Tab<C>> {
        self.tabs.iter().find(|tab| tab.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tab<C>> {
        self.tabs.iter_mut().find(|tab| tab.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.name == name)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab<C>] {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut [Tab<C>] {
        &mut self.tabs
    }

    /// Tab names in display order
    pub fn names(&self) -> Vec<&str> {
        self.tabs.iter().map(|tab| tab.name.as_str()).collect()
    }
}
