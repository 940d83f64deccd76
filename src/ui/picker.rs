use crate::api::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub id: String,
    pub label: String,
}

impl From<&Language> for PickerItem {
    fn from(language: &Language) -> Self {
        Self {
            id: language.code.clone(),
            label: language.name.clone(),
        }
    }
}

/// Cursor over a list of choices; wraps at both ends.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    pub title: String,
    pub items: Vec<PickerItem>,
    pub selected: usize,
}

impl PickerState {
    pub fn new<T: Into<String>>(title: T, items: Vec<PickerItem>, selected: usize) -> Self {
        let selected = if items.is_empty() {
            0
        } else {
            selected.min(items.len() - 1)
        };
        Self {
            title: title.into(),
            items,
            selected,
        }
    }

    pub fn for_languages(languages: &[Language]) -> Self {
        Self::new(
            "Choose a language to practice",
            languages.iter().map(PickerItem::from).collect(),
            0,
        )
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.items.get(self.selected).map(|i| i.id.as_str())
    }

    /// Move the cursor onto `id`; returns false when no item matches.
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self) {
        if !self.items.is_empty() {
            if self.selected == 0 {
                self.selected = self.items.len() - 1;
            } else {
                self.selected -= 1;
            }
        }
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }
}
