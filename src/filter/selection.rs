//! Single-choice filter per category (author, label, milestone, assignee).

use crate::data::Issue;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Author,
    Label,
    Milestone,
    Assignee,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Author,
        Category::Label,
        Category::Milestone,
        Category::Assignee,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::Label => "Label",
            Self::Milestone => "Milestone",
            Self::Assignee => "Assignee",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// At most one selected id per category. `None` is unselected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySelection {
    author: Option<u64>,
    label: Option<u64>,
    milestone: Option<u64>,
    assignee: Option<u64>,
}

impl CategorySelection {
    pub fn get(&self, category: Category) -> Option<u64> {
        *self.slot(category)
    }

    pub fn set(&mut self, category: Category, id: Option<u64>) {
        *self.slot_mut(category) = id;
    }

    /// Select `id`, or clear the category if `id` is already selected.
    ///
    /// Returns the new value of the category.
    pub fn toggle(&mut self, category: Category, id: u64) -> Option<u64> {
        let slot = self.slot_mut(category);
        *slot = if *slot == Some(id) { None } else { Some(id) };
        *slot
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        Category::ALL.iter().any(|c| self.get(*c).is_some())
    }

    /// AND of every active category predicate.
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(author) = self.author {
            if issue.author_id != author {
                return false;
            }
        }

        if let Some(label) = self.label {
            if !issue.has_label(label) {
                return false;
            }
        }

        if let Some(milestone) = self.milestone {
            if issue.milestone_id() != Some(milestone) {
                return false;
            }
        }

        if let Some(assignee) = self.assignee {
            if !issue.is_assigned_to(assignee) {
                return false;
            }
        }

        true
    }

    fn slot(&self, category: Category) -> &Option<u64> {
        match category {
            Category::Author => &self.author,
            Category::Label => &self.label,
            Category::Milestone => &self.milestone,
            Category::Assignee => &self.assignee,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<u64> {
        match category {
            Category::Author => &mut self.author,
            Category::Label => &mut self.label,
            Category::Milestone => &mut self.milestone,
            Category::Assignee => &mut self.assignee,
        }
    }
}
