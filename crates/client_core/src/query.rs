//! Filter and pagination parameters for list endpoints.
//!
//! Only keys that are set are sent. Numeric keys treat `0` as unset, while
//! `enabled = false` is still a real filter.

use shared::domain::TaskId;

pub trait QueryParams {
    fn pairs(&self) -> Vec<(&'static str, String)>;
}

fn push_nonzero(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<u64>) {
    if let Some(value) = value.filter(|value| *value != 0) {
        pairs.push((key, value.to_string()));
    }
}

fn push_page(pairs: &mut Vec<(&'static str, String)>, page: Option<u32>, page_size: Option<u32>) {
    push_nonzero(pairs, "page", page.map(u64::from));
    push_nonzero(pairs, "page_size", page_size.map(u64::from));
}

/// `page` / `page_size`, used by destinations and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            page_size: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

impl QueryParams for PageQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_page(&mut pairs, self.page, self.page_size);
        pairs
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerQuery {
    pub enabled: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl QueryParams for ServerQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(enabled) = self.enabled {
            pairs.push(("enabled", enabled.to_string()));
        }
        push_page(&mut pairs, self.page, self.page_size);
        pairs
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub task_id: Option<TaskId>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl QueryParams for LogQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_nonzero(&mut pairs, "task_id", self.task_id.map(|id| id.0));
        push_page(&mut pairs, self.page, self.page_size);
        pairs
    }
}
