/// Page session: the parsed FAQ set, its category grouping and the current view.
///
/// View changes go through `transition`, a pure function of the current view and an
/// input event. The session adds the checks that need data (unknown categories) and
/// renders whatever view is active.
use tracing::debug;

use crate::category::{find_group, group_by_category};
use crate::error::AppError;
use crate::model::{CategoryGroup, FaqRecord};
use crate::render;
use crate::search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Browsing,
    CategoryDetail(String),
    SearchResults {
        term: String,
        /// View restored when the search is cleared. Never itself a search.
        return_to: Box<ViewState>,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::CategoryDetail(_) => "category_detail",
            Self::SearchResults { .. } => "search_results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    OpenCategory(String),
    Search(String),
    ClearSearch,
    Back,
}

pub fn transition(view: ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::OpenCategory(key) => ViewState::CategoryDetail(key),
        ViewEvent::Search(term) if term.trim().is_empty() => transition(view, ViewEvent::ClearSearch),
        ViewEvent::Search(term) => {
            let term = term.trim().to_string();
            match view {
                ViewState::SearchResults { return_to, .. } => {
                    ViewState::SearchResults { term, return_to }
                }
                other => ViewState::SearchResults {
                    term,
                    return_to: Box::new(other),
                },
            }
        }
        ViewEvent::ClearSearch => match view {
            ViewState::SearchResults { return_to, .. } => *return_to,
            other => other,
        },
        ViewEvent::Back => ViewState::Browsing,
    }
}

/// How the browsing view presents the full FAQ set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseLayout {
    /// One flat accordion of every question.
    Accordion,
    /// Category cards leading to per-category accordions.
    Categories,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RenderedView {
    pub view: &'static str,
    pub title: Option<String>,
    pub html: String,
}

pub struct SupportSession {
    records: Vec<FaqRecord>,
    groups: Vec<CategoryGroup>,
    view: ViewState,
    layout: BrowseLayout,
    status: LoadStatus,
}

impl SupportSession {
    pub fn loaded(records: Vec<FaqRecord>, layout: BrowseLayout) -> Self {
        let groups = group_by_category(&records);
        Self {
            records,
            groups,
            view: ViewState::Browsing,
            layout,
            status: LoadStatus::Loaded,
        }
    }

    /// A session whose document could not be loaded. It stays usable and renders the
    /// load warning until a reload succeeds.
    pub fn failed(reason: impl Into<String>, layout: BrowseLayout) -> Self {
        Self {
            records: Vec::new(),
            groups: Vec::new(),
            view: ViewState::Browsing,
            layout,
            status: LoadStatus::Failed(reason.into()),
        }
    }

    pub fn records(&self) -> &[FaqRecord] {
        &self.records
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Swap in a freshly parsed record set. A category view whose category no
    /// longer exists falls back to browsing.
    pub fn replace_records(&mut self, records: Vec<FaqRecord>) {
        self.groups = group_by_category(&records);
        self.records = records;
        self.status = LoadStatus::Loaded;

        let stale = match &self.view {
            ViewState::CategoryDetail(key) => find_group(&self.groups, key).is_none(),
            ViewState::SearchResults { return_to, .. } => matches!(
                return_to.as_ref(),
                ViewState::CategoryDetail(key) if find_group(&self.groups, key).is_none()
            ),
            ViewState::Browsing => false,
        };
        if stale {
            self.view = ViewState::Browsing;
        }
    }

    pub fn apply(&mut self, event: ViewEvent) -> Result<&ViewState, AppError> {
        let event = match event {
            ViewEvent::OpenCategory(name) => {
                let group = find_group(&self.groups, &name)
                    .ok_or_else(|| AppError::UnknownCategory(name.trim().to_string()))?;
                ViewEvent::OpenCategory(group.key.clone())
            }
            other => other,
        };
        let current = std::mem::replace(&mut self.view, ViewState::Browsing);
        self.view = transition(current, event);
        debug!(view = self.view.name(), "view changed");
        Ok(&self.view)
    }

    /// Run a search and switch to its results. An empty term clears the search.
    ///
    /// Hits carry their position in document order.
    pub fn search(&mut self, term: &str) -> Vec<(usize, &FaqRecord)> {
        let current = std::mem::replace(&mut self.view, ViewState::Browsing);
        self.view = transition(current, ViewEvent::Search(term.to_string()));
        let pattern = search::TermPattern::new(term);
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| pattern.matches(record))
            .collect()
    }

    pub fn loaded_announcement(&self) -> String {
        format!("Loaded {} frequently asked questions", self.records.len())
    }

    pub fn render_view(&self) -> RenderedView {
        let view = self.view.name();
        if let LoadStatus::Failed(_) = self.status {
            return RenderedView {
                view,
                title: None,
                html: render::render_load_failure(),
            };
        }

        match &self.view {
            ViewState::Browsing => {
                let body = match self.layout {
                    BrowseLayout::Accordion => format!(
                        "<div class=\"accordion\" id=\"{}\">\n{}</div>\n",
                        render::ACCORDION_ID,
                        render::render_accordion(&self.records, "", render::ACCORDION_ID)
                    ),
                    BrowseLayout::Categories => render::render_category_cards(&self.groups),
                };
                RenderedView {
                    view,
                    title: None,
                    html: format!(
                        "{}{}{}",
                        render::render_skip_link(),
                        body,
                        render::render_live_region(&self.loaded_announcement())
                    ),
                }
            }
            ViewState::CategoryDetail(key) => match find_group(&self.groups, key) {
                Some(group) => RenderedView {
                    view,
                    title: Some(group.label.clone()),
                    html: render::render_category_detail(group),
                },
                None => RenderedView {
                    view,
                    title: None,
                    html: render::render_category_cards(&self.groups),
                },
            },
            ViewState::SearchResults { term, .. } => {
                let hits = search::filter(&self.records, term);
                let announcement = search::result_announcement(term, hits.len());
                RenderedView {
                    view,
                    title: Some(term.clone()),
                    html: format!(
                        "{}{}",
                        render::render_search_results(&hits, term),
                        render::render_live_region(&announcement)
                    ),
                }
            }
        }
    }
}
