//! Holder of the active search criteria and sort specification.

use chrono::NaiveDate;

use crate::domain::criteria::{SearchCriteria, SortField, SortSpec};

/// Current criteria, sort and the keyword draft of the search box.
///
/// The draft is what the user is typing; it becomes the criteria keyword only
/// when a search is submitted. Setters replace the criteria wholesale and
/// return whether anything changed.
#[derive(Clone, Debug, Default)]
pub struct CriteriaStore {
    criteria: SearchCriteria,
    sort: SortSpec,
    draft_keyword: String,
}

impl CriteriaStore {
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn draft_keyword(&self) -> &str {
        &self.draft_keyword
    }

    pub fn set_draft_keyword(&mut self, text: impl Into<String>) {
        self.draft_keyword = text.into();
    }

    /// Makes the draft the active keyword.
    pub fn commit_draft(&mut self) -> bool {
        let keyword = self.draft_keyword.clone();
        self.replace(SearchCriteria {
            keyword,
            ..self.criteria.clone()
        })
    }

    /// Sets the active keyword directly, keeping the draft in sync.
    pub fn set_keyword(&mut self, text: impl Into<String>) -> bool {
        self.draft_keyword = text.into();
        self.commit_draft()
    }

    pub fn set_title_only(&mut self, title_only: bool) -> bool {
        self.replace(SearchCriteria {
            title_only,
            ..self.criteria.clone()
        })
    }

    pub fn set_date_range(
        &mut self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> bool {
        self.replace(SearchCriteria {
            from_date,
            to_date,
            ..self.criteria.clone()
        })
    }

    /// Applies a click on a sort control. Always changes the sort.
    pub fn set_sort(&mut self, field: SortField) -> SortSpec {
        self.sort = self.sort.toggled(field);
        self.sort
    }

    /// Selects an exact field and direction pair.
    pub fn select_sort(&mut self, sort: SortSpec) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        true
    }

    fn replace(&mut self, criteria: SearchCriteria) -> bool {
        if self.criteria == criteria {
            return false;
        }
        self.criteria = criteria;
        true
    }
}
