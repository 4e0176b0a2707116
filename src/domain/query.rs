//! The parameter set of one list request.

use std::fmt::{Display, Formatter};

use crate::domain::criteria::{SearchCriteria, SortSpec};
use crate::pagination::PagePosition;

/// Date format used by the list endpoint for `fromDate` and `toDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Criteria, sort and page position that define one list request.
///
/// Derived from the stores at issue time and never stored on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeListQuery {
    pub criteria: SearchCriteria,
    pub sort: SortSpec,
    pub position: PagePosition,
}

impl NoticeListQuery {
    pub fn new(criteria: SearchCriteria, sort: SortSpec, position: PagePosition) -> Self {
        Self {
            criteria,
            sort,
            position,
        }
    }

    /// Query parameters in the order the list endpoint documents them.
    ///
    /// Absent date bounds are omitted rather than sent empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("keyword", self.criteria.keyword.clone()),
            ("titleOnly", self.criteria.title_only.to_string()),
        ];
        if let Some(from) = self.criteria.from_date {
            pairs.push(("fromDate", from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = self.criteria.to_date {
            pairs.push(("toDate", to.format(DATE_FORMAT).to_string()));
        }
        pairs.push(("page", self.position.page_number.to_string()));
        pairs.push(("size", self.position.page_size.to_string()));
        pairs.push(("sort", self.sort.to_string()));
        pairs
    }
}

/// Unencoded `key=value&...` form, used for logging.
impl Display for NoticeListQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (key, value)) in self.query_pairs().iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
