use regex::Regex;

use crate::model::application::Application;

/// The active filter over the book. Owned by the core as a plain value; the
/// filtered view is recomputed from it on demand.
#[derive(Debug, Clone, Default)]
pub enum Filter {
    /// Show every record.
    #[default]
    All,
    /// Show records whose company name contains one of the keywords as a
    /// whole word, case-insensitively.
    CompanyKeywords(KeywordMatcher),
}

/// Compiled matcher for `find` keywords.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
    re: Regex,
}

impl KeywordMatcher {
    pub fn new(keywords: Vec<String>) -> Self {
        // Whole-word match: a keyword counts only when delimited by
        // whitespace or the ends of the name. `\b` would misfire on keywords
        // like "(SG)" that start or end with non-word characters.
        let escaped: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
        let pattern = format!(r"(?i)(?:^|\s)(?:{})(?:\s|$)", escaped.join("|"));
        // The pattern is built from escaped literals, so compilation can't fail.
        let re = Regex::new(&pattern).unwrap_or_else(|_| Regex::new("$^").unwrap());
        KeywordMatcher { keywords, re }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, application: &Application) -> bool {
        self.re.is_match(application.company.as_str())
    }
}

impl Filter {
    pub fn matches(&self, application: &Application) -> bool {
        match self {
            Filter::All => true,
            Filter::CompanyKeywords(matcher) => matcher.matches(application),
        }
    }
}

/// The canonical set of tracked applications plus the active filter.
///
/// Mutations resolve positions against the canonical list; the executor maps
/// 1-based display indices to canonical indices via [`ApplicationBook::filtered_indices`].
#[derive(Debug, Default)]
pub struct ApplicationBook {
    records: Vec<Application>,
    filter: Filter,
}

impl ApplicationBook {
    pub fn new() -> Self {
        ApplicationBook::default()
    }

    pub fn from_records(records: Vec<Application>) -> Self {
        ApplicationBook {
            records,
            filter: Filter::All,
        }
    }

    /// Every record, in insertion order, ignoring the filter.
    pub fn records(&self) -> &[Application] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The currently displayed records, in canonical order.
    pub fn filtered(&self) -> Vec<&Application> {
        self.records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect()
    }

    /// Canonical indices of the currently displayed records. Display index
    /// `n` (1-based) refers to `records()[filtered_indices()[n - 1]]`.
    pub fn filtered_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filter.matches(r))
            .map(|(i, _)| i)
            .collect()
    }

    /// True if some record tracks the same application (company + position,
    /// case-insensitive) as `candidate`.
    pub fn contains_same(&self, candidate: &Application) -> bool {
        self.records.iter().any(|r| r.is_same_application(candidate))
    }

    pub fn add(&mut self, application: Application) {
        self.records.push(application);
    }

    /// Replace the record at canonical index `index` with `application`.
    pub fn replace_at(&mut self, index: usize, application: Application) {
        self.records[index] = application;
    }

    /// Remove and return the record at canonical index `index`.
    pub fn remove_at(&mut self, index: usize) -> Application {
        self.records.remove(index)
    }

    pub fn clear_records(&mut self) {
        self.records.clear();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Reset the view to show every record.
    pub fn show_all(&mut self) {
        self.filter = Filter::All;
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}
