use crate::api::ListQuery;

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Raw values of the input controls, before a search reads them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub search_input: String,
    pub year_select: String,
    pub maker_input: String,
    pub code_input: String,
}

/// Search, filter and paging state of the browser.
///
/// `current_page` never drops below 1. The upper bound is only enforced by
/// [`SearchState::go_next`] refusing to move past the last known page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    current_page: u32,
    page_size: u32,
    total_items: u64,
    search_term: String,
    research_year: String,
    maker_name: String,
    food_code: String,
    available_years: Vec<String>,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            search_term: String::new(),
            research_year: String::new(),
            maker_name: String::new(),
            food_code: String::new(),
            available_years: Vec::new(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn research_year(&self) -> &str {
        &self.research_year
    }

    pub fn maker_name(&self) -> &str {
        &self.maker_name
    }

    pub fn available_years(&self) -> &[String] {
        &self.available_years
    }

    pub fn set_available_years(&mut self, years: Vec<String>) {
        self.available_years = years;
    }

    pub(crate) fn set_total_items(&mut self, total: u64) {
        self.total_items = total;
    }

    /// `ceil(total_items / page_size)`; zero until something was found.
    pub fn max_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.page_size))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.max_pages()
    }

    /// Moves back one page; `false` (and no change) on the first page.
    pub fn go_previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Moves forward one page; `false` (and no change) on the last page.
    pub fn go_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Copies the form into the state and starts over at page 1. Text fields
    /// are trimmed; the year comes from a fixed option list and is taken as is.
    pub fn apply_form(&mut self, form: &SearchForm) {
        self.search_term = form.search_input.trim().to_string();
        self.research_year = form.year_select.clone();
        self.maker_name = form.maker_input.trim().to_string();
        self.food_code = form.code_input.trim().to_string();
        self.current_page = 1;
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size)
    }

    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            skip: self.skip(),
            limit: self.page_size,
            food_name: crate::utils::non_empty(&self.search_term),
            research_year: crate::utils::non_empty(&self.research_year),
            maker_name: crate::utils::non_empty(&self.maker_name),
            food_code: crate::utils::non_empty(&self.food_code),
        }
    }
}
