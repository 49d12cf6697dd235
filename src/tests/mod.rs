use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::{ApiError, FoodDetail, FoodPage, FoodSummary, FoodsApi, ListQuery};
use crate::browser::event::Event;
use crate::browser::{self, Browser, Surface};
use crate::view::{DetailView, ResultsView};

#[derive(Default)]
struct FakeApi {
    pages: Mutex<VecDeque<Result<FoodPage, ApiError>>>,
    details: Mutex<VecDeque<Result<FoodDetail, ApiError>>>,
    queries: Mutex<Vec<ListQuery>>,
    detail_ids: Mutex<Vec<i64>>,
}

impl FakeApi {
    fn with_pages(pages: Vec<Result<FoodPage, ApiError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    fn push_detail(&self, detail: Result<FoodDetail, ApiError>) {
        self.details.lock().unwrap().push_back(detail);
    }

    fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn detail_ids(&self) -> Vec<i64> {
        self.detail_ids.lock().unwrap().clone()
    }
}

impl FoodsApi for FakeApi {
    async fn list_foods(&self, query: &ListQuery) -> Result<FoodPage, ApiError> {
        self.queries.lock().unwrap().push(query.clone());
        let next = self.pages.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(FoodPage::default()))
    }

    async fn get_food(&self, id: i64) -> Result<FoodDetail, ApiError> {
        self.detail_ids.lock().unwrap().push(id);
        let next = self.details.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Ok(FoodDetail {
                id,
                ..FoodDetail::default()
            })
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Drawn {
    Loading(bool),
    Years(Vec<String>),
    Cleared,
    Results(ResultsView),
    Detail(DetailView),
    HideDetail,
    Alert(String),
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Drawn>,
}

impl RecordingSurface {
    fn last_results(&self) -> Option<&ResultsView> {
        self.calls.iter().rev().find_map(|c| match c {
            Drawn::Results(v) => Some(v),
            _ => None,
        })
    }

    fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Drawn::Alert(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    fn loading_visible(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                Drawn::Loading(v) => Some(*v),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn count(&self, pred: impl Fn(&Drawn) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn set_loading(&mut self, visible: bool) {
        self.calls.push(Drawn::Loading(visible));
    }

    fn set_year_options(&mut self, years: &[String]) {
        self.calls.push(Drawn::Years(years.to_vec()));
    }

    fn clear_results(&mut self) {
        self.calls.push(Drawn::Cleared);
    }

    fn show_results(&mut self, view: &ResultsView) {
        self.calls.push(Drawn::Results(view.clone()));
    }

    fn show_detail(&mut self, view: &DetailView) {
        self.calls.push(Drawn::Detail(view.clone()));
    }

    fn hide_detail(&mut self) {
        self.calls.push(Drawn::HideDetail);
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(Drawn::Alert(message.to_string()));
    }
}

fn food(id: i64, name: &str) -> FoodSummary {
    FoodSummary {
        id,
        food_name: name.to_string(),
        ..FoodSummary::default()
    }
}

fn page(total: u64, ids: &[i64]) -> Result<FoodPage, ApiError> {
    Ok(FoodPage {
        total,
        items: ids.iter().map(|id| food(*id, "item")).collect(),
    })
}

fn server_error() -> ApiError {
    ApiError::Status {
        url: "http://localhost:8000/api/v1/foods".to_string(),
        status: 500,
    }
}

fn years() -> Vec<String> {
    crate::utils::default_years()
}

fn browser(pages: Vec<Result<FoodPage, ApiError>>) -> Browser<FakeApi, RecordingSurface> {
    Browser::new(FakeApi::with_pages(pages), RecordingSurface::default(), 12)
}

#[tokio::test]
async fn init_loads_years_then_runs_unfiltered_first_page() {
    let mut b = browser(vec![page(2, &[1, 2])]);
    b.init(years()).await.unwrap();

    let calls = &b.surface().calls;
    assert_eq!(calls.first(), Some(&Drawn::Loading(true)));
    assert_eq!(calls.last(), Some(&Drawn::Loading(false)));
    assert_eq!(b.surface().count(|c| matches!(c, Drawn::Loading(_))), 2);
    assert!(matches!(calls[1], Drawn::Years(ref y) if y.len() == 6));

    let queries = b.api().queries();
    assert_eq!(
        queries,
        vec![ListQuery {
            skip: 0,
            limit: 12,
            ..ListQuery::default()
        }]
    );
    assert_eq!(b.state().available_years().len(), 6);
    assert_eq!(b.cards().len(), 2);
}

#[tokio::test]
async fn init_with_bad_year_fails_visibly_without_searching() {
    let mut b = browser(vec![]);
    let err = b.init(vec!["2021".to_string(), "21".to_string()]).await;
    assert!(matches!(err, Err(browser::BrowseError::InvalidYear { .. })));
    assert_eq!(b.surface().alerts(), vec![browser::LOAD_FAILED]);
    assert_eq!(b.surface().calls.last(), Some(&Drawn::Loading(false)));
    assert!(b.api().queries().is_empty());
}

#[tokio::test]
async fn listing_failure_alerts_and_keeps_previous_total() {
    let mut b = browser(vec![page(25, &[1, 2, 3]), Err(server_error())]);
    b.init(years()).await.unwrap();
    assert_eq!(b.state().total_items(), 25);

    let err = b.next_page().await;
    assert!(matches!(err, Err(browser::BrowseError::Api(ApiError::Status { status: 500, .. }))));

    assert_eq!(b.surface().alerts(), vec![browser::SEARCH_FAILED]);
    assert!(!b.surface().loading_visible());
    assert_eq!(b.state().total_items(), 25);
    assert!(b.cards().is_empty());
    // the old page was cleared and nothing replaced it
    let tail: Vec<&Drawn> = b.surface().calls.iter().rev().take(4).collect();
    assert!(tail.contains(&&Drawn::Cleared));
    assert!(!tail.iter().any(|c| matches!(c, Drawn::Results(_))));
}

#[tokio::test]
async fn name_filter_is_sent_and_empty_filters_are_omitted() {
    let mut b = browser(vec![page(0, &[]), page(1, &[9])]);
    b.init(years()).await.unwrap();
    b.dispatch(Event::SetSearchTerm("apple".to_string()))
        .await
        .unwrap();

    let q = b.api().queries().pop().unwrap();
    assert_eq!(q.food_name.as_deref(), Some("apple"));
    assert_eq!(q.research_year, None);
    assert_eq!(q.maker_name, None);
    let keys: Vec<&str> = q.params().iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["skip", "limit", "food_name"]);
}

#[tokio::test]
async fn maker_filter_is_trimmed() {
    let mut b = browser(vec![]);
    b.dispatch(Event::SetMaker("  Orion ".to_string()))
        .await
        .unwrap();
    assert_eq!(
        b.api().queries()[0].maker_name.as_deref(),
        Some("Orion")
    );
}

#[tokio::test]
async fn submitting_resets_to_first_page() {
    let mut b = browser(vec![page(40, &[1]), page(40, &[2]), page(40, &[3]), page(40, &[4])]);
    b.init(years()).await.unwrap();
    b.dispatch(Event::NextPage).await.unwrap();
    b.dispatch(Event::NextPage).await.unwrap();
    assert_eq!(b.state().current_page(), 3);

    b.dispatch(Event::Submit).await.unwrap();
    assert_eq!(b.state().current_page(), 1);
    let skips: Vec<u64> = b.api().queries().iter().map(|q| q.skip).collect();
    assert_eq!(skips, vec![0, 12, 24, 0]);
}

#[tokio::test]
async fn paging_stops_at_both_ends() {
    let mut b = browser(vec![page(25, &[1]), page(25, &[2]), page(25, &[3])]);
    b.init(years()).await.unwrap();

    b.previous_page().await.unwrap();
    assert_eq!(b.api().queries().len(), 1);

    b.next_page().await.unwrap();
    b.next_page().await.unwrap();
    let view = b.surface().last_results().unwrap().clone();
    assert_eq!(view.current_page, 3);
    assert_eq!(view.max_pages, 3);
    assert!(!view.next_enabled);
    assert!(view.previous_enabled);

    b.next_page().await.unwrap();
    assert_eq!(b.api().queries().len(), 3);
    assert_eq!(b.state().current_page(), 3);
}

#[tokio::test]
async fn empty_page_shows_no_results() {
    let mut b = browser(vec![page(0, &[])]);
    b.init(years()).await.unwrap();
    let view = b.surface().last_results().unwrap();
    assert!(view.no_results);
    assert!(view.cards.is_empty());
    assert!(!view.next_enabled);
}

#[tokio::test]
async fn cards_render_one_per_item_in_order() {
    let mut b = browser(vec![page(3, &[30, 10, 20])]);
    b.init(years()).await.unwrap();
    let ids: Vec<i64> = b
        .surface()
        .last_results()
        .unwrap()
        .cards
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[tokio::test]
async fn opening_a_card_loads_that_cards_id() {
    let mut b = browser(vec![page(2, &[30, 10])]);
    b.init(years()).await.unwrap();
    b.api().push_detail(Ok(FoodDetail {
        id: 10,
        food_name: "soy milk".to_string(),
        ..FoodDetail::default()
    }));

    b.dispatch(Event::OpenCard(2)).await.unwrap();

    assert_eq!(b.api().detail_ids(), vec![10]);
    assert_eq!(b.detail_open(), Some(10));
    let shown = b.surface().calls.iter().rev().find_map(|c| match c {
        Drawn::Detail(d) => Some(d),
        _ => None,
    });
    assert_eq!(shown.map(|d| d.title.as_str()), Some("soy milk"));
    assert!(!b.surface().loading_visible());
}

#[tokio::test]
async fn unknown_card_alerts_without_request() {
    let mut b = browser(vec![page(1, &[5])]);
    b.init(years()).await.unwrap();
    let err = b.dispatch(Event::OpenCard(4)).await;
    assert!(matches!(err, Err(browser::BrowseError::UnknownCard { position: 4 })));
    assert_eq!(b.surface().alerts(), vec![browser::NO_SUCH_CARD]);
    assert!(b.api().detail_ids().is_empty());
}

#[tokio::test]
async fn detail_closes_on_close_or_backdrop_but_not_content() {
    let mut b = browser(vec![page(1, &[5])]);
    b.init(years()).await.unwrap();
    let state_before = b.state().clone();

    b.dispatch(Event::OpenFood(5)).await.unwrap();
    b.dispatch(Event::ClickContent).await.unwrap();
    assert_eq!(b.detail_open(), Some(5));

    b.dispatch(Event::ClickBackdrop).await.unwrap();
    assert_eq!(b.detail_open(), None);

    b.dispatch(Event::OpenFood(5)).await.unwrap();
    b.dispatch(Event::CloseDetail).await.unwrap();
    b.dispatch(Event::CloseDetail).await.unwrap();
    assert_eq!(b.detail_open(), None);

    assert_eq!(b.surface().count(|c| *c == Drawn::HideDetail), 2);
    assert_eq!(b.state(), &state_before);
}

#[tokio::test]
async fn detail_failure_alerts_and_stays_closed() {
    let mut b = browser(vec![]);
    b.api().push_detail(Err(server_error()));
    assert!(b.load_detail(77).await.is_err());
    assert_eq!(b.surface().alerts(), vec![browser::DETAIL_FAILED]);
    assert_eq!(b.detail_open(), None);
    assert!(!b.surface().loading_visible());
}

#[tokio::test]
async fn stale_search_response_is_dropped() {
    let mut b = browser(vec![]);
    let older = b.begin_search();
    let newer = b.begin_search();
    assert!(older < newer);

    b.finish_search(newer, page(5, &[1])).unwrap();
    b.finish_search(older, page(99, &[2, 3])).unwrap();

    assert_eq!(b.state().total_items(), 5);
    let ids: Vec<i64> = b.cards().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(b.surface().count(|c| matches!(c, Drawn::Results(_))), 1);
    // one indicator for both requests, hidden once the last one settles
    assert_eq!(b.surface().count(|c| *c == Drawn::Loading(true)), 1);
    assert_eq!(b.surface().calls.last(), Some(&Drawn::Loading(false)));
}

#[tokio::test]
async fn stale_detail_failure_is_ignored() {
    let mut b = browser(vec![]);
    let older = b.begin_detail(1);
    let newer = b.begin_detail(2);
    b.finish_detail(
        newer,
        Ok(FoodDetail {
            id: 2,
            ..FoodDetail::default()
        }),
    )
    .unwrap();
    b.finish_detail(older, Err(server_error())).unwrap();

    assert_eq!(b.detail_open(), Some(2));
    assert!(b.surface().alerts().is_empty());
}

#[tokio::test]
async fn year_selection_is_limited_to_options() {
    let mut b = browser(vec![page(0, &[]), page(0, &[]), page(0, &[])]);
    b.init(years()).await.unwrap();

    let err = b.dispatch(Event::SelectYear("1999".to_string())).await;
    assert!(matches!(err, Err(browser::BrowseError::UnknownYear { .. })));
    assert_eq!(b.api().queries().len(), 1);

    b.dispatch(Event::SelectYear("2023".to_string()))
        .await
        .unwrap();
    assert_eq!(
        b.api().queries().last().unwrap().research_year.as_deref(),
        Some("2023")
    );

    b.dispatch(Event::SelectYear(String::new())).await.unwrap();
    assert_eq!(b.api().queries().last().unwrap().research_year, None);
}

#[tokio::test]
async fn startup_skips_detail_when_first_load_fails() {
    let mut b = browser(vec![Err(server_error())]);
    let err = crate::app::start_browser(&mut b, years(), Some(5)).await;
    assert!(matches!(err, Err(browser::BrowseError::Api(_))));
    assert!(b.api().detail_ids().is_empty());
    assert_eq!(b.surface().alerts(), vec![browser::SEARCH_FAILED]);
    assert!(!b.surface().loading_visible());
}

#[tokio::test]
async fn startup_opens_detail_after_first_page() {
    let mut b = browser(vec![page(1, &[5])]);
    crate::app::start_browser(&mut b, years(), Some(5))
        .await
        .unwrap();
    assert_eq!(b.api().queries().len(), 1);
    assert_eq!(b.api().detail_ids(), vec![5]);
    assert_eq!(b.detail_open(), Some(5));
}
