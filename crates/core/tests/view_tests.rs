// ═══════════════════════════════════════════════════════════════════
// View Tests: Screener, Portfolio, Alerts and Analysis containers
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use stratos_core::api::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use stratos_core::errors::CoreError;
use stratos_core::models::alert::AlertType;
use stratos_core::views::alerts::AlertsView;
use stratos_core::models::preferences::UserPreferences;
use stratos_core::views::analysis::{AnalysisPanel, AnalysisSource};
use stratos_core::views::forms::{AlertForm, HoldingForm};
use stratos_core::views::portfolio::{PortfolioDisplay, PortfolioView};
use stratos_core::views::screener::{ScreenerView, NO_MATCHES_MESSAGE};
use stratos_core::views::{Followup, LoadState, NotificationLevel};

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: Recording Transport
// ═══════════════════════════════════════════════════════════════════

enum Outcome {
    Respond(ApiResponse),
    Unreachable,
}

/// Answers by method + path and records every request it sees.
/// Unrouted requests get a 404.
#[derive(Default)]
struct MockTransport {
    routes: Vec<(Method, String, Outcome)>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    fn new() -> Self {
        Self::default()
    }

    fn on(mut self, method: Method, path: &str, body: Value) -> Self {
        let response = ApiResponse::ok_json(&body).unwrap();
        self.routes
            .push((method, path.to_string(), Outcome::Respond(response)));
        self
    }

    fn on_status(mut self, method: Method, path: &str, status: u16, text: &str) -> Self {
        let response = ApiResponse::new(status, text, Vec::new());
        self.routes
            .push((method, path.to_string(), Outcome::Respond(response)));
        self
    }

    fn unreachable(mut self, method: Method, path: &str) -> Self {
        self.routes
            .push((method, path.to_string(), Outcome::Unreachable));
        self
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path() == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CoreError> {
        self.requests.lock().unwrap().push(request.clone());
        let path = request.path();
        let outcome = self
            .routes
            .iter()
            .find(|(m, p, _)| *m == request.method && *p == path)
            .map(|(_, _, o)| o);
        match outcome {
            Some(Outcome::Respond(response)) => Ok(response.clone()),
            Some(Outcome::Unreachable) => Err(CoreError::Network("connection refused".into())),
            None => Ok(ApiResponse::new(404, "Not Found", Vec::new())),
        }
    }
}

fn client(mock: MockTransport) -> (ApiClient, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    (ApiClient::new(mock.clone()), mock)
}

fn jnj() -> Value {
    json!({
        "symbol": "JNJ",
        "name": "Johnson & Johnson",
        "sector": "Healthcare",
        "price": 155.5,
        "dividend_yield": 3.1,
        "pe_ratio": 15.2,
        "market_cap": 375.0,
        "beta": 0.55,
        "debt_to_equity": 0.45,
        "fifty_two_week_high": 175.0,
        "fifty_two_week_low": 145.0
    })
}

fn screen_response(stocks: Vec<Value>) -> Value {
    let total = stocks.len();
    json!({
        "stocks": stocks,
        "total": total,
        "filters_applied": { "min_dividend_yield": 2.0, "sector": "Healthcare" }
    })
}

fn holding(id: i64, symbol: &str) -> Value {
    json!({
        "id": id,
        "symbol": symbol,
        "shares": 10.0,
        "purchase_price": 150.0,
        "purchase_date": "2024-01-15T00:00:00",
        "notes": null,
        "created_at": "2024-01-15T10:30:00",
        "updated_at": "2024-01-15T10:30:00",
        "name": "Apple Inc.",
        "current_price": 165.0,
        "current_value": 1650.0,
        "gain_loss": 150.0,
        "gain_loss_percent": 10.0
    })
}

fn portfolio(holdings: Vec<Value>) -> Value {
    let count = holdings.len();
    let value = 1650.0 * count as f64;
    json!({
        "total_value": value,
        "total_cost": 1500.0 * count as f64,
        "total_gain_loss": value - 1500.0 * count as f64,
        "total_gain_loss_percent": if count == 0 { 0.0 } else { 10.0 },
        "holdings_count": count,
        "holdings": holdings
    })
}

fn alert(id: i64, is_active: bool, is_triggered: bool) -> Value {
    json!({
        "id": id,
        "symbol": "AAPL",
        "alert_type": "price_above",
        "target_value": 200.0,
        "is_active": is_active,
        "is_triggered": is_triggered,
        "triggered_at": null,
        "created_at": "2024-01-15T10:30:00",
        "notes": null
    })
}

fn recommendation(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "recommendation": "buy",
        "confidence": 0.72,
        "summary": "Solid dividend payer",
        "pros": ["Dividend yield above 3%"],
        "cons": [],
        "target_price": 170.0,
        "risk_level": "low"
    })
}

const PORTFOLIO_PATH: &str = "/api/v1/portfolio/";
const ALERTS_PATH: &str = "/api/v1/alerts/";
const SCREEN_PATH: &str = "/api/v1/stocks/screen";

// ═══════════════════════════════════════════════════════════════════
// Screener
// ═══════════════════════════════════════════════════════════════════

mod screener {
    use super::*;

    #[test]
    fn philosophy_shown_before_any_search() {
        let view = ScreenerView::new();
        let layout = view.layout();
        assert!(layout.show_philosophy);
        assert!(layout.results.is_none());
        assert!(layout.submit_enabled);
    }

    #[tokio::test]
    async fn mount_loads_sectors() {
        let (api, mock) = client(MockTransport::new().on(
            Method::Get,
            "/api/v1/stocks/sectors",
            json!(["Healthcare", "Utilities"]),
        ));
        let mut view = ScreenerView::new();
        view.mount(&api).await;
        assert_eq!(view.sectors(), ["Healthcare", "Utilities"]);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn failed_sector_load_leaves_dropdown_empty() {
        let (api, _) = client(MockTransport::new().unreachable(Method::Get, "/api/v1/stocks/sectors"));
        let mut view = ScreenerView::new();
        view.mount(&api).await;
        assert!(view.sectors().is_empty());
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn successful_screen_renders_one_row() {
        let (api, _) = client(MockTransport::new().on(Method::Get, SCREEN_PATH, screen_response(vec![jnj()])));
        let mut view = ScreenerView::new();
        view.search(&api).await;

        let layout = view.layout();
        assert!(!layout.show_philosophy);
        assert!(layout.error.is_none());
        let results = layout.results.expect("results panel");
        assert_eq!(results.heading, "Results (1 stocks)");
        assert_eq!(results.rows.len(), 1);
        assert_eq!(results.rows[0].symbol, "JNJ");
        assert_eq!(results.rows[0].name, "Johnson & Johnson");
        assert_eq!(
            results.filters_summary.as_deref(),
            Some("min dividend yield: 2, sector: Healthcare")
        );
        assert!(results.empty_message.is_none());
    }

    #[tokio::test]
    async fn empty_screen_shows_no_matches_message() {
        let (api, _) = client(MockTransport::new().on(Method::Get, SCREEN_PATH, screen_response(vec![])));
        let mut view = ScreenerView::new();
        view.search(&api).await;

        let results = view.layout().results.expect("results panel");
        assert_eq!(results.heading, "Results (0 stocks)");
        assert_eq!(results.empty_message, Some(NO_MATCHES_MESSAGE));
    }

    #[tokio::test]
    async fn blank_filters_are_not_sent() {
        let (api, mock) = client(MockTransport::new().on(Method::Get, SCREEN_PATH, screen_response(vec![])));
        let mut view = ScreenerView::new();
        view.form.max_beta = "1.0".into();
        view.form.sector = "   ".into();
        view.search(&api).await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, vec![("max_beta".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn failed_screen_clears_list_and_keeps_has_searched() {
        let (ok_api, _) = client(MockTransport::new().on(Method::Get, SCREEN_PATH, screen_response(vec![jnj()])));
        let (failing_api, _) = client(MockTransport::new().on_status(
            Method::Get,
            SCREEN_PATH,
            500,
            "Internal Server Error",
        ));

        let mut view = ScreenerView::new();
        view.search(&ok_api).await;
        assert_eq!(view.stocks().len(), 1);

        view.search(&failing_api).await;
        assert!(view.stocks().is_empty());
        assert!(view.has_searched());
        assert_eq!(view.error(), Some("Failed to screen stocks: Internal Server Error"));

        let layout = view.layout();
        assert!(!layout.show_philosophy);
        assert!(layout.results.is_none());
        assert!(layout.error.is_some());
    }

    #[tokio::test]
    async fn invalid_number_is_rejected_without_a_request() {
        let (api, mock) = client(MockTransport::new());
        let mut view = ScreenerView::new();
        view.form.max_pe_ratio = "cheap".into();
        view.search(&api).await;

        assert!(mock.requests().is_empty());
        assert!(view.has_searched());
        assert!(view.error().unwrap().contains("Max P/E ratio"));
    }

    #[test]
    fn submit_disabled_while_screen_in_flight() {
        let mut view = ScreenerView::new();
        let first = view.begin_search();
        assert!(first.is_some());
        assert!(!view.layout().submit_enabled);
        assert!(view.begin_search().is_none());
    }

    #[test]
    fn result_after_unmount_is_discarded() {
        let mut view = ScreenerView::new();
        let (ticket, _) = view.begin_search().unwrap();
        view.unmount();

        let response = serde_json::from_value(screen_response(vec![jnj()])).unwrap();
        view.finish_search(ticket, Ok(response));
        assert!(view.stocks().is_empty());
        assert!(!view.results().is_loaded());
    }

    #[tokio::test]
    async fn watchlist_success_notifies_without_touching_table() {
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Get, SCREEN_PATH, screen_response(vec![jnj()]))
                .on(
                    Method::Post,
                    "/api/v1/watchlist",
                    json!({
                        "id": 7,
                        "symbol": "JNJ",
                        "added_at": "2024-01-15T10:30:00",
                        "notes": null,
                        "target_price": null,
                        "is_active": true
                    }),
                ),
        );
        let mut view = ScreenerView::new();
        view.search(&api).await;
        view.add_to_watchlist(&api, "jnj").await;

        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Success);
        assert_eq!(notifications[0].message, "JNJ added to watchlist!");
        assert_eq!(view.stocks().len(), 1);

        let sent = mock.requests();
        let post = sent.iter().find(|r| r.method == Method::Post).unwrap();
        assert_eq!(post.body, Some(json!({ "symbol": "JNJ" })));
        assert!(view.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn watchlist_failure_notifies_error() {
        let (api, _) = client(MockTransport::new().on_status(Method::Post, "/api/v1/watchlist", 400, "Bad Request"));
        let mut view = ScreenerView::new();
        view.add_to_watchlist(&api, "JNJ").await;

        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
        assert_eq!(notifications[0].message, "Failed to add JNJ to watchlist");
    }

    #[tokio::test]
    async fn blank_watchlist_symbol_sends_nothing() {
        let (api, mock) = client(MockTransport::new());
        let mut view = ScreenerView::new();
        view.add_to_watchlist(&api, "   ").await;

        assert!(mock.requests().is_empty());
        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
        assert_eq!(notifications[0].message, "Validation failed: Symbol is required");
    }

    #[tokio::test]
    async fn remount_after_unmount_mid_search_accepts_submit() {
        let (api, mock) = client(MockTransport::new().on(Method::Get, SCREEN_PATH, screen_response(vec![jnj()])));
        let mut view = ScreenerView::new();
        let _stale = view.begin_search().unwrap();
        view.unmount();
        assert!(!view.is_searching());

        view.mount(&api).await;
        assert!(view.layout().submit_enabled);
        view.search(&api).await;
        assert_eq!(mock.count(Method::Get, SCREEN_PATH), 1);
        assert_eq!(view.stocks().len(), 1);
    }

    #[tokio::test]
    async fn saved_preferences_prefill_the_form() {
        let (api, mock) = client(MockTransport::new().on(Method::Get, SCREEN_PATH, screen_response(vec![])));
        let prefs: UserPreferences = serde_json::from_value(json!({
            "id": 1,
            "name": "default",
            "min_dividend_yield": 2.5,
            "max_pe_ratio": null,
            "min_market_cap": null,
            "max_beta": 1.2,
            "max_debt_to_equity": null,
            "preferred_sectors": ["Utilities", "Healthcare"],
            "created_at": "2024-01-15T10:30:00",
            "updated_at": "2024-01-15T10:30:00"
        }))
        .unwrap();

        let mut view = ScreenerView::new();
        view.apply_preferences(&prefs);
        assert_eq!(view.form.sector, "Utilities");
        assert_eq!(view.form.min_dividend_yield, "2.5");
        assert_eq!(view.form.max_beta, "1.2");
        assert!(view.form.max_pe_ratio.is_empty());

        view.search(&api).await;
        let sent = &mock.requests()[0];
        assert_eq!(sent.query_value("sector"), Some("Utilities"));
        assert_eq!(sent.query_value("min_dividend_yield"), Some("2.5"));
        assert_eq!(sent.query_value("max_pe_ratio"), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Analysis panel
// ═══════════════════════════════════════════════════════════════════

mod analysis {
    use super::*;

    #[test]
    fn panel_starts_unrequested() {
        let panel = AnalysisPanel::new("jnj");
        assert_eq!(panel.symbol(), "JNJ");
        assert_eq!(panel.state(), &LoadState::NotLoaded);
        assert!(panel.can_request());
        assert!(!panel.can_retry());
    }

    #[tokio::test]
    async fn quick_analysis_uses_rule_based_endpoint() {
        let (api, mock) = client(MockTransport::new().on(
            Method::Get,
            "/api/v1/analysis/quick/JNJ",
            recommendation("JNJ"),
        ));
        let mut view = ScreenerView::new();
        view.open_analysis("JNJ");
        view.analyze(&api).await;

        let panel = view.analysis().unwrap();
        let rec = panel.state().data().expect("loaded");
        assert_eq!(rec.confidence_percent(), 72);
        assert_eq!(mock.count(Method::Get, "/api/v1/analysis/quick/JNJ"), 1);
        assert!(!panel.can_request());
    }

    #[tokio::test]
    async fn ai_source_uses_stock_endpoint() {
        let (api, mock) = client(MockTransport::new().on(
            Method::Get,
            "/api/v1/analysis/stock/JNJ",
            recommendation("JNJ"),
        ));
        let mut view = ScreenerView::new();
        view.open_analysis_with("JNJ", AnalysisSource::Ai);
        view.analyze(&api).await;
        assert!(view.analysis().unwrap().state().is_loaded());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn failure_offers_retry() {
        let (failing, _) = client(MockTransport::new().unreachable(Method::Get, "/api/v1/analysis/quick/JNJ"));
        let (working, _) = client(MockTransport::new().on(
            Method::Get,
            "/api/v1/analysis/quick/JNJ",
            recommendation("JNJ"),
        ));

        let mut view = ScreenerView::new();
        view.open_analysis("JNJ");
        view.analyze(&failing).await;
        let panel = view.analysis().unwrap();
        assert!(panel.can_retry());
        assert!(panel.state().error().unwrap().contains("connection refused"));

        view.analyze(&working).await;
        let panel = view.analysis().unwrap();
        assert!(panel.state().is_loaded());
        assert!(!panel.can_retry());
    }

    #[test]
    fn result_for_replaced_panel_is_discarded() {
        let mut view = ScreenerView::new();
        view.open_analysis("JNJ");
        let (ticket, symbol, _) = view.begin_analysis().unwrap();
        assert_eq!(symbol, "JNJ");

        view.open_analysis("KO");
        let rec = serde_json::from_value(recommendation("JNJ")).unwrap();
        view.finish_analysis(ticket, Ok(rec));

        let panel = view.analysis().unwrap();
        assert_eq!(panel.symbol(), "KO");
        assert_eq!(panel.state(), &LoadState::NotLoaded);
    }

    #[tokio::test]
    async fn closing_and_reopening_starts_fresh() {
        let (api, mock) = client(MockTransport::new().on(
            Method::Get,
            "/api/v1/analysis/quick/JNJ",
            recommendation("JNJ"),
        ));
        let mut view = ScreenerView::new();
        view.open_analysis("JNJ");
        view.analyze(&api).await;
        assert!(view.analysis().unwrap().state().is_loaded());

        view.close_analysis();
        assert!(view.analysis().is_none());

        view.open_analysis("JNJ");
        assert_eq!(view.analysis().unwrap().state(), &LoadState::NotLoaded);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn unmount_mid_request_drops_panel_and_reopen_works() {
        let (api, mock) = client(MockTransport::new().on(
            Method::Get,
            "/api/v1/analysis/quick/JNJ",
            recommendation("JNJ"),
        ));
        let mut view = ScreenerView::new();
        view.open_analysis("JNJ");
        let (ticket, _, _) = view.begin_analysis().unwrap();
        view.unmount();
        assert!(view.analysis().is_none());

        let late = serde_json::from_value(recommendation("JNJ")).unwrap();
        view.finish_analysis(ticket, Ok(late));
        assert!(view.analysis().is_none());

        view.mount(&api).await;
        view.open_analysis("JNJ");
        view.analyze(&api).await;
        assert!(view.analysis().unwrap().state().is_loaded());
        assert_eq!(mock.count(Method::Get, "/api/v1/analysis/quick/JNJ"), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Portfolio
// ═══════════════════════════════════════════════════════════════════

mod portfolio {
    use super::*;

    #[tokio::test]
    async fn mount_loads_holdings() {
        let (api, _) = client(MockTransport::new().on(Method::Get, PORTFOLIO_PATH, portfolio(vec![holding(1, "AAPL")])));
        let mut view = PortfolioView::new();
        assert_eq!(view.display(), PortfolioDisplay::Loading);
        view.mount(&api).await;

        match view.display() {
            PortfolioDisplay::Holdings(summary) => {
                assert_eq!(summary.holdings.len(), 1);
                assert_eq!(summary.holdings[0].holding.symbol, "AAPL");
                assert_eq!(summary.total_value, 1650.0);
            }
            other => panic!("expected holdings, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_portfolio_is_its_own_branch() {
        let (api, _) = client(MockTransport::new().on(Method::Get, PORTFOLIO_PATH, portfolio(vec![])));
        let mut view = PortfolioView::new();
        view.mount(&api).await;
        assert_eq!(view.display(), PortfolioDisplay::Empty);
    }

    #[tokio::test]
    async fn fetch_failure_shows_error() {
        let (api, _) = client(MockTransport::new().on_status(Method::Get, PORTFOLIO_PATH, 503, "Service Unavailable"));
        let mut view = PortfolioView::new();
        view.mount(&api).await;
        assert_eq!(
            view.display(),
            PortfolioDisplay::Error("Failed to get portfolio: Service Unavailable")
        );
    }

    #[tokio::test]
    async fn zero_shares_issues_no_call() {
        let (api, mock) = client(MockTransport::new());
        let mut view = PortfolioView::new();
        view.form = HoldingForm::new("AAPL", 0.0, 150.0);
        view.add_holding(&api).await;

        assert!(mock.requests().is_empty());
        assert_eq!(
            view.error(),
            Some("Validation failed: Shares must be greater than zero")
        );
    }

    #[tokio::test]
    async fn zero_price_issues_no_call() {
        let (api, mock) = client(MockTransport::new());
        let mut view = PortfolioView::new();
        view.form = HoldingForm::new("AAPL", 10.0, 0.0);
        view.add_holding(&api).await;
        assert!(mock.requests().is_empty());
        assert!(view.error().unwrap().contains("Purchase price"));
    }

    #[tokio::test]
    async fn add_success_resets_form_and_refetches() {
        let created = json!({
            "id": 2,
            "symbol": "MSFT",
            "shares": 5.0,
            "purchase_price": 300.0,
            "purchase_date": "2024-02-01T00:00:00",
            "notes": null,
            "created_at": "2024-02-01T00:00:00",
            "updated_at": "2024-02-01T00:00:00"
        });
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Post, "/api/v1/portfolio/holdings", created)
                .on(Method::Get, PORTFOLIO_PATH, portfolio(vec![holding(1, "AAPL")])),
        );
        let mut view = PortfolioView::new();
        view.toggle_add_form();
        view.form = HoldingForm::new("msft", 5.0, 300.0);
        view.add_holding(&api).await;

        assert!(!view.is_add_form_visible());
        assert_eq!(view.form, HoldingForm::default());
        assert_eq!(mock.count(Method::Post, "/api/v1/portfolio/holdings"), 1);
        assert_eq!(mock.count(Method::Get, PORTFOLIO_PATH), 1);

        let post = mock
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        assert_eq!(
            post.body,
            Some(json!({ "symbol": "MSFT", "shares": 5.0, "purchase_price": 300.0 }))
        );
    }

    #[tokio::test]
    async fn add_failure_keeps_form() {
        let (api, mock) = client(MockTransport::new().on_status(
            Method::Post,
            "/api/v1/portfolio/holdings",
            422,
            "Unprocessable Entity",
        ));
        let mut view = PortfolioView::new();
        view.toggle_add_form();
        view.form = HoldingForm::new("MSFT", 5.0, 300.0);
        view.add_holding(&api).await;

        assert!(view.is_add_form_visible());
        assert_eq!(view.form.symbol, "MSFT");
        assert_eq!(view.error(), Some("Failed to add holding: Unprocessable Entity"));
        assert_eq!(mock.count(Method::Get, PORTFOLIO_PATH), 0);
    }

    #[tokio::test]
    async fn declined_delete_issues_no_call() {
        let (api, mock) = client(MockTransport::new().on(Method::Get, PORTFOLIO_PATH, portfolio(vec![holding(1, "AAPL")])));
        let mut view = PortfolioView::new();
        view.mount(&api).await;

        view.delete_holding(&api, 1, &|_: &str| false).await;

        assert_eq!(mock.requests().len(), 1);
        assert_eq!(mock.count(Method::Delete, "/api/v1/portfolio/holdings/1"), 0);
    }

    #[tokio::test]
    async fn confirmed_delete_sends_one_delete_then_one_refetch() {
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Get, PORTFOLIO_PATH, portfolio(vec![]))
                .on(
                    Method::Delete,
                    "/api/v1/portfolio/holdings/1",
                    json!({ "message": "Holding deleted" }),
                ),
        );
        let mut view = PortfolioView::new();
        view.mount(&api).await;

        let prompts = Mutex::new(Vec::new());
        let confirm = |prompt: &str| {
            prompts.lock().unwrap().push(prompt.to_string());
            true
        };
        view.delete_holding(&api, 1, &confirm).await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].path(), "/api/v1/portfolio/holdings/1");
        assert_eq!(requests[2].method, Method::Get);
        assert_eq!(requests[2].path(), PORTFOLIO_PATH);
        assert_eq!(
            prompts.lock().unwrap().as_slice(),
            ["Are you sure you want to remove this holding?"]
        );
    }

    #[test]
    fn refresh_keeps_previous_data_visible() {
        let mut view = PortfolioView::new();
        let ticket = view.begin_refresh().unwrap();
        let summary = serde_json::from_value(portfolio(vec![holding(1, "AAPL")])).unwrap();
        assert_eq!(view.finish_refresh(ticket, Ok(summary)), Followup::None);

        let _again = view.begin_refresh().unwrap();
        assert!(view.is_busy());
        assert!(matches!(view.display(), PortfolioDisplay::Holdings(_)));
        assert!(view.begin_refresh().is_none());
    }

    #[test]
    fn mutation_after_unmount_requests_nothing() {
        let mut view = PortfolioView::new();
        view.form = HoldingForm::new("AAPL", 1.0, 1.0);
        let (ticket, _) = view.begin_add().unwrap();
        view.unmount();
        assert_eq!(
            view.finish_add(ticket, Err(CoreError::Network("late".into()))),
            Followup::None
        );
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn remount_after_unmount_mid_load_fetches_again() {
        let (api, mock) = client(MockTransport::new().on(Method::Get, PORTFOLIO_PATH, portfolio(vec![holding(1, "AAPL")])));
        let mut view = PortfolioView::new();
        let stale = view.begin_refresh().unwrap();
        view.unmount();
        assert!(!view.is_busy());

        view.mount(&api).await;
        assert_eq!(mock.count(Method::Get, PORTFOLIO_PATH), 1);
        assert!(matches!(view.display(), PortfolioDisplay::Holdings(_)));

        let late = Err(CoreError::Network("late".into()));
        assert_eq!(view.finish_refresh(stale, late), Followup::None);
        assert!(matches!(view.display(), PortfolioDisplay::Holdings(_)));
    }

    #[test]
    fn change_during_refresh_discards_stale_fetch() {
        let mut view = PortfolioView::new();
        let first = view.begin_refresh().unwrap();
        let one = serde_json::from_value(portfolio(vec![holding(1, "AAPL")])).unwrap();
        assert_eq!(view.finish_refresh(first, Ok(one)), Followup::None);

        let in_flight = view.begin_refresh().unwrap();
        view.form = HoldingForm::new("MSFT", 5.0, 300.0);
        let (add, _) = view.begin_add().unwrap();
        let added = serde_json::from_value(holding(2, "MSFT")).unwrap();
        assert_eq!(view.finish_add(add, Ok(added)), Followup::Refetch);
        assert!(view.begin_refresh().is_none());

        let stale = serde_json::from_value(portfolio(vec![holding(1, "AAPL")])).unwrap();
        assert_eq!(view.finish_refresh(in_flight, Ok(stale)), Followup::Refetch);
        match view.display() {
            PortfolioDisplay::Holdings(summary) => assert_eq!(summary.holdings.len(), 1),
            other => panic!("expected holdings, got {other:?}"),
        }

        let again = view.begin_refresh().expect("refetch allowed");
        let fresh = serde_json::from_value(portfolio(vec![holding(1, "AAPL"), holding(2, "MSFT")])).unwrap();
        assert_eq!(view.finish_refresh(again, Ok(fresh)), Followup::None);
        match view.display() {
            PortfolioDisplay::Holdings(summary) => assert_eq!(summary.holdings.len(), 2),
            other => panic!("expected holdings, got {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Alerts
// ═══════════════════════════════════════════════════════════════════

mod alerts {
    use super::*;

    #[tokio::test]
    async fn mount_lists_every_alert() {
        let (api, mock) = client(MockTransport::new().on(
            Method::Get,
            ALERTS_PATH,
            json!([alert(1, true, false), alert(2, false, false)]),
        ));
        let mut view = AlertsView::new();
        view.mount(&api).await;

        assert_eq!(view.alert_list().len(), 2);
        let requests = mock.requests();
        assert_eq!(requests[0].query_value("active_only"), Some("false"));
    }

    #[tokio::test]
    async fn check_now_notifies_and_refetches() {
        let fired = json!([
            {
                "alert": alert(1, true, false),
                "current_price": 205.0,
                "should_trigger": true,
                "message": "AAPL is above $200.00"
            },
            {
                "alert": alert(2, true, false),
                "current_price": 150.0,
                "should_trigger": false,
                "message": "AAPL is below target"
            }
        ]);
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Get, ALERTS_PATH, json!([alert(1, true, true)]))
                .on(Method::Get, "/api/v1/alerts/check/all", fired),
        );
        let mut view = AlertsView::new();
        view.mount(&api).await;
        view.check_now(&api).await;

        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Info);
        assert_eq!(notifications[0].message, "AAPL is above $200.00");
        assert_eq!(view.last_checks().len(), 2);
        assert_eq!(view.triggered_checks().count(), 1);
        assert_eq!(mock.count(Method::Get, ALERTS_PATH), 2);
        assert!(view.can_check());
    }

    #[test]
    fn check_disabled_while_running() {
        let mut view = AlertsView::new();
        let _ticket = view.begin_check().unwrap();
        assert!(!view.can_check());
        assert!(view.begin_check().is_none());
    }

    #[tokio::test]
    async fn create_validates_before_sending() {
        let (api, mock) = client(MockTransport::new());
        let mut view = AlertsView::new();
        view.form = AlertForm::new("AAPL", AlertType::PriceBelow, 0.0);
        view.create_alert(&api).await;
        assert!(mock.requests().is_empty());
        assert!(view.error().unwrap().contains("Target value"));
    }

    #[tokio::test]
    async fn create_then_refetch() {
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Post, ALERTS_PATH, alert(3, true, false))
                .on(Method::Get, ALERTS_PATH, json!([alert(3, true, false)])),
        );
        let mut view = AlertsView::new();
        view.form = AlertForm::new("aapl", AlertType::PriceAbove, 200.0);
        view.create_alert(&api).await;

        let post = mock
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        assert_eq!(
            post.body,
            Some(json!({ "symbol": "AAPL", "alert_type": "price_above", "target_value": 200.0 }))
        );
        assert_eq!(view.alert_list().len(), 1);
        assert_eq!(view.form.symbol, "");
    }

    #[tokio::test]
    async fn declined_delete_issues_no_call() {
        let (api, mock) = client(MockTransport::new());
        let mut view = AlertsView::new();
        view.delete_alert(&api, 1, &|_: &str| false).await;
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_then_refetch() {
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Delete, "/api/v1/alerts/4", json!({ "message": "Alert deleted" }))
                .on(Method::Get, ALERTS_PATH, json!([])),
        );
        let mut view = AlertsView::new();
        view.delete_alert(&api, 4, &|_: &str| true).await;

        assert_eq!(mock.count(Method::Delete, "/api/v1/alerts/4"), 1);
        assert_eq!(mock.count(Method::Get, ALERTS_PATH), 1);
        assert!(view.alert_list().is_empty());
    }

    #[tokio::test]
    async fn deactivate_posts_then_refetches() {
        let (api, mock) = client(
            MockTransport::new()
                .on(Method::Post, "/api/v1/alerts/1/deactivate", alert(1, false, false))
                .on(Method::Get, ALERTS_PATH, json!([alert(1, false, false)])),
        );
        let mut view = AlertsView::new();
        view.deactivate_alert(&api, 1).await;
        assert_eq!(mock.requests().len(), 2);
        assert!(!view.alert_list()[0].is_active);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_loaded_alerts() {
        let (ok_api, _) = client(MockTransport::new().on(Method::Get, ALERTS_PATH, json!([alert(1, true, false)])));
        let (down_api, _) = client(MockTransport::new().unreachable(Method::Get, ALERTS_PATH));

        let mut view = AlertsView::new();
        view.refresh(&ok_api).await;
        view.refresh(&down_api).await;

        assert_eq!(view.alert_list().len(), 1);
        assert!(view.error().unwrap().starts_with("Network error"));
    }

    #[tokio::test]
    async fn remount_after_unmount_mid_load_fetches_again() {
        let (api, mock) = client(MockTransport::new().on(Method::Get, ALERTS_PATH, json!([alert(1, true, false)])));
        let mut view = AlertsView::new();
        let _stale = view.begin_refresh().unwrap();
        view.unmount();
        assert!(!view.alerts().is_loading());

        view.mount(&api).await;
        assert_eq!(mock.count(Method::Get, ALERTS_PATH), 1);
        assert!(view.alerts().is_loaded());
        assert!(view.can_check());
    }

    #[test]
    fn delete_during_refresh_discards_stale_list() {
        let mut view = AlertsView::new();
        let first = view.begin_refresh().unwrap();
        let two = serde_json::from_value(json!([alert(1, true, false), alert(2, true, false)])).unwrap();
        assert_eq!(view.finish_refresh(first, Ok(two)), Followup::None);

        let in_flight = view.begin_refresh().unwrap();
        let (delete, _) = view.begin_delete(2, &|_: &str| true).unwrap();
        assert_eq!(view.finish_delete(delete, Ok(())), Followup::Refetch);

        let stale = serde_json::from_value(json!([alert(1, true, false), alert(2, true, false)])).unwrap();
        assert_eq!(view.finish_refresh(in_flight, Ok(stale)), Followup::Refetch);

        let again = view.begin_refresh().expect("refetch allowed");
        let fresh = serde_json::from_value(json!([alert(1, true, false)])).unwrap();
        assert_eq!(view.finish_refresh(again, Ok(fresh)), Followup::None);
        assert_eq!(view.alert_list().len(), 1);
    }
}
