// TUI application state and the transitions the event loop drives
use std::time::{Duration, Instant};

use linccora_core::{
    catalog,
    config::UiConfig,
    filters::parse_bound,
    search::PendingSearch,
    Applied, FavoritesStore, FilterState, Product, Rotation, SearchOrchestrator, SearchOutcome,
};
use ratatui::widgets::ListState;
use tracing::warn;

/// Taglines cycled on the landing screen
pub const LANDING_SLIDES: &[&str] = &[
    "Curated Fashion Collections",
    "Traditional textiles, modern tailoring",
    "Discover luxury from the finest designers",
    "Handwoven heritage, everyday elegance",
    "Golden hour, golden threads",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Home,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,        // Browsing products
    Searching,     // Typing in the search box
    Filtering,     // Moving around the filter sidebar
    EditingFilter, // Typing a price bound
}

/// One selectable line in the filter sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRow {
    MinPrice,
    MaxPrice,
    Brand(String),
    Category(String),
}

pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub input_mode: InputMode,
    pub filters: FilterState,
    pub orchestrator: SearchOrchestrator,
    pub favorites: FavoritesStore,
    pub list_state: ListState,
    pub favorites_state: ListState,
    pub show_filters: bool,
    pub filter_cursor: usize,
    pub filter_edit_buffer: String,
    pub brand_options: Vec<String>,
    pub category_options: Vec<String>,
    pub featured_brands: Vec<String>,
    pub slideshow: Rotation,
    pub landing: Rotation,
    pub status_message: Option<String>,
    search_due: Option<Instant>,
    ui: UiConfig,
}

impl App {
    pub fn new(orchestrator: SearchOrchestrator, favorites: FavoritesStore, ui: UiConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        let mut favorites_state = ListState::default();
        favorites_state.select(Some(0));

        Self {
            should_quit: false,
            view: View::Landing,
            input_mode: InputMode::Normal,
            filters: FilterState::new(),
            orchestrator,
            favorites,
            list_state,
            favorites_state,
            show_filters: false,
            filter_cursor: 0,
            filter_edit_buffer: String::new(),
            brand_options: Vec::new(),
            category_options: Vec::new(),
            featured_brands: Vec::new(),
            slideshow: Rotation::new(0),
            landing: Rotation::new(LANDING_SLIDES.len()),
            status_message: None,
            // Catalog starts loading behind the landing screen
            search_due: Some(Instant::now()),
            ui,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_shop(&mut self) {
        self.view = View::Home;
        self.input_mode = InputMode::Normal;
    }

    pub fn show_home(&mut self) {
        self.view = View::Home;
        self.input_mode = InputMode::Normal;
    }

    pub fn show_favorites(&mut self) {
        self.view = View::Favorites;
        self.input_mode = InputMode::Normal;
        self.clamp_favorites_selection();
    }

    pub fn toggle_view(&mut self) {
        match self.view {
            View::Home => self.show_favorites(),
            View::Favorites | View::Landing => self.show_home(),
        }
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    // --- searching -------------------------------------------------------

    /// Every filter or query change re-runs the search after the debounce window
    pub fn schedule_search(&mut self) {
        let debounce = Duration::from_millis(self.ui.search_debounce_ms);
        self.search_due = Some(Instant::now() + debounce);
    }

    /// Search right away (Enter in the search box, manual refresh)
    pub fn submit_search(&mut self) {
        self.search_due = Some(Instant::now());
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_due
    }

    /// Dispatch the scheduled search once its deadline has passed
    pub fn take_due_search(&mut self, now: Instant) -> Option<PendingSearch> {
        match self.search_due {
            Some(due) if due <= now => {
                self.search_due = None;
                Some(self.orchestrator.dispatch(&self.filters))
            }
            _ => None,
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filters.query.push(c);
        self.schedule_search();
    }

    pub fn pop_search_char(&mut self) {
        if self.filters.query.pop().is_some() {
            self.schedule_search();
        }
    }

    pub fn apply_search(&mut self, outcome: SearchOutcome) -> Applied {
        let applied = self.orchestrator.apply(outcome);
        if applied != Applied::Stale {
            self.list_state.select(Some(0));
            self.refresh_options();
        }
        applied
    }

    /// Sidebar options accumulate across searches; a brand-filtered response
    /// only holds that brand, and the others must stay tickable.
    fn refresh_options(&mut self) {
        let products = self.orchestrator.products();
        if products.is_empty() {
            return;
        }

        self.brand_options =
            catalog::merge_options(&self.brand_options, &catalog::unique_brands(products));
        self.category_options =
            catalog::merge_options(&self.category_options, &catalog::unique_categories(products));

        // Slideshow only runs on an unfiltered screen, so only unfiltered results feed it
        if self.filters.is_pristine() || self.featured_brands.is_empty() {
            self.featured_brands =
                catalog::featured_brands(products, self.ui.featured_brand_limit);
            self.slideshow.resize(self.featured_brands.len());
        }

        let rows = self.filter_rows().len();
        if self.filter_cursor >= rows {
            self.filter_cursor = rows.saturating_sub(1);
        }
    }

    pub fn products(&self) -> &[Product] {
        self.orchestrator.products()
    }

    pub fn is_loading(&self) -> bool {
        self.orchestrator.results().busy()
    }

    pub fn search_error(&self) -> Option<&str> {
        self.orchestrator.results().last_error()
    }

    // --- result navigation -----------------------------------------------

    fn current_list(&self) -> (&[Product], &ListState) {
        match self.view {
            View::Favorites => (self.favorites.items(), &self.favorites_state),
            _ => (self.orchestrator.products(), &self.list_state),
        }
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let (items, state) = self.current_list();
        state.selected().and_then(|i| items.get(i))
    }

    pub fn next_result(&mut self) {
        let len = self.current_list().0.len();
        let state = self.current_state_mut();
        if len > 0 {
            let next = state.selected().map_or(0, |i| (i + 1).min(len - 1));
            state.select(Some(next));
        }
    }

    pub fn previous_result(&mut self) {
        let state = self.current_state_mut();
        let prev = state.selected().map_or(0, |i| i.saturating_sub(1));
        state.select(Some(prev));
    }

    fn current_state_mut(&mut self) -> &mut ListState {
        match self.view {
            View::Favorites => &mut self.favorites_state,
            _ => &mut self.list_state,
        }
    }

    fn clamp_favorites_selection(&mut self) {
        let len = self.favorites.len();
        let selected = self.favorites_state.selected().unwrap_or(0);
        self.favorites_state
            .select(Some(selected.min(len.saturating_sub(1))));
    }

    // --- wishlist ------------------------------------------------------------

    pub fn is_favorite(&self, product: &Product) -> bool {
        self.favorites.is_favorite(product)
    }

    /// Add/remove the highlighted product from the wishlist
    pub fn toggle_favorite_selected(&mut self) {
        let Some(product) = self.selected_product().cloned() else {
            return;
        };

        match self.favorites.toggle(&product) {
            Ok(true) => {
                self.status_message = Some(format!("Added {} to wishlist", product.name_label()))
            }
            Ok(false) => {
                self.status_message =
                    Some(format!("Removed {} from wishlist", product.name_label()))
            }
            Err(e) => {
                warn!("Failed to save wishlist: {}", e);
                self.status_message = Some(format!("Failed to save wishlist: {}", e));
            }
        }

        if self.view == View::Favorites {
            self.clamp_favorites_selection();
        }
    }

    /// URL of the highlighted product, for opening in a browser
    pub fn selected_url(&self) -> Option<String> {
        self.selected_product()
            .and_then(|p| p.url())
            .map(str::to_string)
    }

    pub fn selected_image_url(&self) -> Option<String> {
        self.selected_product()
            .and_then(|p| p.image())
            .map(str::to_string)
    }

    // --- filter sidebar --------------------------------------------------

    pub fn visible_brand_options(&self) -> &[String] {
        let n = self.brand_options.len().min(self.ui.max_brand_options);
        &self.brand_options[..n]
    }

    pub fn visible_category_options(&self) -> &[String] {
        let n = self.category_options.len().min(self.ui.max_category_options);
        &self.category_options[..n]
    }

    /// Brands beyond the visible cap
    pub fn hidden_brand_count(&self) -> usize {
        self.brand_options.len().saturating_sub(self.ui.max_brand_options)
    }

    pub fn filter_rows(&self) -> Vec<FilterRow> {
        let mut rows = vec![FilterRow::MinPrice, FilterRow::MaxPrice];
        rows.extend(self.visible_brand_options().iter().cloned().map(FilterRow::Brand));
        rows.extend(
            self.visible_category_options()
                .iter()
                .cloned()
                .map(FilterRow::Category),
        );
        rows
    }

    pub fn current_filter_row(&self) -> Option<FilterRow> {
        self.filter_rows().into_iter().nth(self.filter_cursor)
    }

    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
        self.input_mode = if self.show_filters {
            InputMode::Filtering
        } else {
            InputMode::Normal
        };
    }

    pub fn enter_filter_mode(&mut self) {
        self.show_filters = true;
        self.input_mode = InputMode::Filtering;
    }

    pub fn next_filter(&mut self) {
        let last = self.filter_rows().len().saturating_sub(1);
        self.filter_cursor = (self.filter_cursor + 1).min(last);
    }

    pub fn previous_filter(&mut self) {
        self.filter_cursor = self.filter_cursor.saturating_sub(1);
    }

    /// Enter/Space on a sidebar row: edit a bound or flip a checkbox
    pub fn activate_filter(&mut self) {
        match self.current_filter_row() {
            Some(FilterRow::MinPrice) => self.start_bound_edit(self.filters.min_price),
            Some(FilterRow::MaxPrice) => self.start_bound_edit(self.filters.max_price),
            Some(FilterRow::Brand(brand)) => {
                self.filters.toggle_brand(&brand);
                self.schedule_search();
            }
            Some(FilterRow::Category(category)) => {
                if self.filters.category.as_deref() == Some(category.as_str()) {
                    self.filters.set_category(None);
                } else {
                    self.filters.set_category(Some(category));
                }
                self.schedule_search();
            }
            None => {}
        }
    }

    fn start_bound_edit(&mut self, current: Option<f64>) {
        self.filter_edit_buffer = current.map(|v| v.to_string()).unwrap_or_default();
        self.input_mode = InputMode::EditingFilter;
    }

    pub fn save_filter_edit(&mut self) {
        let bound = parse_bound(&self.filter_edit_buffer);
        match self.current_filter_row() {
            Some(FilterRow::MinPrice) => self.filters.min_price = bound,
            Some(FilterRow::MaxPrice) => self.filters.max_price = bound,
            _ => {}
        }
        self.filter_edit_buffer.clear();
        self.input_mode = InputMode::Filtering;
        self.schedule_search();
    }

    pub fn cancel_filter_edit(&mut self) {
        self.filter_edit_buffer.clear();
        self.input_mode = InputMode::Filtering;
    }

    pub fn clear_current_filter(&mut self) {
        match self.current_filter_row() {
            Some(FilterRow::MinPrice) => self.filters.min_price = None,
            Some(FilterRow::MaxPrice) => self.filters.max_price = None,
            Some(FilterRow::Brand(brand)) if self.filters.is_brand_selected(&brand) => {
                self.filters.toggle_brand(&brand);
            }
            Some(FilterRow::Category(_)) => self.filters.set_category(None),
            _ => return,
        }
        self.schedule_search();
    }

    /// "Clear All": filters go, search text stays
    pub fn clear_filters(&mut self) {
        self.filters.clear_filters();
        self.schedule_search();
    }

    // --- rotating elements -----------------------------------------------

    pub fn wants_landing_rotation(&self) -> bool {
        self.view == View::Landing
    }

    /// Brand slideshow only shows on an untouched home screen
    pub fn wants_slideshow(&self) -> bool {
        self.view == View::Home && self.filters.is_pristine() && !self.featured_brands.is_empty()
    }

    pub fn landing_period(&self) -> Duration {
        Duration::from_millis(self.ui.landing_interval_ms)
    }

    pub fn slideshow_period(&self) -> Duration {
        Duration::from_millis(self.ui.slideshow_interval_ms)
    }

    pub fn on_landing_tick(&mut self) {
        self.landing.advance();
    }

    pub fn on_slideshow_tick(&mut self) {
        self.slideshow.advance();
    }

    pub fn landing_slide(&self) -> &str {
        LANDING_SLIDES[self.landing.current() % LANDING_SLIDES.len()]
    }

    pub fn featured_brand(&self) -> Option<&str> {
        self.featured_brands
            .get(self.slideshow.current())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linccora_api::{CatalogClient, RawPrice};
    use linccora_cache::MemoryStore;
    use std::sync::Arc;

    fn product(brand: &str, category: &str, url: &str) -> Product {
        Product {
            brand: Some(brand.to_string()),
            category: Some(category.to_string()),
            product_name: Some(format!("{} piece", brand)),
            product_url: Some(url.to_string()),
            price: Some(RawPrice::Text("Tk 1,000".into())),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Yellow", "Panjabi", "u1"),
            product("Aarong", "Saree", "u2"),
            product("Kay Kraft", "Saree", "u3"),
        ]
    }

    fn test_app(debounce_ms: u64) -> App {
        // Never contacted: tests feed outcomes in by hand
        let client = CatalogClient::new("http://127.0.0.1:9").unwrap();
        let orchestrator = SearchOrchestrator::new(Arc::new(client));
        let favorites = FavoritesStore::open(Box::new(MemoryStore::new()));
        let ui = UiConfig {
            search_debounce_ms: debounce_ms,
            ..UiConfig::default()
        };
        App::new(orchestrator, favorites, ui)
    }

    /// Dispatch whatever is due and answer it with `products`
    fn answer(app: &mut App, products: Vec<Product>) -> Applied {
        let pending = app
            .take_due_search(Instant::now() + Duration::from_secs(5))
            .expect("a search should be due");
        app.apply_search(SearchOutcome {
            token: pending.token,
            result: Ok(products),
        })
    }

    #[test]
    fn test_initial_catalog_load_is_due_immediately() {
        let mut app = test_app(250);
        assert_eq!(app.view, View::Landing);
        assert!(app.take_due_search(Instant::now()).is_some());
        assert!(app.is_loading());
        assert!(app.take_due_search(Instant::now()).is_none());
    }

    #[test]
    fn test_results_populate_sidebar_and_slideshow() {
        let mut app = test_app(0);
        assert_eq!(answer(&mut app, catalog()), Applied::Published(3));

        assert_eq!(app.brand_options, ["Aarong", "Kay Kraft", "Yellow"]);
        assert_eq!(app.category_options, ["Panjabi", "Saree"]);
        assert_eq!(app.featured_brands, ["Yellow", "Aarong", "Kay Kraft"]);

        app.enter_shop();
        assert!(app.wants_slideshow());
        assert_eq!(app.featured_brand(), Some("Yellow"));
        app.on_slideshow_tick();
        assert_eq!(app.featured_brand(), Some("Aarong"));
    }

    #[test]
    fn test_typing_is_debounced() {
        let mut app = test_app(250);
        answer(&mut app, catalog());

        app.enter_shop();
        app.enter_search_mode();
        app.push_search_char('s');
        app.push_search_char('i');

        assert!(app.take_due_search(Instant::now()).is_none());
        let pending = app
            .take_due_search(Instant::now() + Duration::from_millis(300))
            .unwrap();
        assert_eq!(pending.params.q.as_deref(), Some("si"));
    }

    #[test]
    fn test_brand_rows_toggle_selection() {
        let mut app = test_app(0);
        answer(&mut app, catalog());
        app.enter_shop();
        app.enter_filter_mode();

        // Rows: min, max, Aarong, Kay Kraft, Yellow, Panjabi, Saree
        app.next_filter();
        app.next_filter();
        assert_eq!(app.current_filter_row(), Some(FilterRow::Brand("Aarong".into())));
        app.activate_filter();
        app.next_filter();
        app.activate_filter();

        assert_eq!(app.filters.selected_brands(), ["Aarong", "Kay Kraft"]);
        assert!(!app.wants_slideshow());

        let pending = app.take_due_search(Instant::now() + Duration::from_millis(1)).unwrap();
        assert_eq!(pending.params.brand, None);
        assert_eq!(pending.selected_brands, ["Aarong", "Kay Kraft"]);
    }

    #[test]
    fn test_price_bound_editing() {
        let mut app = test_app(0);
        app.enter_filter_mode();
        app.activate_filter();
        assert_eq!(app.input_mode, InputMode::EditingFilter);

        app.filter_edit_buffer.push_str("1500");
        app.save_filter_edit();
        assert_eq!(app.filters.min_price, Some(1500.0));
        assert_eq!(app.input_mode, InputMode::Filtering);

        app.activate_filter();
        app.filter_edit_buffer = "junk".into();
        app.save_filter_edit();
        assert_eq!(app.filters.min_price, None);
    }

    #[test]
    fn test_category_row_toggles() {
        let mut app = test_app(0);
        answer(&mut app, catalog());
        app.enter_filter_mode();
        app.filter_cursor = app.filter_rows().len() - 1;

        app.activate_filter();
        assert_eq!(app.filters.category.as_deref(), Some("Saree"));
        app.activate_filter();
        assert_eq!(app.filters.category, None);
    }

    #[test]
    fn test_clear_filters_keeps_query() {
        let mut app = test_app(0);
        app.filters.set_query("saree");
        app.filters.select_brands(["Aarong"]);
        app.filters.min_price = Some(10.0);

        app.clear_filters();
        assert!(!app.filters.has_active_filters());
        assert_eq!(app.filters.query, "saree");
        assert!(app.search_deadline().is_some());
    }

    #[test]
    fn test_favorite_toggle_from_home_and_wishlist() {
        let mut app = test_app(0);
        answer(&mut app, catalog());
        app.enter_shop();

        app.next_result();
        app.toggle_favorite_selected();
        assert_eq!(app.favorites.len(), 1);
        assert!(app.is_favorite(&catalog()[1]));

        app.show_favorites();
        assert_eq!(app.selected_url().as_deref(), Some("u2"));
        app.toggle_favorite_selected();
        assert!(app.favorites.is_empty());
        assert!(app.selected_product().is_none());
    }

    #[test]
    fn test_second_brand_selectable_after_narrowed_results() {
        let mut app = test_app(0);
        answer(&mut app, catalog());
        app.enter_shop();
        app.enter_filter_mode();

        // Tick Aarong; the backend answers with Aarong only
        app.filter_cursor = 2;
        app.activate_filter();
        let pending = app.take_due_search(Instant::now() + Duration::from_millis(1)).unwrap();
        assert_eq!(pending.params.brand.as_deref(), Some("Aarong"));
        app.apply_search(SearchOutcome {
            token: pending.token,
            result: Ok(vec![product("Aarong", "Saree", "u2")]),
        });

        assert_eq!(app.brand_options, ["Aarong", "Kay Kraft", "Yellow"]);
        assert_eq!(app.category_options, ["Panjabi", "Saree"]);
        assert_eq!(app.featured_brands, ["Yellow", "Aarong", "Kay Kraft"]);

        // Yellow is still on the sidebar and ticking it goes multi-brand
        app.filter_cursor = 4;
        assert_eq!(app.current_filter_row(), Some(FilterRow::Brand("Yellow".into())));
        app.activate_filter();
        assert_eq!(app.filters.selected_brands(), ["Aarong", "Yellow"]);

        let pending = app.take_due_search(Instant::now() + Duration::from_millis(1)).unwrap();
        assert_eq!(pending.params.brand, None);
        assert_eq!(pending.selected_brands, ["Aarong", "Yellow"]);
    }

    #[test]
    fn test_selected_image_url() {
        let mut app = test_app(0);
        let mut with_image = product("Aarong", "Saree", "u2");
        with_image.product_image = Some("https://cdn.example.com/saree.jpg".into());
        let mut blank_image = product("Yellow", "Panjabi", "u1");
        blank_image.product_image = Some(String::new());
        answer(&mut app, vec![with_image, blank_image]);
        app.enter_shop();

        assert_eq!(
            app.selected_image_url().as_deref(),
            Some("https://cdn.example.com/saree.jpg")
        );
        app.next_result();
        assert_eq!(app.selected_image_url(), None);
    }

    #[test]
    fn test_failed_search_keeps_previous_options() {
        let mut app = test_app(0);
        answer(&mut app, catalog());

        app.submit_search();
        let pending = app.take_due_search(Instant::now()).unwrap();
        let applied = app.apply_search(SearchOutcome {
            token: pending.token,
            result: Err("connection refused".into()),
        });

        assert_eq!(applied, Applied::Failed);
        assert!(app.products().is_empty());
        assert_eq!(app.search_error(), Some("connection refused"));
        assert_eq!(app.brand_options.len(), 3);
    }

    #[test]
    fn test_timers_follow_view() {
        let mut app = test_app(0);
        answer(&mut app, catalog());
        assert!(app.wants_landing_rotation());
        assert!(!app.wants_slideshow());

        app.enter_shop();
        assert!(!app.wants_landing_rotation());
        assert!(app.wants_slideshow());

        app.show_favorites();
        assert!(!app.wants_slideshow());

        let first = app.landing_slide().to_string();
        app.on_landing_tick();
        assert_ne!(app.landing_slide(), first);
    }
}
