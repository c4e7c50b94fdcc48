// UI rendering logic
use crate::{App, FilterRow, InputMode, View};
use linccora_core::price::{display_price, format_bound, CURRENCY_SYMBOL};
use linccora_core::Product;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const GOLD: Color = Color::Rgb(212, 175, 55);

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    match app.view {
        View::Landing => render_landing(frame, app, area),
        View::Home => render_home(frame, app),
        View::Favorites => render_favorites(frame, app),
    }
}

fn render_landing(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(""); (area.height / 3) as usize];
    lines.push(Line::from(Span::styled(
        "L I N C C O R A",
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.landing_slide(),
        Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));

    // Slide indicator dots
    let dots: Vec<Span> = (0..app.landing.len())
        .map(|i| {
            if i == app.landing.current() {
                Span::styled("● ", Style::default().fg(GOLD))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    lines.push(Line::from(dots));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "ENTER: shop now | q: quit",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(GOLD)));
    frame.render_widget(paragraph, area);
}

fn render_home(frame: &mut Frame, app: &mut App) {
    let show_banner = app.wants_slideshow();

    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Search input
    ];
    if show_banner {
        constraints.push(Constraint::Length(3)); // Brand slideshow
    }
    constraints.push(Constraint::Min(5)); // Products (and sidebar)
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1]);

    let (content_area, status_area) = if show_banner {
        render_slideshow(frame, app, chunks[2]);
        (chunks[3], chunks[4])
    } else {
        (chunks[2], chunks[3])
    };

    if app.show_filters {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(content_area);
        render_filters_panel(frame, app, content_chunks[0]);
        render_product_list(frame, app, content_chunks[1]);
    } else {
        render_product_list(frame, app, content_area);
    }

    render_status_bar(frame, app, status_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("LINCCORA", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::styled("  luxury fashion", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(logo, header_chunks[0]);

    let (home_style, wish_style) = match app.view {
        View::Favorites => (Style::default(), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        _ => (Style::default().fg(GOLD).add_modifier(Modifier::BOLD), Style::default()),
    };
    let nav = Paragraph::new(Line::from(vec![
        Span::styled("Home", home_style),
        Span::raw("  "),
        Span::styled(format!("♥ Wishlist ({})", app.favorites.len()), wish_style),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(nav, header_chunks[1]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal | InputMode::Filtering | InputMode::EditingFilter => Style::default(),
    };

    let input = Paragraph::new(app.filters.query.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search products or brands (/ to search)")
                .border_style(input_style),
        );

    frame.render_widget(input, area);

    // Show cursor when in search mode
    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((search_cursor_x(area, &app.filters.query), area.y + 1));
    }
}

/// Column after the typed text, pinned inside the box's right border
fn search_cursor_x(area: Rect, query: &str) -> u16 {
    let typed = u16::try_from(query.chars().count()).unwrap_or(u16::MAX);
    let last = area.right().saturating_sub(2);
    area.x.saturating_add(1).saturating_add(typed).min(last)
}

fn render_slideshow(frame: &mut Frame, app: &App, area: Rect) {
    let brand = app.featured_brand().unwrap_or_default();
    let line = Line::from(vec![
        Span::styled("Featured  ", Style::default().fg(Color::DarkGray)),
        Span::styled(brand.to_string(), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   {}/{}", app.slideshow.current() + 1, app.slideshow.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let banner = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(GOLD)));
    frame.render_widget(banner, area);
}

fn render_filters_panel(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Filtering || app.input_mode == InputMode::EditingFilter;
    let is_editing = app.input_mode == InputMode::EditingFilter;

    let border_style = if is_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let cursor = app.filter_cursor;
    let filters = &app.filters;

    let label_style = |idx: usize| {
        if is_active && cursor == idx {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let bound_text = |idx: usize, value: Option<f64>| -> String {
        if is_editing && cursor == idx {
            format!("{}█", app.filter_edit_buffer) // Show cursor
        } else {
            value.map(format_bound).unwrap_or_else(|| "<none>".to_string())
        }
    };

    let mut lines = vec![Line::from(Span::styled(
        "Price Range",
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    ))];
    let mut seen_brand = false;
    let mut seen_category = false;

    for (idx, row) in app.filter_rows().into_iter().enumerate() {
        match row {
            FilterRow::MinPrice => lines.push(Line::from(vec![
                Span::styled(format!("Min {}: ", CURRENCY_SYMBOL), Style::default().fg(Color::Gray)),
                Span::styled(bound_text(idx, filters.min_price), label_style(idx)),
            ])),
            FilterRow::MaxPrice => lines.push(Line::from(vec![
                Span::styled(format!("Max {}: ", CURRENCY_SYMBOL), Style::default().fg(Color::Gray)),
                Span::styled(bound_text(idx, filters.max_price), label_style(idx)),
            ])),
            FilterRow::Brand(brand) => {
                if !seen_brand {
                    seen_brand = true;
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Brands",
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    )));
                }
                let mark = if filters.is_brand_selected(&brand) { "[x]" } else { "[ ]" };
                lines.push(Line::from(Span::styled(format!("{} {}", mark, brand), label_style(idx))));
            }
            FilterRow::Category(category) => {
                if !seen_category {
                    seen_category = true;
                    if app.hidden_brand_count() > 0 {
                        lines.push(Line::from(Span::styled(
                            format!("    +{} more", app.hidden_brand_count()),
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Categories",
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    )));
                }
                let mark = if filters.category.as_deref() == Some(category.as_str()) {
                    "(•)"
                } else {
                    "( )"
                };
                lines.push(Line::from(Span::styled(format!("{} {}", mark, category), label_style(idx))));
            }
        }
    }
    if !seen_category && app.hidden_brand_count() > 0 {
        lines.push(Line::from(Span::styled(
            format!("    +{} more", app.hidden_brand_count()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = if filters.has_active_filters() {
        " Filters (c: clear all) "
    } else {
        " Filters "
    };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    frame.render_widget(panel, area);
}

fn product_item(product: &Product, favorite: bool) -> ListItem<'static> {
    let heart = if favorite {
        Span::styled("♥ ", Style::default().fg(Color::Red))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::DarkGray))
    };

    let mut title = vec![
        heart,
        Span::styled(
            product.name_label().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(category) = product.category() {
        title.push(Span::styled(format!("  [{}]", category), Style::default().fg(Color::DarkGray)));
    }

    let details = Line::from(vec![
        Span::raw("  "),
        Span::styled(product.brand_label().to_string(), Style::default().fg(GOLD)),
        Span::raw("  "),
        Span::styled(display_price(product.price.as_ref()), Style::default().fg(Color::Green)),
    ]);

    let mut lines = vec![Line::from(title), details];
    if let Some(image) = product.image() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("img {}", image), Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn render_product_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.products().is_empty() {
        render_empty_results(frame, app, area);
        return;
    }

    let items: Vec<ListItem> = app
        .products()
        .iter()
        .map(|p| product_item(p, app.is_favorite(p)))
        .collect();

    let title = if app.is_loading() {
        format!(" Products ({}) updating... ", items.len())
    } else {
        format!(" Products ({}) ", items.len())
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_empty_results(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if app.is_loading() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Loading products...",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
        ]
    } else if let Some(error) = app.search_error() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Could not reach the catalog",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(error.to_string(), Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from("Press r to retry"),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "No products found",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try adjusting your search criteria or filters",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Products "));
    frame.render_widget(paragraph, area);
}

fn render_favorites(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Saved items
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let count = app.favorites.len();
    let title = format!(
        " Wishlist: {} saved item{} ",
        count,
        if count == 1 { "" } else { "s" }
    );

    if app.favorites.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Your wishlist is empty",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press w on a product to save it here",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .favorites
            .items()
            .iter()
            .map(|p| product_item(p, true))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut app.favorites_state);
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(message) = &app.status_message {
        Span::styled(message.clone(), Style::default().fg(GOLD))
    } else {
        match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH MODE | ESC: normal mode | ENTER: search now",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Filtering => Span::styled(
                "FILTER MODE | TAB/j/k: navigate | ENTER/SPACE: toggle or edit | d: clear | c: clear all | ESC: close",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::EditingFilter => Span::styled(
                "EDITING | Type amount | ENTER: save | ESC: cancel",
                Style::default().fg(Color::Green),
            ),
            InputMode::Normal => match app.view {
                View::Favorites => Span::raw("j/k: navigate | w: remove | o: open | i: image | v: home | q: quit"),
                _ => Span::raw(
                    "j/k: navigate | /: search | f: filters | w: wishlist | o: open | i: image | v: wishlist view | r: refresh | q: quit",
                ),
            },
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_cursor_follows_text() {
        let area = Rect::new(0, 0, 20, 3);
        assert_eq!(search_cursor_x(area, ""), 1);
        assert_eq!(search_cursor_x(area, "saree"), 6);
        assert_eq!(search_cursor_x(area, "শাড়ি"), 1 + "শাড়ি".chars().count() as u16);
    }

    #[test]
    fn test_search_cursor_stays_inside_box() {
        let area = Rect::new(5, 0, 10, 3);
        assert_eq!(search_cursor_x(area, &"x".repeat(100)), 13);

        let huge = "x".repeat(usize::from(u16::MAX) + 10);
        assert_eq!(search_cursor_x(Rect::new(0, 0, 80, 3), &huge), 78);
    }
}
