use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::hero::HERO_HEIGHT;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{HeroBanner, ResponsePanel, StatusBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Widest the hero column grows on large terminals.
const MAX_CONTENT_WIDTH: u16 = 100;

pub fn panel_title(app: &App) -> String {
    format!("{}'s AI Assistant", app.hero.name)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let [column] = Layout::horizontal([Constraint::Max(MAX_CONTENT_WIDTH)])
        .flex(Flex::Center)
        .areas(main_area);

    if app.widget.panel_open() {
        let [hero_area, input_area, panel_area] = Layout::vertical([
            Constraint::Length(HERO_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(3),
        ])
        .areas(column);

        HeroBanner { hero: &app.hero }.render(frame, hero_area);
        tui.input_box.render(frame, input_area);
        ResponsePanel {
            phase: app.widget.phase(),
            title: panel_title(app),
            placeholder: &app.hero.placeholder,
            spinner_frame,
            state: &mut tui.panel,
        }
        .render(frame, panel_area);
    } else {
        // Idle: hero and input centered, no panel
        let [hero_area, input_area] = Layout::vertical([
            Constraint::Length(HERO_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(column);

        HeroBanner { hero: &app.hero }.render(frame, hero_area);
        tui.input_box.render(frame, input_area);
    }

    StatusBar::new(app.status_message.clone(), app.widget.panel_open()).render(frame, status_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::widget::FALLBACK_MESSAGE;
    use crate::service::{Answer, ServiceError, SourceRef};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new(&app.hero.placeholder);
        terminal
            .draw(|f| draw_ui(f, app, &mut tui, 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn submit(app: &mut App, text: &str) {
        update(app, Action::QueryChanged(text.to_string()));
        update(app, Action::Submit);
    }

    #[test]
    fn test_idle_shows_hero_and_placeholder_without_panel() {
        let app = test_app();
        let screen = render(&app);
        assert!(screen.contains("Test Person"));
        assert!(screen.contains("Ask me anything..."));
        assert!(!screen.contains(&panel_title(&app)));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_loading_shows_panel_with_spinner() {
        let mut app = test_app();
        submit(&mut app, "skills?");
        let screen = render(&app);
        assert!(screen.contains("Test Person's AI Assistant"));
        assert!(screen.contains("Thinking..."));
    }

    #[test]
    fn test_answer_shows_rendered_html_and_chips() {
        let mut app = test_app();
        submit(&mut app, "skills?");
        update(
            &mut app,
            Action::ResponseReady {
                seq: 1,
                result: Ok(Answer {
                    answer: "<p>React, <strong>TypeScript</strong></p>".to_string(),
                    sources: vec![SourceRef::new("skills")],
                    question: None,
                    source_count: Some(1),
                }),
            },
        );
        let screen = render(&app);
        assert!(screen.contains("React, TypeScript"));
        assert!(!screen.contains("<strong>"));
        assert!(screen.contains("Sources:"));
        assert!(screen.contains(" skills "));
        assert!(screen.contains("Answered from 1 source"));
    }

    #[test]
    fn test_error_shows_fallback_only() {
        let mut app = test_app();
        submit(&mut app, "What are your skills?");
        update(
            &mut app,
            Action::ResponseReady {
                seq: 1,
                result: Err(ServiceError::Api {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                }),
            },
        );
        let screen = render(&app);
        assert!(screen.contains(&FALLBACK_MESSAGE[..40]));
        assert!(!screen.contains("Internal Server Error"));
        assert!(!screen.contains("500"));
    }
}
