use crate::notify::Notifier;
use crate::ops::ticker::Ticker;
use crate::ops::timer::TimerMode;
use crate::pomodoro::models::{Action, App, Effect, InputMode};
use crate::pomodoro::ui::render::draw_ui;
use ratatui::{
    Terminal,
    backend::Backend,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop blocks, so expired toasts disappear
/// even while the timer is paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Ctrl and Alt chords are commands, never text.
fn is_plain_char(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Translates a key press into an action for the current input mode.
pub fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(' ') if app.timer.is_running() => Some(Action::Pause),
            KeyCode::Char(' ') => Some(Action::Start),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('1') => Some(Action::SetMode(TimerMode::Pomodoro)),
            KeyCode::Char('2') => Some(Action::SetMode(TimerMode::ShortBreak)),
            KeyCode::Char('3') => Some(Action::SetMode(TimerMode::LongBreak)),
            KeyCode::Char('a') => Some(Action::OpenAddTask),
            KeyCode::Char('n') => Some(Action::OpenEditName),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char('x') | KeyCode::Enter => app.selected_task.map(Action::ToggleComplete),
            KeyCode::Char('d') => app.selected_task.map(Action::DeleteTask),
            KeyCode::Char('t') => Some(Action::ToggleDarkMode),
            _ => None,
        },
        InputMode::AddingTask => match key.code {
            KeyCode::Enter => Some(Action::SubmitTask),
            KeyCode::Esc => Some(Action::CloseInput),
            KeyCode::Tab => Some(Action::CycleImportance),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) if is_plain_char(&key) => Some(Action::InputChar(c)),
            _ => None,
        },
        InputMode::EditingName => match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Action::CloseInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) if is_plain_char(&key) => Some(Action::InputChar(c)),
            _ => None,
        },
    }
}

/// Owns the tick schedule and the notification sink, and carries out the
/// effects `App::apply` asks for.
pub struct Runtime {
    pub ticker: Ticker,
    notifier: Box<dyn Notifier>,
    toast_ttl: Duration,
}

impl Runtime {
    pub fn new(notifier: Box<dyn Notifier>, toast_ttl: Duration) -> Self {
        Runtime {
            ticker: Ticker::default(),
            notifier,
            toast_ttl,
        }
    }

    /// Applies `action` and its effects. Returns true when the app should quit.
    pub fn dispatch(&mut self, app: &mut App, action: Action, now: Instant) -> bool {
        let mut quit = false;
        for effect in app.apply(action) {
            match effect {
                Effect::ArmTicker => {
                    self.ticker.arm(now);
                }
                Effect::DisarmTicker => {
                    self.ticker.disarm();
                }
                Effect::Notify { summary, body } => {
                    app.show_toast(&body, now, self.toast_ttl);
                    self.notifier.notify(&summary, &body);
                }
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    /// Delivers every tick that came due by `now`.
    pub fn fire_ticks(&mut self, app: &mut App, now: Instant) {
        for _ in 0..self.ticker.fire(now) {
            self.dispatch(app, Action::Tick, now);
        }
    }
}

/// Runs the main event loop for the application.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut runtime: Runtime,
) -> io::Result<()> {
    loop {
        app.prune_toast(Instant::now());
        terminal.draw(|f| draw_ui(f, &app))?;

        let timeout = runtime.ticker.timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = map_key(&app, key) {
                        if runtime.dispatch(&mut app, action, Instant::now()) {
                            tracing::info!(completed = app.completed_count, "quitting");
                            return Ok(());
                        }
                    }
                }
            }
        }

        runtime.fire_ticks(&mut app, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::tasks::Importance;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, summary: &str, body: &str) {
            self.sent
                .borrow_mut()
                .push((summary.to_string(), body.to_string()));
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_runtime() -> (Runtime, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let runtime = Runtime::new(Box::new(notifier.clone()), Duration::from_secs(3));
        (runtime, notifier)
    }

    #[test]
    fn test_normal_mode_keys() {
        let app = App::new("", true);
        assert_eq!(map_key(&app, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(&app, press(KeyCode::Char(' '))), Some(Action::Start));
        assert_eq!(
            map_key(&app, press(KeyCode::Char('3'))),
            Some(Action::SetMode(TimerMode::LongBreak))
        );
        // Nothing selected, nothing to toggle or delete
        assert_eq!(map_key(&app, press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&app, press(KeyCode::Char('d'))), None);
        assert_eq!(
            map_key(
                &app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_typing_goes_to_the_open_popup() {
        let mut app = App::new("", true);
        app.input_mode = InputMode::AddingTask;
        assert_eq!(
            map_key(&app, press(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        );
        assert_eq!(
            map_key(&app, press(KeyCode::Tab)),
            Some(Action::CycleImportance)
        );

        app.input_mode = InputMode::EditingName;
        assert_eq!(map_key(&app, press(KeyCode::Enter)), Some(Action::CloseInput));
        assert_eq!(map_key(&app, press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = App::new("", true);
        for mode in [InputMode::AddingTask, InputMode::EditingName] {
            app.input_mode = mode;
            assert_eq!(
                map_key(&app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
                None
            );
            assert_eq!(
                map_key(&app, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)),
                None
            );
            assert_eq!(
                map_key(&app, KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)),
                Some(Action::InputChar('X'))
            );
        }
    }

    #[test]
    fn test_space_pauses_a_running_timer() {
        let mut app = App::new("", true);
        app.apply(Action::Start);
        assert_eq!(map_key(&app, press(KeyCode::Char(' '))), Some(Action::Pause));
    }

    #[test]
    fn test_keys_drive_a_task_through_its_life() {
        let mut app = App::new("", true);
        let (mut runtime, notifier) = create_runtime();
        let now = Instant::now();

        let keys = [
            KeyCode::Char('a'),
            KeyCode::Char('t'),
            KeyCode::Char('e'),
            KeyCode::Char('a'),
            KeyCode::Tab,
            KeyCode::Enter,
            KeyCode::Char('x'),
        ];
        for code in keys {
            let action = map_key(&app, press(code)).unwrap();
            assert!(!runtime.dispatch(&mut app, action, now));
        }

        let task = app.tasks.get(0).unwrap();
        assert_eq!(task.text, "tea");
        assert_eq!(task.importance, Importance::Medium);
        assert!(task.completed);
        assert_eq!(app.completed_count, 1);
        assert_eq!(app.toast.as_ref().unwrap().message, "Task completed! 😊");
        assert_eq!(notifier.sent.borrow().len(), 1);

        let action = map_key(&app, press(KeyCode::Char('d'))).unwrap();
        runtime.dispatch(&mut app, action, now);
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_ticker_follows_running_flag() {
        let mut app = App::new("", true);
        let (mut runtime, _) = create_runtime();
        let t0 = Instant::now();

        runtime.dispatch(&mut app, Action::Start, t0);
        assert!(runtime.ticker.is_armed());

        runtime.fire_ticks(&mut app, t0 + Duration::from_secs(3));
        assert_eq!(app.timer.remaining(), 1497);

        runtime.dispatch(&mut app, Action::Pause, t0 + Duration::from_secs(3));
        assert!(!runtime.ticker.is_armed());
        runtime.fire_ticks(&mut app, t0 + Duration::from_secs(10));
        assert_eq!(app.timer.remaining(), 1497);

        runtime.dispatch(&mut app, Action::Start, t0 + Duration::from_secs(10));
        runtime.dispatch(&mut app, Action::SetMode(TimerMode::LongBreak), t0 + Duration::from_secs(10));
        assert!(!runtime.ticker.is_armed());
    }

    #[test]
    fn test_completed_cycle_stops_ticking() {
        let mut app = App::new("", true);
        let (mut runtime, notifier) = create_runtime();
        let t0 = Instant::now();

        runtime.dispatch(&mut app, Action::SetMode(TimerMode::ShortBreak), t0);
        runtime.dispatch(&mut app, Action::Start, t0);

        // Loop stalled well past the end of the break
        runtime.fire_ticks(&mut app, t0 + Duration::from_secs(400));

        assert_eq!(app.timer.mode(), TimerMode::Pomodoro);
        assert_eq!(app.timer.remaining(), 1500);
        assert!(!app.timer.is_running());
        assert!(!runtime.ticker.is_armed());
        assert_eq!(app.completed_count, 1);
        assert_eq!(
            notifier.sent.borrow().as_slice(),
            &[(
                "Short Break finished".to_string(),
                "Up next: Pomodoro".to_string()
            )]
        );
    }

    #[test]
    fn test_quit() {
        let mut app = App::new("", true);
        let (mut runtime, _) = create_runtime();
        let now = Instant::now();
        runtime.dispatch(&mut app, Action::Start, now);
        assert!(runtime.dispatch(&mut app, Action::Quit, now));
        assert!(!runtime.ticker.is_armed());
    }
}
