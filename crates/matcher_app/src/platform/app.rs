use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use matcher_core::{update, AppState, Msg, UploadFile};
use matcher_engine::Upload;
use matcher_logging::{matcher_debug, matcher_info, matcher_warn};

use super::cli::Args;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::report::save_report;
use super::ui::commands::{self, Command, HELP};
use super::ui::render::render;
use super::LoopEvent;

pub fn run_app() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::resolve(&args)?;
    matcher_logging::initialize(config.log_destination, config.log_level, &config.log_file);
    matcher_info!(
        "Starting resume-matcher backend={} timeout={:?}",
        config.backend.base_url,
        config.backend.request_timeout
    );

    let input: Box<dyn BufRead + Send> = match &config.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.backend.clone(), loop_tx.clone())?;
    spawn_reader(input, loop_tx);

    let mut app = App::new(runner);
    println!("Type `help` for commands.");
    app.print_view();

    while let Ok(event) = loop_rx.recv() {
        if app.handle_event(event) == Flow::Quit {
            break;
        }
    }
    matcher_info!("Exiting");
    Ok(())
}

fn spawn_reader(input: Box<dyn BufRead + Send>, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if loop_tx.send(LoopEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    matcher_warn!("Input read failed: {}", err);
                    break;
                }
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    state: AppState,
    runner: EffectRunner,
    /// Set by `wait`: input lines queue up until no request is in flight.
    waiting: bool,
    queued: VecDeque<String>,
    input_closed: bool,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            waiting: false,
            queued: VecDeque::new(),
            input_closed: false,
        }
    }

    fn handle_event(&mut self, event: LoopEvent) -> Flow {
        match event {
            LoopEvent::Line(line) => {
                if self.waiting {
                    self.queued.push_back(line);
                } else if self.handle_line(&line) == Flow::Quit {
                    return Flow::Quit;
                }
            }
            LoopEvent::Msg(msg) => {
                self.dispatch(msg);
                self.render_if_dirty();
            }
            LoopEvent::InputClosed => {
                matcher_debug!("Input closed");
                self.input_closed = true;
            }
        }

        if self.waiting && self.state.in_flight() == 0 {
            self.waiting = false;
        }
        while !self.waiting {
            let Some(line) = self.queued.pop_front() else {
                break;
            };
            if self.handle_line(&line) == Flow::Quit {
                return Flow::Quit;
            }
        }

        if self.input_closed && self.queued.is_empty() && self.state.in_flight() == 0 {
            return Flow::Quit;
        }
        Flow::Continue
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                println!("error: {err}");
                return Flow::Continue;
            }
        };
        matcher_debug!("Command {:?}", command);

        match &command {
            Command::JdFile(path) => {
                let msg = match read_upload(path) {
                    Ok(file) => Msg::JdFileSelected(Some(file)),
                    Err(message) => Msg::InputRejected(message),
                };
                self.dispatch(msg);
            }
            Command::Resume(path) => {
                let msg = match read_upload(path) {
                    Ok(file) => Msg::ResumeSelected(Some(file)),
                    Err(message) => Msg::InputRejected(message),
                };
                self.dispatch(msg);
            }
            Command::Save(path) => match save_report(path, &self.state.view()) {
                Ok(written) => println!("Report saved to {}", written.display()),
                Err(err) => println!("error: {err:#}"),
            },
            Command::Show => self.print_view(),
            Command::Wait => {
                self.waiting = self.state.in_flight() > 0;
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
            _ => match command.to_msgs(&self.state.view()) {
                Ok(msgs) => {
                    for msg in msgs {
                        self.dispatch(msg);
                    }
                }
                Err(err) => println!("error: {err}"),
            },
        }
        self.render_if_dirty();
        Flow::Continue
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for failed in self.runner.enqueue(effects) {
            self.dispatch(failed);
        }
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.print_view();
        }
    }

    fn print_view(&self) {
        for line in render(&self.state.view()) {
            println!("{line}");
        }
    }
}

fn read_upload(path: &Path) -> Result<UploadFile, String> {
    match Upload::from_path(path) {
        Ok(upload) => Ok(UploadFile {
            file_name: upload.file_name,
            bytes: upload.bytes,
        }),
        Err(err) => {
            matcher_warn!("Rejected input file: {}", err);
            Err(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcher_core::RequestKind;
    use matcher_engine::BackendSettings;
    use pretty_assertions::assert_eq;

    // Nothing listens on the discard port; tests never let requests complete.
    fn app() -> (App, mpsc::Receiver<LoopEvent>) {
        let (loop_tx, loop_rx) = mpsc::channel();
        let settings = BackendSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            ..BackendSettings::default()
        };
        let runner = EffectRunner::new(settings, loop_tx).unwrap();
        (App::new(runner), loop_rx)
    }

    fn line(app: &mut App, text: &str) -> Flow {
        app.handle_event(LoopEvent::Line(text.to_string()))
    }

    #[test]
    fn editing_commands_update_canonical_groups() {
        let (mut app, _events) = app();

        line(&mut app, "add-group");
        line(&mut app, "add 1 java");
        line(&mut app, "add 1 spring");
        line(&mut app, "add-group");
        line(&mut app, "add 2 sql");
        line(&mut app, "move 1 2 2 1");
        line(&mut app, "edit 1 1  kotlin ");

        assert_eq!(
            app.state.canonical(),
            &vec![
                vec!["kotlin".to_string()],
                vec!["spring".to_string(), "sql".to_string()],
            ]
        );
    }

    #[test]
    fn bad_lines_leave_state_alone() {
        let (mut app, _events) = app();

        assert_eq!(line(&mut app, "rm 1 1"), Flow::Continue);
        assert_eq!(line(&mut app, "frobnicate"), Flow::Continue);
        assert_eq!(line(&mut app, "jd-file /definitely/not/here.pdf"), Flow::Continue);

        let view = app.state.view();
        assert!(view.groups.is_empty());
        assert!(view.busy.is_empty());
        assert!(view.error.is_some());
    }

    #[test]
    fn wait_holds_lines_until_requests_finish() {
        let (mut app, _events) = app();

        line(&mut app, "jd-text Senior Java developer");
        assert_eq!(app.state.in_flight(), 1);
        line(&mut app, "wait");
        line(&mut app, "add-group");
        assert_eq!(app.queued.len(), 1);
        assert!(app.state.view().groups.is_empty());

        app.handle_event(LoopEvent::Msg(Msg::RequestFailed {
            request_id: 1,
            kind: RequestKind::ExtractJd,
            message: "timeout".to_string(),
        }));

        assert!(!app.waiting);
        assert!(app.queued.is_empty());
        assert_eq!(app.state.view().groups.len(), 1);
    }

    #[test]
    fn end_of_input_waits_for_in_flight_requests() {
        let (mut app, _events) = app();

        line(&mut app, "jd-text Senior Java developer");
        assert_eq!(app.handle_event(LoopEvent::InputClosed), Flow::Continue);

        let flow = app.handle_event(LoopEvent::Msg(Msg::RequestFailed {
            request_id: 1,
            kind: RequestKind::ExtractJd,
            message: "timeout".to_string(),
        }));
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn quit_stops_immediately() {
        let (mut app, _events) = app();
        assert_eq!(line(&mut app, "quit"), Flow::Quit);
    }
}
