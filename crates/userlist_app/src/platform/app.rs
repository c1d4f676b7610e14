use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use userlist_engine::{
    FetchService, ListController, ListObserver, TransportSettings, UserRepository,
};
use userlist_logging::{ul_info, ul_warn, LogDestination};

use super::input::{parse_command, Command};
use super::render::{render_detail, render_list};

/// How long the front-end blocks on one fetch before giving the prompt back.
const FETCH_WAIT: Duration = Duration::from_secs(60);

const HELP: &str = "Commands: r = refresh, <n> = show user n, q = quit";

pub fn run_app() -> anyhow::Result<()> {
    userlist_logging::initialize(LogDestination::File, LevelFilter::Info);

    let settings = TransportSettings::default();
    let service = FetchService::from_settings(&settings).context("failed to build HTTP client")?;
    ul_info!("Starting userlist against {}", service.endpoint());

    let mut controller = ListController::new(Arc::new(UserRepository::new(service)));
    controller.subscribe(StatusLogger);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    controller.fetch();
    refresh(&mut controller, &mut out)?;
    writeln!(out, "{HELP}")?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        match parse_command(&line) {
            Command::Refresh => {
                controller.fetch();
                refresh(&mut controller, &mut out)?;
            }
            Command::Open(row) => match controller.detail(row - 1) {
                Some(detail) => write_lines(&mut out, &render_detail(&detail))?,
                None => writeln!(out, "No user at row {row}")?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown => writeln!(out, "Unknown command. {HELP}")?,
        }
    }

    ul_info!("Input closed; exiting");
    Ok(())
}

/// Renders the loading state, waits for the fetch, then renders the result.
fn refresh(controller: &mut ListController, out: &mut impl Write) -> io::Result<()> {
    if controller.consume_dirty() {
        write_lines(out, &render_list(&controller.view()))?;
    }
    if !controller.wait_for_idle(FETCH_WAIT) {
        ul_warn!("Fetch still running after {:?}", FETCH_WAIT);
    }
    if controller.consume_dirty() {
        write_lines(out, &render_list(&controller.view()))?;
    }
    Ok(())
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

struct StatusLogger;

impl ListObserver for StatusLogger {
    fn on_users_updated(&mut self) {
        ul_info!("User list updated");
    }

    fn on_loading_state_changed(&mut self, is_loading: bool) {
        ul_info!("Loading: {}", is_loading);
    }

    fn on_error(&mut self, message: &str) {
        ul_warn!("Showing error to user: {}", message);
    }
}
