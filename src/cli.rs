// src/cli.rs
use std::{
    error::Error,
    fs,
    io::{self, BufRead},
    path::PathBuf,
    time::Duration,
};

use crate::{
    actions::{self, ActionOutcome, ClipboardSink, NoticeLog, SystemClipboard, SystemNavigator},
    bridge::{self, Bridge, NullBridge, SystemBridge},
    card::Card,
    config::{options::AppOptions, state::AppState},
    fetch::Source,
    filter::CategoryFilter,
    progress::Progress,
    render,
    runner,
    sheet::XlsxDecoder,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    pub source: Option<String>,
    pub app_id: Option<String>,
    pub no_bridge: bool,
    pub category: CategoryFilter,
    pub list_categories: bool,
    pub html_out: Option<PathBuf>,
    pub wait_ms: Option<u64>,
    pub dial: Option<String>,
    pub copy: Option<String>,
    pub help: bool,
}

impl Params {
    /// Environment defaults with the flags layered on top.
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::from_env();
        if let Some(s) = &self.source {
            opts.load.source = Source::parse(s);
        }
        if let Some(id) = &self.app_id {
            opts.bridge.app_id = id.clone();
        }
        if self.no_bridge {
            opts.bridge.enabled = false;
        }
        if let Some(ms) = self.wait_ms {
            opts.load.decoder_wait = Duration::from_millis(ms);
        }
        opts
    }
}

struct CliProgress;
impl Progress for CliProgress {
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_args(std::env::args().skip(1))?;
    if params.help {
        eprintln!("{}", include_str!("cli_help.txt"));
        return Ok(());
    }
    execute(&params)
}

pub fn execute(params: &Params) -> Result<(), Box<dyn Error>> {
    let opts = params.to_options();

    if params.dial.is_some() || params.copy.is_some() {
        return run_actions(params, &opts);
    }

    let mut bridge = SystemBridge::new();
    let mut state = AppState::new(opts);
    runner::run(&mut state, &mut bridge, &XlsxDecoder, Some(&mut CliProgress));
    if !state.loaded {
        return Err(state.message.into());
    }
    state.set_filter(params.category.clone());

    if params.list_categories {
        for c in &state.categories {
            println!("{c}");
        }
        return Ok(());
    }

    if let Some(out) = &params.html_out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let html = render::page_html(&state.cards, &state.categories, &state.filter, &state.message);
        fs::write(out, html)?;
        logf!("Export: wrote {}", out.display());
        println!("Wrote {}", out.display());
        return Ok(());
    }

    if !state.message.is_empty() {
        println!("{}", state.message);
    }
    for card in state.visible_cards() {
        println!("{}", card_text(card));
    }
    Ok(())
}

fn run_actions(params: &Params, opts: &AppOptions) -> Result<(), Box<dyn Error>> {
    let mut notes = NoticeLog::default();

    if let Some(code) = &params.dial {
        let mut host: Box<dyn Bridge> = if opts.bridge.enabled {
            Box::new(SystemBridge::new())
        } else {
            Box::new(NullBridge)
        };
        bridge::init_best_effort(host.as_mut(), &opts.bridge.app_id);
        match actions::dial(code, host.as_ref(), &mut SystemNavigator, &mut notes) {
            ActionOutcome::OpenedExternal(uri) | ActionOutcome::Navigated(uri) => println!("{uri}"),
            _ => {}
        }
    }

    for msg in notes.messages.drain(..) {
        println!("{msg}");
    }

    if let Some(code) = &params.copy {
        // Must outlive the wait below: the selection dies with its owner.
        let mut clipboard = SystemClipboard::new();
        let stdin = io::stdin();
        copy_and_hold(code, &mut clipboard, &mut notes, HOLDS_SELECTION, &mut stdin.lock())?;
    }
    Ok(())
}

/// X11 / Wayland clipboards are served by the process that set them, so a
/// CLI that exits right away leaves the clipboard empty.
const HOLDS_SELECTION: bool = cfg!(all(unix, not(any(target_os = "macos", target_os = "android"))));
const MSG_HOLD: &str = "Clipboard is served by this process; press Enter after pasting to exit.";

/// Copy, print the notification, then (when `hold`) keep the clipboard
/// owner alive until a line arrives on `input`.
fn copy_and_hold(
    code: &str,
    clipboard: &mut dyn ClipboardSink,
    notes: &mut NoticeLog,
    hold: bool,
    input: &mut dyn BufRead,
) -> io::Result<ActionOutcome> {
    let outcome = actions::copy(code, clipboard, notes);
    for msg in notes.messages.drain(..) {
        println!("{msg}");
    }

    if hold && matches!(outcome, ActionOutcome::Copied(_)) {
        eprintln!("{MSG_HOLD}");
        let mut line = String::new();
        input.read_line(&mut line)?;
        logd!("Copy: clipboard released");
    }
    Ok(outcome)
}

/// One card as plain text.
pub fn card_text(card: &Card) -> String {
    let mut out = if card.category.is_empty() {
        s!(&card.title)
    } else {
        format!("[{}] {}", card.category, card.title)
    };

    let details: Vec<&str> = [&card.speed, &card.promo_type, &card.price_duration, &card.bonus]
        .into_iter()
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if !details.is_empty() {
        out.push_str("\n  ");
        out.push_str(&details.join(" | "));
    }
    if card.has_code() {
        out.push_str(&format!("\n  {}  ({})", card.code, actions::dial_uri(&card.code)));
    }
    out
}

pub fn parse_args<I>(args: I) -> Result<Params, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--source" => params.source = Some(args.next().ok_or("Missing value for --source")?),
            "--app-id" => params.app_id = Some(args.next().ok_or("Missing value for --app-id")?),
            "--no-bridge" => params.no_bridge = true,
            "--category" | "-c" => {
                let v = args.next().ok_or("Missing value for --category")?;
                params.category = CategoryFilter::parse(&v);
            }
            "--category-all" => params.category = CategoryFilter::All,
            "--list-categories" => params.list_categories = true,
            "--html" => params.html_out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--wait-ms" => {
                let v: u64 = args.next().ok_or("Missing value for --wait-ms")?.parse()?;
                params.wait_ms = Some(v);
            }
            "--dial" => params.dial = Some(args.next().ok_or("Missing code for --dial")?),
            "--copy" => params.copy = Some(args.next().ok_or("Missing code for --copy")?),
            "-h" | "--help" => params.help = true,
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}
