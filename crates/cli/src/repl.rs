//! `gs interactive` — line-oriented driver for the search controller.
//!
//! Plain lines are typed into the header search bar; suggestions appear after
//! the debounce delay. Lines starting with `:` are commands.

use gallery_search_core::keys::{Key, KeyAction, KeyEvent, KeyTarget};
use gallery_search_core::types::MediaType;
use gallery_search_core::view::{InputField, ResultsBody};
use gallery_search_core::{SearchBackend, SearchController};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Type text to edit the search bar. Commands:
  :enter            search the current text (or highlighted suggestion)
  :key <k>          send a key: ctrl+k, /, esc, up, down, enter
  :pick <n>         search suggestion n (1-based)
  :next / :prev     change page
  :open <n>         view result n (1-based)
  :type [image|video]
  :clear            clear the search bar
  :quit";

enum Command {
    Type(String),
    Key(KeyEvent),
    Pick(usize),
    Next,
    Prev,
    Open(usize),
    Filter(Option<MediaType>),
    Clear,
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Command, String> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Type(line.to_string()));
    };
    let (cmd, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    let arg = arg.trim();
    let index = |a: &str| {
        a.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| n - 1)
            .ok_or_else(|| format!("expected a number >= 1, got '{a}'"))
    };
    let header = KeyTarget::SearchInput(InputField::Header);
    Ok(match cmd {
        "enter" => Command::Key(KeyEvent::new(Key::Enter, header)),
        "key" => Command::Key(match arg {
            "ctrl+k" => KeyEvent::new(Key::Char('k'), KeyTarget::Body).with_ctrl(),
            "/" => KeyEvent::new(Key::Char('/'), KeyTarget::Body),
            "esc" => KeyEvent::new(Key::Escape, KeyTarget::Body),
            "up" => KeyEvent::new(Key::ArrowUp, header),
            "down" => KeyEvent::new(Key::ArrowDown, header),
            "enter" => KeyEvent::new(Key::Enter, header),
            other => return Err(format!("unknown key '{other}'")),
        }),
        "pick" => Command::Pick(index(arg)?),
        "next" => Command::Next,
        "prev" => Command::Prev,
        "open" => Command::Open(index(arg)?),
        "type" => Command::Filter(MediaType::parse_filter(arg)?),
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(format!("unknown command ':{other}' (try :help)")),
    })
}

pub async fn run<B: SearchBackend>(controller: &mut SearchController<B>) {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = controller.next_suggestions(), if controller.suggestions_pending() => {
                print_dropdown(controller);
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("error: could not read input: {e}");
                        break;
                    }
                };
                match parse(line.trim_end()) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => apply(controller, cmd).await,
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
    }
}

async fn apply<B: SearchBackend>(controller: &mut SearchController<B>, cmd: Command) {
    // Failed searches were already reported through the status surface
    let searched = match cmd {
        Command::Type(text) => {
            controller.on_input(InputField::Header, &text);
            return;
        }
        Command::Key(event) => match controller.handle_key(&event).await {
            Ok(KeyAction::Submit(_)) => Ok(true),
            Ok(KeyAction::HighlightNext | KeyAction::HighlightPrevious) => {
                print_dropdown(controller);
                return;
            }
            Ok(_) => Ok(false),
            Err(e) => Err(e),
        },
        Command::Pick(i) => controller.select_suggestion(i).await,
        Command::Next => controller.next_page().await,
        Command::Prev => controller.previous_page().await,
        Command::Open(i) => {
            if !controller.open_item(i) {
                eprintln!("No result {}", i + 1);
            }
            return;
        }
        Command::Filter(filter) => {
            controller.set_type_filter(filter);
            return;
        }
        Command::Clear => {
            controller.clear(InputField::Header);
            return;
        }
        Command::Help => {
            println!("{HELP}");
            return;
        }
        Command::Quit => return,
    };
    if let Ok(true) = searched {
        print_results(controller);
    }
}

fn print_dropdown<B: SearchBackend>(controller: &SearchController<B>) {
    let dropdown = &controller.view().dropdown;
    if !dropdown.visible {
        return;
    }
    for (i, s) in dropdown.suggestions.iter().enumerate() {
        let marker = if dropdown.highlighted == Some(i) { '>' } else { ' ' };
        println!("{marker} {}. {s}", i + 1);
    }
}

pub fn print_results<B: SearchBackend>(controller: &SearchController<B>) {
    let view = controller.view();
    if !view.panel_open {
        return;
    }
    match &view.body {
        ResultsBody::Tiles(tiles) => {
            for (i, tile) in tiles.iter().enumerate() {
                println!("{:>4}. {}", i + 1, tile.label);
            }
        }
        body => println!("{}", body.text()),
    }
    if let Some(r) = controller.results() {
        println!("\n{} (page {}/{})", view.count_text, r.page, r.page_count());
    }
}
