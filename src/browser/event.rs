/// User actions the browser reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Search action with the given text in the search field.
    SetSearchTerm(String),
    /// Enter pressed in the search field.
    Submit,
    /// Year filter changed; empty means all years.
    SelectYear(String),
    SetMaker(String),
    SetCode(String),
    PreviousPage,
    NextPage,
    /// Card chosen by its 1-based position on the current page.
    OpenCard(usize),
    OpenFood(i64),
    CloseDetail,
    ClickBackdrop,
    ClickContent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <enter>              run the search again with the current fields
  search|s <text>      search foods by name
  year <yyyy>|all      filter by research year
  maker [text]         filter by maker (empty clears)
  code [code]          filter by food code (empty clears)
  next|n, prev|p       change page
  open|o <n>           show details for card n
  id <food id>         show details for a food id
  close|x              close the detail view
  back|esc             click outside the detail view
  help|?               this text
  quit|q               leave
";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Event(Event::Submit));
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let event = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "search" | "s" => Event::SetSearchTerm(rest.to_string()),
        "year" | "y" => {
            if rest.eq_ignore_ascii_case("all") {
                Event::SelectYear(String::new())
            } else {
                Event::SelectYear(rest.to_string())
            }
        }
        "maker" | "m" => Event::SetMaker(rest.to_string()),
        "code" => Event::SetCode(rest.to_string()),
        "next" | "n" => Event::NextPage,
        "prev" | "p" | "previous" => Event::PreviousPage,
        "open" | "o" => {
            let position: usize = rest
                .parse()
                .map_err(|_| format!("expected a card number, got '{rest}'"))?;
            if position == 0 {
                return Err("card numbers start at 1".to_string());
            }
            Event::OpenCard(position)
        }
        "id" => {
            let id: i64 = rest
                .parse()
                .map_err(|_| format!("expected a food id, got '{rest}'"))?;
            Event::OpenFood(id)
        }
        "close" | "x" => Event::CloseDetail,
        "back" | "esc" => Event::ClickBackdrop,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Command::Event(event))
}
