use owo_colors::OwoColorize as _;

fn main() {
  if let Err(err) = init_project::run() {
    anstream::eprintln!("{}", format!("{err:#}").red());
    if let Some(hint) = init_project::errors::hint(&err) {
      anstream::eprintln!("{}", hint.yellow());
    }
    std::process::exit(1);
  }
}
