//! Interactive prompt
//!
//! Each input line is tokenized (double or single quotes group words) and
//! parsed with clap, then dispatched to the directory through the view
//! models.

use std::io::{self, BufRead, Write};

use cafe_core::{
    CafeDirectory, CafeId, Category, Clock, DirectoryRepository, Error, LocalStorage, PurposeTag,
};
use clap::{Parser, Subcommand};

use crate::viewmodel::{render_detail, render_list, AddCafeForm, RatingForm, SubscribeForm};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List every cafe in the directory
    List,
    /// Filter cafes by name, address, features, hours, or review text
    Search {
        /// Words to look for (case-insensitive)
        query: Vec<String>,
    },
    /// Show one cafe with its hours and reviews
    Show {
        id: u64,
        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new cafe
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Comma-separated, e.g. "Quiet Zone, Fast Wi-Fi"
        #[arg(long)]
        features: Option<String>,
        #[arg(long)]
        pet_friendly: bool,
    },
    /// Show the rating form for a cafe
    Form { id: u64 },
    /// Rate a cafe; unset categories stay at 5
    Rate {
        id: u64,
        /// Category score, e.g. --score wifiPower=8
        #[arg(long = "score", value_name = "CATEGORY=VALUE")]
        scores: Vec<String>,
        /// Simple 1-5 star rating instead of categories
        #[arg(long, conflicts_with = "scores")]
        stars: Option<u8>,
        #[arg(long, default_value = "")]
        review: String,
        #[arg(long, default_value = "")]
        tips: String,
        /// Purpose tag id, e.g. --tag solo-study
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// Check whether this device can rate a cafe now
    Status { id: u64 },
    /// List rating categories and purpose tags
    Categories,
    /// Subscribe to the newsletter
    Subscribe { email: String },
    /// Leave the prompt
    #[command(alias = "exit")]
    Quit,
}

/// Result of one prompt line
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Output(String),
    Quit,
}

pub struct Shell<'a, R, S, C> {
    directory: &'a mut CafeDirectory<R, S, C>,
}

impl<'a, R, S, C> Shell<'a, R, S, C>
where
    R: DirectoryRepository,
    S: LocalStorage,
    C: Clock,
{
    pub fn new(directory: &'a mut CafeDirectory<R, S, C>) -> Self {
        Self { directory }
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let tokens = match split_line(line) {
            Ok(tokens) => tokens,
            Err(e) => return Outcome::Output(e),
        };
        if tokens.is_empty() {
            return Outcome::Output(String::new());
        }

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => return Outcome::Output(e.render().to_string().trim_end().to_string()),
        };

        match self.execute(parsed.command) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "Command failed");
                Outcome::Output(format!("Error: {e}"))
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Outcome, Error> {
        let text = match command {
            ShellCommand::List => render_list(&self.directory.cafes()?),
            ShellCommand::Search { query } => {
                render_list(&self.directory.search(&query.join(" "))?)
            }
            ShellCommand::Show { id, json } => {
                let cafe = self
                    .directory
                    .cafe(CafeId(id))?
                    .ok_or_else(|| Error::NotFound(format!("Cafe {id}")))?;
                if json {
                    serde_json::to_string_pretty(&cafe)?
                } else {
                    render_detail(&cafe)
                }
            }
            ShellCommand::Add {
                name,
                address,
                features,
                pet_friendly,
            } => {
                let form = AddCafeForm {
                    name: name.unwrap_or_default(),
                    address: address.unwrap_or_default(),
                    features: features.unwrap_or_default(),
                    pet_friendly,
                };
                let missing = form.missing_fields();
                if !missing.is_empty() {
                    let messages: Vec<&str> = missing.iter().map(|m| m.message()).collect();
                    return Ok(Outcome::Output(messages.join("\n")));
                }
                let cafe = self.directory.add_cafe(form.to_listing())?;
                format!("Added {} as #{}", cafe.name, cafe.id)
            }
            ShellCommand::Form { id } => self.render_form(CafeId(id))?,
            ShellCommand::Rate {
                id,
                scores,
                stars,
                review,
                tips,
                tags,
            } => {
                let id = CafeId(id);
                let mut form =
                    RatingForm::new(self.directory.schema(), self.directory.eligibility(id)?);
                if let Some(notice) = form.notice() {
                    return Ok(Outcome::Output(notice));
                }
                for entry in &scores {
                    form.set_score_str(entry)?;
                }
                if let Some(stars) = stars {
                    form.set_stars(stars);
                }
                for tag in &tags {
                    form.toggle_tag_id(tag)?;
                }
                form.review = review;
                form.tips = tips;

                let cafe = self.directory.submit_rating(id, form.into_draft())?;
                format!(
                    "Thanks! {} is now rated {:.1} from {} ratings.",
                    cafe.name, cafe.rating, cafe.rating_count
                )
            }
            ShellCommand::Status { id } => {
                let form = RatingForm::new(
                    self.directory.schema(),
                    self.directory.eligibility(CafeId(id))?,
                );
                form.notice()
                    .unwrap_or_else(|| "You can rate this cafe now.".to_string())
            }
            ShellCommand::Categories => render_categories(),
            ShellCommand::Subscribe { email } => match SubscribeForm::new(email).submit() {
                Ok(message) | Err(message) => message,
            },
            ShellCommand::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Output(text))
    }

    fn render_form(&self, id: CafeId) -> Result<String, Error> {
        let cafe = self
            .directory
            .cafe(id)?
            .ok_or_else(|| Error::NotFound(format!("Cafe {id}")))?;
        let form = RatingForm::new(self.directory.schema(), self.directory.eligibility(id)?);

        let mut lines = vec![format!("Rate {}", cafe.name)];
        lines.extend(form.sliders().into_iter().map(|(category, value)| {
            format!(
                "  {:<22} {:>2}/10  {}",
                category.key(),
                value,
                category.description()
            )
        }));
        let tags: Vec<&str> = PurposeTag::ALL.iter().map(|t| t.id()).collect();
        lines.push(format!("  tags: {}", tags.join(", ")));
        lines.push(form.notice().unwrap_or_else(|| {
            "Submit with: rate <id> --score <category>=<1-10> ...".to_string()
        }));
        Ok(lines.join("\n"))
    }
}

fn render_categories() -> String {
    let mut lines = vec!["Categories:".to_string()];
    lines.extend(Category::ALL.iter().map(|category| {
        format!(
            "  {:<20} {:<22} v{}",
            category.key(),
            category.label(),
            u8::from(category.introduced_in())
        )
    }));
    lines.push("Tags:".to_string());
    lines.extend(
        PurposeTag::ALL
            .iter()
            .map(|tag| format!("  {:<20} {}", tag.id(), tag.label())),
    );
    lines.join("\n")
}

/// Split a line into words, keeping quoted text together
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Read commands from stdin until `quit` or end of input
pub fn run<R, S, C>(directory: &mut CafeDirectory<R, S, C>) -> io::Result<()>
where
    R: DirectoryRepository,
    S: LocalStorage,
    C: Clock,
{
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Study cafe directory. Type 'help' for commands.")?;

    let mut shell = Shell::new(directory);
    loop {
        write!(stdout, "cafes> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match shell.handle_line(&line) {
            Outcome::Output(text) => {
                if !text.is_empty() {
                    writeln!(stdout, "{text}")?;
                }
            }
            Outcome::Quit => break,
        }
    }
    Ok(())
}
