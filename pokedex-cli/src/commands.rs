//! REPL command table and handlers.

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use colored::*;

use pokedex_api::PokeApiClient;
use pokedex_core::types::LocationAreaPage;

use crate::pokedex::{CatchPolicy, Pokedex};

/// A REPL command as listed by `help`.
#[derive(Clone, Copy, Debug)]
pub struct CliCommand {
    pub command: Command,
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command the REPL understands, in `help` order.
pub const COMMANDS: &[CliCommand] = &[
    CliCommand {
        command: Command::Help,
        name: "help",
        usage: "help",
        description: "Displays a help message",
    },
    CliCommand {
        command: Command::Exit,
        name: "exit",
        usage: "exit",
        description: "Exit the Pokedex",
    },
    CliCommand {
        command: Command::Map,
        name: "map",
        usage: "map",
        description: "Displays the next 20 location areas in the Pokemon world",
    },
    CliCommand {
        command: Command::MapBack,
        name: "mapb",
        usage: "mapb",
        description: "Displays the previous 20 location areas",
    },
    CliCommand {
        command: Command::Explore,
        name: "explore",
        usage: "explore <area_name>",
        description: "Lists the Pokemon found in a location area",
    },
    CliCommand {
        command: Command::Catch,
        name: "catch",
        usage: "catch <pokemon_name>",
        description: "Throws a Pokeball at a Pokemon",
    },
    CliCommand {
        command: Command::Inspect,
        name: "inspect",
        usage: "inspect <pokemon_name>",
        description: "Shows the name, height, weight, stats and types of a caught Pokemon",
    },
    CliCommand {
        command: Command::Pokedex,
        name: "pokedex",
        usage: "pokedex",
        description: "Lists every Pokemon you have caught",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    pub fn info(self) -> &'static CliCommand {
        COMMANDS
            .iter()
            .find(|c| c.command == self)
            .unwrap_or(&COMMANDS[0])
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        COMMANDS
            .iter()
            .find(|c| c.name == s)
            .map(|c| c.command)
            .ok_or(())
    }
}

/// Whether the REPL keeps going after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Location-area paging state.
///
/// `next`/`previous` mirror the links of the last page shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub next: Option<String>,
    pub previous: Option<String>,
    started: bool,
}

impl Pagination {
    fn update(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

/// Per-process REPL state.
pub struct Session {
    client: PokeApiClient,
    pagination: Pagination,
    pokedex: Pokedex,
    catcher: CatchPolicy,
}

impl Session {
    pub fn new(client: PokeApiClient, catcher: CatchPolicy) -> Self {
        Self {
            client,
            pagination: Pagination::default(),
            pokedex: Pokedex::new(),
            catcher,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Runs one command. Errors from the request path are returned unchanged.
    pub async fn execute(
        &mut self,
        command: Command,
        arg: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => match arg {
                Some(area) => self.explore(area, out).await?,
                None => usage(command, out)?,
            },
            Command::Catch => match arg {
                Some(name) => self.catch(name, out).await?,
                None => usage(command, out)?,
            },
            Command::Inspect => match arg {
                Some(name) => self.inspect(name, out)?,
                None => usage(command, out)?,
            },
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Welcome to the Pokedex!".cyan().bold())?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for cmd in COMMANDS {
            writeln!(out, "{}: {}", cmd.usage.yellow(), cmd.description)?;
        }
        Ok(())
    }

    async fn map(&mut self, out: &mut dyn Write) -> Result<()> {
        let url = if !self.pagination.started {
            None
        } else if let Some(next) = self.pagination.next.clone() {
            Some(next)
        } else {
            writeln!(out, "{}", "you're on the last page".yellow())?;
            return Ok(());
        };

        let page = self.client.location_areas(url.as_deref()).await?;
        self.show_page(&page, out)
    }

    async fn map_back(&mut self, out: &mut dyn Write) -> Result<()> {
        let Some(previous) = self.pagination.previous.clone() else {
            writeln!(out, "{}", "you're on the first page".yellow())?;
            return Ok(());
        };

        let page = self.client.location_areas(Some(&previous)).await?;
        self.show_page(&page, out)
    }

    fn show_page(&mut self, page: &LocationAreaPage, out: &mut dyn Write) -> Result<()> {
        self.pagination.update(page);
        for name in page.names() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }

    async fn explore(&mut self, area: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let area = self.client.location_area(area).await?;

        writeln!(out, "{}", "Found Pokemon:".green())?;
        for name in area.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch(&mut self, name: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let pokemon = self.client.pokemon(name).await?;

        if self.catcher.attempt(&pokemon) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "{}", "You may now inspect it with the inspect command.".dimmed())?;
            self.pokedex.insert(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect(&self, name: &str, out: &mut dyn Write) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for ty in pokemon.type_names() {
            writeln!(out, "  - {}", ty)?;
        }
        Ok(())
    }

    fn list_pokedex(&self, out: &mut dyn Write) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "no Pokemon caught")?;
            return Ok(());
        }

        writeln!(out, "{}", "Your Pokedex:".bold())?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

fn usage(command: Command, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "usage: {}", command.info().usage)?;
    Ok(())
}
