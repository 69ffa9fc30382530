//! Line-oriented command shell.
//!
//! The shell plays the part of the bot's command handlers: it owns one
//! ledger handle and one [`PetRegistry`] for the lifetime of the process and
//! dispatches each input line to them. Pets vanish when the shell exits.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use umbra_ledger::BalanceStore;
use umbra_pets::{PetOutcome, PetRegistry};
use umbra_types::{GuildId, UserId};

const HELP: &str = "\
commands:
  balance <user>            show balance
  credit <user> <amount>    add coins
  debit <user> <amount>     remove coins (stops at 0)
  set <user> <amount>       overwrite balance
  summon <user>             summon a pet (replaces any existing one)
  view <user>               show the user's pet
  feed <user> <food...>     feed the pet
  fuse <user>               fuse the pet with the abyss
  release <user>            release the pet
  pets                      list pets in this guild
  quit                      leave the shell";

/// What the shell wants printed after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Empty,
    Quit,
}

pub struct Shell {
    ledger: Arc<dyn BalanceStore>,
    pets: PetRegistry,
    guild: GuildId,
}

impl Shell {
    pub fn new(ledger: Arc<dyn BalanceStore>, guild: GuildId) -> Self {
        Self {
            ledger,
            pets: PetRegistry::new(),
            guild,
        }
    }

    pub fn guild(&self) -> &GuildId {
        &self.guild
    }

    /// Run one input line.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<Reply> {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return Ok(Reply::Empty);
        };
        let args: Vec<&str> = words.collect();

        let text = match cmd {
            "help" => HELP.to_string(),
            "quit" | "exit" => return Ok(Reply::Quit),
            "balance" => {
                let user = user_arg(&args)?;
                format!("{user}: {}", self.ledger.balance(&user)?)
            }
            "credit" => {
                let (user, amount) = amount_args(&args)?;
                format!("{user}: {}", self.ledger.credit(&user, amount)?)
            }
            "debit" => {
                let (user, amount) = amount_args(&args)?;
                format!("{user}: {}", self.ledger.debit(&user, amount)?)
            }
            "set" => {
                let (user, amount) = amount_args(&args)?;
                self.ledger.set_balance(&user, amount)?;
                format!("{user}: {amount}")
            }
            "summon" => {
                let user = user_arg(&args)?;
                let pet = self.pets.summon(&self.guild, &user);
                format!("{} ({}, {}) ha sido invocado.", pet.name, pet.species, pet.rarity)
            }
            "view" => {
                let user = user_arg(&args)?;
                match self.pets.view(&self.guild, &user) {
                    Some(pet) => format!(
                        "{} | {} | {} | {}",
                        pet.name, pet.species, pet.rarity, pet.state
                    ),
                    None => format!("{user} no tiene mascota."),
                }
            }
            "feed" => {
                let user = user_arg(&args)?;
                let food = args[1..].join(" ");
                if food.is_empty() {
                    bail!("usage: feed <user> <food...>");
                }
                describe(self.pets.feed(&self.guild, &user, &food))
            }
            "fuse" => {
                let user = user_arg(&args)?;
                describe(self.pets.fuse(&self.guild, &user))
            }
            "release" => {
                let user = user_arg(&args)?;
                describe(self.pets.release(&self.guild, &user))
            }
            "pets" => {
                let pets = self.pets.pets_in_guild(&self.guild);
                if pets.is_empty() {
                    "No hay mascotas en este servidor.".to_string()
                } else {
                    pets.iter()
                        .map(|(user, pet)| format!("{user}: {} ({})", pet.name, pet.rarity))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            other => bail!("unknown command: {other} (try `help`)"),
        };
        Ok(Reply::Text(text))
    }
}

fn describe(outcome: PetOutcome) -> String {
    match outcome {
        PetOutcome::Done { message } => message,
        PetOutcome::NotFound { key } => format!("{} no tiene mascota.", key.user),
    }
}

fn user_arg(args: &[&str]) -> anyhow::Result<UserId> {
    let raw = args.first().ok_or_else(|| anyhow!("missing <user>"))?;
    Ok(UserId::new(*raw)?)
}

fn amount_args(args: &[&str]) -> anyhow::Result<(UserId, i64)> {
    let user = user_arg(args)?;
    let raw = args.get(1).ok_or_else(|| anyhow!("missing <amount>"))?;
    let amount = raw
        .parse::<i64>()
        .with_context(|| format!("invalid amount {raw:?}"))?;
    Ok((user, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_ledger::InMemoryLedger;

    fn shell() -> Shell {
        Shell::new(Arc::new(InMemoryLedger::new()), GuildId::new("g").unwrap())
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(t) => t,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(shell().execute("   \n").unwrap(), Reply::Empty);
    }

    #[test]
    fn quit_ends_session() {
        assert_eq!(shell().execute("quit").unwrap(), Reply::Quit);
    }

    #[test]
    fn ledger_commands() {
        let mut sh = shell();
        assert_eq!(text(sh.execute("balance u1").unwrap()), "u1: 0");
        assert_eq!(text(sh.execute("credit u1 25").unwrap()), "u1: 25");
        assert_eq!(text(sh.execute("debit u1 100").unwrap()), "u1: 0");
        assert_eq!(text(sh.execute("set u1 -5").unwrap()), "u1: -5");
        assert_eq!(text(sh.execute("balance u1").unwrap()), "u1: -5");
    }

    #[test]
    fn pet_lifecycle() {
        let mut sh = shell();
        assert_eq!(text(sh.execute("feed u1 manzana").unwrap()), "u1 no tiene mascota.");

        let summoned = text(sh.execute("summon u1").unwrap());
        assert!(summoned.contains("Umbra"));
        assert!(summoned.contains("Rara"));

        let fed = text(sh.execute("feed u1 manzana roja").unwrap());
        assert!(fed.contains("manzana roja"));
        assert!(text(sh.execute("view u1").unwrap()).contains("manzana roja"));

        assert!(text(sh.execute("fuse u1").unwrap()).contains("Abismal"));
        assert!(text(sh.execute("pets").unwrap()).starts_with("u1: Umbra"));

        assert!(text(sh.execute("release u1").unwrap()).contains("sombras"));
        assert_eq!(text(sh.execute("view u1").unwrap()), "u1 no tiene mascota.");
    }

    #[test]
    fn argument_errors() {
        let mut sh = shell();
        assert!(sh.execute("credit").is_err());
        assert!(sh.execute("credit u1").is_err());
        assert!(sh.execute("credit u1 lots").is_err());
        assert!(sh.execute("feed u1").is_err());
        assert!(sh.execute("dance").is_err());
    }
}
