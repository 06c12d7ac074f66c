//! User intents and their one-line command syntax.
//!
//! ```text
//! all                         landing page
//! cuisine <name>              e.g. cuisine Indian
//! category <name>             e.g. category Seafood
//! search <ingredient>         e.g. search chicken breast
//! search-in <cuisine> <term>  e.g. search-in Indian chicken
//! random
//! show <id>                   detail view, e.g. show 52772
//! ```

use model::RecipeId;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    LoadAll,
    PickCuisine(String),
    PickCategory(String),
    SearchIngredient(String),
    SearchCuisineIngredient { origin: String, term: String },
    PickRandom,
    SelectRecipe(RecipeId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command '{command}' needs {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
}

fn required(command: &str, rest: &str, expected: &'static str) -> Result<String, IntentParseError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(IntentParseError::MissingArgument {
            command: command.to_string(),
            expected,
        });
    }
    Ok(rest.to_string())
}

impl FromStr for Intent {
    type Err = IntentParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command.to_lowercase().as_str() {
            "all" => Ok(Intent::LoadAll),
            "random" => Ok(Intent::PickRandom),
            "cuisine" => Ok(Intent::PickCuisine(required(command, rest, "a cuisine name")?)),
            "category" => Ok(Intent::PickCategory(required(command, rest, "a category name")?)),
            // Blank terms are passed through; the session reports them
            "search" => Ok(Intent::SearchIngredient(rest.trim().to_string())),
            "search-in" => {
                let rest = required(command, rest, "a cuisine and an ingredient")?;
                let (origin, term) = rest.split_once(char::is_whitespace).unwrap_or((&rest, ""));
                Ok(Intent::SearchCuisineIngredient {
                    origin: origin.to_string(),
                    term: term.trim().to_string(),
                })
            }
            "show" => Ok(Intent::SelectRecipe(required(command, rest, "a recipe id")?)),
            _ => Err(IntentParseError::UnknownCommand(line.to_string())),
        }
    }
}
