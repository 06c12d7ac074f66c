//! # Browser Session
//!
//! Turns user intents into aggregator queries and feeds the results to a
//! presenter. Each dispatch:
//! 1. Validates the search term, if the intent carries one
//! 2. Shows the loading state
//! 3. Runs the matching aggregator query
//! 4. Renders exactly one of list, detail, empty or error
//!
//! The session remembers the last ingredient term entered so a cuisine
//! with no recipes of its own can fall back to an ingredient search.

use aggregator::{AggregateError, QueryOutcome, RecipeAggregator, normalize_term};
use model::{DetailRecord, QueryLabel, RecipeId};
use tracing::{debug, error, info};

use crate::intent::Intent;
use crate::presenter::Presenter;

/// Which terminal state a dispatch ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// A list of this many cards
    List(usize),
    Detail(RecipeId),
    Empty,
    Error,
}

pub struct BrowserSession<P: Presenter> {
    aggregator: RecipeAggregator,
    presenter: P,
    last_term: Option<String>,
}

impl<P: Presenter> BrowserSession<P> {
    pub fn new(aggregator: RecipeAggregator, presenter: P) -> Self {
        Self {
            aggregator,
            presenter,
            last_term: None,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// The last ingredient term the user searched for, normalized.
    pub fn last_term(&self) -> Option<&str> {
        self.last_term.as_deref()
    }

    /// Run one intent to completion.
    ///
    /// Never fails: network errors become an error render and empty
    /// answers become an empty render.
    pub async fn dispatch(&mut self, intent: Intent) -> Rendered {
        debug!(?intent, "Dispatching");

        match intent {
            Intent::LoadAll => {
                self.presenter.render_loading();
                let result = self.aggregator.load_mixed_recipes().await;
                self.finish_list(result, "Failed to load recipes")
            }
            Intent::PickCuisine(origin) => {
                self.presenter.render_loading();
                let result = self
                    .aggregator
                    .load_by_origin(&origin, self.last_term.as_deref())
                    .await;
                self.finish_list(result, "Failed to fetch cuisine recipes")
            }
            Intent::PickCategory(category) => {
                self.presenter.render_loading();
                let result = self.aggregator.load_by_category(&category).await;
                self.finish_list(result, "Failed to fetch category recipes")
            }
            Intent::SearchIngredient(term) => {
                let Some(term) = self.remember_term(&term) else {
                    return Rendered::Empty;
                };
                self.presenter.render_loading();
                let result = self.aggregator.search_by_ingredient(&term).await;
                self.finish_list(result, "Failed to search recipes")
            }
            Intent::SearchCuisineIngredient { origin, term } => {
                let Some(term) = self.remember_term(&term) else {
                    return Rendered::Empty;
                };
                self.presenter.render_loading();
                let result = self
                    .aggregator
                    .search_by_origin_and_ingredient(&origin, &term)
                    .await;
                self.finish_list(result, "Failed to search recipes")
            }
            Intent::PickRandom => {
                self.presenter.render_loading();
                match self.aggregator.load_random().await {
                    Ok(record) => {
                        info!("Random pick: {}", record.name);
                        self.presenter.render_list(&[record], &QueryLabel::Random);
                        Rendered::List(1)
                    }
                    Err(e) => self.fail(e, "Failed to fetch random recipe"),
                }
            }
            Intent::SelectRecipe(id) => match self.aggregator.lookup_recipe(&id).await {
                Ok(record) => self.show_detail(record),
                Err(e) => self.fail(e, "Failed to load recipe details"),
            },
        }
    }

    /// Validate and store a search term. Renders the validation message
    /// and returns `None` when the term is blank.
    fn remember_term(&mut self, term: &str) -> Option<String> {
        match normalize_term(term) {
            Ok(term) => {
                self.last_term = Some(term.clone());
                Some(term)
            }
            Err(e) => {
                self.fail(e, "Failed to search recipes");
                None
            }
        }
    }

    fn finish_list(
        &mut self,
        result: aggregator::Result<QueryOutcome>,
        failure: &str,
    ) -> Rendered {
        match result {
            Ok(QueryOutcome::Listed(list)) if list.is_empty() => {
                self.presenter.render_empty("No recipes found");
                Rendered::Empty
            }
            Ok(QueryOutcome::Listed(list)) => {
                if let (true, QueryLabel::OriginIngredient { origin, term }) =
                    (list.used_fallback, &list.label)
                {
                    self.presenter.render_notice(&format!(
                        "No {} dishes found. Showing related recipes with \"{}\"",
                        origin, term
                    ));
                }
                self.presenter.render_list(&list.records, &list.label);
                Rendered::List(list.len())
            }
            Ok(QueryOutcome::Empty { label, message }) => {
                info!("No results for {}", label);
                self.presenter.render_empty(&message);
                Rendered::Empty
            }
            Err(e) => self.fail(e, failure),
        }
    }

    fn show_detail(&mut self, record: DetailRecord) -> Rendered {
        self.presenter.render_detail(&record);
        Rendered::Detail(record.id)
    }

    fn fail(&mut self, err: AggregateError, message: &str) -> Rendered {
        match err {
            AggregateError::Validation(msg) => {
                self.presenter.render_empty(&msg);
                Rendered::Empty
            }
            AggregateError::Network(e) => {
                error!("{}: {}", message, e);
                self.presenter.render_error(message);
                Rendered::Error
            }
        }
    }
}
