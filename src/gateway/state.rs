use std::sync::Arc;

use crate::derive::AddressDeriver;
use crate::phrase::Phrase;
use crate::search::{Evaluator, SearchController};
use crate::store::CandidateStoreHandle;
use crate::targets::TargetRegistryHandle;

pub struct AppState<D> {
    pub controller: Arc<SearchController<D>>,

    /// Curated phrases for the `known` strategy, validated at startup.
    pub known_phrases: Arc<Vec<Phrase>>,
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            known_phrases: Arc::clone(&self.known_phrases),
        }
    }
}

impl<D> AppState<D>
where
    D: AddressDeriver + 'static,
{
    pub fn new(controller: Arc<SearchController<D>>, known_phrases: Vec<Phrase>) -> Self {
        Self {
            controller,
            known_phrases: Arc::new(known_phrases),
        }
    }

    pub fn evaluator(&self) -> &Evaluator<D> {
        self.controller.evaluator()
    }

    pub fn store(&self) -> &CandidateStoreHandle {
        self.controller.evaluator().store()
    }

    pub fn targets(&self) -> &TargetRegistryHandle {
        self.controller.evaluator().targets()
    }
}
